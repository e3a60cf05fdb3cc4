//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! One datagram out, one matching datagram back. Messages are sent as-is (no
//! framing). There is no retry on timeout and no TCP fallback when the reply
//! has the TC bit set; the truncated reply is returned as received.

use super::resolver::resolve_upstream;
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnsprobe_domain::{DomainError, UpstreamAddr};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    upstream_addr: UpstreamAddr,
}

impl UdpTransport {
    pub fn new(upstream_addr: UpstreamAddr) -> Self {
        Self { upstream_addr }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let deadline = Instant::now() + timeout;
        let server_addr = resolve_upstream(&self.upstream_addr, timeout).await?;

        let bytes = exchange(server_addr, message_bytes, deadline).await?;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

/// Sends one query datagram to `server_addr` and waits until `deadline` for
/// a reply carrying the same message ID. The socket is connected, so the
/// kernel drops datagrams from other sources and reports ICMP port
/// unreachable as a refused connection.
async fn exchange(
    server_addr: SocketAddr,
    message_bytes: &[u8],
    deadline: Instant,
) -> Result<Bytes, DomainError> {
    if message_bytes.len() < 2 {
        return Err(DomainError::MalformedMessage(
            "query shorter than a message ID".to_string(),
        ));
    }
    let query_id = [message_bytes[0], message_bytes[1]];

    let bind_addr: SocketAddr = if server_addr.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| DomainError::Transport(format!("Failed to bind UDP socket: {}", e)))?;
    socket
        .connect(server_addr)
        .await
        .map_err(|e| io_error(server_addr, "connect to", e))?;

    let bytes_sent = tokio::time::timeout_at(deadline, socket.send(message_bytes))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })?
        .map_err(|e| io_error(server_addr, "send UDP query to", e))?;

    debug!(server = %server_addr, bytes_sent = bytes_sent, "UDP query sent");

    let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

    loop {
        let bytes_received = tokio::time::timeout_at(deadline, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server_addr.to_string(),
            })?
            .map_err(|e| io_error(server_addr, "receive UDP response from", e))?;

        if bytes_received < 2 || recv_buf[..2] != query_id {
            debug!(server = %server_addr, "Dropping UDP reply with mismatched ID");
            continue;
        }

        debug!(
            server = %server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        recv_buf.truncate(bytes_received);
        return Ok(Bytes::from(recv_buf));
    }
}

fn io_error(server_addr: SocketAddr, action: &str, e: std::io::Error) -> DomainError {
    match e.kind() {
        std::io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server_addr.to_string(),
        },
        _ => DomainError::Transport(format!("Failed to {} {}: {}", action, server_addr, e)),
    }
}
