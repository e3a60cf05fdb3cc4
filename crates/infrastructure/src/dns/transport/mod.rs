pub mod framing;
pub mod https;
pub mod local;
pub mod resolver;
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use bytes::Bytes;
use dnsprobe_domain::{DomainError, ServerSpec, TlsVerification};
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    /// Raw wire-format reply.
    pub bytes: Bytes,

    pub protocol_used: &'static str,
}

/// One raw request/reply exchange. Transports know nothing about record
/// types; the driver builds the query and decodes what comes back.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    #[cfg(feature = "dns-over-rustls")]
    Tls(tls::TlsTransport),
    #[cfg(feature = "dns-over-https")]
    Https(https::HttpsTransport),
    Local(local::LocalTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(t) => DnsTransport::send(t, message_bytes, timeout).await,
            #[cfg(feature = "dns-over-https")]
            Self::Https(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Local(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(_) => "TLS",
            #[cfg(feature = "dns-over-https")]
            Self::Https(_) => "HTTPS",
            Self::Local(_) => "LOCAL",
        }
    }
}

/// Matches the server spec once and builds the transport that serves it.
pub fn create_transport(
    server: &ServerSpec,
    tls_verification: TlsVerification,
    proxy: Option<&str>,
    local_resolver: &local::LocalResolver,
) -> Result<Transport, DomainError> {
    match server {
        ServerSpec::Udp { addr } => Ok(Transport::Udp(udp::UdpTransport::new(addr.clone()))),

        #[cfg(feature = "dns-over-rustls")]
        ServerSpec::Tls { addr, hostname } => Ok(Transport::Tls(tls::TlsTransport::new(
            addr.clone(),
            hostname.to_string(),
            tls_verification,
        ))),

        #[cfg(not(feature = "dns-over-rustls"))]
        ServerSpec::Tls { addr, .. } => Err(DomainError::Transport(format!(
            "TLS feature not enabled. Enable 'dns-over-rustls' feature to use: {}",
            addr
        ))),

        #[cfg(feature = "dns-over-https")]
        ServerSpec::Doh { url } => Ok(Transport::Https(https::HttpsTransport::new(
            url.to_string(),
            proxy.map(str::to_string),
            tls_verification,
        ))),

        #[cfg(not(feature = "dns-over-https"))]
        ServerSpec::Doh { url } => Err(DomainError::Transport(format!(
            "HTTPS feature not enabled. Enable 'dns-over-https' feature to use: {}",
            url
        ))),

        ServerSpec::Local => Ok(Transport::Local(local::LocalTransport::new(
            local_resolver.clone(),
        ))),
    }
}
