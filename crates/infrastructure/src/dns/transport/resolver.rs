use dnsprobe_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a hostname to all its IP addresses (IPv4 + IPv6).
pub async fn resolve_all(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    let target = format!("{}:{}", hostname, port);

    let addrs_iter = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| {
            DomainError::Transport(format!("DNS resolution failed for {}: {}", target, e))
        })?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();

    if addrs.is_empty() {
        return Err(DomainError::Transport(format!(
            "No addresses found for {}",
            target
        )));
    }

    Ok(addrs)
}

/// Socket address to contact for an upstream; hostnames resolve to their
/// first address.
pub async fn resolve_upstream(
    addr: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Some(sock) = addr.socket_addr() {
        return Ok(sock);
    }

    let (hostname, port) = addr
        .unresolved_parts()
        .ok_or_else(|| DomainError::Transport(format!("Unresolvable address {}", addr)))?;

    let addrs = resolve_all(hostname, port, timeout).await?;
    Ok(addrs[0])
}
