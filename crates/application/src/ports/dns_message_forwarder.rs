use async_trait::async_trait;
use dnsprobe_domain::DomainError;

/// Answers one wire-format DNS query with a wire-format response.
///
/// Upstream failures are encoded in the response (SERVFAIL); `Err` is kept
/// for input that cannot be answered at the DNS level at all.
#[async_trait]
pub trait DnsMessageForwarder: Send + Sync {
    async fn forward(
        &self,
        request: &[u8],
        upstream: Option<&str>,
        proxy: Option<&str>,
    ) -> Result<Vec<u8>, DomainError>;
}
