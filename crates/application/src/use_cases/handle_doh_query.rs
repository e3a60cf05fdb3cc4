use crate::ports::DnsMessageForwarder;
use dnsprobe_domain::DomainError;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

pub struct HandleDohQueryUseCase {
    forwarder: Arc<dyn DnsMessageForwarder>,
}

impl HandleDohQueryUseCase {
    pub fn new(forwarder: Arc<dyn DnsMessageForwarder>) -> Self {
        Self { forwarder }
    }

    pub async fn execute(
        &self,
        request: &[u8],
        upstream: Option<&str>,
        proxy: Option<&str>,
    ) -> Result<Vec<u8>, DomainError> {
        let start = Instant::now();
        let result = self.forwarder.forward(request, upstream, proxy).await;

        match &result {
            Ok(response) => debug!(
                request_len = request.len(),
                response_len = response.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "DoH query handled"
            ),
            Err(e) => warn!(request_len = request.len(), error = %e, "DoH query rejected"),
        }

        result
    }
}
