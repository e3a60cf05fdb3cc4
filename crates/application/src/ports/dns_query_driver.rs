use async_trait::async_trait;
use dnsprobe_domain::{QueryResult, RecordTypeSet, ServerSpec};

/// Resolves one record-type set against one server.
///
/// Transport failures are reported inside the returned `QueryResult`
/// (`status = error`), never as a panic or an `Err`, so callers can keep
/// one slot per server regardless of what happened on the wire.
#[async_trait]
pub trait DnsQueryDriver: Send + Sync {
    async fn query(
        &self,
        server: &ServerSpec,
        domain: &str,
        record_types: &RecordTypeSet,
        proxy: Option<&str>,
    ) -> QueryResult;
}
