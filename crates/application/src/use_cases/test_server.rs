use crate::ports::DnsQueryDriver;
use dnsprobe_domain::{QueryResult, RecordTypeSet, ServerSpec};
use std::sync::Arc;
use tracing::info;

/// Single-server test: one spec, one domain, one record-type symbol.
pub struct TestServerUseCase {
    driver: Arc<dyn DnsQueryDriver>,
}

impl TestServerUseCase {
    pub fn new(driver: Arc<dyn DnsQueryDriver>) -> Self {
        Self { driver }
    }

    pub async fn execute(
        &self,
        server: &ServerSpec,
        domain: &str,
        record_type: &str,
        proxy: Option<&str>,
    ) -> QueryResult {
        info!(server = %server, domain = %domain, record_type = %record_type, "Testing server");

        let record_types = RecordTypeSet::resolve(record_type);
        self.driver
            .query(server, domain, &record_types, proxy)
            .await
    }

    /// Same as `execute` but starting from an unparsed spec string; a spec
    /// that does not parse becomes an error result.
    pub async fn execute_raw(
        &self,
        server: &str,
        domain: &str,
        record_type: &str,
        proxy: Option<&str>,
    ) -> QueryResult {
        match server.parse::<ServerSpec>() {
            Ok(spec) => self.execute(&spec, domain, record_type, proxy).await,
            Err(e) => QueryResult::failure(server, e.to_string()),
        }
    }
}
