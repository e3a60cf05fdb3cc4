use crate::ports::DnsQueryDriver;
use dnsprobe_domain::server_catalog::default_query_servers;
use dnsprobe_domain::{QueryResult, RecordTypeSet, ServerQueryResult, ServerSpec};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Fans one domain + record-type request out to every listed server.
///
/// Each server runs on its own task and the call returns only when all of
/// them have finished. The output has one entry per input spec, in input
/// order; a spec that fails to parse or a task that dies still fills its
/// slot with an error result.
pub struct RunQueriesUseCase {
    driver: Arc<dyn DnsQueryDriver>,
}

impl RunQueriesUseCase {
    pub fn new(driver: Arc<dyn DnsQueryDriver>) -> Self {
        Self { driver }
    }

    pub async fn execute(
        &self,
        domain: &str,
        servers: Option<Vec<String>>,
        record_type: &str,
        proxy: Option<&str>,
    ) -> Vec<ServerQueryResult> {
        let servers = match servers {
            Some(list) if !list.is_empty() => list,
            _ => default_query_servers(),
        };
        let record_types = RecordTypeSet::resolve(record_type);
        let start = Instant::now();

        info!(
            domain = %domain,
            record_type = %record_type,
            servers = servers.len(),
            "Running multi-server query"
        );

        let handles: Vec<_> = servers
            .iter()
            .map(|server| {
                let driver = self.driver.clone();
                let server = server.clone();
                let domain = domain.to_string();
                let record_types = record_types.clone();
                let proxy = proxy.map(str::to_string);

                tokio::spawn(async move {
                    match server.parse::<ServerSpec>() {
                        Ok(spec) => {
                            driver
                                .query(&spec, &domain, &record_types, proxy.as_deref())
                                .await
                        }
                        Err(e) => QueryResult::failure(server, e.to_string()),
                    }
                })
            })
            .collect();

        let outcomes = join_all(handles).await;

        let results: Vec<ServerQueryResult> = servers
            .into_iter()
            .zip(outcomes)
            .map(|(server, outcome)| {
                let result = outcome.unwrap_or_else(|e| {
                    warn!(server = %server, error = %e, "Query task failed");
                    QueryResult::failure(server.clone(), format!("query task failed: {}", e))
                });
                ServerQueryResult { server, result }
            })
            .collect();

        debug!(
            domain = %domain,
            succeeded = results.iter().filter(|r| r.result.is_success()).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Multi-server query finished"
        );

        results
    }
}
