use dnsprobe_api::AppState;
use dnsprobe_application::ports::{DnsMessageForwarder, DnsQueryDriver};
use dnsprobe_application::use_cases::{
    HandleDohQueryUseCase, ListServersUseCase, RunQueriesUseCase, TestServerUseCase,
};
use dnsprobe_domain::Config;
use dnsprobe_infrastructure::dns::{DohGateway, QueryOptions, TransportDriver};
use std::sync::Arc;
use tracing::info;

pub struct UseCases {
    pub run_queries: Arc<RunQueriesUseCase>,
    pub test_server: Arc<TestServerUseCase>,
    pub list_servers: Arc<ListServersUseCase>,
    pub handle_doh: Arc<HandleDohQueryUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> Self {
        let options = QueryOptions {
            timeout: config.query.timeout(),
            tls_verification: config.query.tls_verification(),
            ..QueryOptions::default()
        };
        let driver: Arc<dyn DnsQueryDriver> = Arc::new(TransportDriver::new(options));

        let fallback_chain = config.gateway.fallback_chain();
        info!(
            upstreams = fallback_chain.len(),
            first = fallback_chain.first().map(String::as_str).unwrap_or("none"),
            "DoH gateway fallback chain ready"
        );
        let gateway: Arc<dyn DnsMessageForwarder> =
            Arc::new(DohGateway::new(driver.clone(), fallback_chain));

        Self {
            run_queries: Arc::new(RunQueriesUseCase::new(driver.clone())),
            test_server: Arc::new(TestServerUseCase::new(driver)),
            list_servers: Arc::new(ListServersUseCase::new()),
            handle_doh: Arc::new(HandleDohQueryUseCase::new(gateway)),
        }
    }

    pub fn into_app_state(self) -> AppState {
        AppState {
            run_queries: self.run_queries,
            test_server: self.test_server,
            list_servers: self.list_servers,
            handle_doh: self.handle_doh,
        }
    }
}
