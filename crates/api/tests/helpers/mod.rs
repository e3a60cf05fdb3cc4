#![allow(dead_code)]
use async_trait::async_trait;
use axum::Router;
use dnsprobe_api::{create_api_routes, create_doh_routes, AppState};
use dnsprobe_application::ports::{DnsMessageForwarder, DnsQueryDriver};
use dnsprobe_application::use_cases::{
    HandleDohQueryUseCase, ListServersUseCase, RunQueriesUseCase, TestServerUseCase,
};
use dnsprobe_domain::{DomainError, QueryResult, RecordTypeSet, ServerSpec};
use std::sync::Arc;

/// Answers `[A] 192.0.2.1` from every server except `10.9.9.9`, which fails.
pub struct StubDriver;

#[async_trait]
impl DnsQueryDriver for StubDriver {
    async fn query(
        &self,
        server: &ServerSpec,
        _domain: &str,
        record_types: &RecordTypeSet,
        _proxy: Option<&str>,
    ) -> QueryResult {
        let address = server.address();
        if address == "10.9.9.9:53" {
            return QueryResult::failure(address, "Transport timeout connecting to 10.9.9.9:53");
        }
        let answers = record_types
            .types()
            .iter()
            .map(|rt| format!("[{}] 192.0.2.1", rt))
            .collect();
        QueryResult::success(address, 1.5, answers)
    }
}

/// Echoes the request back, refusing anything shorter than a header.
pub struct EchoForwarder;

#[async_trait]
impl DnsMessageForwarder for EchoForwarder {
    async fn forward(
        &self,
        request: &[u8],
        _upstream: Option<&str>,
        _proxy: Option<&str>,
    ) -> Result<Vec<u8>, DomainError> {
        if request.len() < 12 {
            return Err(DomainError::MalformedMessage("too short".to_string()));
        }
        Ok(request.to_vec())
    }
}

pub fn create_test_app() -> Router {
    let driver: Arc<dyn DnsQueryDriver> = Arc::new(StubDriver);
    let state = AppState {
        run_queries: Arc::new(RunQueriesUseCase::new(driver.clone())),
        test_server: Arc::new(TestServerUseCase::new(driver)),
        list_servers: Arc::new(ListServersUseCase::new()),
        handle_doh: Arc::new(HandleDohQueryUseCase::new(Arc::new(EchoForwarder))),
    };

    Router::new()
        .nest("/api", create_api_routes(state.clone()))
        .merge(create_doh_routes(state))
}
