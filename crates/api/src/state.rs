use dnsprobe_application::use_cases::{
    HandleDohQueryUseCase, ListServersUseCase, RunQueriesUseCase, TestServerUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub run_queries: Arc<RunQueriesUseCase>,
    pub test_server: Arc<TestServerUseCase>,
    pub list_servers: Arc<ListServersUseCase>,
    pub handle_doh: Arc<HandleDohQueryUseCase>,
}
