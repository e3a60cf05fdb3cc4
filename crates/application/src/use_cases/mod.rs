pub mod handle_doh_query;
pub mod list_servers;
pub mod run_queries;
pub mod test_server;

pub use handle_doh_query::HandleDohQueryUseCase;
pub use list_servers::ListServersUseCase;
pub use run_queries::RunQueriesUseCase;
pub use test_server::TestServerUseCase;
