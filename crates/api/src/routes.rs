use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// JSON API, mounted under `/api`.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/servers", get(handlers::list_servers))
        .route("/query", post(handlers::run_query))
        .route("/test", post(handlers::test_server))
        .with_state(state)
}

/// RFC 8484 endpoint, mounted at the root.
pub fn create_doh_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/dns-query",
            get(handlers::dns_query_get).post(handlers::dns_query_post),
        )
        .with_state(state)
}
