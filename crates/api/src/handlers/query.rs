use crate::{
    dto::{render_text, OutputFormat, QueryRequest, SimpleResult},
    errors::ApiError,
    state::AppState,
};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

pub async fn run_query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Response, ApiError> {
    if req.domain.trim().is_empty() {
        return Err(ApiError::BadRequest("domain is required".to_string()));
    }

    info!(
        domain = %req.domain,
        record_type = %req.record_type(),
        servers = req.servers.as_ref().map_or(0, Vec::len),
        format = ?req.format,
        "Multi-server query requested"
    );

    let results = state
        .run_queries
        .execute(
            &req.domain,
            req.servers.clone(),
            req.record_type(),
            req.proxy.as_deref(),
        )
        .await;

    let response = match req.format {
        OutputFormat::Json => Json(results).into_response(),
        OutputFormat::Simple => {
            let simple: Vec<SimpleResult> = results.iter().map(SimpleResult::from).collect();
            Json(simple).into_response()
        }
        OutputFormat::Text => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_text(&results),
        )
            .into_response(),
    };

    Ok(response)
}
