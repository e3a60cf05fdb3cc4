//! RFC 8484 endpoints. Both methods answer `200 application/dns-message`
//! whenever a DNS-level response can be produced, SERVFAIL included.

use crate::{dto::DohParams, errors::ApiError, state::AppState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dnsprobe_domain::DomainError;
use tracing::debug;

pub const DNS_CONTENT_TYPE: &str = "application/dns-message";

pub async fn dns_query_get(
    State(state): State<AppState>,
    Query(params): Query<DohParams>,
) -> Result<Response, ApiError> {
    let encoded = params
        .dns
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("missing 'dns' query parameter".to_string()))?;
    let request = decode_dns_param(encoded)?;

    debug!(len = request.len(), upstream = ?params.upstream, "DoH GET");
    forward(&state, &request, &params).await
}

pub async fn dns_query_post(
    State(state): State<AppState>,
    Query(params): Query<DohParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    if !media_type.eq_ignore_ascii_case(DNS_CONTENT_TYPE) {
        return Err(ApiError::UnsupportedMediaType(format!(
            "expected Content-Type {}, got '{}'",
            DNS_CONTENT_TYPE, content_type
        )));
    }

    debug!(len = body.len(), upstream = ?params.upstream, "DoH POST");
    forward(&state, &body, &params).await
}

async fn forward(
    state: &AppState,
    request: &[u8],
    params: &DohParams,
) -> Result<Response, ApiError> {
    let response = state
        .handle_doh
        .execute(request, params.upstream.as_deref(), params.proxy.as_deref())
        .await?;

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(DNS_CONTENT_TYPE))],
        response,
    )
        .into_response())
}

/// Decodes the `dns` parameter. Clients may or may not send `=` padding, so
/// any padding is dropped and the unpadded alphabet is used.
fn decode_dns_param(encoded: &str) -> Result<Vec<u8>, DomainError> {
    URL_SAFE_NO_PAD
        .decode(encoded.trim().trim_end_matches('='))
        .map_err(|e| DomainError::InvalidBase64(e.to_string()))
}
