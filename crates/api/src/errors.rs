use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dnsprobe_domain::DomainError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    BadRequest(String),
    UnsupportedMediaType(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) if err.is_protocol_error() => StatusCode::BAD_REQUEST,
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Domain(err) => err.to_string(),
            ApiError::BadRequest(msg) | ApiError::UnsupportedMediaType(msg) => msg,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
