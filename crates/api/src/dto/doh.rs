use serde::Deserialize;

/// Query string of `GET /dns-query`; `POST` only reads `upstream` and `proxy`.
#[derive(Deserialize, Debug, Default)]
pub struct DohParams {
    /// base64url-encoded wire query, padding optional.
    pub dns: Option<String>,
    pub upstream: Option<String>,
    pub proxy: Option<String>,
}
