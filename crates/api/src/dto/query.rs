use dnsprobe_domain::{QueryStatus, ServerQueryResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Deserialize, Debug)]
pub struct QueryRequest {
    pub domain: String,
    #[serde(default)]
    pub servers: Option<Vec<String>>,
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl QueryRequest {
    pub fn record_type(&self) -> &str {
        self.record_type.as_deref().unwrap_or("A")
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every slot with its full result.
    #[default]
    Json,
    /// Server, status and answers only.
    Simple,
    /// One plain-text line per server.
    Text,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimpleResult {
    pub server: String,
    pub status: QueryStatus,
    pub answers: Vec<String>,
}

impl From<&ServerQueryResult> for SimpleResult {
    fn from(slot: &ServerQueryResult) -> Self {
        Self {
            server: slot.server.clone(),
            status: slot.result.status,
            answers: slot.result.answers.clone(),
        }
    }
}

/// `server  status  latency  answers-or-error`, one line per slot.
pub fn render_text(results: &[ServerQueryResult]) -> String {
    let mut out = String::new();
    for slot in results {
        let result = &slot.result;
        let detail = match &result.error {
            Some(error) => error.clone(),
            None if result.answers.is_empty() => "(no answers)".to_string(),
            None => result.answers.join(", "),
        };
        let status = if result.is_success() { "OK" } else { "ERROR" };
        let _ = writeln!(
            out,
            "{}\t{}\t{:.2} ms\t{}",
            slot.server, status, result.latency_ms, detail
        );
    }
    out
}
