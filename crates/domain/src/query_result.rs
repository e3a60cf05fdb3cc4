use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    Error,
}

/// Outcome of resolving one record-type set against one server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub status: QueryStatus,
    pub latency_ms: f64,
    pub answers: Vec<String>,
    pub server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    pub fn success(server: impl Into<String>, latency_ms: f64, answers: Vec<String>) -> Self {
        Self {
            status: QueryStatus::Success,
            latency_ms: round_latency(latency_ms),
            answers,
            server: server.into(),
            error: None,
        }
    }

    pub fn failure(server: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: QueryStatus::Error,
            latency_ms: 0.0,
            answers: Vec::new(),
            server: server.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    /// Successful and carrying at least one answer.
    pub fn has_answers(&self) -> bool {
        self.is_success() && !self.answers.is_empty()
    }
}

/// One slot of a multi-server run: the server string as given plus its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerQueryResult {
    pub server: String,
    pub result: QueryResult,
}

fn round_latency(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_rounded_to_two_decimals() {
        let result = QueryResult::success("8.8.8.8:53", 12.34567, vec![]);
        assert_eq!(result.latency_ms, 12.35);
    }

    #[test]
    fn test_failure_has_no_answers() {
        let result = QueryResult::failure("local", "boom");
        assert!(!result.is_success());
        assert!(!result.has_answers());
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_empty_success_has_no_answers() {
        let result = QueryResult::success("local", 1.0, vec![]);
        assert!(result.is_success());
        assert!(!result.has_answers());
    }
}
