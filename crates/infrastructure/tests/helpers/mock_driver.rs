#![allow(dead_code)]
use async_trait::async_trait;
use dnsprobe_application::ports::DnsQueryDriver;
use dnsprobe_domain::{QueryResult, RecordTypeSet, ServerSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Driver answering from a fixed table keyed by `ServerSpec::address()`.
/// Servers missing from the table fail with "unreachable".
#[derive(Clone, Default)]
pub struct ScriptedDriver {
    results: Arc<HashMap<String, QueryResult>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDriver {
    pub fn new(results: Vec<QueryResult>) -> Self {
        let results = results
            .into_iter()
            .map(|result| (result.server.clone(), result))
            .collect();
        Self {
            results: Arc::new(results),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsQueryDriver for ScriptedDriver {
    async fn query(
        &self,
        server: &ServerSpec,
        _domain: &str,
        _record_types: &RecordTypeSet,
        _proxy: Option<&str>,
    ) -> QueryResult {
        let address = server.address();
        self.calls.lock().unwrap().push(address.clone());
        self.results
            .get(&address)
            .cloned()
            .unwrap_or_else(|| QueryResult::failure(address, "unreachable"))
    }
}
