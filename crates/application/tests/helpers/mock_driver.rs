#![allow(dead_code)]

use async_trait::async_trait;
use dnsprobe_application::ports::DnsQueryDriver;
use dnsprobe_domain::{QueryResult, RecordTypeSet, ServerSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub enum MockBehavior {
    Answers(Vec<String>),
    Fail(String),
    Panic,
}

#[derive(Clone)]
struct MockEntry {
    behavior: MockBehavior,
    delay: Duration,
}

/// Driver keyed by `ServerSpec::address()`; unknown servers answer with an
/// empty success.
#[derive(Clone, Default)]
pub struct MockDriver {
    entries: Arc<Mutex<HashMap<String, MockEntry>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, address: &str, behavior: MockBehavior) -> Self {
        self.on_delayed(address, behavior, Duration::ZERO)
    }

    pub fn on_delayed(self, address: &str, behavior: MockBehavior, delay: Duration) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(address.to_string(), MockEntry { behavior, delay });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsQueryDriver for MockDriver {
    async fn query(
        &self,
        server: &ServerSpec,
        _domain: &str,
        _record_types: &RecordTypeSet,
        _proxy: Option<&str>,
    ) -> QueryResult {
        let address = server.address();
        self.calls.lock().unwrap().push(address.clone());

        let entry = self.entries.lock().unwrap().get(&address).cloned();
        let Some(entry) = entry else {
            return QueryResult::success(address, 1.0, vec![]);
        };

        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }

        match entry.behavior {
            MockBehavior::Answers(answers) => QueryResult::success(address, 1.0, answers),
            MockBehavior::Fail(msg) => QueryResult::failure(address, msg),
            MockBehavior::Panic => panic!("mock driver panic for {}", address),
        }
    }
}
