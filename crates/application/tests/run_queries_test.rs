use dnsprobe_application::use_cases::{ListServersUseCase, RunQueriesUseCase, TestServerUseCase};
use dnsprobe_domain::server_catalog::DEFAULT_QUERY_SERVER_COUNT;
use dnsprobe_domain::{QueryStatus, ServerSpec, SERVER_CATALOG};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{MockBehavior, MockDriver};

fn servers(list: &[&str]) -> Option<Vec<String>> {
    Some(list.iter().map(|s| s.to_string()).collect())
}

#[tokio::test]
async fn test_output_matches_input_order_and_length() {
    let driver = MockDriver::new()
        .on_delayed(
            "10.0.0.1:53",
            MockBehavior::Answers(vec!["[A] 1.2.3.4".into()]),
            Duration::from_millis(50),
        )
        .on("10.0.0.2:53", MockBehavior::Fail("timeout".into()))
        .on("10.0.0.3:53", MockBehavior::Answers(vec!["[A] 5.6.7.8".into()]));
    let use_case = RunQueriesUseCase::new(Arc::new(driver));

    let input = ["10.0.0.1", "udp://10.0.0.2", "10.0.0.3:53"];
    let results = use_case
        .execute("example.com", servers(&input), "A", None)
        .await;

    assert_eq!(results.len(), input.len());
    for (slot, server) in results.iter().zip(input) {
        assert_eq!(slot.server, server);
    }
    assert_eq!(results[0].result.answers, vec!["[A] 1.2.3.4"]);
    assert_eq!(results[1].result.status, QueryStatus::Error);
    assert_eq!(results[2].result.answers, vec!["[A] 5.6.7.8"]);
}

#[tokio::test]
async fn test_invalid_spec_fills_its_slot_with_error() {
    let use_case = RunQueriesUseCase::new(Arc::new(MockDriver::new()));

    let results = use_case
        .execute("example.com", servers(&["bogus://x", "8.8.8.8"]), "A", None)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].result.status, QueryStatus::Error);
    assert!(results[0].result.error.is_some());
    assert_eq!(results[1].result.status, QueryStatus::Success);
}

#[tokio::test]
async fn test_panicking_driver_does_not_fail_batch() {
    let driver = MockDriver::new().on("10.0.0.9:53", MockBehavior::Panic);
    let use_case = RunQueriesUseCase::new(Arc::new(driver));

    let results = use_case
        .execute("example.com", servers(&["10.0.0.9", "10.0.0.1"]), "A", None)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].result.status, QueryStatus::Error);
    assert!(results[0]
        .result
        .error
        .as_deref()
        .unwrap()
        .contains("query task failed"));
    assert_eq!(results[1].result.status, QueryStatus::Success);
}

#[tokio::test]
async fn test_default_servers_when_none_given() {
    let driver = MockDriver::new();
    let use_case = RunQueriesUseCase::new(Arc::new(driver.clone()));

    let results = use_case.execute("example.com", None, "A", None).await;
    assert_eq!(results.len(), DEFAULT_QUERY_SERVER_COUNT);

    for (slot, entry) in results.iter().zip(SERVER_CATALOG) {
        assert_eq!(slot.server, entry.spec());
    }
    assert_eq!(driver.calls().len(), DEFAULT_QUERY_SERVER_COUNT);

    let empty = use_case
        .execute("example.com", Some(vec![]), "A", None)
        .await;
    assert_eq!(empty.len(), DEFAULT_QUERY_SERVER_COUNT);
}

#[tokio::test(start_paused = true)]
async fn test_queries_run_concurrently() {
    let delay = Duration::from_millis(200);
    let driver = MockDriver::new()
        .on_delayed("10.0.0.1:53", MockBehavior::Answers(vec![]), delay)
        .on_delayed("10.0.0.2:53", MockBehavior::Answers(vec![]), delay)
        .on_delayed("10.0.0.3:53", MockBehavior::Answers(vec![]), delay);
    let use_case = RunQueriesUseCase::new(Arc::new(driver));

    let start = tokio::time::Instant::now();
    let results = use_case
        .execute(
            "example.com",
            servers(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]),
            "A",
            None,
        )
        .await;

    assert_eq!(results.len(), 3);
    assert!(start.elapsed() < delay * 2, "queries were serialized");
}

#[tokio::test]
async fn test_single_server_test() {
    let driver = MockDriver::new().on(
        "local",
        MockBehavior::Answers(vec!["[A] 127.0.0.1".into()]),
    );
    let use_case = TestServerUseCase::new(Arc::new(driver));

    let result = use_case
        .execute(&ServerSpec::Local, "localhost", "A", None)
        .await;
    assert_eq!(result.status, QueryStatus::Success);
    assert_eq!(result.answers, vec!["[A] 127.0.0.1"]);

    let bad = use_case
        .execute_raw("nope://", "localhost", "A", None)
        .await;
    assert_eq!(bad.status, QueryStatus::Error);
    assert_eq!(bad.server, "nope://");
}

#[test]
fn test_list_servers_returns_catalog() {
    let entries = ListServersUseCase::new().execute();
    assert_eq!(entries.len(), SERVER_CATALOG.len());
}
