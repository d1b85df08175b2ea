use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};

use probe_core::{EndpointConfig, Task};
use probe_engine::{
    ChannelVerdictSink, EngineError, EngineEvent, ParsabilityClassifier, PersistError,
    ProbeResponse, Prober, SnapshotSink, TransportError, ValidationEngine,
};

/// Prober keyed off the URL: hosts containing "pass" return a parsable
/// page, everything else a stub too small to classify.
struct UrlKeyedProber;

#[async_trait::async_trait]
impl Prober for UrlKeyedProber {
    async fn probe(&self, url: &str, _use_proxy: bool) -> Result<ProbeResponse, TransportError> {
        let body = if url.contains("pass") {
            let mut body = "<a href=\"/r\">result</a>".repeat(10);
            body.push_str(&"x".repeat(1000));
            body
        } else {
            "empty".to_string()
        };
        Ok(ProbeResponse {
            status: 200,
            body,
            encoding: "UTF-8".to_string(),
        })
    }
}

#[derive(Default)]
struct CountingSink {
    writes: Mutex<usize>,
}

impl SnapshotSink for CountingSink {
    fn write(&self, category: &str, name: &str, _content: &str) -> Result<PathBuf, PersistError> {
        *self.writes.lock().unwrap() += 1;
        Ok(PathBuf::from(format!("{category}/{name}.html")))
    }
}

fn pool(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn tasks(count: usize) -> Vec<Task> {
    (0..count)
        .map(|i| {
            let host = if i % 2 == 0 { "pass" } else { "fail" };
            Task {
                category: "video".to_string(),
                config: EndpointConfig {
                    name: format!("endpoint{i}"),
                    url_template: format!("http://{host}{i}.test/search?q=%s"),
                    use_proxy: false,
                },
            }
        })
        .collect()
}

fn engine(worker_count: usize) -> ValidationEngine {
    ValidationEngine::with_parts(
        Arc::new(UrlKeyedProber),
        ParsabilityClassifier::default(),
        Arc::new(CountingSink::default()),
        pool(&["boy", "a"]),
        worker_count,
    )
    .expect("engine builds")
}

#[tokio::test]
async fn fifty_tasks_at_eight_workers_produce_fifty_distinct_verdicts() {
    let (tx, rx) = mpsc::channel();
    let sink = ChannelVerdictSink::new(tx);

    let report = engine(8).run(tasks(50), &sink).await;
    drop(sink);

    assert_eq!(report.summary.total_tasks, 50);
    assert_eq!(report.summary.completed_tasks, 50);
    assert_eq!(report.summary.parsable_count, 25);
    assert!(report.summary.all_completed());
    assert_eq!(report.verdicts.len(), 50);

    // No verdict dropped or duplicated, whatever the completion order.
    let names: BTreeSet<String> = report
        .verdicts
        .iter()
        .map(|v| v.config.name.clone())
        .collect();
    assert_eq!(names.len(), 50);

    let events: Vec<EngineEvent> = rx.iter().collect();
    let ready = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::VerdictReady(_)))
        .count();
    assert_eq!(ready, 50);
    match events.last() {
        Some(EngineEvent::RunCompleted(summary)) => {
            assert_eq!(summary, &report.summary);
        }
        other => panic!("expected RunCompleted last, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_endpoints_retry_the_whole_pool() {
    let (tx, rx) = mpsc::channel();
    let sink = ChannelVerdictSink::new(tx);

    let report = engine(4).run(tasks(2), &sink).await;
    drop(sink);
    drop(rx);

    let failed = report
        .verdicts
        .iter()
        .find(|v| !v.parsable)
        .expect("one endpoint fails");
    assert_eq!(failed.status_message, "parse failed (retried 2 times)");
}

#[tokio::test]
async fn a_single_worker_still_completes_every_task() {
    let (tx, rx) = mpsc::channel();
    let sink = ChannelVerdictSink::new(tx);

    let report = engine(1).run(tasks(5), &sink).await;
    drop(sink);
    drop(rx);

    assert_eq!(report.summary.completed_tasks, 5);
}

#[test]
fn zero_workers_is_a_configuration_error() {
    let result = ValidationEngine::with_parts(
        Arc::new(UrlKeyedProber),
        ParsabilityClassifier::default(),
        Arc::new(CountingSink::default()),
        pool(&["boy"]),
        0,
    );
    assert!(matches!(result, Err(EngineError::NoWorkers)));
}

#[test]
fn an_empty_keyword_pool_is_a_configuration_error() {
    let result = ValidationEngine::with_parts(
        Arc::new(UrlKeyedProber),
        ParsabilityClassifier::default(),
        Arc::new(CountingSink::default()),
        Vec::new(),
        8,
    );
    assert!(matches!(result, Err(EngineError::EmptyKeywordPool)));
}
