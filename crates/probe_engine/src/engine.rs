use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use futures_util::StreamExt;

use probe_core::{default_keyword_pool, EndpointVerdict, RunSummary, Task};
use probe_logging::probe_info;

use crate::classify::ParsabilityClassifier;
use crate::fetch::{ClientError, ProbeSettings, Prober, ReqwestProber};
use crate::probe::probe_endpoint;
use crate::snapshot::{SnapshotSink, SnapshotStore};

pub const DEFAULT_WORKER_COUNT: usize = 8;

/// Everything the engine needs for one validation run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub worker_count: usize,
    pub keywords: Vec<String>,
    pub settings: ProbeSettings,
    pub min_content_chars: usize,
    pub link_threshold: usize,
    pub snapshot_root: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            keywords: default_keyword_pool(),
            settings: ProbeSettings::default(),
            min_content_chars: ParsabilityClassifier::DEFAULT_MIN_CONTENT_CHARS,
            link_threshold: ParsabilityClassifier::DEFAULT_LINK_THRESHOLD,
            snapshot_root: PathBuf::from("engines/page"),
        }
    }
}

/// Construction-time validation failures; fatal before any task runs.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("keyword pool must not be empty")]
    EmptyKeywordPool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A task finished; emitted in completion order.
    VerdictReady(EndpointVerdict),
    /// All tasks finished.
    RunCompleted(RunSummary),
}

/// Where the engine reports verdicts as they complete. Presentation is the
/// consumer's concern; the engine only emits data.
pub trait VerdictSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelVerdictSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelVerdictSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl VerdictSink for ChannelVerdictSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Final result of a run: aggregate counts plus every verdict, in
/// completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summary: RunSummary,
    pub verdicts: Vec<EndpointVerdict>,
}

/// Concurrent endpoint-validation engine: a bounded pool of workers draws
/// from the task list, each running one endpoint's full retry loop.
pub struct ValidationEngine {
    prober: Arc<dyn Prober>,
    classifier: ParsabilityClassifier,
    snapshots: Arc<dyn SnapshotSink>,
    keywords: Arc<Vec<String>>,
    worker_count: usize,
}

impl ValidationEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let prober = Arc::new(ReqwestProber::new(&config.settings)?);
        let snapshots = Arc::new(SnapshotStore::new(config.snapshot_root));
        Self::with_parts(
            prober,
            ParsabilityClassifier::new(config.min_content_chars, config.link_threshold),
            snapshots,
            config.keywords,
            config.worker_count,
        )
    }

    /// Assembly seam: tests inject a scripted prober or a recording sink.
    pub fn with_parts(
        prober: Arc<dyn Prober>,
        classifier: ParsabilityClassifier,
        snapshots: Arc<dyn SnapshotSink>,
        keywords: Vec<String>,
        worker_count: usize,
    ) -> Result<Self, EngineError> {
        if worker_count == 0 {
            return Err(EngineError::NoWorkers);
        }
        if keywords.is_empty() {
            return Err(EngineError::EmptyKeywordPool);
        }
        Ok(Self {
            prober,
            classifier,
            snapshots,
            keywords: Arc::new(keywords),
            worker_count,
        })
    }

    /// Run every task to completion with at most `worker_count` probes in
    /// flight. A task occupies its slot for its whole retry loop. Verdicts
    /// are emitted and folded into the summary as they complete; no task
    /// failure stops the run.
    pub async fn run(&self, tasks: Vec<Task>, sink: &dyn VerdictSink) -> RunReport {
        let started = Instant::now();
        let mut summary = RunSummary::new(tasks.len());
        let mut verdicts = Vec::with_capacity(tasks.len());

        let mut completions = futures_util::stream::iter(tasks)
            .map(|task| {
                let prober = Arc::clone(&self.prober);
                let classifier = self.classifier.clone();
                let snapshots = Arc::clone(&self.snapshots);
                let keywords = Arc::clone(&self.keywords);
                async move {
                    probe_endpoint(
                        prober.as_ref(),
                        &classifier,
                        snapshots.as_ref(),
                        &keywords,
                        &task,
                    )
                    .await
                }
            })
            .buffer_unordered(self.worker_count);

        while let Some(verdict) = completions.next().await {
            summary.record(verdict.parsable);
            sink.emit(EngineEvent::VerdictReady(verdict.clone()));
            verdicts.push(verdict);
        }

        summary.finish(started.elapsed());
        probe_info!(
            "run complete: {}/{} parsable in {:?}",
            summary.parsable_count,
            summary.completed_tasks,
            summary.elapsed
        );
        sink.emit(EngineEvent::RunCompleted(summary.clone()));

        RunReport { summary, verdicts }
    }
}
