//! Console rendering for the verdict stream and run summary.
//!
//! The engine emits data only; everything user-facing is formatted here
//! and printed from a single consumer thread, so worker output never
//! interleaves.

use std::path::Path;
use std::sync::mpsc::Receiver;

use probe_core::{EndpointVerdict, RunSummary};
use probe_engine::EngineEvent;

pub fn print_run_header(
    catalog: &Path,
    categories: &[String],
    task_count: usize,
    workers: usize,
    keyword_count: usize,
) {
    println!("loaded catalog: {}", catalog.display());
    if categories.is_empty() {
        println!("checking all categories");
    } else {
        println!("checking categories: {}", categories.join(", "));
    }
    println!("{task_count} endpoints, {workers} workers, up to {keyword_count} keywords each");
    println!();
}

/// One console line per endpoint outcome.
pub fn verdict_line(verdict: &EndpointVerdict) -> String {
    let icon = if verdict.parsable { "√" } else { "×" };
    format!(
        "[{icon}] {:<12} | {}",
        verdict.config.name, verdict.status_message
    )
}

/// Drain engine events until the channel closes.
pub fn consume_events(rx: Receiver<EngineEvent>) {
    for event in rx {
        match event {
            EngineEvent::VerdictReady(verdict) => println!("{}", verdict_line(&verdict)),
            // The summary block is printed by the caller once the printer
            // thread has drained.
            EngineEvent::RunCompleted(_) => {}
        }
    }
}

pub fn print_summary(summary: &RunSummary, snapshot_dir: &Path) {
    println!();
    println!("run finished in {:.2}s", summary.elapsed.as_secs_f64());
    println!("endpoints checked: {}", summary.completed_tasks);
    println!("parsable: {}", summary.parsable_count);
    println!("snapshots saved under {}", snapshot_dir.display());
}
