mod logging;
mod report;

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use probe_core::default_keyword_pool;
use probe_engine::{
    build_tasks, download_icons, load_catalog, ChannelVerdictSink, EngineConfig, ProbeSettings,
    ValidationEngine, DEFAULT_WORKER_COUNT,
};
use probe_logging::probe_info;

#[derive(Parser)]
#[command(name = "searchprobe")]
#[command(about = "Checks that catalogued search endpoints return usable result pages")]
#[command(version)]
struct Cli {
    /// Path to the endpoint catalog.
    #[arg(long, global = true, default_value = "engines/engines.json")]
    catalog: PathBuf,

    /// Where log output goes.
    #[arg(long, global = true, value_enum, default_value = "file")]
    log: logging::LogDestination,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe every catalogued endpoint and report parsability.
    Check(CheckArgs),
    /// Fetch a favicon for every catalogued endpoint.
    Icons(IconArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Restrict the run to these catalog categories (repeatable).
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Concurrent endpoint probes.
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// Seconds before a single request attempt is abandoned.
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// Proxy used by endpoints flagged "proxy" in the catalog.
    #[arg(long)]
    proxy: Option<String>,

    /// Override the built-in keyword pool (repeatable, tried in order).
    #[arg(long = "keyword")]
    keywords: Vec<String>,

    /// Bodies shorter than this many characters never classify as parsable.
    #[arg(long, default_value_t = 500)]
    min_content_length: usize,

    /// Anchor count a page must exceed to classify as parsable.
    #[arg(long, default_value_t = 5)]
    link_threshold: usize,

    /// Directory where response snapshots are written.
    #[arg(long, default_value = "engines/page")]
    snapshot_dir: PathBuf,
}

#[derive(Args)]
struct IconArgs {
    /// Directory where favicons are written.
    #[arg(long, default_value = "assets/icons")]
    icons_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    match cli.command {
        Command::Check(args) => run_check(&cli.catalog, args),
        Command::Icons(args) => run_icons(&cli.catalog, args),
    }
}

fn run_check(catalog_path: &Path, args: CheckArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path).context("loading endpoint catalog")?;
    let tasks = build_tasks(&catalog, &args.categories)?;
    probe_info!(
        "starting validation run: {} tasks, {} workers",
        tasks.len(),
        args.workers
    );

    let keywords = if args.keywords.is_empty() {
        default_keyword_pool()
    } else {
        args.keywords.clone()
    };
    report::print_run_header(
        catalog_path,
        &args.categories,
        tasks.len(),
        args.workers,
        keywords.len(),
    );

    let engine = ValidationEngine::new(EngineConfig {
        worker_count: args.workers,
        keywords,
        settings: ProbeSettings {
            request_timeout: Duration::from_secs(args.timeout_secs),
            proxy_address: args.proxy.clone(),
            ..ProbeSettings::default()
        },
        min_content_chars: args.min_content_length,
        link_threshold: args.link_threshold,
        snapshot_root: args.snapshot_dir.clone(),
    })?;

    // Verdicts stream to a single printer thread; workers never write to
    // the console directly.
    let (tx, rx) = mpsc::channel();
    let printer = thread::spawn(move || report::consume_events(rx));

    let runtime = tokio::runtime::Runtime::new().context("building tokio runtime")?;
    let outcome = {
        let sink = ChannelVerdictSink::new(tx);
        runtime.block_on(engine.run(tasks, &sink))
    };

    printer
        .join()
        .map_err(|_| anyhow::anyhow!("printer thread panicked"))?;
    report::print_summary(&outcome.summary, &args.snapshot_dir);
    Ok(())
}

fn run_icons(catalog_path: &Path, args: IconArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path).context("loading endpoint catalog")?;

    let runtime = tokio::runtime::Runtime::new().context("building tokio runtime")?;
    let outcome = runtime.block_on(download_icons(&catalog, &args.icons_dir))?;

    println!(
        "icons written: {}/{} (saved under {})",
        outcome.written,
        outcome.attempted,
        args.icons_dir.display()
    );
    Ok(())
}
