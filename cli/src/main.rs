//! CLI entrypoint for panel-consensus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use swarm_application::{
    CompositeProgress, NoTranscriptLogger, PipelineOptions, ProgressSink, RunPipelineUseCase,
    TranscriptLogger,
};
use swarm_domain::{RunMode, config::has_errors};
use swarm_infrastructure::{
    ConfigLoader, FileConfig, JsonlEventSink, JsonlTranscriptLogger, RoutingGateway,
};
use swarm_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize logging based on verbosity level. The returned guard must live
/// until exit so buffered file output is flushed.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Could not create log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("config error: {}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if has_errors(&issues) {
        let errors = issues.iter().filter(|i| i.is_error()).count();
        bail!("Invalid configuration ({errors} error(s))");
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting panel-consensus");

    let config = load_config(&cli)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(query) = cli.query.as_deref() else {
        bail!("A query is required. Run with --help for usage.");
    };

    let mode: RunMode = cli.mode.map(RunMode::from).unwrap_or(config.pipeline.mode);
    let format = cli
        .output
        .or_else(|| config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Report);

    // === Dependency Injection ===
    let gateway = Arc::new(RoutingGateway::from_config(&config.providers));

    let transcript: Arc<dyn TranscriptLogger> = match &config.logging.transcript_file {
        Some(path) => match JsonlTranscriptLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoTranscriptLogger),
        },
        None => Arc::new(NoTranscriptLogger),
    };

    let use_case = RunPipelineUseCase::new(gateway)
        .with_params(config.pipeline.to_execution_params())
        .with_transcript(transcript);

    // Progress fan-out: terminal display and optional JSONL persistence
    let events_path = cli.events.as_ref().or(config.logging.events_file.as_ref());
    let event_sink = events_path.and_then(JsonlEventSink::new);
    let reporter = (!cli.quiet && config.output.show_progress).then(ProgressReporter::new);

    let mut progress = CompositeProgress::new(Vec::new());
    if let Some(reporter) = &reporter {
        progress.push(reporter as &dyn ProgressSink);
    }
    if let Some(sink) = &event_sink {
        progress.push(sink as &dyn ProgressSink);
    }

    let result = use_case
        .execute_with_progress(query, PipelineOptions::new(mode), &progress)
        .await
        .map_err(|e| e.redacted())?;

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format_full(&result),
        OutputFormat::Report => ConsoleFormatter::format_report(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output);

    Ok(())
}
