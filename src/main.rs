// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use serde::Serialize;
use texture_pipeline::config::{build_default_pipeline, load_and_validate_config, Settings};
use texture_pipeline::engine::{Payload, RunReport, Severity};
use texture_pipeline::observability::TracingObserver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code when the source had nothing to run
const NO_DATA_EXIT_CODE: u8 = 2;

struct CliArgs {
    config: Option<PathBuf>,
    json: bool,
    items: Vec<PathBuf>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--config <settings.yaml|toml|json>] [--json] [image ...]\n\
         Example: {program} samples/a.png samples/b.png\n\
         Example: {program} --config configs/texture-app.yaml --json"
    )
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs {
        config: None,
        json: false,
        items: Vec::new(),
    };
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = rest.next().context("--config needs a file argument")?;
                cli.config = Some(PathBuf::from(path));
            }
            "--json" => cli.json = true,
            flag if flag.starts_with('-') => bail!("Unknown option '{}'", flag),
            item => cli.items.push(PathBuf::from(item)),
        }
    }
    Ok(cli)
}

fn init_tracing(settings: &Settings) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[derive(Serialize)]
struct SinkSummary {
    name: String,
    frames: usize,
    payloads: Vec<String>,
}

#[derive(Serialize)]
struct DiagnosticSummary {
    severity: Severity,
    node: String,
    message: String,
}

#[derive(Serialize)]
struct RunSummary {
    seeded: usize,
    executions: usize,
    elapsed_ms: u128,
    sinks: Vec<SinkSummary>,
    diagnostics: Vec<DiagnosticSummary>,
}

impl RunSummary {
    fn new(report: &RunReport, sinks: Vec<SinkSummary>, elapsed_ms: u128) -> Self {
        Self {
            seeded: report.seeded(),
            executions: report.executions(),
            elapsed_ms,
            sinks,
            diagnostics: report
                .diagnostics()
                .iter()
                .map(|diagnostic| DiagnosticSummary {
                    severity: diagnostic.severity(),
                    node: diagnostic.node_name().to_string(),
                    message: diagnostic.to_string(),
                })
                .collect(),
        }
    }

    fn print_text(&self) {
        println!("🖼️  Texture Pipeline Run");
        println!("═══════════════════════");
        println!("Items seeded: {}", self.seeded);
        println!("Filter executions: {}", self.executions);
        println!("⏱️  Elapsed: {} ms", self.elapsed_ms);

        println!("\n📊 Collected:");
        for sink in &self.sinks {
            println!("  {} ({} frames)", sink.name, sink.frames);
            for payload in &sink.payloads {
                println!("     • {}", payload);
            }
        }

        if self.diagnostics.is_empty() {
            println!("\n✅ No diagnostics");
        } else {
            println!("\n⚠️  Diagnostics:");
            for diagnostic in &self.diagnostics {
                println!("  [{:?}] {}", diagnostic.severity, diagnostic.message);
            }
        }
    }
}

fn run(cli: CliArgs) -> anyhow::Result<ExitCode> {
    let settings = match &cli.config {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    init_tracing(&settings);

    let mut built = build_default_pipeline(&settings, None)?;
    built.pipeline.observe(Arc::new(TracingObserver::new()));

    let items = if cli.items.is_empty() {
        None
    } else {
        Some(cli.items.into_iter().map(Payload::from).collect())
    };

    let started = Instant::now();
    let report = built.pipeline.exec(items);
    let elapsed_ms = started.elapsed().as_millis();

    let sinks = built
        .sinks
        .iter()
        .map(|(name, frames)| {
            let snapshot = frames.snapshot();
            SinkSummary {
                name: name.clone(),
                frames: snapshot.len(),
                payloads: snapshot.iter().map(|frame| frame.payload().to_string()).collect(),
            }
        })
        .collect();
    let summary = RunSummary::new(&report, sinks, elapsed_ms);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print_text();
    }

    if report.had_no_data() {
        return Ok(ExitCode::from(NO_DATA_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("texture-pipeline");

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", usage(program));
        return ExitCode::SUCCESS;
    }

    let result = parse_args(&args).and_then(run);
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("{}", usage(program));
            ExitCode::FAILURE
        }
    }
}
