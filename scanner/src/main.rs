use anyhow::Context;
use clap::Parser;
use client::{Fr24Client, SnapshotSource};
use log::info;
use report::{render_json, render_text};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::ScanConfig;
use workflow::runner::{Runner, ScanOutcome};

mod client;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Scan live air traffic for likely military aircraft")]
struct Args {
    /// Load scan settings from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Replay a recorded JSON snapshot instead of querying the live API
    #[arg(long)]
    offline: Option<PathBuf>,
    /// API token for the flight-data service
    #[arg(long, env = "FR24_API_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Records resolved at once (1 = sequential)
    #[arg(long)]
    concurrency: Option<usize>,
    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Omit the per-record list of excluded flights
    #[arg(long, default_value_t = false)]
    hide_dropped: bool,
    /// Append the rendered report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.workflow {
        ScanConfig::load(path)?
    } else {
        ScanConfig::from_args(args.token.clone(), args.concurrency.unwrap_or(1))
    };
    if let Some(token) = args.token.clone() {
        config.api_token = Some(token);
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating async runtime")?;
    let outcome = runtime.block_on(run_scan(&args, &config))?;

    info!("scan metrics: {:?}", outcome.metrics);

    let rendered = if args.json {
        render_json(&outcome.report)?
    } else {
        render_text(&outcome.report, !args.hide_dropped)
    };
    println!("{}", rendered);

    if let Some(report_path) = args.report {
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(rendered.as_bytes())
            .with_context(|| format!("writing report {}", report_path.display()))?;
    }

    Ok(())
}

async fn run_scan(args: &Args, config: &ScanConfig) -> anyhow::Result<ScanOutcome> {
    let runner = Runner::new(config.clone());

    if let Some(path) = &args.offline {
        let snapshot = Arc::new(SnapshotSource::load(path)?);
        let regions = snapshot.bounds();
        info!("replaying snapshot {} ({} regions)", path.display(), regions.len());
        return runner
            .execute(snapshot.as_ref(), Arc::clone(&snapshot), &regions)
            .await;
    }

    let token = config
        .api_token
        .as_deref()
        .context("no API token: pass --token or set FR24_API_TOKEN")?;
    let client = Arc::new(Fr24Client::new(
        &config.api_base_url,
        token,
        config.timeout(),
    )?);
    info!(
        "scanning {} regions via {}",
        config.regions.len(),
        config.api_base_url
    );
    runner
        .execute(client.as_ref(), Arc::clone(&client), &config.regions)
        .await
}
