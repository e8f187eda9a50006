use super::commands::{Cli, Command};
use crate::client::{DeliveryReport, TelemetryClient};
use crate::config::ConfigLoader;
use crate::logging::setup_logging;
use crate::types::LogLine;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn process_command() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(cli.config.as_deref())?;
    setup_logging(&config.log_level)?;
    debug!("Loaded config: {}", config.to_safe_json());

    let client = TelemetryClient::from_config(&config)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let report = runtime.block_on(run(&client, cli.command))?;

    if report.outcome.successful < report.outcome.batches {
        anyhow::bail!(
            "{} of {} batches were not accepted",
            report.outcome.batches - report.outcome.successful,
            report.outcome.batches
        );
    }
    Ok(())
}

async fn run(client: &TelemetryClient, command: Command) -> Result<DeliveryReport> {
    match command {
        Command::Telemetry { arn, files } => {
            let records = read_records(&files)?;
            Ok(client.send_telemetry(&arn, &records).await?)
        }
        Command::Logs { request_id, file } => {
            let lines = read_log_lines(&file, &request_id)?;
            Ok(client.send_function_logs(&lines).await?)
        }
    }
}

fn read_records(files: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    files
        .iter()
        .map(|path| std::fs::read(path).with_context(|| format!("failed to read {:?}", path)))
        .collect()
}

fn read_log_lines(path: &Path, request_id: &str) -> Result<Vec<LogLine>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    let now = Utc::now();
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| LogLine::new(now, request_id, line))
        .collect())
}
