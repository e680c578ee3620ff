use crate::config::AppConfig;
use crate::records::{read_records, write_records};
use anyhow::{Context, Result};
use clap::Parser;
use flowqa::{create_provider, ProcessorConfig, ProcessorRunner, QaProcessor, Transfers};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// JSON-lines file with one record per line
    #[arg(long, required = true)]
    pub input: PathBuf,
    /// Where to write records routed to success (defaults to stdout)
    #[arg(long)]
    pub success: Option<PathBuf>,
    /// Where to write records routed to failure
    #[arg(long)]
    pub failure: Option<PathBuf>,
    /// Maximum number of records processed at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Runs the processor over a record file and writes the transfers.
pub async fn handle_process(config: AppConfig, args: &ProcessArgs) -> Result<Transfers> {
    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input file '{}'", args.input.display()))?;
    let records = read_records(BufReader::new(input))?;
    info!("Read {} records from '{}'", records.len(), args.input.display());

    let processor_config = ProcessorConfig::try_from(config.processor)?;
    let provider = create_provider(&config.provider)?;
    let processor = QaProcessor::on_scheduled(processor_config, provider).await?;

    let transfers = ProcessorRunner::new(processor)
        .concurrency(args.concurrency.unwrap_or(config.concurrency))
        .run(records)
        .await;

    match &args.success {
        Some(path) => write_records(BufWriter::new(create(path)?), &transfers.success)?,
        None => write_records(io::stdout().lock(), &transfers.success)?,
    }
    if let Some(path) = &args.failure {
        write_records(BufWriter::new(create(path)?), &transfers.failure)?;
    }

    eprintln!(
        "Processed {} records: {} success, {} failure",
        transfers.len(),
        transfers.success.len(),
        transfers.failure.len()
    );
    Ok(transfers)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))
}
