//! The `darkroom ingest` command: batch ingestion with bounded concurrency.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, ValueEnum};
use darkroom_core::config::ProcessingConfig;
use darkroom_core::{Config, Ingestor, RawUpload, StoredAssetRef};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// Arguments for the `ingest` command.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Files or directories to ingest (directories are walked recursively)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write asset references to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "jsonl")]
    pub format: OutputFormat,

    /// Override the configured storage root
    #[arg(long)]
    pub storage_root: Option<PathBuf>,
}

/// Output format for asset references.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// One JSON object per line
    Jsonl,
    /// A single pretty-printed JSON array
    Json,
}

/// One record of command output: where the upload came from and where the
/// asset now lives.
#[derive(Debug, Clone, Serialize)]
struct IngestRecord {
    source: PathBuf,
    #[serde(flatten)]
    asset: StoredAssetRef,
}

/// Execute the ingest command.
pub async fn execute(mut args: IngestArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(root) = args.storage_root.take() {
        config.storage.root = root;
    }

    let files = discover(&args.paths, &config.processing);
    anyhow::ensure!(!files.is_empty(), "no image files found under the given paths");
    tracing::info!("Ingesting {} file(s)", files.len());

    let ingestor = Arc::new(Ingestor::new(&config)?);
    let semaphore = Arc::new(Semaphore::new(config.processing.parallel_workers));
    let progress = create_progress_bar(files.len() as u64);
    let stream_stdout = matches!(args.format, OutputFormat::Jsonl) && args.output.is_none();

    let start = Instant::now();
    let mut tasks = JoinSet::new();
    for path in files {
        tasks.spawn(ingest_one(
            Arc::clone(&ingestor),
            Arc::clone(&semaphore),
            path,
        ));
    }

    let mut records = Vec::new();
    let mut failed: u64 = 0;
    while let Some(joined) = tasks.join_next().await {
        let (path, result) = joined?;
        match result {
            Ok(asset) => {
                let record = IngestRecord {
                    source: path,
                    asset,
                };
                if stream_stdout {
                    println!("{}", serde_json::to_string(&record)?);
                }
                records.push(record);
            }
            Err(e) => {
                failed += 1;
                tracing::error!("Failed: {:?} - {:#}", path, e);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    // Deterministic ordering for collected output
    records.sort_by(|a, b| a.source.cmp(&b.source));

    match (&args.output, args.format) {
        (Some(path), OutputFormat::Json) => {
            std::fs::write(path, serde_json::to_string_pretty(&records)?)?;
            tracing::info!("Output written to {:?}", path);
        }
        (Some(path), OutputFormat::Jsonl) => {
            let mut out = String::new();
            for record in &records {
                out.push_str(&serde_json::to_string(record)?);
                out.push('\n');
            }
            std::fs::write(path, out)?;
            tracing::info!("Output written to {:?}", path);
        }
        (None, OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        // JSONL to stdout was streamed in the loop
        (None, OutputFormat::Jsonl) => {}
    }

    print_summary(records.len() as u64, failed, start.elapsed());

    if failed > 0 {
        anyhow::bail!("{failed} file(s) failed to ingest");
    }
    Ok(())
}

/// Ingest a single file, returning its path alongside the outcome so
/// failures can be attributed.
async fn ingest_one(
    ingestor: Arc<Ingestor>,
    semaphore: Arc<Semaphore>,
    path: PathBuf,
) -> (PathBuf, anyhow::Result<StoredAssetRef>) {
    let result = async {
        let _permit = semaphore.acquire_owned().await?;
        let bytes = tokio::fs::read(&path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from);
        let asset = ingestor.ingest(RawUpload::new(bytes, name)).await?;
        anyhow::Ok(asset)
    }
    .await;
    (path, result)
}

/// Expand files and directories into a sorted list of candidate image files.
///
/// Extension filtering here is a convenience for directory walks, not a
/// security boundary — the pipeline sniffs every file's content anyway.
fn discover(paths: &[PathBuf], config: &ProcessingConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            // Explicitly named files are always attempted
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().is_file() && is_supported(entry.path(), config) {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

/// Check if a file has a supported extension.
fn is_supported(path: &Path, config: &ProcessingConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            config
                .supported_formats
                .iter()
                .any(|fmt| fmt.to_lowercase() == ext_lower)
        })
        .unwrap_or(false)
}

/// Create a progress bar for batch ingestion.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("ingesting...");
    pb
}

/// Print a formatted summary after batch ingestion.
fn print_summary(succeeded: u64, failed: u64, elapsed: std::time::Duration) {
    let total = succeeded + failed;
    let rate = if elapsed.as_secs_f64() > 0.0 {
        succeeded as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Ingested:     {:>8}", succeeded);
    if failed > 0 {
        eprintln!("    Failed:       {:>8}", failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", total);
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
