//! Batch command - analyze every document matching a glob pattern.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use kasbon_core::{ExtractedRecord, ReceiptAnalyzer};

use super::analyze::header_row;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input text files
    #[arg(required = true)]
    pattern: String,

    /// Write one JSON file per input into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write a summary CSV with one row per document
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error instead of aborting
    #[arg(long)]
    continue_on_error: bool,

    /// Skip the model-assisted stage even when credentials are configured
    #[arg(long)]
    patterns_only: bool,
}

/// Result of analyzing a single file.
struct BatchResult {
    path: PathBuf,
    record: Option<ExtractedRecord>,
    error: Option<String>,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let files: Vec<PathBuf> = glob(&args.pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.pattern);
    }

    println!(
        "{} Found {} files to analyze",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let analyzer = if args.patterns_only {
        ReceiptAnalyzer::new()
    } else {
        ReceiptAnalyzer::from_env()
    };

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let result = analyze_file(&path, &analyzer, args.output_dir.as_deref());
        match result {
            Ok(record) => results.push(BatchResult {
                path,
                record: Some(record),
                error: None,
            }),
            Err(e) => {
                let message = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to analyze {}: {}", path.display(), message);
                    results.push(BatchResult {
                        path,
                        record: None,
                        error: Some(message),
                    });
                } else {
                    error!("Failed to analyze {}: {}", path.display(), message);
                    anyhow::bail!("Batch aborted: {}", message);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    if let Some(ref summary_path) = args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let analyzed = results.iter().filter(|r| r.record.is_some()).count();
    let failed = results.len() - analyzed;
    println!(
        "{} Analyzed {} documents ({} failed) in {}ms",
        style("✓").green(),
        analyzed,
        failed,
        start.elapsed().as_millis()
    );

    Ok(())
}

fn analyze_file(
    path: &PathBuf,
    analyzer: &ReceiptAnalyzer,
    output_dir: Option<&std::path::Path>,
) -> anyhow::Result<ExtractedRecord> {
    let text = fs::read_to_string(path)?;
    let record = analyzer.analyze(&text);

    if let Some(output_dir) = output_dir {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let output_path = output_dir.join(format!("{stem}.json"));
        fs::write(&output_path, serde_json::to_string_pretty(&record)?)?;
    }

    Ok(record)
}

/// One CSV row per file: path, error, then the record columns.
fn write_summary(path: &std::path::Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["file".to_string(), "error".to_string()];
    header.extend(header_row());
    writer.write_record(&header)?;

    let empty_width = ExtractedRecord::default().to_row().len();
    for result in results {
        let mut row = vec![
            result.path.display().to_string(),
            result.error.clone().unwrap_or_default(),
        ];
        match &result.record {
            Some(record) => row.extend(record.to_row()),
            None => row.extend(std::iter::repeat_n(String::new(), empty_width)),
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
