//! Analyze command - extract data from a single document.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::info;

use kasbon_core::{ExtractedRecord, ReceiptAnalyzer, supported_field_groups};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input text file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the model-assisted stage even when credentials are configured
    #[arg(long)]
    patterns_only: bool,

    /// Show the confidence score on stderr
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// One CSV row with a header line
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let text = read_input(&args.input)?;

    let analyzer = if args.patterns_only {
        ReceiptAnalyzer::new()
    } else {
        ReceiptAnalyzer::from_env()
    };

    info!("Analyzing {}", args.input.display());
    let record = analyzer.analyze(&text);

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    if args.show_confidence {
        eprintln!(
            "{} Confidence: {}%, elapsed: {}ms",
            style("ℹ").blue(),
            record.confidence,
            start.elapsed().as_millis()
        );
    }

    Ok(())
}

/// Read the whole input, treating "-" as stdin.
pub fn read_input(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        Ok(fs::read_to_string(path)?)
    }
}

/// Render a record in the requested format.
pub fn format_record(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(header_row())?;
            writer.write_record(record.to_row())?;
            Ok(String::from_utf8(writer.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("Company:   {}\n", record.company.name.to_cell()));
            out.push_str(&format!(
                "Date:      {} {}\n",
                record.transaction.date.to_cell(),
                record.transaction.time.to_cell()
            ));
            out.push_str(&format!(
                "Total:     {} {}\n",
                record.financial.total_amount.to_cell(),
                record.financial.currency.to_cell()
            ));
            out.push_str(&format!(
                "Payment:   {}\n",
                record.financial.payment_method.to_cell()
            ));
            out.push_str(&format!("Items:     {}\n", record.effective_item_count()));
            out.push_str(&format!("Confidence: {}%\n", record.confidence));
            if !record.notes.is_empty() {
                out.push_str(&format!("Notes:     {}\n", record.notes));
            }
            Ok(out)
        }
    }
}

/// Flat column names, group-prefixed, in [`ExtractedRecord::to_row`] order.
pub fn header_row() -> Vec<String> {
    supported_field_groups()
        .iter()
        .flat_map(|group| {
            group
                .columns
                .iter()
                .map(move |column| format!("{}_{}", group.name, column))
        })
        .collect()
}
