//! Batch processing command for multiple report files.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use hrx_core::models::config::HrxConfig;
use hrx_core::models::record::PeriodRecord;
use hrx_core::report::{ReportExtraction, ReportParser, RuleReportParser};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,

    /// Also generate a comparative summary CSV across periods
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ReportExtraction>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        HrxConfig::from_file(std::path::Path::new(path))?
    } else {
        HrxConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    // Set up progress bars
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Process files in waves of `jobs`, one blocking task per file
    let parser = Arc::new(RuleReportParser::from_config(&config.extraction));
    let config = Arc::new(config);
    let jobs = args.jobs.max(1);

    let mut results = Vec::with_capacity(files.len());

    for chunk in files.chunks(jobs) {
        let mut handles = Vec::with_capacity(chunk.len());
        for path in chunk {
            let path = path.clone();
            let parser = parser.clone();
            let config = config.clone();

            handles.push(tokio::task::spawn_blocking(move || {
                let file_start = Instant::now();
                let result = process_single_file(&path, &parser, &config);
                (path, result, file_start.elapsed().as_millis() as u64)
            }));
        }

        for handle in handles {
            let (path, result, processing_time_ms) = handle
                .await
                .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?;

            match result {
                Ok(extraction) => {
                    results.push(ProcessResult {
                        path,
                        extraction: Some(extraction),
                        error: None,
                        processing_time_ms,
                    });
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    if args.continue_on_error {
                        warn!("Failed to process {}: {}", path.display(), error_msg);
                        results.push(ProcessResult {
                            path,
                            extraction: None,
                            error: Some(error_msg),
                            processing_time_ms,
                        });
                    } else {
                        error!("Failed to process {}: {}", path.display(), error_msg);
                        anyhow::bail!("Processing failed: {}", error_msg);
                    }
                }
            }

            overall_pb.inc(1);
        }
    }

    overall_pb.finish_with_message("Complete");

    let total_ms: u64 = results.iter().map(|r| r.processing_time_ms).sum();
    debug!("Cumulative file processing time: {}ms", total_ms);

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Write per-file outputs
    for result in &successful {
        if let (Some(extraction), Some(output_dir)) = (&result.extraction, &args.output_dir) {
            let output_name = result.path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("report");

            let extension = match args.format {
                super::process::OutputFormat::Json => "json",
                super::process::OutputFormat::Csv => "csv",
                super::process::OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content = super::process::format_extraction(extraction, args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Accumulate the period label -> record collection
    let mut periods: BTreeMap<String, PeriodRecord> = BTreeMap::new();
    for result in &successful {
        if let Some(extraction) = &result.extraction {
            let label = extraction.record.period_label.clone();
            if periods.contains_key(&label) {
                warn!(
                    "Duplicate period label '{}' from {}; keeping the last occurrence",
                    label,
                    result.path.display()
                );
            }
            periods.insert(label, extraction.record.clone());
        }
    }

    let periods_path = args.output_dir
        .as_ref()
        .map(|d| d.join("periods.json"))
        .unwrap_or_else(|| PathBuf::from("periods.json"));

    fs::write(&periods_path, serde_json::to_string_pretty(&periods)?)?;
    println!(
        "{} Period records written to {}",
        style("✓").green(),
        periods_path.display()
    );

    // Generate comparative summary if requested
    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &periods)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &std::path::Path,
    parser: &RuleReportParser,
    config: &HrxConfig,
) -> anyhow::Result<ReportExtraction> {
    let (text, source_type) = super::process::load_report_text(path, config)?;
    let period = super::process::file_stem_label(path);

    let mut extraction = parser.parse(&text, &period)?;
    extraction.metadata.source_type = source_type;
    Ok(extraction)
}

fn write_summary(path: &PathBuf, periods: &BTreeMap<String, PeriodRecord>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "period",
        "turnover",
        "absenteeism",
        "hires",
        "terminations",
        "headcount",
    ])?;

    for (label, record) in periods {
        wtr.write_record([
            label.clone(),
            record.turnover.map(|r| format!("{:.4}", r)).unwrap_or_default(),
            record.absenteeism.map(|r| format!("{:.4}", r)).unwrap_or_default(),
            record.hires.map(|n| n.to_string()).unwrap_or_default(),
            record.terminations.map(|n| n.to_string()).unwrap_or_default(),
            record
                .average_headcount
                .map(|n| n.to_string())
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
