//! Process command - extract data from a single report file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use hrx_core::models::config::HrxConfig;
use hrx_core::models::record::SourceType;
use hrx_core::models::roster::payroll_by_department;
use hrx_core::pdf::{PdfExtractor, PdfProcessor};
use hrx_core::report::rules::format_brl;
use hrx_core::report::{ReportExtraction, ReportParser, RuleReportParser};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Reporting period label (default: input file stem)
    #[arg(short, long)]
    period: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Check the extracted record for data-quality issues
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        HrxConfig::from_file(std::path::Path::new(path))?
    } else {
        HrxConfig::default()
    };

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let period = args
        .period
        .clone()
        .unwrap_or_else(|| file_stem_label(&args.input));

    info!("Processing file: {}", args.input.display());

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);

    let (text, source_type) = load_report_text(&args.input, &config)?;

    pb.set_message("Extracting report data...");
    pb.set_position(60);

    let parser = RuleReportParser::from_config(&config.extraction);
    let mut extraction = parser.parse(&text, &period)?;
    extraction.metadata.source_type = source_type;

    pb.set_position(100);
    pb.finish_with_message("Done");

    // Validate if requested
    if args.validate {
        let issues = extraction.record.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    // Format output
    let output = format_extraction(&extraction, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Period label from a file name: "agosto-2025.txt" -> "agosto-2025".
pub fn file_stem_label(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report")
        .to_string()
}

/// Read the raw report text out of a PDF or plain-text file.
pub fn load_report_text(
    input: &std::path::Path,
    config: &HrxConfig,
) -> anyhow::Result<(String, SourceType)> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(input)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;

            debug!("PDF has {} pages", extractor.page_count());

            let text = extractor.extract_text()?;
            if text.trim().is_empty() {
                anyhow::bail!("No text could be extracted from the PDF");
            }
            if text.len() < config.pdf.min_text_length {
                warn!(
                    "PDF yielded only {} characters of text; it may be a scanned document",
                    text.len()
                );
            }

            Ok((text, SourceType::Pdf))
        }
        "txt" | "text" => {
            let text = fs::read_to_string(input)?;
            Ok((text, SourceType::PlainText))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub fn format_extraction(
    extraction: &ReportExtraction,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(extraction)?),
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_csv(extraction: &ReportExtraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "period",
        "terminations",
        "average_headcount",
        "turnover",
        "hires",
        "dismissals_in_period",
        "unexcused_absences",
        "medical_certificates",
        "eligible_workdays",
        "absenteeism",
        "tenure_days",
        "tenure_years",
        "tenure_months",
        "overtime_value",
        "vacation_overdue",
        "vacation_scheduled",
        "mean_age",
        "min_age",
        "max_age",
        "maternity_leaves",
        "sick_leaves",
        "accident_leaves",
    ])?;

    let record = &extraction.record;
    wtr.write_record([
        record.period_label.clone(),
        opt_count(record.terminations),
        opt_count(record.average_headcount),
        opt_ratio(record.turnover),
        opt_count(record.hires),
        opt_count(record.dismissals_in_period),
        opt_count(record.unexcused_absences),
        opt_count(record.medical_certificates),
        opt_count(record.eligible_workdays),
        opt_ratio(record.absenteeism),
        opt_count(record.tenure_days),
        opt_count(record.tenure.map(|t| t.years)),
        opt_count(record.tenure.map(|t| t.months)),
        record
            .overtime_value
            .map(|v| v.to_string())
            .unwrap_or_default(),
        opt_count(record.vacation_overdue),
        opt_count(record.vacation_scheduled),
        record
            .mean_age
            .map(|v| format!("{:.1}", v))
            .unwrap_or_default(),
        opt_count(record.min_age),
        opt_count(record.max_age),
        opt_count(record.maternity_leaves),
        opt_count(record.sick_leaves),
        opt_count(record.accident_leaves),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn opt_count(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn opt_ratio(value: Option<f64>) -> String {
    value.map(|r| format!("{:.4}", r)).unwrap_or_default()
}

fn format_text(extraction: &ReportExtraction) -> String {
    let record = &extraction.record;
    let mut output = String::new();

    output.push_str(&format!("Period: {}\n\n", record.period_label));
    output.push_str("Metrics:\n");

    if let Some(turnover) = record.turnover {
        output.push_str(&format!("  Turnover:             {:.2}%\n", turnover * 100.0));
    }
    if let Some(absenteeism) = record.absenteeism {
        output.push_str(&format!("  Absenteeism:          {:.2}%\n", absenteeism * 100.0));
    }
    if let Some(terminations) = record.terminations {
        output.push_str(&format!("  Terminations:         {}\n", terminations));
    }
    if let Some(headcount) = record.average_headcount {
        output.push_str(&format!("  Average headcount:    {}\n", headcount));
    }
    if let Some(hires) = record.hires {
        output.push_str(&format!("  Hires:                {}\n", hires));
    }
    if let Some(dismissals) = record.dismissals_in_period {
        output.push_str(&format!("  Dismissals in period: {}\n", dismissals));
    }
    if let Some(absences) = record.unexcused_absences {
        output.push_str(&format!("  Unexcused absences:   {}\n", absences));
    }
    if let Some(certificates) = record.medical_certificates {
        output.push_str(&format!("  Medical certificates: {}\n", certificates));
    }
    if let Some(workdays) = record.eligible_workdays {
        output.push_str(&format!("  Eligible workdays:    {}\n", workdays));
    }
    if let (Some(days), Some(tenure)) = (record.tenure_days, record.tenure) {
        output.push_str(&format!(
            "  Tenure:               {} days ({} years, {} months)\n",
            days, tenure.years, tenure.months
        ));
    }
    if let Some(overtime) = record.overtime_value {
        output.push_str(&format!("  Overtime value:       R$ {}\n", format_brl(overtime)));
    }
    if let Some(overdue) = record.vacation_overdue {
        output.push_str(&format!("  Vacation overdue:     {}\n", overdue));
    }
    if let Some(scheduled) = record.vacation_scheduled {
        output.push_str(&format!("  Vacation scheduled:   {}\n", scheduled));
    }
    if let Some(mean_age) = record.mean_age {
        output.push_str(&format!("  Mean age:             {:.1}\n", mean_age));
    }
    if let (Some(min), Some(max)) = (record.min_age, record.max_age) {
        output.push_str(&format!("  Age range:            {} - {}\n", min, max));
    }
    if let Some(maternity) = record.maternity_leaves {
        output.push_str(&format!("  Maternity leaves:     {}\n", maternity));
    }
    if let Some(sick) = record.sick_leaves {
        output.push_str(&format!("  Sick leaves:          {}\n", sick));
    }
    if let Some(accident) = record.accident_leaves {
        output.push_str(&format!("  Accident leaves:      {}\n", accident));
    }

    if !extraction.roster.is_empty() {
        let payroll = payroll_by_department(&extraction.roster);

        output.push_str("\nRoster:\n");
        for (department, entries) in &extraction.roster {
            let total = payroll.get(department).copied().unwrap_or_default();
            output.push_str(&format!(
                "  {} ({} employees, payroll R$ {})\n",
                department,
                entries.len(),
                format_brl(total)
            ));
            for entry in entries {
                output.push_str(&format!(
                    "    {} - {} - {} - R$ {}\n",
                    entry.name,
                    entry.role,
                    entry.admission,
                    format_brl(entry.salary)
                ));
            }
        }
    }

    if !extraction.metadata.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &extraction.metadata.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}
