use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use record_schema_core::{Discrepancy, Record, Schema, validate_record};
use record_schema_extract::{RecordFormat, extract_record, extract_record_as};

/// CLI-specific record encoding enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliRecordFormat {
    /// Detect the encoding per file.
    Auto,
    /// One JSON object per file.
    Json,
    /// One `key=value` line per file.
    Kv,
}

impl From<CliRecordFormat> for Option<RecordFormat> {
    fn from(format: CliRecordFormat) -> Self {
        match format {
            CliRecordFormat::Auto => None,
            CliRecordFormat::Json => Some(RecordFormat::Json),
            CliRecordFormat::Kv => Some(RecordFormat::KeyValue),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "record-check")]
#[command(about = "Validate extracted log records against a field schema")]
struct Cli {
    /// Schema document (YAML or JSON) declaring fields and their types.
    #[arg(short, long)]
    schema: PathBuf,
    /// Log files, one record per file.
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Record encoding (default: detect per file).
    #[arg(long, default_value = "auto")]
    format: CliRecordFormat,
    /// Number of parallel validation jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

/// Outcome of checking one log file, rendered and ready to print.
struct FileReport {
    body: String,
    clean: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Runs the full pipeline. `Ok(true)` means every file extracted and
/// conformed; discrepancies are reported in the output, not as errors.
fn run(cli: Cli) -> Result<bool, String> {
    let schema = Schema::from_path(&cli.schema).map_err(|err| {
        format!("failed to load schema '{}': {err}", cli.schema.display())
    })?;
    let format: Option<RecordFormat> = cli.format.into();

    // Check files in parallel, print in input order.
    let reports: Vec<FileReport> = {
        use rayon::prelude::*;
        let jobs = cli
            .jobs
            .filter(|jobs| *jobs > 0)
            .unwrap_or_else(|| default_jobs(cli.files.len()));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .expect("failed to build rayon thread pool");

        pool.install(|| {
            cli.files
                .par_iter()
                .map(|path| check_file(path, &schema, format))
                .collect()
        })
    };

    let label_files = cli.files.len() > 1;
    let mut clean = true;
    for (path, report) in cli.files.iter().zip(&reports) {
        if label_files {
            println!("{}:", path.display());
        }
        print!("{}", report.body);
        clean &= report.clean;
    }

    Ok(clean)
}

/// One thread per file up to the machine's parallelism; a single file
/// never builds a wider pool.
fn default_jobs(files: usize) -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .min(files.max(1))
}

fn check_file(path: &Path, schema: &Schema, format: Option<RecordFormat>) -> FileReport {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) => {
            return FileReport {
                body: format!("Failed to read file: {err}\n"),
                clean: false,
            };
        }
    };

    let extracted = match format {
        Some(format) => extract_record_as(&raw, format),
        None => extract_record(&raw),
    };
    let record = match extracted {
        Ok(record) => record,
        Err(err) => {
            return FileReport {
                body: format!("Parsing failed: {err}\n"),
                clean: false,
            };
        }
    };

    let discrepancies = validate_record(&record, schema);
    FileReport {
        body: render_report(&record, &discrepancies),
        clean: discrepancies.is_empty(),
    }
}

/// Renders the report for one record: sorted discrepancy list (if any),
/// then the extracted record re-serialized as fenced JSON.
fn render_report(record: &Record, discrepancies: &[Discrepancy]) -> String {
    let mut body = String::new();

    if !discrepancies.is_empty() {
        let mut messages: Vec<String> = discrepancies.iter().map(ToString::to_string).collect();
        messages.sort();

        body.push_str(&format!(
            "Schema validation found {} issue(s):\n",
            messages.len()
        ));
        for message in &messages {
            body.push_str(&format!("  - {message}\n"));
        }
        body.push('\n');
    }

    let json = serde_json::to_string_pretty(record)
        .expect("extracted records always serialize to JSON");
    body.push_str("```json\n");
    body.push_str(&json);
    body.push_str("\n```\n");
    body
}
