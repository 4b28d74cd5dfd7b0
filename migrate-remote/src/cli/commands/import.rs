//! `import` command: POST each record of a JSON Lines file

use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use super::load_settings;
use crate::cli::ImportCommands;
use crate::destination::RemoteDestination;
use crate::http::{HttpClient, ReqwestClient};
use crate::record::Record;

/// Counts of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
    /// Records not attempted because of `--fail-fast`
    pub skipped: usize,
}

impl ImportSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

pub async fn handle_import_command(args: ImportCommands) -> Result<ImportSummary> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let settings = load_settings(&args.destination)?;
    let client = match args.timeout_secs {
        Some(secs) => ReqwestClient::with_timeout(Duration::from_secs(secs))?,
        None => ReqwestClient::new(),
    };
    let destination = RemoteDestination::from_settings(&settings, client).with_context(|| {
        format!(
            "Destination for '{}' is misconfigured",
            args.destination.migration
        )
    })?;

    let records = read_records(&args.records)?;
    info!(
        "Importing {} record(s) for migration '{}'",
        records.len(),
        args.destination.migration
    );

    let start = Instant::now();
    let summary = import_records(&destination, &records, args.fail_fast).await;

    println!();
    println!(
        "{} imported, {} failed, {} skipped in {:.2}s",
        summary.imported.to_string().bright_green(),
        summary.failed.to_string().red(),
        summary.skipped.to_string().yellow(),
        start.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Import records one after another, reporting each outcome
pub async fn import_records<C: HttpClient>(
    destination: &RemoteDestination<C>,
    records: &[Record],
    fail_fast: bool,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for (index, record) in records.iter().enumerate() {
        let line = index + 1;
        match destination.import(record).await {
            Ok(outcome) => {
                summary.imported += 1;
                println!("{} record {}: {}", "✓".green(), line, outcome);
            }
            Err(e) => {
                summary.failed += 1;
                println!("{} record {}: {}", "✗".red(), line, e);
                if fail_fast {
                    summary.skipped = records.len() - line;
                    break;
                }
            }
        }
    }

    summary
}

/// Read records from a JSON Lines file, or stdin when the path is "-"
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read records from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read records file: {}", path.display()))?
    };

    parse_records(&content)
}

/// Parse one JSON object per non-blank line
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: serde_json::Value = serde_json::from_str(trimmed)
            .with_context(|| format!("Invalid JSON on line {}", index + 1))?;
        let record =
            Record::from_json(value).with_context(|| format!("Invalid record on line {}", index + 1))?;
        records.push(record);
    }
    Ok(records)
}
