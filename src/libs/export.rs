//! Writes activity rows to CSV or JSON files.
//!
//! Both formats carry the same five columns (`Timestamp`, `Employee`,
//! `Status`, `Response`, `Remark`) in log order.

use crate::libs::formatter::FormattedEntry;
use crate::libs::journal::ActivityEntry;
use anyhow::Result;
use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit output, writes `activity_<date>.<ext>` (or `activity_all.<ext>`)
    /// in the current directory.
    pub fn new(format: ExportFormat, output: Option<PathBuf>, date: Option<NaiveDate>) -> Self {
        let output_path = output.unwrap_or_else(|| {
            let stem = match date {
                Some(date) => format!("activity_{}", date.format("%Y-%m-%d")),
                None => "activity_all".to_string(),
            };
            PathBuf::from(format!("{}.{}", stem, format.extension()))
        });
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, entries: &[ActivityEntry]) -> Result<()> {
        let rows: Vec<FormattedEntry> = entries.iter().map(FormattedEntry::from).collect();
        match self.format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(&self.output_path)?;
                if rows.is_empty() {
                    wtr.write_record(["Timestamp", "Employee", "Status", "Response", "Remark"])?;
                }
                for row in &rows {
                    wtr.serialize(row)?;
                }
                wtr.flush()?;
            }
            ExportFormat::Json => {
                let file = File::create(&self.output_path)?;
                serde_json::to_writer_pretty(file, &rows)?;
            }
        }
        Ok(())
    }
}
