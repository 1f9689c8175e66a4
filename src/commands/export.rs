use super::parse_date;
use crate::db::activity::ActivityRecords;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Day to export (YYYY-MM-DD or 'today'); the whole log when omitted
    #[arg(short, long)]
    date: Option<String>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let records = ActivityRecords::new()?;
    let entries = match date {
        Some(date) => records.fetch_day(date)?,
        None => records.fetch_all()?,
    };

    if entries.is_empty() {
        msg_info!(Message::NoActivityToExport);
    }

    let exporter = Exporter::new(args.format, args.output, date);
    exporter.export(&entries)?;
    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string(), entries.len()));
    Ok(())
}
