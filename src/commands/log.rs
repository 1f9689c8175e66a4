use super::parse_date;
use crate::db::activity::ActivityRecords;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    #[arg(long, short, default_value = "today", help = "Date to show activity for (YYYY-MM-DD or 'today')")]
    date: String,
}

pub async fn cmd(args: LogArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let entries = ActivityRecords::new()?.fetch_day(date)?;

    if entries.is_empty() {
        msg_info!(Message::NoActivityForDate(date.format("%Y-%m-%d").to_string()));
        return Ok(());
    }

    msg_print!(Message::ActivityHeader(date.format("%B %-d, %Y").to_string()), true);
    View::activity(&entries)?;
    Ok(())
}
