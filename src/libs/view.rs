use super::formatter::FormattedEntry;
use super::journal::ActivityEntry;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn activity(entries: &[ActivityEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TIME", "STATUS", "RESPONSE", "REMARK"]);
        for entry in entries.iter().map(FormattedEntry::from) {
            table.add_row(row![entry.timestamp, entry.status, entry.response, entry.remark]);
        }
        table.printstd();

        Ok(())
    }
}
