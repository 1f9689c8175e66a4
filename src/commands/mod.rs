//! Command-line entry points.

pub mod export;
pub mod init;
pub mod log;
pub mod start;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start tracking presence for this shift")]
    Start(start::StartArgs),
    #[command(about = "Display the activity log for a given date")]
    Log(log::LogArgs),
    #[command(about = "Export the activity log to CSV or JSON")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Start(args) => start::cmd(args).await,
            Commands::Log(args) => log::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
        }
    }
}

/// Accepts `YYYY-MM-DD` or `today`.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
