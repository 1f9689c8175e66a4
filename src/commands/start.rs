//! Starts a tracking session in the foreground.
//!
//! The employee ID and prompt interval come from the flags, then from the
//! saved configuration, and are asked for interactively as a last resort.

use crate::db::activity::ActivityRecords;
use crate::libs::clock::SystemClock;
use crate::libs::config::{Config, ALLOWED_INTERVALS};
use crate::libs::console::Console;
use crate::libs::context::Context;
use crate::libs::journal::Journal;
use crate::libs::messages::Message;
use crate::libs::remote::RemoteLog;
use crate::libs::sampler::InputSampler;
use crate::libs::tracker::{run_with_signal_handling, Tracker};
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Employee ID recorded on every activity row
    #[arg(short, long)]
    emp_id: Option<String>,

    /// Minutes between work status prompts (15, 30 or 60)
    #[arg(short, long, value_parser = parse_interval)]
    interval: Option<u64>,
}

pub async fn cmd(args: StartArgs) -> Result<()> {
    let config = Config::read()?;

    let employee_id = match args.emp_id.or(config.employee_id.clone()).filter(|id| !id.trim().is_empty()) {
        Some(id) => id.trim().to_string(),
        None => ask_employee_id()?,
    };

    let mut presence = config.presence.clone().unwrap_or_default();
    presence.prompt_interval_mins = match args.interval {
        Some(mins) => mins,
        None if config.presence.is_some() => presence.prompt_interval_mins,
        None => ask_interval(presence.prompt_interval_mins)?,
    };
    presence.validate()?;

    let mut journal = Journal::new(employee_id.clone(), Arc::new(ActivityRecords::new()?));
    if let Some(server) = config.server {
        journal = journal.with_mirror(Arc::new(RemoteLog::spawn(server)));
    }

    let (console, prompter) = Console::new(Duration::from_secs(presence.prompt_timeout_secs));
    let interval = presence.prompt_interval_mins;
    let ctx = Context::new(
        presence,
        Arc::new(SystemClock),
        Arc::new(InputSampler::start()),
        journal,
        Arc::new(prompter),
    );

    let tracker = Tracker::new(ctx);
    tracker.recover();
    msg_info!(Message::TrackerStarted(employee_id, interval));
    msg_print!(Message::ConsoleHint);

    let (command_tx, command_rx) = unbounded_channel();
    console.spawn(command_tx);
    run_with_signal_handling(tracker, command_rx).await
}

fn parse_interval(value: &str) -> Result<u64, String> {
    let mins: u64 = value.trim().parse().map_err(|_| Message::InvalidPromptInterval(0).to_string())?;
    if ALLOWED_INTERVALS.contains(&mins) {
        Ok(mins)
    } else {
        Err(Message::InvalidPromptInterval(mins).to_string())
    }
}

fn ask_employee_id() -> Result<String> {
    let employee_id: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptEmployeeId.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err(Message::EmployeeIdRequired.to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(employee_id.trim().to_string())
}

fn ask_interval(default_mins: u64) -> Result<u64> {
    let default_idx = ALLOWED_INTERVALS.iter().position(|&m| m == default_mins).unwrap_or(1);
    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptWorkInterval.to_string())
        .items(&ALLOWED_INTERVALS.iter().map(|m| format!("{} minutes", m)).collect::<Vec<_>>())
        .default(default_idx)
        .interact()?;
    Ok(ALLOWED_INTERVALS[idx])
}
