//! Wires the presence components together and runs them.
//!
//! Runtime layout:
//!
//! ```text
//!  stdin ──▶ Console pump ──ConsoleCommand──▶ command loop ──▶ SubmissionHandler
//!               ▲   │                                              │
//!               │   └── answers ◀── ConsolePrompter ◀── prompts ───┤
//!               │                                                  ▼
//!  tick loop (1s):  FlagArbiter ── nothing pending ──▶ WorkIntervalScheduler
//!  idle loop (5s):  IdleMonitor
//!  per timed status: TimedStatusMonitor
//! ```
//!
//! Components that may block on a prompt (the tick and command handling) run
//! on tokio's blocking pool. Everything stops when Offline is submitted or a
//! termination signal arrives.

use crate::libs::arbiter::{Arbitration, FlagArbiter};
use crate::libs::command::{help, ConsoleCommand};
use crate::libs::context::Context;
use crate::libs::data_storage::{APP_NAME, APP_VERSION};
use crate::libs::idle::IdleMonitor;
use crate::libs::interval::{IntervalStep, WorkIntervalScheduler};
use crate::libs::messages::Message;
use crate::libs::presence::{PresenceState, Status};
use crate::libs::submission::{SubmissionHandler, SubmissionOutcome};
use crate::libs::timed::TimedStatusMonitor;
use crate::libs::timer::{remaining_report, status_line};
use crate::{msg_error, msg_info, msg_print, msg_warning};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;

const UNEXPECTED_EXIT: &str = "Unexpected System Exit";
const STARTUP: &str = "Startup";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The previous session ended in this status without logging off.
    UnexpectedExit(Status),
    CleanStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Arbitrated(Arbitration),
    Interval(IntervalStep),
}

pub enum CommandOutcome {
    Continue,
    Started(TimedStatusMonitor),
    Shutdown,
}

pub struct Tracker {
    ctx: Context,
    arbiter: FlagArbiter,
    scheduler: WorkIntervalScheduler,
    submissions: SubmissionHandler,
}

impl Tracker {
    pub fn new(ctx: Context) -> Self {
        Self {
            arbiter: FlagArbiter::new(ctx.clone()),
            scheduler: WorkIntervalScheduler::new(ctx.clone()),
            submissions: SubmissionHandler::new(ctx.clone()),
            ctx,
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Resets the state to Working and writes the session's first row.
    ///
    /// If the last logged status shows the previous session never logged off,
    /// that row is an Idle "Unexpected System Exit"; otherwise it is "Startup".
    pub fn recover(&self) -> Recovery {
        let now = self.ctx.clock.now();
        let journal = &self.ctx.journal;
        {
            let mut state = self.ctx.state.lock();
            *state = PresenceState::new(now, self.ctx.config.prompt_interval_secs());
        }

        match journal.last_status() {
            Some(previous) if !previous.is_resting() => {
                journal.record(
                    now,
                    Status::Idle,
                    UNEXPECTED_EXIT,
                    format!("User failed to log Offline. Logged as IDLE on startup. Previous status: {}", previous),
                );
                msg_warning!(Message::UnexpectedExitLogged(previous));
                Recovery::UnexpectedExit(previous)
            }
            _ => {
                journal.record(
                    now,
                    Status::Working,
                    STARTUP,
                    format!("Initial program start for ID: {} ({} {}).", journal.employee_id(), APP_NAME, APP_VERSION),
                );
                Recovery::CleanStart
            }
        }
    }

    /// One arbitration pass; the interval scheduler only runs when no alert is pending.
    pub fn tick(&self) -> Tick {
        match self.arbiter.tick() {
            Arbitration::Clear => Tick::Interval(self.scheduler.step()),
            handled => Tick::Arbitrated(handled),
        }
    }

    /// Executes one console command. May block on prompts.
    pub fn handle(&self, command: ConsoleCommand) -> CommandOutcome {
        let prompter = &self.ctx.prompter;
        let (status, response) = match command {
            ConsoleCommand::Submit { status, response } => (status, response),
            ConsoleCommand::BackToWork(Some(task)) => (Status::Working, task),
            ConsoleCommand::BackToWork(None) => {
                let task = prompter.request_free_text(&Message::ResumeTaskQuestion.to_string()).unwrap_or_default();
                (Status::Working, task)
            }
            ConsoleCommand::Remaining => {
                let state = self.ctx.state.snapshot();
                msg_info!(remaining_report(&state, self.ctx.clock.now(), &self.ctx.config));
                return CommandOutcome::Continue;
            }
            ConsoleCommand::Status => {
                msg_print!(self.status_line());
                return CommandOutcome::Continue;
            }
            ConsoleCommand::Help => {
                msg_print!(help());
                return CommandOutcome::Continue;
            }
            ConsoleCommand::Empty => return CommandOutcome::Continue,
            ConsoleCommand::Unknown(line) => {
                msg_warning!(Message::UnknownCommand(line));
                return CommandOutcome::Continue;
            }
        };

        match self.submissions.submit(status, &response) {
            SubmissionOutcome::Applied { monitor: Some(monitor), .. } => CommandOutcome::Started(monitor),
            SubmissionOutcome::Applied { monitor: None, .. } => CommandOutcome::Continue,
            SubmissionOutcome::Rejected(e) => {
                msg_warning!(Message::SubmissionRejected(e.to_string()));
                CommandOutcome::Continue
            }
            SubmissionOutcome::Shutdown => CommandOutcome::Shutdown,
        }
    }

    pub fn status_line(&self) -> String {
        let state = self.ctx.state.snapshot();
        status_line(&state, self.ctx.clock.now(), &self.ctx.config)
    }

    /// Runs until Offline is submitted or the command stream ends.
    pub async fn run(self, mut commands: UnboundedReceiver<ConsoleCommand>) -> Result<()> {
        let tracker = Arc::new(self);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let idle = tokio::spawn(IdleMonitor::new(tracker.ctx.clone()).run(shutdown_rx.clone()));

        let ticker = {
            let tracker = tracker.clone();
            let mut shutdown = shutdown_rx.clone();
            tokio::spawn(async move {
                let period = Duration::from_secs(tracker.ctx.config.tick_secs);
                loop {
                    let current = tracker.clone();
                    match tokio::task::spawn_blocking(move || current.tick()).await {
                        Ok(tick) => tracing::trace!(?tick, "tick"),
                        Err(e) => msg_error!(Message::TickFailed(e.to_string())),
                    }
                    tokio::select! {
                        _ = tokio::time::sleep(period) => {}
                        _ = shutdown.changed() => break,
                    }
                }
            })
        };

        msg_print!(tracker.status_line());
        while let Some(command) = commands.recv().await {
            let current = tracker.clone();
            match tokio::task::spawn_blocking(move || current.handle(command)).await? {
                CommandOutcome::Continue => {}
                CommandOutcome::Started(monitor) => {
                    tokio::spawn(monitor.run(shutdown_rx.clone()));
                }
                CommandOutcome::Shutdown => break,
            }
            msg_print!(tracker.status_line());
        }

        let _ = shutdown_tx.send(true);
        // Closing the command stream stops the console, which dismisses any open prompt.
        drop(commands);
        let _ = idle.await;
        let _ = tokio::time::timeout(Duration::from_secs(2), ticker).await;
        Ok(())
    }
}

/// Runs the tracker until it stops on its own or SIGINT/SIGTERM (Ctrl-C on Windows) arrives.
///
/// A signal ends the process without an Offline row, so the next start
/// records an unexpected exit.
pub async fn run_with_signal_handling(tracker: Tracker, commands: UnboundedReceiver<ConsoleCommand>) -> Result<()> {
    let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
                (Err(e), _) | (_, Err(e)) => {
                    msg_error!(Message::SignalHandlerFailed(e.to_string()));
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => msg_info!(Message::ReceivedSigterm),
                _ = sigint.recv() => msg_info!(Message::ReceivedSigint),
            }
            let _ = signal_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => msg_info!(Message::ReceivedCtrlC),
                Err(e) => {
                    msg_error!(Message::SignalHandlerFailed(e.to_string()));
                    return;
                }
            }
            let _ = signal_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        drop(signal_tx);
        msg_warning!(Message::SignalHandlingNotSupported);
    }

    let run = tracker.run(commands);
    tokio::pin!(run);
    tokio::select! {
        result = &mut run => {
            if let Err(e) = &result {
                msg_error!(Message::TrackerFailed(e.to_string()));
            }
            result
        }
        Ok(()) = signal_rx => {
            msg_info!(Message::TrackerStopping);
            Ok(())
        }
    }
}
