//! Watches one timed status (Break, Lunch, Meeting, Personal) until it ends.
//!
//! A monitor belongs to exactly one entry into its status, identified by the
//! generation returned from [`PresenceState::enter_timed`]. It stops for good
//! the first time it sees the status changed or re-entered, and writes no row
//! when it does.
//!
//! [`PresenceState::enter_timed`]: crate::libs::presence::PresenceState::enter_timed

use crate::libs::context::Context;
use crate::libs::messages::Message;
use crate::libs::presence::Status;
use chrono::NaiveDateTime;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedStep {
    Counting { remaining_secs: i64 },
    /// The allowance ran out on this step.
    Exceeded,
    Overrun { over_secs: i64 },
    Finished,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Counting,
    Exceeded {
        since: NaiveDateTime,
        last_log: NaiveDateTime,
        last_reminder: Option<NaiveDateTime>,
    },
    Finished,
}

pub struct TimedStatusMonitor {
    ctx: Context,
    target: Status,
    generation: u64,
    duration_mins: i64,
    end: NaiveDateTime,
    phase: Phase,
}

impl TimedStatusMonitor {
    pub fn new(ctx: Context, target: Status, duration_mins: i64, end: NaiveDateTime, generation: u64) -> Self {
        Self {
            ctx,
            target,
            generation,
            duration_mins,
            end,
            phase: Phase::Counting,
        }
    }

    pub fn target(&self) -> Status {
        self.target
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    pub fn step(&mut self) -> TimedStep {
        if self.is_finished() {
            return TimedStep::Finished;
        }
        let config = self.ctx.config.clone();
        let now = self.ctx.clock.now();
        let prompt_open = self.ctx.prompter.is_showing_prompt();

        let (step, remind) = {
            let mut state = self.ctx.state.lock();
            if !state.is_timed_monitor_live(self.target, self.generation) {
                self.phase = Phase::Finished;
                return TimedStep::Finished;
            }

            match self.phase {
                Phase::Counting if now < self.end => {
                    return TimedStep::Counting {
                        remaining_secs: (self.end - now).num_seconds(),
                    }
                }
                Phase::Counting => {
                    self.ctx.journal.record(
                        now,
                        self.target,
                        format!("Exceeded {} duration of {}m", self.target, self.duration_mins),
                        "Time limit reached. Auto-transition to exceeded state.",
                    );
                    state.raise_exceedance(now);
                    self.phase = Phase::Exceeded {
                        since: now,
                        last_log: now,
                        last_reminder: None,
                    };
                    (TimedStep::Exceeded, false)
                }
                Phase::Exceeded {
                    since,
                    mut last_log,
                    mut last_reminder,
                } => {
                    if (now - last_log).num_seconds() >= config.exceed_log_interval_secs() {
                        self.ctx.journal.record(
                            now,
                            self.target,
                            format!("STILL Exceeded {}", self.target),
                            format!("Exceeded time limit. Logging every {}m.", config.exceed_log_interval_secs / 60),
                        );
                        last_log = now;
                    }

                    let over = (now - since).num_seconds();
                    let reminder_due = last_reminder.map_or(true, |at| (now - at).num_seconds() >= config.exceed_log_interval_secs());
                    let remind = over >= config.exceed_reminder_buffer_secs() && !prompt_open && reminder_due;
                    if remind {
                        last_reminder = Some(now);
                    }
                    self.phase = Phase::Exceeded {
                        since,
                        last_log,
                        last_reminder,
                    };
                    (TimedStep::Overrun { over_secs: over }, remind)
                }
                Phase::Finished => return TimedStep::Finished,
            }
        };

        if step == TimedStep::Exceeded {
            self.ctx
                .prompter
                .notify(&Message::TimedStatusExceeded(self.target, self.duration_mins).to_string());
        }
        if remind {
            self.ctx.prompter.notify(&Message::ExceedanceReminder(self.target).to_string());
            self.ctx.prompter.show(&Message::UpdateStatusRequest.to_string());
        }
        step
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let period = Duration::from_secs(self.ctx.config.timed_poll_secs);
        loop {
            if self.step() == TimedStep::Finished {
                tracing::debug!(status = %self.target, generation = self.generation, "timed monitor finished");
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = shutdown.changed() => break,
            }
        }
    }
}
