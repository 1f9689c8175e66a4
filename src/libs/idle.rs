//! Inactivity detection while the user is Working.
//!
//! The monitor polls the input sampler every few seconds. Once no activity
//! has been anchored for `idle_timeout_secs` it looks at the most recent
//! poll: if input arrived since then the user is clearly present and nothing
//! happens. Otherwise a caution is raised (the arbiter turns it into an "are
//! you still there?" prompt) and a second sample is taken after
//! `idle_caution_delay_secs`:
//!
//! - unmoved: the user is committed to Idle, which also opens an exceedance
//!   so a reason is required on return;
//! - moved: the caution is withdrawn and a "Movement Detected" row is written.

use crate::libs::context::Context;
use crate::libs::messages::Message;
use crate::libs::presence::Status;
use crate::libs::sampler::ActivityToken;
use chrono::NaiveDateTime;
use std::time::Duration;
use tokio::sync::watch;

const EXTENDED_IDLE: &str = "Extended Idle Logged";
const EXTENDED_IDLE_REMARK: &str = "No mouse/keyboard activity. Status changed to IDLE. Mandatory reason on return to work.";
const MOVEMENT_DETECTED: &str = "Movement Detected";
const MOVEMENT_DETECTED_REMARK: &str = "Activity detected during idle caution. Caution withdrawn.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleStep {
    /// Not Working, exceeded, or tracking off-work time.
    Inactive,
    /// Below the idle timeout.
    Watching,
    /// Input seen since the previous poll; the user is present.
    Active,
    CautionRaised,
    /// Waiting for the caution window to elapse.
    Cautioned,
    MovementDetected,
    Idle,
}

pub struct IdleMonitor {
    ctx: Context,
    last_probe: Option<ActivityToken>,
    pending: Option<(ActivityToken, NaiveDateTime)>,
}

impl IdleMonitor {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            last_probe: None,
            pending: None,
        }
    }

    pub fn step(&mut self) -> IdleStep {
        let now = self.ctx.clock.now();
        let token = self.ctx.sampler.position();
        let config = &self.ctx.config;

        let outcome = {
            let mut state = self.ctx.state.lock();
            if state.status != Status::Working || state.is_exceeded() || state.off_work_since.is_some() {
                self.pending = None;
                self.last_probe = None;
                return IdleStep::Inactive;
            }

            let previous = self.last_probe.replace(token);
            let elapsed = state.elapsed_since_activity(now);
            if elapsed < config.idle_timeout_secs() {
                self.pending = None;
                return IdleStep::Watching;
            }

            match self.pending {
                None => {
                    if previous != Some(token) {
                        return IdleStep::Active;
                    }
                    state.idle_caution = true;
                    self.pending = Some((token, now));
                    IdleStep::CautionRaised
                }
                Some((_, sampled_at)) if (now - sampled_at).num_seconds() < config.idle_caution_delay_secs() => IdleStep::Cautioned,
                Some((sampled, _)) => {
                    self.pending = None;
                    if sampled == token {
                        if elapsed < config.idle_timeout_secs() + config.idle_caution_delay_secs() {
                            return IdleStep::Cautioned;
                        }
                        state.status = Status::Idle;
                        state.idle_caution = false;
                        state.raise_exceedance(now);
                        state.last_activity = now;
                        self.ctx.journal.record(now, Status::Idle, EXTENDED_IDLE, EXTENDED_IDLE_REMARK);
                        IdleStep::Idle
                    } else {
                        state.idle_caution = false;
                        state.rebase_activity(now);
                        self.ctx.journal.record(now, Status::Working, MOVEMENT_DETECTED, MOVEMENT_DETECTED_REMARK);
                        IdleStep::MovementDetected
                    }
                }
            }
        };

        match outcome {
            IdleStep::CautionRaised => {
                let mins = config.idle_timeout_secs / 60;
                self.ctx.prompter.notify(&Message::IdleCaution(mins).to_string());
            }
            IdleStep::Idle => self.ctx.prompter.notify(&Message::MarkedIdle.to_string()),
            _ => {}
        }
        outcome
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let period = Duration::from_secs(self.ctx.config.idle_poll_secs);
        loop {
            let step = self.step();
            tracing::trace!(?step, "idle poll");
            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = shutdown.changed() => break,
            }
        }
    }
}
