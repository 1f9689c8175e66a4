//! Resolves pending accountability alerts, one per tick, highest priority first.
//!
//! Alerts are checked in [`Alert::PRIORITY`] order. Adding a new alert means
//! adding a variant, its pending condition and its resolver; the tick loop
//! itself does not change.
//!
//! Resolution never prompts under the presence lock. The arbiter snapshots
//! what it needs, releases the lock, asks the user, then re-locks and
//! re-validates. If the state moved on while the prompt was open (the user
//! submitted a new status, the idle monitor committed Idle) the answer is
//! dropped.

use crate::libs::context::Context;
use crate::libs::formatter::format_exceeded;
use crate::libs::messages::Message;
use crate::libs::presence::{PresenceState, Status};
use crate::libs::sampler::ActivityToken;
use chrono::NaiveDateTime;
use parking_lot::Mutex;

pub const BACK_TO_WORK: &str = "Yes, Back to Work";
pub const STILL_ON_BREAK: &str = "Still on Break (5 min check)";
pub const BACK_ON_TRACK: &str = "Yes, Back on Track";
pub const STILL_IDLE: &str = "No, Still Idle";

const NO_TASK: &str = "No task provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    Exceedance,
    IdleCaution,
}

impl Alert {
    pub const PRIORITY: [Alert; 2] = [Alert::Exceedance, Alert::IdleCaution];

    pub fn is_pending(self, state: &PresenceState) -> bool {
        match self {
            Alert::Exceedance => state.is_exceeded(),
            Alert::IdleCaution => state.idle_caution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    Handled(Alert),
    Clear,
}

pub struct FlagArbiter {
    ctx: Context,
    probe: Mutex<Option<ActivityToken>>,
}

impl FlagArbiter {
    pub fn new(ctx: Context) -> Self {
        Self { ctx, probe: Mutex::new(None) }
    }

    pub fn tick(&self) -> Arbitration {
        let pending = {
            let state = self.ctx.state.lock();
            Alert::PRIORITY.iter().copied().find(|alert| alert.is_pending(&state))
        };

        match pending {
            Some(alert) => {
                match alert {
                    Alert::Exceedance => self.resolve_exceedance(),
                    Alert::IdleCaution => self.resolve_idle_caution(),
                }
                Arbitration::Handled(alert)
            }
            None => {
                *self.probe.lock() = None;
                Arbitration::Clear
            }
        }
    }

    /// True if input arrived since the previous exceedance tick.
    fn moved_since_last_tick(&self) -> bool {
        let token = self.ctx.sampler.position();
        let previous = self.probe.lock().replace(token);
        previous.is_some_and(|p| p != token)
    }

    fn resolve_exceedance(&self) {
        let config = &self.ctx.config;
        let journal = &self.ctx.journal;
        let now = self.ctx.clock.now();
        let moved = self.moved_since_last_tick();

        let (status, opened_at) = {
            let mut state = self.ctx.state.lock();
            let Some(start) = state.exceedance_check_start() else {
                return;
            };
            let elapsed = (now - start).num_seconds();

            if elapsed >= config.response_timeout_secs() {
                journal.record(
                    now,
                    Status::Idle,
                    "No response",
                    format!(
                        "No response to {} check within {}s. Logged as IDLE, status reset to Working.",
                        state.status,
                        config.response_timeout_secs
                    ),
                );
                force_working(&mut state, now);
                drop(state);
                self.ctx.prompter.notify(&Message::NoResponseLoggedIdle.to_string());
                return;
            }

            let first = !state.exceedance_prompted();
            if !(first || (moved && elapsed >= config.reprompt_secs())) {
                return;
            }
            state.mark_exceedance_prompted();
            (state.status, start)
        };

        let question = Message::BackToWorkQuestion(status).to_string();
        let answer = self.ctx.prompter.request_choice(&question, &[BACK_TO_WORK, STILL_ON_BREAK]);
        let task = match answer.as_deref() {
            Some(BACK_TO_WORK) => self
                .ctx
                .prompter
                .request_free_text(&Message::ResumeTaskQuestion.to_string())
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            _ => None,
        };

        let answered_at = self.ctx.clock.now();
        let mut state = self.ctx.state.lock();
        if !still_open(&state, status, opened_at) {
            return;
        }
        let waited = format_exceeded((answered_at - opened_at).num_seconds());

        match answer.as_deref() {
            Some(BACK_TO_WORK) => {
                journal.record(
                    answered_at,
                    Status::Working,
                    task.unwrap_or_else(|| NO_TASK.to_string()),
                    format!("Status resumed. {}", waited),
                );
                force_working(&mut state, answered_at);
            }
            Some(STILL_ON_BREAK) => {
                state.rearm_exceedance(answered_at);
                journal.record(
                    answered_at,
                    status,
                    "Break Check Confirmed",
                    format!("User confirmed still on {}. Grace period restarted. {}", status, waited),
                );
            }
            _ => {
                state.rearm_exceedance(answered_at);
                journal.record(
                    answered_at,
                    status,
                    "Prompt Ignored/Cancelled",
                    format!("Exceedance prompt dismissed. Grace period restarted. {}", waited),
                );
            }
        }
    }

    fn resolve_idle_caution(&self) {
        {
            let mut state = self.ctx.state.lock();
            if !state.idle_caution {
                return;
            }
            if state.status != Status::Working {
                state.idle_caution = false;
                return;
            }
        }

        let question = Message::StillThereQuestion.to_string();
        let answer = self.ctx.prompter.request_choice(&question, &[BACK_ON_TRACK, STILL_IDLE]);

        let now = self.ctx.clock.now();
        let mut state = self.ctx.state.lock();
        if !state.idle_caution || state.status != Status::Working {
            state.idle_caution = false;
            return;
        }
        let (response, remark) = match answer.as_deref() {
            Some(BACK_ON_TRACK) => ("Resumed Work", "User confirmed presence after idle caution."),
            _ => ("Did Not Confirm", "User did not confirm presence after idle caution. Kept as Working."),
        };
        self.ctx.journal.record(now, Status::Working, response, remark);
        state.idle_caution = false;
        state.rebase_activity(now);
    }
}

/// The grace period we prompted for is still the one in effect.
fn still_open(state: &PresenceState, status: Status, opened_at: NaiveDateTime) -> bool {
    state.status == status && state.exceedance_check_start() == Some(opened_at)
}

fn force_working(state: &mut PresenceState, now: NaiveDateTime) {
    state.clear_exceedance();
    state.status = Status::Working;
    state.clear_timed();
    state.idle_caution = false;
    state.last_activity = now;
    state.refill_work_interval();
}
