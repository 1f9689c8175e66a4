use crate::libs::config::PresenceConfig;
use crate::libs::formatter::{format_hms, format_mmss};
use crate::libs::messages::Message;
use crate::libs::presence::{PresenceState, Status};
use chrono::NaiveDateTime;

/// What the countdown next to the status label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    UntilPrompt(i64),
    Remaining(i64),
    ExceededBy(i64),
    OffWork { elapsed: i64, limit: i64 },
    None,
}

impl Countdown {
    pub fn of(state: &PresenceState, now: NaiveDateTime, config: &PresenceConfig) -> Self {
        if let Some(since) = state.off_work_since.filter(|_| state.status == Status::OffWork) {
            return Countdown::OffWork {
                elapsed: (now - since).num_seconds(),
                limit: config.off_work_limit_secs(),
            };
        }
        if state.is_exceeded() {
            let over = match state.timed_status_end {
                Some(end) if state.status.is_timed() => (now - end).num_seconds(),
                _ => state.elapsed_since_activity(now),
            };
            return Countdown::ExceededBy(over);
        }
        match (state.status, state.timed_status_end) {
            (Status::Working, _) => Countdown::UntilPrompt(state.interval_remaining(now).max(0)),
            (status, Some(end)) if status.is_timed() => Countdown::Remaining((end - now).num_seconds().max(0)),
            _ => Countdown::None,
        }
    }

    pub fn render(&self) -> String {
        match *self {
            Countdown::UntilPrompt(secs) => format!("{} until prompt", format_mmss(secs)),
            Countdown::Remaining(secs) => format!("{} remaining", format_mmss(secs)),
            Countdown::ExceededBy(secs) => format!("Exceeded by: {}", format_hms(secs)),
            Countdown::OffWork { elapsed, limit } if elapsed >= limit => format!("LIMIT EXCEEDED: {}", format_hms(elapsed)),
            Countdown::OffWork { elapsed, limit } => format!("{} of {}h", format_hms(elapsed), limit / 3600),
            Countdown::None => String::new(),
        }
    }
}

/// One-line summary: label plus countdown.
pub fn status_line(state: &PresenceState, now: NaiveDateTime, config: &PresenceConfig) -> String {
    let countdown = Countdown::of(state, now, config).render();
    let label = if state.is_exceeded() {
        format!("{} (EXCEEDED)", state.status.label())
    } else {
        state.status.label().to_string()
    };
    if countdown.is_empty() {
        format!("Current Status: {}", label)
    } else {
        format!("Current Status: {} | {}", label, countdown)
    }
}

/// Answer to "how many minutes left?".
pub fn remaining_report(state: &PresenceState, now: NaiveDateTime, config: &PresenceConfig) -> Message {
    match Countdown::of(state, now, config) {
        Countdown::UntilPrompt(secs) => Message::UntilNextPrompt(secs / 60, secs % 60),
        Countdown::Remaining(secs) => Message::TimeRemaining(state.status, secs / 60, secs % 60),
        Countdown::ExceededBy(secs) => Message::ExceededBy(state.status, secs / 60),
        Countdown::OffWork { elapsed, limit } => Message::OffWorkElapsed(elapsed / 3600, (elapsed % 3600) / 60, limit / 3600),
        Countdown::None => Message::NoActiveTimer(state.status),
    }
}
