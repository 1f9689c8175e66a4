//! The single source of truth for what the user is doing right now.
//!
//! [`PresenceState`] is owned by a [`SharedPresence`] handle and mutated only
//! while its lock is held. Every component (idle monitor, timed-status
//! monitors, the arbiter, the interval scheduler and the submission path)
//! performs its check-and-transition inside one critical section, so no
//! component can act on a status that another component has already left.
//!
//! The exceedance pair (exceeded flag and check start) is stored as a single
//! `Option`, which makes it impossible to observe one without the other.

use chrono::NaiveDateTime;
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Working,
    Break,
    Lunch,
    Meeting,
    Personal,
    Idle,
    #[serde(rename = "Off work")]
    OffWork,
    Offline,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl Status {
    /// Statuses the user may pick. `Idle` is only ever entered by the tracker.
    pub const SELECTABLE: [Status; 7] = [
        Status::Working,
        Status::Lunch,
        Status::Meeting,
        Status::Personal,
        Status::Break,
        Status::Offline,
        Status::OffWork,
    ];

    /// Statuses whose duration is limited and watched by a timed monitor.
    pub fn is_timed(self) -> bool {
        matches!(self, Status::Break | Status::Lunch | Status::Meeting | Status::Personal)
    }

    /// Whether the previous session may legitimately have ended in this status.
    ///
    /// Any other last status means the process died without logging off.
    pub fn is_resting(self) -> bool {
        matches!(self, Status::Offline | Status::OffWork | Status::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Working => "Working",
            Status::Break => "Break",
            Status::Lunch => "Lunch",
            Status::Meeting => "Meeting",
            Status::Personal => "Personal",
            Status::Idle => "Idle",
            Status::OffWork => "Off work",
            Status::Offline => "Offline",
        }
    }

    /// Human label used by the status line.
    pub fn label(self) -> &'static str {
        match self {
            Status::Working => "On Work",
            Status::Break => "On Break",
            Status::Lunch => "On Lunch",
            Status::Meeting => "In Meeting",
            Status::Personal => "On Personal Time",
            Status::Idle => "Idle (No Activity)",
            Status::OffWork => "Off Work (Tracking 8h Limit)",
            Status::Offline => "Offline",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "working" | "work" => Ok(Status::Working),
            "break" => Ok(Status::Break),
            "lunch" => Ok(Status::Lunch),
            "meeting" => Ok(Status::Meeting),
            "personal" => Ok(Status::Personal),
            "idle" => Ok(Status::Idle),
            "off work" | "offwork" => Ok(Status::OffWork),
            "offline" => Ok(Status::Offline),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresenceState {
    pub status: Status,
    /// Anchor of the current work interval and of idle measurement.
    pub last_activity: NaiveDateTime,
    pub timed_status_end: Option<NaiveDateTime>,
    /// Set while an idle caution has been raised and not yet resolved.
    pub idle_caution: bool,
    /// Bumped on every timed-status entry; a monitor whose generation no
    /// longer matches stops without logging.
    pub timed_generation: u64,
    pub off_work_since: Option<NaiveDateTime>,
    work_remaining_secs: i64,
    interval_secs: i64,
    exceedance_check_start: Option<NaiveDateTime>,
    exceedance_prompted: bool,
}

impl PresenceState {
    /// Fresh state for a session starting at `now`: Working with a full interval.
    pub fn new(now: NaiveDateTime, interval_secs: i64) -> Self {
        Self {
            status: Status::Working,
            last_activity: now,
            timed_status_end: None,
            idle_caution: false,
            timed_generation: 0,
            off_work_since: None,
            work_remaining_secs: interval_secs,
            interval_secs,
            exceedance_check_start: None,
            exceedance_prompted: false,
        }
    }

    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }

    pub fn work_remaining_secs(&self) -> i64 {
        self.work_remaining_secs
    }

    /// Stores a paused remainder, clamped to `[0, interval]`.
    pub fn set_work_remaining(&mut self, secs: i64) {
        self.work_remaining_secs = secs.clamp(0, self.interval_secs);
    }

    pub fn refill_work_interval(&mut self) {
        self.work_remaining_secs = self.interval_secs;
    }

    pub fn elapsed_since_activity(&self, now: NaiveDateTime) -> i64 {
        (now - self.last_activity).num_seconds()
    }

    /// Seconds until the next scheduled prompt. Zero or less means it is due.
    pub fn interval_remaining(&self, now: NaiveDateTime) -> i64 {
        let budget = if self.work_remaining_secs > 0 {
            self.work_remaining_secs
        } else {
            self.interval_secs
        };
        budget - self.elapsed_since_activity(now)
    }

    /// Freezes the unconsumed part of the interval when leaving Working.
    pub fn pause_work_interval(&mut self, now: NaiveDateTime) {
        let remaining = self.interval_remaining(now).max(0);
        self.set_work_remaining(remaining);
    }

    /// Moves the activity anchor to `now` without shifting the prompt deadline.
    pub fn rebase_activity(&mut self, now: NaiveDateTime) {
        let remaining = self.interval_remaining(now);
        if remaining > 0 {
            self.set_work_remaining(remaining);
        } else {
            self.refill_work_interval();
        }
        self.last_activity = now;
    }

    pub fn is_exceeded(&self) -> bool {
        self.exceedance_check_start.is_some()
    }

    pub fn exceedance_check_start(&self) -> Option<NaiveDateTime> {
        self.exceedance_check_start
    }

    pub fn exceedance_prompted(&self) -> bool {
        self.exceedance_prompted
    }

    pub fn mark_exceedance_prompted(&mut self) {
        self.exceedance_prompted = true;
    }

    /// Opens a grace period. A second call while one is open keeps the original start.
    pub fn raise_exceedance(&mut self, now: NaiveDateTime) {
        if self.exceedance_check_start.is_none() {
            self.exceedance_check_start = Some(now);
            self.exceedance_prompted = false;
        }
    }

    /// Restarts the response clock of an open grace period.
    pub fn rearm_exceedance(&mut self, now: NaiveDateTime) {
        if self.exceedance_check_start.is_some() {
            self.exceedance_check_start = Some(now);
        }
    }

    pub fn clear_exceedance(&mut self) {
        self.exceedance_check_start = None;
        self.exceedance_prompted = false;
    }

    /// Enters a timed status ending at `end` and returns the generation its
    /// monitor must carry.
    pub fn enter_timed(&mut self, status: Status, end: NaiveDateTime) -> u64 {
        self.status = status;
        self.timed_status_end = Some(end);
        self.timed_generation += 1;
        self.timed_generation
    }

    pub fn clear_timed(&mut self) {
        self.timed_status_end = None;
    }

    /// True while a timed monitor for `target` started at `generation` should keep running.
    pub fn is_timed_monitor_live(&self, target: Status, generation: u64) -> bool {
        self.status == target && self.timed_generation == generation
    }
}

/// End of a timed status entered at `start`.
///
/// `None` when `minutes` is not positive or the end falls outside the
/// calendar range.
pub fn timed_end(start: NaiveDateTime, minutes: i64) -> Option<NaiveDateTime> {
    if minutes <= 0 {
        return None;
    }
    chrono::Duration::try_minutes(minutes).and_then(|d| start.checked_add_signed(d))
}

/// Cloneable handle to the one shared [`PresenceState`].
#[derive(Debug, Clone)]
pub struct SharedPresence(Arc<Mutex<PresenceState>>);

impl SharedPresence {
    pub fn new(state: PresenceState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    pub fn lock(&self) -> MutexGuard<'_, PresenceState> {
        self.0.lock()
    }

    /// Copy of the current state, for readers that must not hold the lock.
    pub fn snapshot(&self) -> PresenceState {
        self.0.lock().clone()
    }
}
