//! Time source used by every component.
//!
//! Production code reads the local wall clock; tests drive a [`ManualClock`]
//! so that scenarios spanning minutes or hours run instantly.

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock truncated to whole seconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, secs: i64) {
        *self.now.lock() += Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}
