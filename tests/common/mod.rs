#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use shiftwatch::libs::clock::{Clock, ManualClock};
use shiftwatch::libs::config::PresenceConfig;
use shiftwatch::libs::context::Context;
use shiftwatch::libs::journal::{Journal, MemoryLog};
use shiftwatch::libs::presence::PresenceState;
use shiftwatch::libs::prompter::ScriptedPrompter;
use shiftwatch::libs::sampler::ManualSampler;
use std::sync::Arc;

pub const EMPLOYEE: &str = "E1001";

pub fn shift_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(9, 0, 0).unwrap()
}

/// A tracker context wired to manual collaborators.
pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub sampler: Arc<ManualSampler>,
    pub log: Arc<MemoryLog>,
    pub prompter: Arc<ScriptedPrompter>,
    pub ctx: Context,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(PresenceConfig::default())
    }

    pub fn with_config(config: PresenceConfig) -> Self {
        Self::with_log(config, Arc::new(MemoryLog::new()))
    }

    pub fn with_log(config: PresenceConfig, log: Arc<MemoryLog>) -> Self {
        let clock = Arc::new(ManualClock::new(shift_start()));
        let sampler = Arc::new(ManualSampler::new());
        let prompter = Arc::new(ScriptedPrompter::new());
        let ctx = Context::new(
            config,
            clock.clone(),
            sampler.clone(),
            Journal::new(EMPLOYEE, log.clone()),
            prompter.clone(),
        );
        Self {
            clock,
            sampler,
            log,
            prompter,
            ctx,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn state(&self) -> PresenceState {
        self.ctx.state.snapshot()
    }
}
