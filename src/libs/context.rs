use crate::libs::clock::Clock;
use crate::libs::config::PresenceConfig;
use crate::libs::journal::Journal;
use crate::libs::presence::{PresenceState, SharedPresence};
use crate::libs::prompter::Prompter;
use crate::libs::sampler::ActivitySampler;
use std::sync::Arc;

/// Everything a presence component needs, cheap to clone into each task.
#[derive(Clone)]
pub struct Context {
    pub state: SharedPresence,
    pub config: Arc<PresenceConfig>,
    pub clock: Arc<dyn Clock>,
    pub sampler: Arc<dyn ActivitySampler>,
    pub journal: Arc<Journal>,
    pub prompter: Arc<dyn Prompter>,
}

impl Context {
    /// Builds a context around a fresh Working state anchored at `clock.now()`.
    pub fn new(
        config: PresenceConfig,
        clock: Arc<dyn Clock>,
        sampler: Arc<dyn ActivitySampler>,
        journal: Journal,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let state = SharedPresence::new(PresenceState::new(clock.now(), config.prompt_interval_secs()));
        Self {
            state,
            config: Arc::new(config),
            clock,
            sampler,
            journal: Arc::new(journal),
            prompter,
        }
    }
}
