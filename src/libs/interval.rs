use crate::libs::context::Context;
use crate::libs::messages::Message;
use crate::libs::presence::Status;

const PROMPT_DISPLAYED: &str = "Prompt Displayed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalStep {
    /// Not Working, or an exceedance is open.
    Suspended,
    Pending { remaining_secs: i64 },
    Prompted,
}

/// Asks for a fresh status report every `prompt_interval_mins` of Working time.
///
/// Time spent outside Working does not count: the unconsumed remainder is
/// frozen in the presence state when the user leaves Working and resumed when
/// they return.
pub struct WorkIntervalScheduler {
    ctx: Context,
}

impl WorkIntervalScheduler {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn step(&self) -> IntervalStep {
        let now = self.ctx.clock.now();
        let mins = self.ctx.config.prompt_interval_mins;
        {
            let mut state = self.ctx.state.lock();
            if state.status != Status::Working || state.is_exceeded() {
                return IntervalStep::Suspended;
            }
            let remaining = state.interval_remaining(now);
            if remaining > 0 {
                return IntervalStep::Pending { remaining_secs: remaining };
            }
            state.refill_work_interval();
            state.last_activity = now;
            self.ctx
                .journal
                .record(now, Status::Working, PROMPT_DISPLAYED, format!("Scheduled {}m prompt shown.", mins));
        }

        self.ctx.prompter.show(&Message::ScheduledPrompt(mins).to_string());
        IntervalStep::Prompted
    }
}
