mod common;

#[cfg(test)]
mod tests {
    use crate::common::Harness;
    use shiftwatch::libs::arbiter::{Alert, Arbitration, FlagArbiter, BACK_ON_TRACK, BACK_TO_WORK, STILL_ON_BREAK};
    use shiftwatch::libs::context::Context;
    use shiftwatch::libs::presence::{SharedPresence, Status};
    use shiftwatch::libs::prompter::Prompter;
    use std::sync::Arc;
    use test_context::{test_context, TestContext};

    struct ArbiterTestContext {
        harness: Harness,
        arbiter: FlagArbiter,
    }

    impl TestContext for ArbiterTestContext {
        fn setup() -> Self {
            let harness = Harness::new();
            let arbiter = FlagArbiter::new(harness.ctx.clone());
            ArbiterTestContext { harness, arbiter }
        }
    }

    impl ArbiterTestContext {
        /// Puts the user on an overrun break whose grace period opens now.
        fn overrun_break(&self) {
            let now = self.harness.now();
            let mut state = self.harness.ctx.state.lock();
            state.enter_timed(Status::Break, now);
            state.raise_exceedance(now);
        }
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_clear_when_nothing_pending(ctx: &mut ArbiterTestContext) {
        assert_eq!(ctx.arbiter.tick(), Arbitration::Clear);
        assert!(ctx.harness.prompter.questions().is_empty());
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_unanswered_exceedance_logs_one_no_response(ctx: &mut ArbiterTestContext) {
        ctx.overrun_break();

        assert_eq!(ctx.arbiter.tick(), Arbitration::Handled(Alert::Exceedance));
        assert_eq!(ctx.harness.log.count_response("Prompt Ignored/Cancelled"), 1);

        for _ in 0..400 {
            ctx.harness.clock.advance(1);
            ctx.arbiter.tick();
        }

        let log = &ctx.harness.log;
        assert_eq!(log.count_response("No response"), 1);
        let row = log.entries().into_iter().find(|e| e.response == "No response").unwrap();
        assert_eq!(row.status, Status::Idle);

        let state = ctx.harness.state();
        assert_eq!(state.status, Status::Working);
        assert!(!state.is_exceeded());
        assert_eq!(state.timed_status_end, None);
        assert_eq!(state.work_remaining_secs(), 1800);
        // Only the first tick prompted; no movement means no re-prompt.
        assert_eq!(ctx.harness.prompter.questions().len(), 1);
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_back_to_work_with_task(ctx: &mut ArbiterTestContext) {
        ctx.overrun_break();
        ctx.harness.clock.advance(42);
        ctx.harness.prompter.answer(BACK_TO_WORK).answer("  invoice batch ");

        ctx.arbiter.tick();

        let row = ctx.harness.log.last().unwrap();
        assert_eq!(row.status, Status::Working);
        assert_eq!(row.response, "invoice batch");
        assert_eq!(row.remark, "Status resumed. Exceeded time: 0h 0m 42s.");

        let state = ctx.harness.state();
        assert_eq!(state.status, Status::Working);
        assert!(!state.is_exceeded());
        assert_eq!(state.last_activity, ctx.harness.now());
        assert_eq!(ctx.arbiter.tick(), Arbitration::Clear);
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_back_to_work_without_task(ctx: &mut ArbiterTestContext) {
        ctx.overrun_break();
        ctx.harness.prompter.answer(BACK_TO_WORK).dismiss();

        ctx.arbiter.tick();

        let row = ctx.harness.log.last().unwrap();
        assert_eq!(row.response, "No task provided");
        assert!(row.remark.contains("Returned immediately."));
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_still_on_break_restarts_grace_period(ctx: &mut ArbiterTestContext) {
        ctx.overrun_break();
        ctx.harness.clock.advance(20);
        ctx.harness.prompter.answer(STILL_ON_BREAK);

        ctx.arbiter.tick();

        let state = ctx.harness.state();
        assert_eq!(state.status, Status::Break);
        assert_eq!(state.exceedance_check_start(), Some(ctx.harness.now()));
        assert_eq!(ctx.harness.log.count_response("Break Check Confirmed"), 1);

        // No input: no new prompt.
        ctx.harness.clock.advance(20);
        ctx.arbiter.tick();
        assert_eq!(ctx.harness.prompter.questions().len(), 1);

        // Input after the re-prompt gap brings the question back.
        ctx.harness.sampler.nudge();
        ctx.arbiter.tick();
        assert_eq!(ctx.harness.prompter.questions().len(), 2);
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_grace_period_restarts_after_each_answer(ctx: &mut ArbiterTestContext) {
        ctx.overrun_break();
        ctx.harness.clock.advance(250);
        ctx.harness.prompter.answer(STILL_ON_BREAK);
        ctx.arbiter.tick();

        // 250s + 250s is past the original deadline but within the restarted one.
        ctx.harness.clock.advance(250);
        ctx.arbiter.tick();
        assert_eq!(ctx.harness.log.count_response("No response"), 0);

        ctx.harness.clock.advance(50);
        ctx.arbiter.tick();
        assert_eq!(ctx.harness.log.count_response("No response"), 1);
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_idle_exceedance_uses_same_grace_period(ctx: &mut ArbiterTestContext) {
        {
            let now = ctx.harness.now();
            let mut state = ctx.harness.ctx.state.lock();
            state.status = Status::Idle;
            state.raise_exceedance(now);
        }
        ctx.harness.clock.advance(300);
        ctx.arbiter.tick();
        assert_eq!(ctx.harness.log.count_response("No response"), 1);
        assert_eq!(ctx.harness.state().status, Status::Working);
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_idle_caution_confirmed(ctx: &mut ArbiterTestContext) {
        ctx.harness.clock.advance(600);
        ctx.harness.ctx.state.lock().idle_caution = true;
        ctx.harness.prompter.answer(BACK_ON_TRACK);

        assert_eq!(ctx.arbiter.tick(), Arbitration::Handled(Alert::IdleCaution));

        let row = ctx.harness.log.last().unwrap();
        assert_eq!(row.response, "Resumed Work");
        assert_eq!(row.status, Status::Working);
        let state = ctx.harness.state();
        assert!(!state.idle_caution);
        assert_eq!(state.last_activity, ctx.harness.now());
        assert_eq!(state.interval_remaining(ctx.harness.now()), 1200);
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_idle_caution_not_confirmed(ctx: &mut ArbiterTestContext) {
        ctx.harness.ctx.state.lock().idle_caution = true;
        ctx.harness.prompter.dismiss();

        ctx.arbiter.tick();

        let row = ctx.harness.log.last().unwrap();
        assert_eq!(row.response, "Did Not Confirm");
        assert_eq!(row.status, Status::Working);
        assert!(!ctx.harness.state().idle_caution);
    }

    #[test_context(ArbiterTestContext)]
    #[test]
    fn test_exceedance_outranks_idle_caution(ctx: &mut ArbiterTestContext) {
        ctx.overrun_break();
        ctx.harness.ctx.state.lock().idle_caution = true;
        ctx.harness.prompter.answer(STILL_ON_BREAK);
        assert_eq!(ctx.arbiter.tick(), Arbitration::Handled(Alert::Exceedance));
    }

    /// Answers "back to work" but, while the question is open, the user
    /// submits a different status through another path.
    struct InterferingPrompter {
        state: SharedPresence,
    }

    impl Prompter for InterferingPrompter {
        fn request_free_text(&self, _prompt: &str) -> Option<String> {
            Some("late answer".to_string())
        }

        fn request_choice(&self, _prompt: &str, _options: &[&str]) -> Option<String> {
            let mut state = self.state.lock();
            state.clear_exceedance();
            state.status = Status::Lunch;
            Some(BACK_TO_WORK.to_string())
        }

        fn notify(&self, _message: &str) {}
    }

    #[test]
    fn test_stale_answer_is_dropped() {
        let harness = Harness::new();
        let ctx = Context {
            prompter: Arc::new(InterferingPrompter {
                state: harness.ctx.state.clone(),
            }),
            ..harness.ctx.clone()
        };
        let arbiter = FlagArbiter::new(ctx);
        {
            let now = harness.now();
            let mut state = harness.ctx.state.lock();
            state.status = Status::Break;
            state.raise_exceedance(now);
        }

        arbiter.tick();

        assert!(harness.log.is_empty());
        assert_eq!(harness.state().status, Status::Lunch);
    }
}
