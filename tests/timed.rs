mod common;

#[cfg(test)]
mod tests {
    use crate::common::Harness;
    use shiftwatch::libs::presence::Status;
    use shiftwatch::libs::submission::{SubmissionHandler, SubmissionOutcome};
    use shiftwatch::libs::timed::{TimedStatusMonitor, TimedStep};
    use test_context::{test_context, TestContext};

    struct TimedTestContext {
        harness: Harness,
        submissions: SubmissionHandler,
    }

    impl TestContext for TimedTestContext {
        fn setup() -> Self {
            let harness = Harness::new();
            let submissions = SubmissionHandler::new(harness.ctx.clone());
            TimedTestContext { harness, submissions }
        }
    }

    impl TimedTestContext {
        fn start(&self, status: Status) -> TimedStatusMonitor {
            match self.submissions.submit(status, "") {
                SubmissionOutcome::Applied { monitor: Some(monitor), .. } => monitor,
                _ => panic!("{} did not start a timed monitor", status),
            }
        }
    }

    #[test_context(TimedTestContext)]
    #[test]
    fn test_counts_down_until_allowance_ends(ctx: &mut TimedTestContext) {
        let mut monitor = ctx.start(Status::Break);
        assert_eq!(monitor.target(), Status::Break);
        assert_eq!(monitor.step(), TimedStep::Counting { remaining_secs: 900 });
        ctx.harness.clock.advance(899);
        assert_eq!(monitor.step(), TimedStep::Counting { remaining_secs: 1 });
        assert_eq!(ctx.harness.log.len(), 1);
        assert!(!ctx.harness.state().is_exceeded());
    }

    #[test_context(TimedTestContext)]
    #[test]
    fn test_break_overrun_is_logged_and_repeated(ctx: &mut TimedTestContext) {
        let mut monitor = ctx.start(Status::Break);
        ctx.harness.clock.advance(900);
        assert_eq!(monitor.step(), TimedStep::Exceeded);

        let row = ctx.harness.log.last().unwrap();
        assert_eq!(row.status, Status::Break);
        assert_eq!(row.response, "Exceeded Break duration of 15m");
        let state = ctx.harness.state();
        assert!(state.is_exceeded());
        assert_eq!(state.exceedance_check_start(), Some(ctx.harness.now()));
        assert_eq!(state.status, Status::Break);

        ctx.harness.clock.advance(599);
        assert_eq!(monitor.step(), TimedStep::Overrun { over_secs: 599 });
        assert_eq!(ctx.harness.log.count_response("STILL Exceeded Break"), 0);

        ctx.harness.clock.advance(1);
        monitor.step();
        assert_eq!(ctx.harness.log.count_response("STILL Exceeded Break"), 1);

        ctx.harness.clock.advance(600);
        monitor.step();
        assert_eq!(ctx.harness.log.count_response("STILL Exceeded Break"), 2);
    }

    #[test_context(TimedTestContext)]
    #[test]
    fn test_status_change_ends_monitor_without_rows(ctx: &mut TimedTestContext) {
        let mut monitor = ctx.start(Status::Lunch);
        ctx.harness.clock.advance(60);
        ctx.harness.ctx.state.lock().status = Status::Working;
        let rows = ctx.harness.log.len();

        ctx.harness.clock.advance(3600);
        assert_eq!(monitor.step(), TimedStep::Finished);
        assert!(monitor.is_finished());
        // Finished is terminal even if the status comes back.
        ctx.harness.ctx.state.lock().status = Status::Lunch;
        assert_eq!(monitor.step(), TimedStep::Finished);
        assert_eq!(ctx.harness.log.len(), rows);
    }

    #[test_context(TimedTestContext)]
    #[test]
    fn test_reentering_status_retires_old_monitor(ctx: &mut TimedTestContext) {
        let mut first = ctx.start(Status::Break);
        ctx.harness.clock.advance(300);
        let mut second = ctx.start(Status::Break);

        ctx.harness.clock.advance(700);
        assert_eq!(first.step(), TimedStep::Finished);
        assert_eq!(second.step(), TimedStep::Counting { remaining_secs: 200 });
        assert_eq!(ctx.harness.log.count_response("Exceeded Break duration of 15m"), 0);
    }

    #[test_context(TimedTestContext)]
    #[test]
    fn test_reminder_after_buffer(ctx: &mut TimedTestContext) {
        let mut monitor = ctx.start(Status::Break);
        ctx.harness.clock.advance(900);
        monitor.step();
        assert!(ctx.harness.prompter.shown().is_empty());

        for _ in 0..3 {
            ctx.harness.clock.advance(600);
            monitor.step();
        }
        assert_eq!(ctx.harness.prompter.shown().len(), 1);

        // At most one reminder per log interval.
        ctx.harness.clock.advance(10);
        monitor.step();
        assert_eq!(ctx.harness.prompter.shown().len(), 1);
        ctx.harness.clock.advance(600);
        monitor.step();
        assert_eq!(ctx.harness.prompter.shown().len(), 2);
    }

    #[test_context(TimedTestContext)]
    #[test]
    fn test_reminder_waits_for_open_prompt(ctx: &mut TimedTestContext) {
        let mut monitor = ctx.start(Status::Break);
        ctx.harness.clock.advance(900);
        monitor.step();

        ctx.harness.prompter.set_showing_prompt(true);
        ctx.harness.clock.advance(1800);
        monitor.step();
        assert!(ctx.harness.prompter.shown().is_empty());

        ctx.harness.prompter.set_showing_prompt(false);
        ctx.harness.clock.advance(10);
        monitor.step();
        assert_eq!(ctx.harness.prompter.shown().len(), 1);
    }

    #[test_context(TimedTestContext)]
    #[test]
    fn test_return_with_reason_after_overrun(ctx: &mut TimedTestContext) {
        let mut monitor = ctx.start(Status::Break);
        ctx.harness.clock.advance(900);
        monitor.step();
        ctx.harness.clock.advance(600);
        monitor.step();
        let rows = ctx.harness.log.len();

        ctx.harness.prompter.answer("queue at the canteen");
        let outcome = ctx.submissions.submit(Status::Working, "reviewing tickets");
        assert_eq!(outcome.status(), Some(Status::Working));
        assert_eq!(ctx.harness.log.len(), rows + 1);

        ctx.harness.clock.advance(600);
        assert_eq!(monitor.step(), TimedStep::Finished);
        assert_eq!(ctx.harness.log.len(), rows + 1);
        assert!(!ctx.harness.state().is_exceeded());
    }
}
