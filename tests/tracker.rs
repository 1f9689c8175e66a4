mod common;

#[cfg(test)]
mod tests {
    use crate::common::{shift_start, Harness, EMPLOYEE};
    use shiftwatch::libs::arbiter::{Alert, Arbitration};
    use shiftwatch::libs::command::ConsoleCommand;
    use shiftwatch::libs::config::PresenceConfig;
    use shiftwatch::libs::interval::IntervalStep;
    use shiftwatch::libs::journal::{ActivityEntry, ActivityLog, MemoryLog};
    use shiftwatch::libs::presence::Status;
    use shiftwatch::libs::tracker::{CommandOutcome, Recovery, Tick, Tracker};
    use std::sync::Arc;
    use test_context::{test_context, TestContext};

    struct TrackerTestContext {
        harness: Harness,
        tracker: Tracker,
    }

    impl TestContext for TrackerTestContext {
        fn setup() -> Self {
            let harness = Harness::new();
            let tracker = Tracker::new(harness.ctx.clone());
            TrackerTestContext { harness, tracker }
        }
    }

    fn log_ending_with(status: Status) -> Arc<MemoryLog> {
        let log = Arc::new(MemoryLog::new());
        log.append(&ActivityEntry {
            timestamp: shift_start() - chrono::Duration::hours(16),
            employee_id: EMPLOYEE.to_string(),
            status,
            response: "previous session".to_string(),
            remark: String::new(),
        })
        .unwrap();
        log
    }

    #[test]
    fn test_recover_after_crash_logs_unexpected_exit() {
        let harness = Harness::with_log(PresenceConfig::default(), log_ending_with(Status::Meeting));
        let tracker = Tracker::new(harness.ctx.clone());

        assert_eq!(tracker.recover(), Recovery::UnexpectedExit(Status::Meeting));

        assert_eq!(harness.log.len(), 2);
        let row = harness.log.last().unwrap();
        assert_eq!(row.status, Status::Idle);
        assert_eq!(row.response, "Unexpected System Exit");
        assert!(row.remark.contains("Previous status: Meeting"));
        assert_eq!(harness.log.count_response("Startup"), 0);
        assert_eq!(harness.state().status, Status::Working);
    }

    #[test]
    fn test_recover_after_offline_is_clean() {
        let harness = Harness::with_log(PresenceConfig::default(), log_ending_with(Status::Offline));
        let tracker = Tracker::new(harness.ctx.clone());

        assert_eq!(tracker.recover(), Recovery::CleanStart);
        let row = harness.log.last().unwrap();
        assert_eq!(row.status, Status::Working);
        assert_eq!(row.response, "Startup");
        assert!(row.remark.contains(EMPLOYEE));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_recover_with_empty_log_is_clean(ctx: &mut TrackerTestContext) {
        assert_eq!(ctx.tracker.recover(), Recovery::CleanStart);
        assert_eq!(ctx.harness.log.len(), 1);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_recover_resets_state(ctx: &mut TrackerTestContext) {
        {
            let mut state = ctx.harness.ctx.state.lock();
            state.status = Status::Lunch;
            state.idle_caution = true;
        }
        ctx.harness.clock.advance(100);
        ctx.tracker.recover();
        let state = ctx.harness.state();
        assert_eq!(state.status, Status::Working);
        assert!(!state.idle_caution);
        assert_eq!(state.last_activity, ctx.harness.now());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_tick_arbitrates_before_scheduling(ctx: &mut TrackerTestContext) {
        ctx.harness.clock.advance(1800);
        {
            let now = ctx.harness.now();
            let mut state = ctx.harness.ctx.state.lock();
            state.status = Status::Idle;
            state.raise_exceedance(now);
        }

        assert_eq!(ctx.tracker.tick(), Tick::Arbitrated(Arbitration::Handled(Alert::Exceedance)));
        assert_eq!(ctx.harness.log.count_response("Prompt Displayed"), 0);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_tick_runs_scheduler_when_clear(ctx: &mut TrackerTestContext) {
        assert_eq!(ctx.tracker.tick(), Tick::Interval(IntervalStep::Pending { remaining_secs: 1800 }));
        ctx.harness.clock.advance(1800);
        assert_eq!(ctx.tracker.tick(), Tick::Interval(IntervalStep::Prompted));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_handle_timed_status_starts_monitor(ctx: &mut TrackerTestContext) {
        let outcome = ctx.tracker.handle(ConsoleCommand::Submit {
            status: Status::Break,
            response: String::new(),
        });
        match outcome {
            CommandOutcome::Started(monitor) => assert_eq!(monitor.target(), Status::Break),
            _ => panic!("break did not start a monitor"),
        }
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_handle_back_to_work_asks_for_task(ctx: &mut TrackerTestContext) {
        ctx.harness.ctx.state.lock().status = Status::Break;
        ctx.harness.prompter.answer("monthly report");

        assert!(matches!(ctx.tracker.handle(ConsoleCommand::BackToWork(None)), CommandOutcome::Continue));
        let row = ctx.harness.log.last().unwrap();
        assert_eq!(row.status, Status::Working);
        assert_eq!(row.response, "monthly report");
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_handle_rejection_continues(ctx: &mut TrackerTestContext) {
        let outcome = ctx.tracker.handle(ConsoleCommand::Submit {
            status: Status::Working,
            response: String::new(),
        });
        assert!(matches!(outcome, CommandOutcome::Continue));
        assert!(ctx.harness.log.is_empty());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_handle_informational_commands(ctx: &mut TrackerTestContext) {
        for command in [
            ConsoleCommand::Remaining,
            ConsoleCommand::Status,
            ConsoleCommand::Help,
            ConsoleCommand::Empty,
            ConsoleCommand::Unknown("dance".to_string()),
        ] {
            assert!(matches!(ctx.tracker.handle(command), CommandOutcome::Continue));
        }
        assert!(ctx.harness.log.is_empty());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_status_line_reflects_state(ctx: &mut TrackerTestContext) {
        ctx.harness.clock.advance(60);
        assert_eq!(ctx.tracker.status_line(), "Current Status: On Work | 29:00 until prompt");
    }

    #[tokio::test]
    async fn test_run_stops_on_offline() {
        let harness = Harness::new();
        let tracker = Tracker::new(harness.ctx.clone());
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(ConsoleCommand::Submit {
            status: Status::Offline,
            response: String::new(),
        })
        .unwrap();

        tracker.run(rx).await.unwrap();

        let row = harness.log.last().unwrap();
        assert_eq!(row.status, Status::Offline);
        assert_eq!(harness.state().status, Status::Offline);
    }
}
