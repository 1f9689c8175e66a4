mod common;

#[cfg(test)]
mod tests {
    use crate::common::shift_start;
    use chrono::Duration;
    use shiftwatch::libs::presence::{timed_end, PresenceState, SharedPresence, Status, UnknownStatus};
    use test_context::{test_context, TestContext};

    struct PresenceTestContext {
        state: PresenceState,
    }

    impl TestContext for PresenceTestContext {
        fn setup() -> Self {
            PresenceTestContext {
                state: PresenceState::new(shift_start(), 1800),
            }
        }
    }

    #[test]
    fn test_status_parse_accepts_console_spellings() {
        assert_eq!("working".parse::<Status>(), Ok(Status::Working));
        assert_eq!("Work".parse::<Status>(), Ok(Status::Working));
        assert_eq!("  BREAK ".parse::<Status>(), Ok(Status::Break));
        assert_eq!("off work".parse::<Status>(), Ok(Status::OffWork));
        assert_eq!("off-work".parse::<Status>(), Ok(Status::OffWork));
        assert_eq!("offwork".parse::<Status>(), Ok(Status::OffWork));
        assert_eq!("Offline".parse::<Status>(), Ok(Status::Offline));
        assert_eq!("coffee".parse::<Status>(), Err(UnknownStatus("coffee".to_string())));
    }

    #[test]
    fn test_status_display_matches_log_spelling() {
        for status in Status::SELECTABLE {
            assert_eq!(status.to_string().parse::<Status>(), Ok(status));
        }
        assert_eq!(Status::OffWork.to_string(), "Off work");
        assert!(!Status::SELECTABLE.contains(&Status::Idle));
    }

    #[test]
    fn test_status_classification() {
        assert!(Status::Break.is_timed());
        assert!(Status::Personal.is_timed());
        assert!(!Status::Working.is_timed());
        assert!(!Status::OffWork.is_timed());

        assert!(Status::Offline.is_resting());
        assert!(Status::Idle.is_resting());
        assert!(!Status::Working.is_resting());
        assert!(!Status::Lunch.is_resting());
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_new_state_is_working_with_full_interval(ctx: &mut PresenceTestContext) {
        let state = &ctx.state;
        assert_eq!(state.status, Status::Working);
        assert_eq!(state.work_remaining_secs(), 1800);
        assert!(!state.is_exceeded());
        assert!(!state.idle_caution);
        assert_eq!(state.interval_remaining(shift_start()), 1800);
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_work_remaining_is_clamped(ctx: &mut PresenceTestContext) {
        ctx.state.set_work_remaining(5000);
        assert_eq!(ctx.state.work_remaining_secs(), 1800);
        ctx.state.set_work_remaining(-20);
        assert_eq!(ctx.state.work_remaining_secs(), 0);
        ctx.state.set_work_remaining(700);
        assert_eq!(ctx.state.work_remaining_secs(), 700);
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_pause_freezes_unconsumed_interval(ctx: &mut PresenceTestContext) {
        let paused_at = shift_start() + Duration::seconds(600);
        ctx.state.pause_work_interval(paused_at);
        assert_eq!(ctx.state.work_remaining_secs(), 1200);

        // Long after the interval would have run out, pausing never goes negative.
        ctx.state.last_activity = paused_at;
        ctx.state.pause_work_interval(paused_at + Duration::hours(3));
        assert_eq!(ctx.state.work_remaining_secs(), 0);
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_exhausted_remainder_counts_as_full_interval(ctx: &mut PresenceTestContext) {
        ctx.state.set_work_remaining(0);
        assert_eq!(ctx.state.interval_remaining(shift_start()), 1800);
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_rebase_keeps_prompt_deadline(ctx: &mut PresenceTestContext) {
        let now = shift_start() + Duration::seconds(700);
        let before = ctx.state.interval_remaining(now);
        ctx.state.rebase_activity(now);
        assert_eq!(ctx.state.last_activity, now);
        assert_eq!(ctx.state.interval_remaining(now), before);
        assert_eq!(ctx.state.elapsed_since_activity(now), 0);
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_exceedance_flag_and_start_move_together(ctx: &mut PresenceTestContext) {
        let opened = shift_start() + Duration::seconds(10);
        ctx.state.raise_exceedance(opened);
        assert!(ctx.state.is_exceeded());
        assert_eq!(ctx.state.exceedance_check_start(), Some(opened));
        assert!(!ctx.state.exceedance_prompted());

        // A second raise keeps the original start.
        ctx.state.raise_exceedance(opened + Duration::seconds(50));
        assert_eq!(ctx.state.exceedance_check_start(), Some(opened));

        ctx.state.mark_exceedance_prompted();
        ctx.state.rearm_exceedance(opened + Duration::seconds(90));
        assert_eq!(ctx.state.exceedance_check_start(), Some(opened + Duration::seconds(90)));
        assert!(ctx.state.exceedance_prompted());

        ctx.state.clear_exceedance();
        assert!(!ctx.state.is_exceeded());
        assert_eq!(ctx.state.exceedance_check_start(), None);
        assert!(!ctx.state.exceedance_prompted());
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_rearm_without_open_exceedance_does_nothing(ctx: &mut PresenceTestContext) {
        ctx.state.rearm_exceedance(shift_start());
        assert!(!ctx.state.is_exceeded());
    }

    #[test_context(PresenceTestContext)]
    #[test]
    fn test_enter_timed_bumps_generation(ctx: &mut PresenceTestContext) {
        let end = timed_end(shift_start(), 15).unwrap();
        let first = ctx.state.enter_timed(Status::Break, end);
        assert_eq!(ctx.state.status, Status::Break);
        assert_eq!(ctx.state.timed_status_end, Some(shift_start() + Duration::minutes(15)));
        assert!(ctx.state.is_timed_monitor_live(Status::Break, first));

        let second = ctx.state.enter_timed(Status::Break, end);
        assert_ne!(first, second);
        assert!(!ctx.state.is_timed_monitor_live(Status::Break, first));
        assert!(ctx.state.is_timed_monitor_live(Status::Break, second));

        ctx.state.status = Status::Working;
        assert!(!ctx.state.is_timed_monitor_live(Status::Break, second));
    }

    #[test]
    fn test_timed_end_rejects_unschedulable_durations() {
        assert_eq!(timed_end(shift_start(), 45), Some(shift_start() + Duration::minutes(45)));
        assert_eq!(timed_end(shift_start(), 0), None);
        assert_eq!(timed_end(shift_start(), -5), None);
        assert_eq!(timed_end(shift_start(), 1_000_000_000_000), None);
        assert_eq!(timed_end(shift_start(), i64::MAX), None);
    }

    #[test]
    fn test_shared_presence_snapshot_is_detached() {
        let shared = SharedPresence::new(PresenceState::new(shift_start(), 900));
        let snapshot = shared.snapshot();
        shared.lock().status = Status::Lunch;
        assert_eq!(snapshot.status, Status::Working);
        assert_eq!(shared.snapshot().status, Status::Lunch);
    }
}
