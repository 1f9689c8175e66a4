//! Applies a user-requested status change.
//!
//! All questions (exceedance reason, empty-reason notice, duration) are asked
//! before the presence lock is taken. The change itself is then applied in a
//! single critical section and produces exactly one journal row, so a
//! submission either happens completely or not at all.
//!
//! Starting the timed monitor is left to the caller: an applied timed status
//! comes back with its [`TimedStatusMonitor`] ready to be spawned.

use crate::libs::context::Context;
use crate::libs::messages::Message;
use crate::libs::presence::{timed_end, Status};
use crate::libs::prompter::confirm;
use crate::libs::timed::TimedStatusMonitor;
use thiserror::Error;

const NO_REASON: &str = "(no reason)";
const NO_REASON_ACCEPTED: &str = "(No Reason Entered - User Accepted Warning)";
const NO_REASON_NOTICE_REMARK: &str = "NO REASON ENTERED - Manager/HR notification intimated.";
const DURATION_FALLBACK_REMARK: &str = "Duration not specified, defaulting to Working status.";
const SHUTTING_DOWN: &str = "Shutting Down";
const LOGGED_OFF_REMARK: &str = "User manually logged off.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{0} cannot be selected manually")]
    NotSelectable(Status),
    #[error("a task or activity is required to set Working")]
    MissingTask,
    #[error("a reason is required to leave an exceeded {0} period")]
    MissingExceedanceReason(Status),
    #[error("the manager/HR notice for an empty {0} reason was declined")]
    NoticeDeclined(Status),
}

pub enum SubmissionOutcome {
    Applied {
        status: Status,
        monitor: Option<TimedStatusMonitor>,
    },
    Rejected(SubmissionError),
    /// Offline was logged; the tracker must stop.
    Shutdown,
}

impl SubmissionOutcome {
    pub fn status(&self) -> Option<Status> {
        match self {
            SubmissionOutcome::Applied { status, .. } => Some(*status),
            SubmissionOutcome::Shutdown => Some(Status::Offline),
            SubmissionOutcome::Rejected(_) => None,
        }
    }
}

pub struct SubmissionHandler {
    ctx: Context,
}

impl SubmissionHandler {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn submit(&self, target: Status, response: &str) -> SubmissionOutcome {
        match self.try_submit(target, response) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(status = %target, error = %e, "submission rejected");
                SubmissionOutcome::Rejected(e)
            }
        }
    }

    fn try_submit(&self, target: Status, response: &str) -> Result<SubmissionOutcome, SubmissionError> {
        let prompter = &self.ctx.prompter;
        let config = &self.ctx.config;
        let mut response = response.trim().to_string();

        if !Status::SELECTABLE.contains(&target) {
            return Err(SubmissionError::NotSelectable(target));
        }
        if target == Status::Working && response.is_empty() {
            prompter.notify(&Message::TaskRequired.to_string());
            return Err(SubmissionError::MissingTask);
        }

        let mut notice_remark = None;
        if matches!(target, Status::Meeting | Status::Personal) && response.is_empty() {
            if !confirm(prompter.as_ref(), &Message::EmptyReasonNotice(target).to_string()) {
                prompter.show(&Message::EnterReasonOrPickAnother.to_string());
                return Err(SubmissionError::NoticeDeclined(target));
            }
            response = NO_REASON_ACCEPTED.to_string();
            notice_remark = Some(NO_REASON_NOTICE_REMARK);
        }

        let exceeded_from = {
            let state = self.ctx.state.lock();
            (target == Status::Working && state.is_exceeded()).then_some(state.status)
        };
        let reason = match exceeded_from {
            Some(from) => Some(self.ask_exceedance_reason(from)?),
            None => None,
        };

        let duration_mins = match target {
            Status::Break => Some(i64::try_from(config.break_duration_mins).unwrap_or(0)),
            Status::Lunch => Some(i64::try_from(config.lunch_duration_mins).unwrap_or(0)),
            Status::Meeting | Status::Personal => Some(self.ask_duration(target)),
            _ => None,
        };

        let now = self.ctx.clock.now();
        let mut state = self.ctx.state.lock();

        // An exceedance may have opened while the questions above were on screen.
        if target == Status::Working && reason.is_none() && state.is_exceeded() {
            let from = state.status;
            drop(state);
            prompter.show(&Message::ReasonRequiredToProceed(from).to_string());
            return Err(SubmissionError::MissingExceedanceReason(from));
        }

        let previous = state.status;
        let mut remarks: Vec<String> = Vec::new();
        if let Some(reason) = &reason {
            let what = if previous == Status::Idle { "Idle/Inactivity" } else { previous.as_str() };
            remarks.push(format!("Exceedance/Inactivity resolved ({}): Back to Working. Reason: {}", what, reason));
        }

        let mut final_status = target;
        let mut monitor = None;
        let mut paused = false;

        match target {
            Status::Working => {
                if previous == Status::Working || reason.is_some() || state.work_remaining_secs() <= 0 {
                    state.refill_work_interval();
                }
                state.clear_timed();
            }
            Status::Offline => {
                state.status = Status::Offline;
                state.clear_timed();
                state.clear_exceedance();
                state.idle_caution = false;
                state.off_work_since = None;
                let response = if response.is_empty() { SHUTTING_DOWN.to_string() } else { response };
                self.ctx.journal.record(now, Status::Offline, response, LOGGED_OFF_REMARK);
                drop(state);
                prompter.notify(&Message::OfflineShuttingDown.to_string());
                return Ok(SubmissionOutcome::Shutdown);
            }
            status => {
                let end = duration_mins.and_then(|mins| timed_end(now, mins));
                let degraded = duration_mins.is_some() && end.is_none();
                if previous == Status::Working && !degraded {
                    state.pause_work_interval(now);
                    paused = true;
                    remarks.push(format!(
                        "Work interval paused. {}m remaining for next prompt.",
                        state.work_remaining_secs() / 60
                    ));
                }
                match (duration_mins, end) {
                    (Some(mins), Some(end)) => {
                        let generation = state.enter_timed(status, end);
                        monitor = Some(TimedStatusMonitor::new(self.ctx.clone(), status, mins, end, generation));
                        remarks.push(format!("Started for {} minutes.", mins));
                    }
                    (Some(_), None) => {
                        final_status = Status::Working;
                        state.clear_timed();
                        state.refill_work_interval();
                        remarks.push(DURATION_FALLBACK_REMARK.to_string());
                    }
                    (None, _) => {
                        state.clear_timed();
                        remarks.push(Message::OffWorkRemark(config.off_work_limit_hours).to_string());
                    }
                }
            }
        }

        if let Some(notice) = notice_remark {
            remarks.push(notice.to_string());
        }

        state.status = final_status;
        state.off_work_since = match final_status {
            Status::OffWork => state.off_work_since.or(Some(now)),
            _ => None,
        };
        // A paused interval keeps its anchor until the user is back on Working.
        if !paused {
            state.last_activity = now;
        }
        state.idle_caution = false;
        state.clear_exceedance();

        let response = if response.is_empty() { NO_REASON.to_string() } else { response };
        self.ctx.journal.record(now, target, response, remarks.join(" | "));
        drop(state);

        if final_status != target {
            prompter.notify(&Message::DurationFallback(target).to_string());
        } else {
            prompter.notify(&Message::StatusSet(final_status).to_string());
        }
        Ok(SubmissionOutcome::Applied {
            status: final_status,
            monitor,
        })
    }

    fn ask_exceedance_reason(&self, from: Status) -> Result<String, SubmissionError> {
        let prompter = &self.ctx.prompter;
        let reason = prompter
            .request_free_text(&Message::ExceedanceReasonQuestion(from).to_string())
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        match reason {
            Some(reason) => Ok(reason),
            None => {
                prompter.notify(&Message::ReasonMandatory.to_string());
                prompter.show(&Message::ReasonRequiredToProceed(from).to_string());
                Err(SubmissionError::MissingExceedanceReason(from))
            }
        }
    }

    /// Blank, non-numeric and negative answers all mean "no duration", as do
    /// durations too long to schedule.
    fn ask_duration(&self, status: Status) -> i64 {
        self.ctx
            .prompter
            .request_free_text(&Message::DurationQuestion(status).to_string())
            .and_then(|answer| answer.trim().parse::<i64>().ok())
            .map_or(0, |mins| mins.max(0))
    }
}
