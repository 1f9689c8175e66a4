//! Human-readable text for every [`Message`].
//!
//! All user-facing wording lives here so that the components only deal in
//! typed messages. Grouping follows the sections of the enum.

use super::types::Message;
use crate::libs::presence::Status;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "No configuration file to delete".to_string(),
            Message::ConfigLocation(path) => format!("Configuration file: {}", path),
            Message::ConfigModuleEmployee => "Employee settings".to_string(),
            Message::ConfigModulePresence => "Presence policy settings".to_string(),
            Message::ConfigModuleServer => "Remote activity log settings".to_string(),
            Message::ConfigValueMustBePositive(name) => format!("Configuration value '{}' must be greater than zero", name),
            Message::ConfigValueTooLarge(name, max) => format!("Configuration value '{}' must be at most {}", name, max),
            Message::InvalidPromptInterval(mins) => format!("Invalid work prompt interval {}: choose 15, 30 or 60 minutes", mins),
            Message::EmployeeIdRequired => "Employee ID is required".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptEmployeeId => "Enter your Employee ID".to_string(),
            Message::PromptWorkInterval => "Select the work status prompt interval".to_string(),
            Message::PromptIdleTimeout => "Idle timeout (seconds without input)".to_string(),
            Message::PromptBreakDuration => "Break allowance (minutes)".to_string(),
            Message::PromptLunchDuration => "Lunch allowance (minutes)".to_string(),
            Message::PromptResponseTimeout => "Exceedance response timeout (seconds)".to_string(),
            Message::PromptOffWorkLimit => "Off-work limit (hours)".to_string(),
            Message::PromptServerApiUrl => "Activity server API URL".to_string(),
            Message::PromptServerAuthToken => "Activity server auth token".to_string(),

            // === TRACKER MESSAGES ===
            Message::TrackerStarted(emp_id, mins) => {
                format!("Tracking started for {}. Status prompts every {} minutes of work.", emp_id, mins)
            }
            Message::TrackerStopping => "Tracker shutting down".to_string(),
            Message::TrackerFailed(e) => format!("Tracker stopped with an error: {}", e),
            Message::TickFailed(e) => format!("Status check failed: {}", e),
            Message::UnexpectedExitLogged(status) => {
                format!("Previous session ended without logging Offline (last status: {}). Logged as IDLE.", status)
            }
            Message::ConsoleHint => "Type a status (e.g. 'working <task>', 'break', 'offline') or 'help'.".to_string(),
            Message::UnknownCommand(line) => format!("Unknown command: '{}'. Type 'help' for the list.", line),
            Message::SubmissionRejected(e) => format!("Status not changed: {}", e),
            Message::SignalHandlerFailed(e) => format!("Failed to install signal handler: {}", e),
            Message::SignalHandlingNotSupported => "Signal handling not supported on this platform".to_string(),
            Message::ReceivedSigterm => "Received SIGTERM".to_string(),
            Message::ReceivedSigint => "Received SIGINT".to_string(),
            Message::ReceivedCtrlC => "Received Ctrl+C".to_string(),

            // === PRESENCE QUESTIONS ===
            Message::ScheduledPrompt(mins) => {
                format!("It's been {} minutes. What are you working on now? (e.g. 'working <task>')", mins)
            }
            Message::BackToWorkQuestion(Status::Idle) => "You were marked Idle. Are you back to work?".to_string(),
            Message::BackToWorkQuestion(status) => format!("Your {} time is over. Are you back to work?", status),
            Message::ResumeTaskQuestion => "You selected to resume work. What task are you doing now?".to_string(),
            Message::StillThereQuestion => "No activity detected for a while. Are you still there?".to_string(),
            Message::ExceedanceReasonQuestion(Status::Idle) => {
                "You were idle for an extended time. A reason is required to return to work:".to_string()
            }
            Message::ExceedanceReasonQuestion(status) => {
                format!("Your {} went over its allowance. A reason is required to return to work:", status)
            }
            Message::DurationQuestion(status) => format!("Enter duration for {} in minutes (e.g. 60):", status),
            Message::EmptyReasonNotice(status) => format!(
                "No reason entered for {}. Your reporting manager/HR will be notified. Continue?",
                status
            ),

            // === PRESENCE NOTICES ===
            Message::StatusSet(status) => format!("Status set to {}", status.label()),
            Message::DurationFallback(status) => {
                format!("No duration given for {}; staying on Working.", status)
            }
            Message::OffWorkRemark(hours) => {
                format!("Off work: tracking the {}h limit. No prompts or idle checks.", hours)
            }
            Message::OfflineShuttingDown => "Offline mode activated. Shutting down.".to_string(),
            Message::TaskRequired => "Please enter the task or activity you are working on.".to_string(),
            Message::ReasonMandatory => "A reason is mandatory to return to work.".to_string(),
            Message::ReasonRequiredToProceed(status) => {
                format!("Still {} (exceeded). Enter a reason with your task to return to work.", status)
            }
            Message::EnterReasonOrPickAnother => "Enter a reason or choose another status.".to_string(),
            Message::IdleCaution(mins) => {
                format!("No activity detected for {} minutes. Move the mouse or answer to stay on Working.", mins)
            }
            Message::MarkedIdle => "You have been marked IDLE. A reason is required when you return.".to_string(),
            Message::NoResponseLoggedIdle => "No response to the status check. Logged as IDLE.".to_string(),
            Message::TimedStatusExceeded(status, mins) => {
                format!("Your {} allowance of {} minutes is over.", status, mins)
            }
            Message::ExceedanceReminder(status) => {
                format!("You are still on {} past its allowance.", status)
            }
            Message::UpdateStatusRequest => "Please update your status.".to_string(),

            // === TIMER MESSAGES ===
            Message::UntilNextPrompt(m, s) => format!("{} minutes and {} seconds until the next status prompt.", m, s),
            Message::TimeRemaining(status, m, s) => format!("{} minutes and {} seconds remaining for {}.", m, s, status),
            Message::ExceededBy(status, m) => format!("You have exceeded {} by {} minutes.", status, m),
            Message::OffWorkElapsed(h, m, limit) => format!("Off work for {}h {}m of the {}h limit.", h, m, limit),
            Message::NoActiveTimer(status) => format!("No timer is running while {}.", status),

            // === CONSOLE MESSAGES ===
            Message::ConsoleReadFailed(e) => format!("Failed to read from the console: {}", e),
            Message::InvalidChoice => "Not one of the options. Enter its number or name.".to_string(),
            Message::PromptTimedOut => "No answer given, prompt dismissed.".to_string(),

            // === INPUT MONITOR MESSAGES ===
            Message::InputListenerStarted => "Input listener started".to_string(),
            Message::InputListenerFailed(e) => format!("Failed to listen for input events: {}. Retrying in 1 second...", e),

            // === ACTIVITY LOG MESSAGES ===
            Message::ActivityLogWriteFailed(e) => format!("Failed to write activity row: {}", e),
            Message::ActivityLogReadFailed(e) => format!("Failed to read the activity log: {}", e),
            Message::ActivityHeader(date) => format!("Activity for {}", date),
            Message::NoActivityForDate(date) => format!("No activity recorded for {}", date),
            Message::NoActivityToExport => "No activity rows to export".to_string(),
            Message::ExportCompleted(path, rows) => format!("Exported {} rows to {}", rows, path),
            Message::RemoteLogFailed(e) => format!("Failed to send activity row to the server: {}", e),
            Message::RemoteLogRejected(status) => format!("Activity server rejected the row: {}", status),
            Message::RemoteLogClosed => "Remote activity log is no longer running".to_string(),
        };
        write!(f, "{}", s)
    }
}
