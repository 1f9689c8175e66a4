use crate::libs::presence::Status;

#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigLocation(String),
    ConfigModuleEmployee,
    ConfigModulePresence,
    ConfigModuleServer,
    ConfigValueMustBePositive(String),
    ConfigValueTooLarge(String, u64),
    InvalidPromptInterval(u64),
    EmployeeIdRequired,

    // === PROMPTS ===
    PromptSelectModules,
    PromptEmployeeId,
    PromptWorkInterval,
    PromptIdleTimeout,
    PromptBreakDuration,
    PromptLunchDuration,
    PromptResponseTimeout,
    PromptOffWorkLimit,
    PromptServerApiUrl,
    PromptServerAuthToken,

    // === TRACKER MESSAGES ===
    TrackerStarted(String, u64), // employee id, interval minutes
    TrackerStopping,
    TrackerFailed(String),
    TickFailed(String),
    UnexpectedExitLogged(Status),
    ConsoleHint,
    UnknownCommand(String),
    SubmissionRejected(String),
    SignalHandlerFailed(String),
    SignalHandlingNotSupported,
    ReceivedSigterm,
    ReceivedSigint,
    ReceivedCtrlC,

    // === PRESENCE QUESTIONS ===
    ScheduledPrompt(u64),
    BackToWorkQuestion(Status),
    ResumeTaskQuestion,
    StillThereQuestion,
    ExceedanceReasonQuestion(Status),
    DurationQuestion(Status),
    EmptyReasonNotice(Status),

    // === PRESENCE NOTICES ===
    StatusSet(Status),
    DurationFallback(Status),
    OffWorkRemark(u64),
    OfflineShuttingDown,
    TaskRequired,
    ReasonMandatory,
    ReasonRequiredToProceed(Status),
    EnterReasonOrPickAnother,
    IdleCaution(u64),
    MarkedIdle,
    NoResponseLoggedIdle,
    TimedStatusExceeded(Status, i64),
    ExceedanceReminder(Status),
    UpdateStatusRequest,

    // === TIMER MESSAGES ===
    UntilNextPrompt(i64, i64),
    TimeRemaining(Status, i64, i64),
    ExceededBy(Status, i64),
    OffWorkElapsed(i64, i64, i64), // hours, minutes, limit hours
    NoActiveTimer(Status),

    // === CONSOLE MESSAGES ===
    ConsoleReadFailed(String),
    InvalidChoice,
    PromptTimedOut,

    // === INPUT MONITOR MESSAGES ===
    InputListenerStarted,
    InputListenerFailed(String),

    // === ACTIVITY LOG MESSAGES ===
    ActivityLogWriteFailed(String),
    ActivityLogReadFailed(String),
    ActivityHeader(String),
    NoActivityForDate(String),
    NoActivityToExport,
    ExportCompleted(String, usize),
    RemoteLogFailed(String),
    RemoteLogRejected(String),
    RemoteLogClosed,
}
