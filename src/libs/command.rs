//! Parses a console line into a tracker command.
//!
//! ```text
//! working fixing the login page     -> Working, "fixing the login page"
//! break                              -> Break
//! meeting sprint planning            -> Meeting, "sprint planning"
//! click lunch                        -> Lunch
//! back to work                       -> Working, task asked for
//! how many minutes left?             -> remaining time
//! ```

use crate::libs::presence::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Submit { status: Status, response: String },
    /// Return to Working; `None` means the task still has to be asked for.
    BackToWork(Option<String>),
    Remaining,
    Status,
    Help,
    Empty,
    Unknown(String),
}

const STATUS_WORDS: [(&str, Status); 9] = [
    ("off work", Status::OffWork),
    ("offwork", Status::OffWork),
    ("offline", Status::Offline),
    ("working", Status::Working),
    ("work", Status::Working),
    ("break", Status::Break),
    ("lunch", Status::Lunch),
    ("meeting", Status::Meeting),
    ("personal", Status::Personal),
];

pub fn parse(line: &str) -> ConsoleCommand {
    let line = line.trim().trim_end_matches(['?', '!', '.']).trim_end();
    if line.is_empty() {
        return ConsoleCommand::Empty;
    }
    let lower = line.to_lowercase();
    let lower = lower.as_str();

    match lower {
        "help" | "h" => return ConsoleCommand::Help,
        "status" | "s" => return ConsoleCommand::Status,
        _ => {}
    }
    if asks_remaining(lower) {
        return ConsoleCommand::Remaining;
    }

    if let Some(rest) = strip_word(lower, "back to work") {
        let task = tail(line, lower.len() - rest.len());
        return ConsoleCommand::BackToWork((!task.is_empty()).then_some(task));
    }

    let (body, offset) = match strip_word(lower, "click") {
        Some(rest) => (rest.trim_start(), lower.len() - rest.trim_start().len()),
        None => (lower, 0),
    };

    for (word, status) in STATUS_WORDS {
        if let Some(rest) = strip_word(body, word) {
            let consumed = offset + (body.len() - rest.len());
            return ConsoleCommand::Submit {
                status,
                response: tail(line, consumed),
            };
        }
    }

    ConsoleCommand::Unknown(line.to_string())
}

pub fn help() -> &'static str {
    "Commands:\n  \
     working <task>        report what you are working on\n  \
     back to work [task]   return to Working\n  \
     break | lunch         start a break or lunch\n  \
     meeting [reason]      start a meeting (duration asked)\n  \
     personal [reason]     start personal time (duration asked)\n  \
     off work              stop prompts, track the off-work limit\n  \
     offline               log off and exit\n  \
     left                  time left on the current timer\n  \
     status                show the status line\n  \
     help                  this list"
}

fn asks_remaining(lower: &str) -> bool {
    if matches!(lower, "left" | "remaining" | "time left") {
        return true;
    }
    let asks_amount = lower.contains("how many") || lower.contains("how much") || lower.contains("minutes");
    let asks_left = lower.contains("left") || lower.contains("remaining");
    asks_amount && asks_left
}

/// Strips `word` when it is the whole line or followed by whitespace.
fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(word)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

/// Original-case text after the first `consumed` bytes.
fn tail(line: &str, consumed: usize) -> String {
    line.get(consumed..).unwrap_or_default().trim().to_string()
}
