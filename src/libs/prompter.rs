//! Presentation seam between the state machine and whatever talks to the user.
//!
//! Request methods may block until the user answers. `None` means the prompt
//! was dismissed or timed out; callers treat that as "no answer".
//!
//! Components never call a prompter while holding the presence lock.

use parking_lot::Mutex;
use std::collections::VecDeque;

pub trait Prompter: Send + Sync {
    fn request_free_text(&self, prompt: &str) -> Option<String>;

    /// Asks the user to pick one of `options`; returns the chosen option text.
    fn request_choice(&self, prompt: &str, options: &[&str]) -> Option<String>;

    /// Non-blocking notice.
    fn notify(&self, message: &str);

    /// Brings the main view forward with `message`. Defaults to a notice.
    fn show(&self, message: &str) {
        self.notify(message);
    }

    /// Whether a blocking prompt is currently in front of the user.
    fn is_showing_prompt(&self) -> bool {
        false
    }
}

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Yes/No question; anything but an explicit "Yes" is a no.
pub fn confirm(prompter: &dyn Prompter, prompt: &str) -> bool {
    prompter.request_choice(prompt, &[YES, NO]).as_deref() == Some(YES)
}

/// Prompter that replays queued answers and records everything it was asked.
///
/// Answers are consumed in order across both request kinds; an empty queue
/// answers `None`.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Option<String>>>,
    questions: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
    shown: Mutex<Vec<String>>,
    showing: Mutex<bool>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, answer: &str) -> &Self {
        self.answers.lock().push_back(Some(answer.to_string()));
        self
    }

    pub fn dismiss(&self) -> &Self {
        self.answers.lock().push_back(None);
        self
    }

    pub fn set_showing_prompt(&self, showing: bool) {
        *self.showing.lock() = showing;
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().clone()
    }

    fn next(&self, prompt: &str) -> Option<String> {
        self.questions.lock().push(prompt.to_string());
        self.answers.lock().pop_front().flatten()
    }
}

impl Prompter for ScriptedPrompter {
    fn request_free_text(&self, prompt: &str) -> Option<String> {
        self.next(prompt)
    }

    fn request_choice(&self, prompt: &str, _options: &[&str]) -> Option<String> {
        self.next(prompt)
    }

    fn notify(&self, message: &str) {
        self.notices.lock().push(message.to_string());
    }

    fn show(&self, message: &str) {
        self.shown.lock().push(message.to_string());
    }

    fn is_showing_prompt(&self) -> bool {
        *self.showing.lock()
    }
}
