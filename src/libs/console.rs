//! Terminal front end.
//!
//! Three pieces cooperate:
//!
//! - a reader thread that turns stdin into [`ConsoleEvent::Line`]s;
//! - [`ConsolePrompter`], the [`Prompter`] handed to the state machine, which
//!   queues [`ConsoleEvent::Prompt`]s and blocks until they are answered;
//! - the [`Console`] pump, which owns the terminal. While a prompt is open the
//!   next line answers it; otherwise lines are parsed into commands for the
//!   tracker. A prompt left unanswered for `prompt_timeout` is dismissed.

use crate::libs::command::{parse, ConsoleCommand};
use crate::libs::messages::Message;
use crate::libs::prompter::Prompter;
use crate::{msg_info, msg_print, msg_warning};
use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

const PUMP_PERIOD: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    FreeText,
    Choice(Vec<String>),
}

pub struct PromptRequest {
    pub question: String,
    pub kind: PromptKind,
    reply: mpsc::Sender<Option<String>>,
}

pub enum ConsoleEvent {
    Line(String),
    Prompt(PromptRequest),
}

#[derive(Clone)]
pub struct ConsolePrompter {
    events: mpsc::Sender<ConsoleEvent>,
    showing: Arc<AtomicBool>,
}

impl ConsolePrompter {
    fn ask(&self, question: &str, kind: PromptKind) -> Option<String> {
        let (reply, answer) = mpsc::channel();
        let request = PromptRequest {
            question: question.to_string(),
            kind,
            reply,
        };
        self.events.send(ConsoleEvent::Prompt(request)).ok()?;
        answer.recv().ok().flatten()
    }
}

impl Prompter for ConsolePrompter {
    fn request_free_text(&self, prompt: &str) -> Option<String> {
        self.ask(prompt, PromptKind::FreeText)
    }

    fn request_choice(&self, prompt: &str, options: &[&str]) -> Option<String> {
        self.ask(prompt, PromptKind::Choice(options.iter().map(|o| o.to_string()).collect()))
    }

    fn notify(&self, message: &str) {
        msg_info!(message);
    }

    fn show(&self, message: &str) {
        msg_print!(format!(">>> {}", message), true);
    }

    fn is_showing_prompt(&self) -> bool {
        self.showing.load(Ordering::Relaxed)
    }
}

pub struct Console {
    events: mpsc::Receiver<ConsoleEvent>,
    lines: mpsc::Sender<ConsoleEvent>,
    showing: Arc<AtomicBool>,
    prompt_timeout: Duration,
}

impl Console {
    pub fn new(prompt_timeout: Duration) -> (Self, ConsolePrompter) {
        let (sender, events) = mpsc::channel();
        let showing = Arc::new(AtomicBool::new(false));
        let prompter = ConsolePrompter {
            events: sender.clone(),
            showing: showing.clone(),
        };
        let console = Self {
            events,
            lines: sender,
            showing,
            prompt_timeout,
        };
        (console, prompter)
    }

    /// Sender for lines typed by the user. [`Console::spawn`] feeds it from stdin.
    pub fn input(&self) -> mpsc::Sender<ConsoleEvent> {
        self.lines.clone()
    }

    /// Starts the stdin reader and the pump; parsed commands go to `commands`.
    pub fn spawn(self, commands: UnboundedSender<ConsoleCommand>) -> JoinHandle<()> {
        let lines = self.input();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if lines.send(ConsoleEvent::Line(line)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        msg_warning!(Message::ConsoleReadFailed(e.to_string()));
                        break;
                    }
                }
            }
        });
        self.start(commands)
    }

    /// Runs the pump on its own thread until `commands` is closed.
    pub fn start(self, commands: UnboundedSender<ConsoleCommand>) -> JoinHandle<()> {
        std::thread::spawn(move || self.pump(commands))
    }

    fn pump(self, commands: UnboundedSender<ConsoleCommand>) {
        let mut queue: VecDeque<PromptRequest> = VecDeque::new();
        let mut active: Option<(PromptRequest, Instant)> = None;

        loop {
            if active.is_none() {
                if let Some(request) = queue.pop_front() {
                    display(&request);
                    self.showing.store(true, Ordering::Relaxed);
                    active = Some((request, Instant::now()));
                }
            }

            match self.events.recv_timeout(PUMP_PERIOD) {
                Ok(ConsoleEvent::Prompt(request)) => queue.push_back(request),
                Ok(ConsoleEvent::Line(line)) => match active.take() {
                    Some((request, since)) => match interpret(&request.kind, &line) {
                        Answer::Accepted(answer) => {
                            let _ = request.reply.send(answer);
                            self.showing.store(false, Ordering::Relaxed);
                        }
                        Answer::Invalid => {
                            msg_warning!(Message::InvalidChoice);
                            display(&request);
                            active = Some((request, since));
                        }
                    },
                    None => {
                        if commands.send(parse(&line)).is_err() {
                            break;
                        }
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    if commands.is_closed() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if let Some((request, since)) = active.take() {
                if since.elapsed() >= self.prompt_timeout {
                    msg_warning!(Message::PromptTimedOut);
                    let _ = request.reply.send(None);
                    self.showing.store(false, Ordering::Relaxed);
                } else {
                    active = Some((request, since));
                }
            }
        }

        // Unblock anyone still waiting on an answer.
        self.showing.store(false, Ordering::Relaxed);
        if let Some((request, _)) = active {
            let _ = request.reply.send(None);
        }
        for request in queue {
            let _ = request.reply.send(None);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Answer {
    Accepted(Option<String>),
    Invalid,
}

fn display(request: &PromptRequest) {
    msg_print!(format!("❓ {}", request.question), true);
    if let PromptKind::Choice(options) = &request.kind {
        for (idx, option) in options.iter().enumerate() {
            msg_print!(format!("   {}) {}", idx + 1, option));
        }
    }
}

/// Blank lines dismiss; choices accept a number or an unambiguous prefix.
pub fn interpret(kind: &PromptKind, line: &str) -> Answer {
    let line = line.trim();
    if line.is_empty() {
        return Answer::Accepted(None);
    }
    match kind {
        PromptKind::FreeText => Answer::Accepted(Some(line.to_string())),
        PromptKind::Choice(options) => {
            if let Ok(idx) = line.parse::<usize>() {
                return match options.get(idx.wrapping_sub(1)) {
                    Some(option) => Answer::Accepted(Some(option.clone())),
                    None => Answer::Invalid,
                };
            }
            let lower = line.to_lowercase();
            let matches: Vec<&String> = options.iter().filter(|o| o.to_lowercase().starts_with(&lower)).collect();
            match matches.as_slice() {
                [option] => Answer::Accepted(Some((*option).clone())),
                _ => Answer::Invalid,
            }
        }
    }
}
