//! Input activity sampling.
//!
//! The idle monitor never needs to know *what* the user did, only whether
//! anything happened between two samples. An [`ActivityToken`] is an opaque
//! value that changes whenever input is observed; comparing two tokens answers
//! "moved or not".

use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use rdev::{listen, Event, EventType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityToken(u64);

pub trait ActivitySampler: Send + Sync {
    fn position(&self) -> ActivityToken;
}

/// Counts keyboard and pointer events reported by the OS.
///
/// The counter is the token: any key press, button press, wheel or pointer
/// movement bumps it.
#[derive(Debug, Clone)]
pub struct InputSampler {
    events: Arc<AtomicU64>,
}

impl InputSampler {
    /// Starts the global input listener on a dedicated thread.
    ///
    /// `rdev::listen` blocks for the life of the process; if the platform
    /// hook fails it is retried after a second.
    pub fn start() -> Self {
        let events = Arc::new(AtomicU64::new(0));
        let shared = events.clone();

        std::thread::spawn(move || loop {
            let counter = shared.clone();
            let result = listen(move |event: Event| match event.event_type {
                EventType::KeyPress(_) | EventType::ButtonPress(_) | EventType::Wheel { .. } | EventType::MouseMove { .. } => {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
                _ => {}
            });
            match result {
                Ok(()) => break,
                Err(e) => {
                    msg_warning!(Message::InputListenerFailed(format!("{:?}", e)));
                    std::thread::sleep(Duration::from_secs(1));
                }
            }
        });

        msg_debug!(Message::InputListenerStarted);
        Self { events }
    }
}

impl ActivitySampler for InputSampler {
    fn position(&self) -> ActivityToken {
        ActivityToken(self.events.load(Ordering::Relaxed))
    }
}

/// Sampler whose token only changes when a test calls [`ManualSampler::nudge`].
#[derive(Debug, Default)]
pub struct ManualSampler {
    events: AtomicU64,
}

impl ManualSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nudge(&self) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }
}

impl ActivitySampler for ManualSampler {
    fn position(&self) -> ActivityToken {
        ActivityToken(self.events.load(Ordering::Relaxed))
    }
}
