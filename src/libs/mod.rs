//! Core library modules.
//!
//! ## Layout
//!
//! - **State**: `presence` (the shared state), `context` (collaborator bundle)
//! - **Collaborators**: `clock`, `sampler`, `journal`, `prompter`
//! - **Components**: `idle`, `timed`, `interval`, `arbiter`, `submission`
//! - **Runtime**: `tracker`, `console`, `command`, `timer`, `remote`
//! - **Infrastructure**: `config`, `data_storage`, `messages`, `formatter`,
//!   `view`, `export`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shiftwatch::libs::clock::SystemClock;
//! use shiftwatch::libs::config::PresenceConfig;
//! use shiftwatch::libs::context::Context;
//! use shiftwatch::libs::journal::{Journal, MemoryLog};
//! use shiftwatch::libs::prompter::ScriptedPrompter;
//! use shiftwatch::libs::sampler::ManualSampler;
//! use shiftwatch::libs::submission::SubmissionHandler;
//! use shiftwatch::libs::presence::Status;
//!
//! let ctx = Context::new(
//!     PresenceConfig::default(),
//!     Arc::new(SystemClock),
//!     Arc::new(ManualSampler::new()),
//!     Journal::new("E1001", Arc::new(MemoryLog::new())),
//!     Arc::new(ScriptedPrompter::new()),
//! );
//! SubmissionHandler::new(ctx).submit(Status::Break, "coffee");
//! ```

pub mod arbiter;
pub mod clock;
pub mod command;
pub mod config;
pub mod console;
pub mod context;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod idle;
pub mod interval;
pub mod journal;
pub mod messages;
pub mod presence;
pub mod prompter;
pub mod remote;
pub mod sampler;
pub mod submission;
pub mod timed;
pub mod timer;
pub mod tracker;
pub mod view;
