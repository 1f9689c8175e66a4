//! # Shiftwatch - work presence tracking for a single user
//!
//! Keeps an accountable record of a shift: what the user reports working on,
//! timed breaks and meetings, and inactivity. Every status change and every
//! accountability event (idle detection, exceeded breaks, unanswered checks,
//! unexpected exits) becomes a row in an append-only activity log.
//!
//! ## Features
//!
//! - **Work interval prompts**: asks for a status report every 15, 30 or 60
//!   minutes of Working time
//! - **Timed statuses**: Break, Lunch, Meeting and Personal with allowances;
//!   overruns are logged and must be explained
//! - **Idle detection**: no keyboard/mouse input for 10 minutes moves the user
//!   to Idle after a short caution
//! - **Activity log**: SQLite locally, optionally mirrored to a server
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shiftwatch::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
