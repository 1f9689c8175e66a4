//! SQLite persistence.
//!
//! The tracker keeps a single append-only table, `activity_log`, in
//! `shiftwatch.db` under the application data directory.
//!
//! ```rust,no_run
//! use shiftwatch::db::activity::ActivityRecords;
//!
//! let records = ActivityRecords::new()?;
//! let last = records.fetch_last_status()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup.
pub mod db;

/// The `activity_log` table.
pub mod activity;
