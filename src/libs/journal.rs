//! Append-only activity journal.
//!
//! Every accountability event becomes one [`ActivityEntry`]. The journal
//! writes each entry to a primary sink (the local database) and to any number
//! of mirrors (for example the remote server). A failing sink never stops the
//! tracker: the failure is reported and the remaining sinks still receive the
//! row.

use crate::libs::messages::Message;
use crate::libs::presence::Status;
use crate::msg_warning;
use anyhow::Result;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub timestamp: NaiveDateTime,
    pub employee_id: String,
    pub status: Status,
    pub response: String,
    pub remark: String,
}

pub trait ActivityLog: Send + Sync {
    fn append(&self, entry: &ActivityEntry) -> Result<()>;

    /// Status of the most recently appended entry, if this sink can tell.
    fn last_status(&self) -> Result<Option<Status>>;
}

pub struct Journal {
    employee_id: String,
    primary: Arc<dyn ActivityLog>,
    mirrors: Vec<Arc<dyn ActivityLog>>,
}

impl Journal {
    pub fn new(employee_id: impl Into<String>, primary: Arc<dyn ActivityLog>) -> Self {
        Self {
            employee_id: employee_id.into(),
            primary,
            mirrors: Vec::new(),
        }
    }

    pub fn with_mirror(mut self, mirror: Arc<dyn ActivityLog>) -> Self {
        self.mirrors.push(mirror);
        self
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn record(&self, at: NaiveDateTime, status: Status, response: impl Into<String>, remark: impl Into<String>) {
        let entry = ActivityEntry {
            timestamp: at,
            employee_id: self.employee_id.clone(),
            status,
            response: response.into(),
            remark: remark.into(),
        };
        tracing::info!(
            status = %entry.status,
            response = %entry.response,
            remark = %entry.remark,
            "activity logged"
        );

        for sink in std::iter::once(&self.primary).chain(self.mirrors.iter()) {
            if let Err(e) = sink.append(&entry) {
                msg_warning!(Message::ActivityLogWriteFailed(e.to_string()));
            }
        }
    }

    /// Last status seen by the primary sink. Read failures count as "no history".
    pub fn last_status(&self) -> Option<Status> {
        match self.primary.last_status() {
            Ok(status) => status,
            Err(e) => {
                msg_warning!(Message::ActivityLogReadFailed(e.to_string()));
                None
            }
        }
    }
}

/// In-process sink, used when no database is wanted and by tests.
#[derive(Debug, Default)]
pub struct MemoryLog {
    rows: Mutex<Vec<ActivityEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.rows.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    /// Number of rows whose response equals `response`.
    pub fn count_response(&self, response: &str) -> usize {
        self.rows.lock().iter().filter(|e| e.response == response).count()
    }

    pub fn last(&self) -> Option<ActivityEntry> {
        self.rows.lock().last().cloned()
    }
}

impl ActivityLog for MemoryLog {
    fn append(&self, entry: &ActivityEntry) -> Result<()> {
        self.rows.lock().push(entry.clone());
        Ok(())
    }

    fn last_status(&self) -> Result<Option<Status>> {
        Ok(self.rows.lock().last().map(|e| e.status))
    }
}
