use crate::db::db::Db;
use crate::libs::formatter::TIMESTAMP_FORMAT;
use crate::libs::journal::{ActivityEntry, ActivityLog};
use crate::libs::presence::Status;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SCHEMA_ACTIVITY_LOG: &str = "CREATE TABLE IF NOT EXISTS activity_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    emp_id TEXT NOT NULL,
    status TEXT NOT NULL,
    response TEXT,
    remark TEXT
);";
const INDEX_ACTIVITY_LOG_TIMESTAMP: &str = "CREATE INDEX IF NOT EXISTS idx_activity_log_timestamp ON activity_log(timestamp)";
const INSERT: &str = "INSERT INTO activity_log (timestamp, emp_id, status, response, remark) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_LAST_STATUS: &str = "SELECT status FROM activity_log ORDER BY id DESC LIMIT 1";
const SELECT_BY_DATE: &str = "SELECT timestamp, emp_id, status, response, remark FROM activity_log WHERE date(timestamp) = ?1 ORDER BY id";
const SELECT_ALL: &str = "SELECT timestamp, emp_id, status, response, remark FROM activity_log ORDER BY id";

/// SQLite-backed activity log. Rows are never updated or deleted.
pub struct ActivityRecords {
    conn: Mutex<Connection>,
}

impl ActivityRecords {
    pub fn new() -> Result<Self> {
        Self::with_db(Db::new()?)
    }

    pub fn with_db(db: Db) -> Result<Self> {
        db.conn.execute(SCHEMA_ACTIVITY_LOG, [])?;
        db.conn.execute(INDEX_ACTIVITY_LOG_TIMESTAMP, [])?;
        Ok(Self {
            conn: Mutex::new(db.conn),
        })
    }

    pub fn insert(&self, entry: &ActivityEntry) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            INSERT,
            params![
                entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                entry.employee_id,
                entry.status.as_str(),
                entry.response,
                entry.remark,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Status of the row with the highest id.
    pub fn fetch_last_status(&self) -> Result<Option<Status>> {
        let status: Option<String> = self.conn.lock().query_row(SELECT_LAST_STATUS, [], |row| row.get(0)).optional()?;
        Ok(status.map(|s| s.parse::<Status>()).transpose()?)
    }

    pub fn fetch_day(&self, date: NaiveDate) -> Result<Vec<ActivityEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_BY_DATE)?;
        let entries = stmt
            .query_map([date.format("%Y-%m-%d").to_string()], entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn fetch_all(&self) -> Result<Vec<ActivityEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let entries = stmt.query_map([], entry_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }
}

fn entry_from_row(row: &Row) -> rusqlite::Result<ActivityEntry> {
    let timestamp: String = row.get(0)?;
    let status: String = row.get(2)?;
    Ok(ActivityEntry {
        timestamp: NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        employee_id: row.get(1)?,
        status: status
            .parse::<Status>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?,
        response: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        remark: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

impl ActivityLog for ActivityRecords {
    fn append(&self, entry: &ActivityEntry) -> Result<()> {
        self.insert(entry)?;
        Ok(())
    }

    fn last_status(&self) -> Result<Option<Status>> {
        self.fetch_last_status()
    }
}
