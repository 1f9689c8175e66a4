use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "shiftwatch.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the application data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let conn = Connection::open(path)?;
        Ok(Db { conn })
    }

    pub fn in_memory() -> Result<Db> {
        Ok(Db {
            conn: Connection::open_in_memory()?,
        })
    }
}
