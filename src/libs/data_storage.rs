//! Platform-specific location of shiftwatch's files.
//!
//! Everything the tracker persists (configuration and the activity database)
//! lives under a single per-user directory:
//!
//! - **Windows**: `%LOCALAPPDATA%\wfm\shiftwatch`
//! - **macOS**: `~/Library/Application Support/wfm/shiftwatch`
//! - **Linux**: `~/.local/share/wfm/shiftwatch`

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const VENDOR_NAME: &str = APP_METADATA_OWNER;
pub const APP_NAME: &str = APP_METADATA_NAME;
pub const APP_VERSION: &str = APP_METADATA_VERSION;

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME);

        Self { base_path }
    }

    /// Resolves `file_name` inside the data directory, creating the
    /// directory on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
