//! Generates `app_metadata.rs` in `OUT_DIR`.
//!
//! Every entry becomes a `pub const APP_METADATA_<KEY>: &str`: the package
//! name and version, each string under `[package.metadata]`, and
//! `SHIFTWATCH_OWNER` from the environment (or a `.env` file) when set, which
//! overrides the vendor directory the data files are stored under.

use dotenv::dotenv;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use toml::Value;

#[derive(Default)]
struct AppMetadata {
    entries: BTreeMap<String, String>,
}

impl AppMetadata {
    fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_uppercase(), value.into());
    }

    /// Rust source for all entries. Values go through `Debug` so quotes and
    /// backslashes are escaped.
    fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("#[allow(unused)]\npub const APP_METADATA_{}: &str = {:?};\n", key, value))
            .collect()
    }
}

fn package_metadata(cargo_toml: &Value) -> impl Iterator<Item = (&String, &str)> {
    cargo_toml
        .get("package")
        .and_then(|pkg| pkg.get("metadata"))
        .and_then(|meta| meta.as_table())
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| value.as_str().map(|value| (key, value)))
}

fn main() -> io::Result<()> {
    let _ = dotenv();
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=SHIFTWATCH_OWNER");

    let cargo_toml: Value = toml::from_str(&fs::read_to_string("Cargo.toml")?).map_err(io::Error::other)?;

    let mut metadata = AppMetadata::default();
    metadata.set("name", env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "shiftwatch".to_string()));
    metadata.set("version", env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string()));
    for (key, value) in package_metadata(&cargo_toml) {
        metadata.set(key, value);
    }
    if let Ok(owner) = env::var("SHIFTWATCH_OWNER") {
        metadata.set("owner", owner);
    }

    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;
    fs::write(Path::new(&out_dir).join("app_metadata.rs"), metadata.render())
}
