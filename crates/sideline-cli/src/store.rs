//! JSON-file record store.
//!
//! The pipeline core never touches storage; this is the persistence
//! collaborator that loads the cached set before a refresh and writes the
//! merged result after.

use std::fs;
use std::path::Path;

use anyhow::Context;

use sideline_core::Record;

/// Loads the cached record set. A missing file is an empty cache, not an
/// error — the first refresh starts from nothing.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read record cache {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse record cache {}", path.display()))
}

/// Writes the merged record set, creating parent directories as needed.
pub fn save_records(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create cache directory {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(records).context("failed to serialize records")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write record cache {}", path.display()))
}
