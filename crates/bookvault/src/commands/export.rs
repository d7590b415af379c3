//! Bulk export: the whole collection as a pretty-printed JSON array.
//!
//! The output is exactly what [`import`](super::import) accepts, so an export followed
//! by an import reproduces the collection.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::store::backend::StorageBackend;
use crate::store::CatalogStore;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// `bookvault-YYYY-MM-DD.json`
pub fn file_name(date: NaiveDate) -> String {
    format!("bookvault-{}.json", date.format("%Y-%m-%d"))
}

/// Serializes records with two-space indentation.
pub fn to_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the export file into `dir`, named for `date`.
pub fn run<B: StorageBackend>(
    store: &CatalogStore<B>,
    dir: &Path,
    date: NaiveDate,
) -> Result<CmdResult> {
    let content = to_json(store.records())?;
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(VaultError::Io)?;
    }
    let path = dir.join(file_name(date));
    fs::write(&path, content).map_err(VaultError::Io)?;
    tracing::debug!(path = %path.display(), count = store.len(), "collection exported");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Export complete."));
    Ok(result.with_paths(vec![path]))
}
