//! Bulk import: replaces the whole collection with the contents of a JSON file.
//!
//! The file must hold a JSON array whose every element is an object with non-empty
//! string `id`, `title` and `dateAdded`, and no two elements may share an `id`.
//! Nothing beyond that structural check is enforced: imported records are not run
//! through the validator, and other fields are kept whatever their type. Any problem
//! rejects the whole file and leaves the collection untouched.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ImportError, Result, VaultError};
use crate::model::Record;
use crate::store::backend::StorageBackend;
use crate::store::CatalogStore;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const REQUIRED_KEYS: [&str; 3] = ["id", "title", "dateAdded"];

fn has_required_fields(item: &Value) -> bool {
    REQUIRED_KEYS.iter().all(|key| {
        item.get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    })
}

/// Parses import text into records without touching any store.
pub fn parse_records(text: &str) -> std::result::Result<Vec<Record>, ImportError> {
    let data: Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let items = match data {
        Value::Array(items) => items,
        _ => return Err(ImportError::NotAnArray),
    };

    if !items.iter().all(has_required_fields) {
        return Err(ImportError::MissingFields);
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let record: Record =
            serde_json::from_value(item).map_err(|_| ImportError::MissingFields)?;
        if !seen.insert(record.id.clone()) {
            return Err(ImportError::DuplicateId(record.id));
        }
        records.push(record);
    }
    Ok(records)
}

pub fn run<B: StorageBackend>(store: &mut CatalogStore<B>, text: &str) -> Result<CmdResult> {
    let records = parse_records(text).map_err(|err| {
        tracing::debug!(error = %err, "import rejected");
        VaultError::Import(err)
    })?;
    let count = records.len();
    store.replace_all(records)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} record{}.",
        count,
        if count == 1 { "" } else { "s" }
    )));
    Ok(result.with_affected_records(store.records().to_vec()))
}

/// Reads `path` and imports it. A read failure leaves the store untouched.
pub fn run_file<B: StorageBackend>(store: &mut CatalogStore<B>, path: &Path) -> Result<CmdResult> {
    let text = fs::read_to_string(path).map_err(VaultError::Io)?;
    let mut result = run(store, &text)?;
    result.paths.push(path.to_path_buf());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordKind;
    use crate::store::RECORDS_KEY;
    use crate::test_utils::{mem_store, sample_book};

    #[test]
    fn test_rejects_non_array_root() {
        assert_eq!(parse_records(r#"{"id": "x"}"#), Err(ImportError::NotAnArray));
        assert_eq!(parse_records("42"), Err(ImportError::NotAnArray));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            parse_records("[{"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_rejects_missing_required_fields() {
        let cases = [
            r#"[{"title": "Dune", "dateAdded": "2024-05-01"}]"#,
            r#"[{"id": "item_1", "dateAdded": "2024-05-01"}]"#,
            r#"[{"id": "item_1", "title": "Dune"}]"#,
            r#"[{"id": "", "title": "Dune", "dateAdded": "2024-05-01"}]"#,
            r#"[{"id": 7, "title": "Dune", "dateAdded": "2024-05-01"}]"#,
            r#"["item_1"]"#,
        ];
        for case in cases {
            assert_eq!(parse_records(case), Err(ImportError::MissingFields), "{case}");
        }
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let text = r#"[
            {"id": "a", "title": "One", "dateAdded": "2024-05-01"},
            {"id": "b", "title": "Two", "dateAdded": "2024-05-01"},
            {"id": "a", "title": "Three", "dateAdded": "2024-05-01"}
        ]"#;
        assert_eq!(
            parse_records(text),
            Err(ImportError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn test_duplicate_ids_leave_store_untouched() {
        let mut store = mem_store();
        store.add(sample_book("item_1", "Dune")).unwrap();
        let before = store.records().to_vec();

        let text = r#"[
            {"id": "a", "title": "One", "dateAdded": "2024-05-01"},
            {"id": "a", "title": "Two", "dateAdded": "2024-05-01"}
        ]"#;
        let err = run(&mut store, text).unwrap_err();
        assert_eq!(err.to_string(), "Import failed: Record id a appears more than once.");
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_accepts_loosely_typed_records() {
        let text = r#"[
            {"id": "a", "title": "A", "dateAdded": "2024-05-01", "pages": "350"},
            {"id": "b", "type": "magazine", "title": "B", "dateAdded": "2024-05-01"},
            {"id": "c", "title": "C", "dateAdded": "2024-05-01", "createdAt": "yesterday"},
            {"id": "d", "title": "D", "dateAdded": "2024-05-01", "author": null, "pages": true}
        ]"#;
        let mut store = mem_store();
        let result = run(&mut store, text).unwrap();

        assert_eq!(result.messages[0].content, "Imported 4 records.");
        assert_eq!(store.get("a").unwrap().page_value(), 350.0);
        assert_eq!(
            store.get("b").unwrap().kind,
            RecordKind::Other(serde_json::json!("magazine"))
        );
        assert_eq!(store.get("c").unwrap().created_at.as_deref(), Some("yesterday"));
    }

    #[test]
    fn test_accepted_file_is_stored_as_given() {
        let text = r#"[
            {"id": "a", "type": "magazine", "title": "A", "dateAdded": "2024-05-01",
             "pages": "350", "author": null, "createdAt": "2024-05-01T12:00:00+02:00"}
        ]"#;
        let mut store = mem_store();
        run(&mut store, text).unwrap();

        let stored: Value =
            serde_json::from_str(&store.backend().raw(RECORDS_KEY).unwrap()).unwrap();
        let given: Value = serde_json::from_str(text).unwrap();
        assert_eq!(stored, given);
    }

    #[test]
    fn test_accepts_minimal_records() {
        let text = r#"[{"id": "item_1", "title": "Dune", "dateAdded": "2024-05-01"}]"#;
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Book);
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_run_replaces_collection() {
        let mut store = mem_store();
        store.add(sample_book("item_old", "Old")).unwrap();

        let text = r#"[
            {"id": "item_1", "type": "note", "title": "A", "dateAdded": "2024-05-01"},
            {"id": "item_2", "title": "B", "dateAdded": "2024-05-02"}
        ]"#;
        let result = run(&mut store, text).unwrap();

        assert_eq!(result.messages[0].content, "Imported 2 records.");
        assert_eq!(store.len(), 2);
        assert!(store.get("item_old").is_none());
    }

    #[test]
    fn test_failed_import_leaves_store_untouched() {
        let mut store = mem_store();
        store.add(sample_book("item_1", "Dune")).unwrap();
        let before = store.records().to_vec();

        let err = run(&mut store, r#"{"not": "an array"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Import failed: Root must be an array.");

        let err = run(&mut store, r#"[{"id": "x"}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Import failed: One or more records are missing required fields."
        );

        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_run_file_missing() {
        let mut store = mem_store();
        let result = run_file(&mut store, Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(VaultError::Io(_))));
        assert!(store.is_empty());
    }
}
