//! Form submission: turns raw form input into a stored record.
//!
//! The pipeline is build → validate → add or update. A draft that fails validation
//! comes back as a [`CmdResult`] carrying the field errors; the store is not touched.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::{format_timestamp, Record, RecordKind};
use crate::store::backend::StorageBackend;
use crate::store::CatalogStore;
use crate::validation::validate_record;
use chrono::{DateTime, Utc};
use serde_json::Map;
use uuid::Uuid;

pub const BLOCKED_MESSAGE: &str = "Please resolve the errors above before saving.";
pub const SAVED_MESSAGE: &str = "Record saved successfully.";
pub const UPDATED_MESSAGE: &str = "Record updated successfully.";

/// Raw form values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub kind: RecordKind,
    pub title: String,
    pub author: String,
    pub pages: String,
    pub tag: String,
    pub date_added: String,
    pub note_content: String,
    /// A freshly chosen cover, already read into a data URL. `None` keeps the old one.
    pub cover: Option<String>,
}

impl RecordDraft {
    /// Pre-fills a draft from a stored record, for editing.
    pub fn from_record(record: &Record) -> Self {
        Self {
            kind: record.kind.clone(),
            title: record.title.clone(),
            author: record.author_text().to_string(),
            pages: record.pages_text(),
            tag: record.tag_text().to_string(),
            date_added: record.date_added.clone(),
            note_content: record.note_text().to_string(),
            cover: None,
        }
    }
}

pub fn new_record_id() -> String {
    format!("item_{}", Uuid::new_v4().simple())
}

/// Blank or unparsable input means no value; so do infinities.
fn parse_pages(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|p| p.is_finite())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Builds the record a draft describes. `existing` is the record being edited.
pub fn build_record(draft: &RecordDraft, existing: Option<&Record>, now: DateTime<Utc>) -> Record {
    let is_note = draft.kind == RecordKind::Note;

    let (author, pages) = if is_note {
        (String::new(), Some(0.0))
    } else {
        (draft.author.trim().to_string(), parse_pages(&draft.pages))
    };
    let note_content = if is_note {
        draft.note_content.trim().to_string()
    } else {
        String::new()
    };

    let cover_url = non_empty(draft.cover.clone())
        .or_else(|| existing.and_then(|r| non_empty(r.cover_url.clone())));

    let mut record = Record {
        id: existing.map(|r| r.id.clone()).unwrap_or_else(new_record_id),
        kind: draft.kind.clone(),
        title: draft.title.trim().to_string(),
        author: Some(author),
        pages,
        tag: Some(draft.tag.trim().to_string()),
        date_added: draft.date_added.clone(),
        note_content: Some(note_content),
        cover_url,
        created_at: existing
            .and_then(|r| r.created_at.clone())
            .or_else(|| Some(format_timestamp(now))),
        updated_at: Some(format_timestamp(now)),
        extra: existing.map(|r| r.extra.clone()).unwrap_or_else(Map::new),
    };
    record.drop_shadowed_extra();
    record
}

/// Saves a draft. With `editing_id` the stored record is replaced, otherwise a new
/// record is added.
pub fn run<B: StorageBackend>(
    store: &mut CatalogStore<B>,
    draft: &RecordDraft,
    editing_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let existing = match editing_id {
        Some(id) => Some(
            store
                .get(id)
                .cloned()
                .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))?,
        ),
        None => None,
    };

    let record = build_record(draft, existing.as_ref(), now);
    let errors = validate_record(&record);

    let mut result = CmdResult::default();
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "submission blocked");
        result.field_errors = Some(errors);
        result.add_message(CmdMessage::error(BLOCKED_MESSAGE));
        return Ok(result);
    }

    if existing.is_some() {
        store.update(record.clone())?;
        result.add_message(CmdMessage::success(UPDATED_MESSAGE));
    } else {
        store.add(record.clone())?;
        result.add_message(CmdMessage::success(SAVED_MESSAGE));
    }

    Ok(result.with_affected_records(vec![record]))
}
