//! # Domain Model: Records and Their Stored Shape
//!
//! The catalog holds a single entity, [`Record`], which is either a book or a note.
//! Both variants share one shape; [`RecordKind`] decides which fields carry meaning:
//!
//! | Field | Book | Note |
//! |-------|------|------|
//! | `title`, `tag`, `dateAdded` | required | required |
//! | `author`, `pages` | required | `""` / `0` |
//! | `noteContent` | `""` | free text |
//! | `coverUrl` | optional | unused |
//!
//! ## Stored Format
//!
//! Records are persisted and exported as camelCase JSON objects, the same shape the
//! browser version of the vault wrote to local storage:
//!
//! ```json
//! {
//!   "id": "item_1714557600000",
//!   "type": "book",
//!   "title": "Dune",
//!   "author": "Frank Herbert",
//!   "pages": 412,
//!   "tag": "#sci-fi",
//!   "dateAdded": "2024-05-01",
//!   "createdAt": "2024-05-01T10:00:00.000Z",
//!   "updatedAt": "2024-05-01T10:00:00.000Z"
//! }
//! ```
//!
//! ## Compatibility Rules
//!
//! - **Missing `type`**: older data has no `type` field. It loads as [`RecordKind::Book`].
//!   A `type` other than `book` or `note` is kept as [`RecordKind::Other`].
//! - **Unknown keys**: kept in [`Record::extra`] and written back untouched, so an
//!   export followed by an import reproduces the file exactly.
//! - **Mistyped fields**: only `id`, `title` and `dateAdded` must be strings. Any other
//!   known field holding an unexpected value (`"pages": "350"`, `"author": null`) also
//!   stays in [`Record::extra`] as stored.
//! - **Absent optionals**: never invented on save. A record without `coverUrl` is
//!   written without `coverUrl`.
//! - **Whole page counts**: written as JSON integers (`412`, not `412.0`).
//! - **Timestamps**: kept as stored text. New ones use millisecond precision with a
//!   `Z` suffix.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

const ID: &str = "id";
const TYPE: &str = "type";
const TITLE: &str = "title";
const AUTHOR: &str = "author";
const PAGES: &str = "pages";
const TAG: &str = "tag";
const DATE_ADDED: &str = "dateAdded";
const NOTE_CONTENT: &str = "noteContent";
const COVER_URL: &str = "coverUrl";
const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

// Largest integer an f64 holds exactly.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// What a record is. Anything that is not a note displays and validates as a book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordKind {
    #[default]
    Book,
    Note,
    /// A `type` this version does not know, kept as stored.
    Other(Value),
}

impl RecordKind {
    /// Reads a stored `type`. Missing, `null` and `""` mean a book.
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => RecordKind::Book,
            Some(Value::String(name)) => match name.as_str() {
                "" | "book" => RecordKind::Book,
                "note" => RecordKind::Note,
                _ => RecordKind::Other(Value::String(name)),
            },
            Some(other) => RecordKind::Other(other),
        }
    }
}

impl Serialize for RecordKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordKind::Book => serializer.serialize_str("book"),
            RecordKind::Note => serializer.serialize_str("note"),
            RecordKind::Other(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RecordKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(RecordKind::from_value(Some(Value::deserialize(deserializer)?)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub kind: RecordKind,
    pub title: String,
    pub author: Option<String>,
    pub pages: Option<f64>,
    pub tag: Option<String>,
    pub date_added: String,
    pub note_content: Option<String>,
    pub cover_url: Option<String>,
    /// Stored text, written back exactly as read.
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Unknown keys, and known keys whose stored value has an unexpected type.
    /// Both are written back untouched.
    pub extra: Map<String, Value>,
}

impl Record {
    /// A bare record of the given kind with only the always-required fields set.
    pub fn new(
        id: impl Into<String>,
        kind: RecordKind,
        title: impl Into<String>,
        date_added: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            author: None,
            pages: None,
            tag: None,
            date_added: date_added.into(),
            note_content: None,
            cover_url: None,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }

    pub fn is_book(&self) -> bool {
        !self.is_note()
    }

    pub fn is_note(&self) -> bool {
        self.kind == RecordKind::Note
    }

    /// Page count used for sorting and totals.
    ///
    /// A page count stored as text is read as a number. Missing, unreadable and NaN
    /// values count as zero.
    pub fn page_value(&self) -> f64 {
        let value = match (self.pages, self.extra.get(PAGES)) {
            (Some(p), _) => p,
            (None, Some(Value::String(raw))) => parse_number(raw),
            _ => 0.0,
        };
        if value.is_nan() {
            0.0
        } else {
            value
        }
    }

    /// The page count as it should appear in an edit form.
    pub fn pages_text(&self) -> String {
        match (self.pages, self.extra.get(PAGES)) {
            (Some(p), _) => format_number(p),
            (None, Some(Value::String(raw))) => raw.clone(),
            _ => String::new(),
        }
    }

    pub fn author_text(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }

    pub fn tag_text(&self) -> &str {
        self.tag.as_deref().unwrap_or("")
    }

    pub fn note_text(&self) -> &str {
        self.note_content.as_deref().unwrap_or("")
    }

    /// Drops raw values in [`Record::extra`] that a typed field now replaces.
    pub fn drop_shadowed_extra(&mut self) {
        let shadowed: Vec<String> = self
            .extra
            .keys()
            .filter(|key| self.shadows(key))
            .cloned()
            .collect();
        for key in shadowed {
            self.extra.remove(&key);
        }
    }

    /// Whether a typed field is written under `key`.
    fn shadows(&self, key: &str) -> bool {
        match key {
            ID | TYPE | TITLE | DATE_ADDED => true,
            AUTHOR => self.author.is_some(),
            PAGES => self.pages.is_some(),
            TAG => self.tag.is_some(),
            NOTE_CONTENT => self.note_content.is_some(),
            COVER_URL => self.cover_url.is_some(),
            CREATED_AT => self.created_at.is_some(),
            UPDATED_AT => self.updated_at.is_some(),
            _ => false,
        }
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(ID, &self.id)?;
        map.serialize_entry(TYPE, &self.kind)?;
        map.serialize_entry(TITLE, &self.title)?;
        if let Some(author) = &self.author {
            map.serialize_entry(AUTHOR, author)?;
        }
        if let Some(pages) = self.pages {
            map.serialize_entry(PAGES, &page_json(pages))?;
        }
        if let Some(tag) = &self.tag {
            map.serialize_entry(TAG, tag)?;
        }
        map.serialize_entry(DATE_ADDED, &self.date_added)?;
        if let Some(note) = &self.note_content {
            map.serialize_entry(NOTE_CONTENT, note)?;
        }
        if let Some(cover) = &self.cover_url {
            map.serialize_entry(COVER_URL, cover)?;
        }
        if let Some(ts) = &self.created_at {
            map.serialize_entry(CREATED_AT, ts)?;
        }
        if let Some(ts) = &self.updated_at {
            map.serialize_entry(UPDATED_AT, ts)?;
        }
        for (key, value) in &self.extra {
            if !self.shadows(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let id = take_required::<D::Error>(&mut fields, ID)?;
        let title = take_required::<D::Error>(&mut fields, TITLE)?;
        let date_added = take_required::<D::Error>(&mut fields, DATE_ADDED)?;

        Ok(Record {
            id,
            kind: RecordKind::from_value(fields.remove(TYPE)),
            title,
            author: take_text(&mut fields, AUTHOR),
            pages: take_number(&mut fields, PAGES),
            tag: take_text(&mut fields, TAG),
            date_added,
            note_content: take_text(&mut fields, NOTE_CONTENT),
            cover_url: take_text(&mut fields, COVER_URL),
            created_at: take_text(&mut fields, CREATED_AT),
            updated_at: take_text(&mut fields, UPDATED_AT),
            extra: fields,
        })
    }
}

fn take_required<E: de::Error>(
    fields: &mut Map<String, Value>,
    key: &'static str,
) -> Result<String, E> {
    match fields.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(E::custom(format!("{key} must be a string, found {other}"))),
        None => Err(E::missing_field(key)),
    }
}

/// Takes a string value. Any other value stays in `fields`.
fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !fields.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Takes a numeric value. Any other value stays in `fields`.
fn take_number(fields: &mut Map<String, Value>, key: &str) -> Option<f64> {
    let number = fields.get(key).and_then(Value::as_f64)?;
    fields.remove(key);
    Some(number)
}

/// Whole page counts are written as JSON integers (`412`, not `412.0`).
fn page_json(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        Value::from(value as i64)
    } else {
        Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Reads numeric text the lenient way: blank is zero, anything unreadable is NaN.
fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Current time truncated to milliseconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Formats a timestamp the way records store it: RFC 3339, milliseconds, `Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders a number the way it appears in stored JSON and on screen.
///
/// Whole numbers print without a fractional part, negative zero prints as `0`, and
/// magnitudes outside `[1e-6, 1e21)` use exponent notation.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}
