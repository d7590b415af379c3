//! Display-ready record cards, shared by the list and dashboard views.

use crate::model::{format_number, Record, RecordKind};
use crate::query::{MatchSegment, SearchFilter};
use crate::settings::Settings;
use serde::Serialize;

/// Note excerpts show at most this many characters.
pub const EXCERPT_CHARS: usize = 80;
const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCard {
    pub id: String,
    pub kind: RecordKind,
    pub badge: &'static str,
    pub title: Vec<MatchSegment>,
    /// Books only.
    pub author: Option<Vec<MatchSegment>>,
    /// Books only, e.g. `"412 pages"`.
    pub pages_label: Option<String>,
    /// Notes with content only.
    pub excerpt: Option<Vec<MatchSegment>>,
    pub tag: Vec<MatchSegment>,
    pub tag_label: String,
    pub date_added: String,
    pub cover_url: Option<String>,
}

impl RecordCard {
    pub fn build(record: &Record, filter: &SearchFilter, settings: &Settings) -> Self {
        let is_book = record.is_book();
        Self {
            id: record.id.clone(),
            kind: record.kind.clone(),
            badge: if is_book { "Book" } else { "Note" },
            title: filter.segments(&record.title),
            author: is_book.then(|| filter.segments(record.author_text())),
            pages_label: is_book.then(|| {
                format!("{} {}", format_number(record.page_value()), settings.page_unit)
            }),
            excerpt: excerpt(record, filter),
            tag: filter.segments(record.tag_text()),
            tag_label: tag_label(record.tag_text()),
            date_added: record.date_added.clone(),
            cover_url: record.cover_url.clone().filter(|_| is_book),
        }
    }
}

fn excerpt(record: &Record, filter: &SearchFilter) -> Option<Vec<MatchSegment>> {
    let text = record.note_text();
    if !record.is_note() || text.is_empty() {
        return None;
    }
    let cut = text
        .char_indices()
        .nth(EXCERPT_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    let mut segments = filter.segments(&text[..cut]);
    if cut < text.len() {
        segments.push(MatchSegment::Plain(ELLIPSIS.to_string()));
    }
    Some(segments)
}

/// Normalized tag for badges: `#` prefix, words joined by hyphens.
///
/// ```
/// use bookvault::commands::cards::tag_label;
///
/// assert_eq!(tag_label("sci fi"), "#sci-fi");
/// assert_eq!(tag_label("#sci-fi"), "#sci-fi");
/// assert_eq!(tag_label(""), "");
/// ```
pub fn tag_label(tag: &str) -> String {
    let words: Vec<&str> = tag
        .split(|c: char| c == '#' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return String::new();
    }
    format!("#{}", words.join("-"))
}
