//! # Search Queries
//!
//! The search box takes a text pattern in [`regex`] syntax, not a literal substring.
//! [`compile`] turns the raw input into a [`CompiledQuery`], or `None` when the input is
//! empty or not a valid pattern. Compilation never fails loudly: a half-typed pattern
//! such as `(abc` simply matches nothing until it becomes valid again.
//!
//! A compiled query does two things:
//! - [`CompiledQuery::is_match`]: does the text contain a match?
//! - [`CompiledQuery::segments`] / [`CompiledQuery::highlight`]: split or mark the text
//!   so every matched span can be shown highlighted. Zero-length matches (from patterns
//!   like `a*`) are not marked.
//!
//! ## Record Matching
//!
//! [`SearchFilter`] applies a query to whole records. A record matches when any of its
//! title, author, tag, or note content matches; absent fields count as empty text.
//!
//! | Input | Filter | Matches |
//! |-------|--------|---------|
//! | blank (after trimming) | [`SearchFilter::All`] | every record, no highlighting |
//! | valid pattern | [`SearchFilter::Matching`] | records with a matching field |
//! | invalid pattern | [`SearchFilter::Nothing`] | no record |

use crate::model::Record;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// A piece of highlighted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

impl MatchSegment {
    pub fn text(&self) -> &str {
        match self {
            MatchSegment::Plain(t) | MatchSegment::Match(t) => t,
        }
    }
}

/// Joins segments back into one string, wrapping matches in `open`/`close`.
pub fn render_segments(segments: &[MatchSegment], open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            MatchSegment::Plain(t) => out.push_str(t),
            MatchSegment::Match(t) => {
                out.push_str(open);
                out.push_str(t);
                out.push_str(close);
            }
        }
    }
    out
}

/// The plain text of a segment list, markers dropped.
pub fn plain_text(segments: &[MatchSegment]) -> String {
    segments.iter().map(MatchSegment::text).collect()
}

#[derive(Debug, Clone)]
pub struct CompiledQuery {
    regex: Regex,
}

/// Compiles a search pattern.
///
/// Returns `None` for empty input and for input that is not a valid pattern.
pub fn compile(raw: &str, case_sensitive: bool) -> Option<CompiledQuery> {
    if raw.is_empty() {
        return None;
    }
    match RegexBuilder::new(raw)
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(regex) => Some(CompiledQuery { regex }),
        Err(err) => {
            tracing::trace!(pattern = raw, error = %err, "search pattern rejected");
            None
        }
    }
}

impl CompiledQuery {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn segments(&self, text: &str) -> Vec<MatchSegment> {
        let mut segments = Vec::new();
        let mut last = 0;

        for m in self.regex.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            if m.start() > last {
                segments.push(MatchSegment::Plain(text[last..m.start()].to_string()));
            }
            segments.push(MatchSegment::Match(m.as_str().to_string()));
            last = m.end();
        }

        if last < text.len() {
            segments.push(MatchSegment::Plain(text[last..].to_string()));
        }

        segments
    }

    /// Wraps every matched span in `<mark>` tags.
    pub fn highlight(&self, text: &str) -> String {
        render_segments(&self.segments(text), MARK_OPEN, MARK_CLOSE)
    }

    /// Whether any searchable field of the record matches.
    pub fn matches_record(&self, record: &Record) -> bool {
        [
            record.title.as_str(),
            record.author_text(),
            record.tag_text(),
            record.note_text(),
        ]
        .iter()
        .any(|field| self.is_match(field))
    }
}

#[derive(Debug, Clone)]
pub enum SearchFilter {
    All,
    Matching(CompiledQuery),
    Nothing,
}

impl SearchFilter {
    pub fn new(raw: &str, case_sensitive: bool) -> Self {
        if raw.trim().is_empty() {
            return SearchFilter::All;
        }
        match compile(raw, case_sensitive) {
            Some(query) => SearchFilter::Matching(query),
            None => SearchFilter::Nothing,
        }
    }

    /// True unless the filter shows everything.
    pub fn is_active(&self) -> bool {
        !matches!(self, SearchFilter::All)
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Matching(query) => query.matches_record(record),
            SearchFilter::Nothing => false,
        }
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Segments for display. Without an active pattern the text is one plain segment.
    pub fn segments(&self, text: &str) -> Vec<MatchSegment> {
        match self {
            SearchFilter::Matching(query) => query.segments(text),
            _ if text.is_empty() => Vec::new(),
            _ => vec![MatchSegment::Plain(text.to_string())],
        }
    }
}
