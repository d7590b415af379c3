//! Record validation.
//!
//! [`validate_record`] checks a candidate record against the catalog's field rules and
//! returns every problem it finds, keyed by field. An empty [`ValidationErrors`] means
//! the record may be stored.
//!
//! Rules:
//! - `title`: required; words separated by single spaces with no leading or trailing
//!   whitespace; no word repeated twice in a row (`"the the cat"`).
//! - `author` (books only): required; same spacing rule as the title.
//! - `pages` (books only): required; a non-negative number with at most two decimals.
//! - `tag`: required; letters and `#`, joined by single spaces or hyphens (`#sci-fi`).
//! - `dateAdded`: required; `YYYY-MM-DD` shape. The calendar itself is not checked, so
//!   `2023-02-30` passes.
//!
//! Rules for a field are independent: a title can fail the spacing rule and the
//! duplicate-word rule at the same time, and both messages are reported.

use crate::model::{format_number, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

static SINGLE_SPACED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+(?: \S+)*$").expect("spacing pattern is valid"));

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word pattern is valid"));

static PAGES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$").expect("pages pattern is valid")
});

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[#A-Za-z]+(?:[ \-#][A-Za-z]+)*$").expect("tag pattern is valid")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("date pattern is valid")
});

pub const TITLE_REQUIRED: &str = "Title is required.";
pub const TITLE_SPACING: &str = "Title must not have leading/trailing or double spaces.";
pub const TITLE_DUPLICATE_WORD: &str = "Title contains a duplicate consecutive word.";
pub const AUTHOR_REQUIRED: &str = "Author is required.";
pub const AUTHOR_SPACING: &str = "Author must not have leading/trailing or double spaces.";
pub const PAGES_REQUIRED: &str = "Pages is required.";
pub const PAGES_FORMAT: &str = "Pages must be a non-negative number with at most two decimals.";
pub const TAG_REQUIRED: &str = "Tag is required.";
pub const TAG_FORMAT: &str = "Tag: use letters, #, spaces, or hyphens (e.g. #sci-fi).";
pub const DATE_REQUIRED: &str = "Date is required.";
pub const DATE_FORMAT: &str = "Date must be in YYYY-MM-DD format.";

/// A record field that carries validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Author,
    Pages,
    Tag,
    DateAdded,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::Pages,
        Field::Tag,
        Field::DateAdded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Pages => "pages",
            Field::Tag => "tag",
            Field::DateAdded => "dateAdded",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages per field, in field order. Empty means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one problem.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// All messages for a field, empty when the field passed.
    pub fn messages(&self, field: Field) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for a field, the one a form shows inline.
    pub fn first(&self, field: Field) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.fields.iter().map(|(f, m)| (*f, m.as_slice()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Checks a record against every rule that applies to its kind.
///
/// # Examples
/// ```
/// use bookvault::model::{Record, RecordKind};
/// use bookvault::validation::{validate_record, Field};
///
/// let mut note = Record::new("item_1", RecordKind::Note, "Reading list", "2024-05-01");
/// note.tag = Some("#ideas".to_string());
/// assert!(validate_record(&note).is_empty());
///
/// note.title = "the the list".to_string();
/// assert!(validate_record(&note).contains(Field::Title));
/// ```
pub fn validate_record(record: &Record) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in Field::ALL {
        check_field(record, field, &mut errors);
    }
    errors
}

/// Checks one field only. Fields exempt for the record's kind never report.
pub fn validate_field(record: &Record, field: Field) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_field(record, field, &mut errors);
    errors
}

fn check_field(record: &Record, field: Field, errors: &mut ValidationErrors) {
    match field {
        Field::Title => check_title(&record.title, errors),
        Field::Author if record.is_book() => check_author(record.author.as_deref(), errors),
        Field::Pages if record.is_book() => check_pages(record.pages, errors),
        Field::Author | Field::Pages => {}
        Field::Tag => check_tag(record.tag.as_deref(), errors),
        Field::DateAdded => check_date(&record.date_added, errors),
    }
}

fn check_title(title: &str, errors: &mut ValidationErrors) {
    if title.trim().is_empty() {
        errors.add(Field::Title, TITLE_REQUIRED);
        return;
    }
    if !SINGLE_SPACED.is_match(title) {
        errors.add(Field::Title, TITLE_SPACING);
    }
    if has_repeated_word(title) {
        errors.add(Field::Title, TITLE_DUPLICATE_WORD);
    }
}

fn check_author(author: Option<&str>, errors: &mut ValidationErrors) {
    match author {
        Some(a) if !a.trim().is_empty() => {
            if !SINGLE_SPACED.is_match(a) {
                errors.add(Field::Author, AUTHOR_SPACING);
            }
        }
        _ => errors.add(Field::Author, AUTHOR_REQUIRED),
    }
}

fn check_pages(pages: Option<f64>, errors: &mut ValidationErrors) {
    match pages {
        Some(p) if !p.is_nan() => {
            if !PAGES.is_match(&format_number(p)) {
                errors.add(Field::Pages, PAGES_FORMAT);
            }
        }
        _ => errors.add(Field::Pages, PAGES_REQUIRED),
    }
}

fn check_tag(tag: Option<&str>, errors: &mut ValidationErrors) {
    match tag {
        Some(t) if !t.trim().is_empty() => {
            if !TAG.is_match(t) {
                errors.add(Field::Tag, TAG_FORMAT);
            }
        }
        _ => errors.add(Field::Tag, TAG_REQUIRED),
    }
}

fn check_date(date: &str, errors: &mut ValidationErrors) {
    if date.trim().is_empty() {
        errors.add(Field::DateAdded, DATE_REQUIRED);
    } else if !DATE.is_match(date) {
        errors.add(Field::DateAdded, DATE_FORMAT);
    }
}

/// True when a word appears twice in a row with only whitespace between the two.
/// Comparison ignores ASCII case.
fn has_repeated_word(text: &str) -> bool {
    let mut previous: Option<regex::Match<'_>> = None;
    for word in WORD.find_iter(text) {
        if let Some(prev) = previous {
            let gap = &text[prev.end()..word.start()];
            if !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && prev.as_str().eq_ignore_ascii_case(word.as_str())
            {
                return true;
            }
        }
        previous = Some(word);
    }
    false
}
