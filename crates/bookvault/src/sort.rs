//! Record ordering for the list views.
//!
//! `pages` compares numerically (missing or NaN counts as zero). Every other field
//! compares as raw text, byte by byte, so the order is case-sensitive: `"Zebra"` sorts
//! before `"apple"`. Missing text counts as empty. The sort is stable, so records that
//! compare equal keep their collection order.

use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Title,
    Author,
    Pages,
    Tag,
    DateAdded,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Pages => "pages",
            SortField::Tag => "tag",
            SortField::DateAdded => "dateAdded",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "pages" => Ok(SortField::Pages),
            "tag" => Ok(SortField::Tag),
            "dateAdded" => Ok(SortField::DateAdded),
            other => Err(format!("Unknown sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the sort control.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

fn text_key(record: &Record, field: SortField) -> &str {
    match field {
        SortField::Title => &record.title,
        SortField::Author => record.author_text(),
        SortField::Tag => record.tag_text(),
        SortField::DateAdded => &record.date_added,
        SortField::Pages => "",
    }
}

/// Compares two records on one field, ascending.
pub fn compare(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Pages => a
            .page_value()
            .partial_cmp(&b.page_value())
            .unwrap_or(Ordering::Equal),
        _ => text_key(a, field).cmp(text_key(b, field)),
    }
}

/// Sorts in place. Works on owned records and on borrowed views alike.
pub fn sort_records<R: AsRef<Record>>(
    records: &mut [R],
    field: SortField,
    direction: SortDirection,
) {
    records.sort_by(|a, b| {
        let ord = compare(a.as_ref(), b.as_ref(), field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
