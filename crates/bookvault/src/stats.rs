//! Collection summaries for the dashboard.

use crate::model::{format_number, Record};
use crate::settings::Settings;
use serde::Serialize;
use std::collections::HashMap;

pub const NO_TOP_TAG: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub total_pages: f64,
    pub top_tag: String,
}

/// Count, page sum and most common tag.
///
/// Pages that are missing or not finite add nothing. The top tag is the tag with the
/// highest count; on a tie the one seen first wins. Untagged records are not counted
/// toward any tag, and with no tags at all the top tag is `"None"`.
pub fn calculate_stats<R: AsRef<Record>>(records: &[R]) -> Stats {
    let mut total_pages = 0.0;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for record in records {
        let record = record.as_ref();
        let pages = record.page_value();
        if pages.is_finite() {
            total_pages += pages;
        }

        let tag = record.tag_text();
        if tag.is_empty() {
            continue;
        }
        let count = counts.entry(tag).or_insert(0);
        if *count == 0 {
            first_seen.push(tag);
        }
        *count += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for tag in first_seen {
        let count = counts[tag];
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((tag, count));
        }
    }

    Stats {
        total: records.len(),
        total_pages,
        top_tag: top
            .map(|(tag, _)| tag.to_string())
            .unwrap_or_else(|| NO_TOP_TAG.to_string()),
    }
}

/// Where the collection stands against the configured page cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PageCapStatus {
    Disabled,
    Within { remaining: f64 },
    Exceeded { over_by: f64 },
}

impl PageCapStatus {
    pub fn evaluate(total_pages: f64, settings: &Settings) -> Self {
        if !settings.cap_enabled() {
            return PageCapStatus::Disabled;
        }
        if total_pages > settings.page_cap {
            PageCapStatus::Exceeded {
                over_by: total_pages - settings.page_cap,
            }
        } else {
            PageCapStatus::Within {
                remaining: settings.page_cap - total_pages,
            }
        }
    }

    pub fn is_exceeded(&self) -> bool {
        matches!(self, PageCapStatus::Exceeded { .. })
    }

    /// Warning text for an exceeded cap.
    pub fn warning(&self, total_pages: f64, settings: &Settings) -> Option<String> {
        match self {
            PageCapStatus::Exceeded { over_by } => Some(format!(
                "You have logged {total} {unit}, which is {over} over your cap of {cap} {unit}.",
                total = format_number(total_pages),
                over = format_number(*over_by),
                cap = format_number(settings.page_cap),
                unit = settings.page_unit,
            )),
            _ => None,
        }
    }
}
