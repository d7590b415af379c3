//! The dashboard: searched cards in collection order, with stats and the page cap.

use crate::commands::cards::RecordCard;
use crate::model::Record;
use crate::query::SearchFilter;
use crate::settings::Settings;
use crate::stats::{calculate_stats, PageCapStatus, Stats};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    /// Whether to offer the "add item" action.
    pub offer_add: bool,
}

pub const EMPTY_VAULT: EmptyState = EmptyState {
    title: "Your vault is empty",
    hint: "Start by adding your first book or note.",
    offer_add: true,
};

pub const EMPTY_SEARCH: EmptyState = EmptyState {
    title: "No results found",
    hint: "Try a different search term.",
    offer_add: false,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub cards: Vec<RecordCard>,
    /// Computed over the whole collection, not just the search results.
    pub stats: Stats,
    pub page_cap: PageCapStatus,
    pub cap_warning: Option<String>,
    pub empty: Option<EmptyState>,
}

pub fn run(
    records: &[Record],
    settings: &Settings,
    search: &str,
    case_sensitive: bool,
) -> DashboardView {
    let _span = tracing::debug_span!("dashboard_view", search = %search).entered();

    let filter = SearchFilter::new(search, case_sensitive);
    let shown = filter.apply(records);

    let stats = calculate_stats(records);
    let page_cap = PageCapStatus::evaluate(stats.total_pages, settings);
    let cap_warning = page_cap.warning(stats.total_pages, settings);
    if cap_warning.is_some() {
        tracing::debug!(total_pages = stats.total_pages, cap = settings.page_cap, "page cap exceeded");
    }

    let empty = shown.is_empty().then(|| {
        if search.trim().is_empty() {
            EMPTY_VAULT
        } else {
            EMPTY_SEARCH
        }
    });

    DashboardView {
        cards: shown
            .into_iter()
            .map(|r| RecordCard::build(r, &filter, settings))
            .collect(),
        stats,
        page_cap,
        cap_warning,
        empty,
    }
}
