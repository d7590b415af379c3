//! The records view: every record that passes the search, in the chosen order.

use crate::commands::cards::RecordCard;
use crate::model::Record;
use crate::query::SearchFilter;
use crate::settings::Settings;
use crate::sort::{sort_records, SortDirection, SortField};
use serde::Serialize;

pub const NO_RESULTS: &str = "No results found.";
pub const NO_RECORDS: &str = "No items yet. Add your first book or note!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub case_sensitive: bool,
    pub sort_field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsView {
    pub cards: Vec<RecordCard>,
    /// `"N result(s) found."` while a search is typed.
    pub status: Option<String>,
    pub empty_message: Option<&'static str>,
}

pub fn run(records: &[Record], settings: &Settings, query: &ListQuery) -> RecordsView {
    let _span = tracing::debug_span!(
        "records_view",
        search = %query.search,
        sort = query.sort_field.as_str()
    )
    .entered();

    let filter = SearchFilter::new(&query.search, query.case_sensitive);
    let mut shown = filter.apply(records);
    sort_records(&mut shown, query.sort_field, query.direction);

    let searching = !query.search.trim().is_empty();
    let status = searching.then(|| format!("{} result(s) found.", shown.len()));
    let empty_message = shown
        .is_empty()
        .then_some(if searching { NO_RESULTS } else { NO_RECORDS });

    tracing::debug!(shown = shown.len(), total = records.len(), "records filtered");

    RecordsView {
        cards: shown
            .into_iter()
            .map(|r| RecordCard::build(r, &filter, settings))
            .collect(),
        status,
        empty_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MatchSegment;
    use crate::test_utils::{sample_book, sample_note};

    fn collection() -> Vec<Record> {
        let mut emma = sample_book("item_2", "Emma");
        emma.author = Some("Jane Austen".to_string());
        emma.pages = Some(50.0);
        emma.tag = Some("#classic".to_string());
        let mut dune = sample_book("item_1", "Dune");
        dune.pages = Some(200.0);
        let plan = sample_note("item_3", "plan");
        vec![emma, dune, plan]
    }

    fn titles(view: &RecordsView) -> Vec<String> {
        view.cards
            .iter()
            .map(|c| crate::query::plain_text(&c.title))
            .collect()
    }

    #[test]
    fn test_no_search_shows_everything_sorted() {
        let view = run(&collection(), &Settings::default(), &ListQuery::default());
        assert_eq!(titles(&view), vec!["Dune", "Emma", "plan"]);
        assert!(view.status.is_none());
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn test_search_highlights_and_counts() {
        let query = ListQuery {
            search: "EMMA".to_string(),
            ..Default::default()
        };
        let view = run(&collection(), &Settings::default(), &query);
        assert_eq!(view.status.as_deref(), Some("1 result(s) found."));
        assert_eq!(view.cards[0].title, vec![MatchSegment::Match("Emma".to_string())]);
    }

    #[test]
    fn test_case_sensitive_search() {
        let query = ListQuery {
            search: "EMMA".to_string(),
            case_sensitive: true,
            ..Default::default()
        };
        let view = run(&collection(), &Settings::default(), &query);
        assert!(view.cards.is_empty());
        assert_eq!(view.status.as_deref(), Some("0 result(s) found."));
        assert_eq!(view.empty_message, Some(NO_RESULTS));
    }

    #[test]
    fn test_invalid_pattern_shows_nothing() {
        let query = ListQuery {
            search: "(abc".to_string(),
            ..Default::default()
        };
        let view = run(&collection(), &Settings::default(), &query);
        assert!(view.cards.is_empty());
        assert_eq!(view.empty_message, Some(NO_RESULTS));
    }

    #[test]
    fn test_sort_by_pages_descending() {
        let query = ListQuery {
            sort_field: SortField::Pages,
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let view = run(&collection(), &Settings::default(), &query);
        assert_eq!(titles(&view), vec!["Dune", "Emma", "plan"]);
    }

    #[test]
    fn test_empty_collection_message() {
        let view = run(&[], &Settings::default(), &ListQuery::default());
        assert_eq!(view.empty_message, Some(NO_RECORDS));
    }
}
