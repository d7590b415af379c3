//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for front ends. It owns the two stores and the current [`Settings`], fills in the
//! clock where commands need one, and dispatches.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: it returns view structs and `CmdResult`s, never markup
//!
//! ## Settings
//!
//! Settings are read once when the API is opened and replaced whenever
//! [`VaultApi::save_settings`] succeeds. Views always use the cached copy.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `VaultApi<FsBackend>` (see [`crate::init::initialize`])
//! - Testing: `VaultApi<MemBackend>`

use crate::commands::dashboard::DashboardView;
use crate::commands::list::{ListQuery, RecordsView};
use crate::commands::submit::RecordDraft;
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{self, Record};
use crate::settings::{Settings, SettingsStore};
use crate::stats::{calculate_stats, Stats};
use crate::validation::{validate_field, Field, ValidationErrors};
use crate::store::backend::StorageBackend;
use crate::store::CatalogStore;
use chrono::Utc;
use std::path::Path;

pub struct VaultApi<B: StorageBackend> {
    catalog: CatalogStore<B>,
    settings_store: SettingsStore<B>,
    settings: Settings,
}

impl<B: StorageBackend + Clone> VaultApi<B> {
    /// Opens both stores on one backend.
    pub fn open(backend: B) -> Result<Self> {
        let catalog = CatalogStore::open(backend.clone())?;
        Self::new(catalog, SettingsStore::new(backend))
    }
}

impl<B: StorageBackend> VaultApi<B> {
    pub fn new(catalog: CatalogStore<B>, settings_store: SettingsStore<B>) -> Result<Self> {
        let settings = settings_store.load()?;
        Ok(Self {
            catalog,
            settings_store,
            settings,
        })
    }

    pub fn catalog(&self) -> &CatalogStore<B> {
        &self.catalog
    }

    pub fn records(&self) -> &[Record] {
        self.catalog.records()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn submit(&mut self, draft: &RecordDraft, editing_id: Option<&str>) -> Result<CmdResult> {
        commands::submit::run(&mut self.catalog, draft, editing_id, model::now())
    }

    /// Checks one form field as the user leaves it. Nothing is stored.
    pub fn check_field(&self, draft: &RecordDraft, field: Field) -> ValidationErrors {
        let record = commands::submit::build_record(draft, None, model::now());
        validate_field(&record, field)
    }

    pub fn delete(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.catalog, id)
    }

    pub fn import_text(&mut self, text: &str) -> Result<CmdResult> {
        commands::import::run(&mut self.catalog, text)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run_file(&mut self.catalog, path)
    }

    /// Exports into `dir`, naming the file for today's UTC date.
    pub fn export(&self, dir: &Path) -> Result<CmdResult> {
        commands::export::run(&self.catalog, dir, Utc::now().date_naive())
    }

    pub fn save_settings(&mut self, page_cap: &str, page_unit: &str) -> Result<CmdResult> {
        let result = commands::settings::run(&self.settings_store, page_cap, page_unit)?;
        if let Some(saved) = &result.settings {
            self.settings = saved.clone();
        }
        Ok(result)
    }

    /// Re-reads the collection and settings from storage.
    pub fn reload(&mut self) -> Result<()> {
        self.catalog.reload()?;
        self.settings = self.settings_store.load()?;
        Ok(())
    }

    pub fn records_view(&self, query: &ListQuery) -> RecordsView {
        commands::list::run(self.catalog.records(), &self.settings, query)
    }

    pub fn dashboard(&self, search: &str, case_sensitive: bool) -> DashboardView {
        commands::dashboard::run(self.catalog.records(), &self.settings, search, case_sensitive)
    }

    pub fn stats(&self) -> Stats {
        calculate_stats(self.catalog.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordKind;
    use crate::settings::SETTINGS_KEY;
    use crate::store::mem_backend::MemBackend;
    use crate::store::RECORDS_KEY;

    fn draft(title: &str) -> RecordDraft {
        RecordDraft {
            kind: RecordKind::Book,
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            pages: "250".to_string(),
            tag: "#fantasy".to_string(),
            date_added: "2024-05-01".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_reads_saved_settings() {
        let backend = MemBackend::new();
        backend
            .write(SETTINGS_KEY, r#"{"pageCap":100,"pageUnit":"chapters"}"#)
            .unwrap();
        let api = VaultApi::open(backend).unwrap();
        assert_eq!(api.settings(), &Settings::new(100.0, "chapters"));
    }

    #[test]
    fn test_submit_then_view() {
        let mut api = VaultApi::open(MemBackend::new()).unwrap();
        api.submit(&draft("A Wizard of Earthsea"), None).unwrap();
        api.submit(&draft("The Tombs of Atuan"), None).unwrap();

        let view = api.records_view(&ListQuery {
            search: "tombs".to_string(),
            ..Default::default()
        });
        assert_eq!(view.cards.len(), 1);
        assert_eq!(api.stats().total_pages, 500.0);
    }

    #[test]
    fn test_saved_settings_apply_to_views() {
        let mut api = VaultApi::open(MemBackend::new()).unwrap();
        api.submit(&draft("A Wizard of Earthsea"), None).unwrap();
        api.save_settings("200", "leaves").unwrap();

        let dash = api.dashboard("", false);
        assert!(dash.page_cap.is_exceeded());
        assert_eq!(dash.cards[0].pages_label.as_deref(), Some("250 leaves"));
    }

    #[test]
    fn test_delete_and_reload() {
        let backend = MemBackend::new();
        let mut api = VaultApi::open(backend.clone()).unwrap();
        let result = api.submit(&draft("A Wizard of Earthsea"), None).unwrap();
        let id = result.affected_records[0].id.clone();

        api.delete(&id).unwrap();
        assert!(api.records().is_empty());

        backend
            .write(
                RECORDS_KEY,
                r#"[{"id":"item_x","title":"External","dateAdded":"2024-01-01"}]"#,
            )
            .unwrap();
        api.reload().unwrap();
        assert_eq!(api.records()[0].title, "External");
    }

    #[test]
    fn test_import_text_dispatches() {
        let mut api = VaultApi::open(MemBackend::new()).unwrap();
        assert!(api.import_text("{}").is_err());
        api.import_text(r#"[{"id":"a","title":"T","dateAdded":"2024-01-01"}]"#)
            .unwrap();
        assert_eq!(api.catalog().len(), 1);
    }

    #[test]
    fn test_check_field_on_draft() {
        let api = VaultApi::open(MemBackend::new()).unwrap();
        let mut blank = draft("Dune");
        blank.author = "   ".to_string();

        let errors = api.check_field(&blank, Field::Author);
        assert_eq!(
            errors.first(Field::Author),
            Some(crate::validation::AUTHOR_REQUIRED)
        );
        assert!(api.check_field(&blank, Field::Title).is_empty());
        assert!(api.records().is_empty());
    }

    #[test]
    fn test_import_keeps_ids_unique() {
        let mut api = VaultApi::open(MemBackend::new()).unwrap();
        let err = api
            .import_text(
                r#"[{"id":"a","title":"One","dateAdded":"2024-01-01"},
                    {"id":"a","title":"Two","dateAdded":"2024-01-01"}]"#,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::VaultError::Import(crate::error::ImportError::DuplicateId(_))
        ));
        assert!(api.records().is_empty());
    }
}
