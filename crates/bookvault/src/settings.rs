//! User display settings.
//!
//! Two values, stored separately from the collection under [`SETTINGS_KEY`]:
//!
//! - `pageCap`: a reading target. When the collection's total pages exceed it, the
//!   dashboard shows a warning. `0` turns the warning off.
//! - `pageUnit`: the label used when showing page counts (`"pages"`, `"chapters"`, ...).
//!
//! Settings never affect validation.

use crate::error::Result;
use crate::store::backend::StorageBackend;
use serde::{Deserialize, Serialize};

pub const SETTINGS_KEY: &str = "book&vault:settings";
pub const DEFAULT_PAGE_UNIT: &str = "pages";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub page_cap: f64,
    #[serde(default = "default_page_unit")]
    pub page_unit: String,
}

fn default_page_unit() -> String {
    DEFAULT_PAGE_UNIT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_cap: 0.0,
            page_unit: default_page_unit(),
        }
    }
}

impl Settings {
    pub fn new(page_cap: f64, page_unit: impl Into<String>) -> Self {
        Self {
            page_cap,
            page_unit: page_unit.into(),
        }
        .normalized()
    }

    /// Clamps the cap to a non-negative finite number and fills an empty unit.
    pub fn normalized(mut self) -> Self {
        if !self.page_cap.is_finite() || self.page_cap < 0.0 {
            self.page_cap = 0.0;
        }
        let unit = self.page_unit.trim();
        self.page_unit = if unit.is_empty() {
            default_page_unit()
        } else {
            unit.to_string()
        };
        self
    }

    pub fn cap_enabled(&self) -> bool {
        self.page_cap > 0.0
    }
}

/// Loads and saves [`Settings`] through a storage backend.
pub struct SettingsStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Reads the saved settings, or the defaults when nothing was saved yet.
    pub fn load(&self) -> Result<Settings> {
        let raw = self.backend.read(SETTINGS_KEY)?;
        let settings = match raw {
            Some(text) => serde_json::from_str::<Settings>(&text)?.normalized(),
            None => Settings::default(),
        };
        tracing::debug!(
            page_cap = settings.page_cap,
            page_unit = %settings.page_unit,
            "settings loaded"
        );
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<Settings> {
        let settings = settings.clone().normalized();
        let text = serde_json::to_string(&settings)?;
        self.backend.write(SETTINGS_KEY, &text)?;
        tracing::debug!(page_cap = settings.page_cap, "settings saved");
        Ok(settings)
    }
}
