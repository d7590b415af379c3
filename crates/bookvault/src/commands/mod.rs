//! # Command Layer
//!
//! Each user action lives in its own submodule as a plain function over the stores.
//! Commands carry the business flow (build, validate, persist, summarize) and return
//! structured data; whoever renders the vault decides how that data looks.
//!
//! ## What Commands Do NOT Do
//!
//! - **Output**: no stdout/stderr, no HTML. Views are structs, messages are data.
//! - **Process control**: errors are returned, never turned into exits or panics.
//! - **User interaction**: confirmations (such as before a delete) belong to the UI.
//!
//! ## Structured Returns
//!
//! Mutating commands return [`CmdResult`]:
//! - `affected_records`: the records that were created, changed or removed
//! - `paths`: files written (export)
//! - `messages`: status lines with a [`MessageLevel`]
//! - `field_errors`: per-field validation problems when a submission was blocked
//! - `settings`: the settings as saved (settings command)
//!
//! The read-only views ([`list`], [`dashboard`]) return their own view structs.
//!
//! ## Command Modules
//!
//! - [`submit`]: Create or edit a record from form input
//! - [`delete`]: Remove a record
//! - [`import`]: Replace the collection from a JSON file
//! - [`export`]: Write the collection to a dated JSON file
//! - [`list`]: Searched, sorted record cards
//! - [`dashboard`]: Searched cards plus stats and page-cap status
//! - [`settings`]: Save page cap and unit from form input
//! - [`cards`]: Card building shared by both views

use crate::model::Record;
use crate::settings::Settings;
use crate::validation::ValidationErrors;
use serde::Serialize;
use std::path::PathBuf;

pub mod cards;
pub mod dashboard;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod settings;
pub mod submit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
    pub field_errors: Option<ValidationErrors>,
    pub settings: Option<Settings>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    /// True when the command was blocked by validation.
    pub fn is_rejected(&self) -> bool {
        self.field_errors.is_some()
    }
}
