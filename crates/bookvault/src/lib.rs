//! # Bookvault Architecture
//!
//! Bookvault is a **UI-agnostic catalog library** for books and notes. It validates
//! what users enter, stores the collection as plain JSON, and turns a raw collection
//! plus a search into ordered, highlighted, cap-aware views. Rendering those views is
//! left to whichever front end embeds it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns stores and settings      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Submit, delete, import, export, settings                 │
//! │  - Records list and dashboard views                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (validation.rs, query.rs, sort.rs, stats.rs)        │
//! │  - Pure functions over records                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, settings.rs)                        │
//! │  - CatalogStore, SettingsStore over a StorageBackend        │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Everything from the API inward:
//! - Takes regular Rust arguments and returns regular Rust types
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** exits the process
//!
//! ## Testing Strategy
//!
//! 1. **Engine and commands**: unit tests next to the code, on `MemBackend`.
//! 2. **Storage**: filesystem behavior in `tests/`, on temp directories.
//! 3. **Round trips**: export then import in `tests/`.
//!
//! ## Module Overview
//!
//! - [`model`]: `Record`, `RecordKind`, stored JSON shape
//! - [`validation`]: field rules for records
//! - [`query`]: search pattern compilation, record matching, highlighting
//! - [`sort`]: ordering by field and direction
//! - [`stats`]: totals, top tag, page-cap status
//! - [`settings`]: page cap and unit, with their store
//! - [`store`]: the catalog store and storage backends
//! - [`commands`]: user actions and views
//! - [`api`]: facade for front ends
//! - [`config`], [`init`], [`logging`]: configuration, startup, tracing
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod model;
pub mod query;
pub mod settings;
pub mod sort;
pub mod stats;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Result, VaultError};
