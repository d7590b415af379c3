//! # Storage Layer
//!
//! [`CatalogStore`] owns the authoritative collection of records. Nothing else holds a
//! mutable copy: views take a read-only snapshot through [`CatalogStore::records`] and
//! changes go through the four mutations.
//!
//! ## Persistence Model
//!
//! The whole collection is one JSON array stored under [`RECORDS_KEY`]. Every mutation
//! rewrites the entire array:
//!
//! 1. Build the new collection next to the current one.
//! 2. Serialize and write it through the [`StorageBackend`].
//! 3. Only after the write succeeds, swap it in.
//!
//! A failed write therefore leaves both the stored file and the in-memory collection as
//! they were.
//!
//! ## Mutations
//!
//! | Operation | Checks | Failure |
//! |-----------|--------|---------|
//! | [`add`](CatalogStore::add) | validation, unique id | `Validation`, `DuplicateId` |
//! | [`update`](CatalogStore::update) | validation, id exists | `Validation`, `RecordNotFound` |
//! | [`delete`](CatalogStore::delete) | id exists | `RecordNotFound` |
//! | [`replace_all`](CatalogStore::replace_all) | none (import checks structure first) | I/O only |
//!
//! ## Loading
//!
//! An absent key loads as an empty collection. Records without a `type` load as books.
//! There is no other migration.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key in the data directory.
//! - [`mem_backend::MemBackend`]: for testing without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── book_vault_data.json       # The collection
//! └── book_vault_settings.json   # Settings
//! ```

use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::validation::validate_record;
use backend::StorageBackend;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub const RECORDS_KEY: &str = "book&vault:data";

pub struct CatalogStore<B: StorageBackend> {
    backend: B,
    records: Vec<Record>,
}

impl<B: StorageBackend> CatalogStore<B> {
    /// Opens the store and loads whatever the backend holds.
    pub fn open(backend: B) -> Result<Self> {
        let records = load_records(&backend)?;
        Ok(Self { backend, records })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read-only snapshot of the collection, in stored order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a new record.
    pub fn add(&mut self, record: Record) -> Result<()> {
        let _span = tracing::debug_span!("catalog_add", id = %record.id).entered();
        ensure_valid(&record)?;
        if self.get(&record.id).is_some() {
            return Err(VaultError::DuplicateId(record.id));
        }

        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)
    }

    /// Replaces the record with the same id, keeping its position.
    pub fn update(&mut self, record: Record) -> Result<()> {
        let _span = tracing::debug_span!("catalog_update", id = %record.id).entered();
        ensure_valid(&record)?;
        let position = self
            .position(&record.id)
            .ok_or_else(|| VaultError::RecordNotFound(record.id.clone()))?;

        let mut next = self.records.clone();
        next[position] = record;
        self.commit(next)
    }

    /// Removes a record and returns it.
    pub fn delete(&mut self, id: &str) -> Result<Record> {
        let _span = tracing::debug_span!("catalog_delete", id).entered();
        let position = self
            .position(id)
            .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))?;

        let mut next = self.records.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        Ok(removed)
    }

    /// Swaps in a whole new collection.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        let _span = tracing::debug_span!("catalog_replace_all", count = records.len()).entered();
        self.commit(records)
    }

    /// Re-reads the collection from the backend, dropping the in-memory copy.
    pub fn reload(&mut self) -> Result<()> {
        self.records = load_records(&self.backend)?;
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn commit(&mut self, next: Vec<Record>) -> Result<()> {
        let text = serde_json::to_string(&next)?;
        self.backend.write(RECORDS_KEY, &text)?;
        tracing::debug!(count = next.len(), "collection persisted");
        self.records = next;
        Ok(())
    }
}

fn ensure_valid(record: &Record) -> Result<()> {
    let errors = validate_record(record);
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(fields = errors.len(), "record rejected by validation");
        Err(VaultError::Validation(errors))
    }
}

fn load_records<B: StorageBackend>(backend: &B) -> Result<Vec<Record>> {
    let records: Vec<Record> = match backend.read(RECORDS_KEY)? {
        Some(text) => serde_json::from_str(&text)?,
        None => Vec::new(),
    };
    tracing::debug!(count = records.len(), "collection loaded");
    Ok(records)
}
