use super::backend::StorageBackend;
use crate::error::{Result, VaultError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the vault is single-threaded, so the
/// `StorageBackend` trait can use `&self` for all methods. Clones share the same
/// entries, which lets a catalog store and a settings store sit on one backend the
/// way they share one local storage area in the browser.
#[derive(Clone, Default)]
pub struct MemBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
    simulate_write_error: Rc<Cell<bool>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Raw stored text, for assertions on the persisted form.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
