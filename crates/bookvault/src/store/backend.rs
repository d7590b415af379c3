use crate::error::Result;

/// Abstract interface for raw key-value persistence.
///
/// The stores decide *what* is saved (a JSON array of records, a settings object);
/// a backend only decides *where* the text lives. Every value is a complete JSON
/// document, replaced as a whole on each write.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) when nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
