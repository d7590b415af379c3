use super::backend::StorageBackend;
use crate::error::{Result, VaultError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend: one JSON file per key inside a data directory.
///
/// Keys are mapped to file names by replacing every character outside
/// `[A-Za-z0-9-]` with `_`, so `book&vault:data` lives in `book_vault_data.json`.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(file_name_for(key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VaultError::Io)?;
        }
        Ok(())
    }
}

fn key_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn file_name_for(key: &str) -> String {
    format!("{}.json", key_stem(key))
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(VaultError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.path_for(key);

        // Atomic write
        let tmp_file = self.root.join(format!(".{}-{}.tmp", key_stem(key), Uuid::new_v4()));
        fs::write(&tmp_file, value).map_err(VaultError::Io)?;
        if let Err(err) = fs::rename(&tmp_file, &target) {
            let _ = fs::remove_file(&tmp_file);
            return Err(VaultError::Io(err));
        }

        tracing::trace!(path = %target.display(), bytes = value.len(), "wrote store file");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(VaultError::Io)?;
        }
        Ok(())
    }
}
