//! # Configuration
//!
//! Vault configuration is managed by [`confique`], which layers values from the
//! environment over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `BOOKVAULT_DATA_DIR`, `BOOKVAULT_LOG`.
//! 2. **Config file**: the TOML file passed to [`VaultConfig::load`], if it exists.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where the collection and settings files live |
//! | `log_level` | `info` | Tracing filter directive (e.g. `debug`, `bookvault=trace`) |
//!
//! Display settings (page cap and unit) are user data, not configuration; they live
//! in [`crate::settings`].

use crate::error::{Result, VaultError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "bookvault";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Directory holding the collection and settings files.
    /// When absent, the platform data directory is used.
    #[config(env = "BOOKVAULT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Tracing filter directive.
    #[config(env = "BOOKVAULT_LOG", default = "info")]
    pub log_level: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl VaultConfig {
    /// Loads configuration from the environment and, when given, a TOML file.
    /// A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = VaultConfig::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| VaultError::Config(e.to_string()))
    }

    /// The configured data directory, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        default_data_dir().ok_or_else(|| {
            VaultError::Config("Could not determine a data directory for this platform".to_string())
        })
    }
}

pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}
