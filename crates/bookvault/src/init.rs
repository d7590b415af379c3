//! Opening a vault on disk.
//!
//! [`initialize`] resolves the data directory from the configuration and opens the API
//! on an [`FsBackend`] rooted there. The directory is created on the first write, so
//! opening a fresh vault touches nothing.

use crate::api::VaultApi;
use crate::config::VaultConfig;
use crate::error::Result;
use crate::store::fs_backend::FsBackend;

pub fn initialize(config: &VaultConfig) -> Result<VaultApi<FsBackend>> {
    let data_dir = config.data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), "opening vault");
    VaultApi::open(FsBackend::new(data_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list::ListQuery;
    use crate::settings::Settings;
    use crate::test_utils::sample_book;

    #[test]
    fn test_fresh_vault_is_empty_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("vault");
        let api = initialize(&VaultConfig {
            data_dir: Some(root.clone()),
            ..Default::default()
        })
        .unwrap();

        assert!(api.records().is_empty());
        assert_eq!(api.settings(), &Settings::default());
        assert_eq!(api.catalog().backend().root(), root.as_path());
        assert!(!root.exists());
    }

    #[test]
    fn test_reopen_sees_saved_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = VaultConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let mut api = initialize(&config).unwrap();
        api.import_text(&serde_json::to_string(&[sample_book("item_1", "Dune")]).unwrap())
            .unwrap();
        api.save_settings("100", "pages").unwrap();

        let reopened = initialize(&config).unwrap();
        assert_eq!(reopened.records(), api.records());
        assert_eq!(reopened.settings().page_cap, 100.0);
        assert_eq!(reopened.records_view(&ListQuery::default()).cards.len(), 1);
    }
}
