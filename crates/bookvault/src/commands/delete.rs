use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::CatalogStore;

/// Removes a record by id. Asking the user to confirm is the caller's job.
pub fn run<B: StorageBackend>(store: &mut CatalogStore<B>, id: &str) -> Result<CmdResult> {
    let removed = store.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted \"{}\".", removed.title)));
    Ok(result.with_affected_records(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use crate::test_utils::{mem_store, sample_book, sample_note};

    #[test]
    fn test_delete_reports_title() {
        let mut store = mem_store();
        store.add(sample_book("item_1", "Dune")).unwrap();
        store.add(sample_note("item_2", "Plan")).unwrap();

        let result = run(&mut store, "item_1").unwrap();
        assert_eq!(result.messages[0].content, "Deleted \"Dune\".");
        assert_eq!(result.affected_records[0].id, "item_1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = mem_store();
        assert!(matches!(
            run(&mut store, "item_404"),
            Err(VaultError::RecordNotFound(_))
        ));
    }
}
