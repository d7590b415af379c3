use crate::model::{Record, RecordKind};
use crate::store::mem_backend::MemBackend;
use crate::store::CatalogStore;

/// A valid book with fixed author, pages and tag.
pub fn sample_book(id: &str, title: &str) -> Record {
    let mut record = Record::new(id, RecordKind::Book, title, "2024-05-01");
    record.author = Some("Frank Herbert".to_string());
    record.pages = Some(412.0);
    record.tag = Some("#sci-fi".to_string());
    record.note_content = Some(String::new());
    record
}

/// A valid note with a short body.
pub fn sample_note(id: &str, title: &str) -> Record {
    let mut record = Record::new(id, RecordKind::Note, title, "2024-05-02");
    record.author = Some(String::new());
    record.pages = Some(0.0);
    record.tag = Some("#ideas".to_string());
    record.note_content = Some("Remember to reread the appendix".to_string());
    record
}

pub fn mem_store() -> CatalogStore<MemBackend> {
    CatalogStore::open(MemBackend::new()).expect("empty backend always opens")
}
