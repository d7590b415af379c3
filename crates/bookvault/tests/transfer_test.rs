use bookvault::api::VaultApi;
use bookvault::commands::list::ListQuery;
use bookvault::commands::submit::RecordDraft;
use bookvault::error::VaultError;
use bookvault::model::RecordKind;
use bookvault::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, VaultApi<FsBackend>) {
    let dir = TempDir::new().unwrap();
    let api = VaultApi::open(FsBackend::new(dir.path().join("data"))).unwrap();
    (dir, api)
}

fn book(title: &str, pages: &str) -> RecordDraft {
    RecordDraft {
        kind: RecordKind::Book,
        title: title.to_string(),
        author: "Octavia E. Butler".to_string(),
        pages: pages.to_string(),
        tag: "#sci-fi".to_string(),
        date_added: "2024-03-15".to_string(),
        cover: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
        ..Default::default()
    }
}

fn note(title: &str, body: &str) -> RecordDraft {
    RecordDraft {
        kind: RecordKind::Note,
        title: title.to_string(),
        tag: "reading notes".to_string(),
        date_added: "2024-03-16".to_string(),
        note_content: body.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_export_then_import_round_trips() {
    let (dir, mut api) = setup();
    api.submit(&book("Kindred", "264"), None).unwrap();
    api.submit(&book("Parable of the Sower", "345.5"), None).unwrap();
    api.submit(&note("Themes", "Survival, community, change"), None)
        .unwrap();
    let before = api.records().to_vec();

    let result = api.export(dir.path()).unwrap();
    let exported = &result.paths[0];
    let name = exported.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("bookvault-") && name.ends_with(".json"));

    api.delete(&before[0].id).unwrap();
    assert_eq!(api.records().len(), 2);

    api.import_file(exported).unwrap();
    assert_eq!(api.records(), before.as_slice());

    let reexport = dir.path().join("again");
    let second = api.export(&reexport).unwrap();
    assert_eq!(
        fs::read_to_string(exported).unwrap(),
        fs::read_to_string(&second.paths[0]).unwrap()
    );
}

#[test]
fn test_rejected_import_keeps_collection_on_disk() {
    let (dir, mut api) = setup();
    api.submit(&book("Kindred", "264"), None).unwrap();
    let stored = fs::read_to_string(dir.path().join("data").join("book_vault_data.json")).unwrap();

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"[{"id":"x","title":"No date"}]"#).unwrap();
    let err = api.import_file(&bad).unwrap_err();
    assert!(matches!(err, VaultError::Import(_)));
    assert_eq!(
        err.to_string(),
        "Import failed: One or more records are missing required fields."
    );

    assert_eq!(api.records().len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("data").join("book_vault_data.json")).unwrap(),
        stored
    );
}

#[test]
fn test_imported_records_survive_reopen() {
    let (dir, mut api) = setup();
    api.import_text(
        r#"[
            {"id": "item_1", "title": "Lilith's Brood", "dateAdded": "2023-11-02", "pages": 746, "shelf": "B3"},
            {"id": "item_2", "type": "note", "title": "Quote", "dateAdded": "2023-11-03", "noteContent": "All that you touch you change."}
        ]"#,
    )
    .unwrap();

    let reopened = VaultApi::open(FsBackend::new(dir.path().join("data"))).unwrap();
    assert_eq!(reopened.records(), api.records());
    assert_eq!(reopened.records()[0].extra["shelf"], "B3");

    let view = reopened.records_view(&ListQuery {
        search: "touch".to_string(),
        ..Default::default()
    });
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].id, "item_2");
}

#[test]
fn test_loosely_typed_file_exports_unchanged() {
    let (dir, mut api) = setup();
    let source = dir.path().join("legacy.json");
    fs::write(
        &source,
        r#"[
            {"id": "a", "type": "magazine", "title": "Wired", "dateAdded": "2024-05-01", "pages": "350"},
            {"id": "b", "title": "Dawn", "dateAdded": "2024-05-02", "author": null,
             "createdAt": "2024-05-01T12:00:00+02:00", "updatedAt": "yesterday"}
        ]"#,
    )
    .unwrap();

    api.import_file(&source).unwrap();
    assert_eq!(api.stats().total_pages, 350.0);

    let exported = api.export(&dir.path().join("out")).unwrap();
    let given: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&source).unwrap()).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&exported.paths[0]).unwrap()).unwrap();
    assert_eq!(written, given);
}
