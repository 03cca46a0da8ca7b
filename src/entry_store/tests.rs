use super::{EntryStore, StoreError};

#[test]
fn loads_entries_from_json_document() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ricorrenze.json");
    std::fs::write(
        &path,
        r#"{
            "List": [
                {"Name": "Ann", "MonthDay": "Mar-15", "Type": "Compl", "Note": "call her"},
                {"Name": "Bob and Carol", "MonthDay": "Lug-1", "Type": "Anniv"}
            ]
        }"#,
    )
    .expect("write data file");

    let list = EntryStore::new(&path).load().expect("load");
    assert_eq!(list.list.len(), 2);
    assert_eq!(list.list[0].name, "Ann");
    assert_eq!(list.list[0].month_day, "Mar-15");
    assert_eq!(list.list[0].kind, "Compl");
    assert_eq!(list.list[0].note, "call her");
    // a missing Note field defaults to empty
    assert_eq!(list.list[1].note, "");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = EntryStore::new(dir.path().join("absent.json")).load();
    assert!(matches!(result, Err(StoreError::Read { .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write data file");

    let result = EntryStore::new(&path).load();
    assert!(matches!(result, Err(StoreError::Parse { .. })));
}

#[test]
fn empty_path_is_rejected() {
    let result = EntryStore::new("").load();
    assert!(matches!(result, Err(StoreError::EmptyPath)));
}
