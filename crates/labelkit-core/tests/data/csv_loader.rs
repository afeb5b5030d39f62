use labelkit_core::data::load_entries;
use labelkit_core::DataError;
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_basic_entries() {
    let file = csv_file(b"id,qr_value,barcode_value\nA-1,https://a,111\nA-2,,\n");
    let entries = load_entries(file.path()).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].qr_value, "https://a");
    assert_eq!(entries[0].barcode_value, "111");
    assert_eq!(entries[1].qr_value, "A-2");
    assert_eq!(entries[1].barcode_value, "A-2");
}

#[test]
fn test_id_only_file() {
    let file = csv_file(b"id\nX\nY\nZ\n");
    let entries = load_entries(file.path()).unwrap();
    let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["X", "Y", "Z"]);
}

#[test]
fn test_blank_and_empty_id_rows_are_skipped() {
    let file = csv_file(b"id,qr_value\n,\nB,b\n,orphan\nC,\n");
    let entries = load_entries(file.path()).unwrap();
    let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["B", "C"]);
}

#[test]
fn test_missing_id_column() {
    let file = csv_file(b"name,qr_value\nA,a\n");
    let err = load_entries(file.path()).unwrap_err();
    assert!(matches!(err, DataError::MissingIdColumn));
}

#[test]
fn test_no_entries() {
    let file = csv_file(b"id,qr_value\n,x\n");
    let err = load_entries(file.path()).unwrap_err();
    assert!(matches!(err, DataError::NoEntries));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_entries(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn test_bom_header_is_recognized() {
    let file = csv_file(b"\xEF\xBB\xBFid,aruco_id\nM1,4\n");
    let entries = load_entries(file.path()).unwrap();
    assert_eq!(entries[0].id, "M1");
    assert_eq!(entries[0].aruco_id, Some(4));
}

#[test]
fn test_latin1_file() {
    let file = csv_file(b"id\nK\xF6ln\n");
    let entries = load_entries(file.path()).unwrap();
    assert_eq!(entries[0].id, "K\u{f6}ln");
}
