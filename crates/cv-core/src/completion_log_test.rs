use super::*;
use tempfile::tempdir;

fn ids(raw: &[i64]) -> Vec<ModelVersionId> {
    raw.iter().map(|&i| ModelVersionId::new(i)).collect()
}

#[test]
fn test_write_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("complete.txt");

    CompletionLog::new(ids(&[17, 3, 120])).write(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "model_versions completed:\n3\n17\n120\n");
}

#[test]
fn test_write_empty_log_has_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("complete.txt");

    CompletionLog::default().write(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "model_versions completed:\n");
}

#[test]
fn test_read_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("complete.txt");
    let log = CompletionLog::new(ids(&[1, 3]));
    log.write(&path).unwrap();

    let read = CompletionLog::read(&path).unwrap().unwrap();
    assert_eq!(read, log);
    assert_eq!(read.ids().collect::<Vec<_>>(), ids(&[1, 3]));
}

#[test]
fn test_read_missing_file() {
    let dir = tempdir().unwrap();
    assert!(CompletionLog::read(&dir.path().join("nope.txt"))
        .unwrap()
        .is_none());
}

#[test]
fn test_read_rejects_missing_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("complete.txt");
    std::fs::write(&path, "1\n2\n").unwrap();

    let err = CompletionLog::read(&path).unwrap_err();
    assert!(matches!(err, CoreError::CompletionLogParse { line: 1, .. }));
}

#[test]
fn test_read_rejects_bad_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("complete.txt");
    std::fs::write(&path, "model_versions completed:\n4\nfour\n").unwrap();

    let err = CompletionLog::read(&path).unwrap_err();
    assert!(matches!(err, CoreError::CompletionLogParse { line: 3, .. }));
}

#[test]
fn test_read_skips_blank_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("complete.txt");
    std::fs::write(&path, "model_versions completed:\n\n5\n\n6\n").unwrap();

    let log = CompletionLog::read(&path).unwrap().unwrap();
    assert_eq!(log.ids().collect::<Vec<_>>(), ids(&[5, 6]));
}

#[test]
fn test_new_sorts_and_drops_duplicates() {
    let log = CompletionLog::new(ids(&[9, 2, 1, 2]));
    assert_eq!(log.len(), 3);
    assert_eq!(log.ids().collect::<Vec<_>>(), ids(&[1, 2, 9]));
}

#[test]
fn test_header_only_log_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("complete.txt");
    CompletionLog::default().write(&path).unwrap();

    let log = CompletionLog::read(&path).unwrap().unwrap();
    assert!(log.is_empty());
}
