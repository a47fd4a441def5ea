use super::*;
use crate::dialect::MySqlDialect;
use tempfile::tempdir;

#[test]
fn test_load_tokenized() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model_etl.sql");
    std::fs::write(&path, "CREATE TABLE a (id INT);\n-- done\n").unwrap();

    let script = Script::load(&path, ScriptFormat::Tokenized, &MySqlDialect::new()).unwrap();
    assert_eq!(script.statements, vec!["CREATE TABLE a (id INT)"]);
    assert_eq!(script.name(), "model_etl.sql");
}

#[test]
fn test_load_delimited() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("copy.sql");
    std::fs::write(&path, "INSERT INTO a\n SELECT 1;--\n").unwrap();

    let script = Script::load(&path, ScriptFormat::Delimited, &MySqlDialect::new()).unwrap();
    assert_eq!(script.statements, vec!["INSERT INTO a SELECT 1;"]);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let result = Script::load(
        &dir.path().join("missing.sql"),
        ScriptFormat::Tokenized,
        &MySqlDialect::new(),
    );
    assert!(matches!(result, Err(SqlError::ScriptRead { .. })));
}

#[test]
fn test_load_all_preserves_order() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("b.sql");
    let second = dir.path().join("a.sql");
    std::fs::write(&first, "SELECT 1;").unwrap();
    std::fs::write(&second, "SELECT 2;").unwrap();

    let scripts = Script::load_all(
        &[first, second],
        ScriptFormat::Tokenized,
        &MySqlDialect::new(),
    )
    .unwrap();
    assert_eq!(scripts[0].name(), "b.sql");
    assert_eq!(scripts[1].name(), "a.sql");
}
