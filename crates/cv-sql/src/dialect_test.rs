use super::*;

#[test]
fn test_dialect_for_db_type() {
    assert_eq!(dialect_for(DbType::MySql).name(), "mysql");
    assert_eq!(dialect_for(DbType::DuckDb).name(), "duckdb");
}

#[test]
fn test_tokenize_tracks_location() {
    let dialect = MySqlDialect::new();
    let tokens = dialect.tokenize("SELECT 1;\nSELECT 2;").unwrap();
    let second_select = tokens
        .iter()
        .filter(|t| is_significant(&t.token))
        .nth(3)
        .unwrap();
    assert_eq!(second_select.span.start.line, 2);
    assert_eq!(second_select.span.start.column, 1);
}

#[test]
fn test_tokenize_error_location() {
    let dialect = MySqlDialect::new();
    let result = dialect.tokenize("SELECT 1;\nSELECT 'unterminated");
    match result {
        Err(SqlError::Tokenize { line, message, .. }) => {
            assert_eq!(line, 2, "unexpected location for: {}", message);
        }
        other => panic!("expected tokenize error, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_mysql_hash_comment_is_whitespace() {
    let dialect = MySqlDialect::new();
    let tokens = dialect.tokenize("# note\nSELECT 1").unwrap();
    let first = tokens.iter().find(|t| is_significant(&t.token)).unwrap();
    assert_eq!(first.span.start.line, 2);
}

#[test]
fn test_quote_string_doubles_quotes() {
    let dialect = DuckDbDialect::new();
    assert_eq!(dialect.quote_string("pigs' per capita"), "'pigs'' per capita'");
    assert_eq!(dialect.quote_string(r"a\b"), r"'a\b'");
}

#[test]
fn test_mysql_quote_string_escapes_backslash() {
    let dialect = MySqlDialect::new();
    assert_eq!(dialect.quote_string(r"a\b"), r"'a\\b'");
    assert_eq!(dialect.quote_string("it's"), "'it''s'");
}
