use super::*;
use crate::dialect::{DuckDbDialect, MySqlDialect};

#[test]
fn test_bind_single_param() {
    let dialect = MySqlDialect::new();
    let sql = "INSERT INTO covariate.model_new SELECT * FROM covariate.model \
               WHERE model_version_id = :model_version_id";
    let bound = bind_params(sql, &dialect, &[("model_version_id", 42)]).unwrap();
    assert_eq!(
        bound,
        "INSERT INTO covariate.model_new SELECT * FROM covariate.model \
         WHERE model_version_id = 42"
    );
}

#[test]
fn test_bind_repeated_param() {
    let dialect = DuckDbDialect::new();
    let sql = "DELETE FROM m WHERE id = :id; INSERT INTO m SELECT * FROM s WHERE id = :id";
    let bound = bind_params(sql, &dialect, &[("id", 7)]).unwrap();
    assert_eq!(
        bound,
        "DELETE FROM m WHERE id = 7; INSERT INTO m SELECT * FROM s WHERE id = 7"
    );
}

#[test]
fn test_quoted_and_commented_placeholders_untouched() {
    let dialect = MySqlDialect::new();
    let sql = "SELECT ':id', `:id` FROM t -- :id\nWHERE id = :id";
    let bound = bind_params(sql, &dialect, &[("id", 3)]).unwrap();
    assert_eq!(bound, "SELECT ':id', `:id` FROM t -- :id\nWHERE id = 3");
}

#[test]
fn test_unbound_param_errors() {
    let dialect = MySqlDialect::new();
    let result = bind_params("SELECT * FROM t WHERE a = :missing", &dialect, &[("id", 1)]);
    assert!(matches!(result, Err(SqlError::UnboundParameter(name)) if name == "missing"));
}

#[test]
fn test_no_placeholders_is_unchanged() {
    let dialect = DuckDbDialect::new();
    let sql = "SELECT CAST(a AS INT), a::BIGINT FROM t";
    assert_eq!(bind_params(sql, &dialect, &[]).unwrap(), sql);
}

#[test]
fn test_negative_values_are_literal() {
    let dialect = MySqlDialect::new();
    let bound = bind_params("SELECT :v", &dialect, &[("v", -5)]).unwrap();
    assert_eq!(bound, "SELECT -5");
}
