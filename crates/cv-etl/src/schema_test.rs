use super::*;
use crate::test_fixtures::{config, write};
use cv_core::ScriptFormat;
use cv_db::DuckDbBackend;
use cv_sql::DuckDbDialect;
use tempfile::tempdir;

fn script(name: &str, statements: &[&str]) -> Script {
    Script {
        path: name.into(),
        statements: statements.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_build_runs_scripts_in_order() {
    let db = DuckDbBackend::in_memory().unwrap();
    let scripts = [
        script("parent.sql", &["CREATE TABLE parent (id INTEGER PRIMARY KEY)"]),
        script(
            "child.sql",
            &[
                "CREATE TABLE child (parent_id INTEGER REFERENCES parent (id))",
                "INSERT INTO parent VALUES (1)",
                "INSERT INTO child VALUES (1)",
            ],
        ),
    ];

    let executed = SchemaBuilder::new(&db).build(&scripts).await.unwrap();
    assert_eq!(executed, 4);
    assert_eq!(db.query_count("SELECT * FROM child").await.unwrap(), 1);
}

#[tokio::test]
async fn test_failure_reports_script_and_index() {
    let db = DuckDbBackend::in_memory().unwrap();
    let scripts = [
        script("ok.sql", &["CREATE TABLE a (id INT)"]),
        script(
            "broken.sql",
            &["CREATE TABLE b (id INT)", "CREATE TABLE a (id INT)", "CREATE TABLE c (id INT)"],
        ),
    ];

    let failure = SchemaBuilder::new(&db).build(&scripts).await.unwrap_err();
    assert_eq!(failure.script, "broken.sql");
    assert_eq!(failure.index, 2);

    // Statements before the failure stay committed, later ones never run
    assert!(db.relation_exists("b").await.unwrap());
    assert!(!db.relation_exists("c").await.unwrap());
}

#[tokio::test]
async fn test_build_database_from_config() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "db_covariate/make_schema.sql",
        "CREATE SCHEMA IF NOT EXISTS covariate;",
    );
    write(
        dir.path(),
        "db_covariate/building_blocks/model_version.sql",
        "CREATE TABLE covariate.model_version (model_version_id INTEGER PRIMARY KEY);",
    );
    write(
        dir.path(),
        "db_covariate/building_blocks/model.sql",
        "-- estimates\nCREATE TABLE covariate.model (model_version_id INTEGER, mean_value DOUBLE);\n",
    );

    let db = DuckDbBackend::in_memory().unwrap();
    let config = config();
    assert_eq!(config.script_format, ScriptFormat::Tokenized);

    let executed = build_database(&db, &config, dir.path(), &DuckDbDialect::new())
        .await
        .unwrap();
    assert_eq!(executed, 3);
    assert!(db.relation_exists("covariate.model_version").await.unwrap());
    assert!(db.relation_exists("covariate.model").await.unwrap());
}

#[tokio::test]
async fn test_build_database_missing_script() {
    let dir = tempdir().unwrap();
    let db = DuckDbBackend::in_memory().unwrap();

    let result = build_database(&db, &config(), dir.path(), &DuckDbDialect::new()).await;
    assert!(matches!(result, Err(EtlError::Sql(_))));
}

#[tokio::test]
async fn test_build_database_failure_is_build_error() {
    let dir = tempdir().unwrap();
    write(dir.path(), "db_covariate/make_schema.sql", "CREATE SCHEMA covariate;");
    write(
        dir.path(),
        "db_covariate/building_blocks/model_version.sql",
        "CREATE TABLE covariate.model_version (id INT);",
    );
    write(
        dir.path(),
        "db_covariate/building_blocks/model.sql",
        "CREATE TABLE covariate.model (model_version_id INT REFERENCES covariate.missing (id));",
    );

    let db = DuckDbBackend::in_memory().unwrap();
    let result = build_database(&db, &config(), dir.path(), &DuckDbDialect::new()).await;
    match result {
        Err(EtlError::Build(failure)) => assert_eq!(failure.script, "model.sql"),
        other => panic!("expected build failure, got {:?}", other),
    }
}
