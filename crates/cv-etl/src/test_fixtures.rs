//! Shared DuckDB fixtures for cv-etl tests

use cv_core::Config;
use cv_db::{Database, DuckDbBackend};
use std::path::Path;

/// Reference tables and the covariate building blocks, shaped like the MySQL
/// schema. The `is_best` rule is an expression index because DuckDB cannot
/// index generated columns.
pub(crate) const COVARIATE_SCHEMA: &str = r#"
CREATE TABLE covariate (covariate_id INTEGER PRIMARY KEY);
CREATE TABLE gbd_round (gbd_round_id INTEGER PRIMARY KEY);
CREATE TABLE location (location_id INTEGER PRIMARY KEY);
CREATE TABLE "year" (year_id INTEGER PRIMARY KEY);
CREATE TABLE age_group (age_group_id INTEGER PRIMARY KEY);
CREATE TABLE sex (sex_id INTEGER PRIMARY KEY);

INSERT INTO covariate VALUES (1), (100), (728), (881);
INSERT INTO gbd_round VALUES (4), (5);
INSERT INTO location VALUES (1);
INSERT INTO "year" VALUES (2013), (2014), (2015), (2016), (2017);
INSERT INTO age_group VALUES (22);
INSERT INTO sex VALUES (1), (2), (3);

CREATE TABLE model_version (
    model_version_id INTEGER PRIMARY KEY,
    covariate_id INTEGER NOT NULL REFERENCES covariate (covariate_id),
    gbd_round_id INTEGER NOT NULL REFERENCES gbd_round (gbd_round_id),
    description VARCHAR,
    code_version VARCHAR,
    status TINYINT NOT NULL DEFAULT 0,
    is_best TINYINT NOT NULL DEFAULT 0,
    best_user VARCHAR,
    best_description VARCHAR,
    best_start TIMESTAMP,
    best_end TIMESTAMP
);
CREATE UNIQUE INDEX uq_model_version_best
    ON model_version (covariate_id, gbd_round_id, (CASE WHEN is_best = 1 THEN 1 END));

CREATE TABLE model (
    model_version_id INTEGER NOT NULL REFERENCES model_version (model_version_id),
    year_id INTEGER NOT NULL REFERENCES "year" (year_id),
    location_id INTEGER NOT NULL REFERENCES location (location_id),
    sex_id INTEGER NOT NULL REFERENCES sex (sex_id),
    age_group_id INTEGER NOT NULL REFERENCES age_group (age_group_id),
    mean_value DOUBLE NOT NULL,
    upper_value DOUBLE,
    lower_value DOUBLE,
    PRIMARY KEY (model_version_id, year_id, location_id, sex_id, age_group_id)
);
"#;

/// Legacy source tables the migration copies from. `model` rows for
/// version 2 include an unknown location, so its copy fails.
pub(crate) const LEGACY_DATA: &str = r#"
CREATE TABLE location (location_id INTEGER PRIMARY KEY);
INSERT INTO location VALUES (1), (2);

CREATE TABLE model_version (model_version_id INTEGER, data_version_id INTEGER, gbd_round_id INTEGER);
INSERT INTO model_version VALUES (1, 100, 4), (2, 728, 5), (3, 881, 5), (9, 881, 3);

CREATE TABLE model (model_version_id INTEGER, location_id INTEGER, year_id INTEGER, mean_value DOUBLE);
INSERT INTO model VALUES
    (1, 1, 2016, 0.5), (1, 2, 2016, 0.6),
    (2, 1, 2016, 0.7), (2, -1, 2016, 0.8),
    (3, 1, 2017, 0.9),
    (9, 1, 2017, 1.0);
"#;

pub(crate) const MODEL_VERSION_ETL: &str = "\
-- replacement for model_version, keyed by covariate instead of data version
CREATE TABLE IF NOT EXISTS model_version_new (
    model_version_id INTEGER PRIMARY KEY,
    covariate_id INTEGER NOT NULL,
    gbd_round_id INTEGER NOT NULL
);
";

pub(crate) const MODEL_ETL: &str = "\
CREATE TABLE IF NOT EXISTS model_new (
    model_version_id INTEGER NOT NULL REFERENCES model_version_new (model_version_id),
    location_id INTEGER NOT NULL REFERENCES location (location_id),
    year_id INTEGER NOT NULL,
    mean_value DOUBLE,
    PRIMARY KEY (model_version_id, location_id, year_id)
);
";

pub(crate) const MODEL_VERSION_COPY: &str = "\
INSERT INTO model_version_new (model_version_id, covariate_id, gbd_round_id)
SELECT mv.model_version_id, mv.data_version_id, mv.gbd_round_id
FROM model_version mv
WHERE mv.gbd_round_id > 3
  AND NOT EXISTS (
      SELECT 1 FROM model_version_new n WHERE n.model_version_id = mv.model_version_id
  );
";

pub(crate) const MODEL_COPY: &str = "\
DELETE FROM model_new WHERE model_version_id = :model_version_id;
INSERT INTO model_new (model_version_id, location_id, year_id, mean_value)
SELECT model_version_id, location_id, year_id, mean_value
FROM model
WHERE model_version_id = :model_version_id;
";

/// In-memory database with the covariate building blocks
pub(crate) async fn covariate_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(COVARIATE_SCHEMA).await.unwrap();
    db
}

/// In-memory database holding the legacy tables
pub(crate) async fn legacy_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(LEGACY_DATA).await.unwrap();
    db
}

/// Default configuration with unqualified table names
pub(crate) fn config() -> Config {
    serde_yaml::from_str("name: covariate").unwrap()
}

/// Write the migration scripts to their default locations under `root`
pub(crate) fn write_migration_scripts(root: &Path, model_copy: &str) {
    write(root, "etl/model_version_etl.sql", MODEL_VERSION_ETL);
    write(root, "etl/model_etl.sql", MODEL_ETL);
    write(root, "etl/model_version_copy.sql", MODEL_VERSION_COPY);
    write(root, "etl/model_copy.sql", model_copy);
}

pub(crate) fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
