//! Row records for the covariate tables

use chrono::NaiveDateTime;
use cv_core::ModelVersionId;
use cv_db::Row;
use cv_sql::SqlDialect;

use crate::error::{EtlError, EtlResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A `model_version` row
#[derive(Debug, Clone, PartialEq)]
pub struct ModelVersion {
    pub model_version_id: ModelVersionId,
    pub covariate_id: i64,
    pub gbd_round_id: i64,
    pub description: Option<String>,
    pub code_version: Option<String>,
    pub status: i64,

    /// Canonical model version for its covariate and GBD round
    pub is_best: bool,
    pub best_user: Option<String>,
    pub best_description: Option<String>,
    pub best_start: Option<NaiveDateTime>,
    pub best_end: Option<NaiveDateTime>,
}

impl ModelVersion {
    /// A non-best version with no audit fields set
    pub fn new(model_version_id: ModelVersionId, covariate_id: i64, gbd_round_id: i64) -> Self {
        Self {
            model_version_id,
            covariate_id,
            gbd_round_id,
            description: None,
            code_version: None,
            status: 0,
            is_best: false,
            best_user: None,
            best_description: None,
            best_start: None,
            best_end: None,
        }
    }

    /// `INSERT` statement for this row. Audit fields that are unset are left
    /// out so the column defaults apply.
    pub fn insert_sql(&self, table: &str, dialect: &dyn SqlDialect) -> String {
        let mut columns = vec![
            "model_version_id",
            "covariate_id",
            "gbd_round_id",
            "status",
            "is_best",
        ];
        let mut values = vec![
            self.model_version_id.to_string(),
            self.covariate_id.to_string(),
            self.gbd_round_id.to_string(),
            self.status.to_string(),
            u8::from(self.is_best).to_string(),
        ];

        let optional_text = [
            ("description", &self.description),
            ("code_version", &self.code_version),
            ("best_user", &self.best_user),
            ("best_description", &self.best_description),
        ];
        for (column, value) in optional_text {
            if let Some(v) = value {
                columns.push(column);
                values.push(dialect.quote_string(v));
            }
        }

        for (column, value) in [("best_start", self.best_start), ("best_end", self.best_end)] {
            if let Some(ts) = value {
                columns.push(column);
                values.push(dialect.quote_string(&ts.format(TIMESTAMP_FORMAT).to_string()));
            }
        }

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            values.join(", ")
        )
    }

    /// Decode a row selected from `model_version`
    pub fn from_row(row: &Row) -> EtlResult<Self> {
        Ok(Self {
            model_version_id: required_id(row, "model_version_id")?,
            covariate_id: required(row, "covariate_id")?,
            gbd_round_id: required(row, "gbd_round_id")?,
            description: text(row, "description"),
            code_version: text(row, "code_version"),
            status: required(row, "status")?,
            is_best: required::<i64>(row, "is_best")? != 0,
            best_user: text(row, "best_user"),
            best_description: text(row, "best_description"),
            best_start: timestamp(row, "best_start")?,
            best_end: timestamp(row, "best_end")?,
        })
    }
}

/// A `model` row: one estimate for a model version and demographic cell
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEstimate {
    pub model_version_id: ModelVersionId,
    pub year_id: i64,
    pub location_id: i64,
    pub sex_id: i64,
    pub age_group_id: i64,
    pub mean_value: f64,
    pub upper_value: Option<f64>,
    pub lower_value: Option<f64>,
}

impl ModelEstimate {
    /// `INSERT` statement for this row
    pub fn insert_sql(&self, table: &str) -> String {
        let bound = |v: Option<f64>| v.map_or_else(|| "NULL".to_string(), |v| v.to_string());
        format!(
            "INSERT INTO {} (model_version_id, year_id, location_id, sex_id, age_group_id, \
             mean_value, upper_value, lower_value) VALUES ({}, {}, {}, {}, {}, {}, {}, {})",
            table,
            self.model_version_id,
            self.year_id,
            self.location_id,
            self.sex_id,
            self.age_group_id,
            self.mean_value,
            bound(self.upper_value),
            bound(self.lower_value)
        )
    }

    /// Decode a row selected from `model`
    pub fn from_row(row: &Row) -> EtlResult<Self> {
        Ok(Self {
            model_version_id: required_id(row, "model_version_id")?,
            year_id: required(row, "year_id")?,
            location_id: required(row, "location_id")?,
            sex_id: required(row, "sex_id")?,
            age_group_id: required(row, "age_group_id")?,
            mean_value: required(row, "mean_value")?,
            upper_value: optional(row, "upper_value")?,
            lower_value: optional(row, "lower_value")?,
        })
    }
}

fn decode_error(column: &str, reason: impl ToString) -> EtlError {
    EtlError::Decode {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}

fn optional<T>(row: &Row, column: &str) -> EtlResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    row.get(column)
        .map(|raw| raw.parse::<T>().map_err(|e| decode_error(column, e)))
        .transpose()
}

fn required<T>(row: &Row, column: &str) -> EtlResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if !row.has_column(column) {
        return Err(decode_error(column, "column missing from result"));
    }
    optional(row, column)?.ok_or_else(|| decode_error(column, "unexpected NULL"))
}

fn required_id(row: &Row, column: &str) -> EtlResult<ModelVersionId> {
    let raw: i64 = required(row, column)?;
    ModelVersionId::try_new(raw).ok_or_else(|| decode_error(column, format!("{} is not positive", raw)))
}

fn text(row: &Row, column: &str) -> Option<String> {
    row.get(column).map(str::to_string)
}

fn timestamp(row: &Row, column: &str) -> EtlResult<Option<NaiveDateTime>> {
    row.get(column)
        .map(|raw| {
            // MySQL may append fractional seconds
            let whole = raw.split('.').next().unwrap_or(raw);
            NaiveDateTime::parse_from_str(whole, TIMESTAMP_FORMAT).map_err(|e| decode_error(column, e))
        })
        .transpose()
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
