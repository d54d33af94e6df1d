use crate::config::table_role::RoleKind;
use crate::course::interval::CourseError;
use crate::validation::error::ValidationError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("No {0} table was extracted from the configured data sources.")]
    MissingTable(RoleKind),
    #[error("Could not parse '{value}' in column '{column}' as a calendar date.")]
    DateParsing { column: String, value: String },
    #[error("Empty cell in column '{column}' at row {row}.")]
    MissingValue { column: String, row: usize },
    #[error("Administration window for patient '{patient_id}' ({drug}) is invalid: {source}")]
    InvalidAdministration {
        patient_id: String,
        drug: String,
        #[source]
        source: CourseError,
    },
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
