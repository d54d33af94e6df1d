use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Column '{column}' was not found in the {table} table.")]
    MissingColumn { column: String, table: String },
    #[error(transparent)]
    ValidationCrateError(#[from] ValidationErrors),
}
