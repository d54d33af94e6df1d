use crate::validation::error::ValidationError;
use calamine::XlsxError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Worksheet {0} was empty.")]
    EmptyTable(String),
    #[error("Header row of worksheet {0} contained a non-string cell.")]
    NoStringInHeader(String),
    #[error("Workbook {0} has no worksheets.")]
    EmptyWorkbook(String),
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Calamine(#[from] XlsxError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
