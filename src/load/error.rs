use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not create output location {path:?}: {reason}")]
    NoStorage { path: PathBuf, reason: String },
    #[error("Could not store summary for patient {patient_id}: {reason}")]
    CantStore { patient_id: String, reason: String },
    #[error(transparent)]
    Xlsx(#[from] XlsxError),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
