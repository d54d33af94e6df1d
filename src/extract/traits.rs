use crate::extract::error::ExtractionError;
use crate::extract::record_frame::RecordFrame;

/// A data source the pipeline can pull role-tagged tables out of.
pub trait Extractable {
    fn extract(&self) -> Result<Vec<RecordFrame>, ExtractionError>;
}
