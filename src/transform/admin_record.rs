use crate::config::table_role::AdministrationColumns;
use crate::course::interval::AdminInterval;
use crate::extract::record_frame::RecordFrame;
use crate::transform::error::TransformError;
use crate::utils::{date_from_any, key_from_any};
use polars::prelude::Column;

/// One administration row, parsed down to the engine's terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRecord {
    pub patient_id: String,
    pub drug: String,
    pub interval: AdminInterval,
}

impl AdminRecord {
    /// Parses every row of an administrations table.
    ///
    /// Reversed administration windows surface as errors carrying the
    /// offending patient and drug; they are never swapped or dropped.
    pub(crate) fn from_frame(
        frame: &RecordFrame,
        columns: &AdministrationColumns,
    ) -> Result<Vec<AdminRecord>, TransformError> {
        let patients = frame.column(&columns.patient_id)?;
        let drugs = frame.column(&columns.drug)?;
        let starts = frame.column(&columns.first_admin)?;
        let ends = frame.column(&columns.last_admin)?;

        let mut records = Vec::with_capacity(frame.data().height());
        for row in 0..frame.data().height() {
            let patient_id = key_cell(patients, row)?;
            let drug = key_cell(drugs, row)?;
            let start = date_cell(starts, row)?;
            let end = date_cell(ends, row)?;

            let interval = AdminInterval::new(start, end).map_err(|source| {
                TransformError::InvalidAdministration {
                    patient_id: patient_id.clone(),
                    drug: drug.clone(),
                    source,
                }
            })?;

            records.push(AdminRecord {
                patient_id,
                drug,
                interval,
            });
        }

        Ok(records)
    }
}

pub(crate) fn key_cell(column: &Column, row: usize) -> Result<String, TransformError> {
    let value = column.get(row)?;
    key_from_any(&value).ok_or_else(|| TransformError::MissingValue {
        column: column.name().to_string(),
        row,
    })
}

pub(crate) fn date_cell(column: &Column, row: usize) -> Result<chrono::NaiveDate, TransformError> {
    let value = column.get(row)?;
    date_from_any(&value).ok_or_else(|| TransformError::DateParsing {
        column: column.name().to_string(),
        value: value.to_string(),
    })
}
