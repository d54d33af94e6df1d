use crate::load::error::LoadError;
use crate::load::traits::Loadable;
use crate::transform::summary::StudySummary;
use log::info;
use polars::prelude::AnyValue;
use rust_xlsxwriter::{ColNum, RowNum, Workbook};
use serde::Deserialize;
use std::path::PathBuf;

/// Writes the wide summary table to a single Excel workbook, one header row
/// plus one row per patient.
#[derive(Debug, Deserialize)]
pub struct ExcelLoader {
    output_path: PathBuf,
}

impl ExcelLoader {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl Loadable for ExcelLoader {
    fn load(&self, summary: &StudySummary) -> Result<(), LoadError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col_index, name) in summary.table.get_column_names().iter().enumerate() {
            worksheet.write(0, col_index as ColNum, name.as_str())?;
        }

        for (col_index, column) in summary.table.get_columns().iter().enumerate() {
            for row in 0..column.len() {
                let row_num = row as RowNum + 1;
                let col_num = col_index as ColNum;
                match column.get(row)? {
                    AnyValue::Null => {}
                    AnyValue::String(value) => {
                        worksheet.write(row_num, col_num, value)?;
                    }
                    AnyValue::StringOwned(value) => {
                        worksheet.write(row_num, col_num, value.as_str())?;
                    }
                    AnyValue::Int64(value) => {
                        worksheet.write(row_num, col_num, value as f64)?;
                    }
                    AnyValue::Int32(value) => {
                        worksheet.write(row_num, col_num, f64::from(value))?;
                    }
                    AnyValue::Float64(value) => {
                        worksheet.write(row_num, col_num, value)?;
                    }
                    AnyValue::Boolean(value) => {
                        worksheet.write(row_num, col_num, value)?;
                    }
                    other => {
                        worksheet.write(row_num, col_num, other.to_string())?;
                    }
                }
            }
        }

        workbook.save(&self.output_path)?;
        info!(
            "Wrote summary rows for {} patients to {}",
            summary.table.height(),
            self.output_path.display()
        );
        Ok(())
    }
}
