use crate::extract::error::ExtractionError;
use calamine::{Data, Range};
use log::{info, warn};
use polars::datatypes::AnyValue;
use polars::frame::DataFrame;
use polars::prelude::TimeUnit::Milliseconds;
use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

/// Converts one worksheet range into a DataFrame, column by column.
///
/// The first row is always treated as the header row; hospital exports
/// carry headers without exception.
pub struct ExcelRangeReader {
    range: Range<Data>,
    sheet_name: String,
}

impl ExcelRangeReader {
    pub(crate) fn new(range: Range<Data>, sheet_name: String) -> Self {
        ExcelRangeReader { range, sheet_name }
    }

    pub fn extract_to_df(self) -> Result<DataFrame, ExtractionError> {
        let mut loading_vectors = self.create_loading_vectors();
        self.load_data_to_vectors(&mut loading_vectors);
        let columns = self.convert_vectors_to_columns(loading_vectors)?;
        let dataframe = DataFrame::new(columns)?;
        Ok(dataframe)
    }

    fn create_loading_vectors(&self) -> Vec<Vec<AnyValue<'_>>> {
        (0..self.range.width())
            .map(|_| Vec::with_capacity(self.range.height()))
            .collect()
    }

    fn load_data_to_vectors<'a>(&'a self, loading_vectors: &mut [Vec<AnyValue<'a>>]) {
        let sheet_name = self.sheet_name.as_str();
        for (row_index, row) in self.range.rows().enumerate() {
            for (col_index, cell_data) in row.iter().enumerate() {
                let Some(vector_to_load) = loading_vectors.get_mut(col_index) else {
                    continue;
                };

                match *cell_data {
                    Data::Empty => vector_to_load.push(AnyValue::Null),
                    Data::Int(ref i) => vector_to_load.push(AnyValue::Int64(*i)),
                    Data::Bool(ref b) => vector_to_load.push(AnyValue::Boolean(*b)),
                    Data::Error(ref e) => {
                        warn!(
                            "An error {e} in Excel Worksheet {sheet_name} was found at row {row_index}, column {col_index}."
                        );
                        vector_to_load.push(AnyValue::Null)
                    }
                    Data::Float(ref f) => vector_to_load.push(AnyValue::Float64(*f)),
                    Data::DateTime(ref d) => {
                        let value = if let Some(dt) = d.as_datetime() {
                            AnyValue::Datetime(dt.and_utc().timestamp_millis(), Milliseconds, None)
                        } else {
                            warn!(
                                "Could not interpret Excel DateTime in worksheet {sheet_name} at row {row_index}, column {col_index}. Entry converted to f64."
                            );
                            AnyValue::Float64(d.as_f64())
                        };
                        vector_to_load.push(value);
                    }
                    Data::String(ref s) | Data::DateTimeIso(ref s) | Data::DurationIso(ref s) => {
                        vector_to_load.push(AnyValue::String(s))
                    }
                }
            }
        }
    }

    fn convert_vectors_to_columns(
        &self,
        loading_vectors: Vec<Vec<AnyValue>>,
    ) -> Result<Vec<Column>, ExtractionError> {
        loading_vectors
            .iter()
            .map(|vec| {
                let header_cell = vec
                    .first()
                    .ok_or(ExtractionError::EmptyTable(self.sheet_name.clone()))?;
                let header = header_cell
                    .get_str()
                    .ok_or(ExtractionError::NoStringInHeader(self.sheet_name.clone()))?
                    .to_string();
                let data = vec
                    .get(1..)
                    .ok_or(ExtractionError::EmptyTable(self.sheet_name.clone()))?;

                let series_result = Series::from_any_values(header.clone().into(), data, false);

                //if the from_any_values function fails to convert the values to a single type
                //we stringify the data to create the series
                let series = series_result.unwrap_or_else(|_| {
                    info!(
                        "Column {} in Excel Worksheet {} contained multiple data types. These have been turned into strings.",
                        header, self.sheet_name
                    );
                    let stringified_col_data: Vec<String> =
                        data.iter().map(|d| d.to_string()).collect();
                    Series::new(header.into(), stringified_col_data)
                });

                Ok(series.into_column())
            })
            .collect()
    }
}
