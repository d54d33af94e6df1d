use crate::config::datasource_config::{CsvConfig, DataSourceConfig, ExcelWorkbookConfig};
use crate::extract::error::ExtractionError;
use crate::extract::excel_range_reader::ExcelRangeReader;
use crate::extract::record_frame::RecordFrame;
use crate::extract::traits::Extractable;
use calamine::{Reader, Xlsx, open_workbook};
use log::{info, warn};
use polars::io::SerReader;
use polars::prelude::CsvReadOptions;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

/// An enumeration of all supported data source types.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Csv(CsvConfig),
    Excel(ExcelWorkbookConfig),
}

impl From<DataSourceConfig> for DataSource {
    fn from(config: DataSourceConfig) -> Self {
        match config {
            DataSourceConfig::Csv(csv) => DataSource::Csv(csv),
            DataSourceConfig::Excel(excel) => DataSource::Excel(excel),
        }
    }
}

impl Validate for DataSource {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            DataSource::Csv(csv) => csv.validate(),
            DataSource::Excel(excel) => excel.validate(),
        }
    }
}

impl Extractable for DataSource {
    fn extract(&self) -> Result<Vec<RecordFrame>, ExtractionError> {
        match self {
            DataSource::Csv(csv_source) => {
                info!(
                    "Attempting to extract CSV data from: {}",
                    csv_source.source.display()
                );

                let mut csv_read_options = CsvReadOptions::default().with_has_header(true);

                if let Some(sep) = csv_source.separator {
                    let new_parse_options = (*csv_read_options.parse_options)
                        .clone()
                        .with_separator(sep as u8);
                    csv_read_options.parse_options = Arc::from(new_parse_options);
                }
                let csv_data = csv_read_options
                    .try_into_reader_with_file_path(Some(csv_source.source.clone()))?
                    .finish()?;

                let frame = RecordFrame::new(csv_source.table.clone(), csv_data)?;

                info!("Extracted CSV data from {}", csv_source.source.display());
                Ok(vec![frame])
            }
            DataSource::Excel(excel_source) => {
                let mut frames = Vec::new();

                info!(
                    "Attempting to extract Excel data from: {}",
                    excel_source.source.display()
                );

                let mut workbook: Xlsx<BufReader<File>> =
                    open_workbook(excel_source.source.clone())?;

                for sheet in &excel_source.sheets {
                    let sheet_name = match &sheet.sheet_name {
                        Some(name) => name.clone(),
                        None => {
                            workbook.sheet_names().first().cloned().ok_or_else(|| {
                                ExtractionError::EmptyWorkbook(
                                    excel_source.source.display().to_string(),
                                )
                            })?
                        }
                    };

                    let range = match workbook.worksheet_range(&sheet_name) {
                        Ok(r) => r,
                        Err(_) => {
                            warn!(
                                "Could not find Excel Worksheet with the name {sheet_name}! No dataframe extracted."
                            );
                            continue;
                        }
                    };

                    let sheet_data =
                        ExcelRangeReader::new(range, sheet_name.clone()).extract_to_df()?;
                    let frame = RecordFrame::new(sheet.table.clone(), sheet_data)?;

                    frames.push(frame);
                    info!(
                        "Extracted data from Excel Worksheet {} in Excel Workbook {}",
                        sheet_name,
                        excel_source.source.display()
                    );
                }

                Ok(frames)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::datasource_config::ExcelSheetConfig;
    use crate::config::table_role::{AdministrationColumns, ResultDateColumns, TableRole};
    use rstest::{fixture, rstest};
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temporary directory")
    }

    fn admin_role() -> TableRole {
        TableRole::Administrations(AdministrationColumns::default())
    }

    #[rstest]
    fn test_extract_csv(temp_dir: TempDir) {
        let csv_data = b"CSN,ABX_Category,First_Admin,Last_Admin\n\
1001,Cefazolin,2024-01-01,2024-01-03\n\
1002,Vancomycin,2024-01-02,2024-01-04\n";
        let file_path = temp_dir.path().join("dot.csv");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(csv_data).unwrap();

        let data_source = DataSource::Csv(CsvConfig {
            source: file_path,
            separator: Some(','),
            table: admin_role(),
        });

        let mut frames = data_source.extract().unwrap();
        assert_eq!(frames.len(), 1);
        let frame = frames.pop().unwrap();
        assert_eq!(frame.role(), &admin_role());

        let drugs: Vec<&str> = frame
            .data()
            .column("ABX_Category")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(drugs, vec!["Cefazolin", "Vancomycin"]);
    }

    #[rstest]
    fn test_extract_csv_missing_required_column_fails(temp_dir: TempDir) {
        let csv_data = b"CSN,ABX_Category\n1001,Cefazolin\n";
        let file_path = temp_dir.path().join("dot.csv");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(csv_data).unwrap();

        let data_source = DataSource::Csv(CsvConfig {
            source: file_path,
            separator: Some(','),
            table: admin_role(),
        });

        assert!(matches!(
            data_source.extract(),
            Err(ExtractionError::Validation(_))
        ));
    }

    #[rstest]
    fn test_extract_excel_multiple_sheets(temp_dir: TempDir) {
        let mut workbook = Workbook::new();

        let dot_sheet = workbook.add_worksheet().set_name("dot").unwrap();
        dot_sheet
            .write_row(0, 0, ["CSN", "ABX_Category", "First_Admin", "Last_Admin"])
            .unwrap();
        dot_sheet
            .write_row(1, 0, ["1001", "Cefazolin", "2024-01-01", "2024-01-03"])
            .unwrap();

        let fin_sheet = workbook.add_worksheet().set_name("fin").unwrap();
        fin_sheet
            .write_row(0, 0, ["CSN", "Final_Result_Date"])
            .unwrap();
        fin_sheet.write_row(1, 0, ["1001", "2024-01-01"]).unwrap();

        let file_path = temp_dir.path().join("export.xlsx");
        workbook.save(&file_path).unwrap();

        let data_source = DataSource::Excel(ExcelWorkbookConfig {
            source: file_path,
            sheets: vec![
                ExcelSheetConfig {
                    sheet_name: Some("dot".to_string()),
                    table: admin_role(),
                },
                ExcelSheetConfig {
                    sheet_name: Some("fin".to_string()),
                    table: TableRole::ResultDates(ResultDateColumns::default()),
                },
            ],
        });

        let frames = data_source.extract().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data().height(), 1);
        assert_eq!(
            frames[1].data().get_column_names(),
            ["CSN", "Final_Result_Date"]
        );
    }

    #[rstest]
    fn test_extract_excel_unnamed_sheet_reads_first(temp_dir: TempDir) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet
            .write_row(0, 0, ["CSN", "ABX_Category", "First_Admin", "Last_Admin"])
            .unwrap();
        sheet
            .write_row(1, 0, ["1001", "Cefazolin", "2024-01-01", "2024-01-03"])
            .unwrap();

        let file_path = temp_dir.path().join("export.xlsx");
        workbook.save(&file_path).unwrap();

        let data_source = DataSource::Excel(ExcelWorkbookConfig {
            source: file_path,
            sheets: vec![ExcelSheetConfig {
                sheet_name: None,
                table: admin_role(),
            }],
        });

        let frames = data_source.extract().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data().height(), 1);
    }

    #[rstest]
    fn test_extract_excel_missing_sheet_is_skipped(temp_dir: TempDir) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet().set_name("dot").unwrap();
        sheet
            .write_row(0, 0, ["CSN", "ABX_Category", "First_Admin", "Last_Admin"])
            .unwrap();

        let file_path = temp_dir.path().join("export.xlsx");
        workbook.save(&file_path).unwrap();

        let data_source = DataSource::Excel(ExcelWorkbookConfig {
            source: file_path,
            sheets: vec![ExcelSheetConfig {
                sheet_name: Some("absent".to_string()),
                table: admin_role(),
            }],
        });

        let frames = data_source.extract().unwrap();
        assert!(frames.is_empty());
    }
}
