use crate::config::table_role::TableRole;
use crate::validation::data_source_validation::validate_unique_sheet_names;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub enum DataSourceConfig {
    Csv(CsvConfig),
    Excel(ExcelWorkbookConfig),
}

impl DataSourceConfig {
    /// Every table role this source contributes, one per file or worksheet.
    pub fn table_roles(&self) -> Vec<&TableRole> {
        match self {
            DataSourceConfig::Csv(csv) => vec![&csv.table],
            DataSourceConfig::Excel(excel) => {
                excel.sheets.iter().map(|sheet| &sheet.table).collect()
            }
        }
    }
}

impl Validate for DataSourceConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            DataSourceConfig::Csv(csv) => csv.validate(),
            DataSourceConfig::Excel(excel) => excel.validate(),
        }
    }
}

/// A single CSV export holding one table.
#[derive(Debug, Validate, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CsvConfig {
    pub source: PathBuf,
    #[serde(default)]
    pub separator: Option<char>,
    pub table: TableRole,
}

/// An Excel workbook; each configured worksheet holds one table.
#[derive(Debug, Validate, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExcelWorkbookConfig {
    pub source: PathBuf,
    #[validate(custom(function = "validate_unique_sheet_names"))]
    pub sheets: Vec<ExcelSheetConfig>,
}

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExcelSheetConfig {
    /// Worksheet to read; the workbook's first sheet when omitted.
    #[serde(default)]
    pub sheet_name: Option<String>,
    pub table: TableRole,
}
