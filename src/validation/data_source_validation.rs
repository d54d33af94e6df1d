use crate::config::abxtract_config::AbxtractConfig;
use crate::config::datasource_config::ExcelSheetConfig;
use crate::config::table_role::RoleKind;
use std::borrow::Cow;
use std::collections::HashSet;
use validator::ValidationError;

/// Worksheet names must be unique within a workbook; two sheet configs
/// resolving to the same range would double-ingest its rows.
pub(crate) fn validate_unique_sheet_names(
    sheets: &[ExcelSheetConfig],
) -> Result<(), ValidationError> {
    let mut seen_names = HashSet::new();

    let duplicates: Vec<String> = sheets
        .iter()
        .filter_map(|sheet| {
            let name = sheet.sheet_name.as_deref().unwrap_or_default();
            if !seen_names.insert(name) {
                Some(name.to_string())
            } else {
                None
            }
        })
        .collect();

    if duplicates.is_empty() {
        return Ok(());
    }

    let mut error = ValidationError::new("duplicates");
    error.add_param(Cow::from("duplicates"), &duplicates);
    Err(error.with_message(Cow::Owned(
        "Found duplicate sheet names in Excel data source".to_string(),
    )))
}

/// Across all sources there must be exactly one administrations table and at
/// most one result-dates and one demographics table.
pub(crate) fn validate_source_roles(config: &AbxtractConfig) -> Result<(), ValidationError> {
    let roles: Vec<RoleKind> = config
        .data_sources
        .iter()
        .flat_map(|source| source.table_roles())
        .map(|role| role.kind())
        .collect();

    let count = |kind: RoleKind| roles.iter().filter(|&&r| r == kind).count();

    let admins = count(RoleKind::Administrations);
    if admins != 1 {
        let mut error = ValidationError::new("roles");
        error.add_param(Cow::from("found"), &admins);
        return Err(error.with_message(Cow::Owned(
            "Exactly one administrations table must be configured.".to_string(),
        )));
    }

    for kind in [RoleKind::ResultDates, RoleKind::Demographics] {
        let found = count(kind);
        if found > 1 {
            let mut error = ValidationError::new("roles");
            error.add_param(Cow::from("found"), &found);
            return Err(error.with_message(Cow::Owned(format!(
                "At most one {kind} table may be configured."
            ))));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::datasource_config::{CsvConfig, DataSourceConfig, ExcelWorkbookConfig};
    use crate::config::loader_config::LoaderConfig;
    use crate::config::pipeline_config::PipelineConfig;
    use crate::config::study_config::StudyConfig;
    use crate::config::table_role::TableRole;
    use rstest::rstest;
    use std::path::PathBuf;

    fn csv_source(table: TableRole) -> DataSourceConfig {
        DataSourceConfig::Csv(CsvConfig {
            source: PathBuf::from("data.csv"),
            separator: None,
            table,
        })
    }

    fn config_with(data_sources: Vec<DataSourceConfig>) -> AbxtractConfig {
        AbxtractConfig {
            data_sources,
            pipeline_config: PipelineConfig::new(
                StudyConfig::default(),
                LoaderConfig::Excel {
                    output_path: PathBuf::from("out.xlsx"),
                },
            ),
        }
    }

    fn sheet(name: &str, table: TableRole) -> ExcelSheetConfig {
        ExcelSheetConfig {
            sheet_name: Some(name.to_string()),
            table,
        }
    }

    #[rstest]
    fn test_single_administrations_source_is_valid() {
        let config = config_with(vec![csv_source(TableRole::Administrations(
            Default::default(),
        ))]);
        assert!(validate_source_roles(&config).is_ok());
    }

    #[rstest]
    fn test_missing_administrations_source_fails() {
        let config = config_with(vec![csv_source(TableRole::ResultDates(Default::default()))]);
        let error = validate_source_roles(&config).unwrap_err();
        assert_eq!(error.code, "roles");
    }

    #[rstest]
    fn test_duplicate_administrations_source_fails() {
        let config = config_with(vec![
            csv_source(TableRole::Administrations(Default::default())),
            csv_source(TableRole::Administrations(Default::default())),
        ]);
        assert!(validate_source_roles(&config).is_err());
    }

    #[rstest]
    fn test_duplicate_result_dates_across_sources_fails() {
        let config = config_with(vec![
            csv_source(TableRole::Administrations(Default::default())),
            csv_source(TableRole::ResultDates(Default::default())),
            DataSourceConfig::Excel(ExcelWorkbookConfig {
                source: PathBuf::from("book.xlsx"),
                sheets: vec![sheet("fin", TableRole::ResultDates(Default::default()))],
            }),
        ]);
        assert!(validate_source_roles(&config).is_err());
    }

    #[rstest]
    fn test_unique_sheet_names_pass() {
        let sheets = vec![
            sheet("dot", TableRole::Administrations(Default::default())),
            sheet("fin", TableRole::ResultDates(Default::default())),
        ];
        assert!(validate_unique_sheet_names(&sheets).is_ok());
    }

    #[rstest]
    fn test_duplicate_sheet_names_fail() {
        let sheets = vec![
            sheet("dot", TableRole::Administrations(Default::default())),
            sheet("dot", TableRole::ResultDates(Default::default())),
        ];
        let error = validate_unique_sheet_names(&sheets).unwrap_err();
        assert_eq!(error.code, "duplicates");
    }
}
