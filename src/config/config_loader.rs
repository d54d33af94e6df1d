use config::{Config, ConfigError, File, FileFormat};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads a configuration file, picking the format from the extension.
    ///
    /// `$VARS` in the file are expanded from the environment before parsing;
    /// literal dollar signs must be escaped as `\$`.
    pub fn load<T: DeserializeOwned>(file_path: PathBuf) -> Result<T, ConfigError> {
        let Some(ext) = file_path.extension() else {
            return Err(ConfigError::NotFound(format!(
                "Could not find file extension on path {file_path:?}"
            )));
        };

        let file_format = match ext.to_str() {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            Some("ron") => Ok(FileFormat::Ron),
            _ => Err(ConfigError::NotFound(format!(
                "File format not supported. File needs to end with .yaml, .json, .toml or .ron. {file_path:?}"
            ))),
        }?;

        let config_str = fs::read_to_string(&file_path).map_err(|err| {
            ConfigError::Message(format!("Could not read config file {file_path:?}: {err}"))
        })?;

        let config_str_with_env_vars = shellexpand::env(&config_str).map_err(|err| {
            ConfigError::Message(format!(
                "Shell expansion of config file failed. Environment variables not found? {err}"
            ))
        })?;

        let config = Config::builder()
            .add_source(File::from_str(&config_str_with_env_vars, file_format))
            .build()?;

        let settings_struct: T = config.try_deserialize()?;
        Ok(settings_struct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::datasource_config::DataSourceConfig;
    use crate::config::loader_config::LoaderConfig;
    use crate::config::table_role::TableRole;
    use crate::config::{AbxtractConfig, StudyConfig};
    use crate::test_suite::config::full_config_bytes;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::fs::File as StdFile;
    use std::io::Write;
    use std::path::PathBuf;
    use std::str::FromStr;
    use tempfile::TempDir;

    const YAML_DATA: &[u8] = br#"
data_sources:
  - type: csv
    source: "test/path.csv"
    separator: ","
    table:
      role: administrations
pipeline_config:
  loader:
    excel:
      output_path: "out/summary.xlsx"
"#;

    const TOML_DATA: &[u8] = br#"
[[data_sources]]
type = "csv"
source = "test/path.csv"
separator = ","

[data_sources.table]
role = "administrations"

[pipeline_config.loader.excel]
output_path = "out/summary.xlsx"
"#;

    const JSON_DATA: &[u8] = br#"
{
  "data_sources": [
    {
      "type": "csv",
      "source": "test/path.csv",
      "separator": ",",
      "table": { "role": "administrations" }
    }
  ],
  "pipeline_config": {
    "loader": { "excel": { "output_path": "out/summary.xlsx" } }
  }
}
"#;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temporary directory")
    }

    #[rstest]
    #[case("yaml", YAML_DATA)]
    #[case("yml", YAML_DATA)]
    #[case("toml", TOML_DATA)]
    #[case("json", JSON_DATA)]
    fn test_load_config_from_various_formats(
        temp_dir: TempDir,
        #[case] extension: &str,
        #[case] data: &[u8],
    ) {
        let file_path = temp_dir.path().join(format!("config.{extension}"));
        let mut file = StdFile::create(&file_path).unwrap();
        file.write_all(data).unwrap();

        let mut config: AbxtractConfig = ConfigLoader::load(file_path).unwrap();

        let source = config.data_sources.pop().unwrap();
        match source {
            DataSourceConfig::Csv(csv) => {
                assert_eq!(csv.separator, Some(','));
                assert_eq!(csv.source.to_str().unwrap(), "test/path.csv");
                assert!(matches!(csv.table, TableRole::Administrations(_)));
            }
            _ => panic!("Wrong data source type. Expected Csv."),
        }
        assert_eq!(
            config.pipeline_config.loader,
            LoaderConfig::Excel {
                output_path: PathBuf::from("out/summary.xlsx"),
            }
        );
        // Study rules fall back to the built-in drug lists when absent.
        assert_eq!(config.pipeline_config.study, StudyConfig::default());
    }

    #[rstest]
    fn test_load_config_unsupported_file_format() {
        let file_path = PathBuf::from_str("test/path/config.exe").unwrap();
        let err: Result<AbxtractConfig, _> = ConfigLoader::load(file_path);
        assert!(err.is_err());
    }

    #[rstest]
    fn test_load_complete_config(temp_dir: TempDir) {
        let file_path = temp_dir.path().join("config.yaml");
        let mut file = StdFile::create(&file_path).unwrap();
        file.write_all(full_config_bytes().as_slice()).unwrap();

        let config: AbxtractConfig = ConfigLoader::load(file_path).unwrap();

        assert_eq!(config.data_sources.len(), 2);
        assert_eq!(
            config.pipeline_config.study.ignored_drugs,
            vec!["Ampicillin".to_string()]
        );
        assert_eq!(
            config.pipeline_config.study.narrow_spectrum_drugs,
            vec!["Cefazolin".to_string(), "Nafcillin".to_string()]
        );
        match &config.data_sources[1] {
            DataSourceConfig::Excel(excel) => {
                assert_eq!(excel.sheets.len(), 2);
                assert_eq!(excel.sheets[0].sheet_name.as_deref(), Some("dot"));
            }
            _ => panic!("Wrong data source type. Expected Excel."),
        }
    }
}
