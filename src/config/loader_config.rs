use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Selects where the study summary goes once the transform stage is done.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub enum LoaderConfig {
    /// Write the wide summary table to a single Excel workbook.
    Excel { output_path: PathBuf },
    /// Write one JSON course summary per patient.
    Json {
        output_dir: PathBuf,
        #[serde(default)]
        create_dir: bool,
    },
}

impl LoaderConfig {
    /// Redirects the loader's output location, keeping the loader kind.
    pub fn with_output(self, path: PathBuf) -> Self {
        match self {
            LoaderConfig::Excel { .. } => LoaderConfig::Excel { output_path: path },
            LoaderConfig::Json { create_dir, .. } => LoaderConfig::Json {
                output_dir: path,
                create_dir,
            },
        }
    }
}
