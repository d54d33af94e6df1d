use crate::config::loader_config::LoaderConfig;
use crate::config::study_config::StudyConfig;
use serde::{Deserialize, Serialize};

/// Everything the pipeline needs beyond the data sources themselves: the
/// study rules driving the transform stage and the loader for its result.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub study: StudyConfig,
    pub loader: LoaderConfig,
}

impl PipelineConfig {
    pub fn new(study: StudyConfig, loader: LoaderConfig) -> Self {
        Self { study, loader }
    }
}
