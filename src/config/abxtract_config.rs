use crate::config::datasource_config::DataSourceConfig;
use crate::config::pipeline_config::PipelineConfig;
use crate::validation::data_source_validation::validate_source_roles;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level configuration: which exports to read and how to process them.
#[derive(Debug, Validate, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_source_roles", skip_on_field_errors = false))]
pub struct AbxtractConfig {
    pub data_sources: Vec<DataSourceConfig>,
    pub pipeline_config: PipelineConfig,
}
