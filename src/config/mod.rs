pub mod abxtract_config;
pub use self::abxtract_config::AbxtractConfig;
mod config_loader;
pub use self::config_loader::ConfigLoader;
pub mod datasource_config;
pub use self::datasource_config::DataSourceConfig;
pub mod loader_config;
pub use self::loader_config::LoaderConfig;
pub mod pipeline_config;
pub use self::pipeline_config::PipelineConfig;
pub mod study_config;
pub use self::study_config::StudyConfig;
pub mod table_role;
pub use self::table_role::TableRole;
