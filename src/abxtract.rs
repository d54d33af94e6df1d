use crate::Pipeline;
use crate::config::AbxtractConfig;
use crate::error::PipelineError;
use crate::extract::DataSource;
use crate::load::loader_factory::LoaderFactory;
use crate::transform::transformer::TransformerModule;
use crate::validation::error::ValidationError;
use validator::Validate;

/// The configured application: a pipeline plus the data sources to feed it.
pub struct Abxtract {
    pipeline: Pipeline,
    data_sources: Vec<DataSource>,
}

impl Abxtract {
    pub fn run(&self) -> Result<(), PipelineError> {
        self.pipeline.run(self.data_sources.as_slice())?;
        Ok(())
    }
}

impl TryFrom<AbxtractConfig> for Abxtract {
    type Error = PipelineError;

    fn try_from(config: AbxtractConfig) -> Result<Self, Self::Error> {
        config.validate().map_err(ValidationError::from)?;

        let transformer_module = TransformerModule::new(config.pipeline_config.study);
        let loader_module = LoaderFactory::from_config(config.pipeline_config.loader);
        let data_sources = config
            .data_sources
            .into_iter()
            .map(DataSource::from)
            .collect();

        Ok(Self {
            pipeline: Pipeline::new(transformer_module, loader_module),
            data_sources,
        })
    }
}
