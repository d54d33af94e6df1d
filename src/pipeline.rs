use crate::error::PipelineError;
use crate::extract::record_frame::RecordFrame;
use crate::extract::traits::Extractable;
use crate::load::traits::Loadable;
use crate::transform::summary::StudySummary;
use crate::transform::transformer::TransformerModule;
use crate::validation::error::ValidationError;
use log::info;
use validator::Validate;

/// Extract, transform, load: the three stages wired together.
#[derive(Debug)]
pub struct Pipeline {
    transformer_module: TransformerModule,
    loader_module: Box<dyn Loadable>,
}

impl Pipeline {
    pub fn new(transformer_module: TransformerModule, loader_module: Box<dyn Loadable>) -> Pipeline {
        Pipeline {
            transformer_module,
            loader_module,
        }
    }

    pub fn run(&self, sources: &[impl Extractable + Validate]) -> Result<(), PipelineError> {
        let frames = self.extract(sources)?;
        let summary = self.transform(frames)?;
        self.load(&summary)?;
        Ok(())
    }

    pub fn extract(
        &self,
        sources: &[impl Extractable + Validate],
    ) -> Result<Vec<RecordFrame>, PipelineError> {
        info!("Starting extract");
        for source in sources {
            source.validate().map_err(ValidationError::from)?;
        }

        let frames: Vec<RecordFrame> = sources
            .iter()
            .map(|source| source.extract())
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        info!("Concluded extraction, extracted {:?} tables", frames.len());
        Ok(frames)
    }

    pub fn transform(&self, frames: Vec<RecordFrame>) -> Result<StudySummary, PipelineError> {
        info!("Starting transformation");
        let summary = self.transformer_module.run(frames)?;
        info!(
            "Concluded transformation. Summarized {:?} patients",
            summary.patients.len()
        );
        Ok(summary)
    }

    pub fn load(&self, summary: &StudySummary) -> Result<(), PipelineError> {
        self.loader_module.load(summary)?;

        info!("Concluded loading");
        Ok(())
    }
}
