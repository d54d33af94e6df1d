use crate::load::error::LoadError;
use crate::transform::summary::StudySummary;
use std::fmt::Debug;

/// Persists the study summary produced by the transform stage.
pub trait Loadable: Debug {
    fn load(&self, summary: &StudySummary) -> Result<(), LoadError>;
}
