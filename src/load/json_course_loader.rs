use crate::load::error::LoadError;
use crate::load::traits::Loadable;
use crate::transform::summary::StudySummary;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

/// A loader that saves each patient's course summary as an individual JSON
/// file in the output directory, named after the patient id
/// (e.g. `1001.json`).
#[derive(Debug, Deserialize)]
pub struct JsonCourseLoader {
    /// The path to the output directory where summary files will be saved.
    output_dir: PathBuf,
    /// If true will create the full output path.
    create_dir: bool,
}

impl JsonCourseLoader {
    pub fn new(output_dir: PathBuf, create_dir: bool) -> Self {
        Self {
            output_dir,
            create_dir,
        }
    }
}

impl Loadable for JsonCourseLoader {
    fn load(&self, summary: &StudySummary) -> Result<(), LoadError> {
        if !summary.patients.is_empty() && self.create_dir {
            fs::create_dir_all(self.output_dir.as_path()).map_err(|err| LoadError::NoStorage {
                path: self.output_dir.clone(),
                reason: err.to_string(),
            })?;
        }

        for patient in summary.patients.iter() {
            let file = File::create(self.output_dir.join(format!("{}.json", patient.patient_id)))
                .map_err(|err| LoadError::CantStore {
                    patient_id: patient.patient_id.clone(),
                    reason: err.to_string(),
                })?;

            debug!("Storing course summary to: {:?}", file);
            serde_json::to_writer_pretty(file, patient).map_err(|err| LoadError::CantStore {
                patient_id: patient.patient_id.clone(),
                reason: err.to_string(),
            })?;
        }

        Ok(())
    }
}
