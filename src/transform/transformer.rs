use crate::config::study_config::StudyConfig;
use crate::config::table_role::RoleKind;
use crate::extract::record_frame::RecordFrame;
use crate::transform::admin_record::AdminRecord;
use crate::transform::error::TransformError;
use crate::transform::preprocess;
use crate::transform::summary::{self, StudySummary};
use log::info;

/// Runs the transform stage: records out of the frames, study rules, course
/// consolidation, wide summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerModule {
    study: StudyConfig,
}

impl TransformerModule {
    pub fn new(study: StudyConfig) -> Self {
        TransformerModule { study }
    }

    pub fn run(&self, frames: Vec<RecordFrame>) -> Result<StudySummary, TransformError> {
        let mut admin_frame = None;
        let mut result_frame = None;
        let mut demographic_frame = None;
        for frame in frames {
            match frame.kind() {
                RoleKind::Administrations => admin_frame = Some(frame),
                RoleKind::ResultDates => result_frame = Some(frame),
                RoleKind::Demographics => demographic_frame = Some(frame),
            }
        }

        let admin_frame =
            admin_frame.ok_or(TransformError::MissingTable(RoleKind::Administrations))?;
        let admin_columns = admin_frame
            .role()
            .administration_columns()
            .ok_or(TransformError::MissingTable(RoleKind::Administrations))?
            .clone();

        let records = AdminRecord::from_frame(&admin_frame, &admin_columns)?;
        info!("Parsed {} administration records", records.len());

        let index_dates = match &result_frame {
            Some(frame) => match frame.role().result_date_columns() {
                Some(columns) => Some(preprocess::index_dates(frame, columns)?),
                None => None,
            },
            None => None,
        };

        let admissible = preprocess::drop_ignored(records, &self.study);
        let treated = match &index_dates {
            Some(dates) => preprocess::clamp_to_index(&admissible, dates)?,
            None => admissible.clone(),
        };
        info!(
            "Consolidating courses over {} administrations after study rules",
            treated.len()
        );

        let demographics = demographic_frame.as_ref().and_then(|frame| {
            frame
                .role()
                .demographic_columns()
                .map(|columns| (frame, columns))
        });

        let study_summary = summary::summarize(
            &treated,
            &admissible,
            index_dates.as_ref(),
            &self.study,
            &admin_columns.patient_id,
            demographics,
        )?;
        info!(
            "Summarized courses for {} patients",
            study_summary.patients.len()
        );

        Ok(study_summary)
    }
}
