use crate::config::study_config::StudyConfig;
use crate::config::table_role::ResultDateColumns;
use crate::course::interval::AdminInterval;
use crate::extract::record_frame::RecordFrame;
use crate::transform::admin_record::{AdminRecord, date_cell, key_cell};
use crate::transform::error::TransformError;
use chrono::NaiveDate;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Earliest result date per patient. That date anchors the patient's
/// therapy window and the before/after split.
pub(crate) fn index_dates(
    frame: &RecordFrame,
    columns: &ResultDateColumns,
) -> Result<HashMap<String, NaiveDate>, TransformError> {
    let patients = frame.column(&columns.patient_id)?;
    let dates = frame.column(&columns.result_date)?;

    let mut earliest: HashMap<String, NaiveDate> = HashMap::new();
    for row in 0..frame.data().height() {
        let patient_id = key_cell(patients, row)?;
        let date = date_cell(dates, row)?;
        earliest
            .entry(patient_id)
            .and_modify(|current| *current = (*current).min(date))
            .or_insert(date);
    }

    Ok(earliest)
}

/// Removes administrations of drugs the study excludes outright.
pub(crate) fn drop_ignored(records: Vec<AdminRecord>, study: &StudyConfig) -> Vec<AdminRecord> {
    let ignored: HashSet<&str> = study.ignored_drugs.iter().map(String::as_str).collect();

    records
        .into_iter()
        .filter(|record| {
            let keep = !ignored.contains(record.drug.as_str());
            if !keep {
                debug!(
                    "Dropping ignored drug {} for patient {}",
                    record.drug, record.patient_id
                );
            }
            keep
        })
        .collect()
}

/// Restricts administrations to each patient's therapy window.
///
/// Windows that end before the patient's index date are dropped, windows
/// that straddle it start at the index date instead. Patients without an
/// index date are dropped entirely, matching the inner-join semantics of
/// the source exports.
pub(crate) fn clamp_to_index(
    records: &[AdminRecord],
    index_dates: &HashMap<String, NaiveDate>,
) -> Result<Vec<AdminRecord>, TransformError> {
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        let Some(&index_date) = index_dates.get(&record.patient_id) else {
            debug!(
                "Dropping administrations for patient {} without a result date",
                record.patient_id
            );
            continue;
        };
        if record.interval.end() < index_date {
            continue;
        }

        let mut record = record.clone();
        if record.interval.start() < index_date {
            record.interval =
                AdminInterval::new(index_date, record.interval.end()).map_err(|source| {
                    TransformError::InvalidAdministration {
                        patient_id: record.patient_id.clone(),
                        drug: record.drug.clone(),
                        source,
                    }
                })?;
        }
        kept.push(record);
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_suite::record_generation::{admin, date, result_frame};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_index_dates_keeps_earliest_per_patient() {
        let frame = result_frame(&[
            ("1001", "2024-01-05"),
            ("1001", "2024-01-02"),
            ("1002", "2024-02-01"),
        ]);

        let dates = index_dates(&frame, &ResultDateColumns::default()).unwrap();

        assert_eq!(dates.len(), 2);
        assert_eq!(dates["1001"], date("2024-01-02"));
        assert_eq!(dates["1002"], date("2024-02-01"));
    }

    #[rstest]
    fn test_drop_ignored_uses_study_list() {
        let records = vec![
            admin("1001", "Ampicillin", "2024-01-01", "2024-01-02"),
            admin("1001", "Cefazolin", "2024-01-01", "2024-01-02"),
        ];

        let kept = drop_ignored(records, &StudyConfig::default());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].drug, "Cefazolin");
    }

    #[rstest]
    fn test_clamp_drops_windows_ending_before_index() {
        let records = vec![admin("1001", "Cefazolin", "2024-01-01", "2024-01-02")];
        let index = HashMap::from([("1001".to_string(), date("2024-01-03"))]);

        let kept = clamp_to_index(&records, &index).unwrap();
        assert_eq!(kept, vec![]);
    }

    #[rstest]
    fn test_clamp_moves_straddling_start_to_index_date() {
        let records = vec![admin("1001", "Cefazolin", "2024-01-01", "2024-01-10")];
        let index = HashMap::from([("1001".to_string(), date("2024-01-05"))]);

        let kept = clamp_to_index(&records, &index).unwrap();
        assert_eq!(
            kept,
            vec![admin("1001", "Cefazolin", "2024-01-05", "2024-01-10")]
        );
    }

    #[rstest]
    fn test_clamp_keeps_window_ending_on_index_date() {
        let records = vec![admin("1001", "Cefazolin", "2024-01-01", "2024-01-05")];
        let index = HashMap::from([("1001".to_string(), date("2024-01-05"))]);

        let kept = clamp_to_index(&records, &index).unwrap();
        assert_eq!(
            kept,
            vec![admin("1001", "Cefazolin", "2024-01-05", "2024-01-05")]
        );
    }

    #[rstest]
    fn test_clamp_drops_patients_without_index_date() {
        let records = vec![admin("1001", "Cefazolin", "2024-01-01", "2024-01-05")];

        let kept = clamp_to_index(&records, &HashMap::new()).unwrap();
        assert_eq!(kept, vec![]);
    }
}
