use crate::config::study_config::StudyConfig;
use crate::config::table_role::{
    AdministrationColumns, ResultDateColumns, TableRole,
};
use crate::course::interval::AdminInterval;
use crate::extract::record_frame::RecordFrame;
use crate::transform::admin_record::AdminRecord;
use crate::transform::summary::{self, StudySummary};
use chrono::NaiveDate;
use polars::df;

pub(crate) fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("test date should be ISO formatted")
}

pub(crate) fn interval(start: &str, end: &str) -> AdminInterval {
    AdminInterval::new(date(start), date(end)).expect("test interval should be ordered")
}

pub(crate) fn admin(patient_id: &str, drug: &str, start: &str, end: &str) -> AdminRecord {
    AdminRecord {
        patient_id: patient_id.to_string(),
        drug: drug.to_string(),
        interval: interval(start, end),
    }
}

/// An administrations frame with the default export headers.
pub(crate) fn admin_frame(rows: &[(&str, &str, &str, &str)]) -> RecordFrame {
    let patients: Vec<&str> = rows.iter().map(|row| row.0).collect();
    let drugs: Vec<&str> = rows.iter().map(|row| row.1).collect();
    let starts: Vec<&str> = rows.iter().map(|row| row.2).collect();
    let ends: Vec<&str> = rows.iter().map(|row| row.3).collect();

    let data = df!(
        "CSN" => patients,
        "ABX_Category" => drugs,
        "First_Admin" => starts,
        "Last_Admin" => ends,
    )
    .expect("test frame should build");

    RecordFrame::new(
        TableRole::Administrations(AdministrationColumns::default()),
        data,
    )
    .expect("test frame should validate")
}

/// A result-dates frame with the default export headers.
pub(crate) fn result_frame(rows: &[(&str, &str)]) -> RecordFrame {
    let patients: Vec<&str> = rows.iter().map(|row| row.0).collect();
    let dates: Vec<&str> = rows.iter().map(|row| row.1).collect();

    let data = df!(
        "CSN" => patients,
        "Final_Result_Date" => dates,
    )
    .expect("test frame should build");

    RecordFrame::new(
        TableRole::ResultDates(ResultDateColumns::default()),
        data,
    )
    .expect("test frame should validate")
}

/// Summarizes records with default study rules and no index dates.
pub(crate) fn study_summary(records: &[AdminRecord]) -> StudySummary {
    summary::summarize(
        records,
        records,
        None,
        &StudyConfig::default(),
        "CSN",
        None,
    )
    .expect("test summary should build")
}
