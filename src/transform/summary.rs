use crate::config::study_config::StudyConfig;
use crate::config::table_role::DemographicColumns;
use crate::course::consolidate::{DotSplit, consolidate, split_dot};
use crate::course::course::{Course, total_dot};
use crate::course::interval::AdminInterval;
use crate::extract::record_frame::RecordFrame;
use crate::transform::admin_record::AdminRecord;
use crate::transform::error::TransformError;
use crate::utils::key_from_any;
use chrono::NaiveDate;
use polars::prelude::{
    Column, DataFrame, IntoLazy, JoinArgs, JoinType, MaintainOrderJoin, NamedFrom, Series, col,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use strum_macros::Display;

pub const GROUP_COLUMN: &str = "Group";
pub const TOTAL_DOT_COLUMN: &str = "Total_DOT";
pub const LAST_ADMIN_COLUMN: &str = "Last_Admin";

/// Spectrum classification of the drug carrying a patient's largest
/// days-of-therapy total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum SpectrumGroup {
    Narrow,
    Broad,
}

impl SpectrumGroup {
    /// Numeric code used in the wide table: 0 narrow, 1 broad.
    pub fn code(&self) -> i64 {
        match self {
            SpectrumGroup::Narrow => 0,
            SpectrumGroup::Broad => 1,
        }
    }
}

/// Consolidated therapy results for one patient encounter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub patient_id: String,
    /// Courses per drug, keyed by drug category.
    pub drug_courses: BTreeMap<String, Vec<Course>>,
    /// Summed course DOT per drug.
    pub drug_dot: BTreeMap<String, i64>,
    /// Courses over administrations of any drug.
    pub courses: Vec<Course>,
    pub total_dot: i64,
    pub last_admin: NaiveDate,
    pub spectrum_group: SpectrumGroup,
    /// Raw DOT on either side of the index date; None without one.
    pub dot_split: Option<DotSplit>,
}

/// The transform stage's result: typed per-patient summaries plus the wide
/// table the presentation layer hands to the loader.
#[derive(Debug, Clone)]
pub struct StudySummary {
    pub patients: Vec<PatientSummary>,
    pub table: DataFrame,
}

/// Builds the per-patient summaries and the wide table.
///
/// `treated` holds the administrations after index-date clamping and drives
/// all course assignment; `admissible` holds them before clamping and only
/// feeds the before/after DOT split.
pub(crate) fn summarize(
    treated: &[AdminRecord],
    admissible: &[AdminRecord],
    index_dates: Option<&HashMap<String, NaiveDate>>,
    study: &StudyConfig,
    patient_column: &str,
    demographics: Option<(&RecordFrame, &DemographicColumns)>,
) -> Result<StudySummary, TransformError> {
    let mut by_patient: BTreeMap<&str, Vec<&AdminRecord>> = BTreeMap::new();
    for record in treated {
        by_patient
            .entry(record.patient_id.as_str())
            .or_default()
            .push(record);
    }

    let mut admissible_by_patient: HashMap<&str, Vec<AdminInterval>> = HashMap::new();
    for record in admissible {
        admissible_by_patient
            .entry(record.patient_id.as_str())
            .or_default()
            .push(record.interval);
    }

    let mut patients = Vec::with_capacity(by_patient.len());
    for (patient_id, records) in by_patient {
        let mut drug_intervals: BTreeMap<String, Vec<AdminInterval>> = BTreeMap::new();
        let mut all_intervals = Vec::with_capacity(records.len());
        for record in &records {
            drug_intervals
                .entry(record.drug.clone())
                .or_default()
                .push(record.interval);
            all_intervals.push(record.interval);
        }

        let drug_courses: BTreeMap<String, Vec<Course>> = drug_intervals
            .iter()
            .map(|(drug, intervals)| (drug.clone(), consolidate(intervals)))
            .collect();
        let drug_dot: BTreeMap<String, i64> = drug_courses
            .iter()
            .map(|(drug, courses)| (drug.clone(), total_dot(courses)))
            .collect();

        let courses = consolidate(&all_intervals);
        // Courses come out ordered by start and pairwise disjoint, so the
        // last one carries the latest administration date.
        let Some(last_course) = courses.last() else {
            continue;
        };
        let last_admin = last_course.end;

        let dot_split = index_dates
            .and_then(|dates| dates.get(patient_id))
            .map(|&index_date| {
                let intervals = admissible_by_patient
                    .get(patient_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                split_dot(intervals, index_date)
            });

        patients.push(PatientSummary {
            patient_id: patient_id.to_string(),
            spectrum_group: spectrum_group(&drug_dot, study),
            total_dot: total_dot(&courses),
            drug_courses,
            drug_dot,
            courses,
            last_admin,
            dot_split,
        });
    }

    let table = build_table(&patients, patient_column, demographics)?;

    Ok(StudySummary { patients, table })
}

/// Group 0 when the drug with the most days of therapy is on the study's
/// narrow-spectrum list, group 1 otherwise. Ties on DOT resolve to the
/// alphabetically first drug so the output is deterministic.
fn spectrum_group(drug_dot: &BTreeMap<String, i64>, study: &StudyConfig) -> SpectrumGroup {
    let mut top: Option<(&str, i64)> = None;
    for (drug, &dot) in drug_dot {
        if top.is_none_or(|(_, best)| dot > best) {
            top = Some((drug, dot));
        }
    }

    match top {
        Some((drug, _))
            if study
                .narrow_spectrum_drugs
                .iter()
                .any(|narrow| narrow == drug) =>
        {
            SpectrumGroup::Narrow
        }
        _ => SpectrumGroup::Broad,
    }
}

/// One row per patient: id, a DOT column per drug, spectrum group, total
/// DOT and last administration date. Demographics columns come first when a
/// demographics table was configured, matching the source exports.
fn build_table(
    patients: &[PatientSummary],
    patient_column: &str,
    demographics: Option<(&RecordFrame, &DemographicColumns)>,
) -> Result<DataFrame, TransformError> {
    let drugs: BTreeSet<&str> = patients
        .iter()
        .flat_map(|patient| patient.drug_dot.keys().map(String::as_str))
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(drugs.len() + 4);

    let ids: Vec<&str> = patients
        .iter()
        .map(|patient| patient.patient_id.as_str())
        .collect();
    columns.push(Column::new(patient_column.into(), ids));

    for drug in &drugs {
        let dots: Vec<Option<i64>> = patients
            .iter()
            .map(|patient| patient.drug_dot.get(*drug).copied())
            .collect();
        columns.push(Column::new((*drug).into(), dots));
    }

    let groups: Vec<i64> = patients
        .iter()
        .map(|patient| patient.spectrum_group.code())
        .collect();
    columns.push(Column::new(GROUP_COLUMN.into(), groups));

    let totals: Vec<i64> = patients.iter().map(|patient| patient.total_dot).collect();
    columns.push(Column::new(TOTAL_DOT_COLUMN.into(), totals));

    let last_admins: Vec<String> = patients
        .iter()
        .map(|patient| patient.last_admin.to_string())
        .collect();
    columns.push(Column::new(LAST_ADMIN_COLUMN.into(), last_admins));

    let table = DataFrame::new(columns)?;

    if let Some((frame, demographic_columns)) = demographics {
        let keyed = keyed_demographics(frame, &demographic_columns.patient_id, patient_column)?;
        let mut join_args = JoinArgs::new(JoinType::Inner);
        join_args.maintain_order = MaintainOrderJoin::Left;
        let joined = keyed
            .lazy()
            .join(
                table.lazy(),
                [col(patient_column)],
                [col(patient_column)],
                join_args,
            )
            .collect()?;
        return Ok(joined);
    }

    Ok(table)
}

/// Normalizes the demographics id column to string keys and renames it to
/// the summary's patient column so the join lines up across sources.
fn keyed_demographics(
    frame: &RecordFrame,
    id_column: &str,
    patient_column: &str,
) -> Result<DataFrame, TransformError> {
    let source_column = frame.column(id_column)?;
    let source_name = source_column.name().to_string();

    let keys: Vec<Option<String>> = (0..frame.data().height())
        .map(|row| -> Result<Option<String>, TransformError> {
            Ok(key_from_any(&source_column.get(row)?))
        })
        .collect::<Result<_, _>>()?;

    let mut data = frame.data().clone();
    data.replace(&source_name, Series::new(source_name.as_str().into(), keys))?;
    if source_name != patient_column {
        data.rename(&source_name, patient_column.into())?;
    }
    Ok(data)
}
