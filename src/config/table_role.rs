use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Declares what an extracted table holds and where its key columns live.
///
/// The transform layer never guesses column meanings from headers; every
/// data source names its role and the role carries the column map.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub enum TableRole {
    /// One row per drug administration window.
    Administrations(AdministrationColumns),
    /// One row per (patient, result date); the earliest date per patient
    /// becomes that patient's index date.
    ResultDates(ResultDateColumns),
    /// Patient-level columns carried through onto the summary table.
    Demographics(DemographicColumns),
}

impl TableRole {
    pub fn kind(&self) -> RoleKind {
        match self {
            TableRole::Administrations(_) => RoleKind::Administrations,
            TableRole::ResultDates(_) => RoleKind::ResultDates,
            TableRole::Demographics(_) => RoleKind::Demographics,
        }
    }

    /// Column names the table must resolve before the transform stage runs.
    pub fn required_columns(&self) -> Vec<&str> {
        match self {
            TableRole::Administrations(columns) => vec![
                columns.patient_id.as_str(),
                columns.drug.as_str(),
                columns.first_admin.as_str(),
                columns.last_admin.as_str(),
            ],
            TableRole::ResultDates(columns) => vec![
                columns.patient_id.as_str(),
                columns.result_date.as_str(),
            ],
            TableRole::Demographics(columns) => vec![columns.patient_id.as_str()],
        }
    }

    pub fn administration_columns(&self) -> Option<&AdministrationColumns> {
        match self {
            TableRole::Administrations(columns) => Some(columns),
            _ => None,
        }
    }

    pub fn result_date_columns(&self) -> Option<&ResultDateColumns> {
        match self {
            TableRole::ResultDates(columns) => Some(columns),
            _ => None,
        }
    }

    pub fn demographic_columns(&self) -> Option<&DemographicColumns> {
        match self {
            TableRole::Demographics(columns) => Some(columns),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RoleKind {
    Administrations,
    ResultDates,
    Demographics,
}

/// Column map for an administrations table. Defaults follow the hospital
/// export this tool was written for.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AdministrationColumns {
    #[serde(default = "default_patient_id_column")]
    pub patient_id: String,
    #[serde(default = "default_drug_column")]
    pub drug: String,
    #[serde(default = "default_first_admin_column")]
    pub first_admin: String,
    #[serde(default = "default_last_admin_column")]
    pub last_admin: String,
}

impl Default for AdministrationColumns {
    fn default() -> Self {
        AdministrationColumns {
            patient_id: default_patient_id_column(),
            drug: default_drug_column(),
            first_admin: default_first_admin_column(),
            last_admin: default_last_admin_column(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResultDateColumns {
    #[serde(default = "default_patient_id_column")]
    pub patient_id: String,
    #[serde(default = "default_result_date_column")]
    pub result_date: String,
}

impl Default for ResultDateColumns {
    fn default() -> Self {
        ResultDateColumns {
            patient_id: default_patient_id_column(),
            result_date: default_result_date_column(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DemographicColumns {
    #[serde(default = "default_patient_id_column")]
    pub patient_id: String,
}

impl Default for DemographicColumns {
    fn default() -> Self {
        DemographicColumns {
            patient_id: default_patient_id_column(),
        }
    }
}

fn default_patient_id_column() -> String {
    "CSN".to_string()
}

fn default_drug_column() -> String {
    "ABX_Category".to_string()
}

fn default_first_admin_column() -> String {
    "First_Admin".to_string()
}

fn default_last_admin_column() -> String {
    "Last_Admin".to_string()
}

fn default_result_date_column() -> String {
    "Final_Result_Date".to_string()
}
