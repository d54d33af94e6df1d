use serde::{Deserialize, Serialize};

/// Study-level rules applied to administration records before any course
/// assignment happens.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StudyConfig {
    /// Drug categories removed from the export entirely.
    #[serde(default = "default_ignored_drugs")]
    pub ignored_drugs: Vec<String>,
    /// Drug categories that put a patient in spectrum group 0 when they
    /// carry that patient's largest days-of-therapy total.
    #[serde(default = "default_narrow_spectrum_drugs")]
    pub narrow_spectrum_drugs: Vec<String>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        StudyConfig {
            ignored_drugs: default_ignored_drugs(),
            narrow_spectrum_drugs: default_narrow_spectrum_drugs(),
        }
    }
}

fn default_ignored_drugs() -> Vec<String> {
    ["Ampicillin", "Amoxicillin", "Penicillin"]
        .map(String::from)
        .to_vec()
}

fn default_narrow_spectrum_drugs() -> Vec<String> {
    ["Cefazolin", "Nafcillin", "Oxacillin"]
        .map(String::from)
        .to_vec()
}
