use crate::config::table_role::{RoleKind, TableRole};
use crate::validation::error::ValidationError;
use log::{debug, warn};
use polars::prelude::{Column, DataFrame};
use regex::Regex;

/// A DataFrame paired with the role that tells the transform layer how to
/// read it.
///
/// Construction checks that every column the role's map names can be
/// resolved, so missing-column mistakes surface before any records are
/// parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFrame {
    role: TableRole,
    data: DataFrame,
}

impl RecordFrame {
    pub fn new(role: TableRole, data: DataFrame) -> Result<Self, ValidationError> {
        let frame = RecordFrame { role, data };
        for name in frame.role.required_columns() {
            frame.column(name)?;
        }
        Ok(frame)
    }

    pub fn role(&self) -> &TableRole {
        &self.role
    }

    pub fn kind(&self) -> RoleKind {
        self.role.kind()
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Resolves a configured column name against the frame's headers.
    ///
    /// An exact header match wins; otherwise the name is tried as a regex,
    /// which covers exports whose headers carry qualifiers the config cannot
    /// predict (e.g. `Last_Admin (adjusted)`).
    pub fn column(&self, name: &str) -> Result<&Column, ValidationError> {
        if let Some(column) = self
            .data
            .get_columns()
            .iter()
            .find(|column| column.name() == name)
        {
            return Ok(column);
        }

        if let Ok(regex) = Regex::new(name)
            && let Some(column) = self
                .data
                .get_columns()
                .iter()
                .find(|column| regex.is_match(column.name()))
        {
            debug!(
                "Resolved column '{name}' to header '{}' by regex match",
                column.name()
            );
            return Ok(column);
        }

        warn!("No column found for '{name}' in {} table", self.kind());
        Err(ValidationError::MissingColumn {
            column: name.to_string(),
            table: self.kind().to_string(),
        })
    }
}
