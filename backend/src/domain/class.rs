//! Classes belong to a school year and contain pupils.

use serde::{Deserialize, Serialize};

use super::ids::{ClassId, SchoolYearId};
use super::validation::{FieldViolation, Validate, Violations};

/// Maximum length of a class name.
pub const CLASS_NAME_MAX: usize = 50;

/// A stored class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Store-assigned identifier.
    pub id: ClassId,
    /// Display name, e.g. `1A`.
    pub name: String,
    /// Owning school year.
    pub school_year_id: SchoolYearId,
}

/// Field values for creating or replacing a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDraft {
    /// Display name.
    pub name: String,
    /// Owning school year.
    pub school_year_id: SchoolYearId,
}

impl ClassDraft {
    /// Attach a store identifier.
    pub fn into_class(self, id: ClassId) -> Class {
        Class {
            id,
            name: self.name,
            school_year_id: self.school_year_id,
        }
    }
}

impl Validate for ClassDraft {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Violations::new();
        violations.required_text("name", &self.name, CLASS_NAME_MAX);
        violations.into_vec()
    }
}
