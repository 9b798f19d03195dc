//! Pupils belong to a class and accumulate entries.

use serde::{Deserialize, Serialize};

use super::ids::{ClassId, PupilId};
use super::validation::{FieldViolation, Validate, Violations};

/// Maximum length of either name part.
pub const PUPIL_NAME_MAX: usize = 100;

/// A stored pupil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pupil {
    /// Store-assigned identifier.
    pub id: PupilId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Owning class.
    pub class_id: ClassId,
}

impl Pupil {
    /// First and last name joined by a single space.
    ///
    /// # Examples
    /// ```
    /// use pupil_tracker::domain::{ClassId, Pupil, PupilId};
    ///
    /// let pupil = Pupil {
    ///     id: PupilId::new(1),
    ///     first_name: "Max".into(),
    ///     last_name: "Mustermann".into(),
    ///     class_id: ClassId::new(1),
    /// };
    /// assert_eq!(pupil.full_name(), "Max Mustermann");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Field values for creating or replacing a pupil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PupilDraft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Owning class.
    pub class_id: ClassId,
}

impl PupilDraft {
    /// Attach a store identifier.
    pub fn into_pupil(self, id: PupilId) -> Pupil {
        Pupil {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            class_id: self.class_id,
        }
    }
}

impl Validate for PupilDraft {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Violations::new();
        violations.required_text("first_name", &self.first_name, PUPIL_NAME_MAX);
        violations.required_text("last_name", &self.last_name, PUPIL_NAME_MAX);
        violations.into_vec()
    }
}
