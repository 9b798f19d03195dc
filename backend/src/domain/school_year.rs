//! School years group classes into a teaching period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::SchoolYearId;
use super::validation::{FieldViolation, Validate, Violations};

/// Maximum length of a school year name.
pub const SCHOOL_YEAR_NAME_MAX: usize = 50;

/// A stored school year.
///
/// At most one school year carries `is_active = true`; the write path clears
/// the flag on every other row when a year is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolYear {
    /// Store-assigned identifier.
    pub id: SchoolYearId,
    /// Display name, e.g. `2024/2025`.
    pub name: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Whether this is the current school year.
    pub is_active: bool,
}

/// Field values for creating or replacing a school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolYearDraft {
    /// Display name.
    pub name: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Whether this becomes the current school year.
    #[serde(default)]
    pub is_active: bool,
}

impl SchoolYearDraft {
    /// Attach a store identifier.
    pub fn into_school_year(self, id: SchoolYearId) -> SchoolYear {
        SchoolYear {
            id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
        }
    }
}

impl Validate for SchoolYearDraft {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Violations::new();
        violations.required_text("name", &self.name, SCHOOL_YEAR_NAME_MAX);
        if self.start_date > self.end_date {
            violations.push(FieldViolation::new(
                "end_date",
                "date_order",
                "must not be before start_date",
            ));
        }
        violations.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    fn accepts_well_formed_year() {
        let draft = SchoolYearDraft {
            name: "2024/2025".into(),
            start_date: date(2024, 8, 1),
            end_date: date(2025, 7, 31),
            is_active: true,
        };
        assert!(draft.violations().is_empty());
    }

    #[rstest]
    fn rejects_inverted_period_and_blank_name() {
        let draft = SchoolYearDraft {
            name: " ".into(),
            start_date: date(2025, 8, 1),
            end_date: date(2025, 7, 31),
            is_active: false,
        };
        let codes: Vec<_> = draft.violations().iter().map(FieldViolation::code).collect();
        assert_eq!(codes, ["blank", "date_order"]);
    }
}
