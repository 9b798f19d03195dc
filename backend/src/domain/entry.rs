//! Dated observations about a pupil.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, EntryId, PupilId};
use super::validation::{FieldViolation, Validate, Violations};

/// Maximum length of a grade.
pub const GRADE_MAX: usize = 10;
/// Maximum length of a subject.
pub const SUBJECT_MAX: usize = 100;

/// A stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Pupil the observation is about.
    pub pupil_id: PupilId,
    /// Category the observation is filed under.
    pub category_id: CategoryId,
    /// Day of the observation.
    pub date: NaiveDate,
    /// Free-text body.
    pub text: String,
    /// Optional grade.
    pub grade: Option<String>,
    /// Optional school subject.
    pub subject: Option<String>,
}

/// Field values for creating or replacing an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Pupil the observation is about.
    pub pupil_id: PupilId,
    /// Category the observation is filed under.
    pub category_id: CategoryId,
    /// Day of the observation.
    pub date: NaiveDate,
    /// Free-text body.
    pub text: String,
    /// Optional grade.
    #[serde(default)]
    pub grade: Option<String>,
    /// Optional school subject.
    #[serde(default)]
    pub subject: Option<String>,
}

impl EntryDraft {
    /// Attach a store identifier.
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry {
            id,
            pupil_id: self.pupil_id,
            category_id: self.category_id,
            date: self.date,
            text: self.text,
            grade: self.grade,
            subject: self.subject,
        }
    }
}

impl Validate for EntryDraft {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Violations::new();
        if self.text.trim().is_empty() {
            violations.push(FieldViolation::blank("text"));
        }
        violations.optional_text("grade", self.grade.as_deref(), GRADE_MAX);
        violations.optional_text("subject", self.subject.as_deref(), SUBJECT_MAX);
        violations.into_vec()
    }
}

/// Optional filters for listing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Only entries about this pupil.
    pub pupil_id: Option<PupilId>,
    /// Only entries in this category.
    pub category_id: Option<CategoryId>,
}

impl EntryFilter {
    /// Whether `entry` passes every set filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        self.pupil_id.is_none_or(|id| entry.pupil_id == id)
            && self.category_id.is_none_or(|id| entry.category_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(text: &str, grade: Option<&str>) -> EntryDraft {
        EntryDraft {
            pupil_id: PupilId::new(1),
            category_id: CategoryId::new(1),
            date: NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date"),
            text: text.into(),
            grade: grade.map(str::to_owned),
            subject: None,
        }
    }

    #[rstest]
    #[case(draft("Reads fluently", Some("A")), &[])]
    #[case(draft("", None), &["text"])]
    #[case(draft("ok", Some("far too long grade")), &["grade"])]
    fn validation_rules(#[case] draft: EntryDraft, #[case] fields: &[&str]) {
        let violations = draft.violations();
        let seen: Vec<_> = violations.iter().map(FieldViolation::field).collect();
        assert_eq!(seen, fields);
    }

    #[rstest]
    fn filter_matches_on_every_set_field() {
        let entry = draft("x", None).into_entry(EntryId::new(3));
        assert!(EntryFilter::default().matches(&entry));
        let other_pupil = EntryFilter {
            pupil_id: Some(PupilId::new(2)),
            ..EntryFilter::default()
        };
        assert!(!other_pupil.matches(&entry));
    }
}
