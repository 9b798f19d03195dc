//! Per-pupil development report.
//!
//! A report lists a pupil's entries within a date window, grouped under the
//! English label of their category. Groups keep the order in which their
//! category was first seen; entries keep store order inside a group.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::data_transfer::MISSING_LINK;
use super::ports::{CategoryRepository, ClassRepository, EntryRepository, PupilRepository};
use super::repository_errors::map_repository_error;
use super::{CategoryId, Entry, Error, FieldViolation, Pupil, PupilId};

/// Inclusive date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Earliest date used when no start is given.
    pub const DEFAULT_START: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
        Some(date) => date,
        None => NaiveDate::MIN,
    };
    /// Latest date used when no end is given.
    pub const DEFAULT_END: NaiveDate = match NaiveDate::from_ymd_opt(2100, 12, 31) {
        Some(date) => date,
        None => NaiveDate::MAX,
    };

    /// Build a window, filling absent bounds with the defaults.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use pupil_tracker::domain::DateWindow;
    ///
    /// let window = DateWindow::new(None, None).unwrap();
    /// assert_eq!(window.start(), DateWindow::DEFAULT_START);
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// assert!(DateWindow::new(Some(start), Some(end)).is_err());
    /// ```
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, Error> {
        let start = start.unwrap_or(Self::DEFAULT_START);
        let end = end.unwrap_or(Self::DEFAULT_END);
        if start > end {
            return Err(Error::validation(vec![FieldViolation::new(
                "end_date",
                "date_order",
                "must not be before start_date",
            )]));
        }
        Ok(Self { start, end })
    }

    /// First day included.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day included.
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// One entry as shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Day of the observation.
    pub date: NaiveDate,
    /// Entry body.
    pub text: String,
    /// Optional grade.
    pub grade: Option<String>,
    /// Optional subject; carried but not printed in documents.
    pub subject: Option<String>,
}

impl From<Entry> for ReportEntry {
    fn from(entry: Entry) -> Self {
        Self {
            date: entry.date,
            text: entry.text,
            grade: entry.grade,
            subject: entry.subject,
        }
    }
}

impl ReportEntry {
    /// Document line: `[date] text` plus ` (Grade: g)` when graded.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use pupil_tracker::domain::ReportEntry;
    ///
    /// let entry = ReportEntry {
    ///     date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
    ///     text: "Test entry".into(),
    ///     grade: Some("A".into()),
    ///     subject: Some("Math".into()),
    /// };
    /// assert_eq!(entry.line(), "[2024-09-02] Test entry (Grade: A)");
    /// ```
    pub fn line(&self) -> String {
        match self.grade.as_deref().filter(|grade| !grade.is_empty()) {
            Some(grade) => format!("[{}] {} (Grade: {grade})", self.date, self.text),
            None => format!("[{}] {}", self.date, self.text),
        }
    }
}

/// Entries grouped by category label in first-seen order.
///
/// Serialises as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGroups(Vec<(String, Vec<ReportEntry>)>);

impl CategoryGroups {
    /// Append `entry` to the group for `label`, opening it if needed.
    pub fn push(&mut self, label: &str, entry: ReportEntry) {
        match self.0.iter_mut().find(|(name, _)| name == label) {
            Some((_, entries)) => entries.push(entry),
            None => self.0.push((label.to_owned(), vec![entry])),
        }
    }

    /// Groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReportEntry])> {
        self.0
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entry fell inside the window.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, entries) in &self.0 {
            map.serialize_entry(name, entries)?;
        }
        map.end()
    }
}

/// A pupil's report for one date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Pupil the report is about.
    pub pupil_id: PupilId,
    /// First and last name.
    pub pupil_name: String,
    /// Name of the pupil's class or `N/A`.
    pub class_name: String,
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// Entries grouped by English category label.
    pub entries_by_category: CategoryGroups,
    #[serde(skip)]
    first_name: String,
    #[serde(skip)]
    last_name: String,
}

impl Report {
    /// Start an empty report for `pupil`.
    pub fn new(pupil: &Pupil, class_name: String, window: DateWindow) -> Self {
        Self {
            pupil_id: pupil.id,
            pupil_name: pupil.full_name(),
            class_name,
            start_date: window.start(),
            end_date: window.end(),
            entries_by_category: CategoryGroups::default(),
            first_name: pupil.first_name.clone(),
            last_name: pupil.last_name.clone(),
        }
    }

    /// Download file name without extension: `report_<last>_<first>`.
    pub fn file_stem(&self) -> String {
        format!("report_{}_{}", self.last_name, self.first_name)
    }
}

/// Builds reports from explicit repository reads.
#[derive(Clone)]
pub struct ReportService {
    pupils: Arc<dyn PupilRepository>,
    classes: Arc<dyn ClassRepository>,
    categories: Arc<dyn CategoryRepository>,
    entries: Arc<dyn EntryRepository>,
}

impl ReportService {
    /// Create a service over the given repositories.
    pub fn new(
        pupils: Arc<dyn PupilRepository>,
        classes: Arc<dyn ClassRepository>,
        categories: Arc<dyn CategoryRepository>,
        entries: Arc<dyn EntryRepository>,
    ) -> Self {
        Self {
            pupils,
            classes,
            categories,
            entries,
        }
    }

    /// Build the report for `pupil_id` within `window`.
    pub async fn build(&self, pupil_id: PupilId, window: DateWindow) -> Result<Report, Error> {
        let map_error = map_repository_error("Report");
        let pupil = self
            .pupils
            .find(pupil_id)
            .await
            .map_err(&map_error)?
            .ok_or_else(|| Error::not_found("Pupil not found"))?;
        let class_name = self
            .classes
            .find(pupil.class_id)
            .await
            .map_err(&map_error)?
            .map_or_else(|| MISSING_LINK.to_owned(), |class| class.name);
        let entries = self
            .entries
            .list_for_pupil_between(pupil_id, window.start(), window.end())
            .await
            .map_err(&map_error)?;

        let mut labels: Vec<(CategoryId, String)> = Vec::new();
        let mut report = Report::new(&pupil, class_name, window);
        for entry in entries {
            let label = match labels.iter().find(|(id, _)| *id == entry.category_id) {
                Some((_, label)) => label.clone(),
                None => {
                    let label = self
                        .categories
                        .find(entry.category_id)
                        .await
                        .map_err(&map_error)?
                        .map_or_else(|| MISSING_LINK.to_owned(), |category| category.name_en);
                    labels.push((entry.category_id, label.clone()));
                    label
                }
            };
            report.entries_by_category.push(&label, entry.into());
        }
        debug!(
            pupil_id = %pupil_id,
            groups = report.entries_by_category.len(),
            "report built"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
