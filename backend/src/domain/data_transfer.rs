//! Interchange snapshot covering every table, plus the flat CSV view.
//!
//! A snapshot lists every row of the five tables without nesting. Records
//! carry their store id on export; on import the id is optional and only
//! used to translate foreign keys of later records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ports::RepositoryError;
use super::validation::{FieldViolation, Validate};
use super::{
    Category, CategoryDraft, CategoryId, Class, ClassDraft, ClassId, Entry, EntryDraft, EntryId,
    Pupil, PupilDraft, PupilId, SchoolYear, SchoolYearDraft, SchoolYearId,
};

/// Sentinel shown where a row references a parent that no longer exists.
pub const MISSING_LINK: &str = "N/A";

/// Header row of the CSV entry export.
pub const CSV_HEADER: [&str; 6] = ["Pupil", "Category", "Date", "Text", "Grade", "Subject"];

macro_rules! define_record {
    ($(#[$meta:meta])* $record:ident { id: $id:ty, draft: $draft:ty, entity: $entity:ty, into: $into:ident }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $record {
            /// Identifier in the exporting store.
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub id: Option<$id>,
            /// Field values.
            #[serde(flatten)]
            pub draft: $draft,
        }

        impl From<$entity> for $record {
            fn from(value: $entity) -> Self {
                let id = value.id;
                let draft = <$draft>::from(value);
                Self { id: Some(id), draft }
            }
        }

        impl $record {
            /// Attach the id to rebuild the exported entity, if one is set.
            pub fn into_entity(self) -> Option<$entity> {
                let id = self.id?;
                Some(self.draft.$into(id))
            }
        }
    };
}

define_record!(
    /// A school year inside a snapshot.
    SchoolYearRecord { id: SchoolYearId, draft: SchoolYearDraft, entity: SchoolYear, into: into_school_year }
);
define_record!(
    /// A class inside a snapshot.
    ClassRecord { id: ClassId, draft: ClassDraft, entity: Class, into: into_class }
);
define_record!(
    /// A pupil inside a snapshot.
    PupilRecord { id: PupilId, draft: PupilDraft, entity: Pupil, into: into_pupil }
);
define_record!(
    /// A category inside a snapshot.
    CategoryRecord { id: CategoryId, draft: CategoryDraft, entity: Category, into: into_category }
);
define_record!(
    /// An entry inside a snapshot.
    EntryRecord { id: EntryId, draft: EntryDraft, entity: Entry, into: into_entry }
);

impl From<SchoolYear> for SchoolYearDraft {
    fn from(value: SchoolYear) -> Self {
        Self {
            name: value.name,
            start_date: value.start_date,
            end_date: value.end_date,
            is_active: value.is_active,
        }
    }
}

impl From<Class> for ClassDraft {
    fn from(value: Class) -> Self {
        Self {
            name: value.name,
            school_year_id: value.school_year_id,
        }
    }
}

impl From<Pupil> for PupilDraft {
    fn from(value: Pupil) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            class_id: value.class_id,
        }
    }
}

impl From<Category> for CategoryDraft {
    fn from(value: Category) -> Self {
        Self {
            name_de: value.name_de,
            name_en: value.name_en,
            is_predefined: value.is_predefined,
        }
    }
}

impl From<Entry> for EntryDraft {
    fn from(value: Entry) -> Self {
        Self {
            pupil_id: value.pupil_id,
            category_id: value.category_id,
            date: value.date,
            text: value.text,
            grade: value.grade,
            subject: value.subject,
        }
    }
}

/// The complete data set in interchange form.
///
/// Every list defaults to empty when absent from an import payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// School year rows.
    #[serde(default)]
    pub school_years: Vec<SchoolYearRecord>,
    /// Class rows.
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    /// Pupil rows.
    #[serde(default)]
    pub pupils: Vec<PupilRecord>,
    /// Category rows.
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    /// Entry rows.
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
}

impl Snapshot {
    /// Build a snapshot from stored rows.
    pub fn from_rows(
        school_years: Vec<SchoolYear>,
        classes: Vec<Class>,
        pupils: Vec<Pupil>,
        categories: Vec<Category>,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            school_years: school_years.into_iter().map(Into::into).collect(),
            classes: classes.into_iter().map(Into::into).collect(),
            pupils: pupils.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Flatten the entries into CSV rows, resolving names by id.
    ///
    /// Links that do not resolve inside the snapshot become [`MISSING_LINK`].
    pub fn entry_rows(&self) -> Vec<EntryRow> {
        let pupils: HashMap<PupilId, String> = self
            .pupils
            .iter()
            .filter_map(|record| {
                let name = format!("{} {}", record.draft.first_name, record.draft.last_name);
                record.id.map(|id| (id, name))
            })
            .collect();
        let categories: HashMap<CategoryId, &str> = self
            .categories
            .iter()
            .filter_map(|record| record.id.map(|id| (id, record.draft.name_en.as_str())))
            .collect();

        self.entries
            .iter()
            .map(|record| {
                let entry = &record.draft;
                EntryRow {
                    pupil: pupils
                        .get(&entry.pupil_id)
                        .cloned()
                        .unwrap_or_else(|| MISSING_LINK.to_owned()),
                    category: categories
                        .get(&entry.category_id)
                        .map_or(MISSING_LINK, |name| name)
                        .to_owned(),
                    date: entry.date.to_string(),
                    text: entry.text.clone(),
                    grade: entry.grade.clone().unwrap_or_default(),
                    subject: entry.subject.clone().unwrap_or_default(),
                }
            })
            .collect()
    }
}

impl Validate for Snapshot {
    fn violations(&self) -> Vec<FieldViolation> {
        fn prefixed<T: Validate>(
            kind: &str,
            drafts: impl Iterator<Item = T>,
        ) -> impl Iterator<Item = FieldViolation> {
            drafts.enumerate().flat_map(move |(index, draft)| {
                let prefix = format!("{kind}[{index}]");
                draft
                    .violations()
                    .into_iter()
                    .map(move |violation| violation.within(&prefix))
            })
        }

        prefixed("school_years", self.school_years.iter().map(|r| &r.draft))
            .chain(prefixed("classes", self.classes.iter().map(|r| &r.draft)))
            .chain(prefixed("pupils", self.pupils.iter().map(|r| &r.draft)))
            .chain(prefixed("categories", self.categories.iter().map(|r| &r.draft)))
            .chain(prefixed("entries", self.entries.iter().map(|r| &r.draft)))
            .collect()
    }
}

/// One line of the CSV entry export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    /// Pupil full name or [`MISSING_LINK`].
    pub pupil: String,
    /// English category label or [`MISSING_LINK`].
    pub category: String,
    /// ISO-8601 date.
    pub date: String,
    /// Entry body.
    pub text: String,
    /// Grade, empty when absent.
    pub grade: String,
    /// Subject, empty when absent.
    pub subject: String,
}

impl EntryRow {
    fn fields(&self) -> [&str; 6] {
        [
            &self.pupil,
            &self.category,
            &self.date,
            &self.text,
            &self.grade,
            &self.subject,
        ]
    }
}

fn csv_quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Render rows as RFC 4180 CSV with a header line and CRLF line endings.
///
/// # Examples
/// ```
/// use pupil_tracker::domain::{EntryRow, write_csv};
///
/// let row = EntryRow {
///     pupil: "Max Mustermann".into(),
///     category: "Work Behavior".into(),
///     date: "2024-09-02".into(),
///     text: "Quiet, focused".into(),
///     grade: String::new(),
///     subject: String::new(),
/// };
/// let csv = write_csv(&[row]);
/// assert_eq!(
///     csv,
///     "Pupil,Category,Date,Text,Grade,Subject\r\n\
///      Max Mustermann,Work Behavior,2024-09-02,\"Quiet, focused\",,\r\n"
/// );
/// ```
pub fn write_csv(rows: &[EntryRow]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push_str("\r\n");
    for row in rows {
        let line: Vec<String> = row.fields().iter().map(|field| csv_quote(field)).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Rows created by one import, per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// School years created.
    pub school_years: usize,
    /// Classes created.
    pub classes: usize,
    /// Pupils created.
    pub pupils: usize,
    /// Categories created; predefined matches are not counted.
    pub categories: usize,
    /// Entries created.
    pub entries: usize,
}

/// Why an import was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// A translated foreign key matches no row in the store or the batch.
    #[error("{field} references unknown {entity} {id}")]
    UnknownReference {
        /// Path of the offending field, e.g. `pupils[0].class_id`.
        field: String,
        /// Human name of the referenced entity.
        entity: &'static str,
        /// Identifier after translation.
        id: i32,
    },
    /// The store failed while writing.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
