//! Diesel row structs.
//!
//! Persistence-only types; conversions into domain entities live here so
//! repositories never hand rows to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    Category, CategoryDraft, CategoryId, Class, ClassDraft, ClassId, Entry, EntryDraft, EntryId,
    Pupil, PupilDraft, PupilId, SchoolYear, SchoolYearDraft, SchoolYearId,
};

use super::schema::{categories, classes, entries, pupils, school_years};

// ---------------------------------------------------------------------------
// School years
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = school_years)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SchoolYearRow {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl From<SchoolYearRow> for SchoolYear {
    fn from(row: SchoolYearRow) -> Self {
        Self {
            id: SchoolYearId::new(row.id),
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
        }
    }
}

/// Insert and full-replace values for `school_years`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = school_years)]
pub(crate) struct SchoolYearValues<'a> {
    pub name: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl<'a> From<&'a SchoolYearDraft> for SchoolYearValues<'a> {
    fn from(draft: &'a SchoolYearDraft) -> Self {
        Self {
            name: &draft.name,
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_active: draft.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = classes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClassRow {
    pub id: i32,
    pub name: String,
    pub school_year_id: i32,
}

impl From<ClassRow> for Class {
    fn from(row: ClassRow) -> Self {
        Self {
            id: ClassId::new(row.id),
            name: row.name,
            school_year_id: SchoolYearId::new(row.school_year_id),
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = classes)]
pub(crate) struct ClassValues<'a> {
    pub name: &'a str,
    pub school_year_id: i32,
}

impl<'a> From<&'a ClassDraft> for ClassValues<'a> {
    fn from(draft: &'a ClassDraft) -> Self {
        Self {
            name: &draft.name,
            school_year_id: draft.school_year_id.get(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pupils
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pupils)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PupilRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub class_id: i32,
}

impl From<PupilRow> for Pupil {
    fn from(row: PupilRow) -> Self {
        Self {
            id: PupilId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            class_id: ClassId::new(row.class_id),
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pupils)]
pub(crate) struct PupilValues<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub class_id: i32,
}

impl<'a> From<&'a PupilDraft> for PupilValues<'a> {
    fn from(draft: &'a PupilDraft) -> Self {
        Self {
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            class_id: draft.class_id.get(),
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name_de: String,
    pub name_en: String,
    pub is_predefined: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name_de: row.name_de,
            name_en: row.name_en,
            is_predefined: row.is_predefined,
        }
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryValues<'a> {
    pub name_de: &'a str,
    pub name_en: &'a str,
    pub is_predefined: bool,
}

impl<'a> From<&'a CategoryDraft> for CategoryValues<'a> {
    fn from(draft: &'a CategoryDraft) -> Self {
        Self {
            name_de: &draft.name_de,
            name_en: &draft.name_en,
            is_predefined: draft.is_predefined,
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub id: i32,
    pub pupil_id: i32,
    pub category_id: i32,
    pub date: NaiveDate,
    pub text: String,
    pub grade: Option<String>,
    pub subject: Option<String>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: EntryId::new(row.id),
            pupil_id: PupilId::new(row.pupil_id),
            category_id: CategoryId::new(row.category_id),
            date: row.date,
            text: row.text,
            grade: row.grade,
            subject: row.subject,
        }
    }
}

/// Optional columns are written as NULL when absent so updates clear them.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = entries)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EntryValues<'a> {
    pub pupil_id: i32,
    pub category_id: i32,
    pub date: NaiveDate,
    pub text: &'a str,
    pub grade: Option<&'a str>,
    pub subject: Option<&'a str>,
}

impl<'a> From<&'a EntryDraft> for EntryValues<'a> {
    fn from(draft: &'a EntryDraft) -> Self {
        Self {
            pupil_id: draft.pupil_id.get(),
            category_id: draft.category_id.get(),
            date: draft.date,
            text: &draft.text,
            grade: draft.grade.as_deref(),
            subject: draft.subject.as_deref(),
        }
    }
}
