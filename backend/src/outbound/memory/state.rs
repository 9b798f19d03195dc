//! Table contents and integrity rules of the in-memory store.

use chrono::NaiveDate;

use crate::domain::ports::{Reference, RepositoryError};
use crate::domain::{
    Category, CategoryDraft, CategoryId, Class, ClassDraft, ClassId, Entry, EntryDraft,
    EntryFilter, EntryId, Pupil, PupilDraft, PupilId, SchoolYear, SchoolYearDraft, SchoolYearId,
};

/// Rows of every table plus their id sequences.
///
/// Rows are appended in id order, so iteration order is id order.
#[derive(Debug, Clone, Default)]
pub(super) struct MemoryState {
    school_years: Vec<SchoolYear>,
    classes: Vec<Class>,
    pupils: Vec<Pupil>,
    categories: Vec<Category>,
    entries: Vec<Entry>,
    sequences: Sequences,
}

#[derive(Debug, Clone, Default)]
struct Sequences {
    school_year: i32,
    class: i32,
    pupil: i32,
    category: i32,
    entry: i32,
}

fn next(sequence: &mut i32) -> i32 {
    *sequence += 1;
    *sequence
}

fn position<T>(rows: &[T], matches: impl Fn(&T) -> bool) -> Option<usize> {
    rows.iter().position(matches)
}

impl MemoryState {
    fn require(&self, reference: Reference, relation: &str) -> Result<(), RepositoryError> {
        if self.contains(reference) {
            Ok(())
        } else {
            Err(RepositoryError::missing_reference(relation))
        }
    }

    pub(super) fn contains(&self, reference: Reference) -> bool {
        match reference {
            Reference::SchoolYear(id) => self.school_years.iter().any(|row| row.id == id),
            Reference::Class(id) => self.classes.iter().any(|row| row.id == id),
            Reference::Pupil(id) => self.pupils.iter().any(|row| row.id == id),
            Reference::Category(id) => self.categories.iter().any(|row| row.id == id),
        }
    }

    fn clear_active_except(&mut self, keep: SchoolYearId) {
        for year in self.school_years.iter_mut().filter(|year| year.id != keep) {
            year.is_active = false;
        }
    }

    // School years

    pub(super) fn insert_school_year(&mut self, draft: &SchoolYearDraft) -> SchoolYear {
        let id = SchoolYearId::new(next(&mut self.sequences.school_year));
        let year = draft.clone().into_school_year(id);
        if year.is_active {
            self.clear_active_except(id);
        }
        self.school_years.push(year.clone());
        year
    }

    pub(super) fn school_years(&self) -> Vec<SchoolYear> {
        self.school_years.clone()
    }

    pub(super) fn school_year(&self, id: SchoolYearId) -> Option<SchoolYear> {
        self.school_years.iter().find(|row| row.id == id).cloned()
    }

    pub(super) fn active_school_year(&self) -> Option<SchoolYear> {
        self.school_years.iter().find(|row| row.is_active).cloned()
    }

    pub(super) fn update_school_year(
        &mut self,
        id: SchoolYearId,
        draft: &SchoolYearDraft,
    ) -> Option<SchoolYear> {
        let index = position(&self.school_years, |row| row.id == id)?;
        let year = draft.clone().into_school_year(id);
        if year.is_active {
            self.clear_active_except(id);
        }
        self.school_years[index] = year.clone();
        Some(year)
    }

    pub(super) fn delete_school_year(&mut self, id: SchoolYearId) -> Result<bool, RepositoryError> {
        let Some(index) = position(&self.school_years, |row| row.id == id) else {
            return Ok(false);
        };
        if self.classes.iter().any(|row| row.school_year_id == id) {
            return Err(RepositoryError::still_referenced("classes"));
        }
        self.school_years.remove(index);
        Ok(true)
    }

    // Classes

    pub(super) fn insert_class(&mut self, draft: &ClassDraft) -> Result<Class, RepositoryError> {
        self.require(Reference::SchoolYear(draft.school_year_id), "school_year_id")?;
        let class = draft
            .clone()
            .into_class(ClassId::new(next(&mut self.sequences.class)));
        self.classes.push(class.clone());
        Ok(class)
    }

    pub(super) fn classes(&self, school_year_id: Option<SchoolYearId>) -> Vec<Class> {
        self.classes
            .iter()
            .filter(|row| school_year_id.is_none_or(|id| row.school_year_id == id))
            .cloned()
            .collect()
    }

    pub(super) fn class(&self, id: ClassId) -> Option<Class> {
        self.classes.iter().find(|row| row.id == id).cloned()
    }

    pub(super) fn update_class(
        &mut self,
        id: ClassId,
        draft: &ClassDraft,
    ) -> Result<Option<Class>, RepositoryError> {
        let Some(index) = position(&self.classes, |row| row.id == id) else {
            return Ok(None);
        };
        self.require(Reference::SchoolYear(draft.school_year_id), "school_year_id")?;
        let class = draft.clone().into_class(id);
        self.classes[index] = class.clone();
        Ok(Some(class))
    }

    pub(super) fn delete_class(&mut self, id: ClassId) -> Result<bool, RepositoryError> {
        let Some(index) = position(&self.classes, |row| row.id == id) else {
            return Ok(false);
        };
        if self.pupils.iter().any(|row| row.class_id == id) {
            return Err(RepositoryError::still_referenced("pupils"));
        }
        self.classes.remove(index);
        Ok(true)
    }

    // Pupils

    pub(super) fn insert_pupil(&mut self, draft: &PupilDraft) -> Result<Pupil, RepositoryError> {
        self.require(Reference::Class(draft.class_id), "class_id")?;
        let pupil = draft
            .clone()
            .into_pupil(PupilId::new(next(&mut self.sequences.pupil)));
        self.pupils.push(pupil.clone());
        Ok(pupil)
    }

    pub(super) fn pupils(&self, class_id: Option<ClassId>) -> Vec<Pupil> {
        self.pupils
            .iter()
            .filter(|row| class_id.is_none_or(|id| row.class_id == id))
            .cloned()
            .collect()
    }

    pub(super) fn pupil(&self, id: PupilId) -> Option<Pupil> {
        self.pupils.iter().find(|row| row.id == id).cloned()
    }

    pub(super) fn update_pupil(
        &mut self,
        id: PupilId,
        draft: &PupilDraft,
    ) -> Result<Option<Pupil>, RepositoryError> {
        let Some(index) = position(&self.pupils, |row| row.id == id) else {
            return Ok(None);
        };
        self.require(Reference::Class(draft.class_id), "class_id")?;
        let pupil = draft.clone().into_pupil(id);
        self.pupils[index] = pupil.clone();
        Ok(Some(pupil))
    }

    pub(super) fn delete_pupil(&mut self, id: PupilId) -> Result<bool, RepositoryError> {
        let Some(index) = position(&self.pupils, |row| row.id == id) else {
            return Ok(false);
        };
        if self.entries.iter().any(|row| row.pupil_id == id) {
            return Err(RepositoryError::still_referenced("entries"));
        }
        self.pupils.remove(index);
        Ok(true)
    }

    // Categories

    pub(super) fn insert_category(&mut self, draft: &CategoryDraft) -> Category {
        let category = draft
            .clone()
            .into_category(CategoryId::new(next(&mut self.sequences.category)));
        self.categories.push(category.clone());
        category
    }

    pub(super) fn categories(&self, predefined_only: bool) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|row| !predefined_only || row.is_predefined)
            .cloned()
            .collect()
    }

    pub(super) fn category(&self, id: CategoryId) -> Option<Category> {
        self.categories.iter().find(|row| row.id == id).cloned()
    }

    pub(super) fn predefined_category(&self, name_de: &str, name_en: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .find(|row| row.is_predefined && row.has_labels(name_de, name_en))
            .map(|row| row.id)
    }

    pub(super) fn update_category(
        &mut self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Option<Category> {
        let index = position(&self.categories, |row| row.id == id)?;
        let category = draft.clone().into_category(id);
        self.categories[index] = category.clone();
        Some(category)
    }

    pub(super) fn delete_category(&mut self, id: CategoryId) -> Result<bool, RepositoryError> {
        let Some(index) = position(&self.categories, |row| row.id == id) else {
            return Ok(false);
        };
        if self.entries.iter().any(|row| row.category_id == id) {
            return Err(RepositoryError::still_referenced("entries"));
        }
        self.categories.remove(index);
        Ok(true)
    }

    // Entries

    fn require_entry_parents(&self, draft: &EntryDraft) -> Result<(), RepositoryError> {
        self.require(Reference::Pupil(draft.pupil_id), "pupil_id")?;
        self.require(Reference::Category(draft.category_id), "category_id")
    }

    pub(super) fn insert_entry(&mut self, draft: &EntryDraft) -> Result<Entry, RepositoryError> {
        self.require_entry_parents(draft)?;
        let entry = draft
            .clone()
            .into_entry(EntryId::new(next(&mut self.sequences.entry)));
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub(super) fn entries(&self, filter: EntryFilter) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect()
    }

    pub(super) fn entries_between(
        &self,
        pupil_id: PupilId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|row| row.pupil_id == pupil_id && (start..=end).contains(&row.date))
            .cloned()
            .collect()
    }

    pub(super) fn entry(&self, id: EntryId) -> Option<Entry> {
        self.entries.iter().find(|row| row.id == id).cloned()
    }

    pub(super) fn update_entry(
        &mut self,
        id: EntryId,
        draft: &EntryDraft,
    ) -> Result<Option<Entry>, RepositoryError> {
        let Some(index) = position(&self.entries, |row| row.id == id) else {
            return Ok(None);
        };
        self.require_entry_parents(draft)?;
        let entry = draft.clone().into_entry(id);
        self.entries[index] = entry.clone();
        Ok(Some(entry))
    }

    pub(super) fn delete_entry(&mut self, id: EntryId) -> bool {
        match position(&self.entries, |row| row.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}
