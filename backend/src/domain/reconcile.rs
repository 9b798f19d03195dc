//! Import reconciliation: recreate snapshot rows and translate foreign keys.
//!
//! The store assigns fresh ids on insert, so every caller-supplied id is
//! recorded in an [`IdMap`] for its entity kind. Child records translate their
//! parent keys through the matching map before insertion. A key with no
//! mapping passes through unchanged and must then name an existing row.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use super::ports::{ImportSink, Reference};
use super::{
    CategoryId, ClassDraft, ClassId, EntryDraft, ImportError, ImportSummary, PupilDraft, PupilId,
    SchoolYearId, Snapshot,
};

/// Translation table from caller-supplied ids to store-assigned ids.
#[derive(Debug, Clone)]
pub struct IdMap<K> {
    assigned: HashMap<K, K>,
}

impl<K> Default for IdMap<K> {
    fn default() -> Self {
        Self {
            assigned: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> IdMap<K> {
    /// Remember that `supplied` now lives at `assigned`.
    ///
    /// Records without a supplied id leave the map untouched.
    pub fn record(&mut self, supplied: Option<K>, assigned: K) {
        if let Some(supplied) = supplied {
            self.assigned.insert(supplied, assigned);
        }
    }

    /// The assigned id for `supplied`, or `supplied` itself when unmapped.
    ///
    /// # Examples
    /// ```
    /// use pupil_tracker::domain::{IdMap, SchoolYearId};
    ///
    /// let mut map = IdMap::default();
    /// map.record(Some(SchoolYearId::new(1)), SchoolYearId::new(7));
    /// assert_eq!(map.translate(SchoolYearId::new(1)), SchoolYearId::new(7));
    /// assert_eq!(map.translate(SchoolYearId::new(2)), SchoolYearId::new(2));
    /// ```
    pub fn translate(&self, supplied: K) -> K {
        self.assigned.get(&supplied).copied().unwrap_or(supplied)
    }
}

#[derive(Default)]
struct IdMaps {
    school_years: IdMap<SchoolYearId>,
    classes: IdMap<ClassId>,
    pupils: IdMap<PupilId>,
    categories: IdMap<CategoryId>,
}

async fn require<S: ImportSink + ?Sized>(
    sink: &mut S,
    reference: Reference,
    field: impl FnOnce() -> String,
) -> Result<(), ImportError> {
    if sink.contains(reference).await? {
        return Ok(());
    }
    let (entity, id) = match reference {
        Reference::SchoolYear(id) => ("school year", id.get()),
        Reference::Class(id) => ("class", id.get()),
        Reference::Pupil(id) => ("pupil", id.get()),
        Reference::Category(id) => ("category", id.get()),
    };
    Err(ImportError::UnknownReference {
        field: field(),
        entity,
        id,
    })
}

/// Write every record of `snapshot` through `sink`.
///
/// Order is school years, classes, pupils, categories, entries. A predefined
/// category whose labels match an existing predefined row is mapped onto that
/// row instead of being inserted again and is not counted.
///
/// The caller owns the transaction: on error nothing written through `sink`
/// may be committed.
pub async fn reconcile<S: ImportSink + ?Sized>(
    snapshot: &Snapshot,
    sink: &mut S,
) -> Result<ImportSummary, ImportError> {
    let mut maps = IdMaps::default();
    let mut summary = ImportSummary::default();

    for record in &snapshot.school_years {
        let assigned = sink.insert_school_year(&record.draft).await?;
        maps.school_years.record(record.id, assigned);
        summary.school_years += 1;
    }

    for (index, record) in snapshot.classes.iter().enumerate() {
        let draft = ClassDraft {
            school_year_id: maps.school_years.translate(record.draft.school_year_id),
            ..record.draft.clone()
        };
        require(sink, Reference::SchoolYear(draft.school_year_id), || {
            format!("classes[{index}].school_year_id")
        })
        .await?;
        let assigned = sink.insert_class(&draft).await?;
        maps.classes.record(record.id, assigned);
        summary.classes += 1;
    }

    for (index, record) in snapshot.pupils.iter().enumerate() {
        let draft = PupilDraft {
            class_id: maps.classes.translate(record.draft.class_id),
            ..record.draft.clone()
        };
        require(sink, Reference::Class(draft.class_id), || {
            format!("pupils[{index}].class_id")
        })
        .await?;
        let assigned = sink.insert_pupil(&draft).await?;
        maps.pupils.record(record.id, assigned);
        summary.pupils += 1;
    }

    for record in &snapshot.categories {
        let draft = &record.draft;
        if draft.is_predefined {
            let existing = sink
                .find_predefined_category(&draft.name_de, &draft.name_en)
                .await?;
            if let Some(existing) = existing {
                debug!(name = %draft.name_en, "predefined category matched existing row");
                maps.categories.record(record.id, existing);
                continue;
            }
        }
        let assigned = sink.insert_category(draft).await?;
        maps.categories.record(record.id, assigned);
        summary.categories += 1;
    }

    for (index, record) in snapshot.entries.iter().enumerate() {
        let draft = EntryDraft {
            pupil_id: maps.pupils.translate(record.draft.pupil_id),
            category_id: maps.categories.translate(record.draft.category_id),
            ..record.draft.clone()
        };
        require(sink, Reference::Pupil(draft.pupil_id), || {
            format!("entries[{index}].pupil_id")
        })
        .await?;
        require(sink, Reference::Category(draft.category_id), || {
            format!("entries[{index}].category_id")
        })
        .await?;
        sink.insert_entry(&draft).await?;
        summary.entries += 1;
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
