//! Bilingual entry categories and the predefined seed set.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;
use super::validation::{FieldViolation, Validate, Violations};

/// Maximum length of either label.
pub const CATEGORY_NAME_MAX: usize = 100;

/// German and English labels of the categories seeded at startup.
pub const PREDEFINED_CATEGORIES: [(&str, &str); 8] = [
    ("Arbeitsverhalten", "Work Behavior"),
    ("Sozialverhalten", "Social Behavior"),
    ("Lernentwicklung", "Learning Development"),
    ("Besondere Vorkommnisse", "Special Incidents"),
    ("Motorik", "Motor Skills"),
    ("Kreativitaet", "Creativity"),
    ("Sprachentwicklung", "Language Development"),
    ("Selbststaendigkeit", "Independence"),
];

/// A stored category.
///
/// Predefined categories cannot be deleted and keep their flag on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier.
    pub id: CategoryId,
    /// German label.
    pub name_de: String,
    /// English label, used as the report heading.
    pub name_en: String,
    /// Whether the category belongs to the protected seed set.
    pub is_predefined: bool,
}

impl Category {
    /// Whether both labels equal the given pair.
    pub fn has_labels(&self, name_de: &str, name_en: &str) -> bool {
        self.name_de == name_de && self.name_en == name_en
    }
}

/// Field values for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    /// German label.
    pub name_de: String,
    /// English label.
    pub name_en: String,
    /// Requested predefined flag; ignored on update.
    #[serde(default)]
    pub is_predefined: bool,
}

impl CategoryDraft {
    /// Drafts for the eight predefined categories.
    pub fn predefined() -> impl Iterator<Item = CategoryDraft> {
        PREDEFINED_CATEGORIES
            .iter()
            .map(|(name_de, name_en)| CategoryDraft {
                name_de: (*name_de).to_owned(),
                name_en: (*name_en).to_owned(),
                is_predefined: true,
            })
    }

    /// Attach a store identifier.
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name_de: self.name_de,
            name_en: self.name_en,
            is_predefined: self.is_predefined,
        }
    }
}

impl Validate for CategoryDraft {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Violations::new();
        violations.required_text("name_de", &self.name_de, CATEGORY_NAME_MAX);
        violations.required_text("name_en", &self.name_en, CATEGORY_NAME_MAX);
        violations.into_vec()
    }
}
