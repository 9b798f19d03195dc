//! Field-level validation shared by every draft type.
//!
//! Drafts report all problems at once so clients can fix a payload in a
//! single round trip. Violations serialise into the `details.fields` array of
//! the error envelope.

use serde::Serialize;

use super::Error;

/// One rejected field in a request or import payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    field: String,
    code: &'static str,
    message: String,
}

impl FieldViolation {
    /// Build a violation from its parts.
    pub fn new(field: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    /// The field was present but blank once trimmed.
    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, "blank", "must not be blank")
    }

    /// The field was required but absent from the payload.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "missing", "is required")
    }

    /// The field exceeds its maximum length in characters.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        Self::new(field, "too_long", format!("must be at most {max} characters"))
    }

    /// Path of the offending field, e.g. `classes[2].name`.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Machine-readable violation code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Prefix the field path with the location of the enclosing record.
    #[must_use]
    pub fn within(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

/// Accumulates violations while a draft is checked.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Start an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// Require non-blank text of at most `max` characters.
    pub fn required_text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(FieldViolation::blank(field));
        } else {
            self.optional_text(field, Some(value), max);
        }
    }

    /// Limit optional text to `max` characters.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if value.is_some_and(|text| text.chars().count() > max) {
            self.push(FieldViolation::too_long(field, max));
        }
    }

    /// Consume the collection.
    pub fn into_vec(self) -> Vec<FieldViolation> {
        self.0
    }
}

/// Implemented by payloads that can be checked before they reach a store.
pub trait Validate {
    /// Every violation found in `self`; empty when valid.
    fn violations(&self) -> Vec<FieldViolation>;

    /// Reject the payload with a validation error listing all violations.
    fn validate(&self) -> Result<(), Error> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(violations))
        }
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn violations(&self) -> Vec<FieldViolation> {
        (**self).violations()
    }
}
