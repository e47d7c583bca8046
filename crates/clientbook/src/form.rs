//! Form state tracking.
//!
//! [`FormState`] holds the pending values of the four client fields and
//! decides whether the submit control is enabled. Validation happens when a
//! field loses focus (a "blur"); readiness only checks that every value is
//! present.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::client::{ClientRecord, Field, NewClient};
use crate::validate::{is_blank, validate_field};

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The value was empty or whitespace only.
    Empty,
    /// The value did not match the field's format.
    Format,
}

impl FieldError {
    /// User-facing message for this error on the given field.
    #[must_use]
    pub fn message(self, field: Field) -> String {
        match (self, field) {
            (Self::Empty, field) => format!("The {field} field cannot be empty"),
            (Self::Format, Field::CompanyCode) => {
                "The company code is not valid, it must have 6 digits".to_string()
            }
            (Self::Format, field) => format!("The {field} field does not have a valid format"),
        }
    }
}

/// Enabled state of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    /// Whether the control accepts clicks.
    pub enabled: bool,
    /// Whether the control is drawn with the "disabled" style.
    pub dimmed: bool,
}

impl SubmitControl {
    fn for_readiness(ready: bool) -> Self {
        Self {
            enabled: ready,
            dimmed: !ready,
        }
    }
}

/// Result of handling a blur event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurOutcome {
    /// The field that lost focus.
    pub field: Field,
    /// The error recorded for the field, if any.
    pub error: Option<FieldError>,
    /// Submit control state after the event.
    pub submit: SubmitControl,
    /// Whether readiness flipped because of this event.
    pub readiness_changed: bool,
}

/// In-progress values of a client form.
#[derive(Debug, Clone)]
pub struct FormState {
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, FieldError>,
    ready: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Field::ALL.into_iter().map(|f| (f, String::new())).collect(),
            errors: BTreeMap::new(),
            ready: false,
        }
    }

    /// Handle a field losing focus with the given raw value.
    ///
    /// A blank value is stored as-is and flagged as missing. A value that
    /// fails its format check is flagged but **not** stored, so the previous
    /// value stays in effect. A valid value clears the field's error.
    pub fn on_field_blur(&mut self, field: Field, raw: &str) -> BlurOutcome {
        let error = if is_blank(raw) {
            self.values.insert(field, raw.to_string());
            Some(FieldError::Empty)
        } else if validate_field(field, raw) {
            self.values.insert(field, raw.to_string());
            None
        } else {
            Some(FieldError::Format)
        };

        match error {
            Some(error) => {
                debug!(field = field.id(), ?error, "field rejected");
                self.errors.insert(field, error);
            }
            None => {
                trace!(field = field.id(), "field accepted");
                self.errors.remove(&field);
            }
        }

        let readiness_changed = self.recompute();
        BlurOutcome {
            field,
            error,
            submit: self.submit_control(),
            readiness_changed,
        }
    }

    /// Whether all four values are present.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current submit control state.
    #[must_use]
    pub fn submit_control(&self) -> SubmitControl {
        SubmitControl::for_readiness(self.ready)
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Error currently recorded for a field.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Whether any field has an outstanding error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fields with an outstanding error, in form order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    /// Clear every value and error.
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        self.errors.clear();
        self.recompute();
    }

    /// Load the values of an existing record without validating them.
    ///
    /// Used when the edit form opens: pre-filled values count towards
    /// readiness even if they are never blurred.
    pub fn prefill(&mut self, record: &ClientRecord) {
        for field in Field::ALL {
            self.values.insert(field, record.get(field).to_string());
        }
        self.errors.clear();
        self.recompute();
    }

    /// Snapshot of the values as an unsaved client.
    #[must_use]
    pub fn to_new_client(&self) -> NewClient {
        NewClient::new(
            self.value(Field::Name),
            self.value(Field::Email),
            self.value(Field::Phone),
            self.value(Field::CompanyCode),
        )
    }

    /// Snapshot of the values as a record with the given id.
    #[must_use]
    pub fn to_record(&self, id: i64) -> ClientRecord {
        self.to_new_client().with_id(id)
    }

    fn recompute(&mut self) -> bool {
        let ready = self.values.values().all(|value| !value.is_empty());
        let changed = ready != self.ready;
        self.ready = ready;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        let mut form = FormState::new();
        form.on_field_blur(Field::Name, "Ana Lopez");
        form.on_field_blur(Field::Email, "ana@example.com");
        form.on_field_blur(Field::Phone, "612 345 678");
        form.on_field_blur(Field::CompanyCode, "123456");
        form
    }

    #[test]
    fn test_new_form_is_not_ready() {
        let form = FormState::new();
        assert!(!form.is_ready());
        assert_eq!(
            form.submit_control(),
            SubmitControl {
                enabled: false,
                dimmed: true
            }
        );
    }

    #[test]
    fn test_all_valid_fields_make_form_ready() {
        let form = filled();
        assert!(form.is_ready());
        assert!(!form.has_errors());
        assert!(form.submit_control().enabled);
    }

    #[test]
    fn test_ready_flips_on_last_field() {
        let mut form = FormState::new();
        form.on_field_blur(Field::Name, "Ana");
        form.on_field_blur(Field::Email, "ana@example.com");
        form.on_field_blur(Field::Phone, "612345678");
        let outcome = form.on_field_blur(Field::CompanyCode, "123456");
        assert!(outcome.readiness_changed);
        assert!(outcome.submit.enabled);
        assert!(!outcome.submit.dimmed);
    }

    #[test]
    fn test_empty_blur_stores_value_and_blocks_submit() {
        let mut form = filled();
        let outcome = form.on_field_blur(Field::Email, "");

        assert_eq!(outcome.error, Some(FieldError::Empty));
        assert!(outcome.readiness_changed);
        assert!(!form.is_ready());
        assert_eq!(form.value(Field::Email), "");
        assert_eq!(form.error(Field::Email), Some(FieldError::Empty));
    }

    #[test]
    fn test_whitespace_blur_is_stored_but_flagged() {
        let mut form = filled();
        let outcome = form.on_field_blur(Field::Email, "   ");

        assert_eq!(outcome.error, Some(FieldError::Empty));
        // Readiness only looks at emptiness; the error is what holds submit back.
        assert!(form.is_ready());
        assert_eq!(form.value(Field::Email), "   ");
        assert_eq!(form.invalid_fields(), vec![Field::Email]);
    }

    #[test]
    fn test_refilling_cleared_field_restores_readiness() {
        let mut form = filled();
        form.on_field_blur(Field::Phone, "");
        assert!(!form.is_ready());

        let outcome = form.on_field_blur(Field::Phone, "+34 712-345 678");
        assert_eq!(outcome.error, None);
        assert!(form.is_ready());
        assert_eq!(form.error(Field::Phone), None);
    }

    #[test]
    fn test_invalid_value_is_not_stored() {
        let mut form = filled();
        let outcome = form.on_field_blur(Field::CompanyCode, "12345");

        assert_eq!(outcome.error, Some(FieldError::Format));
        assert!(!outcome.readiness_changed);
        assert_eq!(form.value(Field::CompanyCode), "123456");
        // The previous valid value keeps the form ready.
        assert!(form.is_ready());
        assert!(form.has_errors());
    }

    #[test]
    fn test_invalid_first_value_leaves_field_empty() {
        let mut form = FormState::new();
        form.on_field_blur(Field::Name, "R2D2");
        assert_eq!(form.value(Field::Name), "");
        assert_eq!(form.error(Field::Name), Some(FieldError::Format));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = filled();
        form.on_field_blur(Field::Name, "123");
        form.reset();

        assert!(!form.is_ready());
        assert!(!form.has_errors());
        for field in Field::ALL {
            assert_eq!(form.value(field), "");
        }
    }

    #[test]
    fn test_prefill_counts_as_ready() {
        let mut form = FormState::new();
        let record = NewClient::new("Ana", "ana@example.com", "612345678", "123456").with_id(9);
        form.prefill(&record);

        assert!(form.is_ready());
        assert_eq!(form.to_record(9), record);
    }

    #[test]
    fn test_to_new_client_snapshot() {
        let form = filled();
        let client = form.to_new_client();
        assert_eq!(client.name, "Ana Lopez");
        assert_eq!(client.phone, "612 345 678");
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(
            FieldError::Empty.message(Field::Email),
            "The email field cannot be empty"
        );
        assert!(FieldError::Format
            .message(Field::CompanyCode)
            .contains("6 digits"));
        assert!(FieldError::Format
            .message(Field::Phone)
            .contains("phone"));
    }
}
