//! Entry form view-model.
//!
//! Mirrors the stored record, applies edits as whole-record replacements and
//! runs validation only when the user asks to view or download.

use serde::{Deserialize, Serialize};

use crate::form::flow::Flow;
use crate::form::validation::FieldErrors;
use crate::models::record::{Field, Record};

/// The two submit-like buttons on the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitAction {
    /// "View PDF". Pressing Enter in a field does the same.
    #[default]
    View,
    Download,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed on View.
    Navigate(Flow),
    /// Validation passed on Download; export this record.
    Export(Record),
    /// Validation failed; errors are on the form.
    Invalid,
}

/// One rendered input.
#[derive(Debug, Clone, Serialize)]
pub struct FormFieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub required: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    record: Record,
    errors: FieldErrors,
}

impl EntryForm {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            errors: FieldErrors::default(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Applies one edit and returns the full record the caller must persist.
    ///
    /// The edited field's error is cleared straight away; it is not
    /// re-validated until the next submit.
    pub fn input(&mut self, field: Field, value: impl Into<String>) -> &Record {
        self.record = self.record.with_field(field, value);
        self.errors.clear(field);
        &self.record
    }

    pub fn submit(&mut self, action: SubmitAction) -> SubmitOutcome {
        match Flow::Entry.advance(&self.record) {
            Ok(next) => {
                self.errors = FieldErrors::default();
                match action {
                    SubmitAction::View => SubmitOutcome::Navigate(next),
                    SubmitAction::Download => SubmitOutcome::Export(self.record.clone()),
                }
            }
            Err(errors) => {
                self.errors = errors;
                SubmitOutcome::Invalid
            }
        }
    }

    pub fn fields(&self) -> Vec<FormFieldView> {
        Field::ALL
            .into_iter()
            .map(|field| FormFieldView {
                key: field.key(),
                label: field.label(),
                input_type: input_type(field),
                placeholder: input_placeholder(field),
                value: self.record.get(field).to_string(),
                required: field.is_required(),
                error: self.errors.get(field).map(str::to_string),
            })
            .collect()
    }
}

fn input_type(field: Field) -> &'static str {
    match field {
        Field::Email => "email",
        Field::Phone => "tel",
        _ => "text",
    }
}

fn input_placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "e.g. John Doe",
        Field::Email => "e.g. Johndoe@gmail.com",
        Field::Phone => "e.g. (220) 222 -20002",
        Field::Position => "e.g. Junior Front end Developer",
        Field::Description => "e.g. Work experiences",
    }
}
