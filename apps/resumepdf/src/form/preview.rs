//! Preview rows. Empty fields show an example value so the preview never has
//! blank rows; these examples are display-only and never reach the export.

use serde::Serialize;

use crate::models::record::{Field, Record};

pub const DESCRIPTION_EXAMPLE: &str = "Frontend Developer with 3 years of experience in creating \
responsive and user-friendly web interfaces using HTML, CSS, and JavaScript. Skilled in modern \
frameworks like React and committed to delivering clean, efficient code.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub label: &'static str,
    pub value: String,
    /// True when `value` is the example text rather than user input.
    pub is_placeholder: bool,
}

pub fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "John Doe",
        Field::Email => "Johndoe@gmail.com",
        Field::Phone => "+222 223 2221",
        Field::Position => "Junior Frontend Developer",
        Field::Description => DESCRIPTION_EXAMPLE,
    }
}

pub fn preview_rows(record: &Record) -> Vec<PreviewRow> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let value = record.get(field);
            if value.is_empty() {
                PreviewRow {
                    label: field.label(),
                    value: placeholder(field).to_string(),
                    is_placeholder: true,
                }
            } else {
                PreviewRow {
                    label: field.label(),
                    value: value.to_string(),
                    is_placeholder: false,
                }
            }
        })
        .collect()
}
