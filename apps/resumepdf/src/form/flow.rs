//! Two-state page flow: `Entry` until the record validates, then `Preview`.

use serde::{Deserialize, Serialize};

use crate::form::validation::{validate_record, FieldErrors};
use crate::models::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    #[default]
    Entry,
    Preview,
}

impl Flow {
    /// Moves to `Preview` only when `record` passes validation.
    /// On failure the flow stays where it was and the errors are returned.
    pub fn advance(self, record: &Record) -> Result<Flow, FieldErrors> {
        let errors = validate_record(record);
        if errors.is_empty() {
            Ok(Flow::Preview)
        } else {
            Err(errors)
        }
    }

    /// Preview's back action.
    pub fn back(self) -> Flow {
        Flow::Entry
    }

    pub fn path(self) -> &'static str {
        match self {
            Flow::Entry => "/",
            Flow::Preview => "/preview",
        }
    }
}
