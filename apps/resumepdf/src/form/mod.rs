// Entry form and preview view-models.
// Pure logic only: HTTP wiring lives in routes::pages, markup in views.

pub mod entry;
pub mod flow;
pub mod preview;
pub mod validation;

pub use entry::{EntryForm, SubmitAction, SubmitOutcome};
pub use flow::Flow;
pub use preview::{preview_rows, PreviewRow};
pub use validation::{validate_record, FieldErrors};
