// Document Exporter: Record -> one-page PDF.
// Layout is pure and testable on its own; pdf turns it into bytes.
// Rendering is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod error;
pub mod font_metrics;
pub mod layout;
pub mod pdf;

use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info};

use crate::models::record::Record;

pub use error::{ExportError, EXPORT_FAILED_MESSAGE};
pub use layout::{layout_document, PageGeometry, TITLE};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// A finished PDF, fully buffered and ready to hand to the user.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `resume_{name}_{YYYY-MM-DD}.pdf`, where `{name}` is the name with each
/// whitespace run replaced by `_` and lowercased, or `details` when empty.
pub fn export_filename(record: &Record, generated_on: NaiveDate) -> String {
    let stem = if record.name.is_empty() {
        "details".to_string()
    } else {
        WHITESPACE_RUN
            .replace_all(&record.name, "_")
            .to_lowercase()
    };
    format!("resume_{stem}_{}.pdf", generated_on.format("%Y-%m-%d"))
}

/// Builds the document for `record`.
pub fn export(record: &Record, generated_on: NaiveDate) -> Result<ExportedDocument, ExportError> {
    let layout = layout_document(record, generated_on, PageGeometry::A4);
    debug!(
        ops = layout.ops.len(),
        cursor = layout.cursor,
        "Laid out document"
    );
    let bytes = pdf::render_pdf(&layout, TITLE)?;
    Ok(ExportedDocument {
        filename: export_filename(record, generated_on),
        bytes,
    })
}

/// Turns a record into a finished document. Handlers reach the exporter
/// through `AppState`, so a failing one can stand in during tests.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(
        &self,
        record: Record,
        generated_on: NaiveDate,
    ) -> Result<ExportedDocument, ExportError>;
}

/// The one-page PDF exporter.
pub struct PdfExporter;

#[async_trait]
impl Exporter for PdfExporter {
    async fn export(
        &self,
        record: Record,
        generated_on: NaiveDate,
    ) -> Result<ExportedDocument, ExportError> {
        export_blocking(record, generated_on).await
    }
}

/// Runs [`export`] off the async executor and logs the outcome.
pub async fn export_blocking(
    record: Record,
    generated_on: NaiveDate,
) -> Result<ExportedDocument, ExportError> {
    let result = tokio::task::spawn_blocking(move || export(&record, generated_on))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))
        .and_then(|r| r);

    match &result {
        Ok(doc) => info!(
            filename = %doc.filename,
            bytes = doc.bytes.len(),
            "Generated PDF"
        ),
        Err(e) => error!("Error generating PDF: {e}"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_filename_from_name() {
        let record = Record {
            name: "John Doe".to_string(),
            ..Record::default()
        };
        assert_eq!(
            export_filename(&record, date()),
            "resume_john_doe_2026-10-18.pdf"
        );
    }

    #[test]
    fn test_filename_without_name_uses_details() {
        assert_eq!(
            export_filename(&Record::default(), date()),
            "resume_details_2026-10-18.pdf"
        );
    }

    #[test]
    fn test_filename_collapses_whitespace_runs() {
        let record = Record {
            name: "Mary  Ann\tLee".to_string(),
            ..Record::default()
        };
        assert_eq!(
            export_filename(&record, date()),
            "resume_mary_ann_lee_2026-10-18.pdf"
        );
    }

    #[test]
    fn test_export_produces_pdf_named_after_record() {
        let record = Record {
            name: "John Doe".to_string(),
            email: "john@x.com".to_string(),
            phone: "1234567890".to_string(),
            position: "Dev".to_string(),
            description: "Built things".to_string(),
        };
        let doc = export(&record, date()).unwrap();
        assert_eq!(doc.filename, "resume_john_doe_2026-10-18.pdf");
        assert!(doc.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_pdf_exporter_runs_blocking_export() {
        let exporter: &dyn Exporter = &PdfExporter;
        let doc = exporter.export(Record::default(), date()).await.unwrap();
        assert_eq!(doc.filename, "resume_details_2026-10-18.pdf");
        assert!(doc.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_blocking_matches_sync_export() {
        let record = Record {
            name: "Ann Lee".to_string(),
            ..Record::default()
        };
        let doc = export_blocking(record, date()).await.unwrap();
        assert_eq!(doc.filename, "resume_ann_lee_2026-10-18.pdf");
        assert!(!doc.bytes.is_empty());
    }
}
