use thiserror::Error;

/// Shown to the user whenever an export fails, whatever the cause.
pub const EXPORT_FAILED_MESSAGE: &str = "Error generating PDF. Please try again.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to write document: {0}")]
    Write(#[from] std::io::Error),

    #[error("export task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_library_errors_keep_their_source() {
        let err = ExportError::from(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "disk full",
        ));
        assert_eq!(err.to_string(), "failed to write document: disk full");
        assert!(err.source().is_some());

        let err = ExportError::from(lopdf::Error::ObjectNotFound);
        assert!(matches!(err, ExportError::Pdf(_)));
        assert!(err.source().is_some());
    }
}
