//! Error types for the text-layer engine.
//!
//! This module defines all error types that can occur while reconstructing
//! and querying a page's text layer.

/// Result type alias for text-layer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during text-layer processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pipeline run was superseded by a newer run for the same page.
    ///
    /// This is an expected outcome, not a failure: rapid scale changes cancel
    /// the in-flight run and restart from the triggering event. Callers should
    /// check [`Error::is_cancelled`] and stay silent.
    #[error("Pipeline run cancelled: superseded by a newer run")]
    Cancelled,

    /// Fetching page content (glyph runs or raster) from the provider failed.
    #[error("Content fetch failed for page {page}: {reason}")]
    ContentFetch {
        /// Page number the fetch was issued for
        page: u32,
        /// Reason reported by the provider
        reason: String,
    },

    /// The viewport handed to the pipeline cannot produce usable geometry.
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// Optical character recognition failed for a page.
    ///
    /// The page remains usable as an image-only page; no retry is automatic.
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// A selection range referenced a layout box that does not exist.
    #[error("Selection references unknown box index {0}")]
    UnknownBox(usize),
}

impl Error {
    /// Whether this error is an expected cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_not_a_failure() {
        let err = Error::Cancelled;
        assert!(err.is_cancelled());
        assert!(!Error::Ocr("engine timeout".to_string()).is_cancelled());
    }

    #[test]
    fn test_content_fetch_error() {
        let err = Error::ContentFetch {
            page: 7,
            reason: "stream closed".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("page 7"));
        assert!(msg.contains("stream closed"));
    }

    #[test]
    fn test_ocr_error() {
        let err = Error::Ocr("recognizer crashed".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("OCR failed"));
        assert!(msg.contains("recognizer crashed"));
    }

    #[test]
    fn test_unknown_box_error() {
        let err = Error::UnknownBox(42);
        assert!(format!("{}", err).contains("42"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
