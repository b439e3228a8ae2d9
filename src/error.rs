//! Error types for the tripdoc library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`TripDocError`] — **Fatal**: the document cannot be produced at all
//!   (empty destination, unwritable output path, provider not configured).
//!   Returned as `Err(TripDocError)` from the top-level `render*` and
//!   `generate*` functions.
//!
//! * [`RecordIssue`] — **Non-fatal**: part of a hotel or restaurant section
//!   did not fit the fixed record shape and was left out, but the rest of the
//!   document is fine. Stored inside [`crate::output::RenderedDocument`] so
//!   callers can see exactly what was dropped.

use crate::pipeline::records::RecordKind;
use crate::plan::PlanSection;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the tripdoc library.
///
/// Record-level problems use [`RecordIssue`] and are stored in
/// [`crate::output::RenderedDocument`] rather than propagated here.
#[derive(Debug, Error)]
pub enum TripDocError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The plan has no destination to print under the title.
    #[error("Destination must not be empty")]
    EmptyDestination,

    /// The generation request failed validation (missing form fields etc.).
    #[error("Invalid plan request: {0}")]
    InvalidRequest(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The LLM API returned an error for one of the plan sections.
    #[error("LLM API error while generating {section}: {message}")]
    LlmApiError {
        section: PlanSection,
        message: String,
    },

    /// The model answered with nothing usable.
    #[error("The model returned an empty {section}")]
    EmptyGeneration { section: PlanSection },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal problem found while laying out a record section.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum RecordIssue {
    /// Trailing lines that do not fill a whole record were dropped.
    #[error(
        "{kind} section: dropped {leftover} trailing line(s) that do not form a complete \
         {stride}-line record (starting with {first_line:?})"
    )]
    PartialGroup {
        kind: RecordKind,
        stride: usize,
        leftover: usize,
        first_line: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_write_failed_display() {
        let e = TripDocError::OutputWriteFailed {
            path: PathBuf::from("/nope/Travel_Plan.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = e.to_string();
        assert!(msg.contains("Travel_Plan.pdf"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }

    #[test]
    fn llm_error_names_section() {
        let e = TripDocError::LlmApiError {
            section: PlanSection::Hotels,
            message: "429".into(),
        };
        assert!(e.to_string().contains("hotel recommendations"));
    }

    #[test]
    fn partial_group_display() {
        let issue = RecordIssue::PartialGroup {
            kind: RecordKind::Restaurant,
            stride: 4,
            leftover: 2,
            first_line: "Chez Nous".into(),
        };
        let msg = issue.to_string();
        assert!(msg.contains("dropped 2"), "got: {msg}");
        assert!(msg.contains("4-line"), "got: {msg}");
        assert!(msg.contains("Chez Nous"), "got: {msg}");
    }
}
