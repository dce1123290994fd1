//! Error types for the img2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Img2PdfError`] — **Fatal**: the conversion cannot proceed at all
//!   (input file missing, invalid configuration, the document itself could
//!   not be serialized). Returned as `Err(Img2PdfError)` from the top-level
//!   `convert*` functions.
//!
//! * [`EmbedError`] — **Non-fatal**: a single image failed (unsupported
//!   declared type, broken image data) but every other file is fine. Stored
//!   inside [`crate::output::FileResult`] so callers can inspect partial
//!   success rather than losing the whole document to one bad file.
//!
//! The separation lets callers decide their own tolerance: abort on the
//! first bad file, log and continue, or collect all errors for a post-run
//! report.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the img2pdf library.
///
/// File-level failures use [`EmbedError`] and are stored in
/// [`crate::output::FileResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Img2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Image file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Document errors ───────────────────────────────────────────────────
    /// The assembled document could not be serialized to bytes.
    #[error("Failed to serialize PDF document: {detail}")]
    PdfWriteFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Single-file operations ────────────────────────────────────────────
    /// A one-file operation (e.g. `inspect`) hit what would be a per-file
    /// error in a batch run; with a single subject it is the whole failure.
    #[error(transparent)]
    Embed(#[from] EmbedError),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single input file.
///
/// Stored alongside [`crate::output::FileResult`] when an image cannot be
/// embedded. The overall conversion continues with the remaining files, so
/// the document that comes out simply has no page for this one.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum EmbedError {
    /// The declared content type is neither PNG nor JPEG.
    #[error("Failed to process file {name}: unsupported file type: {content_type}")]
    UnsupportedType { name: String, content_type: String },

    /// The file data could not be decoded as its declared type.
    #[error("Failed to process file {name}: {detail}")]
    DecodeFailed { name: String, detail: String },
}

impl EmbedError {
    /// The display name of the file this error refers to.
    pub fn file_name(&self) -> &str {
        match self {
            EmbedError::UnsupportedType { name, .. } => name,
            EmbedError::DecodeFailed { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_names_the_file() {
        let e = EmbedError::UnsupportedType {
            name: "notes.txt".into(),
            content_type: "image/gif".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"), "got: {msg}");
        assert!(msg.contains("image/gif"), "got: {msg}");
    }

    #[test]
    fn decode_failed_names_the_file() {
        let e = EmbedError::DecodeFailed {
            name: "broken.png".into(),
            detail: "unexpected end of data".into(),
        };
        assert!(e.to_string().contains("broken.png"));
        assert!(e.to_string().contains("unexpected end of data"));
    }

    #[test]
    fn file_not_found_display() {
        let e = Img2PdfError::FileNotFound {
            path: PathBuf::from("/no/such/photo.png"),
        };
        assert!(e.to_string().contains("/no/such/photo.png"));
    }

    #[test]
    fn output_write_failed_keeps_source() {
        use std::error::Error as _;
        let e = Img2PdfError::OutputWriteFailed {
            path: PathBuf::from("out/images.pdf"),
            source: std::io::Error::other("disk full"),
        };
        assert!(e.to_string().contains("out/images.pdf"));
        assert!(e.source().is_some());
    }
}
