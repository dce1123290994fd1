//! Output types: per-file results, run statistics, and the assembled document.

use crate::error::EmbedError;
use serde::{Deserialize, Serialize};

/// Outcome for one input file.
///
/// Exactly one of `page` / `error` is set: a file either occupies a page in
/// the output document or failed with a recorded reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// Display name of the input file.
    pub name: String,

    /// Declared content type the dispatch ran on (e.g. `image/png`).
    pub content_type: String,

    /// 1-indexed page the image landed on, if it was embedded.
    pub page: Option<usize>,

    /// Native pixel width, known once the file header was read.
    pub width: Option<u32>,

    /// Native pixel height, known once the file header was read.
    pub height: Option<u32>,

    /// Why this file produced no page, if it didn't.
    pub error: Option<EmbedError>,
}

impl FileResult {
    /// True when the file occupies a page in the output.
    pub fn is_embedded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate statistics for one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Files the caller selected.
    pub total_files: usize,
    /// Files that became pages.
    pub embedded_files: usize,
    /// Files that failed with a per-file error.
    pub failed_files: usize,
    /// Pages in the output document (== `embedded_files`).
    pub page_count: usize,
    /// Size of the serialized document in bytes.
    pub pdf_bytes: usize,
    /// Wall-clock time spent decoding and embedding images.
    pub embed_duration_ms: u64,
    /// Wall-clock time spent assembling and serializing the document.
    pub assemble_duration_ms: u64,
    /// Total wall-clock time for the run.
    pub total_duration_ms: u64,
}

/// Result of a conversion run: the document plus per-file accounting.
///
/// Returned by [`crate::convert`] even when some files failed — check
/// [`ConversionOutput::is_partial`] or walk [`ConversionOutput::errors`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The serialized PDF document. Not included in JSON output; callers
    /// wanting the bytes hold the struct itself.
    #[serde(skip)]
    pub pdf: Vec<u8>,

    /// One entry per input file, in selection order.
    pub files: Vec<FileResult>,

    /// Run statistics.
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Number of pages in the output document.
    pub fn page_count(&self) -> usize {
        self.stats.page_count
    }

    /// The per-file errors of this run, in selection order.
    pub fn errors(&self) -> impl Iterator<Item = &EmbedError> {
        self.files.iter().filter_map(|f| f.error.as_ref())
    }

    /// True when at least one file failed while others succeeded or the
    /// run was otherwise non-empty.
    pub fn is_partial(&self) -> bool {
        self.stats.failed_files > 0
    }
}

/// Header-level facts about a single image, as reported by
/// [`crate::convert::inspect`]. No pixel data is decoded to produce this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Display name of the file.
    pub name: String,
    /// Declared content type (from the file extension).
    pub content_type: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Bits per sample (8 for baseline JPEG and most PNGs).
    pub bit_depth: u8,
    /// Colour channels in the source (1 = grayscale, 3 = RGB, 4 = RGBA/CMYK).
    pub channels: u8,
}
