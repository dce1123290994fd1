//! # img2pdf
//!
//! Bundle PNG and JPEG images into a PDF document, one page per image.
//!
//! ## Why this crate?
//!
//! "Put these pictures in a PDF" is a chore that keeps getting solved with
//! office suites or lossy online converters. This crate does exactly the one
//! thing: each selected image becomes its own page, drawn at a configurable
//! scale (half its pixel dimensions by default) and centered. JPEG data is
//! passed through untouched — no generation loss — and PNG alpha survives as
//! a proper soft mask.
//!
//! ## Pipeline Overview
//!
//! ```text
//! images
//!  │
//!  ├─ 1. Input    read selected files, declare content types
//!  ├─ 2. Probe    header-only dimensions (PNG IHDR / JPEG SOF)
//!  ├─ 3. Embed    PNG decode or JPEG pass-through → image XObjects
//!  ├─ 4. Layout   scale + center each image on its page
//!  └─ 5. Assemble lopdf object tree → serialized document
//! ```
//!
//! Files are processed one at a time, in selection order. A file that cannot
//! be embedded is recorded and skipped; the remaining files still get their
//! pages. Only a document that cannot be serialized at all fails the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use img2pdf::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert_to_file(
//!         &["front.png", "back.jpg"],
//!         "images.pdf",
//!         &config,
//!     )
//!     .await?;
//!     eprintln!(
//!         "{} pages, {} bytes",
//!         output.stats.page_count, output.stats.pdf_bytes
//!     );
//!     for err in output.errors() {
//!         eprintln!("skipped: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `img2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! img2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageSize};
pub use convert::{convert, convert_paths, convert_sync, convert_to_file, inspect, SelectedImage};
pub use error::{EmbedError, Img2PdfError};
pub use output::{ConversionOutput, ConversionStats, FileResult, ImageInfo};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
