//! Conversion entry points.
//!
//! The controller is a single linear pass: files are embedded one at a time,
//! in selection order, and a failed file is recorded and skipped while the
//! rest of the run continues. Only input resolution, document serialization,
//! and output writing can fail the run as a whole — the two-tier error model
//! described in [`crate::error`].

use crate::config::ConversionConfig;
use crate::error::{EmbedError, Img2PdfError};
use crate::output::{ConversionOutput, ConversionStats, FileResult, ImageInfo};
use crate::pipeline::{assemble, embed, input, probe};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

pub use crate::pipeline::input::SelectedImage;

/// Convert a sequence of selected images into a PDF document.
///
/// This is the primary entry point for the library. Files are processed
/// strictly in order; each success becomes one page, each failure becomes a
/// [`FileResult`] carrying an [`EmbedError`]
/// that names the file.
///
/// # Returns
/// `Ok(ConversionOutput)` whenever a document could be produced — including
/// a zero-page document for an empty selection, and a partial document when
/// some files failed (check `output.stats.failed_files`).
///
/// # Errors
/// Returns `Err(Img2PdfError)` only for fatal errors: the document could
/// not be assembled or serialized at all.
pub async fn convert(
    files: Vec<SelectedImage>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Img2PdfError> {
    let total_start = Instant::now();
    let total_files = files.len();
    info!("Starting conversion of {} files", total_files);

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_files);
    }

    // ── Step 1: Embed each file on its own page ──────────────────────────
    let embed_start = Instant::now();
    let mut images = Vec::with_capacity(total_files);
    let mut results: Vec<FileResult> = Vec::with_capacity(total_files);
    let mut page = 0usize;

    for (index, file) in files.into_iter().enumerate() {
        let file_num = index + 1;
        let name = file.name.clone();
        let content_type = file.content_type.clone();

        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(file_num, total_files, &name);
        }

        // Decoding is CPU-bound; keep it off the async worker threads.
        let embedded = tokio::task::spawn_blocking(move || embed::embed_image(&file))
            .await
            .map_err(|e| Img2PdfError::Internal(format!("Embed task panicked: {e}")))?;

        match embedded {
            Ok(image) => {
                page += 1;
                debug!("{}: page {} ({}x{} px)", name, page, image.width, image.height);
                results.push(FileResult {
                    name: name.clone(),
                    content_type,
                    page: Some(page),
                    width: Some(image.width),
                    height: Some(image.height),
                    error: None,
                });
                images.push(image);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_complete(file_num, total_files, &name);
                }
            }
            Err(err) => {
                warn!("{}", err);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_error(file_num, total_files, &name, err.to_string());
                }
                results.push(FileResult {
                    name,
                    content_type,
                    page: None,
                    width: None,
                    height: None,
                    error: Some(err),
                });
            }
        }
    }
    let embed_duration_ms = embed_start.elapsed().as_millis() as u64;

    // ── Step 2: Assemble and serialize the document ──────────────────────
    let assemble_start = Instant::now();
    let assemble_config = config.clone();
    let pdf = tokio::task::spawn_blocking(move || assemble::assemble(&images, &assemble_config))
        .await
        .map_err(|e| Img2PdfError::Internal(format!("Assemble task panicked: {e}")))??;
    let assemble_duration_ms = assemble_start.elapsed().as_millis() as u64;

    // ── Step 3: Compute stats ────────────────────────────────────────────
    let embedded_files = results.iter().filter(|r| r.error.is_none()).count();
    let failed_files = results.len() - embedded_files;

    let stats = ConversionStats {
        total_files,
        embedded_files,
        failed_files,
        page_count: embedded_files,
        pdf_bytes: pdf.len(),
        embed_duration_ms,
        assemble_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} files embedded, {} bytes, {}ms total",
        embedded_files, total_files, stats.pdf_bytes, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total_files, embedded_files);
    }

    Ok(ConversionOutput {
        pdf,
        files: results,
        stats,
    })
}

/// Convert image files on disk into a PDF document.
///
/// Resolves every path first (a missing or unreadable file is fatal — the
/// selection itself is broken), then runs [`convert`].
pub async fn convert_paths(
    paths: &[impl AsRef<Path>],
    config: &ConversionConfig,
) -> Result<ConversionOutput, Img2PdfError> {
    let files = input::resolve_files(paths).await?;
    convert(files, config).await
}

/// Convert image files and write the document directly to `output_path`.
///
/// Uses atomic write (temp file + rename) so a crashed or failed run never
/// leaves a partial file where the output should be.
pub async fn convert_to_file(
    paths: &[impl AsRef<Path>],
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Img2PdfError> {
    let output = convert_paths(paths, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Img2PdfError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("pdf.tmp");
    tokio::fs::write(&tmp_path, &output.pdf)
        .await
        .map_err(|e| Img2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Img2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!("Wrote {} bytes to {}", output.pdf.len(), path.display());
    Ok(output)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    files: Vec<SelectedImage>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Img2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Img2PdfError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(files, config))
}

/// Report header-level facts about a single image without building a
/// document. No pixel data is decoded.
pub async fn inspect(path: impl AsRef<Path>) -> Result<ImageInfo, Img2PdfError> {
    let file = SelectedImage::from_path(path).await?;

    let header = match file.content_type.as_str() {
        "image/png" => probe::png_header(&file.data).map_err(|e| EmbedError::DecodeFailed {
            name: file.name.clone(),
            detail: e.to_string(),
        })?,
        "image/jpeg" => probe::jpeg_header(&file.data).map_err(|e| EmbedError::DecodeFailed {
            name: file.name.clone(),
            detail: e.to_string(),
        })?,
        other => {
            return Err(EmbedError::UnsupportedType {
                name: file.name,
                content_type: other.to_string(),
            }
            .into())
        }
    };

    Ok(ImageInfo {
        name: file.name,
        content_type: file.content_type,
        width: header.width,
        height: header.height,
        bit_depth: header.bit_depth,
        channels: header.channels,
    })
}
