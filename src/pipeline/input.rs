//! Input resolution: turn user-supplied paths into in-memory selections.
//!
//! ## Why read everything up front?
//!
//! Selection and conversion are separate steps: the user picks files, then
//! the conversion runs over whatever was picked. Reading each file at
//! selection time means a missing or unreadable path fails the run before
//! any page exists, while a file whose *content* is bad still fails softly
//! inside the per-file loop. The declared content type travels with the
//! bytes, exactly like a browser's `File.type`, and the embed stage
//! dispatches on the declaration, not on sniffed magic bytes.

use crate::error::Img2PdfError;
use std::path::Path;
use tracing::debug;

/// A user-selected input: a display name, a declared content type, and the
/// raw bytes.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// Display name, used in error messages and progress events.
    pub name: String,
    /// Declared MIME type; drives the embed dispatch.
    pub content_type: String,
    /// The file's bytes.
    pub data: Vec<u8>,
}

impl SelectedImage {
    /// Build a selection from in-memory bytes with an explicit declared type.
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a selection from disk, declaring the content type from the
    /// file extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Img2PdfError> {
        let path = path.as_ref();
        let data = read_file(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = content_type_for_path(path);
        debug!("Selected {} ({}, {} bytes)", name, content_type, data.len());
        Ok(Self {
            name,
            content_type,
            data,
        })
    }
}

/// Resolve an ordered list of paths into selections, preserving order.
///
/// Any unreadable path is fatal: resolution happens before the per-file
/// conversion loop, so there is no partial result to salvage yet.
pub async fn resolve_files(
    paths: &[impl AsRef<Path>],
) -> Result<Vec<SelectedImage>, Img2PdfError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(SelectedImage::from_path(path).await?);
    }
    Ok(files)
}

/// Declared MIME type for a path, from its extension.
///
/// The mapping is deliberately naive, the same way a browser file input
/// declares a type without looking at the bytes. A `.gif` therefore
/// *declares* `image/gif` and is rejected later by the embed dispatch,
/// per-file, by name.
pub fn content_type_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}

async fn read_file(path: &Path) -> Result<Vec<u8>, Img2PdfError> {
    match tokio::fs::read(path).await {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(Img2PdfError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(_) => Err(Img2PdfError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_mapping_is_case_insensitive() {
        assert_eq!(content_type_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for_path(Path::new("b.JpEg")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("c.jpg")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("d.gif")), "image/gif");
        assert_eq!(content_type_for_path(Path::new("e.txt")), "text/plain");
        assert_eq!(
            content_type_for_path(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn missing_file_is_fatal() {
        let err = SelectedImage::from_path("/definitely/not/here.png")
            .await
            .expect_err("must fail");
        assert!(matches!(err, Img2PdfError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_declares_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pixel.png");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(b"not really a png").expect("write");

        let sel = SelectedImage::from_path(&path).await.expect("resolves");
        assert_eq!(sel.name, "pixel.png");
        assert_eq!(sel.content_type, "image/png");
        assert_eq!(sel.data, b"not really a png");
    }

    #[tokio::test]
    async fn resolve_files_preserves_selection_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let names = ["z.png", "a.jpg", "m.png"];
        for n in names {
            std::fs::write(dir.path().join(n), b"data").expect("write");
        }
        let paths: Vec<_> = names.iter().map(|n| dir.path().join(n)).collect();

        let files = resolve_files(&paths).await.expect("resolves");
        let got: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(got, names);
    }
}
