//! Configuration types for image-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::Img2PdfError;
use crate::progress::ConversionProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Configuration for an image-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use img2pdf::{ConversionConfig, PageSize};
///
/// let config = ConversionConfig::builder()
///     .scale(0.5)
///     .page_size(PageSize::Letter)
///     .title("Holiday photos")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Draw scale applied to each image's pixel dimensions. Default: 0.5.
    ///
    /// Images are placed at 1 px = 1 pt, so a 600 × 400 photo at the default
    /// scale covers 300 × 200 pt of the page. The half-size default matches
    /// the presentation convention this tool has always used; it is a knob,
    /// not a rule.
    pub scale: f32,

    /// Page size for every page in the document. Default: [`PageSize::A4`].
    ///
    /// `Fit` shrink-wraps each page to its scaled image, producing a document
    /// with no margins and per-page dimensions.
    pub page_size: PageSize,

    /// Flate-compress content and image streams on save. Default: true.
    ///
    /// JPEG pass-through streams already carry `DCTDecode` and are never
    /// touched. Disabling helps when inspecting the raw output by eye.
    pub compress: bool,

    /// Optional document title written to the PDF Info dictionary.
    pub title: Option<String>,

    /// Per-file progress events. Default: none.
    pub progress_callback: Option<Arc<dyn ConversionProgressCallback>>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            scale: 0.5,
            page_size: PageSize::default(),
            compress: true,
            title: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("scale", &self.scale)
            .field("page_size", &self.page_size)
            .field("compress", &self.compress)
            .field("title", &self.title)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn scale(mut self, scale: f32) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn compress(mut self, v: bool) -> Self {
        self.config.compress = v;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ConversionProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Img2PdfError> {
        let c = &self.config;
        if !c.scale.is_finite() || c.scale <= 0.0 {
            return Err(Img2PdfError::InvalidConfig(format!(
                "Scale must be a positive number, got {}",
                c.scale
            )));
        }
        if let PageSize::Custom(w, h) = c.page_size {
            if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
                return Err(Img2PdfError::InvalidConfig(format!(
                    "Custom page size must have positive dimensions, got {w}×{h}"
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Page dimensions, in PDF points (1 pt = 1/72 inch).
///
/// `A4` is the default, matching what most PDF toolkits hand out for an
/// argument-less "add page" call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// 595.28 × 841.89 pt (default).
    #[default]
    A4,
    /// US Letter, 612 × 792 pt.
    Letter,
    /// Per-page: exactly the scaled image, no margins.
    Fit,
    /// Fixed custom dimensions in points (width, height).
    Custom(f32, f32),
}

impl PageSize {
    /// Resolve the page dimensions for an image drawn at `img_w` × `img_h` pt.
    ///
    /// Fixed sizes ignore the image; `Fit` wraps it exactly.
    pub fn dimensions(&self, img_w: f32, img_h: f32) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Fit => (img_w, img_h),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_half_scale_a4() {
        let c = ConversionConfig::default();
        assert_eq!(c.scale, 0.5);
        assert_eq!(c.page_size, PageSize::A4);
        assert!(c.compress);
    }

    #[test]
    fn builder_rejects_non_positive_scale() {
        assert!(ConversionConfig::builder().scale(0.0).build().is_err());
        assert!(ConversionConfig::builder().scale(-1.0).build().is_err());
        assert!(ConversionConfig::builder().scale(f32::NAN).build().is_err());
    }

    #[test]
    fn builder_rejects_degenerate_custom_page() {
        let r = ConversionConfig::builder()
            .page_size(PageSize::Custom(0.0, 100.0))
            .build();
        assert!(r.is_err());
    }

    #[test]
    fn fit_page_wraps_the_image() {
        assert_eq!(PageSize::Fit.dimensions(50.0, 80.0), (50.0, 80.0));
        // fixed sizes ignore the image
        assert_eq!(PageSize::A4.dimensions(50.0, 80.0), (595.28, 841.89));
        assert_eq!(PageSize::Letter.dimensions(9999.0, 9999.0), (612.0, 792.0));
    }

    #[test]
    fn debug_does_not_require_callback_debug() {
        let c = ConversionConfig::builder()
            .title("x")
            .build()
            .expect("valid config");
        let s = format!("{c:?}");
        assert!(s.contains("scale"));
    }
}
