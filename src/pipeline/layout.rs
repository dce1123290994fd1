//! Page geometry: where an image lands on its page.
//!
//! Placement is pure arithmetic. Images are drawn at 1 px = 1 pt, scaled by
//! the configured factor and centered on the page:
//! `x = (page_w − img_w) / 2`, `y = (page_h − img_h) / 2`. An image larger
//! than its page simply overflows the MediaBox: no clamping, no fitting.
//! Callers who want a tight page use [`PageSize::Fit`].

use crate::config::PageSize;

/// A resolved placement: page dimensions plus the image rectangle, all in
/// PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page_width: f32,
    pub page_height: f32,
    /// Drawn image width.
    pub width: f32,
    /// Drawn image height.
    pub height: f32,
    /// Left edge of the image.
    pub x: f32,
    /// Bottom edge of the image (PDF origin is bottom-left).
    pub y: f32,
}

/// Compute the page and image rectangle for one image.
pub fn place(px_width: u32, px_height: u32, scale: f32, page_size: PageSize) -> Placement {
    let width = px_width as f32 * scale;
    let height = px_height as f32 * scale;
    let (page_width, page_height) = page_size.dimensions(width, height);

    Placement {
        page_width,
        page_height,
        width,
        height,
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
    }
}
