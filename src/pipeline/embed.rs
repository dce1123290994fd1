//! Image embedding: one selected file → one PDF image XObject.
//!
//! The dispatch runs on the **declared** content type, not on sniffed
//! bytes — a file announcing `image/gif` is rejected here even if its bytes
//! happen to be a perfectly good PNG. The declared type is the contract the
//! caller handed us; honouring it keeps "what gets embedded" predictable
//! from the selection alone.
//!
//! ## Two embedding strategies
//!
//! * **PNG** — decoded with the `image` crate and re-emitted as raw samples
//!   (DeviceRGB or DeviceGray). An alpha channel cannot live inside a PDF
//!   image XObject, so it is split off into a DeviceGray `SMask` stream.
//!   Sample streams are left unfiltered; the save-time compression pass
//!   flate-compresses them.
//!
//! * **JPEG** — the original JFIF bytes go into the document unchanged under
//!   a `DCTDecode` filter. PDF viewers decode JPEG natively, so re-encoding
//!   would only cost time and quality. The XObject dictionary needs the
//!   frame geometry, which [`super::probe`] reads from the SOF header.

use crate::error::EmbedError;
use crate::pipeline::input::SelectedImage;
use crate::pipeline::probe;
use image::ImageFormat;
use lopdf::{dictionary, Object, Stream};
use tracing::debug;

/// An image ready to be placed on a page: the XObject stream, an optional
/// soft mask, and the native pixel dimensions that drive page layout.
#[derive(Debug)]
pub struct EmbeddedImage {
    pub xobject: Stream,
    /// DeviceGray alpha stream; wired into the XObject's `SMask` entry once
    /// both have object ids.
    pub smask: Option<Stream>,
    pub width: u32,
    pub height: u32,
}

/// Embed one selected file, dispatching on its declared content type.
pub fn embed_image(file: &SelectedImage) -> Result<EmbeddedImage, EmbedError> {
    match file.content_type.to_ascii_lowercase().as_str() {
        "image/png" => embed_png(file),
        "image/jpeg" => embed_jpeg(file),
        other => Err(EmbedError::UnsupportedType {
            name: file.name.clone(),
            content_type: other.to_string(),
        }),
    }
}

/// Decode a PNG and emit raw samples, splitting alpha into an SMask.
fn embed_png(file: &SelectedImage) -> Result<EmbeddedImage, EmbedError> {
    let img = image::load_from_memory_with_format(&file.data, ImageFormat::Png).map_err(|e| {
        EmbedError::DecodeFailed {
            name: file.name.clone(),
            detail: e.to_string(),
        }
    })?;

    let (width, height) = (img.width(), img.height());
    let color = img.color();

    let (colour_space, samples, alpha) = if color.has_alpha() {
        if color.channel_count() == 2 {
            // grayscale + alpha
            let la = img.to_luma_alpha8();
            let mut gray = Vec::with_capacity((width * height) as usize);
            let mut mask = Vec::with_capacity((width * height) as usize);
            for px in la.pixels() {
                gray.push(px[0]);
                mask.push(px[1]);
            }
            ("DeviceGray", gray, Some(mask))
        } else {
            let rgba = img.to_rgba8();
            let mut rgb = Vec::with_capacity((width * height * 3) as usize);
            let mut mask = Vec::with_capacity((width * height) as usize);
            for px in rgba.pixels() {
                rgb.push(px[0]);
                rgb.push(px[1]);
                rgb.push(px[2]);
                mask.push(px[3]);
            }
            ("DeviceRGB", rgb, Some(mask))
        }
    } else if color.channel_count() == 1 {
        ("DeviceGray", img.to_luma8().into_raw(), None)
    } else {
        ("DeviceRGB", img.to_rgb8().into_raw(), None)
    };

    debug!(
        "Embedded {} as PNG: {}x{} {} ({} sample bytes, alpha: {})",
        file.name,
        width,
        height,
        colour_space,
        samples.len(),
        alpha.is_some()
    );

    let xobject = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => colour_space,
            "BitsPerComponent" => 8,
        },
        samples,
    );

    let smask = alpha.map(|mask| {
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            mask,
        )
    });

    Ok(EmbeddedImage {
        xobject,
        smask,
        width,
        height,
    })
}

/// Pass the original JPEG bytes through under a `DCTDecode` filter.
fn embed_jpeg(file: &SelectedImage) -> Result<EmbeddedImage, EmbedError> {
    let header = probe::jpeg_header(&file.data).map_err(|e| EmbedError::DecodeFailed {
        name: file.name.clone(),
        detail: e.to_string(),
    })?;

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => header.width as i64,
        "Height" => header.height as i64,
        "BitsPerComponent" => header.bit_depth as i64,
        "Filter" => "DCTDecode",
    };

    match header.channels {
        1 => dict.set("ColorSpace", "DeviceGray"),
        3 => dict.set("ColorSpace", "DeviceRGB"),
        4 => {
            // Adobe four-component JPEGs store inverted CMYK.
            dict.set("ColorSpace", "DeviceCMYK");
            dict.set(
                "Decode",
                Object::Array(vec![
                    1.into(),
                    0.into(),
                    1.into(),
                    0.into(),
                    1.into(),
                    0.into(),
                    1.into(),
                    0.into(),
                ]),
            );
        }
        n => {
            return Err(EmbedError::DecodeFailed {
                name: file.name.clone(),
                detail: format!("JPEG has {n} colour components"),
            })
        }
    }

    debug!(
        "Embedded {} as JPEG pass-through: {}x{}, {} components",
        file.name, header.width, header.height, header.channels
    );

    Ok(EmbeddedImage {
        xobject: Stream::new(dict, file.data.clone()),
        smask: None,
        width: header.width,
        height: header.height,
    })
}
