//! Header-only image inspection: dimensions and colour layout without a
//! full pixel decode.
//!
//! Two callers need these facts cheaply:
//!
//! * the JPEG embed path passes the original bytes straight through into a
//!   `DCTDecode` stream, so the XObject dictionary needs width, height, and
//!   component count from the JFIF header alone;
//! * `inspect` reports per-image metadata without ever touching pixel data.
//!
//! PNG keeps everything in the fixed-layout IHDR chunk right behind the
//! signature. JPEG requires a marker walk to the first SOF segment.

use thiserror::Error;

/// Facts read from an image file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    /// Bits per sample (8 for baseline JPEG and the common PNGs).
    pub bit_depth: u8,
    /// Colour channels: 1 = grayscale, 2 = gray+alpha, 3 = RGB/palette,
    /// 4 = RGBA (PNG) or CMYK (JPEG).
    pub channels: u8,
}

/// Why a header could not be read.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("not a PNG: bad signature")]
    BadPngSignature,
    #[error("PNG header truncated")]
    TruncatedPng,
    #[error("PNG has unknown colour type {0}")]
    UnknownPngColourType(u8),
    #[error("not a JPEG: bad SOI marker")]
    BadJpegSignature,
    #[error("JPEG header truncated")]
    TruncatedJpeg,
    #[error("JPEG has no frame header before scan data")]
    MissingJpegFrame,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Read the IHDR chunk of a PNG.
pub fn png_header(data: &[u8]) -> Result<ImageHeader, ProbeError> {
    if data.len() < 8 || data[..8] != PNG_SIGNATURE {
        return Err(ProbeError::BadPngSignature);
    }
    // signature + chunk length (4) + "IHDR" (4) + 13 payload bytes
    if data.len() < 33 || &data[12..16] != b"IHDR" {
        return Err(ProbeError::TruncatedPng);
    }
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    let bit_depth = data[24];
    let channels = match data[25] {
        0 => 1, // grayscale
        2 => 3, // truecolour
        3 => 3, // palette, expands to RGB
        4 => 2, // grayscale + alpha
        6 => 4, // truecolour + alpha
        other => return Err(ProbeError::UnknownPngColourType(other)),
    };
    Ok(ImageHeader {
        width,
        height,
        bit_depth,
        channels,
    })
}

/// Walk JPEG markers to the first SOF segment and read the frame header.
pub fn jpeg_header(data: &[u8]) -> Result<ImageHeader, ProbeError> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(ProbeError::BadJpegSignature);
    }

    let mut pos = 2usize;
    loop {
        // Markers are 0xFF followed by a non-0xFF code; fill bytes repeat 0xFF.
        if pos + 1 >= data.len() {
            return Err(ProbeError::TruncatedJpeg);
        }
        if data[pos] != 0xFF {
            return Err(ProbeError::TruncatedJpeg);
        }
        let mut marker = data[pos + 1];
        pos += 2;
        while marker == 0xFF {
            if pos >= data.len() {
                return Err(ProbeError::TruncatedJpeg);
            }
            marker = data[pos];
            pos += 1;
        }

        match marker {
            // Standalone markers carry no length field.
            0x01 | 0xD0..=0xD7 => continue,
            // Start of scan: entropy-coded data follows, no SOF was seen.
            0xDA => return Err(ProbeError::MissingJpegFrame),
            // SOF0–SOF15, excluding DHT (C4), JPG (C8), DAC (CC).
            0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => {
                if pos + 8 > data.len() {
                    return Err(ProbeError::TruncatedJpeg);
                }
                let bit_depth = data[pos + 2];
                let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
                let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
                let channels = data[pos + 7];
                return Ok(ImageHeader {
                    width,
                    height,
                    bit_depth,
                    channels,
                });
            }
            _ => {
                if pos + 2 > data.len() {
                    return Err(ProbeError::TruncatedJpeg);
                }
                let len = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
                if len < 2 {
                    return Err(ProbeError::TruncatedJpeg);
                }
                pos += len;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        let pixels = vec![200u8; (width * height * 3) as usize];
        PngEncoder::new(&mut buf)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .expect("encode png");
        buf
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        let pixels = vec![90u8; (width * height * 3) as usize];
        JpegEncoder::new_with_quality(&mut buf, 80)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .expect("encode jpeg");
        buf
    }

    #[test]
    fn png_header_reads_ihdr() {
        let h = png_header(&png_bytes(100, 60)).expect("header");
        assert_eq!((h.width, h.height), (100, 60));
        assert_eq!(h.bit_depth, 8);
        assert_eq!(h.channels, 3);
    }

    #[test]
    fn png_rejects_wrong_signature() {
        assert!(matches!(
            png_header(b"GIF89a...."),
            Err(ProbeError::BadPngSignature)
        ));
        assert!(matches!(png_header(b""), Err(ProbeError::BadPngSignature)));
    }

    #[test]
    fn jpeg_header_finds_sof() {
        let h = jpeg_header(&jpeg_bytes(64, 48)).expect("header");
        assert_eq!((h.width, h.height), (64, 48));
        assert_eq!(h.bit_depth, 8);
        assert_eq!(h.channels, 3);
    }

    #[test]
    fn jpeg_rejects_png_bytes() {
        assert!(matches!(
            jpeg_header(&png_bytes(4, 4)),
            Err(ProbeError::BadJpegSignature)
        ));
    }

    #[test]
    fn jpeg_truncated_after_soi_is_an_error() {
        assert!(matches!(
            jpeg_header(&[0xFF, 0xD8]),
            Err(ProbeError::TruncatedJpeg)
        ));
    }

    #[test]
    fn grayscale_png_reports_one_channel() {
        let mut buf = Vec::new();
        let pixels = vec![128u8; 16];
        PngEncoder::new(&mut buf)
            .write_image(&pixels, 4, 4, ExtendedColorType::L8)
            .expect("encode");
        let h = png_header(&buf).expect("header");
        assert_eq!(h.channels, 1);
    }
}
