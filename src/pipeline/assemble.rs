//! Document assembly: embedded images → a serialized PDF.
//!
//! Builds the object tree the long way — catalog, page tree, one page per
//! image with its own resources and content stream — because the whole
//! document is born here; there is no existing file to splice into. Each
//! page's content stream is a single draw instruction:
//!
//! ```text
//! q <w> 0 0 <h> <x> <y> cm /Im0 Do Q
//! ```
//!
//! scaling the unit image square up to the placed rectangle. The soft mask
//! for PNG alpha is wired into the image dictionary here, once both streams
//! have object ids.

use crate::config::ConversionConfig;
use crate::error::Img2PdfError;
use crate::pipeline::embed::EmbeddedImage;
use crate::pipeline::layout::{self, Placement};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::{debug, info};

/// Assemble and serialize the document. CPU-bound; callers run this on the
/// blocking thread pool.
pub fn assemble(images: &[EmbeddedImage], config: &ConversionConfig) -> Result<Vec<u8>, Img2PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(images.len());

    for (index, image) in images.iter().enumerate() {
        let placement = layout::place(image.width, image.height, config.scale, config.page_size);

        let mut image_dict = image.xobject.dict.clone();
        if let Some(smask) = &image.smask {
            let smask_id = doc.add_object(smask.clone());
            image_dict.set("SMask", smask_id);
        }
        let image_id = doc.add_object(Stream::new(image_dict, image.xobject.content.clone()));

        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            draw_instruction(&placement).into_bytes(),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                placement.page_width.into(),
                placement.page_height.into(),
            ],
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
            "Contents" => content_id,
        });

        debug!(
            "Page {}: {}x{} pt image at ({:.2}, {:.2}) on {}x{} pt",
            index + 1,
            placement.width,
            placement.height,
            placement.x,
            placement.y,
            placement.page_width,
            placement.page_height
        );

        kids.push(page_id.into());
    }

    let page_count = kids.len();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::string_literal("img2pdf"),
    };
    if let Some(title) = &config.title {
        info.set("Title", Object::string_literal(title.as_str()));
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    if config.compress {
        // Flate-compresses every stream without a filter; the DCTDecode
        // pass-through streams are left untouched.
        doc.compress();
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Img2PdfError::PdfWriteFailed {
            detail: e.to_string(),
        })?;

    info!("Assembled {} pages, {} bytes", page_count, bytes.len());
    Ok(bytes)
}

/// The single draw instruction for a placed image.
fn draw_instruction(p: &Placement) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /Im0 Do Q",
        p.width, p.height, p.x, p.y
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::embed::embed_image;
    use crate::pipeline::input::SelectedImage;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn png_image(width: u32, height: u32) -> EmbeddedImage {
        let mut buf = Vec::new();
        let pixels = vec![40u8; (width * height * 3) as usize];
        PngEncoder::new(&mut buf)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .expect("encode png");
        embed_image(&SelectedImage::from_bytes("t.png", "image/png", buf)).expect("embed")
    }

    #[test]
    fn draw_instruction_matches_placement() {
        let p = Placement {
            page_width: 595.28,
            page_height: 841.89,
            width: 50.0,
            height: 50.0,
            x: 272.64,
            y: 395.945,
        };
        assert_eq!(
            draw_instruction(&p),
            "q 50 0 0 50 272.64 395.945 cm /Im0 Do Q"
        );
    }

    #[test]
    fn empty_input_produces_a_zero_page_document() {
        let config = ConversionConfig::default();
        let bytes = assemble(&[], &config).expect("assemble");
        let doc = Document::load_mem(&bytes).expect("output must parse");
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn one_image_produces_one_page() {
        let config = ConversionConfig::default();
        let bytes = assemble(&[png_image(100, 100)], &config).expect("assemble");
        let doc = Document::load_mem(&bytes).expect("output must parse");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn pages_come_out_in_input_order() {
        let config = ConversionConfig::builder()
            .page_size(crate::config::PageSize::Fit)
            .scale(1.0)
            .build()
            .expect("config");
        let bytes =
            assemble(&[png_image(10, 10), png_image(20, 20)], &config).expect("assemble");
        let doc = Document::load_mem(&bytes).expect("parse");
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        // Fit pages mirror each image's dimensions, so MediaBox order
        // proves page order.
        let mut widths = Vec::new();
        for (_, page_id) in pages {
            let media_box = doc
                .get_object(page_id)
                .and_then(|o| o.as_dict())
                .and_then(|d| d.get(b"MediaBox"))
                .and_then(|o| o.as_array())
                .expect("MediaBox");
            widths.push(match &media_box[2] {
                Object::Integer(i) => *i as f32,
                Object::Real(f) => *f,
                other => panic!("not a number: {other:?}"),
            });
        }
        assert_eq!(widths, vec![10.0, 20.0]);
    }

    #[test]
    fn uncompressed_output_contains_the_draw_operator() {
        let config = ConversionConfig::builder()
            .compress(false)
            .build()
            .expect("config");
        let bytes = assemble(&[png_image(100, 100)], &config).expect("assemble");
        let text = String::from_utf8_lossy(&bytes);
        assert!(
            text.contains("q 50 0 0 50 272.64 395.945 cm /Im0 Do Q"),
            "content stream must draw a centered 50x50 image"
        );
    }
}
