//! Element implementations built on top of `genpdf` primitives.
//!
//! This module adds the pieces the spec sheets need that the upstream crate does not ship with:
//! a fixed-height spacer, a monospace listing that keeps indentation, and image loading that
//! produces an element of an exact size.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb};

use genpdf::elements::{Image, Text};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Style, StyledString};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Scale, Size};

use crate::model::ImageBlock;
use crate::scale::MM_PER_INCH;

/// Resolution `genpdf` assumes when it derives an image's natural size.
const DEFAULT_IMAGE_DPI: f64 = 300.0;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Composites an image with an alpha channel onto a white background.
///
/// The PDF backend only embeds opaque images; screenshots are commonly saved with alpha.
pub fn flatten_alpha(image: DynamicImage) -> DynamicImage {
    if !image.color().has_alpha() {
        return image;
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let flattened = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = rgba.get_pixel(x, y).0;
        let alpha = u16::from(pixel[3]);
        let blend = |channel: u8| -> u8 {
            ((u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])])
    });
    DynamicImage::ImageRgb8(flattened)
}

fn natural_size_mm(image: &DynamicImage) -> (f64, f64) {
    let (px_width, px_height) = image.dimensions();
    (
        MM_PER_INCH * f64::from(px_width) / DEFAULT_IMAGE_DPI,
        MM_PER_INCH * f64::from(px_height) / DEFAULT_IMAGE_DPI,
    )
}

/// Horizontal and vertical scale that turns the natural size of `image` into the size recorded
/// in `block`. `None` for images without area.
pub fn scale_factors(block: &ImageBlock, image: &DynamicImage) -> Option<(f64, f64)> {
    let (natural_width, natural_height) = natural_size_mm(image);
    if natural_width > f64::EPSILON && natural_height > f64::EPSILON {
        Some((
            block.width_mm() / natural_width,
            block.height_mm() / natural_height,
        ))
    } else {
        None
    }
}

/// Builds a `genpdf` image element rendered at exactly the size recorded in `block`.
pub fn sized_image(block: &ImageBlock) -> Result<Image, Error> {
    let decoded = flatten_alpha(decode_image_from_path(block.path())?);
    let factors = scale_factors(block, &decoded);

    let mut image = Image::from_dynamic_image(decoded)?;
    if let Some((x, y)) = factors {
        image.set_scale(Scale::new(x, y));
    }
    image.set_alignment(Alignment::Center);
    Ok(image)
}

/// Vertical gap of a fixed height.
///
/// At the bottom of a page the gap is truncated to the remaining space instead of pushing an
/// empty area onto the next page.
#[derive(Clone, Copy, Debug)]
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: mm_from_f64(height_mm),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// Preformatted lines printed without wrapping, leading whitespace preserved.
///
/// Lines that do not fit on the current page continue on the next one.
pub struct CodeListing {
    lines: Vec<String>,
    style: Style,
    next_line: usize,
}

impl CodeListing {
    pub fn new<'a>(lines: impl IntoIterator<Item = &'a str>, style: Style) -> Self {
        Self {
            lines: lines.into_iter().map(str::to_owned).collect(),
            style,
            next_line: 0,
        }
    }
}

impl Element for CodeListing {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let line_height = style.line_height(&context.font_cache);
        let mut result = RenderResult::default();

        while let Some(line) = self.lines.get(self.next_line) {
            if line_height > area.size().height {
                result.has_more = true;
                break;
            }

            let mut text = Text::new(StyledString::new(line.clone(), style));
            let line_result = text.render(context, area.clone(), style)?;
            if line_result.has_more {
                result.has_more = true;
                break;
            }

            result.size = result.size.stack_vertical(Size::new(
                line_result.size.width,
                line_height,
            ));
            area.add_offset(Position::new(0, line_height));
            self.next_line += 1;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn mm_conversion_round_trips() {
        assert!((mm_to_f64(mm_from_f64(12.5)) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn flatten_alpha_blends_onto_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let flattened = flatten_alpha(DynamicImage::ImageRgba8(rgba));
        assert!(!flattened.color().has_alpha());
        let rgb = flattened.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn natural_size_uses_default_dpi() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::new(300, 600));
        let (width, height) = natural_size_mm(&image);
        assert!((width - 25.4).abs() < 1e-9);
        assert!((height - 50.8).abs() < 1e-9);
    }

    #[test]
    fn scale_maps_natural_size_onto_block_size() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::new(600, 300));
        let block = ImageBlock::new("unused.png", 101.6, 25.4);

        let (x, y) = scale_factors(&block, &image).expect("image has area");
        assert!((x - 2.0).abs() < 1e-9);
        assert!((y - 0.5).abs() < 1e-9);

        let empty = DynamicImage::ImageRgb8(ImageBuffer::new(0, 0));
        assert_eq!(scale_factors(&block, &empty), None);
    }

    #[test]
    fn sized_image_loads_transparent_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shot.png");
        RgbaImage::from_pixel(40, 80, Rgba([0, 128, 255, 100]))
            .save(&path)
            .expect("write png");

        let block = ImageBlock::new(&path, 20.0, 40.0);
        assert!(sized_image(&block).is_ok());
    }

    #[test]
    fn sized_image_reports_undecodable_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").expect("write");

        assert!(sized_image(&ImageBlock::new(&path, 10.0, 10.0)).is_err());
    }
}
