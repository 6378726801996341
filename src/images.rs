//! The image helper used by the assemblers.
//!
//! Screenshots and product photos are optional inputs: a missing file yields no blocks at all, so
//! a document still builds when some of its images have not been captured yet.

use std::path::Path;

use genpdf::error::Context as _;
use log::debug;

use crate::error::PdfBuildError;
use crate::model::{Block, ImageBlock, RichParagraph};
use crate::richtext::Span;
use crate::scale::{inches, FitRequest};
use crate::styles::StyleSheet;

/// Width used when the caller does not request one.
pub const DEFAULT_WIDTH_IN: f64 = 5.5;
/// Height limit used when the caller does not request one.
pub const DEFAULT_MAX_HEIGHT_IN: f64 = 4.0;

/// Reads the pixel dimensions of the image at `path` without decoding the pixel data.
pub fn natural_dimensions(path: &Path) -> Result<(u32, u32), PdfBuildError> {
    image::image_dimensions(path)
        .with_context(|| format!("Failed to read image dimensions of {}", path.display()))
        .map_err(|source| PdfBuildError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// Produces the blocks for an image scaled to `width` (millimetres) and at most `max_height` tall,
/// followed by a centred caption when both `caption` and `styles` are given.
///
/// Returns an empty list when `path` does not exist. Files that exist but cannot be read are
/// reported as [`PdfBuildError::Image`].
pub fn add_image(
    path: impl AsRef<Path>,
    width: Option<f64>,
    caption: Option<&str>,
    styles: Option<&StyleSheet>,
    max_height: Option<f64>,
) -> Result<Vec<Block>, PdfBuildError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("Skipping missing image {}", path.display());
        return Ok(Vec::new());
    }

    let (natural_width, natural_height) = natural_dimensions(path)?;
    let fitted = FitRequest {
        natural_width: f64::from(natural_width),
        natural_height: f64::from(natural_height),
        target_width: width.unwrap_or_else(|| inches(DEFAULT_WIDTH_IN)),
        max_height: Some(max_height.unwrap_or_else(|| inches(DEFAULT_MAX_HEIGHT_IN))),
    }
    .fit();

    debug!(
        "Image {} ({}x{} px) fitted to {:.1}x{:.1} mm",
        path.display(),
        natural_width,
        natural_height,
        fitted.width,
        fitted.height
    );

    let mut blocks = vec![Block::Image(ImageBlock::new(
        path,
        fitted.width,
        fitted.height,
    ))];

    if let (Some(caption), Some(styles)) = (caption, styles) {
        blocks.push(Block::Paragraph(RichParagraph::new(
            vec![Span::new(caption)],
            styles.caption.clone(),
        )));
    }

    Ok(blocks)
}
