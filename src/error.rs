//! Error type shared by the assemblers, the builder and the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::richtext::ParseError;

/// Failures that abort a document build.
///
/// A missing image is deliberately absent from this list: the image helper skips it
/// instead of reporting an error.
#[derive(Debug, Error)]
pub enum PdfBuildError {
    /// Neither the bundled nor the fallback font families could be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),

    /// An image file exists but could not be probed or decoded.
    #[error("failed to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: genpdf::error::Error,
    },

    /// Authored paragraph text contains malformed inline markup.
    #[error("invalid inline markup in {text:?}: {source}")]
    Markup {
        text: String,
        #[source]
        source: ParseError,
    },

    /// A table or other layout element could not be assembled.
    #[error("failed to lay out element: {0}")]
    Layout(#[source] genpdf::error::Error),

    /// The layout engine failed while paginating or writing the document.
    #[error("failed to render document: {0}")]
    Render(#[source] genpdf::error::Error),

    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PdfBuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
