//! Builds the Smart Home Halacha sensor spec sheets as PDF documents.
//!
//! Each sheet is assembled into a [`model::FlowDocument`] and laid out by `genpdf` through the
//! [`builder::PdfBuilder`]. Start from [`generate::generate_all`].

pub mod builder;
pub mod config;
pub mod documents;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod generate;
pub mod images;
pub mod model;
pub mod richtext;
pub mod scale;
pub mod story;
pub mod styles;

pub use error::PdfBuildError;
