//! The two sensor spec sheets.
//!
//! Each assembler writes its content inline, in reading order, into a [`Story`]. The only input
//! is the directory the screenshots live in; missing screenshots simply drop out.

pub mod door;
pub mod presence;

use std::fmt;

use crate::config::BuildConfig;
use crate::error::PdfBuildError;
use crate::model::FlowDocument;
use crate::story::Story;
use crate::styles::StyleSheet;

const HARDWARE_DOCUMENTATION: &str = "Smart Home Halacha Project - Hardware Documentation";

const PROJECT_FOOTER: &str = "This document is part of the Smart Home Halacha project exploring \
                              the intersection of home automation and Jewish law.";

const GENERATED_FOOTER: &str = "Generated: December 2024";

fn product_images_intro(story: &mut Story<'_>) -> Result<(), PdfBuildError> {
    story.heading("Product Images (AliExpress Samples)");
    story
        .body(
            "*Note: These images are representative examples from AliExpress listings. Actual \
             products may vary by seller.*",
        )?
        .spacer(10.0);
    Ok(())
}

fn closing_footer(story: &mut Story<'_>) {
    story
        .spacer(30.0)
        .footer(PROJECT_FOOTER)
        .footer(GENERATED_FOOTER);
}

/// The devices a spec sheet exists for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    Presence,
    Door,
}

impl SensorKind {
    /// Every sheet, in build order.
    pub const ALL: [SensorKind; 2] = [SensorKind::Presence, SensorKind::Door];

    /// File name of the generated PDF.
    pub fn file_name(self) -> &'static str {
        match self {
            SensorKind::Presence => presence::FILE_NAME,
            SensorKind::Door => door::FILE_NAME,
        }
    }

    /// Assembles the sheet, reading images from the sensor's folder under `config`.
    pub fn assemble(
        self,
        config: &BuildConfig,
        styles: &StyleSheet,
    ) -> Result<FlowDocument, PdfBuildError> {
        match self {
            SensorKind::Presence => presence::assemble(&config.presence_dir(), styles),
            SensorKind::Door => door::assemble(&config.door_dir(), styles),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SensorKind::Presence => "presence sensor",
            SensorKind::Door => "door/window sensor",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::richtext::plain_text;
    use image::{Rgb, RgbImage};
    use std::fs;
    use std::path::Path;

    fn assemble_without_images(kind: SensorKind) -> FlowDocument {
        let config = BuildConfig::new("/__sensor_docs_no_images__");
        kind.assemble(&config, &StyleSheet::standard())
            .expect("content markup is valid")
    }

    fn first_paragraph(document: &FlowDocument) -> String {
        document
            .blocks()
            .iter()
            .find_map(|block| match block {
                Block::Paragraph(paragraph) => Some(plain_text(paragraph.spans())),
                _ => None,
            })
            .expect("document has paragraphs")
    }

    fn last_paragraph(document: &FlowDocument) -> String {
        match document.blocks().last() {
            Some(Block::Paragraph(paragraph)) => plain_text(paragraph.spans()),
            other => panic!("expected closing paragraph, got {other:?}"),
        }
    }

    fn write_png(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        RgbImage::from_pixel(64, 48, Rgb([120, 130, 140]))
            .save(path)
            .expect("write png");
    }

    #[test]
    fn presence_document_structure_without_images() {
        let document = assemble_without_images(SensorKind::Presence);

        assert_eq!(document.file_name(), "presence-sensor-specification.pdf");
        assert_eq!(first_paragraph(&document), presence::TITLE);
        assert_eq!(last_paragraph(&document), GENERATED_FOOTER);
        assert_eq!(document.count("image"), 0);
        assert_eq!(document.count("table"), 5);
        assert_eq!(document.count("code"), 2);
        assert_eq!(document.count("page-break"), 7);
    }

    #[test]
    fn door_document_structure_without_images() {
        let document = assemble_without_images(SensorKind::Door);

        assert_eq!(document.file_name(), "door-window-sensor-specification.pdf");
        assert_eq!(first_paragraph(&document), door::TITLE);
        assert_eq!(last_paragraph(&document), GENERATED_FOOTER);
        assert_eq!(document.count("image"), 0);
        assert_eq!(document.count("table"), 6);
        assert_eq!(document.count("code"), 1);
        assert_eq!(document.count("page-break"), 6);
    }

    #[test]
    fn assembly_is_deterministic() {
        for kind in SensorKind::ALL {
            assert_eq!(assemble_without_images(kind), assemble_without_images(kind));
        }
    }

    #[test]
    fn present_images_are_inserted_with_captions() {
        let base = tempfile::tempdir().expect("tempdir");
        let config = BuildConfig::new(base.path());
        write_png(&config.door_dir().join("1.png"));
        write_png(&config.door_dir().join("z2m").join("5.png"));

        let styles = StyleSheet::standard();
        let document = SensorKind::Door
            .assemble(&config, &styles)
            .expect("assemble");
        let without = assemble_without_images(SensorKind::Door);

        assert_eq!(document.count("image"), 2);
        assert_eq!(document.blocks().len(), without.blocks().len() + 4);

        let captions: Vec<_> = document
            .blocks()
            .windows(2)
            .filter_map(|pair| match pair {
                [Block::Image(_), Block::Paragraph(caption)] => {
                    assert_eq!(caption.style(), &styles.caption);
                    Some(plain_text(caption.spans()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            captions,
            vec![
                "Aqara door/window sensors - works with Mi Home and Apple HomeKit",
                "State Tab: Raw JSON payload showing current sensor state",
            ]
        );
    }

    #[test]
    fn every_sheet_has_a_distinct_file_name() {
        assert_ne!(
            SensorKind::Presence.file_name(),
            SensorKind::Door.file_name()
        );
        assert_eq!(SensorKind::Door.to_string(), "door/window sensor");
    }
}
