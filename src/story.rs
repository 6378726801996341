//! Append-only helper the assemblers write their documents with.

use std::path::Path;

use crate::error::PdfBuildError;
use crate::images::add_image;
use crate::model::{Block, CodeBlock, RichParagraph, TableBlock};
use crate::richtext::{parse_markup, Span};
use crate::scale::{inches, points};
use crate::styles::{ParagraphStyle, StyleSheet};

/// An ordered list of blocks under construction, bound to a style sheet.
pub struct Story<'a> {
    styles: &'a StyleSheet,
    blocks: Vec<Block>,
}

impl<'a> Story<'a> {
    pub fn new(styles: &'a StyleSheet) -> Self {
        Self {
            styles,
            blocks: Vec::new(),
        }
    }

    fn markup(&mut self, text: &str, style: &ParagraphStyle) -> Result<&mut Self, PdfBuildError> {
        let spans = parse_markup(text).map_err(|source| PdfBuildError::Markup {
            text: text.to_owned(),
            source,
        })?;
        self.blocks
            .push(Block::Paragraph(RichParagraph::new(spans, style.clone())));
        Ok(self)
    }

    fn plain(&mut self, text: &str, style: &ParagraphStyle) -> &mut Self {
        self.blocks.push(Block::Paragraph(RichParagraph::new(
            vec![Span::new(text)],
            style.clone(),
        )));
        self
    }

    /// Document title.
    pub fn title(&mut self, text: &str) -> &mut Self {
        let styles = self.styles;
        self.plain(text, &styles.title1)
    }

    /// Section heading.
    pub fn heading(&mut self, text: &str) -> &mut Self {
        let styles = self.styles;
        self.plain(text, &styles.title2)
    }

    /// Sub-section heading.
    pub fn subheading(&mut self, text: &str) -> &mut Self {
        let styles = self.styles;
        self.plain(text, &styles.title3)
    }

    /// Body paragraph written in inline markup.
    pub fn body(&mut self, text: &str) -> Result<&mut Self, PdfBuildError> {
        let styles = self.styles;
        self.markup(text, &styles.body)
    }

    /// Body paragraph taken literally, without markup parsing.
    pub fn plain_body(&mut self, text: &str) -> &mut Self {
        let styles = self.styles;
        self.plain(text, &styles.body)
    }

    /// Framed warning paragraph written in inline markup.
    pub fn disclaimer(&mut self, text: &str) -> Result<&mut Self, PdfBuildError> {
        let styles = self.styles;
        self.markup(text, &styles.disclaimer)
    }

    /// Small centred closing line.
    pub fn footer(&mut self, text: &str) -> &mut Self {
        let styles = self.styles;
        self.plain(text, &styles.footer)
    }

    /// One body paragraph per item, each prefixed with `- `.
    pub fn bullets(&mut self, items: &[&str]) -> Result<&mut Self, PdfBuildError> {
        for item in items {
            self.body(&format!("- {item}"))?;
        }
        Ok(self)
    }

    /// One body paragraph per item, numbered from 1.
    pub fn numbered(&mut self, items: &[&str]) -> Result<&mut Self, PdfBuildError> {
        for (index, item) in items.iter().enumerate() {
            self.body(&format!("{}. {item}", index + 1))?;
        }
        Ok(self)
    }

    /// Vertical gap in points.
    pub fn spacer(&mut self, height_pt: f64) -> &mut Self {
        self.blocks.push(Block::Spacer(points(height_pt)));
        self
    }

    /// Table from row-major cells; the first row is the header. Widths are in inches.
    pub fn table(&mut self, rows: &[&[&str]], widths_in: &[f64]) -> &mut Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
            .collect();
        let widths = widths_in.iter().copied().map(inches).collect();
        self.blocks.push(Block::Table(TableBlock::new(rows, widths)));
        self
    }

    /// Monospace listing at the given font size.
    pub fn code(&mut self, text: &str, font_size: u8) -> &mut Self {
        let style = self.styles.code.clone().with_font_size(font_size);
        self.blocks.push(Block::Code(CodeBlock::new(text, style)));
        self
    }

    /// Centred image `width_in` inches wide with a caption; nothing when the file is missing.
    pub fn image(
        &mut self,
        path: impl AsRef<Path>,
        width_in: f64,
        caption: &str,
    ) -> Result<&mut Self, PdfBuildError> {
        let styles = self.styles;
        let blocks = add_image(
            path,
            Some(inches(width_in)),
            Some(caption),
            Some(styles),
            None,
        )?;
        self.blocks.extend(blocks);
        Ok(self)
    }

    /// Images sharing one width, in order.
    pub fn images<P: AsRef<Path>>(
        &mut self,
        images: impl IntoIterator<Item = (P, &'static str)>,
        width_in: f64,
    ) -> Result<&mut Self, PdfBuildError> {
        for (path, caption) in images {
            self.image(path, width_in, caption)?;
        }
        Ok(self)
    }

    pub fn page_break(&mut self) -> &mut Self {
        self.blocks.push(Block::PageBreak);
        self
    }

    pub fn finish(self) -> Vec<Block> {
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::plain_text;

    fn paragraph_text(block: &Block) -> String {
        match block {
            Block::Paragraph(paragraph) => plain_text(paragraph.spans()),
            other => panic!("expected paragraph, got {}", other.kind()),
        }
    }

    #[test]
    fn numbered_and_bulleted_items_keep_order() {
        let styles = StyleSheet::standard();
        let mut story = Story::new(&styles);
        story.numbered(&["first", "second"]).expect("markup");
        story.bullets(&["**Magnet:** small piece"]).expect("markup");
        let blocks = story.finish();

        assert_eq!(blocks.len(), 3);
        assert_eq!(paragraph_text(&blocks[0]), "1. first");
        assert_eq!(paragraph_text(&blocks[1]), "2. second");
        assert_eq!(paragraph_text(&blocks[2]), "- Magnet: small piece");
    }

    #[test]
    fn headings_use_sheet_styles() {
        let styles = StyleSheet::standard();
        let mut story = Story::new(&styles);
        story.title("Title").heading("Section").subheading("Sub");
        let blocks = story.finish();

        let names: Vec<_> = blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(paragraph) => paragraph.style().name,
                other => other.kind(),
            })
            .collect();
        assert_eq!(names, vec!["Title1", "Title2", "Title3"]);
    }

    #[test]
    fn table_widths_are_converted_from_inches() {
        let styles = StyleSheet::standard();
        let mut story = Story::new(&styles);
        story.table(&[&["Field", "Value"], &["Zigbee Model", "TS0203"]], &[1.5, 5.0]);
        let blocks = story.finish();

        let Block::Table(table) = &blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.column_widths_mm(), &[inches(1.5), inches(5.0)]);
    }

    #[test]
    fn code_overrides_font_size_only() {
        let styles = StyleSheet::standard();
        let mut story = Story::new(&styles);
        story.code("automation:\n  - alias: x", 7);
        let blocks = story.finish();

        let Block::Code(code) = &blocks[0] else {
            panic!("expected code block");
        };
        assert_eq!(code.style().font_size, 7);
        assert_eq!(code.style().boxed, styles.code.boxed);
        assert_eq!(code.lines().nth(1), Some("  - alias: x"));
    }

    #[test]
    fn missing_images_are_skipped() {
        let styles = StyleSheet::standard();
        let mut story = Story::new(&styles);
        story
            .images(
                [
                    ("/__sensor_docs_missing__/1.png", "one"),
                    ("/__sensor_docs_missing__/2.png", "two"),
                ],
                5.5,
            )
            .expect("missing images are not errors");
        story.spacer(10.0);
        let blocks = story.finish();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], Block::Spacer(points(10.0)));
    }

    #[test]
    fn malformed_markup_is_reported() {
        let styles = StyleSheet::standard();
        let mut story = Story::new(&styles);
        let err = story.body("**unterminated").err().expect("markup error");
        assert!(matches!(err, PdfBuildError::Markup { .. }));
    }
}
