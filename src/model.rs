//! Data structures describing the logical content of a spec sheet.
//!
//! A document is an ordered list of [`Block`]s; the order is the only relationship between them.
//! Blocks are plain values that do not reference the rendering crate's element types, so two
//! assemblies of the same document can be compared directly.

use std::path::{Path, PathBuf};

use crate::richtext::Span;
use crate::styles::ParagraphStyle;

/// Rich text paragraph carrying inline spans and the paragraph style.
#[derive(Clone, Debug, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    style: ParagraphStyle,
}

impl RichParagraph {
    pub fn new(spans: impl Into<Vec<Span>>, style: ParagraphStyle) -> Self {
        Self {
            spans: spans.into(),
            style,
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }
}

/// An image with its rendered size already computed, centred in the text column.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    path: PathBuf,
    width_mm: f64,
    height_mm: f64,
}

impl ImageBlock {
    pub fn new(path: impl Into<PathBuf>, width_mm: f64, height_mm: f64) -> Self {
        Self {
            path: path.into(),
            width_mm,
            height_mm,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rendered width in millimetres.
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Rendered height in millimetres.
    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }
}

/// A grid of literal strings whose first row is the header.
#[derive(Clone, Debug, PartialEq)]
pub struct TableBlock {
    rows: Vec<Vec<String>>,
    column_widths_mm: Vec<f64>,
}

impl TableBlock {
    /// Creates a table from row-major cells and the authored column widths.
    ///
    /// Rows shorter than the column count are padded with empty cells when rendered.
    pub fn new(rows: Vec<Vec<String>>, column_widths_mm: Vec<f64>) -> Self {
        Self {
            rows,
            column_widths_mm,
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn column_widths_mm(&self) -> &[f64] {
        &self.column_widths_mm
    }

    pub fn column_count(&self) -> usize {
        self.column_widths_mm
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0))
    }
}

/// Preformatted text set in the monospace family, line breaks and indentation preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeBlock {
    text: String,
    style: ParagraphStyle,
}

impl CodeBlock {
    pub fn new(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }
}

/// Individual flow elements in document order.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content, headings included.
    Paragraph(RichParagraph),
    /// Sized image.
    Image(ImageBlock),
    /// Table with a styled header row.
    Table(TableBlock),
    /// Monospace listing.
    Code(CodeBlock),
    /// Fixed vertical gap in millimetres.
    Spacer(f64),
    /// Explicit page break request.
    PageBreak,
}

impl Block {
    /// Short label for logging and structural comparisons.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Image(_) => "image",
            Block::Table(_) => "table",
            Block::Code(_) => "code",
            Block::Spacer(_) => "spacer",
            Block::PageBreak => "page-break",
        }
    }
}

/// A complete spec sheet ready to be handed to the builder.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowDocument {
    title: String,
    file_name: String,
    blocks: Vec<Block>,
}

impl FlowDocument {
    pub fn new(title: impl Into<String>, file_name: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
            blocks,
        }
    }

    /// Title stored in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// File name the document is written to inside the output directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks of the given [`Block::kind`].
    pub fn count(&self, kind: &str) -> usize {
        self.blocks.iter().filter(|block| block.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::StyleSheet;

    #[test]
    fn table_column_count_covers_ragged_rows() {
        let table = TableBlock::new(
            vec![
                vec!["Parameter".into(), "Value".into()],
                vec!["Battery".into(), "CR1632".into(), "extra".into()],
            ],
            vec![50.0, 110.0],
        );
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.header().map(<[String]>::len), Some(2));
    }

    #[test]
    fn code_block_preserves_indented_lines() {
        let code = CodeBlock::new("{\n  \"battery\": 93\n}", StyleSheet::standard().code);
        let lines: Vec<_> = code.lines().collect();
        assert_eq!(lines, vec!["{", "  \"battery\": 93", "}"]);
    }

    #[test]
    fn document_counts_blocks_by_kind() {
        let document = FlowDocument::new(
            "Sample",
            "sample.pdf",
            vec![Block::Spacer(5.0), Block::PageBreak, Block::Spacer(2.0)],
        );
        assert_eq!(document.count("spacer"), 2);
        assert_eq!(document.count("page-break"), 1);
        assert_eq!(document.count("image"), 0);
    }
}
