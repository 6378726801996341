//! Turns a [`FlowDocument`] into PDF bytes.

use std::fs;
use std::path::Path;

use genpdf::elements::{FrameCellDecorator, FramedElement, PageBreak, Paragraph, TableLayout};
use genpdf::fonts::{Font, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, Margins, PaperSize, SimplePageDecorator, Size};
use log::{debug, info};

use crate::elements::{mm_from_f64, mm_to_f64, sized_image, CodeListing, Spacer};
use crate::error::PdfBuildError;
use crate::fonts::{self, LoadedFonts};
use crate::model::{Block, CodeBlock, FlowDocument, RichParagraph, TableBlock};
use crate::scale::{inches, points};
use crate::styles::{hex_color, FontRole, ParagraphStyle};

const TABLE_FONT_SIZE: u8 = 9;
const TABLE_HEADER_COLOR: u32 = 0x2d3748;
const TABLE_PADDING_VERTICAL_PT: f64 = 6.0;
const TABLE_PADDING_HORIZONTAL_PT: f64 = 8.0;

/// Output of a successful render.
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// Number of blocks pushed into the layout engine.
    pub element_count: usize,
}

/// Renders flow documents with a fixed page geometry.
///
/// Defaults to US Letter with three-quarter-inch margins, which is what the spec sheets are
/// designed for.
pub struct PdfBuilder {
    paper_size: Size,
    margin_mm: f64,
    font_size: u8,
    line_spacing: f64,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter.into(),
            margin_mm: inches(0.75),
            font_size: 10,
            line_spacing: 1.2,
        }
    }
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width between the left and right margins.
    pub fn text_width_mm(&self) -> f64 {
        mm_to_f64(self.paper_size.width)
            - self.margin_mm
            - self.margin_mm
    }

    fn prepare(&self, title: &str) -> Result<(Document, FontFamily<Font>), PdfBuildError> {
        let LoadedFonts { body, monospace } =
            fonts::load_fonts().map_err(PdfBuildError::FontLoad)?;

        let mut document = Document::new(body);
        let monospace = document.add_font_family(monospace);

        document.set_title(title);
        document.set_paper_size(self.paper_size);
        document.set_font_size(self.font_size);
        document.set_line_spacing(self.line_spacing);

        let mut decorator = SimplePageDecorator::new();
        let margin = mm_from_f64(self.margin_mm);
        decorator.set_margins(Margins::trbl(margin, margin, margin, margin));
        document.set_page_decorator(decorator);

        Ok((document, monospace))
    }

    /// Lays out every block of `flow` in order and returns the PDF bytes.
    pub fn render(&self, flow: &FlowDocument) -> Result<RenderedPdf, PdfBuildError> {
        let (mut document, monospace) = self.prepare(flow.title())?;
        let text_width = self.text_width_mm();

        for block in flow.blocks() {
            debug!("Pushing {} into '{}'", block.kind(), flow.title());
            push_block(&mut document, block, &monospace, text_width)?;
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(PdfBuildError::Render)?;

        Ok(RenderedPdf {
            bytes,
            element_count: flow.blocks().len(),
        })
    }

    /// Renders `flow` and writes it to `path`, replacing any existing file.
    pub fn render_to_file(
        &self,
        flow: &FlowDocument,
        path: impl AsRef<Path>,
    ) -> Result<RenderedPdf, PdfBuildError> {
        let path = path.as_ref();
        let rendered = self.render(flow)?;
        fs::write(path, &rendered.bytes).map_err(|err| PdfBuildError::io(path, err))?;
        info!(
            "Generated {} ({} bytes, {} elements)",
            path.display(),
            rendered.bytes.len(),
            rendered.element_count
        );
        Ok(rendered)
    }
}

fn push_block(
    document: &mut Document,
    block: &Block,
    monospace: &FontFamily<Font>,
    text_width_mm: f64,
) -> Result<(), PdfBuildError> {
    match block {
        Block::Paragraph(paragraph) => {
            let style = paragraph.style().clone();
            push_spaced(document, rich_paragraph(paragraph), &style, monospace);
        }
        Block::Image(image) => {
            let element = sized_image(image).map_err(|source| PdfBuildError::Image {
                path: image.path().to_path_buf(),
                source,
            })?;
            document.push(element);
        }
        Block::Table(table) => {
            let inset = mm_from_f64(table_inset_mm(table, text_width_mm));
            document.push(table_layout(table)?.padded(Margins::trbl(0, inset, 0, inset)));
        }
        Block::Code(code) => {
            let style = code.style().clone();
            push_spaced(document, code_listing(code, monospace), &style, monospace);
        }
        Block::Spacer(height) => document.push(Spacer::new(*height)),
        Block::PageBreak => document.push(PageBreak::new()),
    }
    Ok(())
}

fn text_style(style: &ParagraphStyle, monospace: &FontFamily<Font>) -> Style {
    let text = style.text_style();
    match style.font {
        FontRole::Body => text,
        FontRole::Monospace => text.with_font_family(*monospace),
    }
}

/// Applies the paragraph style, optional frame and surrounding space to `element`.
fn push_spaced<E: Element + 'static>(
    document: &mut Document,
    element: E,
    style: &ParagraphStyle,
    monospace: &FontFamily<Font>,
) {
    let spacing = Margins::trbl(
        mm_from_f64(style.space_before_mm()),
        0,
        mm_from_f64(style.space_after_mm()),
        0,
    );
    let styled = element.styled(text_style(style, monospace));

    match style.boxed {
        Some(padding) => {
            let inset = mm_from_f64(points(padding));
            let framed = FramedElement::new(styled.padded(Margins::all(inset)));
            document.push(framed.padded(spacing));
        }
        None => document.push(styled.padded(spacing)),
    }
}

fn rich_paragraph(paragraph: &RichParagraph) -> Paragraph {
    let mut element = Paragraph::default();
    for span in paragraph.spans() {
        element.push(span.to_styled_string());
    }
    element.set_alignment(paragraph.style().alignment.into());
    element
}

fn code_listing(code: &CodeBlock, monospace: &FontFamily<Font>) -> CodeListing {
    CodeListing::new(code.lines(), text_style(code.style(), monospace))
}

/// Converts authored widths into the integer weights `TableLayout` distributes space by.
pub fn column_weights(table: &TableBlock) -> Vec<usize> {
    let widths = table.column_widths_mm();
    (0..table.column_count())
        .map(|index| {
            widths
                .get(index)
                .map(|width| (width * 10.0).round().max(1.0) as usize)
                .unwrap_or(1)
        })
        .collect()
}

/// Horizontal padding on each side that keeps a table at its authored total width, centred in
/// the text column. Tables wider than the column are not padded.
pub fn table_inset_mm(table: &TableBlock, text_width_mm: f64) -> f64 {
    let authored: f64 = table.column_widths_mm().iter().sum();
    ((text_width_mm - authored) / 2.0).max(0.0)
}

fn table_cell(text: &str, header: bool) -> impl Element {
    let mut style = Style::new().with_font_size(TABLE_FONT_SIZE);
    if header {
        style.set_bold();
        style.set_color(hex_color(TABLE_HEADER_COLOR));
    }

    let mut paragraph = Paragraph::new(text.to_owned());
    paragraph.set_alignment(Alignment::Left);
    let vertical = mm_from_f64(points(TABLE_PADDING_VERTICAL_PT));
    let horizontal = mm_from_f64(points(TABLE_PADDING_HORIZONTAL_PT));
    paragraph
        .styled(style)
        .padded(Margins::trbl(vertical, horizontal, vertical, horizontal))
}

fn table_layout(table: &TableBlock) -> Result<TableLayout, PdfBuildError> {
    let columns = table.column_count();
    let mut layout = TableLayout::new(column_weights(table));
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    for (index, row) in table.rows().iter().enumerate() {
        let mut table_row = layout.row();
        for column in 0..columns {
            let text = row.get(column).map(String::as_str).unwrap_or("");
            table_row.push_element(table_cell(text, index == 0));
        }
        table_row.push().map_err(PdfBuildError::Layout)?;
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::inches;

    #[test]
    fn weights_follow_authored_widths() {
        let table = TableBlock::new(
            vec![vec!["Parameter".into(), "Value".into()]],
            vec![inches(2.0), inches(4.5)],
        );
        assert_eq!(column_weights(&table), vec![508, 1143]);
    }

    #[test]
    fn extra_columns_get_minimal_weight() {
        let table = TableBlock::new(
            vec![vec!["a".into(), "b".into(), "c".into()]],
            vec![inches(1.0)],
        );
        assert_eq!(column_weights(&table), vec![254, 1, 1]);
    }

    #[test]
    fn letter_text_column_is_seven_inches() {
        assert!((PdfBuilder::new().text_width_mm() - inches(7.0)).abs() < 1e-6);
    }

    #[test]
    fn tables_are_centred_at_authored_width() {
        let text_width = PdfBuilder::new().text_width_mm();
        let table = TableBlock::new(
            vec![vec!["Parameter".into(), "Value".into()]],
            vec![inches(2.0), inches(4.5)],
        );
        assert!((table_inset_mm(&table, text_width) - inches(0.25)).abs() < 1e-6);

        let wide = TableBlock::new(vec![vec!["a".into()]], vec![inches(8.0)]);
        assert_eq!(table_inset_mm(&wide, text_width), 0.0);
    }

    #[test]
    fn table_layout_accepts_header_and_body_rows() {
        let table = TableBlock::new(
            vec![
                vec!["Physical State".into(), "Contact Value".into()],
                vec!["Door/Window Closed".into(), "true (Closed)".into()],
                vec!["Door/Window Open".into()],
            ],
            vec![inches(2.0), inches(2.5)],
        );
        assert!(table_layout(&table).is_ok());
    }
}
