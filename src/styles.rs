//! Named paragraph styles used by the sensor spec sheets.
//!
//! Sizes and spacings are stored in points, the unit the sheets were designed in, and converted
//! to millimetres only when the layout engine needs them.

use genpdf::style::{Color, Style};
use genpdf::Alignment;

use crate::scale::points;

/// Builds a [`Color`] from a `0xRRGGBB` literal.
pub const fn hex_color(rgb: u32) -> Color {
    Color::Rgb(
        ((rgb >> 16) & 0xff) as u8,
        ((rgb >> 8) & 0xff) as u8,
        (rgb & 0xff) as u8,
    )
}

/// Horizontal placement of a paragraph or image within the text column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Selects which of the loaded font families a paragraph is set in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontRole {
    /// The proportional body family.
    #[default]
    Body,
    /// The monospace family used for code listings.
    Monospace,
}

/// Visual attributes applied to a whole paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub name: &'static str,
    pub font_size: u8,
    pub bold: bool,
    pub color: Option<Color>,
    pub alignment: HorizontalAlignment,
    pub space_before: f64,
    pub space_after: f64,
    /// Draws a frame around the paragraph, inset by this padding (in points).
    pub boxed: Option<f64>,
    pub font: FontRole,
}

impl ParagraphStyle {
    fn new(name: &'static str, font_size: u8) -> Self {
        Self {
            name,
            font_size,
            bold: false,
            color: None,
            alignment: HorizontalAlignment::Left,
            space_before: 0.0,
            space_after: 0.0,
            boxed: None,
            font: FontRole::Body,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn colored(mut self, rgb: u32) -> Self {
        self.color = Some(hex_color(rgb));
        self
    }

    fn centered(mut self) -> Self {
        self.alignment = HorizontalAlignment::Center;
        self
    }

    fn spaced(mut self, before: f64, after: f64) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    fn boxed(mut self, padding: f64) -> Self {
        self.boxed = Some(padding);
        self
    }

    fn monospace(mut self) -> Self {
        self.font = FontRole::Monospace;
        self
    }

    /// Returns a copy of the style with a different font size.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = font_size;
        self
    }

    /// Converts the character-level attributes into a `genpdf` [`Style`].
    ///
    /// The font family is not part of the result; the renderer selects it from [`Self::font`].
    pub fn text_style(&self) -> Style {
        let mut style = Style::new().with_font_size(self.font_size);
        if self.bold {
            style.set_bold();
        }
        if let Some(color) = self.color {
            style.set_color(color);
        }
        style
    }

    /// Space above the paragraph in millimetres.
    pub fn space_before_mm(&self) -> f64 {
        points(self.space_before)
    }

    /// Space below the paragraph in millimetres.
    pub fn space_after_mm(&self) -> f64 {
        points(self.space_after)
    }
}

/// The fixed set of styles the spec sheets are written with.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSheet {
    pub title1: ParagraphStyle,
    pub title2: ParagraphStyle,
    pub title3: ParagraphStyle,
    pub body: ParagraphStyle,
    pub disclaimer: ParagraphStyle,
    pub code: ParagraphStyle,
    pub caption: ParagraphStyle,
    pub footer: ParagraphStyle,
}

impl StyleSheet {
    pub fn standard() -> Self {
        Self {
            title1: ParagraphStyle::new("Title1", 20)
                .bold()
                .colored(0x1a365d)
                .spaced(0.0, 20.0),
            title2: ParagraphStyle::new("Title2", 14)
                .bold()
                .colored(0x2c5282)
                .spaced(15.0, 10.0),
            title3: ParagraphStyle::new("Title3", 12)
                .bold()
                .colored(0x2b6cb0)
                .spaced(10.0, 6.0),
            body: ParagraphStyle::new("BodyText2", 10).spaced(4.0, 4.0),
            disclaimer: ParagraphStyle::new("Disclaimer", 9)
                .colored(0xc53030)
                .spaced(6.0, 6.0)
                .boxed(6.0),
            code: ParagraphStyle::new("CodeBlock", 8)
                .monospace()
                .spaced(4.0, 4.0)
                .boxed(6.0),
            caption: ParagraphStyle::new("Caption", 9)
                .colored(0x718096)
                .centered()
                .spaced(4.0, 12.0),
            footer: ParagraphStyle::new("Footer", 8).colored(0xa0aec0).centered(),
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_splits_channels() {
        assert_eq!(hex_color(0x1a365d), Color::Rgb(0x1a, 0x36, 0x5d));
        assert_eq!(hex_color(0xffffff), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn headings_are_bold_and_decreasing() {
        let sheet = StyleSheet::standard();
        assert!(sheet.title1.bold && sheet.title2.bold && sheet.title3.bold);
        assert!(sheet.title1.font_size > sheet.title2.font_size);
        assert!(sheet.title2.font_size > sheet.title3.font_size);
        assert!(!sheet.body.bold);
    }

    #[test]
    fn code_style_is_boxed_monospace() {
        let sheet = StyleSheet::standard();
        assert_eq!(sheet.code.font, FontRole::Monospace);
        assert_eq!(sheet.code.boxed, Some(6.0));
        assert_eq!(sheet.code.clone().with_font_size(7).font_size, 7);
    }

    #[test]
    fn caption_is_centered_with_trailing_space() {
        let caption = StyleSheet::standard().caption;
        assert_eq!(caption.alignment, HorizontalAlignment::Center);
        assert!((caption.space_after_mm() - 12.0 * 25.4 / 72.0).abs() < 1e-9);
        assert!(caption.text_style().color().is_some());
    }
}
