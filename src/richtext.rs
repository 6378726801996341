//! Inline text styling for authored paragraphs.
//!
//! Paragraph prose is written with a small markdown-like syntax and parsed into [`Span`]s, which
//! map onto `genpdf`'s [`StyledString`] when the paragraph is rendered.

use std::fmt;

use genpdf::style::{Color, Style, StyledString};

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    /// Converts the span into a [`StyledString`] carrying only the inline attributes.
    ///
    /// Paragraph-level attributes (size, base color) are merged in by the element that renders
    /// the string, so an unset inline color falls back to the paragraph color.
    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

/// Concatenates the text of all spans, dropping styles.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

/// Parse errors produced by [`parse_markup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    index: usize,
    message: String,
}

impl ParseError {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }

    /// Byte index in the original input string where the error was detected.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.index)
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, Default)]
struct StyleState {
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl StyleState {
    fn to_span(self, text: impl Into<String>) -> Span {
        Span {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Color,
}

impl Marker {
    fn closing_token(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Italic => "*",
            Marker::Color => "}",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Marker::Bold => "bold span",
            Marker::Italic => "italic span",
            Marker::Color => "color span",
        }
    }
}

/// Parses inline markup into a list of [`Span`]s.
///
/// Supported constructs:
///
/// - `**bold**`
/// - `*italic*`
/// - `[color=#RRGGBB]{text}`
///
/// Square brackets and braces are reserved; any other character is taken literally.
pub fn parse_markup(input: &str) -> Result<Vec<Span>, ParseError> {
    let (spans, idx) = parse_inner(input, 0, StyleState::default(), None)?;
    debug_assert_eq!(idx, input.len());
    Ok(spans)
}

fn parse_inner(
    input: &str,
    mut index: usize,
    state: StyleState,
    closing_marker: Option<Marker>,
) -> Result<(Vec<Span>, usize), ParseError> {
    let mut spans = Vec::new();
    let mut buffer = String::new();

    while let Some(ch) = input[index..].chars().next() {
        let rest = &input[index..];

        if let Some(marker) = closing_marker {
            if rest.starts_with(marker.closing_token()) {
                flush_buffer(&mut buffer, &mut spans, state);
                index += marker.closing_token().len();
                return Ok((spans, index));
            }
        }

        let nested = if rest.starts_with("**") {
            index += 2;
            Some((
                StyleState {
                    bold: true,
                    ..state
                },
                Marker::Bold,
            ))
        } else if rest.starts_with('*') {
            index += 1;
            Some((
                StyleState {
                    italic: true,
                    ..state
                },
                Marker::Italic,
            ))
        } else if rest.starts_with("[color=") {
            let (color, after_directive) = parse_color_directive(input, index)?;
            index = after_directive;
            Some((
                StyleState {
                    color: Some(color),
                    ..state
                },
                Marker::Color,
            ))
        } else {
            None
        };

        if let Some((nested_state, marker)) = nested {
            flush_buffer(&mut buffer, &mut spans, state);
            let (inner, new_index) = parse_inner(input, index, nested_state, Some(marker))?;
            spans.extend(inner);
            index = new_index;
            continue;
        }

        match ch {
            '}' => {
                return Err(ParseError::new(
                    index,
                    "unexpected closing token `}` without matching opening `[color=...]`",
                ))
            }
            ']' => return Err(ParseError::new(index, "unexpected closing token `]`")),
            '[' => {
                return Err(ParseError::new(
                    index,
                    "unsupported directive; expected `[color=#RRGGBB]{...}`",
                ))
            }
            _ => {
                buffer.push(ch);
                index += ch.len_utf8();
            }
        }
    }

    if let Some(marker) = closing_marker {
        Err(ParseError::new(
            index,
            format!("unterminated {}", marker.description()),
        ))
    } else {
        flush_buffer(&mut buffer, &mut spans, state);
        Ok((spans, index))
    }
}

fn flush_buffer(buffer: &mut String, spans: &mut Vec<Span>, state: StyleState) {
    if buffer.is_empty() {
        return;
    }
    spans.push(state.to_span(std::mem::take(buffer)));
}

fn parse_color_directive(input: &str, index: usize) -> Result<(Color, usize), ParseError> {
    const PREFIX: &str = "[color=";
    let start_hex = index + PREFIX.len();
    if !input[start_hex..].starts_with('#') {
        return Err(ParseError::new(
            start_hex,
            "expected `#` followed by a hexadecimal RGB value",
        ));
    }

    let hex_start = start_hex + 1;
    let hex = input
        .get(hex_start..hex_start + 6)
        .ok_or_else(|| {
            ParseError::new(
                hex_start,
                "incomplete color specification; expected 6 hexadecimal digits",
            )
        })?;
    let value = u32::from_str_radix(hex, 16)
        .ok()
        .filter(|_| hex.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| {
            ParseError::new(
                hex_start,
                "invalid RGB specification; use hexadecimal digits only",
            )
        })?;

    let bracket_index = hex_start + 6;
    if !input[bracket_index..].starts_with("]{") {
        return Err(ParseError::new(
            bracket_index,
            "expected `]{` to close the color directive and start the colored text",
        ));
    }

    Ok((crate::styles::hex_color(value), bracket_index + 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_to_style_reflects_flags() {
        let span = Span::new("Hello")
            .bold()
            .italic()
            .colored(Color::Rgb(10, 20, 30));
        let styled = span.to_styled_string();
        assert_eq!(styled.s, "Hello");
        assert!(styled.style.is_bold());
        assert!(styled.style.is_italic());
        assert_eq!(styled.style.color(), Some(Color::Rgb(10, 20, 30)));
    }

    #[test]
    fn parse_plain_text_keeps_punctuation() {
        let spans = parse_markup("Zigbee 3.0 (requires gateway) - 0-3500 Lux").expect("parse");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "Zigbee 3.0 (requires gateway) - 0-3500 Lux");
        assert!(!spans[0].is_bold());
    }

    #[test]
    fn parse_bold_lead_in() {
        let spans = parse_markup("**Main Unit:** Contains the reed switch").expect("parse");
        assert_eq!(spans.len(), 2);
        assert!(spans[0].is_bold());
        assert_eq!(spans[0].text(), "Main Unit:");
        assert!(!spans[1].is_bold());
        assert_eq!(plain_text(&spans), "Main Unit: Contains the reed switch");
    }

    #[test]
    fn parse_nested_styles() {
        let spans = parse_markup("This is **very *cool***!").expect("parse");
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[1].text(), "very ");
        assert!(spans[2].is_bold());
        assert!(spans[2].is_italic());
        assert_eq!(spans[3].text(), "!");
    }

    #[test]
    fn parse_color_directive() {
        let spans = parse_markup("[color=#c53030]{Red} text").expect("parse");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(), "Red");
        assert_eq!(spans[0].color(), Some(Color::Rgb(0xc5, 0x30, 0x30)));
        assert_eq!(spans[1].text(), " text");
    }

    #[test]
    fn error_on_unterminated_bold() {
        let err = parse_markup("**oops").unwrap_err();
        assert!(err.message().contains("unterminated bold"));
    }

    #[test]
    fn error_on_invalid_color() {
        let err = parse_markup("[color=#12FG34]{x}").unwrap_err();
        assert!(err.message().contains("invalid RGB"));
    }

    #[test]
    fn error_on_stray_bracket() {
        let err = parse_markup("zigbee2mqtt/[device_name]").unwrap_err();
        assert_eq!(err.index(), 12);
    }
}
