use serde::Deserialize;

use crate::fonts::{default_leading, BuiltinFont, FontFamily};
use crate::graphics::Color;

/// Horizontal alignment of lines within their box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// X offset of an item `used` wide inside a box `avail` wide.
    pub fn offset(&self, avail: f64, used: f64) -> f64 {
        match self {
            Align::Left => 0.0,
            Align::Center => (avail - used) / 2.0,
            Align::Right => avail - used,
        }
    }
}

/// Styling for a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub family: FontFamily,
    pub font_size: f64,
    pub color: Color,
    pub align: Align,
    /// Baseline-to-baseline distance. `None` means 1.2x the font size.
    pub leading: Option<f64>,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        ParagraphStyle {
            family: FontFamily::Helvetica,
            font_size: 10.0,
            color: Color::BLACK,
            align: Align::Left,
            leading: None,
        }
    }
}

impl ParagraphStyle {
    pub fn sized(font_size: f64) -> Self {
        ParagraphStyle {
            font_size,
            ..ParagraphStyle::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_leading(mut self, leading: f64) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn leading(&self) -> f64 {
        self.leading.unwrap_or_else(|| default_leading(self.font_size))
    }
}

/// A run of text sharing weight and slant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span {
            bold: true,
            ..Span::plain(text)
        }
    }
}

/// A block of rich text wrapped to the width it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub style: ParagraphStyle,
}

/// Consecutive words on one line that share a font.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: BuiltinFont,
    pub width: f64,
}

/// One wrapped line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub runs: Vec<Run>,
    pub width: f64,
}

#[derive(Debug)]
enum Token {
    Word {
        text: String,
        font: BuiltinFont,
        leading_space: bool,
    },
    Break,
}

impl Paragraph {
    pub fn new(spans: Vec<Span>, style: ParagraphStyle) -> Self {
        Paragraph { spans, style }
    }

    /// Parse light markup: `<b>`, `<i>`, `<br/>` and the `&amp;`,
    /// `&lt;`, `&gt;` entities. Anything else is literal text.
    pub fn markup(text: &str, style: ParagraphStyle) -> Self {
        Paragraph::new(parse_markup(text), style)
    }

    pub fn plain(text: &str, style: ParagraphStyle) -> Self {
        Paragraph::new(vec![Span::plain(text)], style)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }

    fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut had_space = false;
        for span in &self.spans {
            let font = self.style.family.variant(span.bold, span.italic);
            let mut word = String::new();
            for ch in span.text.chars() {
                if ch == '\n' || ch.is_whitespace() {
                    if !word.is_empty() {
                        tokens.push(Token::Word {
                            text: std::mem::take(&mut word),
                            font,
                            leading_space: had_space,
                        });
                        had_space = false;
                    }
                    if ch == '\n' {
                        tokens.push(Token::Break);
                        had_space = false;
                    } else {
                        had_space = true;
                    }
                } else {
                    word.push(ch);
                }
            }
            if !word.is_empty() {
                tokens.push(Token::Word {
                    text: word,
                    font,
                    leading_space: had_space,
                });
                had_space = false;
            }
        }
        tokens
    }

    /// Wrap into lines no wider than `width`. A word wider than `width`
    /// on its own is broken between characters.
    pub fn wrap(&self, width: f64) -> Vec<Line> {
        let size = self.style.font_size;
        let mut lines = Vec::new();
        let mut line = Line::default();
        let mut pending_break = false;

        for token in self.tokens() {
            let (text, font, leading_space) = match token {
                Token::Break => {
                    lines.push(std::mem::take(&mut line));
                    pending_break = true;
                    continue;
                }
                Token::Word {
                    text,
                    font,
                    leading_space,
                } => (text, font, leading_space),
            };
            pending_break = false;

            let word_w = font.measure(&text, size);
            let space_w = if leading_space && !line.runs.is_empty() {
                font.measure(" ", size)
            } else {
                0.0
            };

            if line.width + space_w + word_w <= width {
                push_word(&mut line, &text, font, space_w > 0.0, size);
                continue;
            }
            if !line.runs.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if word_w <= width {
                push_word(&mut line, &text, font, false, size);
                continue;
            }
            let mut pieces = break_word(&text, font, size, width);
            let last = pieces.pop().unwrap_or_default();
            for piece in pieces {
                let mut full = Line::default();
                push_word(&mut full, &piece, font, false, size);
                lines.push(full);
            }
            push_word(&mut line, &last, font, false, size);
        }

        if !line.runs.is_empty() || pending_break {
            lines.push(line);
        }
        lines
    }

    /// Height of the wrapped paragraph at `width`.
    pub fn height(&self, width: f64) -> f64 {
        self.wrap(width).len() as f64 * self.style.leading()
    }
}

fn push_word(line: &mut Line, word: &str, font: BuiltinFont, space: bool, size: f64) {
    let text = if space {
        format!(" {}", word)
    } else {
        word.to_string()
    };
    let w = font.measure(&text, size);
    line.width += w;
    match line.runs.last_mut() {
        Some(run) if run.font == font => {
            run.text.push_str(&text);
            run.width += w;
        }
        _ => line.runs.push(Run {
            text,
            font,
            width: w,
        }),
    }
}

/// Split a word into pieces no wider than `width`. Every piece holds at
/// least one character, so an absurdly narrow width still terminates.
fn break_word(word: &str, font: BuiltinFont, size: f64, width: f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0;
    for ch in word.chars() {
        let ch_w = font.char_width(ch) as f64 * size / 1000.0;
        if current_w + ch_w > width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_w = 0.0;
        }
        current.push(ch);
        current_w += ch_w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

fn parse_markup(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut bold = 0u32;
    let mut italic = 0u32;
    let mut current = String::new();
    let mut rest = text;

    let flush = |spans: &mut Vec<Span>, current: &mut String, bold: u32, italic: u32| {
        if !current.is_empty() {
            spans.push(Span {
                text: std::mem::take(current),
                bold: bold > 0,
                italic: italic > 0,
            });
        }
    };

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            let close = rest.find('>');
            let tag = close.map(|end| rest[1..end].trim().to_ascii_lowercase());
            let handled = match tag.as_deref() {
                Some("b") | Some("strong") => {
                    flush(&mut spans, &mut current, bold, italic);
                    bold += 1;
                    true
                }
                Some("/b") | Some("/strong") => {
                    flush(&mut spans, &mut current, bold, italic);
                    bold = bold.saturating_sub(1);
                    true
                }
                Some("i") | Some("em") => {
                    flush(&mut spans, &mut current, bold, italic);
                    italic += 1;
                    true
                }
                Some("/i") | Some("/em") => {
                    flush(&mut spans, &mut current, bold, italic);
                    italic = italic.saturating_sub(1);
                    true
                }
                Some("br") | Some("br/") | Some("br /") => {
                    current.push('\n');
                    true
                }
                _ => false,
            };
            if let (true, Some(end)) = (handled, close) {
                rest = &rest[end + 1..];
                continue;
            }
        } else if ch == '&' {
            let entity = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')]
                .into_iter()
                .find(|(name, _)| rest.starts_with(name));
            if let Some((name, decoded)) = entity {
                current.push(decoded);
                rest = &rest[name.len()..];
                continue;
            }
        }
        current.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    flush(&mut spans, &mut current, bold, italic);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn markup_bold_and_breaks() {
        let p = Paragraph::markup(
            "<b>Invoice #:</b> PC-0001<br/>Date: 09.04.2025",
            ParagraphStyle::default(),
        );
        assert_eq!(p.spans.len(), 2);
        assert!(p.spans[0].bold);
        assert_eq!(p.spans[0].text, "Invoice #:");
        assert_eq!(p.spans[1].text, " PC-0001\nDate: 09.04.2025");
        let lines = p.wrap(500.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "Invoice #: PC-0001");
        assert_eq!(lines[0].runs[0].font, BuiltinFont::HelveticaBold);
        assert_eq!(lines[0].runs[1].font, BuiltinFont::Helvetica);
        assert_eq!(line_text(&lines[1]), "Date: 09.04.2025");
    }

    #[test]
    fn unknown_tags_and_entities() {
        let p = Paragraph::markup("a <x> &amp; b &lt;", ParagraphStyle::default());
        assert_eq!(p.spans, vec![Span::plain("a <x> & b <")]);
    }

    #[test]
    fn stray_angle_bracket_before_a_tag() {
        let p = Paragraph::markup("a < b <b>c</b>", ParagraphStyle::default());
        assert_eq!(p.spans, vec![Span::plain("a < b "), Span::bold("c")]);
    }

    #[test]
    fn wraps_at_width() {
        let style = ParagraphStyle::sized(10.0);
        let p = Paragraph::plain("aaa bbb ccc", style);
        // "aaa" = 16.68pt, "aaa bbb" = 16.68 + 2.78 + 16.68 = 36.14
        let lines = p.wrap(37.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "aaa bbb");
        assert_eq!(line_text(&lines[1]), "ccc");
        assert!((p.height(37.0) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_word_is_broken() {
        let p = Paragraph::plain("abcdefgh", ParagraphStyle::sized(10.0));
        // each letter ~5pt; 12pt fits two letters
        let lines = p.wrap(12.0);
        assert!(lines.len() >= 4);
        let joined: String = lines.iter().map(line_text).collect();
        assert_eq!(joined, "abcdefgh");
        assert!(lines.iter().all(|l| l.width <= 12.0 + 1e-9));
    }

    #[test]
    fn trailing_break_adds_empty_line() {
        let p = Paragraph::markup("Authorized<br/><br/>", ParagraphStyle::default());
        assert_eq!(p.wrap(100.0).len(), 3);
    }

    #[test]
    fn empty_paragraph_has_no_height() {
        let p = Paragraph::plain("   ", ParagraphStyle::default());
        assert!(p.is_empty());
        assert_eq!(p.height(100.0), 0.0);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Align::Left.offset(100.0, 40.0), 0.0);
        assert_eq!(Align::Center.offset(100.0, 40.0), 30.0);
        assert_eq!(Align::Right.offset(100.0, 40.0), 60.0);
    }
}
