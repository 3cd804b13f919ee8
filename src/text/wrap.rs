use unicode_segmentation::UnicodeSegmentation;

use crate::text::{
    markup::tokenize,
    metrics::{FontFamily, FontSpec, FontWeight, TextMeasure},
};

/// One measured grapheme.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Token {
    /// A single extended grapheme cluster.
    pub grapheme: String,
    /// Set when the grapheme came from a `[...]` run.
    pub highlight: bool,
    /// Advance width in pixels at the weight it will be drawn with.
    pub width: f32,
}

/// A wrapped line of tokens, or a blank line standing for an empty source paragraph.
///
/// Blank lines never carry tokens; the constructors are the only way to build a `Line`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    tokens: Vec<Token>,
    width: f32,
    is_empty: bool,
}

impl Line {
    /// Blank line (vertical spacing only).
    pub fn blank() -> Self {
        Self {
            tokens: Vec::new(),
            width: 0.0,
            is_empty: true,
        }
    }

    /// Line holding `tokens`; its width is the sum of their widths.
    ///
    /// An empty token list gives a blank line.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            return Self::blank();
        }
        let width = tokens.iter().map(|t| t.width).sum();
        Self {
            tokens,
            width,
            is_empty: false,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Concatenated grapheme text (highlight state dropped).
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.grapheme.as_str()).collect()
    }
}

/// Font parameters for one wrap pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapStyle {
    pub family: FontFamily,
    pub size: f32,
    /// Weight of non-highlighted runs. Highlighted runs always use [`FontWeight::BLACK`].
    pub base_weight: FontWeight,
}

impl WrapStyle {
    pub fn font_for(&self, highlight: bool) -> FontSpec {
        let weight = if highlight {
            FontWeight::BLACK
        } else {
            self.base_weight
        };
        FontSpec::new(self.family, weight, self.size)
    }
}

/// Break `text` into lines no wider than `max_width`, one grapheme at a time.
///
/// Paragraphs are separated by `\n` (a trailing `\r` is dropped). A blank paragraph, or one
/// whose runs hold no characters, yields a single blank line. A grapheme is moved to a new line
/// when it would overflow a line that already holds at least one token, so a grapheme wider
/// than `max_width` sits alone on its own line.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    max_width: f32,
    style: &WrapStyle,
) -> Vec<Line> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);

        let mut current: Vec<Token> = Vec::new();
        let mut current_width = 0.0f32;
        let mut produced = false;

        for run in tokenize(paragraph) {
            let font = style.font_for(run.highlight);
            for grapheme in run.text.graphemes(true) {
                let width = measure.advance(&font, grapheme);
                if current_width + width > max_width && !current.is_empty() {
                    lines.push(Line::from_tokens(std::mem::take(&mut current)));
                    produced = true;
                    current_width = 0.0;
                }
                current.push(Token {
                    grapheme: grapheme.to_string(),
                    highlight: run.highlight,
                    width,
                });
                current_width += width;
            }
        }

        if !current.is_empty() {
            lines.push(Line::from_tokens(current));
        } else if !produced {
            lines.push(Line::blank());
        }
    }
    lines
}

/// Unstyled character wrap: same breaking rule as [`wrap_text`], without markup.
///
/// Blank paragraphs yield an empty string; every other returned line is non-empty.
pub fn wrap_plain<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    max_width: f32,
    font: &FontSpec,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0f32;
        for grapheme in paragraph.graphemes(true) {
            let width = measure.advance(font, grapheme);
            if current_width + width > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push_str(grapheme);
            current_width += width;
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
