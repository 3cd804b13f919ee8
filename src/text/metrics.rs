use unicode_width::UnicodeWidthStr;

/// Font family classes known to the renderer.
///
/// Each class resolves to an ordered list of concrete family names plus a generic fallback,
/// see [`FontFamily::candidates`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Song/Ming style CJK serif (book and article bodies, quote text).
    Serif,
    /// Hei style CJK sans (default body face).
    Sans,
    /// Latin old-style serif used for the quote card tag line.
    Georgia,
    /// Rounded sans.
    Rounded,
    /// Geometric sans.
    Modern,
    /// High-contrast display serif.
    Elegant,
    /// Condensed display sans.
    Strong,
    /// Brush script.
    Hand,
}

/// Generic family used when none of a class's named families is installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Cursive,
}

impl FontFamily {
    /// Named families to try, in order, before falling back to [`FontFamily::generic`].
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            FontFamily::Serif => &[
                "Noto Serif SC",
                "Noto Serif CJK SC",
                "Source Han Serif SC",
                "Songti SC",
            ],
            FontFamily::Sans => &[
                "Noto Sans SC",
                "Noto Sans CJK SC",
                "Source Han Sans SC",
                "PingFang SC",
            ],
            FontFamily::Georgia => &["Georgia"],
            FontFamily::Rounded => &[
                "Quicksand",
                "M PLUS Rounded 1c",
                "Arial Rounded MT Bold",
            ],
            FontFamily::Modern => &["Montserrat", "PingFang SC"],
            FontFamily::Elegant => &["Playfair Display"],
            FontFamily::Strong => &["Bebas Neue", "Impact"],
            FontFamily::Hand => &["Pacifico"],
        }
    }

    pub fn generic(self) -> GenericFamily {
        match self {
            FontFamily::Serif | FontFamily::Georgia | FontFamily::Elegant => GenericFamily::Serif,
            FontFamily::Hand => GenericFamily::Cursive,
            FontFamily::Sans | FontFamily::Rounded | FontFamily::Modern | FontFamily::Strong => {
                GenericFamily::SansSerif
            }
        }
    }
}

/// CSS-style numeric font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const REGULAR: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);
    /// Heaviest tier; every highlighted run is measured and drawn at this weight.
    pub const BLACK: FontWeight = FontWeight(900);
}

/// A fully specified font: family class, weight, style and pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub italic: bool,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: FontFamily, weight: FontWeight, size: f32) -> Self {
        Self {
            family,
            weight,
            italic: false,
            size,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Metrics provider: rendered advance width of a single grapheme.
pub trait TextMeasure {
    /// Advance width in pixels of `grapheme` set in `font`.
    fn advance(&mut self, font: &FontSpec, grapheme: &str) -> f32;

    /// Advance width of a whole string, as the sum of its graphemes' advances.
    fn measure(&mut self, font: &FontSpec, text: &str) -> f32 {
        use unicode_segmentation::UnicodeSegmentation;
        text.graphemes(true).map(|g| self.advance(font, g)).sum()
    }
}

/// Glyphs for one shaped string, positioned relative to the top-left of its line box.
#[derive(Clone)]
pub struct ShapedText {
    /// Face the glyph ids belong to.
    pub font: vello_cpu::peniko::FontData,
    /// Pixel size the glyphs were shaped at.
    pub size: f32,
    /// Positioned glyphs; `y` is the baseline offset from the line top.
    pub glyphs: Vec<vello_cpu::Glyph>,
    /// Total advance width.
    pub width: f32,
}

impl std::fmt::Debug for ShapedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedText")
            .field("size", &self.size)
            .field("glyph_count", &self.glyphs.len())
            .field("width", &self.width)
            .finish()
    }
}

/// Metrics provider that can also produce drawable glyphs.
pub trait GlyphSource: TextMeasure {
    /// Shape `text` in `font`. `None` means no face is available and nothing is drawn.
    fn shape(&mut self, font: &FontSpec, text: &str) -> Option<ShapedText>;
}

/// Font-free metrics: every terminal column is half an em wide.
///
/// CJK ideographs and other wide graphemes span two columns (one em), Latin letters one column.
/// Deterministic and independent of installed fonts, so it backs layout-only previews and
/// tests. It never produces glyphs.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellMetrics;

impl TextMeasure for CellMetrics {
    fn advance(&mut self, font: &FontSpec, grapheme: &str) -> f32 {
        cell_advance(font.size, grapheme)
    }
}

impl GlyphSource for CellMetrics {
    fn shape(&mut self, _font: &FontSpec, _text: &str) -> Option<ShapedText> {
        None
    }
}

pub(crate) fn cell_advance(size: f32, grapheme: &str) -> f32 {
    if grapheme.is_empty() {
        return 0.0;
    }
    let columns = UnicodeWidthStr::width(grapheme).max(1);
    columns as f32 * size * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
