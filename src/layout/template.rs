use std::{fmt, str::FromStr};

use crate::{
    foundation::{
        core::Rgba8,
        error::{CoverError, CoverResult},
    },
    text::metrics::{FontFamily, FontWeight},
};

/// The six fixed carousel templates.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Ins,
    Memo,
    #[default]
    Article,
    Book,
    Notes,
    Poster,
}

impl TemplateId {
    /// Every template, in catalog order.
    pub const ALL: [TemplateId; 6] = [
        TemplateId::Ins,
        TemplateId::Memo,
        TemplateId::Article,
        TemplateId::Book,
        TemplateId::Notes,
        TemplateId::Poster,
    ];

    /// Stable lowercase identifier used in job files.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Ins => "ins",
            TemplateId::Memo => "memo",
            TemplateId::Article => "article",
            TemplateId::Book => "book",
            TemplateId::Notes => "notes",
            TemplateId::Poster => "poster",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Ins => "INS 风语录",
            TemplateId::Memo => "备忘录",
            TemplateId::Article => "深度好文",
            TemplateId::Book => "古籍书页",
            TemplateId::Notes => "纯净笔记",
            TemplateId::Poster => "封面海报",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            TemplateId::Ins => "dreamy light orbs behind a translucent quote card",
            TemplateId::Memo => "notes-app look with a header bar and yellow highlight blocks",
            TemplateId::Article => "title and body share the first page, left aligned, for long reads",
            TemplateId::Book => "serif typesetting on paper grain, centered cover title",
            TemplateId::Notes => "minimal cover, colored highlights",
            TemplateId::Poster => "single cover page, body text ignored",
        }
    }

    /// The template's layout and style record.
    pub fn template(self) -> &'static Template {
        match self {
            TemplateId::Ins => &INS,
            TemplateId::Memo => &MEMO,
            TemplateId::Article => &ARTICLE,
            TemplateId::Book => &BOOK,
            TemplateId::Notes => &NOTES,
            TemplateId::Poster => &POSTER,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = CoverError;

    fn from_str(s: &str) -> CoverResult<Self> {
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoverError::validation(format!("unknown template '{s}'")))
    }
}

/// What the first page of a carousel holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstPage {
    /// Title-only cover; the body flows onto content pages.
    Cover,
    /// Title-only cover and nothing else; the body is ignored.
    SingleCover,
    /// Quote-card cover carrying the raw title; the body flows onto content pages.
    QuoteCover,
    /// Title plus as much body as fits.
    Mixed,
}

/// Fixed decoration drawn under the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    None,
    /// Notes-app navigation bar at the top of every page.
    MemoHeader,
    /// Scattered faint dots.
    PaperGrain,
    /// Gradient with blurred color orbs and a light vignette; replaces the background fill.
    DreamyBackdrop,
}

/// How highlighted tokens are painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightStyle {
    /// Filled block in the highlight color with black glyphs on top.
    InvertedBlock,
    /// Glyphs in the highlight color.
    ColoredText,
}

/// Background, text and highlight colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub background: Rgba8,
    pub text: Rgba8,
    pub highlight: Rgba8,
}

/// Immutable layout and style policy for one template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub first_page: FirstPage,
    pub body_family: FontFamily,
    /// Unscaled title size in pixels.
    pub title_size: f32,
    /// Unscaled body size in pixels.
    pub body_size: f32,
    /// Body line height as a multiple of the body size.
    pub line_height: f32,
    pub title_weight: FontWeight,
    pub body_weight: FontWeight,
    /// Extra height taken from the first page's body budget.
    pub header_reservation: f32,
    pub decoration: Decoration,
    pub highlight_style: HighlightStyle,
    /// Colors used when a job does not set its own.
    pub preset: Palette,
}

impl Template {
    /// Whether cover pages carry the centered swipe hint.
    pub fn swipe_hint(&self) -> bool {
        matches!(self.first_page, FirstPage::Cover | FirstPage::SingleCover)
    }
}

/// Title line advance as a multiple of the title size.
pub const TITLE_LINE_HEIGHT: f32 = 1.3;
/// Vertical gap between the title block and the body.
pub const TITLE_GAP: f32 = 60.0;
/// Height kept free at the bottom of content pages for the page number.
pub const FOOTER_RESERVATION: f32 = 100.0;
/// Swipe hint shown on covers.
pub const SWIPE_HINT: &str = "--- 左滑查看更多 ---";

static INS: Template = Template {
    id: TemplateId::Ins,
    first_page: FirstPage::QuoteCover,
    body_family: FontFamily::Sans,
    title_size: 100.0,
    body_size: 42.0,
    line_height: 1.6,
    title_weight: FontWeight::BLACK,
    body_weight: FontWeight::MEDIUM,
    header_reservation: 0.0,
    decoration: Decoration::DreamyBackdrop,
    highlight_style: HighlightStyle::ColoredText,
    preset: Palette {
        background: Rgba8::hex(0xFFFFFF),
        text: Rgba8::hex(0x1F1F1F),
        highlight: Rgba8::hex(0x000000),
    },
};

static MEMO: Template = Template {
    id: TemplateId::Memo,
    first_page: FirstPage::Mixed,
    body_family: FontFamily::Sans,
    title_size: 100.0,
    body_size: 42.0,
    line_height: 1.8,
    title_weight: FontWeight::BOLD,
    body_weight: FontWeight::REGULAR,
    header_reservation: 100.0,
    decoration: Decoration::MemoHeader,
    highlight_style: HighlightStyle::InvertedBlock,
    preset: Palette {
        background: Rgba8::hex(0xFFFFFF),
        text: Rgba8::hex(0x000000),
        highlight: Rgba8::hex(0xFDE047),
    },
};

static ARTICLE: Template = Template {
    id: TemplateId::Article,
    first_page: FirstPage::Mixed,
    body_family: FontFamily::Serif,
    title_size: 100.0,
    body_size: 42.0,
    line_height: 1.6,
    title_weight: FontWeight::BLACK,
    body_weight: FontWeight::MEDIUM,
    header_reservation: 0.0,
    decoration: Decoration::None,
    highlight_style: HighlightStyle::ColoredText,
    preset: Palette {
        background: Rgba8::hex(0xFFFFFF),
        text: Rgba8::hex(0x000000),
        highlight: Rgba8::hex(0xD32F2F),
    },
};

static BOOK: Template = Template {
    id: TemplateId::Book,
    first_page: FirstPage::Cover,
    body_family: FontFamily::Serif,
    title_size: 120.0,
    body_size: 48.0,
    line_height: 1.8,
    title_weight: FontWeight::BLACK,
    body_weight: FontWeight::MEDIUM,
    header_reservation: 0.0,
    decoration: Decoration::PaperGrain,
    highlight_style: HighlightStyle::ColoredText,
    preset: Palette {
        background: Rgba8::hex(0xF9F7F1),
        text: Rgba8::hex(0x2C2C2C),
        highlight: Rgba8::hex(0x8B0000),
    },
};

static NOTES: Template = Template {
    id: TemplateId::Notes,
    first_page: FirstPage::Cover,
    body_family: FontFamily::Sans,
    title_size: 100.0,
    body_size: 42.0,
    line_height: 1.6,
    title_weight: FontWeight::BLACK,
    body_weight: FontWeight::MEDIUM,
    header_reservation: 0.0,
    decoration: Decoration::None,
    highlight_style: HighlightStyle::ColoredText,
    preset: Palette {
        background: Rgba8::hex(0xFFFFFF),
        text: Rgba8::hex(0x333333),
        highlight: Rgba8::hex(0xFF2442),
    },
};

static POSTER: Template = Template {
    id: TemplateId::Poster,
    first_page: FirstPage::SingleCover,
    body_family: FontFamily::Sans,
    title_size: 100.0,
    body_size: 42.0,
    line_height: 1.6,
    title_weight: FontWeight::BLACK,
    body_weight: FontWeight::MEDIUM,
    header_reservation: 0.0,
    decoration: Decoration::None,
    highlight_style: HighlightStyle::ColoredText,
    preset: Palette {
        background: Rgba8::hex(0xF5F5F5),
        text: Rgba8::hex(0x000000),
        highlight: Rgba8::hex(0xFF0000),
    },
};

#[cfg(test)]
#[path = "../../tests/unit/layout/template.rs"]
mod tests;
