//! Coverpress lays out and rasterizes social-media cover images.
//!
//! Text with `[...]` highlight markup is wrapped character by character (so CJK and Latin mix
//! freely), packed into fixed-size portrait pages by one of six templates, and painted on the
//! CPU. A second, simpler renderer produces single-image article banners.
//!
//! - Load a [`CarouselProject`] or [`BannerProject`]
//! - Lay it out with [`paginate`] (or [`layout_carousel`])
//! - Draw pages with [`render_page`] onto a [`Surface`], or export with [`export_carousel`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod layout;
pub(crate) mod pipeline;
pub(crate) mod project;
pub(crate) mod render;
pub(crate) mod text;

pub use crate::assets::decode::{ImageHandle, decode_image, load_image};
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{CoverError, CoverResult};
pub use crate::foundation::math::digest_u64;

pub use crate::text::fonts::FontBook;
pub use crate::text::markup::{Run, strip_markup, tokenize};
pub use crate::text::metrics::{
    CellMetrics, FontFamily, FontSpec, FontWeight, GenericFamily, GlyphSource, ShapedText,
    TextMeasure,
};
pub use crate::text::wrap::{Line, Token, WrapStyle, wrap_plain, wrap_text};

pub use crate::layout::context::{LayoutContext, SAFE_MARGIN};
pub use crate::layout::paginate::{
    Page, PageKind, PageSummary, content_page_budget, first_page_budget, paginate,
    paginate_lines,
};
pub use crate::layout::template::{
    Decoration, FOOTER_RESERVATION, FirstPage, HighlightStyle, Palette, SWIPE_HINT, TITLE_GAP,
    TITLE_LINE_HEIGHT, Template, TemplateId,
};

pub use crate::render::banner::{
    BANNER_BACKGROUND, BannerFont, BannerOptions, banner_image_rect, export_banner, render_banner,
};
pub use crate::render::blur::{Shadow, blur_rgba8_premul};
pub use crate::render::page::{BACKGROUND_IMAGE_OPACITY, PageStyle, render_page};
pub use crate::render::paint::{Align, Baseline, Painter, TextStyle, cover_fit};
pub use crate::render::surface::Surface;

pub use crate::pipeline::{
    BANNER_FILE_NAME, export_banner_job, export_carousel, layout_carousel, load_images,
    page_file_name, render_banner_job, render_carousel, render_carousel_with,
};
pub use crate::project::{
    BannerProject, BannerStyle, CarouselProject, CarouselStyle, MAX_FONT_SCALE,
};
