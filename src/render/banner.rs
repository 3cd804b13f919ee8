use crate::{
    assets::decode::ImageHandle,
    foundation::core::{Point, Rect, Rgba8, Vec2},
    render::{
        blur::Shadow,
        paint::{Align, Baseline, Painter, TextStyle},
        surface::Surface,
    },
    text::metrics::{FontFamily, FontSpec, FontWeight, GlyphSource},
};

/// Banner background behind and around the photo.
pub const BANNER_BACKGROUND: Rgba8 = Rgba8::hex(0xF3F4F6);
const SAFE_ZONE_LABEL: &str = "1:1 Safe Zone";
const DASH: f64 = 15.0;

/// Font palette offered for banner text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerFont {
    #[default]
    Round,
    Modern,
    Elegant,
    Strong,
    Hand,
    Serif,
}

impl BannerFont {
    pub fn family(self) -> FontFamily {
        match self {
            BannerFont::Round => FontFamily::Rounded,
            BannerFont::Modern => FontFamily::Modern,
            BannerFont::Elegant => FontFamily::Elegant,
            BannerFont::Strong => FontFamily::Strong,
            BannerFont::Hand => FontFamily::Hand,
            BannerFont::Serif => FontFamily::Serif,
        }
    }

    /// Size multiplier; the condensed display face is set larger.
    pub fn size_factor(self) -> f32 {
        match self {
            BannerFont::Strong => 1.2,
            _ => 1.0,
        }
    }
}

/// Everything that shapes one banner frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BannerOptions {
    pub title: String,
    pub subtitle: String,
    pub font: BannerFont,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub text_color: Rgba8,
    pub shadow: bool,
    /// Vertical text shift in units of `width / 500`.
    pub text_y_offset: f32,
    /// Extra magnification on top of cover-fit.
    pub zoom: f32,
    /// Image pan in canvas pixels.
    pub offset: Vec2,
    /// Draw composition guides (preview only).
    pub guides: bool,
}

impl Default for BannerOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            font: BannerFont::Round,
            title_size: 80.0,
            subtitle_size: 32.0,
            text_color: Rgba8::WHITE,
            shadow: true,
            text_y_offset: 0.0,
            zoom: 1.0,
            offset: Vec2::ZERO,
            guides: true,
        }
    }
}

impl BannerOptions {
    /// Text drop shadow, contrasting with the text color.
    pub fn text_shadow(&self, width: f64) -> Shadow {
        let color = if self.text_color == Rgba8::BLACK {
            Rgba8::WHITE.with_alpha(0.5)
        } else {
            Rgba8::BLACK.with_alpha(0.7)
        };
        Shadow {
            color,
            blur: width * 0.02,
            offset: Vec2::new(0.0, width * 0.002),
        }
    }
}

/// Destination of the photo: cover-fit scaled by `zoom`, centered, then panned by `offset`.
pub fn banner_image_rect(image_w: u32, image_h: u32, frame: Rect, zoom: f32, offset: Vec2) -> Rect {
    let (iw, ih) = (f64::from(image_w), f64::from(image_h));
    let scale = (frame.width() / iw).max(frame.height() / ih) * f64::from(zoom);
    let (w, h) = (iw * scale, ih * scale);
    let origin = frame.center() - Vec2::new(w / 2.0, h / 2.0) + offset;
    Rect::from_origin_size(origin, (w, h))
}

/// Paint the banner onto `surface`, replacing its contents.
#[tracing::instrument(skip_all, fields(has_image = image.is_some(), guides = opts.guides))]
pub fn render_banner<G: GlyphSource + ?Sized>(
    surface: &mut Surface,
    image: Option<&ImageHandle>,
    opts: &BannerOptions,
    glyphs: &mut G,
) {
    let frame = surface.canvas().rect();
    surface.paint(|p| {
        p.fill_rect(frame, BANNER_BACKGROUND);

        if let Some(image) = image {
            let dest = banner_image_rect(image.width(), image.height(), frame, opts.zoom, opts.offset);
            p.draw_image(image, dest, 1.0);
        }

        if !opts.title.is_empty() || !opts.subtitle.is_empty() {
            draw_banner_text(p, glyphs, frame, opts);
        }

        if opts.guides {
            draw_guides(p, glyphs, frame);
        }
    });
}

/// Render the banner for export: identical to [`render_banner`] but never draws guides.
pub fn export_banner<G: GlyphSource + ?Sized>(
    surface: &mut Surface,
    image: Option<&ImageHandle>,
    opts: &BannerOptions,
    glyphs: &mut G,
) {
    let opts = BannerOptions {
        guides: false,
        ..opts.clone()
    };
    render_banner(surface, image, &opts, glyphs);
}

fn draw_banner_text<G: GlyphSource + ?Sized>(
    painter: &mut Painter<'_>,
    glyphs: &mut G,
    frame: Rect,
    opts: &BannerOptions,
) {
    let family = opts.font.family();
    let factor = opts.font.size_factor();
    let title_font = FontSpec::new(family, FontWeight::BOLD, opts.title_size * factor);
    let subtitle_font = FontSpec::new(family, FontWeight::REGULAR, opts.subtitle_size * factor);

    let has_title = !opts.title.is_empty();
    let has_subtitle = !opts.subtitle.is_empty();
    let title_size = f64::from(opts.title_size);
    let subtitle_size = f64::from(opts.subtitle_size);
    let gap = if has_subtitle { title_size * 0.35 } else { 0.0 };
    let total = if has_title { title_size } else { 0.0 }
        + gap
        + if has_subtitle { subtitle_size } else { 0.0 };

    let width = frame.width();
    let center_x = frame.center().x;
    let top = frame.center().y - total / 2.0 + f64::from(opts.text_y_offset) * (width / 500.0);

    let title_at = Point::new(center_x, top + title_size / 2.0);
    let subtitle_top = if has_title { top + title_size + gap } else { top };
    let subtitle_at = Point::new(center_x, subtitle_top + subtitle_size / 2.0);

    let draw = |p: &mut Painter<'_>, glyphs: &mut G, color: Rgba8| {
        if has_title {
            let style = TextStyle::new(title_font, color)
                .align(Align::Center)
                .baseline(Baseline::Middle);
            p.text(glyphs, &opts.title, title_at, &style);
        }
        if has_subtitle {
            let style = TextStyle::new(subtitle_font, color)
                .align(Align::Center)
                .baseline(Baseline::Middle);
            p.text(glyphs, &opts.subtitle, subtitle_at, &style);
        }
    };

    if opts.shadow {
        let text_w = f64::from(
            glyphs
                .measure(&title_font, &opts.title)
                .max(glyphs.measure(&subtitle_font, &opts.subtitle)),
        );
        let half_h = total.max(title_size) * f64::from(factor) / 2.0 + 8.0;
        let mid = top + total / 2.0;
        let bounds = Rect::new(
            center_x - text_w / 2.0 - 8.0,
            mid - half_h,
            center_x + text_w / 2.0 + 8.0,
            mid + half_h,
        )
        .intersect(frame.inflate(width * 0.05, width * 0.05));
        if bounds.area() > 0.0 {
            opts.text_shadow(width)
                .draw(painter, bounds, |p, color| draw(p, glyphs, color));
        }
    }
    draw(painter, glyphs, opts.text_color);
}

fn draw_guides<G: GlyphSource + ?Sized>(painter: &mut Painter<'_>, glyphs: &mut G, frame: Rect) {
    let (w, h) = (frame.width(), frame.height());
    let thirds = Rgba8::WHITE.with_alpha(0.4);
    let stroke = kurbo::Stroke::new(2.0);
    for t in [0.33, 0.66] {
        let mut v = kurbo::BezPath::new();
        v.move_to((w * t, 0.0));
        v.line_to((w * t, h));
        painter.stroke_path(&v, &stroke, thirds);

        let mut hz = kurbo::BezPath::new();
        hz.move_to((0.0, h * t));
        hz.line_to((w, h * t));
        painter.stroke_path(&hz, &stroke, thirds);
    }

    let square_x = (w - h) / 2.0;
    let square = Rect::new(square_x, 0.0, square_x + h, h);
    painter.stroke_path(
        &dashed_rect_path(square, DASH, DASH),
        &kurbo::Stroke::new(1.0),
        Rgba8::rgb(255, 215, 0).with_alpha(0.6),
    );

    let label = TextStyle::new(
        FontSpec::new(FontFamily::Sans, FontWeight::BOLD, 24.0),
        Rgba8::rgb(255, 215, 0).with_alpha(0.8),
    )
    .baseline(Baseline::Middle);
    painter.text(glyphs, SAFE_ZONE_LABEL, Point::new(square_x + 20.0, 40.0 - 12.0), &label);
}

/// Outline of `rect` as separate dash segments, walking clockwise from the top-left corner.
///
/// The dash pattern continues across corners.
pub(crate) fn dashed_rect_path(rect: Rect, on: f64, off: f64) -> kurbo::BezPath {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    let mut path = kurbo::BezPath::new();
    if on <= 0.0 || off < 0.0 {
        return path;
    }

    let period = on + off;
    let mut phase = 0.0f64;
    for i in 0..4 {
        let (a, b) = (corners[i], corners[(i + 1) % 4]);
        let len = a.distance(b);
        let mut s = 0.0;
        while s < len {
            let in_period = phase % period;
            let step = if in_period < on {
                on - in_period
            } else {
                period - in_period
            };
            let end = (s + step).min(len);
            if in_period < on {
                path.move_to(a.lerp(b, s / len));
                path.line_to(a.lerp(b, end / len));
            }
            phase += end - s;
            s = end;
        }
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/banner.rs"]
mod tests;
