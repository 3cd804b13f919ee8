//! Template decorations drawn beneath the text.

use crate::{
    assets::decode::ImageHandle,
    foundation::{
        core::{Canvas, Point, Rect, Rgba8},
        error::CoverResult,
        math::unit_noise,
    },
    render::paint::{Baseline, Painter, TextStyle, circle_path, cover_fit},
    text::metrics::{FontFamily, FontSpec, FontWeight, GlyphSource},
};

const GRAIN_SEED: u64 = 0x6772_6169_6e00_0001;
const GRAIN_DOTS: u64 = 3000;
const GRAIN_MAX_RADIUS: f64 = 1.5;
const GRAIN_ALPHA: f32 = 0.08;

const MEMO_ACCENT: Rgba8 = Rgba8::hex(0xEAB308);
const MEMO_LABEL: &str = "备忘录";

struct Orb {
    cx: f32,
    cy: f32,
    radius: f32,
    color: Rgba8,
}

/// Bottom edge of the memo header bar; body text starts below it.
pub fn memo_header_bottom(canvas: Canvas) -> f32 {
    canvas.height_f32() * 0.06 + 100.0
}

/// Notes-app navigation bar: back chevron, label, "more" and "share" icons.
pub fn draw_memo_header<G: GlyphSource + ?Sized>(
    painter: &mut Painter<'_>,
    glyphs: &mut G,
    canvas: Canvas,
) {
    let y = f64::from(canvas.height_f32() * 0.06);
    let x = f64::from(canvas.width_f32() * 0.06);
    let round = kurbo::Stroke::new(6.0)
        .with_caps(kurbo::Cap::Round)
        .with_join(kurbo::Join::Round);
    let thin = kurbo::Stroke::new(3.0);

    let mut chevron = kurbo::BezPath::new();
    chevron.move_to((x + 25.0, y));
    chevron.line_to((x, y + 25.0));
    chevron.line_to((x + 25.0, y + 50.0));
    painter.stroke_path(&chevron, &round, MEMO_ACCENT);

    let label = TextStyle::new(
        FontSpec::new(FontFamily::Sans, FontWeight::BOLD, 42.0),
        MEMO_ACCENT,
    )
    .baseline(Baseline::Middle);
    painter.text(glyphs, MEMO_LABEL, Point::new(x + 40.0, y + 25.0), &label);

    let rx = f64::from(canvas.width_f32()) - x;
    let more = circle_path(Point::new(rx - 25.0, y + 25.0), 24.0);
    painter.stroke_path(&more, &thin, MEMO_ACCENT);
    for dx in [38.0, 25.0, 12.0] {
        painter.fill_circle(Point::new(rx - dx, y + 25.0), 3.0, MEMO_ACCENT);
    }

    let sx = rx - 100.0;
    let mut share = kurbo::BezPath::new();
    share.move_to((sx - 20.0, y + 10.0));
    share.line_to((sx + 20.0, y + 10.0));
    share.line_to((sx + 20.0, y + 50.0));
    share.line_to((sx - 20.0, y + 50.0));
    share.close_path();
    share.move_to((sx, y + 30.0));
    share.line_to((sx, y - 10.0));
    share.line_to((sx - 10.0, y + 5.0));
    share.move_to((sx, y - 10.0));
    share.line_to((sx + 10.0, y + 5.0));
    painter.stroke_path(&share, &thin, MEMO_ACCENT);
}

/// Faint scattered dots, identical on every call.
pub fn draw_paper_grain(painter: &mut Painter<'_>, canvas: Canvas) {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    painter.with_opacity(GRAIN_ALPHA, |p| {
        for i in 0..GRAIN_DOTS {
            let center = Point::new(
                unit_noise(GRAIN_SEED, i, 0) * w,
                unit_noise(GRAIN_SEED, i, 1) * h,
            );
            let radius = unit_noise(GRAIN_SEED, i, 2) * GRAIN_MAX_RADIUS;
            p.fill_circle(center, radius, Rgba8::BLACK);
        }
    });
}

/// Soft diagonal gradient with four translucent color orbs and a light vignette.
pub fn draw_dreamy_backdrop(painter: &mut Painter<'_>, canvas: Canvas) {
    let Ok(image) = dreamy_backdrop_image(canvas) else {
        return;
    };
    painter.draw_image(&image, canvas.rect(), 1.0);
}

fn dreamy_backdrop_image(canvas: Canvas) -> CoverResult<ImageHandle> {
    let (w, h) = (canvas.width_f32(), canvas.height_f32());
    let stops = [
        (0.0f32, Rgba8::hex(0xE0F2FE)),
        (0.5, Rgba8::hex(0xF0F9FF)),
        (1.0, Rgba8::hex(0xDBEAFE)),
    ];
    let orbs = [
        Orb {
            cx: 0.2 * w,
            cy: 0.2 * h,
            radius: 300.0,
            color: Rgba8::hex(0xA5F3FC),
        },
        Orb {
            cx: 0.8 * w,
            cy: 0.3 * h,
            radius: 400.0,
            color: Rgba8::hex(0xE879F9),
        },
        Orb {
            cx: 0.5 * w,
            cy: 0.8 * h,
            radius: 350.0,
            color: Rgba8::hex(0x818CF8),
        },
        Orb {
            cx: 0.1 * w,
            cy: 0.9 * h,
            radius: 250.0,
            color: Rgba8::hex(0xF472B6),
        },
    ];
    let (vignette_inner, vignette_outer) = (0.3 * w, w);
    let diag = w * w + h * h;

    let mut data = Vec::with_capacity(canvas.width as usize * canvas.height as usize * 4);
    for yi in 0..canvas.height {
        let y = yi as f32 + 0.5;
        for xi in 0..canvas.width {
            let x = xi as f32 + 0.5;

            let t = ((x * w + y * h) / diag).clamp(0.0, 1.0);
            let mut px = gradient_at(&stops, t);

            for orb in &orbs {
                let d = ((x - orb.cx).powi(2) + (y - orb.cy).powi(2)).sqrt();
                if d < orb.radius {
                    let alpha = 0.4 * (1.0 - d / orb.radius);
                    px = over(px, rgb(orb.color), alpha);
                }
            }

            let d = ((x - w / 2.0).powi(2) + (y - h / 2.0).powi(2)).sqrt();
            let t = ((d - vignette_inner) / (vignette_outer - vignette_inner)).clamp(0.0, 1.0);
            if t > 0.0 {
                px = over(px, [255.0; 3], 0.6 * t);
            }

            data.extend(px.iter().map(|c| c.round().clamp(0.0, 255.0) as u8));
            data.push(255);
        }
    }
    ImageHandle::from_premul_rgba8(&data, canvas.width, canvas.height)
}

fn gradient_at(stops: &[(f32, Rgba8)], t: f32) -> [f32; 3] {
    let mut prev = stops[0];
    for &stop in stops {
        if t <= stop.0 {
            let span = stop.0 - prev.0;
            let f = if span > 0.0 { (t - prev.0) / span } else { 0.0 };
            return lerp(rgb(prev.1), rgb(stop.1), f);
        }
        prev = stop;
    }
    rgb(prev.1)
}

fn rgb(c: Rgba8) -> [f32; 3] {
    [f32::from(c.r), f32::from(c.g), f32::from(c.b)]
}

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn over(dst: [f32; 3], src: [f32; 3], alpha: f32) -> [f32; 3] {
    lerp(dst, src, alpha)
}

/// Cover-fit `image` over the whole frame at `opacity`.
pub fn draw_cover_image(painter: &mut Painter<'_>, image: &ImageHandle, frame: Rect, opacity: f32) {
    let dest = cover_fit(image.width(), image.height(), frame);
    painter.draw_image(image, dest, opacity);
}

#[cfg(test)]
#[path = "../../tests/unit/render/backdrop.rs"]
mod tests;
