use crate::{
    assets::decode::ImageHandle,
    foundation::core::{Point, Rect, Rgba8, Vec2},
    text::metrics::{FontSpec, GlyphSource},
};

/// Horizontal anchor of a text run relative to its `x` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text run relative to its `y` coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    /// `y` is the top of the line box.
    Top,
    /// `y` is the vertical middle of the em box.
    Middle,
}

/// Complete style for one text draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Rgba8,
    pub align: Align,
    pub baseline: Baseline,
}

impl TextStyle {
    pub fn new(font: FontSpec, color: Rgba8) -> Self {
        Self {
            font,
            color,
            align: Align::Left,
            baseline: Baseline::Top,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Drawing primitives over one render context.
///
/// Every call takes its full style; the painter keeps no current color, font or transform
/// between calls. `base` maps drawing coordinates into the context and is fixed for the
/// painter's lifetime.
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    base: vello_cpu::kurbo::Affine,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(ctx: &'a mut vello_cpu::RenderContext) -> Self {
        Self {
            ctx,
            base: vello_cpu::kurbo::Affine::IDENTITY,
        }
    }

    fn with_base(ctx: &'a mut vello_cpu::RenderContext, base: kurbo::Affine) -> Self {
        Self {
            ctx,
            base: affine_to_cpu(base),
        }
    }

    fn place(&mut self, transform: vello_cpu::kurbo::Affine) {
        self.ctx.set_transform(self.base * transform);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn solid(&mut self, color: Rgba8) {
        self.place(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.solid(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub fn fill_path(&mut self, path: &kurbo::BezPath, color: Rgba8) {
        self.solid(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn stroke_path(&mut self, path: &kurbo::BezPath, stroke: &kurbo::Stroke, color: Rgba8) {
        self.solid(color);
        self.ctx.set_stroke(stroke_to_cpu(stroke));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.fill_path(&circle_path(center, radius), color);
    }

    pub fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        self.fill_path(&round_rect_path(rect, radius), color);
    }

    /// Run `draw` inside a layer composited at `alpha`.
    pub fn with_opacity(&mut self, alpha: f32, draw: impl FnOnce(&mut Painter<'_>)) {
        if alpha >= 1.0 {
            draw(self);
            return;
        }
        self.ctx.push_opacity_layer(alpha.max(0.0));
        draw(self);
        self.ctx.pop_layer();
    }

    /// Draw `image` stretched over `dest` at `opacity`.
    pub fn draw_image(&mut self, image: &ImageHandle, dest: Rect, opacity: f32) {
        let sx = dest.width() / f64::from(image.width());
        let sy = dest.height() / f64::from(image.height());
        let transform = vello_cpu::kurbo::Affine::new([sx, 0.0, 0.0, sy, dest.x0, dest.y0]);
        let size = vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width()),
            f64::from(image.height()),
        );
        self.with_opacity(opacity, |p| {
            p.place(transform);
            p.ctx.set_paint(image.paint());
            p.ctx.fill_rect(&size);
        });
    }

    /// Shape and draw `text`; returns its advance width.
    ///
    /// When the glyph source has no face for the style nothing is drawn and the width is
    /// measured instead.
    pub fn text<G: GlyphSource + ?Sized>(
        &mut self,
        glyphs: &mut G,
        text: &str,
        at: Point,
        style: &TextStyle,
    ) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let Some(shaped) = glyphs.shape(&style.font, text) else {
            return glyphs.measure(&style.font, text);
        };

        let dx = match style.align {
            Align::Left => 0.0,
            Align::Center => f64::from(shaped.width) / 2.0,
            Align::Right => f64::from(shaped.width),
        };
        let dy = match style.baseline {
            Baseline::Top => 0.0,
            Baseline::Middle => f64::from(shaped.size) / 2.0,
        };

        self.place(vello_cpu::kurbo::Affine::translate((at.x - dx, at.y - dy)));
        self.ctx.set_paint(color_to_cpu(style.color));
        self.ctx
            .glyph_run(&shaped.font)
            .font_size(shaped.size)
            .fill_glyphs(shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            }));
        shaped.width
    }
}

/// Run `draw` into a transparent offscreen context of `width`×`height` and return the pixels.
///
/// `transform` maps drawing coordinates into the offscreen frame. Returns `None` for sizes a
/// pixmap cannot hold.
pub(crate) fn offscreen(
    width: u32,
    height: u32,
    transform: kurbo::Affine,
    draw: impl FnOnce(&mut Painter<'_>),
) -> Option<vello_cpu::Pixmap> {
    let w: u16 = width.try_into().ok()?;
    let h: u16 = height.try_into().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw(&mut Painter::with_base(&mut ctx, transform));
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Some(pixmap)
}

pub(crate) fn circle_path(center: Point, radius: f64) -> kurbo::BezPath {
    use kurbo::Shape;
    kurbo::Circle::new(center, radius).to_path(0.1)
}

pub(crate) fn round_rect_path(rect: Rect, radius: f64) -> kurbo::BezPath {
    use kurbo::Shape;
    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    kurbo::RoundedRect::from_rect(rect, radius).to_path(0.1)
}

/// Destination rectangle that cover-fits a `src_w`×`src_h` image onto `frame`.
///
/// The image is scaled uniformly so both dimensions cover the frame, then centered; overflow
/// is cropped by the frame edges.
pub fn cover_fit(src_w: u32, src_h: u32, frame: Rect) -> Rect {
    let (iw, ih) = (f64::from(src_w), f64::from(src_h));
    let scale = (frame.width() / iw).max(frame.height() / ih);
    let (w, h) = (iw * scale, ih * scale);
    let origin = frame.center() - Vec2::new(w / 2.0, h / 2.0);
    Rect::from_origin_size(origin, (w, h))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn stroke_to_cpu(stroke: &kurbo::Stroke) -> vello_cpu::kurbo::Stroke {
    let join = match stroke.join {
        kurbo::Join::Bevel => vello_cpu::kurbo::Join::Bevel,
        kurbo::Join::Miter => vello_cpu::kurbo::Join::Miter,
        kurbo::Join::Round => vello_cpu::kurbo::Join::Round,
    };
    let cap = |c: kurbo::Cap| match c {
        kurbo::Cap::Butt => vello_cpu::kurbo::Cap::Butt,
        kurbo::Cap::Square => vello_cpu::kurbo::Cap::Square,
        kurbo::Cap::Round => vello_cpu::kurbo::Cap::Round,
    };
    vello_cpu::kurbo::Stroke::new(stroke.width)
        .with_join(join)
        .with_start_cap(cap(stroke.start_cap))
        .with_end_cap(cap(stroke.end_cap))
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
