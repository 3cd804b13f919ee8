use super::*;
use crate::{
    foundation::core::Canvas,
    render::surface::Surface,
    text::metrics::{CellMetrics, FontFamily, FontWeight},
};

fn pixel(s: &Surface, x: u32, y: u32) -> [u8; 4] {
    let data = s.premul_rgba8().unwrap();
    let i = ((y * s.canvas().width + x) * 4) as usize;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

#[test]
fn cover_fit_crops_the_long_side() {
    let frame = Rect::new(0.0, 0.0, 200.0, 200.0);
    let wide = cover_fit(100, 50, frame);
    assert_eq!(wide, Rect::new(-100.0, 0.0, 300.0, 200.0));

    let tall = cover_fit(50, 100, frame);
    assert_eq!(tall, Rect::new(0.0, -100.0, 200.0, 300.0));
}

#[test]
fn cover_fit_respects_frame_origin() {
    let frame = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(cover_fit(4, 4, frame), frame);
}

#[test]
fn fill_rect_covers_only_its_area() {
    let mut s = Surface::new(Canvas::new(8, 4));
    s.paint(|p| p.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::rgb(255, 0, 0)));
    assert_eq!(pixel(&s, 1, 1), [255, 0, 0, 255]);
    assert_eq!(pixel(&s, 6, 1), [0, 0, 0, 0]);
}

#[test]
fn opacity_layer_scales_alpha() {
    let mut s = Surface::new(Canvas::new(4, 4));
    let full = s.canvas().rect();
    s.paint(|p| p.with_opacity(0.5, |p| p.fill_rect(full, Rgba8::WHITE)));
    let a = pixel(&s, 2, 2)[3];
    assert!((i32::from(a) - 128).abs() <= 2, "alpha {a}");
}

#[test]
fn later_fills_draw_on_top() {
    let mut s = Surface::new(Canvas::new(4, 4));
    let full = s.canvas().rect();
    s.paint(|p| {
        p.fill_rect(full, Rgba8::rgb(255, 0, 0));
        p.fill_rect(full, Rgba8::rgb(0, 255, 0));
    });
    assert_eq!(pixel(&s, 0, 3), [0, 255, 0, 255]);
}

#[test]
fn draw_image_stretches_over_destination() {
    let blue = ImageHandle::from_premul_rgba8(&[0, 0, 255, 255], 1, 1).unwrap();
    let mut s = Surface::new(Canvas::new(6, 6));
    let full = s.canvas().rect();
    s.paint(|p| p.draw_image(&blue, full, 1.0));
    assert_eq!(pixel(&s, 0, 0), [0, 0, 255, 255]);
    assert_eq!(pixel(&s, 5, 5), [0, 0, 255, 255]);
}

#[test]
fn text_without_glyphs_measures_and_draws_nothing() {
    let mut s = Surface::new(Canvas::new(16, 16));
    let style = TextStyle::new(
        FontSpec::new(FontFamily::Sans, FontWeight::REGULAR, 10.0),
        Rgba8::BLACK,
    );
    let mut width = 0.0;
    s.paint(|p| width = p.text(&mut CellMetrics, "中a", Point::ZERO, &style));
    assert_eq!(width, 15.0);
    assert!(s.premul_rgba8().unwrap().iter().all(|&b| b == 0));
}

#[test]
fn empty_text_has_no_width() {
    let mut s = Surface::new(Canvas::new(2, 2));
    let style = TextStyle::new(
        FontSpec::new(FontFamily::Sans, FontWeight::REGULAR, 10.0),
        Rgba8::BLACK,
    );
    let mut width = -1.0;
    s.paint(|p| width = p.text(&mut CellMetrics, "", Point::ZERO, &style));
    assert_eq!(width, 0.0);
}

#[test]
fn offscreen_rejects_unrepresentable_sizes() {
    assert!(offscreen(0, 4, kurbo::Affine::IDENTITY, |_| {}).is_none());
    assert!(offscreen(4, 70_000, kurbo::Affine::IDENTITY, |_| {}).is_none());
}

#[test]
fn offscreen_applies_its_transform() {
    let pixmap = offscreen(4, 4, kurbo::Affine::translate((-4.0, 0.0)), |p| {
        p.fill_rect(Rect::new(4.0, 0.0, 6.0, 4.0), Rgba8::WHITE);
    })
    .unwrap();
    let data = pixmap.data_as_u8_slice();
    assert_eq!(data[3], 255);
    assert_eq!(data[3 * 4 + 3], 0);
}

#[test]
fn round_rect_radius_is_clamped() {
    let rect = Rect::new(0.0, 0.0, 10.0, 4.0);
    use kurbo::Shape;
    let bounds = round_rect_path(rect, 100.0).bounding_box();
    assert!((bounds.width() - 10.0).abs() < 1e-6);
    assert!((bounds.height() - 4.0).abs() < 1e-6);
}
