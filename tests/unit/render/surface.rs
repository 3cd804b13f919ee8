use super::*;
use crate::foundation::core::{Rect, Rgba8};

fn pixel(s: &Surface, x: u32, y: u32) -> [u8; 4] {
    let data = s.premul_rgba8().unwrap();
    let i = ((y * s.canvas().width + x) * 4) as usize;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

#[test]
fn zero_sized_surface_is_a_silent_no_op() {
    let mut s = Surface::new(Canvas::new(0, 10));
    assert!(!s.is_drawable());

    let mut called = false;
    s.paint(|_| called = true);
    assert!(!called);
    assert!(s.premul_rgba8().is_none());
    assert!(s.digest().is_none());
}

#[test]
fn oversized_surface_has_no_context() {
    let s = Surface::new(Canvas::new(70_000, 10));
    assert!(!s.is_drawable());
    assert!(s.to_rgba8().is_none());
}

#[test]
fn new_surface_is_transparent() {
    let s = Surface::new(Canvas::new(3, 2));
    assert!(s.is_drawable());
    assert!(s.premul_rgba8().unwrap().iter().all(|&b| b == 0));
}

#[test]
fn later_paint_replaces_earlier_one() {
    let mut s = Surface::new(Canvas::new(8, 8));
    let full = s.canvas().rect();
    s.paint(|p| p.fill_rect(full, Rgba8::rgb(255, 0, 0)));
    assert_eq!(pixel(&s, 4, 4), [255, 0, 0, 255]);

    s.paint(|p| p.fill_rect(full, Rgba8::rgb(0, 0, 255)));
    assert_eq!(pixel(&s, 0, 0), [0, 0, 255, 255]);
    assert_eq!(pixel(&s, 7, 7), [0, 0, 255, 255]);
}

#[test]
fn digest_tracks_contents() {
    let mut a = Surface::new(Canvas::new(16, 16));
    let mut b = Surface::new(Canvas::new(16, 16));
    let rect = Rect::new(2.0, 2.0, 10.0, 10.0);
    a.paint(|p| p.fill_rect(rect, Rgba8::hex(0x336699)));
    b.paint(|p| p.fill_rect(rect, Rgba8::hex(0x336699)));
    assert_eq!(a.digest(), b.digest());

    b.paint(|p| p.fill_rect(rect, Rgba8::hex(0x336698)));
    assert_ne!(a.digest(), b.digest());
}

#[test]
fn to_rgba8_unpremultiplies() {
    let mut s = Surface::new(Canvas::new(4, 4));
    let full = s.canvas().rect();
    s.paint(|p| p.fill_rect(full, Rgba8::rgba(200, 100, 0, 128)));

    let premul = pixel(&s, 1, 1);
    assert!((i32::from(premul[0]) - 100).abs() <= 2);
    let straight = s.to_rgba8().unwrap();
    assert!((i32::from(straight[0]) - 200).abs() <= 3);
    assert!((i32::from(straight[1]) - 100).abs() <= 3);
    assert_eq!(straight[3], premul[3]);
}

#[test]
fn save_writes_png_and_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = Surface::new(Canvas::new(6, 5));
    let full = s.canvas().rect();
    s.paint(|p| p.fill_rect(full, Rgba8::rgb(10, 200, 30)));

    let png = dir.path().join("out.png");
    s.save(&png).unwrap();
    let img = image::open(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 5));
    assert_eq!(img.get_pixel(3, 2).0, [10, 200, 30, 255]);

    let jpg = dir.path().join("out.jpg");
    s.save(&jpg).unwrap();
    assert_eq!(image::open(&jpg).unwrap().to_rgb8().dimensions(), (6, 5));
}

#[test]
fn saving_without_pixels_fails() {
    let dir = tempfile::tempdir().unwrap();
    let s = Surface::new(Canvas::new(0, 0));
    let err = s.save(&dir.path().join("x.png")).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}
