use super::*;
use crate::{foundation::core::Canvas, render::surface::Surface};

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn blur_rejects_bad_input() {
    assert!(blur_rgba8_premul(&[0; 7], 1, 2, 1, 1.0).is_err());
    assert!(blur_rgba8_premul(&[0; 8], 1, 2, 1, 0.0).is_err());
}

#[test]
fn shadow_is_offset_and_soft() {
    let mut s = Surface::new(Canvas::new(64, 64));
    let shape = Rect::new(20.0, 20.0, 40.0, 40.0);
    let shadow = Shadow {
        color: Rgba8::BLACK,
        blur: 8.0,
        offset: Vec2::new(0.0, 10.0),
    };
    s.paint(|p| shadow.draw(p, shape, |p, color| p.fill_rect(shape, color)));

    let data = s.premul_rgba8().unwrap();
    let alpha = |x: usize, y: usize| data[(y * 64 + x) * 4 + 3];
    assert!(alpha(30, 40) > 200, "shadow body is dense");
    assert!(alpha(30, 51) > 0, "shadow reaches past the offset edge");
    assert!(alpha(30, 51) < alpha(30, 40), "edge falls off");
    assert_eq!(alpha(0, 0), 0);
}
