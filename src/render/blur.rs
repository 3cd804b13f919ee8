use crate::{
    assets::decode::ImageHandle,
    foundation::{
        core::{Point, Rect, Rgba8, Vec2},
        error::{CoverError, CoverResult},
    },
    render::paint::{Painter, offscreen},
};

/// Separable Gaussian blur over premultiplied RGBA8, with Q16 fixed-point weights.
///
/// Edge pixels are clamped. `radius == 0` returns a copy.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CoverResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CoverError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(CoverError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CoverResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CoverError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

/// Canvas-style drop shadow: a blurred, offset copy of a shape in one color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Rgba8,
    /// Blur extent in pixels; the Gaussian sigma is half of it.
    pub blur: f64,
    pub offset: Vec2,
}

impl Shadow {
    /// Paint the shadow of whatever `shape` draws inside `bounds`.
    ///
    /// `shape` is rendered offscreen in the shadow color at reduced resolution, blurred, then
    /// drawn back scaled up and offset. Large blurs are computed on a downsampled mask, which
    /// is indistinguishable once blurred.
    pub fn draw(
        &self,
        painter: &mut Painter<'_>,
        bounds: Rect,
        shape: impl FnOnce(&mut Painter<'_>, Rgba8),
    ) {
        let sigma = (self.blur / 2.0).max(0.5);
        let factor = (sigma / 4.0).floor().clamp(1.0, 8.0);
        let pad = (3.0 * sigma).ceil();

        let width = ((bounds.width() + 2.0 * pad) / factor).ceil().max(1.0) as u32;
        let height = ((bounds.height() + 2.0 * pad) / factor).ceil().max(1.0) as u32;
        let transform = kurbo::Affine::scale(1.0 / factor)
            * kurbo::Affine::translate((pad - bounds.x0, pad - bounds.y0));

        let color = self.color;
        let Some(mask) = offscreen(width, height, transform, |p| shape(p, color)) else {
            return;
        };

        let scaled_sigma = (sigma / factor) as f32;
        let radius = (3.0 * sigma / factor).ceil() as u32;
        let Ok(blurred) =
            blur_rgba8_premul(mask.data_as_u8_slice(), width, height, radius, scaled_sigma)
        else {
            return;
        };
        let Ok(handle) = ImageHandle::from_premul_rgba8(&blurred, width, height) else {
            return;
        };

        let origin = Point::new(bounds.x0 - pad, bounds.y0 - pad) + self.offset;
        let dest = Rect::from_origin_size(
            origin,
            (f64::from(width) * factor, f64::from(height) * factor),
        );
        painter.draw_image(&handle, dest, 1.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
