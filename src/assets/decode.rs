use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    error::{CoverError, CoverResult},
    math::mul_div255_u8,
};

/// Decoded bitmap ready to be drawn.
///
/// Cloning is cheap and shares the pixels. Two handles compare equal only when they share the
/// same decoded pixels, so equality follows identity rather than content.
#[derive(Clone)]
pub struct ImageHandle {
    width: u32,
    height: u32,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl ImageHandle {
    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }

    /// Build a handle from premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(rgba8_premul: &[u8], width: u32, height: u32) -> CoverResult<Self> {
        let pixmap = pixmap_from_premul(rgba8_premul, width, height)?;
        Ok(Self {
            width,
            height,
            pixmap: Arc::new(pixmap),
        })
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixmap, &other.pixmap)
    }
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Decode PNG/JPEG/WebP/... bytes into a drawable handle.
pub fn decode_image(bytes: &[u8]) -> CoverResult<ImageHandle> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    ImageHandle::from_premul_rgba8(&rgba8_premul, width, height)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> CoverResult<ImageHandle> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        CoverError::Other(err) => {
            CoverError::Other(err.context(format!("decode image '{}'", path.display())))
        }
        other => other,
    })
}

fn pixmap_from_premul(rgba8_premul: &[u8], width: u32, height: u32) -> CoverResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CoverError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CoverError::validation("image height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(CoverError::validation("image has zero size"));
    }
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CoverError::validation("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
