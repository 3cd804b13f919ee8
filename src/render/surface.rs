use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::{
        core::Canvas,
        error::{CoverError, CoverResult},
        math::digest_u64,
    },
    render::paint::Painter,
};

/// Fixed-size raster target.
///
/// A surface whose dimensions a pixmap cannot hold (zero, or wider or taller than `u16::MAX`)
/// has no drawing context: drawing into it is a silent no-op and it has no pixels.
pub struct Surface {
    canvas: Canvas,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl Surface {
    pub fn new(canvas: Canvas) -> Self {
        let dims = u16::try_from(canvas.width)
            .ok()
            .zip(u16::try_from(canvas.height).ok())
            .filter(|&(w, h)| w > 0 && h > 0);
        Self {
            canvas,
            pixmap: dims.map(|(w, h)| vello_cpu::Pixmap::new(w, h)),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Whether drawing calls have any effect.
    pub fn is_drawable(&self) -> bool {
        self.pixmap.is_some()
    }

    /// Run one drawing pass. The pass replaces the surface's previous contents.
    pub fn paint(&mut self, draw: impl FnOnce(&mut Painter<'_>)) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            tracing::debug!(
                width = self.canvas.width,
                height = self.canvas.height,
                "surface has no drawing context; skipping draw"
            );
            return;
        };

        let mut ctx = vello_cpu::RenderContext::new(pixmap.width(), pixmap.height());
        draw(&mut Painter::new(&mut ctx));
        ctx.flush();
        ctx.render_to_pixmap(pixmap);
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn premul_rgba8(&self) -> Option<&[u8]> {
        self.pixmap.as_ref().map(|p| p.data_as_u8_slice())
    }

    /// Straight-alpha RGBA8 pixels, row-major.
    pub fn to_rgba8(&self) -> Option<Vec<u8>> {
        let mut out = self.premul_rgba8()?.to_vec();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Some(out)
    }

    /// Digest of the premultiplied pixels, for comparing renders.
    pub fn digest(&self) -> Option<u64> {
        self.premul_rgba8().map(digest_u64)
    }

    /// Encode the surface to `path`; the format follows the extension (PNG when unknown).
    ///
    /// JPEG output drops the alpha channel.
    pub fn save(&self, path: &Path) -> CoverResult<()> {
        let rgba = self
            .to_rgba8()
            .ok_or_else(|| CoverError::render("surface has no pixels to encode"))?;
        let format =
            image::ImageFormat::from_path(path).unwrap_or(image::ImageFormat::Png);

        if format == image::ImageFormat::Jpeg {
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            image::save_buffer_with_format(
                path,
                &rgb,
                self.canvas.width,
                self.canvas.height,
                image::ColorType::Rgb8,
                format,
            )
            .with_context(|| format!("write '{}'", path.display()))?;
        } else {
            image::save_buffer_with_format(
                path,
                &rgba,
                self.canvas.width,
                self.canvas.height,
                image::ColorType::Rgba8,
                format,
            )
            .with_context(|| format!("write '{}'", path.display()))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .field("drawable", &self.is_drawable())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
