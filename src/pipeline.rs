use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::decode::{ImageHandle, load_image},
    foundation::{
        core::Canvas,
        error::{CoverError, CoverResult},
    },
    layout::{
        context::LayoutContext,
        paginate::{Page, paginate},
    },
    project::{BannerProject, CarouselProject},
    render::{
        banner::{export_banner, render_banner},
        page::render_page,
        surface::Surface,
    },
    text::metrics::{GlyphSource, TextMeasure},
};

/// File name of the banner export.
pub const BANNER_FILE_NAME: &str = "banner.png";

/// File name of the `n`-th (1-based) exported carousel page.
pub fn page_file_name(n: usize) -> String {
    format!("cover_{n}.png")
}

/// Decode every image in order, failing on the first unreadable one.
pub fn load_images(paths: &[PathBuf]) -> CoverResult<Vec<ImageHandle>> {
    paths.iter().map(|p| load_image(p)).collect()
}

/// Validate `job` and paginate it onto `canvas`.
pub fn layout_carousel<M: TextMeasure + ?Sized>(
    measure: &mut M,
    job: &CarouselProject,
    images: &[ImageHandle],
    canvas: Canvas,
) -> CoverResult<(LayoutContext, Vec<Page>)> {
    job.validate()?;
    let template = job.style.template.template();
    let ctx = LayoutContext::new(canvas, template, job.style.font_scale);
    let pages = paginate(measure, &job.title, &job.content, template, &ctx, images);
    Ok((ctx, pages))
}

/// Paginate and render every page, handing each to `sink` before the next is drawn.
///
/// Each page gets a fresh surface. `sink` receives the 0-based page position.
#[tracing::instrument(
    skip(glyphs, job, images, today, sink),
    fields(template = %job.style.template, images = images.len())
)]
pub fn render_carousel_with<G: GlyphSource + ?Sized>(
    glyphs: &mut G,
    job: &CarouselProject,
    images: &[ImageHandle],
    today: &str,
    canvas: Canvas,
    mut sink: impl FnMut(usize, &Page, Surface) -> CoverResult<()>,
) -> CoverResult<usize> {
    let (ctx, pages) = layout_carousel(&mut *glyphs, job, images, canvas)?;
    let template = job.style.template.template();
    let style = job.style.page_style(today);

    for (i, page) in pages.iter().enumerate() {
        let mut surface = Surface::new(canvas);
        render_page(&mut surface, page, template, &ctx, &style, &mut *glyphs);
        sink(i, page, surface)?;
    }
    tracing::debug!(pages = pages.len(), "carousel rendered");
    Ok(pages.len())
}

/// Render every page of `job` into its own surface.
pub fn render_carousel<G: GlyphSource + ?Sized>(
    glyphs: &mut G,
    job: &CarouselProject,
    images: &[ImageHandle],
    today: &str,
    canvas: Canvas,
) -> CoverResult<Vec<(Page, Surface)>> {
    let mut out = Vec::new();
    render_carousel_with(glyphs, job, images, today, canvas, |_, page, surface| {
        out.push((page.clone(), surface));
        Ok(())
    })?;
    Ok(out)
}

/// Render and write every page as `cover_<n>.png` under `out_dir`, one page at a time.
pub fn export_carousel<G: GlyphSource + ?Sized>(
    glyphs: &mut G,
    job: &CarouselProject,
    images: &[ImageHandle],
    today: &str,
    out_dir: &Path,
) -> CoverResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory '{}'", out_dir.display()))?;

    let mut written = Vec::new();
    render_carousel_with(
        glyphs,
        job,
        images,
        today,
        Canvas::PORTRAIT,
        |i, _, surface| {
            let path = out_dir.join(page_file_name(i + 1));
            surface.save(&path)?;
            written.push(path);
            Ok(())
        },
    )?;
    Ok(written)
}

/// Render a banner job; `guides` adds the composition guides for previews.
#[tracing::instrument(skip(glyphs, job, image))]
pub fn render_banner_job<G: GlyphSource + ?Sized>(
    glyphs: &mut G,
    job: &BannerProject,
    image: Option<&ImageHandle>,
    canvas: Canvas,
    guides: bool,
) -> CoverResult<Surface> {
    job.validate()?;
    let mut surface = Surface::new(canvas);
    render_banner(&mut surface, image, &job.options(guides), glyphs);
    Ok(surface)
}

/// Render a banner job without guides and write it to `path`.
pub fn export_banner_job<G: GlyphSource + ?Sized>(
    glyphs: &mut G,
    job: &BannerProject,
    image: Option<&ImageHandle>,
    path: &Path,
) -> CoverResult<()> {
    job.validate()?;
    let mut surface = Surface::new(Canvas::BANNER);
    export_banner(&mut surface, image, &job.options(false), glyphs);
    if !surface.is_drawable() {
        return Err(CoverError::render("banner surface has no drawing context"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    surface.save(path)
}
