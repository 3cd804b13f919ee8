//! JSON job files for the carousel and banner renderers.
//!
//! Jobs are parsed with serde, every field has a default, and [`CarouselProject::validate`] /
//! [`BannerProject::validate`] check the numeric ranges serde cannot express. Colors are
//! validated while parsing.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    foundation::{
        core::{Rgba8, Vec2},
        error::{CoverError, CoverResult},
    },
    layout::template::{Palette, TemplateId},
    render::{
        banner::{BannerFont, BannerOptions},
        page::PageStyle,
    },
};

/// Largest accepted carousel font scale.
pub const MAX_FONT_SCALE: f32 = 4.0;

/// A multi-page carousel job.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselProject {
    pub title: String,
    /// Body text; `\n` separates paragraphs and `[...]` marks highlights.
    pub content: String,
    /// Background photos, relative to the job file unless absolute.
    pub images: Vec<PathBuf>,
    pub style: CarouselStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselStyle {
    pub template: TemplateId,
    /// Overrides the template's preset when set.
    pub bg_color: Option<Rgba8>,
    pub text_color: Option<Rgba8>,
    pub highlight_color: Option<Rgba8>,
    pub font_scale: f32,
    pub top_tag: String,
    pub author: String,
    /// Signature date on the quote card; the CLI fills in today when absent.
    pub date: Option<String>,
}

impl Default for CarouselStyle {
    fn default() -> Self {
        Self {
            template: TemplateId::default(),
            bg_color: None,
            text_color: None,
            highlight_color: None,
            font_scale: 1.0,
            top_tag: String::new(),
            author: String::new(),
            date: None,
        }
    }
}

impl CarouselStyle {
    /// Template preset with this job's color overrides applied.
    pub fn palette(&self) -> Palette {
        let preset = self.template.template().preset;
        Palette {
            background: self.bg_color.unwrap_or(preset.background),
            text: self.text_color.unwrap_or(preset.text),
            highlight: self.highlight_color.unwrap_or(preset.highlight),
        }
    }

    /// Page style for rendering; `today` stands in for a missing date.
    pub fn page_style(&self, today: &str) -> PageStyle {
        PageStyle {
            palette: self.palette(),
            top_tag: self.top_tag.clone(),
            author: self.author.clone(),
            date: self.date.clone().unwrap_or_else(|| today.to_string()),
        }
    }
}

impl CarouselProject {
    /// Parse a carousel job from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CoverResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CoverError::serde(format!("parse carousel job JSON: {e}")))
    }

    /// Parse a carousel job from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CoverResult<Self> {
        Self::from_reader(open_job(path.as_ref())?)
    }

    pub fn validate(&self) -> CoverResult<()> {
        let scale = self.style.font_scale;
        if !scale.is_finite() || scale <= 0.0 || scale > MAX_FONT_SCALE {
            return Err(CoverError::validation(format!(
                "style.font_scale must be in (0, {MAX_FONT_SCALE}], got {scale}"
            )));
        }
        if self.images.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(CoverError::validation("images must not contain empty paths"));
        }
        Ok(())
    }

    /// Image paths resolved against `base_dir`.
    pub fn image_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.images.iter().map(|p| resolve(base_dir, p)).collect()
    }
}

/// A single-image banner job.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerProject {
    /// Photo behind the text, relative to the job file unless absolute.
    pub image: Option<PathBuf>,
    pub title: String,
    pub subtitle: String,
    pub style: BannerStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerStyle {
    pub font_style: BannerFont,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub text_color: Rgba8,
    pub shadow: bool,
    pub text_y_offset: f32,
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for BannerStyle {
    fn default() -> Self {
        let opts = BannerOptions::default();
        Self {
            font_style: opts.font,
            title_size: opts.title_size,
            subtitle_size: opts.subtitle_size,
            text_color: opts.text_color,
            shadow: opts.shadow,
            text_y_offset: opts.text_y_offset,
            zoom: opts.zoom,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl BannerProject {
    /// Parse a banner job from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CoverResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CoverError::serde(format!("parse banner job JSON: {e}")))
    }

    /// Parse a banner job from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CoverResult<Self> {
        Self::from_reader(open_job(path.as_ref())?)
    }

    pub fn validate(&self) -> CoverResult<()> {
        let s = &self.style;
        for (name, v) in [
            ("style.title_size", s.title_size),
            ("style.subtitle_size", s.subtitle_size),
            ("style.zoom", s.zoom),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(CoverError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("style.text_y_offset", s.text_y_offset),
            ("style.offset_x", s.offset_x),
            ("style.offset_y", s.offset_y),
        ] {
            if !v.is_finite() {
                return Err(CoverError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    /// Rendering options; `guides` only affects previews.
    pub fn options(&self, guides: bool) -> BannerOptions {
        let s = &self.style;
        BannerOptions {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            font: s.font_style,
            title_size: s.title_size,
            subtitle_size: s.subtitle_size,
            text_color: s.text_color,
            shadow: s.shadow,
            text_y_offset: s.text_y_offset,
            zoom: s.zoom,
            offset: Vec2::new(f64::from(s.offset_x), f64::from(s.offset_y)),
            guides,
        }
    }

    /// Image path resolved against `base_dir`.
    pub fn image_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.image.as_deref().map(|p| resolve(base_dir, p))
    }
}

fn open_job(path: &Path) -> CoverResult<BufReader<File>> {
    let f = File::open(path)
        .map_err(|e| CoverError::validation(format!("open job JSON '{}': {e}", path.display())))?;
    Ok(BufReader::new(f))
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
#[path = "../tests/unit/project.rs"]
mod tests;
