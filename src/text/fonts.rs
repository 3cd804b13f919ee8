use std::{borrow::Cow, collections::HashMap, path::Path};

use anyhow::Context;
use usvg::fontdb;

use crate::{
    foundation::error::{CoverError, CoverResult},
    text::metrics::{
        FontFamily, FontSpec, GenericFamily, GlyphSource, ShapedText, TextMeasure, cell_advance,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct FaceKey {
    family: FontFamily,
    weight: u16,
    italic: bool,
}

impl FaceKey {
    fn of(font: &FontSpec) -> Self {
        Self {
            family: font.family,
            weight: font.weight.0,
            italic: font.italic,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct AdvanceKey {
    face: FaceKey,
    size_bits: u32,
    grapheme: String,
}

/// One resolved face, registered alone in its own Parley context so that layout can only ever
/// pick this face and glyph ids always belong to `font`.
struct LoadedFace {
    font_ctx: parley::FontContext,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// Font database plus measurement and shaping caches.
///
/// Faces are discovered through `fontdb` (system fonts and/or font files), resolved lazily per
/// `(family class, weight, italic)`, and shaped with Parley. When no face can be resolved the
/// book degrades to [`crate::CellMetrics`] widths and draws nothing, so layout never fails.
pub struct FontBook {
    db: fontdb::Database,
    faces: HashMap<FaceKey, Option<LoadedFace>>,
    advances: HashMap<AdvanceKey, f32>,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Empty book; add faces with [`FontBook::load_fonts_dir`] or [`FontBook::load_font_data`].
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
            faces: HashMap::new(),
            advances: HashMap::new(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Book seeded with every installed system font.
    pub fn system() -> Self {
        let mut book = Self::new();
        book.db.load_system_fonts();
        tracing::debug!(faces = book.db.len(), "loaded system fonts");
        book
    }

    /// Number of faces known to the database.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Load every `.ttf`, `.otf` and `.ttc` file directly inside `dir`.
    ///
    /// Returns the number of files loaded. A missing directory loads nothing.
    pub fn load_fonts_dir(&mut self, dir: &Path) -> usize {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return 0;
        };

        let mut loaded = 0usize;
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            let ext = ext.to_ascii_lowercase();
            if ext != "ttf" && ext != "otf" && ext != "ttc" {
                continue;
            }
            if self.db.load_font_file(&path).is_ok() {
                loaded += 1;
            }
        }
        if loaded > 0 {
            self.invalidate();
        }
        tracing::debug!(dir = %dir.display(), loaded, "loaded font directory");
        loaded
    }

    /// Load one font file.
    pub fn load_font_file(&mut self, path: &Path) -> CoverResult<()> {
        self.db
            .load_font_file(path)
            .with_context(|| format!("load font file '{}'", path.display()))?;
        self.invalidate();
        Ok(())
    }

    /// Load raw font bytes (TTF/OTF/TTC).
    pub fn load_font_data(&mut self, bytes: Vec<u8>) -> CoverResult<()> {
        let before = self.db.len();
        self.db.load_font_data(bytes);
        if self.db.len() == before {
            return Err(CoverError::font("font data contained no usable faces"));
        }
        self.invalidate();
        Ok(())
    }

    /// Concrete family name a spec resolves to, if any face is available.
    pub fn resolved_family(&mut self, font: &FontSpec) -> Option<String> {
        self.face(FaceKey::of(font)).map(|f| f.family_name.clone())
    }

    fn invalidate(&mut self) {
        self.faces.clear();
        self.advances.clear();
    }

    fn face(&mut self, key: FaceKey) -> Option<&mut LoadedFace> {
        if !self.faces.contains_key(&key) {
            let loaded = load_face(&self.db, key);
            if loaded.is_none() {
                tracing::warn!(
                    family = ?key.family,
                    weight = key.weight,
                    italic = key.italic,
                    "no installed face; falling back to cell metrics"
                );
            }
            self.faces.insert(key, loaded);
        }
        self.faces.get_mut(&key).and_then(Option::as_mut)
    }

    fn layout(&mut self, font: &FontSpec, text: &str) -> Option<parley::Layout<()>> {
        let key = FaceKey::of(font);
        self.face(key)?;
        let Self {
            faces, layout_ctx, ..
        } = self;
        let face = faces.get_mut(&key)?.as_mut()?;

        let mut builder = layout_ctx.ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(font.weight.0)),
        ));
        if font.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }
}

impl TextMeasure for FontBook {
    fn advance(&mut self, font: &FontSpec, grapheme: &str) -> f32 {
        let key = AdvanceKey {
            face: FaceKey::of(font),
            size_bits: font.size.to_bits(),
            grapheme: grapheme.to_string(),
        };
        if let Some(w) = self.advances.get(&key) {
            return *w;
        }
        let w = match self.layout(font, grapheme) {
            Some(layout) => layout.full_width(),
            None => cell_advance(font.size, grapheme),
        };
        self.advances.insert(key, w);
        w
    }
}

impl GlyphSource for FontBook {
    fn shape(&mut self, font: &FontSpec, text: &str) -> Option<ShapedText> {
        let layout = self.layout(font, text)?;
        let face_font = self.faces.get(&FaceKey::of(font))?.as_ref()?.font.clone();

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        Some(ShapedText {
            font: face_font,
            size: font.size,
            glyphs,
            width: layout.full_width(),
        })
    }
}

fn load_face(db: &fontdb::Database, key: FaceKey) -> Option<LoadedFace> {
    let mut families: Vec<fontdb::Family<'_>> = key
        .family
        .candidates()
        .iter()
        .map(|name| fontdb::Family::Name(name))
        .collect();
    families.push(match key.family.generic() {
        GenericFamily::Serif => fontdb::Family::Serif,
        GenericFamily::SansSerif => fontdb::Family::SansSerif,
        GenericFamily::Cursive => fontdb::Family::Cursive,
    });

    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight(key.weight),
        stretch: fontdb::Stretch::Normal,
        style: if key.italic {
            fontdb::Style::Italic
        } else {
            fontdb::Style::Normal
        },
    };

    let id = db.query(&query).or_else(|| fallback_face(db, key))?;
    let db_family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()));
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    let mut font_ctx = parley::FontContext::default();
    let registered = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
    let names: Vec<String> = registered
        .iter()
        .filter_map(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_string))
        .collect();
    let family_name = match db_family {
        Some(name) if names.contains(&name) => name,
        _ => names.into_iter().next()?,
    };

    tracing::debug!(
        family = ?key.family,
        weight = key.weight,
        resolved = %family_name,
        "resolved font face"
    );

    Some(LoadedFace {
        font_ctx,
        family_name,
        font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index),
    })
}

/// Closest installed face when no named candidate or generic family matches.
fn fallback_face(db: &fontdb::Database, key: FaceKey) -> Option<fontdb::ID> {
    db.faces()
        .min_by_key(|f| {
            let name = f
                .families
                .first()
                .map(|(name, _)| name.as_str())
                .unwrap_or_default();
            fallback_rank(
                key,
                name,
                f.monospaced,
                f.style != fontdb::Style::Normal,
                f.weight.0,
            )
        })
        .map(|f| f.id)
}

/// Sort key for fallback faces; lower is better. Ties break on the family name so the choice
/// does not depend on load order.
fn fallback_rank(
    key: FaceKey,
    name: &str,
    monospaced: bool,
    italic: bool,
    weight: u16,
) -> (u8, bool, bool, u16, String) {
    let lower = name.to_ascii_lowercase();
    let sans = lower.contains("sans");
    let serif = lower.contains("serif") && !sans;
    let class = match key.family.generic() {
        GenericFamily::Serif if serif => 0,
        GenericFamily::Serif if sans || monospaced => 2,
        GenericFamily::SansSerif if sans && !monospaced => 0,
        GenericFamily::SansSerif if serif || monospaced => 2,
        GenericFamily::Cursive if monospaced => 2,
        _ => 1,
    };
    let special = ["math", "symbol", "emoji", "icon", "dingbat"]
        .iter()
        .any(|w| lower.contains(w));
    (
        class,
        special,
        italic != key.italic,
        weight.abs_diff(key.weight),
        lower,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
