use super::*;
use crate::text::metrics::{FontWeight, GlyphSource};

fn sans(size: f32) -> FontSpec {
    FontSpec::new(FontFamily::Sans, FontWeight::MEDIUM, size)
}

#[test]
fn empty_book_falls_back_to_cell_metrics() {
    let mut book = FontBook::new();
    assert_eq!(book.face_count(), 0);
    assert_eq!(book.advance(&sans(40.0), "中"), 40.0);
    assert_eq!(book.advance(&sans(40.0), "a"), 20.0);
    assert!(book.resolved_family(&sans(40.0)).is_none());
}

#[test]
fn empty_book_shapes_nothing() {
    let mut book = FontBook::new();
    assert!(book.shape(&sans(40.0), "hello").is_none());
}

#[test]
fn advance_is_cached_per_size() {
    let mut book = FontBook::new();
    let a = book.advance(&sans(40.0), "x");
    let b = book.advance(&sans(40.0), "x");
    let c = book.advance(&sans(80.0), "x");
    assert_eq!(a, b);
    assert_eq!(c, 2.0 * a);
}

#[test]
fn garbage_font_data_is_rejected() {
    let mut book = FontBook::new();
    let err = book.load_font_data(b"not a font".to_vec()).unwrap_err();
    assert!(err.to_string().starts_with("font error:"));
}

#[test]
fn font_dir_skips_missing_and_non_font_files() {
    let mut book = FontBook::new();
    assert_eq!(book.load_fonts_dir(Path::new("/definitely/not/here")), 0);

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.txt"), b"hello").unwrap();
    std::fs::write(dir.path().join("broken.ttf"), b"nope").unwrap();
    book.load_fonts_dir(dir.path());
    assert_eq!(book.face_count(), 0);
}

fn fixture_book() -> FontBook {
    let mut book = FontBook::new();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/Tuffy.ttf");
    book.load_font_file(&path).unwrap();
    book
}

#[test]
fn fixture_font_resolves_for_every_class() {
    let mut book = fixture_book();
    assert_eq!(book.face_count(), 1);
    assert_eq!(book.resolved_family(&sans(40.0)).as_deref(), Some("Tuffy"));
    let serif = FontSpec::new(FontFamily::Serif, FontWeight::BLACK, 40.0);
    assert_eq!(book.resolved_family(&serif).as_deref(), Some("Tuffy"));
}

#[test]
fn shaped_width_matches_advance() {
    let mut book = fixture_book();
    let font = sans(40.0);
    for g in ["W", "i", "g"] {
        let shaped = book.shape(&font, g).unwrap();
        assert_eq!(shaped.glyphs.len(), 1);
        assert!(shaped.width > 0.0);
        assert!((shaped.width - book.advance(&font, g)).abs() < 1e-3, "{g}");
    }
    assert!(book.advance(&font, "W") > book.advance(&font, "i"));
}

#[test]
fn shaping_places_glyphs_left_to_right() {
    let mut book = fixture_book();
    let shaped = book.shape(&sans(40.0), "hello").unwrap();
    assert_eq!(shaped.glyphs.len(), 5);
    assert!(shaped.glyphs.windows(2).all(|w| w[1].x > w[0].x));
    assert!(shaped.glyphs.iter().all(|g| g.y > 0.0 && g.y < 40.0 * 1.5));
    assert_eq!(shaped.size, 40.0);
}

#[test]
fn loading_a_font_drops_cached_fallback_widths() {
    let mut book = FontBook::new();
    let cell = book.advance(&sans(40.0), "i");
    assert_eq!(cell, 20.0);
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/Tuffy.ttf");
    book.load_font_file(&path).unwrap();
    assert_ne!(book.advance(&sans(40.0), "i"), cell);
}

fn rank(family: FontFamily, name: &str) -> (u8, bool, bool, u16, String) {
    let key = FaceKey {
        family,
        weight: 400,
        italic: false,
    };
    fallback_rank(key, name, name.contains("Mono"), false, 400)
}

#[test]
fn fallback_prefers_faces_of_the_same_class() {
    let names = [
        "DejaVu Math TeX Gyre",
        "DejaVu Sans Mono",
        "DejaVu Serif",
        "DejaVu Sans",
    ];
    let best = |family| {
        names
            .iter()
            .min_by_key(|n| rank(family, n))
            .copied()
            .unwrap()
    };
    assert_eq!(best(FontFamily::Sans), "DejaVu Sans");
    assert_eq!(best(FontFamily::Modern), "DejaVu Sans");
    assert_eq!(best(FontFamily::Serif), "DejaVu Serif");
    assert_eq!(best(FontFamily::Georgia), "DejaVu Serif");
}

#[test]
fn fallback_prefers_upright_faces_near_the_weight() {
    let key = FaceKey {
        family: FontFamily::Sans,
        weight: 700,
        italic: false,
    };
    let bold = fallback_rank(key, "Noto Sans", false, false, 700);
    let light = fallback_rank(key, "Noto Sans", false, false, 300);
    let italic = fallback_rank(key, "Noto Sans", false, true, 700);
    assert!(bold < light);
    assert!(light < italic);
}
