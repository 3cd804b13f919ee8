use super::*;

#[test]
fn carousel_defaults() {
    let job = CarouselProject::from_reader(r#"{ "title": "T" }"#.as_bytes()).unwrap();
    assert_eq!(job.title, "T");
    assert_eq!(job.style.template, TemplateId::Article);
    assert_eq!(job.style.font_scale, 1.0);
    assert!(job.images.is_empty());
    job.validate().unwrap();
}

#[test]
fn colors_override_the_preset() {
    let job = CarouselProject::from_reader(
        r##"{ "style": { "template": "book", "highlight_color": "#00ff00" } }"##.as_bytes(),
    )
    .unwrap();
    let palette = job.style.palette();
    assert_eq!(palette.background, Rgba8::hex(0xF9F7F1));
    assert_eq!(palette.text, Rgba8::hex(0x2C2C2C));
    assert_eq!(palette.highlight, Rgba8::rgb(0, 255, 0));
}

#[test]
fn bad_color_is_rejected_while_parsing() {
    let err = CarouselProject::from_reader(r#"{ "style": { "bg_color": "blue" } }"#.as_bytes())
        .unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"), "{err}");
}

#[test]
fn unknown_template_and_fields_are_rejected() {
    assert!(
        CarouselProject::from_reader(r#"{ "style": { "template": "zine" } }"#.as_bytes()).is_err()
    );
    assert!(CarouselProject::from_reader(r#"{ "titel": "T" }"#.as_bytes()).is_err());
}

#[test]
fn font_scale_range() {
    let mut job = CarouselProject::default();
    for bad in [0.0, -1.0, 4.5, f32::NAN, f32::INFINITY] {
        job.style.font_scale = bad;
        let err = job.validate().unwrap_err();
        assert!(err.to_string().contains("font_scale"), "{err}");
    }
    job.style.font_scale = 4.0;
    job.validate().unwrap();
}

#[test]
fn page_style_fills_missing_date() {
    let mut style = CarouselStyle::default();
    assert_eq!(style.page_style("2026-10-19").date, "2026-10-19");
    style.date = Some("2020-01-01".into());
    assert_eq!(style.page_style("2026-10-19").date, "2020-01-01");
}

#[test]
fn relative_images_resolve_against_the_job_dir() {
    let job = CarouselProject {
        images: vec![PathBuf::from("a.png"), PathBuf::from("/abs/b.png")],
        ..CarouselProject::default()
    };
    let paths = job.image_paths(Path::new("/jobs"));
    assert_eq!(paths[0], PathBuf::from("/jobs/a.png"));
    assert_eq!(paths[1], PathBuf::from("/abs/b.png"));
}

#[test]
fn banner_defaults_and_options() {
    let job = BannerProject::from_reader(
        r#"{ "title": "Hello", "style": { "font_style": "strong", "offset_x": 12 } }"#.as_bytes(),
    )
    .unwrap();
    job.validate().unwrap();
    let opts = job.options(false);
    assert_eq!(opts.font, BannerFont::Strong);
    assert_eq!(opts.title_size, 80.0);
    assert_eq!(opts.subtitle_size, 32.0);
    assert_eq!(opts.text_color, Rgba8::WHITE);
    assert!(opts.shadow);
    assert_eq!(opts.offset, Vec2::new(12.0, 0.0));
    assert!(!opts.guides);
}

#[test]
fn banner_rejects_bad_zoom() {
    let mut job = BannerProject::default();
    job.style.zoom = 0.0;
    assert!(job.validate().unwrap_err().to_string().contains("style.zoom"));
    job.style.zoom = 1.5;
    job.style.offset_y = f32::NAN;
    assert!(job.validate().is_err());
}

#[test]
fn from_path_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = BannerProject::from_path(dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("open job JSON"));

    let path = dir.path().join("job.json");
    std::fs::write(&path, r#"{ "subtitle": "s" }"#).unwrap();
    assert_eq!(BannerProject::from_path(&path).unwrap().subtitle, "s");
}
