use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "coverpress", version)]
struct Cli {
    /// Increase log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every page of a carousel job as PNGs.
    Carousel(CarouselArgs),
    /// Print the page layout of a carousel job as JSON, without rendering.
    Paginate(PaginateArgs),
    /// Render a single-image banner.
    Banner(BannerArgs),
    /// List the available carousel templates.
    Templates,
}

#[derive(Parser, Debug)]
struct CarouselArgs {
    /// Input carousel job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; pages are written as `cover_<n>.png`.
    #[arg(long)]
    out: PathBuf,

    /// Extra directory of `.ttf`/`.otf`/`.ttc` files.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Print which installed family each font class resolves to.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct PaginateArgs {
    /// Input carousel job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Extra directory of `.ttf`/`.otf`/`.ttc` files.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Measure with fixed cell widths instead of real fonts.
    #[arg(long)]
    cell_metrics: bool,
}

#[derive(Parser, Debug)]
struct BannerArgs {
    /// Input banner job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path (PNG, or JPEG by extension).
    #[arg(long)]
    out: PathBuf,

    /// Extra directory of `.ttf`/`.otf`/`.ttc` files.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Keep the composition guides in the output (preview).
    #[arg(long)]
    guides: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Carousel(args) => cmd_carousel(args),
        Command::Paginate(args) => cmd_paginate(args),
        Command::Banner(args) => cmd_banner(args),
        Command::Templates => cmd_templates(),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn job_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// System fonts, then `fonts/` next to the job, then `--fonts`.
fn font_book(job_path: &Path, extra: Option<&Path>) -> coverpress::FontBook {
    let mut book = coverpress::FontBook::system();
    let local = job_dir(job_path).join("fonts");
    if local.is_dir() {
        let n = book.load_fonts_dir(&local);
        tracing::debug!(dir = %local.display(), files = n, "loaded job fonts");
    }
    if let Some(dir) = extra {
        let n = book.load_fonts_dir(dir);
        if n == 0 {
            tracing::warn!(dir = %dir.display(), "no font files loaded");
        }
    }
    book
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn cmd_carousel(args: CarouselArgs) -> anyhow::Result<()> {
    let job = coverpress::CarouselProject::from_path(&args.in_path)?;
    job.validate()?;
    let images = coverpress::load_images(&job.image_paths(job_dir(&args.in_path)))?;
    let mut fonts = font_book(&args.in_path, args.fonts.as_deref());

    if args.dump_fonts {
        dump_font_diagnostics(&mut fonts, job.style.template);
    }

    let written = coverpress::export_carousel(&mut fonts, &job, &images, &today(), &args.out)
        .with_context(|| format!("render carousel '{}'", args.in_path.display()))?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_paginate(args: PaginateArgs) -> anyhow::Result<()> {
    let job = coverpress::CarouselProject::from_path(&args.in_path)?;
    let images = coverpress::load_images(&job.image_paths(job_dir(&args.in_path)))?;

    let canvas = coverpress::Canvas::PORTRAIT;
    let (_, pages) = if args.cell_metrics {
        coverpress::layout_carousel(&mut coverpress::CellMetrics, &job, &images, canvas)?
    } else {
        let mut fonts = font_book(&args.in_path, args.fonts.as_deref());
        coverpress::layout_carousel(&mut fonts, &job, &images, canvas)?
    };

    let summaries: Vec<_> = pages.iter().map(coverpress::Page::summary).collect();
    let json = serde_json::to_string_pretty(&summaries).context("serialize page summary")?;
    println!("{json}");
    Ok(())
}

fn cmd_banner(args: BannerArgs) -> anyhow::Result<()> {
    let job = coverpress::BannerProject::from_path(&args.in_path)?;
    job.validate()?;
    let image = job
        .image_path(job_dir(&args.in_path))
        .map(|p| coverpress::load_image(&p))
        .transpose()?;
    let mut fonts = font_book(&args.in_path, args.fonts.as_deref());

    if args.guides {
        let surface = coverpress::render_banner_job(
            &mut fonts,
            &job,
            image.as_ref(),
            coverpress::Canvas::BANNER,
            true,
        )?;
        if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        surface.save(&args.out)?;
    } else {
        coverpress::export_banner_job(&mut fonts, &job, image.as_ref(), &args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    for id in coverpress::TemplateId::ALL {
        println!("{:<8} {}  {}", id.as_str(), id.name(), id.description());
    }
    Ok(())
}

fn dump_font_diagnostics(fonts: &mut coverpress::FontBook, template: coverpress::TemplateId) {
    let t = template.template();
    eprintln!("font diagnostics ({} faces):", fonts.face_count());
    for (label, spec) in [
        (
            "title",
            coverpress::FontSpec::new(t.body_family, t.title_weight, t.title_size),
        ),
        (
            "body",
            coverpress::FontSpec::new(t.body_family, t.body_weight, t.body_size),
        ),
        (
            "highlight",
            coverpress::FontSpec::new(t.body_family, coverpress::FontWeight::BLACK, t.body_size),
        ),
    ] {
        let family = fonts
            .resolved_family(&spec)
            .unwrap_or_else(|| "<none, cell metrics>".to_string());
        eprintln!("  {label:<9} {:?} {} -> {family}", spec.family, spec.weight.0);
    }
}
