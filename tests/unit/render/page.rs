use super::*;
use crate::{
    assets::decode::ImageHandle,
    foundation::core::Canvas,
    layout::{paginate::paginate, template::TemplateId},
    text::metrics::CellMetrics,
};

const SMALL: Canvas = Canvas::new(270, 480);

fn pages_for(id: TemplateId, title: &str, body: &str, images: &[ImageHandle]) -> (LayoutContext, Vec<Page>) {
    let ctx = LayoutContext::new(SMALL, id.template(), 0.25);
    let pages = paginate(&mut CellMetrics, title, body, id.template(), &ctx, images);
    (ctx, pages)
}

fn render(id: TemplateId, ctx: &LayoutContext, page: &Page) -> Surface {
    let template = id.template();
    let mut surface = Surface::new(ctx.canvas);
    render_page(
        &mut surface,
        page,
        template,
        ctx,
        &PageStyle::preset(template),
        &mut CellMetrics,
    );
    surface
}

fn pixel(s: &Surface, x: u32, y: u32) -> [u8; 4] {
    let data = s.premul_rgba8().unwrap();
    let i = ((y * s.canvas().width + x) * 4) as usize;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

#[test]
fn background_uses_palette() {
    let (ctx, pages) = pages_for(TemplateId::Notes, "标题", "正文", &[]);
    let mut style = PageStyle::preset(TemplateId::Notes.template());
    style.palette.background = Rgba8::hex(0x102030);

    let mut surface = Surface::new(ctx.canvas);
    render_page(
        &mut surface,
        &pages[1],
        TemplateId::Notes.template(),
        &ctx,
        &style,
        &mut CellMetrics,
    );
    assert_eq!(pixel(&surface, 0, 0), [0x10, 0x20, 0x30, 255]);
    assert_eq!(pixel(&surface, 269, 479), [0x10, 0x20, 0x30, 255]);
}

#[test]
fn memo_highlight_draws_block_under_body_text() {
    let (ctx, pages) = pages_for(TemplateId::Memo, "T", "[重点]", &[]);
    assert_eq!(pages.len(), 1);
    let surface = render(TemplateId::Memo, &ctx, &pages[0]);

    let top = memo_header_bottom(SMALL) + 40.0 + ctx.title_line_height() + TITLE_GAP;
    let x = (ctx.margin_x + 3.0) as u32;
    let y = (top + 5.0 + 4.0) as u32;
    assert_eq!(pixel(&surface, x, y), [0xFD, 0xE0, 0x47, 255]);

    // Right of the two highlighted characters the page is plain background.
    let past = (ctx.margin_x + 2.0 * ctx.body_size + 4.0) as u32;
    assert_eq!(pixel(&surface, past, y), [255, 255, 255, 255]);
}

#[test]
fn colored_highlights_draw_no_blocks() {
    let (ctx, marked) = pages_for(TemplateId::Notes, "标题", "[重点]内容", &[]);
    let (_, plain) = pages_for(TemplateId::Notes, "标题", "重点内容", &[]);
    let a = render(TemplateId::Notes, &ctx, &marked[1]);
    let b = render(TemplateId::Notes, &ctx, &plain[1]);
    assert_eq!(a.digest(), b.digest());
}

#[test]
fn background_image_is_faint() {
    let red = ImageHandle::from_premul_rgba8(&[255, 0, 0, 255], 1, 1).unwrap();
    let (ctx, pages) = pages_for(TemplateId::Notes, "标题", "正文", &[red]);
    let surface = render(TemplateId::Notes, &ctx, &pages[1]);

    let [r, g, b, a] = pixel(&surface, 5, 5);
    assert_eq!((r, a), (255, 255));
    assert!((230..=240).contains(&g), "green {g}");
    assert_eq!(g, b);
}

#[test]
fn rendering_is_deterministic_for_every_template() {
    for id in TemplateId::ALL {
        let (ctx, pages) = pages_for(id, "好[标题]", "第一段[重点]\n\n第二段", &[]);
        for page in &pages {
            let a = render(id, &ctx, page);
            let b = render(id, &ctx, page);
            assert!(a.digest().is_some());
            assert_eq!(a.digest(), b.digest(), "{id} {:?}", page.kind);
        }
    }
}

#[test]
fn ins_cover_is_an_opaque_backdrop_with_a_card() {
    let (ctx, pages) = pages_for(TemplateId::Ins, "金句", "正文", &[]);
    assert!(pages[0].quote.is_some());
    let surface = render(TemplateId::Ins, &ctx, &pages[0]);
    let data = surface.premul_rgba8().unwrap();
    assert!(data.chunks_exact(4).all(|px| px[3] == 255));

    let content = render(TemplateId::Ins, &ctx, &pages[1]);
    assert_ne!(surface.digest(), content.digest());
}

#[test]
fn book_pages_carry_paper_grain() {
    let (ctx, pages) = pages_for(TemplateId::Book, "书", "正文", &[]);
    let surface = render(TemplateId::Book, &ctx, &pages[1]);
    let data = surface.premul_rgba8().unwrap();
    let background = [0xF9, 0xF7, 0xF1, 255];
    assert!(data.chunks_exact(4).any(|px| px != background));
}

#[test]
fn undrawable_surface_is_left_alone() {
    let (ctx, pages) = pages_for(TemplateId::Article, "标题", "正文", &[]);
    let mut surface = Surface::new(Canvas::new(0, 0));
    let template = TemplateId::Article.template();
    render_page(
        &mut surface,
        &pages[0],
        template,
        &ctx,
        &PageStyle::preset(template),
        &mut CellMetrics,
    );
    assert!(surface.premul_rgba8().is_none());
}
