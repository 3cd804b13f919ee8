use crate::{
    foundation::core::{Point, Rect, Rgba8},
    layout::{
        context::LayoutContext,
        paginate::{Page, PageKind},
        template::{Decoration, FirstPage, HighlightStyle, Palette, SWIPE_HINT, TITLE_GAP, Template},
    },
    render::{
        backdrop::{
            draw_cover_image, draw_dreamy_backdrop, draw_memo_header, draw_paper_grain,
            memo_header_bottom,
        },
        paint::{Align, Painter, TextStyle},
        quote::{QuoteCard, draw_quote_card},
        surface::Surface,
    },
    text::{
        metrics::{FontSpec, FontWeight, GlyphSource},
        wrap::{Line, WrapStyle},
    },
};

/// Opacity of page background photos.
pub const BACKGROUND_IMAGE_OPACITY: f32 = 0.08;
const FOOTER_COLOR: Rgba8 = Rgba8::hex(0x999999);
const FOOTER_SIZE: f32 = 32.0;

/// User-chosen colors and quote-card text for one carousel.
#[derive(Clone, Debug, PartialEq)]
pub struct PageStyle {
    pub palette: Palette,
    pub top_tag: String,
    pub author: String,
    pub date: String,
}

impl PageStyle {
    /// Template preset colors with empty card text.
    pub fn preset(template: &Template) -> Self {
        Self {
            palette: template.preset,
            top_tag: String::new(),
            author: String::new(),
            date: String::new(),
        }
    }
}

/// Geometry of the filled block behind an inverted highlight, relative to the line top.
#[derive(Clone, Copy)]
struct Block {
    dy: f64,
    height: f64,
}

/// Paint `page` onto `surface`, replacing its contents.
///
/// Does nothing when the surface has no drawing context.
#[tracing::instrument(
    skip_all,
    fields(template = %template.id, kind = ?page.kind, page_index = ?page.page_index)
)]
pub fn render_page<G: GlyphSource + ?Sized>(
    surface: &mut Surface,
    page: &Page,
    template: &Template,
    ctx: &LayoutContext,
    style: &PageStyle,
    glyphs: &mut G,
) {
    let canvas = ctx.canvas;
    surface.paint(|p| {
        if template.decoration == Decoration::DreamyBackdrop {
            draw_dreamy_backdrop(p, canvas);
        } else {
            p.fill_rect(canvas.rect(), style.palette.background);
        }

        let mut content_top = ctx.margin_y;
        match template.decoration {
            Decoration::MemoHeader => {
                draw_memo_header(p, glyphs, canvas);
                content_top = memo_header_bottom(canvas) + 40.0;
            }
            Decoration::PaperGrain => draw_paper_grain(p, canvas),
            Decoration::None | Decoration::DreamyBackdrop => {}
        }

        if let Some(image) = &page.bg_image {
            draw_cover_image(p, image, canvas.rect(), BACKGROUND_IMAGE_OPACITY);
        }

        match page.kind {
            PageKind::Cover => match &page.quote {
                Some(quote) => draw_quote_card(
                    p,
                    glyphs,
                    canvas,
                    &QuoteCard {
                        quote,
                        top_tag: &style.top_tag,
                        author: &style.author,
                        date: &style.date,
                        scale: ctx.scale,
                    },
                ),
                None => draw_title_cover(p, glyphs, page, template, ctx, style),
            },
            PageKind::Mixed => {
                let mut y = f64::from(content_top);
                let title = ctx.title_wrap(template);
                let title_block = Block {
                    dy: 0.0,
                    height: f64::from(title.size) * 1.1,
                };
                for line in &page.title_lines {
                    let origin = Point::new(f64::from(ctx.margin_x), y);
                    draw_line(p, glyphs, line, origin, &title, template, &style.palette, title_block);
                    y += f64::from(ctx.title_line_height());
                }
                y += f64::from(TITLE_GAP);

                let body = ctx.body_wrap(template);
                let body_block = Block {
                    dy: 5.0,
                    height: f64::from(body.size),
                };
                draw_body(p, glyphs, &page.lines, y, template, ctx, &style.palette, body_block);
            }
            PageKind::Content => {
                let body = ctx.body_wrap(template);
                let block = Block {
                    dy: 0.0,
                    height: f64::from(body.size) * 1.1,
                };
                draw_body(
                    p,
                    glyphs,
                    &page.lines,
                    f64::from(content_top),
                    template,
                    ctx,
                    &style.palette,
                    block,
                );
            }
        }

        if let Some(index) = page.page_index {
            let footer = TextStyle::new(
                FontSpec::new(template.body_family, FontWeight::REGULAR, FOOTER_SIZE),
                FOOTER_COLOR,
            )
            .align(Align::Center);
            p.text(
                glyphs,
                &format!("- {index} / -"),
                Point::new(
                    f64::from(ctx.width()) / 2.0,
                    f64::from(ctx.height() - ctx.margin_y + 20.0),
                ),
                &footer,
            );
        }
    });
}

fn draw_title_cover<G: GlyphSource + ?Sized>(
    p: &mut Painter<'_>,
    glyphs: &mut G,
    page: &Page,
    template: &Template,
    ctx: &LayoutContext,
    style: &PageStyle,
) {
    let memo = template.decoration == Decoration::MemoHeader;
    let mut y = if memo {
        memo_header_bottom(ctx.canvas) + 60.0
    } else if template.first_page == FirstPage::SingleCover {
        ctx.height() * 0.15
    } else {
        ctx.height() * 0.3
    };

    let title = ctx.title_wrap(template);
    let block = Block {
        dy: 0.0,
        height: f64::from(title.size) * 1.1,
    };
    for line in &page.title_lines {
        let x = if memo {
            ctx.margin_x
        } else {
            (ctx.width() - line.width()) / 2.0
        };
        let origin = Point::new(f64::from(x), f64::from(y));
        draw_line(p, glyphs, line, origin, &title, template, &style.palette, block);
        y += ctx.title_line_height();
    }

    if template.swipe_hint() {
        let hint = TextStyle::new(
            FontSpec::new(template.body_family, FontWeight::MEDIUM, 40.0 * ctx.scale),
            style.palette.highlight,
        )
        .align(Align::Center);
        p.text(
            glyphs,
            SWIPE_HINT,
            Point::new(
                f64::from(ctx.width()) / 2.0,
                f64::from(ctx.height() - ctx.margin_y - 100.0),
            ),
            &hint,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_body<G: GlyphSource + ?Sized>(
    p: &mut Painter<'_>,
    glyphs: &mut G,
    lines: &[Line],
    top: f64,
    template: &Template,
    ctx: &LayoutContext,
    palette: &Palette,
    block: Block,
) {
    let body = ctx.body_wrap(template);
    let mut y = top;
    for line in lines {
        if !line.is_empty() {
            let origin = Point::new(f64::from(ctx.margin_x), y);
            draw_line(p, glyphs, line, origin, &body, template, palette, block);
        }
        y += f64::from(ctx.body_advance(line.is_empty()));
    }
}

/// Draw one line token by token, advancing by each token's measured width.
#[allow(clippy::too_many_arguments)]
fn draw_line<G: GlyphSource + ?Sized>(
    p: &mut Painter<'_>,
    glyphs: &mut G,
    line: &Line,
    origin: Point,
    wrap: &WrapStyle,
    template: &Template,
    palette: &Palette,
    block: Block,
) {
    let mut x = origin.x;
    for token in line.tokens() {
        let color = match (token.highlight, template.highlight_style) {
            (false, _) => palette.text,
            (true, HighlightStyle::ColoredText) => palette.highlight,
            (true, HighlightStyle::InvertedBlock) => {
                p.fill_rect(
                    Rect::from_origin_size(
                        (x, origin.y + block.dy),
                        (f64::from(token.width), block.height),
                    ),
                    palette.highlight,
                );
                Rgba8::BLACK
            }
        };
        let style = TextStyle::new(wrap.font_for(token.highlight), color);
        p.text(glyphs, &token.grapheme, Point::new(x, origin.y), &style);
        x += f64::from(token.width);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/page.rs"]
mod tests;
