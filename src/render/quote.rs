use crate::{
    foundation::core::{Canvas, Point, Rect, Rgba8, Vec2},
    render::{
        blur::Shadow,
        paint::{Align, Baseline, Painter, TextStyle, round_rect_path},
    },
    text::{
        markup::strip_markup,
        metrics::{FontFamily, FontSpec, FontWeight, GlyphSource},
        wrap::wrap_plain,
    },
};

const SITE_NAME: &str = "Metasight.cloud";
const CARD_RADIUS: f64 = 40.0;
const INSET: f64 = 60.0;

/// Text shown on the quote-card cover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteCard<'a> {
    /// Raw title; highlight brackets are removed before drawing.
    pub quote: &'a str,
    pub top_tag: &'a str,
    pub author: &'a str,
    pub date: &'a str,
    pub scale: f32,
}

/// Translucent rounded card with tag line, wrapped quote, divider and signature footer.
pub fn draw_quote_card<G: GlyphSource + ?Sized>(
    painter: &mut Painter<'_>,
    glyphs: &mut G,
    canvas: Canvas,
    card: &QuoteCard<'_>,
) {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let (card_w, card_h) = (w * 0.85, h * 0.6);
    let rect = Rect::from_origin_size(((w - card_w) / 2.0, (h - card_h) / 2.0), (card_w, card_h));
    let scale = card.scale;

    let shadow = Shadow {
        color: Rgba8::BLACK.with_alpha(0.1),
        blur: 40.0,
        offset: Vec2::new(0.0, 20.0),
    };
    shadow.draw(painter, rect, |p, color| {
        p.fill_round_rect(rect, CARD_RADIUS, color);
    });
    painter.fill_round_rect(rect, CARD_RADIUS, Rgba8::WHITE.with_alpha(0.75));
    painter.stroke_path(
        &round_rect_path(rect, CARD_RADIUS),
        &kurbo::Stroke::new(2.0),
        Rgba8::WHITE.with_alpha(0.9),
    );

    let tag = TextStyle::new(
        FontSpec::new(FontFamily::Georgia, FontWeight::REGULAR, 36.0 * scale).italic(),
        Rgba8::hex(0x9AA0A6),
    )
    .align(Align::Right);
    painter.text(
        glyphs,
        &format!("\" {}", card.top_tag),
        Point::new(rect.x1 - INSET, rect.y0 + 100.0),
        &tag,
    );

    let quote_font = FontSpec::new(FontFamily::Serif, FontWeight::BOLD, 72.0 * scale);
    let quote_style = TextStyle::new(quote_font, Rgba8::hex(0x1F1F1F));
    let plain = card
        .quote
        .split('\n')
        .map(strip_markup)
        .collect::<Vec<_>>()
        .join("\n");
    let lines = wrap_plain(
        glyphs,
        &format!("\"{plain}\""),
        (card_w - 2.0 * INSET) as f32,
        &quote_font,
    );
    let mut y = rect.y0 + card_h * 0.35;
    for line in &lines {
        painter.text(glyphs, line, Point::new(rect.x0 + INSET, y), &quote_style);
        y += f64::from(quote_font.size) * 1.5;
    }

    let divider_y = rect.y1 - 140.0;
    painter.fill_rect(
        Rect::new(rect.x0 + INSET, divider_y - 0.5, rect.x1 - INSET, divider_y + 0.5),
        Rgba8::hex(0xF3F4F6),
    );

    let footer_y = rect.y1 - 100.0;
    painter.fill_round_rect(
        Rect::from_origin_size((rect.x0 + INSET, footer_y), (50.0, 50.0)),
        12.0,
        Rgba8::hex(0x1F1F1F),
    );
    let icon = TextStyle::new(
        FontSpec::new(FontFamily::Sans, FontWeight::REGULAR, 30.0),
        Rgba8::WHITE,
    )
    .align(Align::Center)
    .baseline(Baseline::Middle);
    painter.text(
        glyphs,
        "✦",
        Point::new(rect.x0 + INSET + 25.0, footer_y + 28.0),
        &icon,
    );

    let site = TextStyle::new(
        FontSpec::new(FontFamily::Serif, FontWeight::REGULAR, 32.0),
        Rgba8::hex(0x9CA3AF),
    )
    .baseline(Baseline::Middle);
    painter.text(
        glyphs,
        SITE_NAME,
        Point::new(rect.x0 + INSET + 70.0, footer_y + 25.0),
        &site,
    );

    let signature = TextStyle::new(
        FontSpec::new(FontFamily::Serif, FontWeight::REGULAR, 30.0),
        Rgba8::hex(0xD1D5DB),
    )
    .align(Align::Right)
    .baseline(Baseline::Middle);
    painter.text(
        glyphs,
        &format!("{} by {}", card.date, card.author),
        Point::new(rect.x1 - INSET, footer_y + 25.0),
        &signature,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/quote.rs"]
mod tests;
