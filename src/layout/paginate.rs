use crate::{
    assets::decode::ImageHandle,
    layout::{
        context::LayoutContext,
        template::{FOOTER_RESERVATION, FirstPage, TITLE_GAP, Template},
    },
    text::{
        metrics::TextMeasure,
        wrap::{Line, wrap_text},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Title only (or the quote card).
    Cover,
    /// Title followed by the first body lines.
    Mixed,
    /// Body lines only.
    Content,
}

/// One renderable output page.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub kind: PageKind,
    /// 1-based position in the page sequence; `None` on covers.
    pub page_index: Option<u32>,
    /// Complete title block (`Cover` and `Mixed` only).
    pub title_lines: Vec<Line>,
    /// Body lines (`Mixed` and `Content` only).
    pub lines: Vec<Line>,
    /// Background photo for this page.
    pub bg_image: Option<ImageHandle>,
    /// Index of `bg_image` in the input image list.
    pub image_slot: Option<usize>,
    /// Raw title for the quote-card cover.
    pub quote: Option<String>,
}

impl Page {
    fn empty(kind: PageKind) -> Self {
        Self {
            kind,
            page_index: None,
            title_lines: Vec::new(),
            lines: Vec::new(),
            bg_image: None,
            image_slot: None,
            quote: None,
        }
    }

    fn with_image(mut self, images: &[ImageHandle], slot: usize) -> Self {
        if !images.is_empty() {
            let slot = slot % images.len();
            self.bg_image = Some(images[slot].clone());
            self.image_slot = Some(slot);
        }
        self
    }

    /// Serializable view of the page.
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            kind: self.kind,
            page_index: self.page_index,
            image_slot: self.image_slot,
            title: self.title_lines.iter().map(Line::text).collect(),
            lines: self.lines.iter().map(Line::text).collect(),
            quote: self.quote.clone(),
        }
    }
}

/// Page contents as plain strings, for inspection without rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageSummary {
    pub kind: PageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_slot: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

/// Body height available on a `Mixed` first page holding `title_line_count` title lines.
///
/// Unlike [`content_page_budget`] this keeps no footer reservation, only the template's header
/// reservation.
pub fn first_page_budget(ctx: &LayoutContext, template: &Template, title_line_count: usize) -> f32 {
    let title_block = title_line_count as f32 * ctx.title_line_height() + TITLE_GAP;
    ctx.safe_height - title_block - template.header_reservation
}

/// Body height available on every `Content` page.
pub fn content_page_budget(ctx: &LayoutContext) -> f32 {
    ctx.safe_height - FOOTER_RESERVATION
}

/// Wrap `title` and `body` and pack them into pages.
///
/// The poster template never wraps the body. Any other body, even an empty one, contributes its
/// wrapped lines, so a blank body still yields one blank line.
#[tracing::instrument(
    skip(measure, title, body, template, ctx, images),
    fields(template = %template.id, images = images.len())
)]
pub fn paginate<M: TextMeasure + ?Sized>(
    measure: &mut M,
    title: &str,
    body: &str,
    template: &Template,
    ctx: &LayoutContext,
    images: &[ImageHandle],
) -> Vec<Page> {
    let title_lines = wrap_text(measure, title, ctx.safe_width, &ctx.title_wrap(template));
    let body_lines = if template.first_page == FirstPage::SingleCover {
        Vec::new()
    } else {
        wrap_text(measure, body, ctx.safe_width, &ctx.body_wrap(template))
    };

    let pages = paginate_lines(title, title_lines, body_lines, template, ctx, images);
    tracing::debug!(pages = pages.len(), "paginated");
    pages
}

/// Pack already wrapped lines into pages.
///
/// Every body line lands in exactly one page, in order. Title lines are never split. A page is
/// closed when the next line would overflow its budget and it already holds a line, so a line
/// taller than the budget still gets a page of its own.
pub fn paginate_lines(
    title: &str,
    title_lines: Vec<Line>,
    body_lines: Vec<Line>,
    template: &Template,
    ctx: &LayoutContext,
    images: &[ImageHandle],
) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut remaining = body_lines.into_iter().peekable();
    let mut non_cover = 0usize;

    match template.first_page {
        FirstPage::Mixed => {
            let budget = first_page_budget(ctx, template, title_lines.len());
            let mut used = 0.0f32;
            let mut lines = Vec::new();
            while let Some(line) = remaining.peek() {
                let h = ctx.body_advance(line.is_empty());
                if used + h > budget {
                    break;
                }
                used += h;
                lines.extend(remaining.next());
            }

            let mut page = Page::empty(PageKind::Mixed).with_image(images, non_cover);
            page.page_index = Some(1);
            page.title_lines = title_lines;
            page.lines = lines;
            pages.push(page);
            non_cover += 1;
        }
        FirstPage::Cover | FirstPage::SingleCover | FirstPage::QuoteCover => {
            let mut page = Page::empty(PageKind::Cover).with_image(images, 0);
            page.title_lines = title_lines;
            if template.first_page == FirstPage::QuoteCover {
                page.quote = Some(title.to_string());
            }
            pages.push(page);
            if template.first_page == FirstPage::SingleCover {
                return pages;
            }
        }
    }

    let budget = content_page_budget(ctx);
    let mut current: Vec<Line> = Vec::new();
    let mut used = 0.0f32;
    for line in remaining {
        let h = ctx.body_advance(line.is_empty());
        if used + h > budget && !current.is_empty() {
            pages.push(content_page(
                std::mem::take(&mut current),
                pages.len(),
                images,
                non_cover,
            ));
            non_cover += 1;
            used = 0.0;
        }
        current.push(line);
        used += h;
    }
    if !current.is_empty() {
        pages.push(content_page(current, pages.len(), images, non_cover));
    }

    pages
}

fn content_page(lines: Vec<Line>, preceding: usize, images: &[ImageHandle], slot: usize) -> Page {
    let mut page = Page::empty(PageKind::Content).with_image(images, slot);
    page.page_index = Some(preceding as u32 + 1);
    page.lines = lines;
    page
}

#[cfg(test)]
#[path = "../../tests/unit/layout/paginate.rs"]
mod tests;
