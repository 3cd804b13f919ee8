use crate::{
    foundation::core::Canvas,
    layout::template::{TITLE_LINE_HEIGHT, Template},
    text::wrap::WrapStyle,
};

/// Fraction of each dimension kept as margin on both sides.
pub const SAFE_MARGIN: f32 = 0.1;

/// Per-render quantities derived from the canvas, a template and the font scale.
///
/// Pagination and rendering both read every size and line height from here, so a page that
/// fits its budget during pagination also fits when drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutContext {
    pub canvas: Canvas,
    pub margin_x: f32,
    pub margin_y: f32,
    pub safe_width: f32,
    pub safe_height: f32,
    pub scale: f32,
    /// Scaled title size.
    pub title_size: f32,
    /// Scaled body size.
    pub body_size: f32,
    /// Body line advance.
    pub line_height: f32,
}

impl LayoutContext {
    pub fn new(canvas: Canvas, template: &Template, scale: f32) -> Self {
        let width = canvas.width_f32();
        let height = canvas.height_f32();
        let margin_x = width * SAFE_MARGIN;
        let margin_y = height * SAFE_MARGIN;
        let body_size = template.body_size * scale;
        Self {
            canvas,
            margin_x,
            margin_y,
            safe_width: width - 2.0 * margin_x,
            safe_height: height - 2.0 * margin_y,
            scale,
            title_size: template.title_size * scale,
            body_size,
            line_height: body_size * template.line_height,
        }
    }

    pub fn width(&self) -> f32 {
        self.canvas.width_f32()
    }

    pub fn height(&self) -> f32 {
        self.canvas.height_f32()
    }

    /// Title line advance.
    pub fn title_line_height(&self) -> f32 {
        self.title_size * TITLE_LINE_HEIGHT
    }

    /// Vertical space a body line takes; blank lines take half a line.
    pub fn body_advance(&self, blank: bool) -> f32 {
        if blank {
            self.line_height * 0.5
        } else {
            self.line_height
        }
    }

    pub fn title_wrap(&self, template: &Template) -> WrapStyle {
        WrapStyle {
            family: template.body_family,
            size: self.title_size,
            base_weight: template.title_weight,
        }
    }

    pub fn body_wrap(&self, template: &Template) -> WrapStyle {
        WrapStyle {
            family: template.body_family,
            size: self.body_size,
            base_weight: template.body_weight,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/context.rs"]
mod tests;
