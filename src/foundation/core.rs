use std::fmt;

use crate::foundation::error::{CoverError, CoverResult};

pub use kurbo::{Point, Rect, Vec2};

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Portrait 9:16 carousel page.
    pub const PORTRAIT: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Wide 2.35:1 article banner (`1920 / 2.35`, rounded).
    pub const BANNER: Canvas = Canvas {
        width: 1920,
        height: 817,
    };

    /// Construct a canvas from explicit dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as `f32`, the unit used by layout.
    pub fn width_f32(self) -> f32 {
        self.width as f32
    }

    /// Height as `f32`, the unit used by layout.
    pub fn height_f32(self) -> f32 {
        self.height as f32
    }

    /// Full-frame rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serializes as a CSS-style hex string (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba8 = Rgba8::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color from a packed `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Same color with alpha replaced by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> CoverResult<Self> {
        let digits = s.trim().trim_start_matches('#');
        let bad = || CoverError::validation(format!("invalid hex color '{s}'"));
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        match digits.len() {
            3 => {
                let nib = |i: usize| -> CoverResult<u8> {
                    let v = u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| bad())?;
                    Ok(v * 17)
                };
                Ok(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = CoverError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
