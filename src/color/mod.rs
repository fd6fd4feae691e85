//! Parsing of the colour strings the service returns.
//!
//! The backend emits `#RRGGBB` today. Hex takes a fast path; every other
//! CSS colour form (`rgb()`, `hsl()`, `hwb()`, `oklch()`, named colours)
//! goes through lightningcss.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::{CssColor, FloatColor};

/// `None` when the value is not a CSS colour.
pub fn parse_color(s: &str) -> Option<Rgba<u8>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    parse_css(s)
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba([digit(0)?, digit(1)?, digit(2)?, 255])),
        4 => Some(Rgba([digit(0)?, digit(1)?, digit(2)?, digit(3)?])),
        6 => Some(Rgba([pair(0)?, pair(2)?, pair(4)?, 255])),
        8 => Some(Rgba([pair(0)?, pair(2)?, pair(4)?, pair(6)?])),
        _ => None,
    }
}

fn parse_css(s: &str) -> Option<Rgba<u8>> {
    let color = match CssColor::parse_string(s) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(value = s, "not a css colour: {e:?}");
            return None;
        }
    };
    // Converted to sRGB before reading channels.
    match color.to_rgb().ok()? {
        CssColor::RGBA(c) => Some(Rgba([c.red, c.green, c.blue, c.alpha])),
        CssColor::Float(f) => match f.as_ref() {
            FloatColor::RGB(c) => Some(Rgba([
                unit_to_byte(c.r),
                unit_to_byte(c.g),
                unit_to_byte(c.b),
                unit_to_byte(c.alpha),
            ])),
            _ => None,
        },
        _ => None,
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Terminal colour for a swatch; alpha is dropped.
pub fn to_term_color(c: Rgba<u8>) -> ratatui::style::Color {
    ratatui::style::Color::Rgb(c[0], c[1], c[2])
}

/// Black or white, whichever reads better on top of `c`.
pub fn contrast_text(c: Rgba<u8>) -> Rgba<u8> {
    let luma = 0.299 * c[0] as f32 + 0.587 * c[1] as f32 + 0.114 * c[2] as f32;
    if luma > 150.0 {
        Rgba([0, 0, 0, 255])
    } else {
        Rgba([255, 255, 255, 255])
    }
}
