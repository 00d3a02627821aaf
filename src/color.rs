//! Color type passed between the picker and its host.
//!
//! Stores RGBA as f64 values in 0.0–1.0 range. Hex strings are read in
//! `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA` forms and always written as
//! `#RRGGBBAA`.

use serde::{Deserialize, Serialize};

use crate::math;

/// RGBA color with components in the 0.0–1.0 range.
///
/// Serialized as an `[r, g, b, a]` quadruple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Color {
    pub const WHITE: Color = Color::from_rgba_unchecked(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::from_rgba_unchecked(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color = Color::from_rgba_unchecked(1.0, 0.0, 0.0, 1.0);

    const fn from_rgba_unchecked(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Red component (0.0–1.0).
    pub fn r(&self) -> f64 {
        self.r
    }
    /// Green component (0.0–1.0).
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Blue component (0.0–1.0).
    pub fn b(&self) -> f64 {
        self.b
    }
    /// Alpha component (0.0–1.0).
    pub fn a(&self) -> f64 {
        self.a
    }
}

impl Default for Color {
    fn default() -> Self {
        Self {
            r: 0.5,
            g: 0.5,
            b: 0.5,
            a: 1.0,
        }
    }
}

impl From<[f64; 4]> for Color {
    fn from([r, g, b, a]: [f64; 4]) -> Self {
        Self::from_rgba(r, g, b, a)
    }
}

impl From<Color> for [f64; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl Color {
    /// Create from f64 RGBA. Components are clamped to 0.0–1.0.
    pub fn from_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    /// Create from 0–255 RGBA values.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Convert to a 0–255 RGBA array.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: unit(a), ..self }
    }

    /// Create from HSV values (all 0.0–1.0).
    pub fn from_hsva(h: f64, s: f64, v: f64, a: f64) -> Self {
        let (r, g, b) = math::hsv_to_rgb(h, s, v);
        Self::from_rgba(r, g, b, a)
    }

    /// Convert to HSV (all 0.0–1.0). Returns (h, s, v); grey yields a hue of 0.
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        math::rgb_to_hsv(self.r, self.g, self.b)
    }

    /// Parse a hex string, with or without `#`, of 3, 4, 6 or 8 digits.
    ///
    /// Shorthand digits are doubled (`F` → `FF`). Forms without alpha are
    /// fully opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim();
        let stripped = stripped.strip_prefix('#').unwrap_or(stripped);
        if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&stripped[i..i + 1], 16).ok().map(|n| n * 17);
        let byte = |i: usize| u8::from_str_radix(&stripped[i..i + 2], 16).ok();
        let [r, g, b, a] = match stripped.len() {
            3 => [nibble(0)?, nibble(1)?, nibble(2)?, 255],
            4 => [nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?],
            6 => [byte(0)?, byte(2)?, byte(4)?, 255],
            8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
            _ => return None,
        };
        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#RRGGBBAA`, uppercase.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}
