//! Pixel surfaces behind the picker: the saturation/value plane, the hue and
//! alpha ramps, and the checkerboard drawn under translucent areas.
//!
//! Each surface is rebuilt wholesale into a fresh buffer and swapped in; a
//! buffer handed out earlier is never written to again.

use std::sync::Arc;

use crate::color::Color;
use crate::constants;
use crate::math;
use crate::model::{ColorChange, ColorModel, EditOrigin};

/// An RGBA8 pixel grid.
///
/// Rows are stored top to bottom, ready for upload as an image. [`Bitmap::pixel`]
/// addresses pixels with `y` measured upward from the bottom edge, matching the
/// picker convention that value, hue and alpha grow upward.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Build a bitmap by evaluating `f(x, y)` for every pixel, `y` upward.
    fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut buf = vec![0u8; (width as usize) * (height as usize) * 4];
        for row in 0..height {
            let y = height - 1 - row;
            let row_offset = (row as usize) * (width as usize) * 4;
            for x in 0..width {
                let offset = row_offset + (x as usize) * 4;
                buf[offset..offset + 4].copy_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels: Arc::new(buf),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at column `x`, `y` pixels up from the bottom.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = (self.height - 1 - y) as usize;
        let offset = (row * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(px)
    }

    /// Shared handle to the raw top-down RGBA8 rows.
    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.pixels
    }
}

/// Quantize a 0.0–1.0 RGBA to bytes.
pub fn rgba8(r: f64, g: f64, b: f64, a: f64) -> [u8; 4] {
    [
        (r * 255.0 + 0.5) as u8,
        (g * 255.0 + 0.5) as u8,
        (b * 255.0 + 0.5) as u8,
        (a * 255.0 + 0.5) as u8,
    ]
}

/// Saturation along x, value along y, at a fixed hue and alpha.
pub fn saturation_value_plane(width: u32, height: u32, hue: f64, alpha: f64) -> Bitmap {
    let (w, h) = (width as f64, height as f64);
    Bitmap::from_fn(width, height, |x, y| {
        let (r, g, b) = math::hsv_to_rgb(hue, x as f64 / w, y as f64 / h);
        rgba8(r, g, b, alpha)
    })
}

/// A 1-pixel-wide column sweeping the full hue range, opaque.
pub fn hue_ramp(height: u32) -> Bitmap {
    let h = height as f64;
    Bitmap::from_fn(1, height, |_, y| {
        let (r, g, b) = math::hsv_to_rgb(y as f64 / h, 1.0, 1.0);
        rgba8(r, g, b, 1.0)
    })
}

/// A 1-pixel-wide column fading `color` from transparent (bottom) to opaque.
pub fn alpha_ramp(height: u32, color: Color) -> Bitmap {
    let h = height as f64;
    Bitmap::from_fn(1, height, |_, y| {
        rgba8(color.r(), color.g(), color.b(), y as f64 / h)
    })
}

/// Two-tone checkerboard in `block`-sized squares, lower-left square light.
pub fn checkerboard(width: u32, height: u32, block: u32) -> Bitmap {
    let block = block.max(1);
    Bitmap::from_fn(width, height, |x, y| {
        if (x / block + y / block) % 2 == 0 {
            constants::CHECKER_LIGHT
        } else {
            constants::CHECKER_DARK
        }
    })
}

/// Which surfaces a refresh rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regenerated {
    pub plane: bool,
    pub hue: bool,
    pub alpha: bool,
}

/// Bumped every time the matching surface is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Revisions {
    pub plane: u64,
    pub hue: u64,
    pub alpha: u64,
}

/// Owns the color-dependent surfaces and the checkerboard cache.
#[derive(Debug)]
pub struct Surfaces {
    size: u32,
    block: u32,
    plane: Bitmap,
    hue: Bitmap,
    alpha: Bitmap,
    revisions: Revisions,
    /// Most recently used first, at most `CHECKER_CACHE` sizes.
    checkers: Vec<Bitmap>,
}

impl Surfaces {
    /// Build every surface for a `size`×`size` plane and `size`-tall ramps.
    pub fn new(size: u32, block: u32, model: &ColorModel) -> Self {
        Self {
            size,
            block,
            plane: saturation_value_plane(size, size, model.h(), model.a()),
            hue: hue_ramp(size),
            alpha: alpha_ramp(size, model.color()),
            revisions: Revisions::default(),
            checkers: Vec::new(),
        }
    }

    /// Rebuild only the surfaces the change can affect.
    pub fn refresh(&mut self, change: &ColorChange) -> Regenerated {
        let done = Regenerated {
            plane: change.hue_changed || change.alpha_changed,
            hue: change.origin == EditOrigin::Rgb && change.rgb_changed,
            alpha: change.hsv_changed() || change.rgb_changed,
        };
        if done.plane {
            self.plane =
                saturation_value_plane(self.size, self.size, change.hsv.h, change.color.a());
            self.revisions.plane += 1;
        }
        if done.hue {
            self.hue = hue_ramp(self.size);
            self.revisions.hue += 1;
        }
        if done.alpha {
            self.alpha = alpha_ramp(self.size, change.color);
            self.revisions.alpha += 1;
        }
        done
    }

    pub fn plane(&self) -> &Bitmap {
        &self.plane
    }

    pub fn hue(&self) -> &Bitmap {
        &self.hue
    }

    pub fn alpha(&self) -> &Bitmap {
        &self.alpha
    }

    pub fn revisions(&self) -> Revisions {
        self.revisions
    }

    /// Checkerboard for a `width`×`height` area. The last few sizes are kept,
    /// so each view on screen reuses one buffer.
    pub fn checkerboard(&mut self, width: u32, height: u32) -> Bitmap {
        let found = self
            .checkers
            .iter()
            .position(|c| c.width() == width && c.height() == height);
        let bitmap = match found {
            Some(i) => self.checkers.remove(i),
            None => checkerboard(width, height, self.block),
        };
        self.checkers.insert(0, bitmap.clone());
        self.checkers.truncate(constants::CHECKER_CACHE);
        bitmap
    }
}
