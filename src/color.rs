//! Color model conversion between RGB and HSV/HSL.
//!
//! The daemon only understands absolute RGB triplets, while the bridge talks
//! in hue and saturation. Conversions here are pure and deterministic; when an
//! RGB triplet has to be synthesized from hue and saturation alone,
//! [`DEFAULT_LIGHTNESS`] supplies the missing lightness, since brightness is
//! driven through the dedicated brightness channel instead.

use crate::types::{Color, Hue, Saturation};

/// Lightness percentage used when building an RGB triplet from hue and
/// saturation only.
pub const DEFAULT_LIGHTNESS: f32 = 50.0;

/// A color in HSV space: hue in degrees (0-360), saturation and value in
/// percent (0-100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Hsv {
    pub fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Hsv {
            hue,
            saturation,
            value,
        }
    }
}

/// A color in HSL space: hue in degrees (0-360), saturation and lightness in
/// percent (0-100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }
}

/// Convert an RGB color to HSV.
///
/// For achromatic colors (r == g == b) the hue is reported as 0; any hue is
/// equally valid there.
pub fn rgb_to_hsv(color: Color) -> Hsv {
    let (r, g, b) = unit_channels(color);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };
    Hsv::new(hue_of(r, g, b, max, delta), saturation, max * 100.0)
}

/// Convert an HSV color to RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> Color {
    let s = hsv.saturation / 100.0;
    let v = hsv.value / 100.0;

    let chroma = v * s;
    from_sector(hsv.hue, chroma, v - chroma)
}

/// Convert an RGB color to HSL.
pub fn rgb_to_hsl(color: Color) -> Hsl {
    let (r, g, b) = unit_channels(color);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    let saturation = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * lightness - 1.0).abs()) * 100.0
    };
    Hsl::new(hue_of(r, g, b, max, delta), saturation, lightness * 100.0)
}

/// Convert an HSL color to RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> Color {
    let s = hsl.saturation / 100.0;
    let l = hsl.lightness / 100.0;

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    from_sector(hsl.hue, chroma, l - chroma / 2.0)
}

/// Build the RGB triplet the daemon should display for a hue/saturation pair,
/// using [`DEFAULT_LIGHTNESS`] for the missing component.
pub fn color_for_hs(hue: Hue, saturation: Saturation) -> Color {
    hsl_to_rgb(Hsl::new(
        hue.degrees(),
        saturation.percent(),
        DEFAULT_LIGHTNESS,
    ))
}

fn unit_channels(color: Color) -> (f32, f32, f32) {
    (
        color.red() as f32 / 255.0,
        color.green() as f32 / 255.0,
        color.blue() as f32 / 255.0,
    )
}

fn hue_of(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let hue = if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if hue < 0.0 { hue + 360.0 } else { hue }
}

/// Reassemble RGB from a hue sector, its chroma, and the per-channel offset.
fn from_sector(hue: f32, chroma: f32, offset: f32) -> Color {
    let h = (hue % 360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = match h.floor() as i32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Color::rgb(
        ((r + offset) * 255.0).round() as u8,
        ((g + offset) * 255.0).round() as u8,
        ((b + offset) * 255.0).round() as u8,
    )
}
