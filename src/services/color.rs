//! Color math and palette harmony scoring
//!
//! Colors are compared in HSL space using only the vibrant swatch of each
//! palette. The verdict is a continuous compatibility score in [0, 1].

use crate::{
    error::{AppError, AppResult},
    models::{Palette, Swatch},
};
use palette::{encoding, IntoColor, Srgb};

/// Saturation (percent) below which a color counts as neutral
pub const NEUTRAL_SATURATION_THRESHOLD: f64 = 12.0;

/// Verdict given to any pair involving a neutral color
pub const NEUTRAL_VERDICT: f64 = 0.5;

/// Hue distance (degrees) over which the verdict decays by a factor of e
const HUE_DECAY_DEGREES: f64 = 60.0;

/// Maximum penalty for a warm/cool pair at opposite hues
const WARM_COOL_PENALTY: f64 = 0.3;

/// Color in HSL space: hue in degrees [0, 360), saturation and lightness in
/// percent [0, 100]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Converts 8-bit RGB channels to HSL
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let rgb = Srgb::new(r, g, b).into_format::<f64>();
    let hsl: palette::Hsl<encoding::Srgb, f64> = rgb.into_color();

    Hsl {
        h: hsl.hue.into_positive_degrees(),
        s: hsl.saturation * 100.0,
        l: hsl.lightness * 100.0,
    }
}

/// Returns true when the saturation is strictly below `threshold`
pub fn is_neutral(saturation: f64, threshold: f64) -> bool {
    saturation < threshold
}

/// Circular distance between two hues on the 360° wheel, in [0, 180]
pub fn hue_distance_degrees(h1: f64, h2: f64) -> f64 {
    let distance = (h1 - h2).abs() % 360.0;
    if distance > 180.0 {
        360.0 - distance
    } else {
        distance
    }
}

/// Reds, oranges, yellows and magentas are warm; everything else is cool
pub(crate) fn is_warm_color(hue: f64) -> bool {
    (0.0..=60.0).contains(&hue) || (300.0..=360.0).contains(&hue)
}

/// Breakdown of how two palettes relate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorComparison {
    pub hue_deg: f64,
    pub sat_diff: f64,
    pub light_diff: f64,
    pub neutral_pair: bool,
    pub warm_cool_clash: bool,
    pub verdict: f64,
}

fn vibrant_hsl(palette: &Palette, label: &str) -> AppResult<Hsl> {
    let Swatch { rgb: [r, g, b], .. } = palette.vibrant.ok_or_else(|| {
        AppError::InvalidPalette(format!("{} palette has no vibrant swatch", label))
    })?;
    Ok(rgb_to_hsl(r, g, b))
}

/// Scores the harmony between the vibrant swatches of two palettes
///
/// Neutral pairs always score 0.5. Otherwise the score decays exponentially
/// with hue distance, with an extra penalty for warm/cool pairs more than
/// 60° apart.
pub fn compare_colors(a: &Palette, b: &Palette) -> AppResult<ColorComparison> {
    let first = vibrant_hsl(a, "first")?;
    let second = vibrant_hsl(b, "second")?;

    let hue_deg = hue_distance_degrees(first.h, second.h);
    let sat_diff = (first.s - second.s).abs();
    let light_diff = (first.l - second.l).abs();

    let neutral_pair = is_neutral(first.s, NEUTRAL_SATURATION_THRESHOLD)
        || is_neutral(second.s, NEUTRAL_SATURATION_THRESHOLD);
    let warm_cool_clash = is_warm_color(first.h) != is_warm_color(second.h);

    let verdict = if neutral_pair {
        NEUTRAL_VERDICT
    } else {
        let mut score = (-hue_deg / HUE_DECAY_DEGREES).exp();
        if warm_cool_clash && hue_deg > 60.0 {
            score -= WARM_COOL_PENALTY * (hue_deg - 60.0) / 120.0;
        }
        score.clamp(0.0, 1.0)
    };

    Ok(ColorComparison {
        hue_deg,
        sat_diff,
        light_diff,
        neutral_pair,
        warm_cool_clash,
        verdict,
    })
}
