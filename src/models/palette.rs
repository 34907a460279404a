use serde::{Deserialize, Serialize};

/// One extracted color and how much of the image it covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Swatch {
    pub rgb: [u8; 3],
    #[serde(default)]
    pub population: u32,
}

impl Swatch {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: [r, g, b],
            population: 0,
        }
    }
}

/// Named swatches extracted from an item image
///
/// Only the vibrant swatch is used for color harmony. A palette without one
/// is invalid for scoring and is rejected by the color scorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Palette {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibrant: Option<Swatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_vibrant: Option<Swatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_vibrant: Option<Swatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<Swatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_muted: Option<Swatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_muted: Option<Swatch>,
}

impl Palette {
    /// Palette holding only a vibrant swatch
    pub fn vibrant(r: u8, g: u8, b: u8) -> Self {
        Self {
            vibrant: Some(Swatch::new(r, g, b)),
            ..Default::default()
        }
    }
}
