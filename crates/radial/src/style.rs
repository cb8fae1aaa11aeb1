use crate::error::MenuError;
use crate::menu::{
    DEFAULT_CENTER_BORDER, DEFAULT_CENTER_SIZE, DEFAULT_FOCUS_BORDER, DEFAULT_FONT_FAMILY,
    DEFAULT_FONT_SIZE, DEFAULT_STEP,
};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// An opaque color written as `#rrggbb` (or `#rgb`) in configuration.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const WHITE: Self = Self(Srgb::new(255, 255, 255));
    pub const LIGHT_GRAY: Self = Self(Srgb::new(211, 211, 211));
    pub const GRAY: Self = Self(Srgb::new(128, 128, 128));

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Channels as cairo wants them.
    pub fn to_rgb_f64(self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }

    /// The pixel value of this color, fully opaque, in cairo's native-endian
    /// ARGB32 layout.
    pub fn argb32(self) -> u32 {
        let (r, g, b) = self.0.into_components();
        0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Srgb<u8>>().map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Sizes, colors and pacing of a menu. Owned by the host and read by the
/// core on every paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuStyle {
    pub font_family: String,
    pub font_size: f64,
    pub focus_border: f64,
    pub center_size: f64,
    pub center_border: f64,
    /// Progress units added per animation tick.
    pub step: u32,
    pub normal_color: HexColor,
    pub highlight_color: HexColor,
    /// Painted behind everything and keyed out to transparent.
    pub background_color: HexColor,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            focus_border: DEFAULT_FOCUS_BORDER,
            center_size: DEFAULT_CENTER_SIZE,
            center_border: DEFAULT_CENTER_BORDER,
            step: DEFAULT_STEP,
            normal_color: HexColor::LIGHT_GRAY,
            highlight_color: HexColor::GRAY,
            background_color: HexColor::WHITE,
        }
    }
}

impl MenuStyle {
    /// Pointer distance at or below which the center zone is focused.
    pub fn center_radius(&self) -> f64 {
        (self.center_size + self.center_border) / 2.0
    }

    /// Checks every dimension and returns the animation step.
    pub fn validate(&self) -> Result<NonZeroU32, MenuError> {
        let dimensions = [
            ("font_size", self.font_size),
            ("focus_border", self.focus_border),
            ("center_size", self.center_size),
            ("center_border", self.center_border),
        ];

        if let Some((name, value)) = dimensions
            .into_iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(MenuError::InvalidDimension { name, value });
        }

        NonZeroU32::new(self.step).ok_or(MenuError::ZeroStep)
    }
}
