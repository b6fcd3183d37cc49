//! Core data types for the dot-logo generator.
//!
//! This module defines the plain value types shared by the layout engine, the
//! overlay store, the session and both export backends: colors, grid cell keys,
//! dots and the canvas/export configurations.

use crate::constants;
use crate::error::{CellKeyParseError, ColorParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// An 8-bit RGBA color, stored unpremultiplied.
///
/// Serializes as a hex string (`#rrggbb`, or `#rrggbbaa` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel, 255 is opaque
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Opaque red, the default brush.
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether alpha is 255.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Alpha as a 0.0..=1.0 opacity.
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Lowercase hex digits without the leading `#`, e.g. `ff8800`.
    ///
    /// The alpha pair is appended only for translucent colors.
    pub fn hex_digits(&self) -> String {
        if self.is_opaque() {
            format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// The `#rrggbb` form used for SVG `fill` attributes (alpha goes in `fill-opacity`).
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex_digits())
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let pair = |idx: usize| u8::from_str_radix(&digits[idx..idx + 2], 16).map_err(|_| err());
        let nibble = |idx: usize| {
            u8::from_str_radix(&digits[idx..idx + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };
        match digits.len() {
            3 => Ok(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Rgba::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Ok(Rgba::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// Identifies one cell of the centered grid by its column `i` and row `j`.
///
/// The text form is `"i-j"`; it is unambiguous because `-` never appears in a
/// formatted non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    /// Column index
    pub i: u32,
    /// Row index
    pub j: u32,
}

impl CellKey {
    /// Key for column `i`, row `j`.
    pub const fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.i, self.j)
    }
}

impl FromStr for CellKey {
    type Err = CellKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CellKeyParseError(s.to_string());
        let (i, j) = s.trim().split_once('-').ok_or_else(err)?;
        let parse = |part: &str| {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(err());
            }
            part.parse::<u32>().map_err(|_| err())
        };
        Ok(CellKey::new(parse(i)?, parse(j)?))
    }
}

/// A single rendered dot in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// The grid cell this dot occupies
    pub cell: CellKey,
    /// Center x in canvas units
    pub x: f32,
    /// Center y in canvas units
    pub y: f32,
    /// Resolved fill color (overlay value or the default color)
    pub color: Rgba,
}

/// Parameters that define the dot grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in canvas units
    pub width: f32,
    /// Canvas height in canvas units
    pub height: f32,
    /// Dot diameter
    pub dot_size: f32,
    /// Gap between neighbouring dots
    pub dot_spacing: f32,
    /// Color used for every dot without an overlay entry
    pub default_color: Rgba,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: constants::DEFAULT_CANVAS_WIDTH,
            height: constants::DEFAULT_CANVAS_HEIGHT,
            dot_size: constants::DEFAULT_DOT_SIZE,
            dot_spacing: constants::DEFAULT_DOT_SPACING,
            default_color: Rgba::BLACK,
        }
    }
}

impl CanvasConfig {
    /// Distance between neighbouring dot centers.
    pub fn step(&self) -> f32 {
        self.dot_size + self.dot_spacing
    }

    /// Height matching `width` at the canvas aspect ratio, rounded half up.
    ///
    /// Computed in `f64` so that exact `.5` results round up.
    pub fn height_for_width(&self, width: u32) -> u32 {
        scale_rounded(width, self.height, self.width)
    }

    /// Width matching `height` at the canvas aspect ratio, rounded half up.
    pub fn width_for_height(&self, height: u32) -> u32 {
        scale_rounded(height, self.width, self.height)
    }

    /// Returns the current value of a layout-affecting parameter.
    pub fn get(&self, param: StructuralParam) -> f32 {
        match param {
            StructuralParam::CanvasWidth => self.width,
            StructuralParam::CanvasHeight => self.height,
            StructuralParam::DotSize => self.dot_size,
            StructuralParam::DotSpacing => self.dot_spacing,
        }
    }

    /// Sets a layout-affecting parameter, clamped to its allowed range.
    pub fn set(&mut self, param: StructuralParam, value: f32) {
        let value = param.clamp(value);
        match param {
            StructuralParam::CanvasWidth => self.width = value,
            StructuralParam::CanvasHeight => self.height = value,
            StructuralParam::DotSize => self.dot_size = value,
            StructuralParam::DotSpacing => self.dot_spacing = value,
        }
    }

    /// Returns a copy with every structural parameter clamped into range.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for param in StructuralParam::ALL {
            out.set(param, self.get(param));
        }
        out
    }
}

/// `value * numerator / denominator` rounded to the nearest integer, ties up.
fn scale_rounded(value: u32, numerator: f32, denominator: f32) -> u32 {
    let exact = f64::from(value) * f64::from(numerator) / f64::from(denominator);
    // Float-to-int casts saturate, so a degenerate ratio cannot wrap.
    exact.round() as u32
}

/// The canvas parameters whose change moves or removes dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructuralParam {
    /// Canvas width
    CanvasWidth,
    /// Canvas height
    CanvasHeight,
    /// Dot diameter
    DotSize,
    /// Gap between dots
    DotSpacing,
}

impl StructuralParam {
    /// Every structural parameter, in control-panel order.
    pub const ALL: [StructuralParam; 4] = [
        StructuralParam::CanvasWidth,
        StructuralParam::CanvasHeight,
        StructuralParam::DotSize,
        StructuralParam::DotSpacing,
    ];

    /// Human readable label for controls and dialogs.
    pub fn label(&self) -> &'static str {
        match self {
            StructuralParam::CanvasWidth => "Canvas width",
            StructuralParam::CanvasHeight => "Canvas height",
            StructuralParam::DotSize => "Dot size",
            StructuralParam::DotSpacing => "Dot spacing",
        }
    }

    /// Allowed values for this parameter.
    pub fn range(&self) -> RangeInclusive<f32> {
        match self {
            StructuralParam::CanvasWidth | StructuralParam::CanvasHeight => {
                constants::CANVAS_DIMENSION_RANGE
            }
            StructuralParam::DotSize => constants::DOT_SIZE_RANGE,
            StructuralParam::DotSpacing => constants::DOT_SPACING_RANGE,
        }
    }

    /// Clamps a value into this parameter's allowed range. NaN maps to the range start.
    pub fn clamp(&self, value: f32) -> f32 {
        let range = self.range();
        if value.is_nan() {
            *range.start()
        } else {
            value.clamp(*range.start(), *range.end())
        }
    }
}

/// A structural edit held back until the user confirms or cancels it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingChange {
    /// Parameter being changed
    pub param: StructuralParam,
    /// Requested value, already clamped
    pub value: f32,
}

/// Interaction mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Pointer input is ignored; only the controls change the design
    #[default]
    Generate,
    /// Pointer presses and drags paint dots with the brush color
    Paint,
}

/// Output encoding of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Self-contained SVG document of circles
    Svg,
    /// Lossless PNG raster
    #[default]
    Png,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    /// MIME type of the encoded output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }

    /// Short display name.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "SVG",
            ExportFormat::Png => "PNG",
        }
    }
}

/// Which export size family is active. Non-custom modes map to a preset category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Social media avatars and posts
    Social,
    /// App and favicon sizes
    Icon,
    /// Site headers and logos
    Web,
    /// Print-resolution sizes
    Print,
    /// A freely chosen size
    #[default]
    Custom,
}

impl ExportMode {
    /// Every mode, in selector order.
    pub const ALL: [ExportMode; 5] = [
        ExportMode::Social,
        ExportMode::Icon,
        ExportMode::Web,
        ExportMode::Print,
        ExportMode::Custom,
    ];

    /// Lowercase identifier, also used in export file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMode::Social => "social",
            ExportMode::Icon => "icon",
            ExportMode::Web => "web",
            ExportMode::Print => "print",
            ExportMode::Custom => "custom",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings that control how the design is written to a file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output width in pixels
    pub target_width: u32,
    /// Output height in pixels
    pub target_height: u32,
    /// Padding as a percentage of the shorter output side
    pub padding_percent: u32,
    /// Whether to paint `background_color` behind the dots
    pub use_background: bool,
    /// Background fill when `use_background` is set
    pub background_color: Rgba,
    /// Output encoding
    pub format: ExportFormat,
    /// Keep the output aspect equal to the canvas aspect when editing a dimension
    pub aspect_locked: bool,
    /// Active size family; also names the exported file
    pub mode: ExportMode,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            target_width: constants::DEFAULT_EXPORT_SIZE,
            target_height: constants::DEFAULT_EXPORT_SIZE,
            padding_percent: constants::DEFAULT_PADDING_PERCENT,
            use_background: false,
            background_color: Rgba::WHITE,
            format: ExportFormat::Png,
            aspect_locked: true,
            mode: ExportMode::Custom,
        }
    }
}

impl ExportConfig {
    /// Returns a copy targeting a different output size, all other settings kept.
    pub fn with_size(&self, width: u32, height: u32) -> Self {
        Self {
            target_width: width,
            target_height: height,
            ..*self
        }
    }

    /// Returns a copy with dimensions and padding clamped into range.
    pub fn clamped(&self) -> Self {
        let dims = constants::EXPORT_DIMENSION_RANGE;
        let pad = constants::PADDING_PERCENT_RANGE;
        Self {
            target_width: self.target_width.clamp(*dims.start(), *dims.end()),
            target_height: self.target_height.clamp(*dims.start(), *dims.end()),
            padding_percent: self.padding_percent.clamp(*pad.start(), *pad.end()),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_dimensions_round_exact_halves_up() {
        let canvas = CanvasConfig {
            width: 100.0,
            height: 106.0,
            ..CanvasConfig::default()
        };
        // 25 * 106 / 100 = 26.5
        assert_eq!(canvas.height_for_width(25), 27);
        // 53 * 100 / 106 = 50
        assert_eq!(canvas.width_for_height(53), 50);

        let wide = CanvasConfig {
            width: 106.0,
            height: 100.0,
            ..CanvasConfig::default()
        };
        assert_eq!(wide.width_for_height(25), 27);
        assert_eq!(wide.height_for_width(53), 50);
    }

    #[test]
    fn color_parses_short_long_and_alpha_forms() {
        assert_eq!("#000".parse::<Rgba>().unwrap(), Rgba::BLACK);
        assert_eq!("#f80".parse::<Rgba>().unwrap(), Rgba::rgb(255, 136, 0));
        assert_eq!("#FF0000".parse::<Rgba>().unwrap(), Rgba::RED);
        assert_eq!(
            "#11223380".parse::<Rgba>().unwrap(),
            Rgba::rgba(0x11, 0x22, 0x33, 0x80)
        );
    }

    #[test]
    fn color_rejects_malformed_input() {
        for bad in ["", "000000", "#12", "#12345", "#gggggg", "#+12345"] {
            assert!(bad.parse::<Rgba>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgba::rgb(0x12, 0xab, 0xef)).unwrap();
        assert_eq!(json, "\"#12abef\"");
        let back: Rgba = serde_json::from_str("\"#12abef80\"").unwrap();
        assert_eq!(back, Rgba::rgba(0x12, 0xab, 0xef, 0x80));
        assert_eq!(back.to_rgb_hex(), "#12abef");
    }

    #[test]
    fn cell_key_text_form_is_unambiguous_for_multi_digit_indices() {
        let a = CellKey::new(1, 23);
        let b = CellKey::new(12, 3);
        assert_eq!(a.to_string(), "1-23");
        assert_eq!(b.to_string(), "12-3");
        assert_ne!(a.to_string(), b.to_string());
        assert_eq!("12-3".parse::<CellKey>().unwrap(), b);
        assert!("12".parse::<CellKey>().is_err());
        assert!("-1-2".parse::<CellKey>().is_err());
        assert!("1-".parse::<CellKey>().is_err());
    }

    #[test]
    fn structural_set_clamps_to_allowed_range() {
        let mut config = CanvasConfig::default();
        config.set(StructuralParam::CanvasWidth, 5000.0);
        config.set(StructuralParam::DotSize, 0.0);
        config.set(StructuralParam::DotSpacing, f32::NAN);
        assert_eq!(config.width, 1000.0);
        assert_eq!(config.dot_size, 2.0);
        assert_eq!(config.dot_spacing, 0.0);
        assert!(config.step() > 0.0);
    }

    #[test]
    fn export_config_clamps_dimensions_and_padding() {
        let config = ExportConfig {
            target_width: 4,
            target_height: 9000,
            padding_percent: 80,
            ..ExportConfig::default()
        }
        .clamped();
        assert_eq!(config.target_width, 16);
        assert_eq!(config.target_height, 2000);
        assert_eq!(config.padding_percent, 40);
    }
}
