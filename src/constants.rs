//! Shared application-wide constants.
//! Centralizes input ranges, defaults and tuning factors used by the core and the UI.

use std::ops::RangeInclusive;

// Canvas parameter ranges
/// Allowed canvas width/height in canvas units.
pub const CANVAS_DIMENSION_RANGE: RangeInclusive<f32> = 100.0..=1000.0;
/// Allowed dot diameter in canvas units.
pub const DOT_SIZE_RANGE: RangeInclusive<f32> = 2.0..=50.0;
/// Allowed gap between neighbouring dots in canvas units.
pub const DOT_SPACING_RANGE: RangeInclusive<f32> = 0.0..=30.0;

// Export parameter ranges
/// Allowed export width/height in pixels.
pub const EXPORT_DIMENSION_RANGE: RangeInclusive<u32> = 16..=2000;
/// Allowed export padding as a percentage of the shorter export side.
pub const PADDING_PERCENT_RANGE: RangeInclusive<u32> = 0..=40;

// Defaults
/// Canvas width for a fresh design.
pub const DEFAULT_CANVAS_WIDTH: f32 = 500.0;
/// Canvas height for a fresh design.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 500.0;
/// Dot diameter for a fresh design.
pub const DEFAULT_DOT_SIZE: f32 = 10.0;
/// Gap between neighbouring dots for a fresh design.
pub const DEFAULT_DOT_SPACING: f32 = 5.0;
/// Square export size used in custom mode.
pub const DEFAULT_EXPORT_SIZE: u32 = 500;
/// Export padding for a fresh design.
pub const DEFAULT_PADDING_PERCENT: u32 = 15;

// Layout tuning
/// Cells closer than `step * AXIS_BAND_FACTOR` to either axis count as "near an axis".
pub const AXIS_BAND_FACTOR: f32 = 0.4;
/// Extra radius (as a fraction of `step`) granted to near-axis cells.
pub const AXIS_RADIUS_BOOST_FACTOR: f32 = 0.25;

// Export
/// Smallest exported dot diameter in pixels.
pub const MIN_EXPORT_DOT_SIZE: f32 = 1.0;

// UI
/// Largest side of the export preview thumbnail, in screen points.
pub const PREVIEW_MAX_SIDE: f32 = 140.0;
/// Fraction of the export size used for the preview thumbnail when it is small.
pub const PREVIEW_SCALE: f32 = 0.35;
/// Largest side of the on-screen canvas, in screen points.
pub const CANVAS_DISPLAY_MAX: f32 = 500.0;
/// Narrowest the controls panel may be dragged.
pub const MIN_PANEL_WIDTH: f32 = 220.0;
/// Controls panel width on first launch.
pub const DEFAULT_PANEL_WIDTH: f32 = 300.0;
