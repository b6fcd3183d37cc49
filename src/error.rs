//! Error types for parsing, settings and export.

use thiserror::Error;

/// A color string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}': expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

/// A grid cell key could not be parsed from its `i-j` text form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cell key '{0}': expected two non-negative integers joined by '-'")]
pub struct CellKeyParseError(pub String);

/// Errors raised while producing an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The raster surface for the requested size could not be allocated
    #[error("could not allocate a {width}x{height} drawing surface")]
    SurfaceUnavailable {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// The image codec failed; no partial output is produced
    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// Errors raised while loading or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`crate::Settings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
