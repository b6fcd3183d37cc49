//! Startup defaults loaded from a JSON settings file.
//!
//! Settings only seed a new session. The design itself is never written back.

use crate::error::SettingsError;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial values for a generator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial canvas parameters
    pub canvas: CanvasConfig,
    /// Initial export parameters
    pub export: ExportConfig,
    /// Color applied by paint strokes
    pub brush_color: Rgba,
    /// Initial tool mode
    pub tool: ToolMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            export: ExportConfig::default(),
            brush_color: Rgba::RED,
            tool: ToolMode::Generate,
        }
    }
}

impl Settings {
    /// Serializes the settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads, parses and sanitizes a settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?.sanitized();
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Returns a copy with every numeric value clamped into its allowed range.
    ///
    /// Each adjusted value is reported with a warning.
    pub fn sanitized(&self) -> Self {
        let canvas = self.canvas.clamped();
        for param in StructuralParam::ALL {
            let (before, after) = (self.canvas.get(param), canvas.get(param));
            if before != after {
                log::warn!("{} {before} out of range, using {after}", param.label());
            }
        }

        let export = self.export.clamped();
        if export != self.export {
            log::warn!(
                "export {}x{} @ {}% out of range, using {}x{} @ {}%",
                self.export.target_width,
                self.export.target_height,
                self.export.padding_percent,
                export.target_width,
                export.target_height,
                export.padding_percent
            );
        }

        Self {
            canvas,
            export,
            ..self.clone()
        }
    }
}
