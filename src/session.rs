//! Interactive generator session.
//!
//! A [`Session`] owns the canvas configuration, the color overlay, the single
//! pending structural change and the export settings. Every mutation goes
//! through one of its methods so the confirmation gate cannot be bypassed.

use crate::constants;
use crate::error::ExportError;
use crate::export::{self, ExportSummary, ExportedImage};
use crate::layout;
use crate::overlay::ColorOverlay;
use crate::presets::{self, Preset};
use crate::settings::Settings;
use crate::types::*;

/// State of the structural-change confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuardState {
    /// No change is waiting for a decision
    Idle,
    /// A structural change is held until confirmed or canceled
    PendingConfirmation(PendingChange),
}

/// What happened to a structural change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The value was applied right away
    Applied,
    /// Painted dots exist; the value is held for confirmation
    PendingConfirmation,
}

/// The generator's mutable state.
#[derive(Debug, Clone)]
pub struct Session {
    config: CanvasConfig,
    overlay: ColorOverlay,
    pending: Option<PendingChange>,
    export: ExportConfig,
    /// Active pointer tool
    pub tool: ToolMode,
    /// Color written by paint strokes
    pub brush_color: Rgba,
    painting: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Session {
    /// Starts a session from (sanitized) settings with an empty overlay.
    pub fn new(settings: &Settings) -> Self {
        let settings = settings.sanitized();
        Self {
            config: settings.canvas,
            overlay: ColorOverlay::new(),
            pending: None,
            export: settings.export,
            tool: settings.tool,
            brush_color: settings.brush_color,
            painting: false,
        }
    }

    /// Current canvas parameters.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Painted colors.
    pub fn overlay(&self) -> &ColorOverlay {
        &self.overlay
    }

    /// Current export settings.
    pub fn export_config(&self) -> &ExportConfig {
        &self.export
    }

    /// The change awaiting confirmation, if any.
    pub fn pending(&self) -> Option<PendingChange> {
        self.pending
    }

    /// Whether a structural change is being held back.
    pub fn guard_state(&self) -> GuardState {
        match self.pending {
            Some(change) => GuardState::PendingConfirmation(change),
            None => GuardState::Idle,
        }
    }

    /// Lays out the current design.
    pub fn dots(&self) -> Vec<Dot> {
        layout::layout(&self.config, &self.overlay)
    }

    // ---------------------------------------------------------------------
    // Structural-change guard
    // ---------------------------------------------------------------------

    /// Requests a change to a layout-affecting parameter.
    ///
    /// The value is clamped into its range first. With no painted dots it is
    /// applied at once; otherwise it replaces whatever change was already held.
    pub fn request_change(&mut self, param: StructuralParam, value: f32) -> ChangeOutcome {
        let value = param.clamp(value);

        if self.overlay.is_empty() {
            self.config.set(param, value);
            self.pending = None;
            return ChangeOutcome::Applied;
        }

        if let Some(previous) = self.pending.replace(PendingChange { param, value }) {
            log::debug!(
                "replacing pending {} change ({} -> {value})",
                previous.param.label(),
                previous.value
            );
        } else {
            log::debug!("holding {} change to {value} for confirmation", param.label());
        }
        ChangeOutcome::PendingConfirmation
    }

    /// Applies the held change and wipes the overlay.
    ///
    /// Returns `false` when nothing was pending.
    pub fn confirm_pending(&mut self) -> bool {
        let Some(change) = self.pending.take() else {
            return false;
        };
        self.config.set(change.param, change.value);
        self.overlay.clear();
        log::debug!("confirmed {} = {}, overlay cleared", change.param.label(), change.value);
        true
    }

    /// Discards the held change. Configuration and overlay stay as they were.
    pub fn cancel_pending(&mut self) {
        if let Some(change) = self.pending.take() {
            log::debug!("canceled {} change to {}", change.param.label(), change.value);
        }
    }

    /// Changes the color of unpainted dots. Painted dots keep their colors.
    pub fn set_default_color(&mut self, color: Rgba) {
        self.config.default_color = color;
    }

    /// Removes every painted color.
    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
    }

    // ---------------------------------------------------------------------
    // Painting
    // ---------------------------------------------------------------------

    /// Paints the dot under a canvas-space position with the brush color.
    pub fn paint_at(&mut self, x: f32, y: f32) -> Option<CellKey> {
        let cell = layout::hit_test(x, y, &self.config)?;
        if self.overlay.paint(cell, self.brush_color) {
            log::debug!("painted {cell} {}", self.brush_color);
        }
        Some(cell)
    }

    /// Paints a cell directly by key. Cells outside the current layout are ignored.
    pub fn paint_cell(&mut self, cell: CellKey, color: Rgba) -> bool {
        let Some(grid) = layout::GridGeometry::new(&self.config) else {
            return false;
        };
        if cell.i >= grid.cols || cell.j >= grid.rows {
            return false;
        }
        let (x, y) = grid.cell_position(cell);
        if !grid.includes(x, y) {
            return false;
        }
        self.overlay.paint(cell, color);
        true
    }

    /// Starts a paint stroke. Ignored outside paint mode.
    pub fn pointer_pressed(&mut self, x: f32, y: f32) -> Option<CellKey> {
        if self.tool != ToolMode::Paint {
            return None;
        }
        self.painting = true;
        self.paint_at(x, y)
    }

    /// Continues a paint stroke, if one is in progress.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Option<CellKey> {
        if !self.painting || self.tool != ToolMode::Paint {
            return None;
        }
        self.paint_at(x, y)
    }

    /// Ends the current paint stroke.
    pub fn pointer_released(&mut self) {
        self.painting = false;
    }

    /// Whether a paint stroke is in progress.
    pub fn is_painting(&self) -> bool {
        self.painting
    }

    // ---------------------------------------------------------------------
    // Export settings
    // ---------------------------------------------------------------------

    /// Sets the export width; with the aspect lock on the height follows the
    /// canvas aspect ratio.
    pub fn set_export_width(&mut self, width: u32) {
        let width = clamp_export_dimension(width);
        self.export.target_width = width;
        if self.export.aspect_locked {
            self.export.target_height = clamp_export_dimension(self.config.height_for_width(width));
        }
    }

    /// Sets the export height; with the aspect lock on the width follows the
    /// canvas aspect ratio.
    pub fn set_export_height(&mut self, height: u32) {
        let height = clamp_export_dimension(height);
        self.export.target_height = height;
        if self.export.aspect_locked {
            self.export.target_width = clamp_export_dimension(self.config.width_for_height(height));
        }
    }

    /// Turns the export aspect lock on or off. Existing dimensions are left as they are.
    pub fn set_aspect_locked(&mut self, locked: bool) {
        self.export.aspect_locked = locked;
    }

    /// Sets export padding, clamped to 0-40%.
    pub fn set_padding_percent(&mut self, percent: u32) {
        let range = constants::PADDING_PERCENT_RANGE;
        self.export.padding_percent = percent.clamp(*range.start(), *range.end());
    }

    /// Chooses SVG or PNG output.
    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.export.format = format;
    }

    /// Enables or disables the export background and sets its color.
    pub fn set_background(&mut self, enabled: bool, color: Rgba) {
        self.export.use_background = enabled;
        self.export.background_color = color;
    }

    /// Switches preset category.
    ///
    /// A category adopts its first preset's size and its recommended format
    /// and padding. Custom keeps the current values.
    pub fn select_export_mode(&mut self, mode: ExportMode) {
        self.export.mode = mode;
        if let Some(first) = presets::presets_for(mode).first() {
            self.export.target_width = first.width;
            self.export.target_height = first.height;
        }
        if let Some((format, padding)) = presets::recommended_output(mode) {
            self.export.format = format;
            self.export.padding_percent = padding;
        }
    }

    /// Makes a preset the current export size.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.export.target_width = preset.width;
        self.export.target_height = preset.height;
    }

    /// Exports the design with the current export settings.
    pub fn export(&self) -> Result<ExportedImage, ExportError> {
        export::export_image(&self.dots(), &self.config, &self.export)
    }

    /// Exports at a preset's size without changing the current export size.
    pub fn export_preset(&self, preset: &Preset) -> Result<ExportedImage, ExportError> {
        let target = self.export.with_size(preset.width, preset.height);
        export::export_image(&self.dots(), &self.config, &target)
    }

    /// Numbers describing what `export` would produce.
    pub fn export_summary(&self) -> ExportSummary {
        ExportSummary::new(self.dots().len(), &self.config, &self.export)
    }
}

fn clamp_export_dimension(value: u32) -> u32 {
    let range = constants::EXPORT_DIMENSION_RANGE;
    value.clamp(*range.start(), *range.end())
}
