//! User interface for the dot-logo editor.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main DotLogoApp
//! - `file_ops` - Delivering exports through save dialogs or browser downloads
//! - `canvas` - Pointer painting and screen/canvas coordinate mapping
//! - `rendering` - Drawing the canvas and the export preview
//! - `export` - The export panel

mod canvas;
mod export;
mod file_ops;
mod rendering;
mod state;

pub use state::DotLogoApp;

use crate::constants;
use crate::types::*;
use eframe::egui;
use rendering::{from_color32, to_color32};

/// Storage key for persisted display preferences.
pub const PREFS_KEY: &str = "ui_prefs";

impl eframe::App for DotLogoApp {
    /// Persist display preferences between restarts. The design is not saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => {
                storage.set_string(PREFS_KEY, json);
            }
            Err(err) => {
                log::error!("Failed to serialize display preferences: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar, the controls and export panels, the canvas, and
    /// the structural-change confirmation dialog when one is pending.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_pending_operations(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let viewport_width = ctx.input(|i| i.screen_rect().width());
        let min_width = constants::MIN_PANEL_WIDTH;
        let max_width = (viewport_width * 0.4).max(min_width);
        let clamped_width = self.controls_panel_width.clamp(min_width, max_width);

        egui::SidePanel::left("controls_panel")
            .resizable(true)
            .default_width(clamped_width)
            .show(ctx, |ui| {
                self.controls_panel_width = ui.available_width().clamp(min_width, max_width);
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        self.draw_controls_panel(ui);
                        ui.add_space(12.0);
                        self.draw_export_panel(ui);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        self.draw_confirm_dialog(ctx);
    }
}

impl DotLogoApp {
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Tool:");
            ui.selectable_value(&mut self.session.tool, ToolMode::Generate, "Generate");
            ui.selectable_value(&mut self.session.tool, ToolMode::Paint, "Paint");

            ui.separator();

            ui.add_enabled_ui(!self.session.overlay().is_empty(), |ui| {
                if ui.button("Clear paint").clicked() {
                    self.session.clear_overlay();
                }
            });

            ui.separator();

            let theme_label = if self.dark_mode { "☀ Light" } else { "🌙 Dark" };
            if ui.button(theme_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }

            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status);
            }
        });
    }

    fn draw_controls_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Canvas");
        ui.separator();

        for param in StructuralParam::ALL {
            let mut value = self.session.config().get(param);
            let slider = egui::Slider::new(&mut value, param.range())
                .step_by(1.0)
                .text(param.label());
            if ui.add(slider).changed() {
                self.session.request_change(param, value);
            }
        }

        ui.add_space(4.0);
        let mut default_color = to_color32(self.session.config().default_color);
        ui.horizontal(|ui| {
            ui.label("Dot color");
            if ui.color_edit_button_srgba(&mut default_color).changed() {
                self.session.set_default_color(from_color32(default_color));
            }
        });

        if self.session.tool == ToolMode::Paint {
            let mut brush = to_color32(self.session.brush_color);
            ui.horizontal(|ui| {
                ui.label("Brush");
                if ui.color_edit_button_srgba(&mut brush).changed() {
                    self.session.brush_color = from_color32(brush);
                }
            });
        }

        ui.add_space(6.0);
        let config = self.session.config();
        ui.small(format!("Canvas: {}×{}", config.width, config.height));
        ui.small(format!("Dots in circle: {}", self.session.dots().len()));
        ui.small(format!(
            "Circle radius: {}",
            (config.width.min(config.height) / 2.0 - config.dot_size / 2.0).round()
        ));
        if self.session.tool == ToolMode::Paint {
            ui.small(format!("Painted dots: {}", self.session.overlay().len()));
        }
    }

    /// Shows the confirmation dialog while a structural change is pending.
    fn draw_confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(change) = self.session.pending() else {
            return;
        };

        egui::Window::new(format!("Change {}?", change.param.label().to_lowercase()))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!(
                    "Changing this will clear {} painted dot(s). Continue?",
                    self.session.overlay().len()
                ));
                ui.horizontal(|ui| {
                    if ui.button("Apply and clear").clicked() {
                        self.session.confirm_pending();
                    }
                    if ui.button("Cancel").clicked() {
                        self.session.cancel_pending();
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests;
