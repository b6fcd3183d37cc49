//! Export panel: preset categories, output size, padding, background and format.
//!
//! Notes:
//! - Dimension edits go through the session so the aspect lock is honoured.
//! - Encoding happens on the UI thread; only the save dialog is async.

use super::rendering::{from_color32, to_color32};
use super::state::{DotLogoApp, PendingExport};
use crate::constants;
use crate::presets;
use crate::types::*;
use eframe::egui;

impl DotLogoApp {
    /// Draws the whole export panel.
    pub fn draw_export_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Export");
        ui.separator();

        self.draw_mode_selector(ui);
        ui.add_space(4.0);

        let mode = self.session.export_config().mode;
        if mode == ExportMode::Custom {
            self.draw_custom_size(ui);
        } else {
            self.draw_preset_list(ui, mode);
        }

        ui.add_space(4.0);
        self.draw_output_options(ui);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            self.draw_export_summary(ui);
            self.draw_export_preview(ui);
        });

        ui.add_space(8.0);
        let export = self.session.export_config();
        let label = match export.mode {
            ExportMode::Custom => format!(
                "Export {}×{} {}",
                export.target_width,
                export.target_height,
                export.format.label()
            ),
            mode => format!("Export {mode} {}", export.format.label()),
        };
        if ui.button(label).clicked() {
            self.request_export();
        }
    }

    fn draw_mode_selector(&mut self, ui: &mut egui::Ui) {
        let current = self.session.export_config().mode;
        ui.horizontal_wrapped(|ui| {
            for mode in ExportMode::ALL {
                if ui.selectable_label(current == mode, mode.as_str()).clicked() && current != mode {
                    self.session.select_export_mode(mode);
                }
            }
        });
    }

    fn draw_preset_list(&mut self, ui: &mut egui::Ui, mode: ExportMode) {
        let export = *self.session.export_config();
        for preset in presets::presets_for(mode) {
            ui.horizontal(|ui| {
                let active = export.target_width == preset.width
                    && export.target_height == preset.height;
                if ui
                    .selectable_label(active, format!("{} ({}×{})", preset.name, preset.width, preset.height))
                    .on_hover_text(preset.description)
                    .clicked()
                {
                    self.session.apply_preset(preset);
                }
                if ui.small_button("Export").on_hover_text("Export at this size").clicked() {
                    self.file.pending_export = Some(PendingExport::Preset(*preset));
                }
            });
        }
    }

    fn draw_custom_size(&mut self, ui: &mut egui::Ui) {
        let export = *self.session.export_config();
        let range = constants::EXPORT_DIMENSION_RANGE;

        let mut width = export.target_width;
        let mut height = export.target_height;
        ui.horizontal(|ui| {
            ui.label("Width");
            if ui
                .add(egui::DragValue::new(&mut width).range(range.clone()).suffix(" px"))
                .changed()
            {
                self.session.set_export_width(width);
            }
            ui.label("Height");
            if ui
                .add(egui::DragValue::new(&mut height).range(range.clone()).suffix(" px"))
                .changed()
            {
                self.session.set_export_height(height);
            }
        });

        let mut locked = export.aspect_locked;
        if ui.checkbox(&mut locked, "Lock to canvas aspect").changed() {
            self.session.set_aspect_locked(locked);
        }
    }

    fn draw_output_options(&mut self, ui: &mut egui::Ui) {
        let export = *self.session.export_config();

        let mut padding = export.padding_percent;
        if ui
            .add(egui::Slider::new(&mut padding, constants::PADDING_PERCENT_RANGE).text("Padding %"))
            .changed()
        {
            self.session.set_padding_percent(padding);
        }

        let mut use_background = export.use_background;
        let mut background = to_color32(export.background_color);
        ui.horizontal(|ui| {
            let toggled = ui.checkbox(&mut use_background, "Background").changed();
            let picked = ui.color_edit_button_srgba(&mut background).changed();
            if toggled || picked {
                self.session.set_background(use_background, from_color32(background));
            }
        });

        let mut format = export.format;
        ui.horizontal(|ui| {
            ui.label("Format");
            ui.selectable_value(&mut format, ExportFormat::Png, "PNG");
            ui.selectable_value(&mut format, ExportFormat::Svg, "SVG");
        });
        if format != export.format {
            self.session.set_export_format(format);
        }
    }

    fn draw_export_summary(&self, ui: &mut egui::Ui) {
        let export = self.session.export_config();
        let summary = self.session.export_summary();
        ui.vertical(|ui| {
            ui.small(format!("Target: {}×{}px", export.target_width, export.target_height));
            ui.small(format!(
                "Padding: {:.0}px ({}%)",
                summary.padding_px, export.padding_percent
            ));
            ui.small(format!("Logo area: {}×{}px", summary.logo_width, summary.logo_height));
            ui.small(format!("Scale: {}%", summary.scale_percent));
            ui.small(format!("Dot size: {}px", summary.dot_size));
            if export.use_background {
                ui.small(format!("Background: {}", export.background_color));
            }
            ui.small(format!("Format: {}", export.format.label()));
            ui.small(format!("Est. size: ~{}KB", summary.estimated_kb));
        });
    }
}
