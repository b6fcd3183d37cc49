//! Drawing the design on screen: the interactive canvas and the export preview.
//!
//! Both views paint with the egui painter from the same dot list the exporters
//! consume, so what is shown is what gets written.

use super::state::DotLogoApp;
use crate::constants;
use crate::export::ExportPlan;
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Converts a design color to an egui color.
pub fn to_color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Converts an egui color back to a design color.
pub fn from_color32(color: egui::Color32) -> Rgba {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba::rgba(r, g, b, a)
}

/// Screen rectangle for a canvas of the given size, centered in `area`.
///
/// The canvas is shown at its own size but never larger than
/// [`constants::CANVAS_DISPLAY_MAX`] on either side, nor larger than `area`.
pub fn canvas_display_rect(area: egui::Rect, config: &CanvasConfig) -> egui::Rect {
    let max_side = constants::CANVAS_DISPLAY_MAX;
    let fit = (max_side / config.width)
        .min(max_side / config.height)
        .min(area.width() / config.width)
        .min(area.height() / config.height)
        .min(1.0);
    egui::Rect::from_center_size(
        area.center(),
        egui::vec2(config.width * fit, config.height * fit),
    )
}

impl DotLogoApp {
    /// Renders the dots into `rect`, scaled uniformly from canvas space.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `rect` - The screen-space rectangle showing the whole canvas
    /// * `hovered` - Cell under the pointer while painting, outlined if present
    pub fn render_canvas(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        hovered: Option<CellKey>,
    ) {
        let config = self.session.config();
        let scale = rect.width() / config.width;

        let surface = if self.dark_mode {
            egui::Color32::from_gray(24)
        } else {
            egui::Color32::WHITE
        };
        painter.rect_filled(rect, 4.0, surface);
        painter.rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(128)),
            StrokeKind::Outside,
        );

        let radius = config.dot_size / 2.0 * scale;
        for dot in self.session.dots() {
            let center = rect.min + egui::vec2(dot.x * scale, dot.y * scale);
            painter.circle_filled(center, radius, to_color32(dot.color));
            if hovered == Some(dot.cell) {
                painter.circle_stroke(
                    center,
                    radius + 1.5,
                    egui::Stroke::new(1.5, to_color32(self.session.brush_color)),
                );
            }
        }
    }

    /// Draws a thumbnail of the export: background, padding outline and dots.
    pub fn draw_export_preview(&self, ui: &mut egui::Ui) {
        let export = *self.session.export_config();
        let target = egui::vec2(export.target_width as f32, export.target_height as f32);
        let box_size = egui::vec2(
            (target.x * constants::PREVIEW_SCALE).min(constants::PREVIEW_MAX_SIDE),
            (target.y * constants::PREVIEW_SCALE).min(constants::PREVIEW_MAX_SIDE),
        );
        let (rect, _) = ui.allocate_exact_size(box_size, egui::Sense::hover());
        let painter = ui.painter_at(rect);

        let background = if export.use_background {
            to_color32(export.background_color)
        } else {
            egui::Color32::WHITE
        };
        painter.rect_filled(rect, 0.0, background);
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
            StrokeKind::Outside,
        );

        // Export pixels map into the box like an SVG viewBox: uniform, centered.
        let fit = (box_size.x / target.x).min(box_size.y / target.y);
        let origin = rect.center() - target * fit / 2.0;
        let to_screen = |x: f32, y: f32| origin + egui::vec2(x, y) * fit;

        let plan = ExportPlan::new(self.session.config(), &export);
        if export.padding_percent > 0 {
            let pad = plan.padding_px as f32;
            let padded = egui::Rect::from_min_max(
                to_screen(pad, pad),
                to_screen(target.x - pad, target.y - pad),
            );
            painter.rect_stroke(
                padded,
                0.0,
                egui::Stroke::new(0.5, egui::Color32::from_rgba_unmultiplied(255, 0, 0, 80)),
                StrokeKind::Middle,
            );
        }

        let radius = plan.dot_size / 2.0 * fit;
        for dot in plan.transform(&self.session.dots()) {
            painter.circle_filled(to_screen(dot.x, dot.y), radius, to_color32(dot.color));
        }
    }
}
