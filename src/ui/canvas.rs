//! Canvas interaction: pointer painting and screen/canvas coordinate mapping.

use super::rendering::canvas_display_rect;
use super::state::DotLogoApp;
use crate::layout::{self, surface_to_canvas};
use crate::types::*;
use eframe::egui;

impl DotLogoApp {
    /// Converts a screen position over the canvas into canvas coordinates.
    ///
    /// Returns `None` before the canvas has been laid out.
    pub fn screen_to_canvas(&self, screen_pos: egui::Pos2) -> Option<(f32, f32)> {
        let rect = self.canvas_rect?;
        Some(surface_to_canvas(
            (screen_pos.x, screen_pos.y),
            (rect.min.x, rect.min.y),
            (rect.width(), rect.height()),
            self.session.config(),
        ))
    }

    /// Lays out, handles input for, and draws the interactive canvas.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        let rect = canvas_display_rect(response.rect, self.session.config());
        self.canvas_rect = Some(rect);

        self.handle_paint_input(ui, &response, rect);

        let hovered = match self.session.tool {
            ToolMode::Paint => response
                .hover_pos()
                .and_then(|pos| self.screen_to_canvas(pos))
                .and_then(|(x, y)| layout::hit_test(x, y, self.session.config())),
            ToolMode::Generate => None,
        };
        if hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        self.render_canvas(&painter, rect, hovered);
    }

    /// Turns primary-button presses and drags over the canvas into paint strokes.
    ///
    /// A stroke ends when the button is released or the pointer leaves the
    /// canvas. Input is ignored while a structural change awaits confirmation.
    fn handle_paint_input(&mut self, ui: &egui::Ui, response: &egui::Response, rect: egui::Rect) {
        if self.session.pending().is_some() {
            self.session.pointer_released();
            return;
        }

        let (pressed, down, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.interact_pos(),
            )
        });
        let over_canvas = pos.is_some_and(|p| rect.contains(p)) && response.contains_pointer();

        if !down || !over_canvas {
            if self.session.is_painting() {
                self.session.pointer_released();
            }
            return;
        }

        let Some((x, y)) = pos.and_then(|p| self.screen_to_canvas(p)) else {
            return;
        };
        if pressed {
            self.session.pointer_pressed(x, y);
        } else {
            self.session.pointer_moved(x, y);
        }
    }
}
