use super::state::{FileOperationResult, PendingExport};
use super::*;
use crate::settings::Settings;
use eframe::egui;

fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

/// Run one frame drawing only the canvas, on a context that persists between calls.
fn canvas_frame(ctx: &egui::Context, app: &mut DotLogoApp, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(events), |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

fn press(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

fn release(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed: false,
        modifiers: egui::Modifiers::NONE,
    }]
}

/// Lays the canvas out once and returns the screen position of the canvas center.
fn hover_center(ctx: &egui::Context, app: &mut DotLogoApp) -> egui::Pos2 {
    canvas_frame(ctx, app, vec![]);
    let center = app.canvas_rect.expect("canvas should be laid out").center();
    canvas_frame(ctx, app, vec![egui::Event::PointerMoved(center)]);
    center
}

#[test]
fn canvas_maps_screen_to_canvas_coordinates() {
    let ctx = egui::Context::default();
    let mut app = DotLogoApp::default();
    canvas_frame(&ctx, &mut app, vec![]);

    let rect = app.canvas_rect.unwrap();
    assert_eq!(rect.size(), egui::vec2(500.0, 500.0));
    let (x, y) = app.screen_to_canvas(rect.min + egui::vec2(15.0, 40.0)).unwrap();
    assert!((x - 15.0).abs() < 1e-3 && (y - 40.0).abs() < 1e-3);
}

#[test]
fn clicking_a_dot_in_paint_mode_paints_it() {
    let ctx = egui::Context::default();
    let mut app = DotLogoApp::default();
    app.session.tool = ToolMode::Paint;

    let center = hover_center(&ctx, &mut app);
    canvas_frame(&ctx, &mut app, press(center));

    assert_eq!(app.session.overlay().len(), 1);
    assert_eq!(app.session.overlay().get(CellKey::new(16, 16)), Some(Rgba::RED));
    assert!(app.session.is_painting());

    canvas_frame(&ctx, &mut app, release(center));
    assert!(!app.session.is_painting());
}

#[test]
fn dragging_paints_each_dot_passed_over() {
    let ctx = egui::Context::default();
    let mut app = DotLogoApp::default();
    app.session.tool = ToolMode::Paint;

    let center = hover_center(&ctx, &mut app);
    canvas_frame(&ctx, &mut app, press(center));
    for step in 1..=3 {
        let pos = center + egui::vec2(15.0 * step as f32, 0.0);
        canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(pos)]);
    }
    canvas_frame(&ctx, &mut app, release(center + egui::vec2(45.0, 0.0)));

    for i in 16..=19 {
        assert_eq!(app.session.overlay().get(CellKey::new(i, 16)), Some(Rgba::RED));
    }
    assert_eq!(app.session.overlay().len(), 4);
}

#[test]
fn clicking_in_generate_mode_does_nothing() {
    let ctx = egui::Context::default();
    let mut app = DotLogoApp::default();

    let center = hover_center(&ctx, &mut app);
    canvas_frame(&ctx, &mut app, press(center));

    assert!(app.session.overlay().is_empty());
    assert!(!app.session.is_painting());
}

#[test]
fn clicking_between_dots_paints_nothing() {
    let ctx = egui::Context::default();
    let mut app = DotLogoApp::default();
    app.session.tool = ToolMode::Paint;

    let center = hover_center(&ctx, &mut app);
    let gap = center + egui::vec2(7.5, 0.0);
    canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(gap)]);
    canvas_frame(&ctx, &mut app, press(gap));

    assert!(app.session.overlay().is_empty());
}

#[test]
fn painting_is_blocked_while_a_change_awaits_confirmation() {
    let ctx = egui::Context::default();
    let mut app = DotLogoApp::default();
    app.session.tool = ToolMode::Paint;
    app.session.paint_cell(CellKey::new(16, 16), Rgba::WHITE);
    app.session.request_change(StructuralParam::DotSpacing, 8.0);
    assert!(app.session.pending().is_some());

    let center = hover_center(&ctx, &mut app);
    let neighbour = center + egui::vec2(15.0, 0.0);
    canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(neighbour)]);
    canvas_frame(&ctx, &mut app, press(neighbour));

    assert_eq!(app.session.overlay().len(), 1);
    assert_eq!(app.session.config().dot_spacing, 5.0);
}

#[test]
fn confirm_dialog_only_shows_while_pending() {
    let mut app = DotLogoApp::default();
    let dialog_shapes = |app: &mut DotLogoApp| {
        let ctx = egui::Context::default();
        ctx.run(raw_input(vec![]), |ctx| app.draw_confirm_dialog(ctx))
            .shapes
            .len()
    };

    assert_eq!(dialog_shapes(&mut app), 0);

    app.session.paint_cell(CellKey::new(16, 16), Rgba::WHITE);
    app.session.request_change(StructuralParam::DotSize, 20.0);
    assert!(dialog_shapes(&mut app) > 0);

    app.session.cancel_pending();
    assert_eq!(dialog_shapes(&mut app), 0);
    assert_eq!(app.session.overlay().len(), 1);
}

#[test]
fn panels_render_in_every_export_mode() {
    let mut app = DotLogoApp::default();
    for mode in ExportMode::ALL {
        app.session.select_export_mode(mode);
        let ctx = egui::Context::default();
        let output = ctx.run(raw_input(vec![]), |ctx| {
            egui::SidePanel::left("controls").show(ctx, |ui| {
                app.draw_controls_panel(ui);
                app.draw_export_panel(ui);
            });
        });
        assert!(!output.shapes.is_empty());
    }
    assert!(app.file.pending_export.is_none());
}

#[test]
fn file_results_update_status() {
    let mut app = DotLogoApp::default();
    let ctx = egui::Context::default();
    let sender = app.file.file_operation_sender.clone().unwrap();

    sender
        .send(FileOperationResult::OperationFailed("disk full".into()))
        .unwrap();
    app.handle_pending_operations(&ctx);
    assert_eq!(app.status.as_deref(), Some("disk full"));

    sender
        .send(FileOperationResult::ExportCompleted("/tmp/logo.png".into()))
        .unwrap();
    app.handle_pending_operations(&ctx);
    assert_eq!(app.status.as_deref(), Some("Saved /tmp/logo.png"));
}

#[test]
fn export_request_is_queued() {
    let mut app = DotLogoApp::default();
    app.request_export();
    assert_eq!(app.file.pending_export, Some(PendingExport::Current));
}

#[test]
fn preferences_restore_without_touching_the_design() {
    let mut prefs = DotLogoApp::default();
    prefs.dark_mode = false;
    prefs.controls_panel_width = 360.0;
    prefs.session.paint_cell(CellKey::new(16, 16), Rgba::WHITE);
    let json = prefs.to_json().unwrap();
    assert!(!json.contains("session"));

    let mut settings = Settings::default();
    settings.canvas.dot_size = 12.0;
    let app = DotLogoApp::restore(&settings, Some(&json));
    assert!(!app.dark_mode);
    assert_eq!(app.controls_panel_width, 360.0);
    assert!(app.session.overlay().is_empty());
    assert_eq!(app.session.config().dot_size, 12.0);

    let fallback = DotLogoApp::restore(&settings, Some("not json"));
    assert!(fallback.dark_mode);
}
