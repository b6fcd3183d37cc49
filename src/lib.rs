//! # Circle of Dots
//!
//! A logo generator that arranges dots on a centered grid, keeps the ones that
//! fall inside a circle, and exports the result at any target size.
//!
//! ## Features
//! - Parametric layout from canvas size, dot size and dot spacing
//! - Hand-painting individual dots, guarded by a confirmation step whenever a
//!   layout change would discard painted colors
//! - Pixel-consistent SVG and PNG export with padding, centering and an
//!   optional background
//! - Social, icon, web and print size presets
//! - A headless `render` command for scripted exports

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod constants;
pub mod error;
pub mod export;
pub mod layout;
pub mod overlay;
pub mod presets;
pub mod session;
pub mod settings;
pub mod types;
mod ui;

// Re-export public types and functions
pub use error::{CellKeyParseError, ColorParseError, ExportError, SettingsError};
pub use export::{export_image, ExportPlan, ExportSummary, ExportedImage};
pub use layout::{hit_test, layout};
pub use overlay::ColorOverlay;
pub use presets::{presets_for, Preset};
pub use session::{ChangeOutcome, GuardState, Session};
pub use settings::Settings;
pub use types::*;
use ui::DotLogoApp;

/// Runs the editor window, starting from `settings`.
///
/// Display preferences from a previous run are restored; the design always
/// starts fresh.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use circle_of_dots::{run_app, Settings};
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app(Settings::default())
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app(settings: Settings) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Circle of Dots",
        options,
        Box::new(move |cc| {
            let prefs = cc
                .storage
                .and_then(|storage| storage.get_string(ui::PREFS_KEY));
            Ok(Box::new(DotLogoApp::restore(&settings, prefs.as_deref())))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_matches_documented_example() {
        let session = Session::default();
        let dots = session.dots();
        assert_eq!(dots.len(), 845);
        assert_eq!(session.guard_state(), GuardState::Idle);
    }

    #[test]
    fn colors_and_cells_parse_from_text() {
        let color: Rgba = "#336699".parse().unwrap();
        assert_eq!(color.to_string(), "#336699");
        let cell: CellKey = "12-3".parse().unwrap();
        assert_eq!(cell, CellKey::new(12, 3));
    }
}
