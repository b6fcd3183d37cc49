//! Application state management structures.
//!
//! The design itself lives in [`Session`]; this module adds the state that only
//! the editor needs: display preferences, where the canvas was last drawn, and
//! the channel that carries results back from async save dialogs.

use crate::constants;
use crate::presets::Preset;
use crate::session::Session;
use crate::settings::Settings;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// State related to file operations.
///
/// Exports are encoded on the UI thread and handed to a save dialog (native) or
/// a browser download (wasm); results come back over the channel.
pub struct FileState {
    /// Export requested this frame, started on the next call to
    /// `handle_pending_operations`
    pub pending_export: Option<PendingExport>,
    /// Channel for receiving file operation results from async contexts
    pub file_operation_sender: Option<Sender<FileOperationResult>>,
    pub file_operation_receiver: Option<Receiver<FileOperationResult>>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            pending_export: None,
            file_operation_sender: Some(sender),
            file_operation_receiver: Some(receiver),
        }
    }
}

/// Which export the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingExport {
    /// Export with the current export settings
    Current,
    /// Export at a preset's size, leaving the current size alone
    Preset(Preset),
}

/// Messages sent from async file operations back to the main app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// The export was written; carries the path or download name
    ExportCompleted(String),
    /// Operation failed with an error message
    OperationFailed(String),
}

/// The main application structure.
///
/// Only display preferences are persisted between runs. Every design starts
/// fresh from the startup settings.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct DotLogoApp {
    /// The design being edited
    #[serde(skip)]
    pub session: Session,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Remembered width of the controls panel across sessions
    pub controls_panel_width: f32,
    /// File operations state
    #[serde(skip)]
    pub file: FileState,
    /// Last status line shown in the toolbar
    #[serde(skip)]
    pub status: Option<String>,
    /// Screen rectangle the canvas occupied in the last frame
    #[serde(skip)]
    pub canvas_rect: Option<egui::Rect>,
}

impl Default for DotLogoApp {
    fn default() -> Self {
        Self {
            session: Session::default(),
            dark_mode: true,
            controls_panel_width: constants::DEFAULT_PANEL_WIDTH,
            file: FileState::default(),
            status: None,
            canvas_rect: None,
        }
    }
}

impl DotLogoApp {
    /// Creates the app with a fresh session built from `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: Session::new(settings),
            ..Self::default()
        }
    }

    /// Restores display preferences saved by a previous run, keeping `settings`
    /// for the design.
    pub fn restore(settings: &Settings, prefs_json: Option<&str>) -> Self {
        let mut app = prefs_json
            .and_then(|json| match Self::from_json(json) {
                Ok(app) => Some(app),
                Err(err) => {
                    log::warn!("ignoring unreadable display preferences: {err}");
                    None
                }
            })
            .unwrap_or_default();
        app.session = Session::new(settings);
        app
    }

    /// Serializes the persisted preferences to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes persisted preferences from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
