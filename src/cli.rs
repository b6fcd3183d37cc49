//! Command-line interface: headless rendering and the preset listing.

// ============================================================================
// Headless rendering via command-line arguments
// ============================================================================
//
// Usage examples:
//   circle-of-dots                                       (opens the editor)
//   circle-of-dots render -o logo.png
//   circle-of-dots render --dot-size 8 --paint '16-16=#ff8800' -o out/
//   circle-of-dots render --mode web --background '#ffffff' -o logo.svg
//   circle-of-dots --settings brand.json render --preset "Twitter 2x" -o out/
//   circle-of-dots presets --mode icon
//
// Rendering runs synchronously on the current thread; no window is opened.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::error::{ExportError, SettingsError};
use crate::presets::{self, Preset};
use crate::session::Session;
use crate::settings::Settings;
use crate::types::*;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Circle-of-dots logo generator.
///
/// Without a subcommand the interactive editor is opened.
#[derive(Parser, Debug)]
#[command(
    name = "circle-of-dots",
    version,
    about = "Generate circular dot-grid logos and export them as PNG or SVG"
)]
pub struct Cli {
    /// JSON settings file providing the starting canvas and export values.
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Subcommand to run; the editor opens when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Headless subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a logo to a file without opening the editor.
    Render(RenderArgs),
    /// List the export preset catalog.
    Presets {
        /// Only list one category: social, icon, web or print.
        #[arg(long, value_parser = parse_mode)]
        mode: Option<ExportMode>,
    },
}

/// Options for `render`. Anything left unset falls back to the settings file.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Canvas width (100-1000).
    #[arg(long, value_parser = canvas_dimension)]
    pub width: Option<f32>,

    /// Canvas height (100-1000).
    #[arg(long, value_parser = canvas_dimension)]
    pub height: Option<f32>,

    /// Dot diameter (2-50).
    #[arg(long, value_parser = dot_size)]
    pub dot_size: Option<f32>,

    /// Gap between neighbouring dots (0-30).
    #[arg(long, value_parser = dot_spacing)]
    pub dot_spacing: Option<f32>,

    /// Default dot color, e.g. #000000.
    #[arg(long, value_name = "COLOR")]
    pub color: Option<Rgba>,

    /// Paint one dot, e.g. 16-16=#ff0000. May be repeated.
    #[arg(long, value_name = "CELL=COLOR", value_parser = parse_paint)]
    pub paint: Vec<(CellKey, Rgba)>,

    /// Preset category; sets its first size and recommended format and padding.
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ExportMode>,

    /// Export at a named preset size, e.g. "Twitter 2x".
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Export width in pixels (16-2000).
    #[arg(long, value_parser = clap::value_parser!(u32).range(16..=2000))]
    pub export_width: Option<u32>,

    /// Export height in pixels (16-2000).
    #[arg(long, value_parser = clap::value_parser!(u32).range(16..=2000))]
    pub export_height: Option<u32>,

    /// Let export width and height be set independently.
    #[arg(long)]
    pub no_aspect_lock: bool,

    /// Padding as a percentage of the shorter side (0-40).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub padding: Option<u32>,

    /// Fill the background with this color instead of leaving it transparent.
    #[arg(long, value_name = "COLOR")]
    pub background: Option<Rgba>,

    /// Output format: png or svg. Inferred from --output's extension when omitted.
    #[arg(short, long, value_parser = parse_format)]
    pub format: Option<ExportFormat>,

    /// Output file, or an existing directory to write the conventional name into.
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,
}

/// Errors that abort a CLI run.
#[derive(Error, Debug)]
pub enum CliError {
    /// The settings file could not be read or parsed
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Rendering or encoding failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Writing the output file failed
    #[error("could not write '{path}': {source}")]
    Io {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Arguments that parse but cannot be honoured together
    #[error("{0}")]
    Argument(String),
}

// ============================================================================
// Public entry points
// ============================================================================

/// Loads the settings file if one was given, otherwise the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    match path {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

/// Runs a subcommand and returns an OS exit code.
pub fn run(command: Command, settings: &Settings) -> ExitCode {
    let result = match command {
        Command::Render(args) => render(&args, settings).map(|path| {
            println!("{}", path.display());
        }),
        Command::Presets { mode } => {
            print!("{}", list_presets(mode));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Renders a logo as described by `args` and writes it. Returns the written path.
pub fn render(args: &RenderArgs, settings: &Settings) -> Result<PathBuf, CliError> {
    let mut settings = settings.clone();
    if let Some(width) = args.width {
        settings.canvas.width = width;
    }
    if let Some(height) = args.height {
        settings.canvas.height = height;
    }
    if let Some(size) = args.dot_size {
        settings.canvas.dot_size = size;
    }
    if let Some(spacing) = args.dot_spacing {
        settings.canvas.dot_spacing = spacing;
    }
    if let Some(color) = args.color {
        settings.canvas.default_color = color;
    }

    let mut session = Session::new(&settings);

    for &(cell, color) in &args.paint {
        if !session.paint_cell(cell, color) {
            log::warn!("cell {cell} is not part of the layout, skipping");
        }
    }

    if args.no_aspect_lock {
        session.set_aspect_locked(false);
    }
    if let Some(mode) = args.mode {
        session.select_export_mode(mode);
    }
    if let Some(width) = args.export_width {
        session.set_export_width(width);
    }
    if let Some(height) = args.export_height {
        session.set_export_height(height);
    }
    if let Some(padding) = args.padding {
        session.set_padding_percent(padding);
    }
    if let Some(color) = args.background {
        session.set_background(true, color);
    }
    if let Some(format) = args.format.or_else(|| format_from_extension(&args.output)) {
        session.set_export_format(format);
    }

    let image = match &args.preset {
        Some(name) => {
            let preset = find_preset(name, session.export_config().mode)
                .ok_or_else(|| CliError::Argument(format!("unknown preset '{name}'")))?;
            session.export_preset(preset)?
        }
        None => session.export()?,
    };

    let path = if args.output.is_dir() {
        args.output.join(&image.file_name)
    } else {
        args.output.clone()
    };
    std::fs::write(&path, &image.bytes).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Formats the preset catalog, one category block at a time.
pub fn list_presets(mode: Option<ExportMode>) -> String {
    let mut out = String::new();
    for category in ExportMode::ALL {
        if mode.is_some_and(|m| m != category) {
            continue;
        }
        let entries = presets::presets_for(category);
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("{category}\n"));
        for preset in entries {
            out.push_str(&format!(
                "  {:<16} {:>4}x{:<4}  {}\n",
                preset.name, preset.width, preset.height, preset.description
            ));
        }
    }
    out
}

// ============================================================================
// Helpers
// ============================================================================

/// Looks a preset up by name, preferring the active category.
fn find_preset(name: &str, mode: ExportMode) -> Option<&'static Preset> {
    let matches = |p: &&Preset| p.name.eq_ignore_ascii_case(name);
    presets::presets_for(mode).iter().find(matches).or_else(|| {
        ExportMode::ALL
            .iter()
            .flat_map(|m| presets::presets_for(*m).iter())
            .find(matches)
    })
}

fn format_from_extension(path: &Path) -> Option<ExportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "svg" => Some(ExportFormat::Svg),
        "png" => Some(ExportFormat::Png),
        _ => None,
    }
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "svg" => Ok(ExportFormat::Svg),
        "png" => Ok(ExportFormat::Png),
        _ => Err(format!("unknown format '{s}', expected png or svg")),
    }
}

fn parse_mode(s: &str) -> Result<ExportMode, String> {
    ExportMode::ALL
        .into_iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown mode '{s}', expected social, icon, web, print or custom"))
}

fn parse_paint(s: &str) -> Result<(CellKey, Rgba), String> {
    let (cell, color) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CELL=COLOR, got '{s}'"))?;
    let cell = cell.parse::<CellKey>().map_err(|e| e.to_string())?;
    let color = color.parse::<Rgba>().map_err(|e| e.to_string())?;
    Ok((cell, color))
}

fn ranged(s: &str, param: StructuralParam) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if param.clamp(value) != value {
        return Err(format!("{} must be within {:?}", param.label(), param.range()));
    }
    Ok(value)
}

fn canvas_dimension(s: &str) -> Result<f32, String> {
    ranged(s, StructuralParam::CanvasWidth)
}

fn dot_size(s: &str) -> Result<f32, String> {
    ranged(s, StructuralParam::DotSize)
}

fn dot_spacing(s: &str) -> Result<f32, String> {
    ranged(s, StructuralParam::DotSpacing)
}
