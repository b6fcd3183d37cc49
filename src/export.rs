//! Export compositor: fit the design into a padded target and encode it.
//!
//! Both backends consume the same transformed dot list, so an SVG and a PNG of
//! the same settings place every dot at the same half-pixel-snapped position
//! with the same diameter.
//!
//! Notes:
//! - Scale is uniform (the design is never stretched) and the scaled canvas is
//!   centered inside the padded area.
//! - A draw area that collapses to nothing yields a background-only image
//!   rather than an error.

use crate::constants;
use crate::error::ExportError;
use crate::types::*;
use std::fmt::Write as _;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Geometry derived from a canvas and an export configuration.
///
/// Everything up to the snapped output is kept in `f64`; only the snapped
/// values are narrowed to `f32`, which holds half pixels exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportPlan {
    /// Output width in pixels
    pub target_width: u32,
    /// Output height in pixels
    pub target_height: u32,
    /// Padding in pixels, derived from the shorter target side
    pub padding_px: f64,
    /// Width left for the design once padding is removed
    pub draw_width: f64,
    /// Height left for the design once padding is removed
    pub draw_height: f64,
    /// Uniform canvas-to-pixel scale
    pub scale: f64,
    /// Left edge of the scaled canvas in output pixels
    pub offset_x: f64,
    /// Top edge of the scaled canvas in output pixels
    pub offset_y: f64,
    /// Exported dot diameter, at least 1px and snapped to a half pixel
    pub dot_size: f32,
}

/// A dot positioned in export pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportedDot {
    /// Snapped center x in output pixels
    pub x: f32,
    /// Snapped center y in output pixels
    pub y: f32,
    /// Fill color
    pub color: Rgba,
}

/// Snaps a value to the nearest half unit.
pub fn snap_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

impl ExportPlan {
    /// Fits `canvas` into the padded target of `export`.
    pub fn new(canvas: &CanvasConfig, export: &ExportConfig) -> Self {
        let target_w = f64::from(export.target_width);
        let target_h = f64::from(export.target_height);
        let canvas_w = f64::from(canvas.width);
        let canvas_h = f64::from(canvas.height);

        let padding_px = target_w.min(target_h) * f64::from(export.padding_percent) / 100.0;
        let draw_width = target_w - padding_px * 2.0;
        let draw_height = target_h - padding_px * 2.0;

        let scale = (draw_width / canvas_w).min(draw_height / canvas_h);
        let offset_x = padding_px + (draw_width - canvas_w * scale) / 2.0;
        let offset_y = padding_px + (draw_height - canvas_h * scale) / 2.0;
        let dot_size = (snap_half(f64::from(canvas.dot_size) * scale) as f32)
            .max(constants::MIN_EXPORT_DOT_SIZE);

        Self {
            target_width: export.target_width,
            target_height: export.target_height,
            padding_px,
            draw_width,
            draw_height,
            scale,
            offset_x,
            offset_y,
            dot_size,
        }
    }

    /// Whether there is any room left to draw dots in.
    pub fn is_drawable(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }

    /// Maps canvas-space dots into pixel space, preserving order.
    ///
    /// Returns no dots when the padded draw area is empty.
    pub fn transform(&self, dots: &[Dot]) -> Vec<ExportedDot> {
        if !self.is_drawable() {
            return Vec::new();
        }
        dots.iter()
            .map(|dot| ExportedDot {
                x: snap_half(f64::from(dot.x) * self.scale + self.offset_x) as f32,
                y: snap_half(f64::from(dot.y) * self.scale + self.offset_y) as f32,
                color: dot.color,
            })
            .collect()
    }
}

/// An encoded export ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    /// Encoding of `bytes`
    pub format: ExportFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Suggested file name encoding size, padding and background
    pub file_name: String,
    /// Encoded file contents
    pub bytes: Vec<u8>,
}

/// Composes `dots` into the target described by `export` and encodes it.
pub fn export_image(
    dots: &[Dot],
    canvas: &CanvasConfig,
    export: &ExportConfig,
) -> Result<ExportedImage, ExportError> {
    let plan = ExportPlan::new(canvas, export);
    let placed = plan.transform(dots);

    let bytes = match export.format {
        ExportFormat::Svg => render_svg(&placed, &plan, export).into_bytes(),
        ExportFormat::Png => render_png(&placed, &plan, export)?,
    };

    log::info!(
        "exported {} dots as {} {}x{} ({} bytes)",
        placed.len(),
        export.format.label(),
        plan.target_width,
        plan.target_height,
        bytes.len()
    );

    Ok(ExportedImage {
        format: export.format,
        width: plan.target_width,
        height: plan.target_height,
        file_name: file_name(export),
        bytes,
    })
}

/// Builds a self-contained SVG document of circles.
pub fn render_svg(dots: &[ExportedDot], plan: &ExportPlan, export: &ExportConfig) -> String {
    let (width, height) = (plan.target_width, plan.target_height);
    let radius = plan.dot_size / 2.0;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" xmlns=\"http://www.w3.org/2000/svg\" shape-rendering=\"crispEdges\">"
    );

    if export.use_background {
        let bg = export.background_color;
        let _ = writeln!(
            out,
            "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{}\"{} />",
            bg.to_rgb_hex(),
            opacity_attr(bg)
        );
    }

    for dot in dots {
        let _ = writeln!(
            out,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"{} stroke=\"none\" />",
            dot.x,
            dot.y,
            radius,
            dot.color.to_rgb_hex(),
            opacity_attr(dot.color)
        );
    }

    let _ = writeln!(out, "</svg>");
    out
}

fn opacity_attr(color: Rgba) -> String {
    if color.is_opaque() {
        String::new()
    } else {
        format!(" fill-opacity=\"{}\"", color.opacity())
    }
}

/// Rasterizes the dots onto a pixmap of exactly the target size.
pub fn render_pixmap(
    dots: &[ExportedDot],
    plan: &ExportPlan,
    export: &ExportConfig,
) -> Result<Pixmap, ExportError> {
    let (width, height) = (plan.target_width, plan.target_height);
    let mut pixmap =
        Pixmap::new(width, height).ok_or(ExportError::SurfaceUnavailable { width, height })?;

    // A fresh pixmap is fully transparent.
    if export.use_background {
        let bg = export.background_color;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
    }

    let radius = plan.dot_size / 2.0;
    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    for dot in dots {
        let c = dot.color;
        paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        if let Some(path) = PathBuilder::from_circle(dot.x, dot.y, radius) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    Ok(pixmap)
}

/// Rasterizes and encodes the dots as a lossless PNG.
pub fn render_png(
    dots: &[ExportedDot],
    plan: &ExportPlan,
    export: &ExportConfig,
) -> Result<Vec<u8>, ExportError> {
    let pixmap = render_pixmap(dots, plan, export)?;
    pixmap
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))
}

/// Conventional download name, e.g. `logo-social-800x800-15p-transparent.png`.
pub fn file_name(export: &ExportConfig) -> String {
    let size = format!("{}x{}", export.target_width, export.target_height);
    let size_name = match export.mode {
        ExportMode::Custom => size,
        mode => format!("{mode}-{size}"),
    };
    let padding = if export.padding_percent > 0 {
        format!("-{}p", export.padding_percent)
    } else {
        String::new()
    };
    let background = if export.use_background {
        format!("-{}bg", export.background_color.hex_digits())
    } else {
        "-transparent".to_string()
    };
    format!(
        "logo-{size_name}{padding}{background}.{}",
        export.format.extension()
    )
}

/// Human-facing numbers describing an export before it is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSummary {
    /// Padding in pixels
    pub padding_px: f32,
    /// Width the design occupies in the output
    pub logo_width: u32,
    /// Height the design occupies in the output
    pub logo_height: u32,
    /// Canvas-to-pixel scale as a whole percentage
    pub scale_percent: u32,
    /// Exported dot diameter in pixels
    pub dot_size: f32,
    /// Rough output size in kilobytes
    pub estimated_kb: u32,
}

impl ExportSummary {
    /// Summarizes exporting `dot_count` dots of `canvas` with `export`.
    pub fn new(dot_count: usize, canvas: &CanvasConfig, export: &ExportConfig) -> Self {
        let plan = ExportPlan::new(canvas, export);
        let scale = plan.scale.max(0.0);

        let estimated = match export.format {
            ExportFormat::Svg => (dot_count as f32 * 50.0 + 300.0) / 1024.0,
            ExportFormat::Png => {
                let pixels = export.target_width as f32 * export.target_height as f32;
                let complexity = dot_count as f32 / (canvas.width * canvas.height / 100.0);
                let channels = if export.use_background { 3.0 } else { 4.0 };
                pixels * channels * (complexity + 0.5).min(2.0) / 1024.0
            }
        };

        Self {
            padding_px: plan.padding_px as f32,
            logo_width: (f64::from(canvas.width) * scale).round() as u32,
            logo_height: (f64::from(canvas.height) * scale).round() as u32,
            scale_percent: (scale * 100.0).round() as u32,
            dot_size: plan.dot_size,
            estimated_kb: estimated.round() as u32,
        }
    }
}
