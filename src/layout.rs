//! Grid layout engine and hit tester.
//!
//! The layout centers a square-stepped grid on the canvas and keeps the cells
//! that fall inside a circle. Cells near either axis get a slightly larger
//! radius, which pulls the silhouette toward a plus shape. That bias is part of
//! the look of the logo and is pinned by the tests below.
//!
//! The hit tester shares the exact same inclusion predicate, so a pointer can
//! only ever resolve to a cell the layout actually produced.

use crate::constants;
use crate::overlay::ColorOverlay;
use crate::types::*;

/// Derived grid measurements for one canvas configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Distance between neighbouring dot centers
    pub step: f32,
    /// Number of candidate columns
    pub cols: u32,
    /// Number of candidate rows
    pub rows: u32,
    /// Center of cell (0, _) on the x axis
    pub start_x: f32,
    /// Center of cell (_, 0) on the y axis
    pub start_y: f32,
    /// Horizontal center of the canvas
    pub center_x: f32,
    /// Vertical center of the canvas
    pub center_y: f32,
    /// Base inclusion radius before the near-axis boost
    pub radius: f32,
    dot_size: f32,
    width: f32,
    height: f32,
}

impl GridGeometry {
    /// Computes the grid for `config`.
    ///
    /// Returns `None` for a non-positive step, which callers must have ruled out
    /// at the input boundary.
    pub fn new(config: &CanvasConfig) -> Option<Self> {
        let step = config.step();
        debug_assert!(step > 0.0, "dot size + spacing must be positive, got {step}");
        if step.is_nan() || step <= 0.0 {
            return None;
        }

        let cols = count_along(config.width, config.dot_size, step);
        let rows = count_along(config.height, config.dot_size, step);
        let center_x = config.width / 2.0;
        let center_y = config.height / 2.0;
        let span_x = cols.saturating_sub(1) as f32 * step;
        let span_y = rows.saturating_sub(1) as f32 * step;

        Some(Self {
            step,
            cols,
            rows,
            start_x: center_x - span_x / 2.0,
            start_y: center_y - span_y / 2.0,
            center_x,
            center_y,
            radius: config.width.min(config.height) / 2.0 - config.dot_size / 2.0,
            dot_size: config.dot_size,
            width: config.width,
            height: config.height,
        })
    }

    /// Absolute canvas position of a cell center (whether or not it is included).
    pub fn cell_position(&self, cell: CellKey) -> (f32, f32) {
        (
            self.start_x + cell.i as f32 * self.step,
            self.start_y + cell.j as f32 * self.step,
        )
    }

    /// Inclusion predicate shared by layout and hit testing.
    ///
    /// A position survives when a whole dot fits on the canvas and it lies inside
    /// the effective radius. Positions within `step * 0.4` of either axis get
    /// `step * 0.25` of extra radius.
    pub fn includes(&self, x: f32, y: f32) -> bool {
        let half = self.dot_size / 2.0;
        if x < half || x > self.width - half || y < half || y > self.height - half {
            return false;
        }

        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        distance <= self.effective_radius(dx, dy)
    }

    /// Radius used for a cell at offset (`dx`, `dy`) from the canvas center.
    pub fn effective_radius(&self, dx: f32, dy: f32) -> f32 {
        let band = self.step * constants::AXIS_BAND_FACTOR;
        if dx.abs() < band || dy.abs() < band {
            self.radius + self.step * constants::AXIS_RADIUS_BOOST_FACTOR
        } else {
            self.radius
        }
    }

    /// Included cells in row-major order (`i` outer, `j` inner).
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, f32, f32)> + '_ {
        (0..self.cols)
            .flat_map(move |i| (0..self.rows).map(move |j| CellKey::new(i, j)))
            .filter_map(move |cell| {
                let (x, y) = self.cell_position(cell);
                self.includes(x, y).then_some((cell, x, y))
            })
    }
}

fn count_along(extent: f32, dot_size: f32, step: f32) -> u32 {
    let count = ((extent - dot_size) / step).floor() + 1.0;
    if count > 0.0 {
        count as u32
    } else {
        0
    }
}

/// Lays out every dot of the design with its resolved color.
///
/// The result is fully recomputed from its inputs; identical inputs always give
/// an identical sequence.
pub fn layout(config: &CanvasConfig, overlay: &ColorOverlay) -> Vec<Dot> {
    let Some(grid) = GridGeometry::new(config) else {
        return Vec::new();
    };

    grid.cells()
        .map(|(cell, x, y)| Dot {
            cell,
            x,
            y,
            color: overlay.get(cell).unwrap_or(config.default_color),
        })
        .collect()
}

/// Maps a canvas-space pointer position to the dot under it, if any.
///
/// The pointer snaps to the nearest grid index. It hits only when that cell is
/// part of the layout and the pointer lies within the dot's radius, so gaps
/// between dots and cells cut off by the circle never hit.
pub fn hit_test(x: f32, y: f32, config: &CanvasConfig) -> Option<CellKey> {
    let grid = GridGeometry::new(config)?;

    let i = ((x - grid.start_x) / grid.step).round();
    let j = ((y - grid.start_y) / grid.step).round();
    if i < 0.0 || j < 0.0 || i >= grid.cols as f32 || j >= grid.rows as f32 {
        return None;
    }

    let cell = CellKey::new(i as u32, j as u32);
    let (dot_x, dot_y) = grid.cell_position(cell);
    if !grid.includes(dot_x, dot_y) {
        return None;
    }

    let distance = ((x - dot_x).powi(2) + (y - dot_y).powi(2)).sqrt();
    (distance <= config.dot_size / 2.0).then_some(cell)
}

/// Converts a pointer position on a rendered surface into canvas space.
///
/// `surface_min` and `surface_size` describe where the canvas is drawn; each
/// axis is scaled independently by `canvas dimension / surface dimension`.
pub fn surface_to_canvas(
    pointer: (f32, f32),
    surface_min: (f32, f32),
    surface_size: (f32, f32),
    config: &CanvasConfig,
) -> (f32, f32) {
    let scale_x = config.width / surface_size.0;
    let scale_y = config.height / surface_size.1;
    (
        (pointer.0 - surface_min.0) * scale_x,
        (pointer.1 - surface_min.1) * scale_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: f32, height: f32, dot_size: f32, dot_spacing: f32) -> CanvasConfig {
        CanvasConfig {
            width,
            height,
            dot_size,
            dot_spacing,
            default_color: Rgba::BLACK,
        }
    }

    #[test]
    fn default_canvas_produces_known_dot_count_and_order() {
        let dots = layout(&config(500.0, 500.0, 10.0, 5.0), &ColorOverlay::new());
        assert_eq!(dots.len(), 845);

        let first = dots.first().unwrap();
        assert_eq!(first.cell, CellKey::new(0, 13));
        assert_eq!((first.x, first.y), (10.0, 205.0));

        let last = dots.last().unwrap();
        assert_eq!(last.cell, CellKey::new(32, 19));
        assert_eq!((last.x, last.y), (490.0, 295.0));
    }

    #[test]
    fn grid_is_centered_on_canvas() {
        let grid = GridGeometry::new(&config(500.0, 500.0, 10.0, 5.0)).unwrap();
        assert_eq!(grid.step, 15.0);
        assert_eq!((grid.cols, grid.rows), (33, 33));
        assert_eq!((grid.start_x, grid.start_y), (10.0, 10.0));
        assert_eq!(grid.radius, 245.0);
    }

    #[test]
    fn outermost_dots_respect_axis_and_off_axis_radius() {
        let cfg = config(500.0, 500.0, 10.0, 5.0);
        let grid = GridGeometry::new(&cfg).unwrap();
        let band = grid.step * 0.4;
        for dot in layout(&cfg, &ColorOverlay::new()) {
            let dx = dot.x - 250.0;
            let dy = dot.y - 250.0;
            let distance = (dx * dx + dy * dy).sqrt();
            if dx.abs() < band || dy.abs() < band {
                assert!(distance <= grid.radius + grid.step * 0.25);
            } else {
                assert!(distance <= grid.radius, "{:?} is outside the disc", dot.cell);
            }
        }
    }

    /// The near-axis boost is an intentional part of the logo silhouette. On
    /// this canvas it is the only reason the top and bottom axis dots exist; if
    /// this test fails, the boost has been "fixed" away.
    #[test]
    fn near_axis_boost_keeps_plus_shaped_silhouette() {
        let cfg = config(100.0, 110.0, 4.0, 5.0);
        let dots = layout(&cfg, &ColorOverlay::new());
        assert_eq!(dots.len(), 92);

        let grid = GridGeometry::new(&cfg).unwrap();
        for cell in [CellKey::new(5, 0), CellKey::new(5, 11)] {
            let dot = dots.iter().find(|d| d.cell == cell).expect("axis dot kept");
            let distance = ((dot.x - 50.0).powi(2) + (dot.y - 55.0).powi(2)).sqrt();
            assert!(distance > grid.radius, "dot only survives via the axis boost");
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let cfg = config(730.0, 410.0, 7.0, 3.0);
        let mut overlay = ColorOverlay::new();
        overlay.paint(CellKey::new(40, 20), Rgba::RED);
        assert_eq!(layout(&cfg, &overlay), layout(&cfg, &overlay));
    }

    #[test]
    fn overlay_colors_replace_default_without_reordering() {
        let cfg = config(500.0, 500.0, 10.0, 5.0);
        let plain = layout(&cfg, &ColorOverlay::new());

        let mut overlay = ColorOverlay::new();
        overlay.paint(CellKey::new(16, 16), Rgba::RED);
        let painted = layout(&cfg, &overlay);

        assert_eq!(plain.len(), painted.len());
        for (a, b) in plain.iter().zip(&painted) {
            assert_eq!(a.cell, b.cell);
            let expected = if a.cell == CellKey::new(16, 16) { Rgba::RED } else { Rgba::BLACK };
            assert_eq!(b.color, expected);
        }
    }

    #[test]
    fn degenerate_canvas_yields_no_dots() {
        // Dot larger than the canvas on one axis: no column fits.
        let cfg = config(100.0, 100.0, 150.0, 0.0);
        assert!(layout(&cfg, &ColorOverlay::new()).is_empty());
        assert_eq!(hit_test(50.0, 50.0, &cfg), None);
    }

    #[test]
    fn pointer_at_dot_center_hits_that_dot() {
        let cfg = config(500.0, 500.0, 10.0, 5.0);
        for dot in layout(&cfg, &ColorOverlay::new()) {
            assert_eq!(hit_test(dot.x, dot.y, &cfg), Some(dot.cell));
        }
    }

    #[test]
    fn pointer_between_adjacent_dots_hits_nothing() {
        let cfg = config(500.0, 500.0, 10.0, 5.0);
        // (16,16) and (17,16) are both inside the disc.
        let midpoint_x = (250.0 + 265.0) / 2.0;
        assert_eq!(hit_test(midpoint_x, 250.0, &cfg), None);
        let midpoint_y = (250.0 + 265.0) / 2.0;
        assert_eq!(hit_test(250.0, midpoint_y, &cfg), None);
    }

    #[test]
    fn pointer_on_dot_edge_hits_and_just_outside_misses() {
        let cfg = config(500.0, 500.0, 10.0, 5.0);
        assert_eq!(hit_test(255.0, 250.0, &cfg), Some(CellKey::new(16, 16)));
        assert_eq!(hit_test(255.5, 250.0, &cfg), None);
    }

    #[test]
    fn pointer_over_cell_outside_circle_hits_nothing() {
        let cfg = config(500.0, 500.0, 10.0, 5.0);
        // Cell (0,0) at the corner is cut off by the radius.
        assert_eq!(hit_test(10.0, 10.0, &cfg), None);
        assert_eq!(hit_test(-40.0, 250.0, &cfg), None);
        assert_eq!(hit_test(250.0, 900.0, &cfg), None);
    }

    #[test]
    fn surface_mapping_scales_each_axis() {
        let cfg = config(500.0, 250.0, 10.0, 5.0);
        let mapped = surface_to_canvas((150.0, 75.0), (50.0, 25.0), (200.0, 100.0), &cfg);
        assert_eq!(mapped, (250.0, 125.0));
    }
}
