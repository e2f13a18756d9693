#![forbid(unsafe_code)]

//! Board configuration.
//!
//! All lengths are in board units. The defaults reproduce the classic
//! 100-unit grid with a 10-unit snap tolerance and a two-cell scatter
//! margin around the solved picture.

use web_time::Duration;

use crate::easing::Easing;

/// Side length of one grid cell.
pub const CELL_SIZE: f64 = 100.0;

/// Per-axis tolerance under which two neighbours link.
pub const SNAP_DISTANCE: f64 = 10.0;

/// Configuration for a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    /// Side length of one grid cell (default: 100.0).
    pub cell_size: f64,
    /// Snap tolerance per axis, inclusive (default: 10.0).
    pub snap_distance: f64,
    /// Extra cells added to each board dimension for scattering (default: 2).
    pub margin_cells: u32,
    /// Duration of the scatter and auto-solve transitions (default: 500ms).
    pub animation_duration: Duration,
    /// Lower zoom bound (default: 0.5).
    pub min_zoom: f64,
    /// Upper zoom bound (default: 2.0).
    pub max_zoom: f64,
    /// Zoom applied on construction (default: 1.0).
    pub initial_zoom: f64,
    /// Curve for the scatter transition (default: quadratic-out).
    pub scatter_easing: Easing,
    /// Curve for the auto-solve transition (default: quadratic-in).
    pub solve_easing: Easing,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            snap_distance: SNAP_DISTANCE,
            margin_cells: 2,
            animation_duration: Duration::from_millis(500),
            min_zoom: 0.5,
            max_zoom: 2.0,
            initial_zoom: 1.0,
            scatter_easing: Easing::QuadraticOut,
            solve_easing: Easing::QuadraticIn,
            seed: None,
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    #[must_use]
    pub fn with_snap_distance(mut self, snap_distance: f64) -> Self {
        self.snap_distance = snap_distance;
        self
    }

    #[must_use]
    pub fn with_margin_cells(mut self, margin_cells: u32) -> Self {
        self.margin_cells = margin_cells;
        self
    }

    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the zoom range. Swapped bounds are reordered.
    #[must_use]
    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min.min(max);
        self.max_zoom = max.max(min);
        self
    }

    #[must_use]
    pub fn with_initial_zoom(mut self, zoom: f64) -> Self {
        self.initial_zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_scatter_easing(mut self, easing: Easing) -> Self {
        self.scatter_easing = easing;
        self
    }

    #[must_use]
    pub fn with_solve_easing(mut self, easing: Easing) -> Self {
        self.solve_easing = easing;
        self
    }

    /// Fix the RNG seed for reproducible layouts.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The zoom bounds as `(min, max)`, ordered. A NaN bound reads as 1.0.
    pub fn zoom_range(&self) -> (f64, f64) {
        let bound = |z: f64| if z.is_nan() { 1.0 } else { z };
        let (a, b) = (bound(self.min_zoom), bound(self.max_zoom));
        (a.min(b), a.max(b))
    }

    /// Clamp `zoom` into the configured range. NaN falls back to the
    /// initial zoom, then to 1.0.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let (min, max) = self.zoom_range();
        let zoom = if zoom.is_nan() { self.initial_zoom } else { zoom };
        let zoom = if zoom.is_nan() { 1.0 } else { zoom };
        zoom.clamp(min, max)
    }
}
