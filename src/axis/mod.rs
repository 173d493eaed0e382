//! Axis tick layout engine.
//!
//! Turns axis specs plus the merged domains into measured tick labels,
//! positioned and collision-resolved ticks, gridline segments, and the axis
//! boxes placed around the plot area.

pub mod dimensions;
pub mod layout;
pub mod ticks;

use serde::{Deserialize, Serialize};

use crate::core::types::CategoryValue;

pub use dimensions::{
    AxisTicksDimensions, compute_all_axes_dimensions, compute_axis_ticks_dimensions,
    compute_rotated_label_size, get_scale_for_axis_spec, is_y_domain,
};
pub use layout::{AxisLayout, LayoutAccumulator, compute_axis_layout, get_min_max_range};
pub use ticks::{get_available_ticks, get_visible_ticks, grid_line_for_tick};

/// One computed axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: CategoryValue,
    pub label: String,
    /// Pixel offset along the axis, after cluster/histogram offsets.
    pub position: f64,
}

/// One gridline segment in plot-area coordinates, `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLineSegment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}
