//! Geometry coordinator: turns formatted series data plus scales into
//! pixel-space drawable primitives.

pub mod coordinator;
pub mod emitters;
pub mod index;

use serde::{Deserialize, Serialize};

use crate::core::types::{CategoryValue, SpecId};

pub use coordinator::{SeriesGeometries, compute_series_geometries};
pub use index::{GeometryIndex, IndexedGeometry};

/// Which formatted accessor a geometry was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YAccessor {
    Y0,
    Y1,
}

/// Back-reference from a geometry to its originating datum, for
/// hit-testing and tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryValue {
    pub x: CategoryValue,
    /// Raw datum value before stacking or percent normalization.
    pub y: Option<f64>,
    pub accessor: YAccessor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub series_id: SpecId,
    /// Horizontal transform applied at draw time (cluster centering).
    pub transform_x: f64,
    pub value: GeometryValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    /// Topmost pixel of the bar.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub series_id: SpecId,
    pub value: GeometryValue,
}

/// A vertex of a line/area path, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    /// X-sorted polyline vertices; gaps (missing data) split the path.
    pub path: Vec<Option<PathPoint>>,
    pub points: Vec<PointGeometry>,
    pub color: String,
    pub series_id: SpecId,
    pub transform_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    /// Upper boundary of the band, X-sorted; `None` marks a gap.
    pub upper: Vec<Option<PathPoint>>,
    /// Lower boundary (the baseline) matching `upper` index-by-index.
    pub lower: Vec<Option<PathPoint>>,
    pub points: Vec<PointGeometry>,
    pub color: String,
    pub series_id: SpecId,
    pub transform_x: f64,
}

/// Per-kind geometry counts accumulated across all series of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GeometryCounts {
    pub points: usize,
    pub bars: usize,
    pub areas: usize,
    pub areas_points: usize,
    pub lines: usize,
    pub line_points: usize,
}

impl GeometryCounts {
    pub fn merge(&mut self, other: GeometryCounts) {
        self.points += other.points;
        self.bars += other.bars;
        self.areas += other.areas;
        self.areas_points += other.areas_points;
        self.lines += other.lines;
        self.line_points += other.line_points;
    }
}
