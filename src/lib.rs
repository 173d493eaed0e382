//! chartgrid: domain and scale computation engine for multi-series
//! Cartesian charts.
//!
//! The crate turns heterogeneous per-series data (bar/line/area,
//! ordinal/continuous/time axes, stacked or percent-normalized) into unified
//! axis domains, concrete pixel-space scales, collision-resolved axis ticks
//! and per-datum screen geometries ready for a drawing backend.
//!
//! All computation is synchronous and side-effect free: every entry point is
//! a pure function of its inputs and returns freshly allocated output.

pub mod axis;
pub mod core;
pub mod error;
pub mod geometry;
pub mod measure;
pub mod telemetry;
pub mod theme;

pub use crate::core::pipeline::{
    SeriesDomains, compute_chart_geometries, compute_series_domains, is_chart_animatable,
};
pub use error::{ChartError, ChartResult};
pub use geometry::coordinator::{SeriesGeometries, compute_series_geometries};
