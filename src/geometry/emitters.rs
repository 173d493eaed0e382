//! Per-kind geometry emitters.
//!
//! The coordinator resolves one emitter per series up front and then feeds
//! it the series' formatted data, keeping kind dispatch out of the datum
//! loop.

use tracing::debug;

use crate::core::scales::{ContinuousScale, Scale};
use crate::core::series::{FormattedDatum, FormattedSeries};
use crate::core::types::ScaleType;
use crate::geometry::index::{GeometryIndexBuilder, IndexedGeometry};
use crate::geometry::{
    AreaGeometry, BarGeometry, GeometryValue, LineGeometry, PathPoint, PointGeometry, YAccessor,
};

/// Emitter for one series, resolved once from its spec kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryEmitter {
    Bar {
        /// Cluster slot index; the bar is shifted right by this many
        /// bandwidth units inside its band.
        order_index: usize,
    },
    Line {
        /// Half-bandwidth centering shift when bars and lines coexist.
        shift: f64,
        /// Histogram alignment offset subtracted from every vertex.
        x_scale_offset: f64,
    },
    Area {
        shift: f64,
        x_scale_offset: f64,
        /// True when the series supplies an explicit baseline (banded area).
        has_y0: bool,
    },
}

/// Everything one emitter produced for one series.
#[derive(Debug, Clone, Default)]
pub struct EmittedGeometry {
    pub bars: Vec<BarGeometry>,
    pub lines: Vec<LineGeometry>,
    pub areas: Vec<AreaGeometry>,
    pub points: Vec<PointGeometry>,
    pub index: GeometryIndexBuilder,
}

impl GeometryEmitter {
    pub fn emit(
        &self,
        series: &FormattedSeries,
        x_scale: &Scale,
        y_scale: &ContinuousScale,
        color: &str,
    ) -> EmittedGeometry {
        match *self {
            GeometryEmitter::Bar { order_index } => {
                emit_bars(series, x_scale, y_scale, color, order_index)
            }
            GeometryEmitter::Line {
                shift,
                x_scale_offset,
            } => emit_line(series, x_scale, y_scale, color, shift, x_scale_offset),
            GeometryEmitter::Area {
                shift,
                x_scale_offset,
                has_y0,
            } => emit_area(series, x_scale, y_scale, color, shift, x_scale_offset, has_y0),
        }
    }
}

fn sorted_data(series: &FormattedSeries) -> Vec<&FormattedDatum> {
    let mut data: Vec<&FormattedDatum> = series.data.iter().collect();
    data.sort_by(|a, b| match (a.x.as_f64(), b.x.as_f64()) {
        (Some(x1), Some(x2)) => x1.total_cmp(&x2),
        _ => a.x.cmp(&b.x),
    });
    data
}

fn emit_bars(
    series: &FormattedSeries,
    x_scale: &Scale,
    y_scale: &ContinuousScale,
    color: &str,
    order_index: usize,
) -> EmittedGeometry {
    let mut out = EmittedGeometry::default();
    let is_log = y_scale.scale_type() == ScaleType::Log;

    for datum in &series.data {
        // A missing raw value never becomes a bar.
        if datum.initial_y1.is_none() {
            continue;
        }
        let Some(x) = x_scale.scale_value(&datum.x) else {
            debug!(series_id = %series.series_id, x = %datum.x, "bar datum outside X domain, skipped");
            continue;
        };

        let (y, height) = if is_log {
            // Zero values pin to the baseline; log(0) has no pixel.
            let y = if datum.y1 == 0.0 {
                y_scale.range()[0]
            } else {
                y_scale.scale(datum.y1)
            };
            let zero_range = if y_scale.is_inverted() {
                y_scale.range()[1]
            } else {
                y_scale.range()[0]
            };
            let y0 = if datum.y0 == 0.0 {
                zero_range
            } else {
                y_scale.scale(datum.y0)
            };
            (y, y0 - y)
        } else {
            let y = y_scale.scale(datum.y1);
            (y, y_scale.scale(datum.y0) - y)
        };

        let bar = BarGeometry {
            x: x + x_scale.bandwidth() * order_index as f64,
            y,
            width: x_scale.bandwidth(),
            height,
            color: color.to_owned(),
            series_id: series.series_id.clone(),
            value: GeometryValue {
                x: datum.x.clone(),
                y: datum.initial_y1,
                accessor: YAccessor::Y1,
            },
        };
        out.index
            .push(datum.x.label(), IndexedGeometry::Bar(bar.clone()));
        out.bars.push(bar);
    }
    out
}

/// Emits the marker points of a line/area series.
///
/// Every datum with a raw value is indexed for hit-testing; a point is only
/// visibly emitted when its value maps to a finite pixel (log scales hide
/// non-positive values at the baseline with zero radius).
fn emit_points(
    series: &FormattedSeries,
    x_scale: &Scale,
    y_scale: &ContinuousScale,
    color: &str,
    shift: f64,
    has_y0: bool,
    out: &mut EmittedGeometry,
) {
    const POINT_RADIUS: f64 = 10.0;
    let is_log = y_scale.scale_type() == ScaleType::Log;

    for datum in &series.data {
        if datum.initial_y1.is_none() {
            continue;
        }
        let Some(x) = x_scale.project(&datum.x) else {
            continue;
        };

        let both = [(datum.y0, YAccessor::Y0), (datum.y1, YAccessor::Y1)];
        let accessors = if has_y0 { &both[..] } else { &both[1..] };
        for &(value, accessor) in accessors {
            let hidden = is_log && value <= 0.0;
            let (y, radius) = if hidden {
                (y_scale.range()[0], 0.0)
            } else {
                (y_scale.scale(value), POINT_RADIUS)
            };
            let original = match accessor {
                YAccessor::Y0 => datum.initial_y0,
                YAccessor::Y1 => datum.initial_y1,
            };
            let point = PointGeometry {
                x,
                y,
                radius,
                color: color.to_owned(),
                series_id: series.series_id.clone(),
                transform_x: shift,
                value: GeometryValue {
                    x: datum.x.clone(),
                    y: original,
                    accessor,
                },
            };
            out.index
                .push(datum.x.label(), IndexedGeometry::Point(point.clone()));
            if !hidden {
                out.points.push(point);
            }
        }
    }
}

fn emit_line(
    series: &FormattedSeries,
    x_scale: &Scale,
    y_scale: &ContinuousScale,
    color: &str,
    shift: f64,
    x_scale_offset: f64,
) -> EmittedGeometry {
    let mut out = EmittedGeometry::default();
    let is_log = y_scale.scale_type() == ScaleType::Log;

    let path = sorted_data(series)
        .into_iter()
        .map(|datum| {
            let defined = datum.initial_y1.is_some() && !(is_log && datum.y1 <= 0.0);
            if !defined {
                return None;
            }
            let x = x_scale.project(&datum.x)?;
            Some(PathPoint {
                x: x - x_scale_offset,
                y: y_scale.scale(datum.y1),
            })
        })
        .collect();

    emit_points(
        series,
        x_scale,
        y_scale,
        color,
        shift - x_scale_offset,
        false,
        &mut out,
    );
    out.lines.push(LineGeometry {
        path,
        points: std::mem::take(&mut out.points),
        color: color.to_owned(),
        series_id: series.series_id.clone(),
        transform_x: shift,
    });
    out
}

fn emit_area(
    series: &FormattedSeries,
    x_scale: &Scale,
    y_scale: &ContinuousScale,
    color: &str,
    shift: f64,
    x_scale_offset: f64,
    has_y0: bool,
) -> EmittedGeometry {
    let mut out = EmittedGeometry::default();
    let is_log = y_scale.scale_type() == ScaleType::Log;
    let data = sorted_data(series);

    let upper: Vec<Option<PathPoint>> = data
        .iter()
        .map(|datum| {
            let defined = datum.initial_y1.is_some() && !(is_log && datum.y1 <= 0.0);
            if !defined {
                return None;
            }
            let x = x_scale.project(&datum.x)?;
            Some(PathPoint {
                x: x - x_scale_offset,
                y: y_scale.scale(datum.y1),
            })
        })
        .collect();
    let lower: Vec<Option<PathPoint>> = data
        .iter()
        .map(|datum| {
            let defined = datum.initial_y1.is_some() && !(is_log && datum.y1 <= 0.0);
            if !defined {
                return None;
            }
            let x = x_scale.project(&datum.x)?;
            let y = if is_log && datum.y0 <= 0.0 {
                y_scale.range()[0]
            } else {
                y_scale.scale(datum.y0)
            };
            Some(PathPoint {
                x: x - x_scale_offset,
                y,
            })
        })
        .collect();

    emit_points(
        series,
        x_scale,
        y_scale,
        color,
        shift - x_scale_offset,
        has_y0,
        &mut out,
    );
    out.areas.push(AreaGeometry {
        upper,
        lower,
        points: std::mem::take(&mut out.points),
        color: color.to_owned(),
        series_id: series.series_id.clone(),
        transform_x: shift,
    });
    out
}
