//! Walks formatted series groups through the scales in stable draw order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::scales::{ContinuousScale, Scale, compute_x_scale_offset};
use crate::core::series::FormattedDataSeries;
use crate::core::spec::{SeriesKind, SeriesSpec};
use crate::core::types::GroupId;
use crate::geometry::emitters::GeometryEmitter;
use crate::geometry::index::GeometryIndexBuilder;
use crate::geometry::{
    AreaGeometry, BarGeometry, GeometryCounts, GeometryIndex, LineGeometry, PointGeometry,
};

/// Fallback series color when a spec declares none.
pub const DEFAULT_SERIES_COLOR: &str = "#6092C0";

/// Scales plus every drawable primitive of one computation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGeometries {
    pub x_scale: Scale,
    pub y_scales: IndexMap<GroupId, ContinuousScale>,
    pub points: Vec<PointGeometry>,
    pub bars: Vec<BarGeometry>,
    pub lines: Vec<LineGeometry>,
    pub areas: Vec<AreaGeometry>,
    pub geometries_index: GeometryIndex,
    pub geometries_counts: GeometryCounts,
}

/// Emits all geometries for the formatted data.
///
/// Stacked groups render first (in group order), then non-stacked groups.
/// A running bar order index fans clustered bar series out side-by-side:
/// each stacked group with bars takes one slot for all its series, then
/// every non-stacked bar series takes its own slot after them. Groups whose
/// id has no Y scale are skipped.
#[must_use]
pub fn compute_series_geometries(
    specs: &[SeriesSpec],
    formatted: &FormattedDataSeries,
    x_scale: Scale,
    y_scales: IndexMap<GroupId, ContinuousScale>,
    total_bars_in_cluster: usize,
    stacked_bars_in_cluster: usize,
    enable_histogram_mode: bool,
) -> SeriesGeometries {
    let mut geometries = SeriesGeometries {
        x_scale,
        y_scales,
        points: Vec::new(),
        bars: Vec::new(),
        lines: Vec::new(),
        areas: Vec::new(),
        geometries_index: GeometryIndex::default(),
        geometries_counts: GeometryCounts::default(),
    };
    let mut index = GeometryIndexBuilder::default();
    let mut order_index = 0;

    for group in &formatted.stacked {
        let Some(y_scale) = geometries.y_scales.get(&group.group_id).cloned() else {
            continue;
        };
        render_group(
            specs,
            group,
            &mut geometries,
            &y_scale,
            &mut index,
            order_index,
            true,
            total_bars_in_cluster,
            enable_histogram_mode,
        );
        if group.counts.bar_series > 0 {
            order_index += 1;
        }
    }
    for group in &formatted.non_stacked {
        let Some(y_scale) = geometries.y_scales.get(&group.group_id).cloned() else {
            continue;
        };
        render_group(
            specs,
            group,
            &mut geometries,
            &y_scale,
            &mut index,
            stacked_bars_in_cluster,
            false,
            total_bars_in_cluster,
            enable_histogram_mode,
        );
    }

    geometries.geometries_index = index.build();
    geometries
}

#[allow(clippy::too_many_arguments)]
fn render_group(
    specs: &[SeriesSpec],
    group: &crate::core::series::FormattedGroup,
    geometries: &mut SeriesGeometries,
    y_scale: &ContinuousScale,
    index: &mut GeometryIndexBuilder,
    index_offset: usize,
    is_stacked: bool,
    total_bars_in_cluster: usize,
    enable_histogram_mode: bool,
) {
    let mut bar_index_offset = 0;
    for series in &group.series {
        let Some(spec) = specs.iter().find(|s| s.id == series.series_id) else {
            continue;
        };
        let color = spec.color.as_deref().unwrap_or(DEFAULT_SERIES_COLOR);

        let emitter = match spec.kind {
            SeriesKind::Bar => {
                let order_index = if is_stacked {
                    index_offset
                } else {
                    index_offset + bar_index_offset
                };
                bar_index_offset += 1;
                GeometryEmitter::Bar { order_index }
            }
            SeriesKind::Line => GeometryEmitter::Line {
                shift: geometries.x_scale.bandwidth() * total_bars_in_cluster.max(1) as f64 / 2.0,
                x_scale_offset: compute_x_scale_offset(
                    &geometries.x_scale,
                    enable_histogram_mode,
                    spec.histogram_alignment,
                ),
            },
            SeriesKind::Area => GeometryEmitter::Area {
                shift: geometries.x_scale.bandwidth() * total_bars_in_cluster.max(1) as f64 / 2.0,
                x_scale_offset: compute_x_scale_offset(
                    &geometries.x_scale,
                    enable_histogram_mode,
                    spec.histogram_alignment,
                ),
                has_y0: series.data.iter().any(|d| d.initial_y0.is_some()),
            },
        };

        let emitted = emitter.emit(series, &geometries.x_scale, y_scale, color);
        geometries.geometries_counts.merge(GeometryCounts {
            points: emitted.points.len(),
            bars: emitted.bars.len(),
            areas: emitted.areas.len(),
            areas_points: emitted.areas.iter().map(|a| a.points.len()).sum(),
            lines: emitted.lines.len(),
            line_points: emitted.lines.iter().map(|l| l.points.len()).sum(),
        });
        geometries.points.extend(emitted.points);
        geometries.bars.extend(emitted.bars);
        geometries.lines.extend(emitted.lines);
        geometries.areas.extend(emitted.areas);
        index.append(emitted.index);
    }
}
