//! Pipeline façade: domain merge and geometry build as two atomic passes.
//!
//! Hosts re-invoke these whenever any input changes; there is no cached
//! state between calls. Both the axis engine and the geometry coordinator
//! consume the scale instances built here, so ticks and plotted geometry
//! stay pixel-exact consistent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::scales::{
    compute_x_scale, compute_y_scales, continuous::DEFAULT_TICK_COUNT, count_bars_in_cluster,
};
use crate::core::series::{
    FormattedDataSeries, SeriesData, collect_x_values, format_data_series,
};
use crate::core::spec::{CustomXDomain, DomainRange, SeriesKind, SeriesSpec};
use crate::core::types::{CategoryValue, GroupId, Rotation, Size, SpecId};
use crate::core::x_domain::{XDomain, merge_x_domain};
use crate::core::y_domain::{YDomain, merge_y_domains};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{GeometryCounts, SeriesGeometries, compute_series_geometries};
use crate::theme::ChartTheme;

const MAX_ANIMATABLE_BARS: usize = 300;
const MAX_ANIMATABLE_LINE_AREA_POINTS: usize = 600;

/// Merged domains plus the formatted data both downstream passes consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDomains {
    pub x_domain: XDomain,
    pub y_domains: Vec<YDomain>,
    pub formatted_data_series: FormattedDataSeries,
    /// Distinct X values in first-seen order, for crosshair snapping.
    pub x_values: Vec<CategoryValue>,
}

/// Merges all series into one X domain and per-group Y domains.
pub fn compute_series_domains(
    specs: &[SeriesSpec],
    data: &IndexMap<SpecId, SeriesData>,
    custom_x: Option<&CustomXDomain>,
    custom_y_by_group: &IndexMap<GroupId, DomainRange>,
) -> ChartResult<SeriesDomains> {
    let x_values = collect_x_values(data);
    let x_domain = merge_x_domain(specs, &x_values, custom_x)?;
    let y_domains = merge_y_domains(data, specs, custom_y_by_group)?;
    let formatted_data_series = format_data_series(specs, data);
    Ok(SeriesDomains {
        x_domain,
        y_domains,
        formatted_data_series,
        x_values,
    })
}

/// True when any bar series opts into histogram bucket rendering.
#[must_use]
pub fn is_histogram_mode_enabled(specs: &[SeriesSpec]) -> bool {
    specs
        .iter()
        .any(|s| s.kind == SeriesKind::Bar && s.enable_histogram_mode)
}

/// Builds the scales for the chart size and emits every geometry.
///
/// The X range spans the width and the Y range runs bottom-up over the
/// height in the default rotation; ±90 rotations swap the two extents so
/// the domains still map onto the correct pixel span.
pub fn compute_chart_geometries(
    specs: &[SeriesSpec],
    domains: &SeriesDomains,
    chart_size: Size,
    rotation: Rotation,
    theme: &ChartTheme,
) -> ChartResult<SeriesGeometries> {
    let valid = chart_size.width.is_finite()
        && chart_size.height.is_finite()
        && chart_size.width > 0.0
        && chart_size.height > 0.0;
    if !valid {
        return Err(ChartError::InvalidDimensions {
            width: chart_size.width,
            height: chart_size.height,
        });
    }
    let (x_extent, y_extent) = if rotation.is_horizontal() {
        (chart_size.width, chart_size.height)
    } else {
        (chart_size.height, chart_size.width)
    };

    let bars = count_bars_in_cluster(&domains.formatted_data_series);
    let enable_histogram_mode = is_histogram_mode_enabled(specs);
    let x_scale = compute_x_scale(
        &domains.x_domain,
        bars.total_bars_in_cluster,
        [0.0, x_extent],
        theme.bars_padding,
        enable_histogram_mode,
    );
    let y_scales = compute_y_scales(&domains.y_domains, [y_extent, 0.0], DEFAULT_TICK_COUNT);

    Ok(compute_series_geometries(
        specs,
        &domains.formatted_data_series,
        x_scale,
        y_scales,
        bars.total_bars_in_cluster,
        bars.stacked_bars_in_cluster,
        enable_histogram_mode,
    ))
}

/// Threshold policy deciding whether per-frame animation stays feasible
/// for the emitted geometry volume.
#[must_use]
pub fn is_chart_animatable(counts: &GeometryCounts, animation_enabled: bool) -> bool {
    if !animation_enabled {
        return false;
    }
    if counts.bars > MAX_ANIMATABLE_BARS {
        return false;
    }
    counts.line_points + counts.areas_points <= MAX_ANIMATABLE_LINE_AREA_POINTS
}
