//! Axis-to-scale resolution and tick label measurement.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::scales::{Scale, compute_x_scale, compute_y_scales};
use crate::core::spec::AxisSpec;
use crate::core::types::{AxisId, Position, Rotation, Size};
use crate::core::x_domain::XDomain;
use crate::core::y_domain::YDomain;
use crate::measure::TextMeasurer;
use crate::theme::AxisTheme;

/// Maximum label bounding boxes across all ticks of one axis.
///
/// The bbox pair accounts for label rotation; the text pair is the raw,
/// unrotated measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisTicksDimensions {
    pub max_label_bbox_width: f64,
    pub max_label_bbox_height: f64,
    pub max_label_text_width: f64,
    pub max_label_text_height: f64,
}

/// True when the axis reads from the Y domain under the given rotation.
///
/// A vertical axis carries the Y domain at 0/180 degrees; rotating the chart
/// by ±90 swaps the domains, so there a horizontal axis carries Y.
#[must_use]
pub fn is_y_domain(position: Position, rotation: Rotation) -> bool {
    if position.is_vertical() {
        rotation.is_horizontal()
    } else {
        !rotation.is_horizontal()
    }
}

/// Resolves the scale backing an axis spec over the given pixel range.
///
/// Returns `None` when the axis references a Y group with no matching
/// series; callers decide whether that is a skip or a configuration error.
#[must_use]
pub fn get_scale_for_axis_spec(
    axis_spec: &AxisSpec,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    total_bars_in_cluster: usize,
    rotation: Rotation,
    range: [f64; 2],
    bars_padding: f64,
    enable_histogram_mode: bool,
) -> Option<Scale> {
    if is_y_domain(axis_spec.position, rotation) {
        let tick_count = axis_spec
            .desired_tick_count
            .unwrap_or(crate::core::scales::continuous::DEFAULT_TICK_COUNT);
        let mut y_scales = compute_y_scales(y_domains, range, tick_count);
        return y_scales
            .shift_remove(&axis_spec.group_id)
            .map(Scale::Continuous);
    }
    Some(compute_x_scale(
        x_domain,
        total_bars_in_cluster,
        range,
        bars_padding,
        enable_histogram_mode,
    ))
}

/// Bounding box of a label after rotating it by `degrees`.
#[must_use]
pub fn compute_rotated_label_size(size: Size, degrees: f64) -> Size {
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    Size::new(
        size.width * cos + size.height * sin,
        size.width * sin + size.height * cos,
    )
}

/// Measures every tick label of one axis and reduces to the maxima.
///
/// Returns `None` for hidden axes without gridlines and for axes whose
/// scale cannot be resolved (logged, the axis is simply not displayed at
/// this stage; the placement pass treats unresolvable axes as fatal).
#[must_use]
pub fn compute_axis_ticks_dimensions(
    axis_spec: &AxisSpec,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    total_bars_in_cluster: usize,
    measurer: &dyn TextMeasurer,
    rotation: Rotation,
    theme: &AxisTheme,
    bars_padding: f64,
    enable_histogram_mode: bool,
) -> Option<AxisTicksDimensions> {
    if axis_spec.hide && !axis_spec.show_grid_lines {
        return None;
    }

    let scale = get_scale_for_axis_spec(
        axis_spec,
        x_domain,
        y_domains,
        total_bars_in_cluster,
        rotation,
        [0.0, 1.0],
        bars_padding,
        enable_histogram_mode,
    );
    let Some(scale) = scale else {
        warn!(axis_id = %axis_spec.id, "cannot compute scale for axis spec, axis will not be displayed");
        return None;
    };

    let timezone = x_domain.descriptor.timezone;
    let mut dims = AxisTicksDimensions::default();
    for tick in scale.tick_values() {
        let label = axis_spec.tick_format.format(&tick, timezone);
        let Some(bbox) = measurer.measure(
            &label,
            theme.tick_label_padding,
            theme.font_size,
            &theme.font_family,
        ) else {
            continue;
        };
        let rotated = compute_rotated_label_size(bbox, theme.tick_label_rotation);
        dims.max_label_bbox_width = dims.max_label_bbox_width.max(rotated.width.ceil());
        dims.max_label_bbox_height = dims.max_label_bbox_height.max(rotated.height.ceil());
        dims.max_label_text_width = dims.max_label_text_width.max(bbox.width.ceil());
        dims.max_label_text_height = dims.max_label_text_height.max(bbox.height.ceil());
    }
    Some(dims)
}

/// Measures all axes, skipping the ones that resolve to `None`.
#[must_use]
pub fn compute_all_axes_dimensions(
    axis_specs: &[AxisSpec],
    x_domain: &XDomain,
    y_domains: &[YDomain],
    total_bars_in_cluster: usize,
    measurer: &dyn TextMeasurer,
    rotation: Rotation,
    theme: &AxisTheme,
    bars_padding: f64,
    enable_histogram_mode: bool,
) -> IndexMap<AxisId, AxisTicksDimensions> {
    let mut dimensions = IndexMap::new();
    for spec in axis_specs {
        if let Some(dims) = compute_axis_ticks_dimensions(
            spec,
            x_domain,
            y_domains,
            total_bars_in_cluster,
            measurer,
            rotation,
            theme,
            bars_padding,
            enable_histogram_mode,
        ) {
            dimensions.insert(spec.id.clone(), dims);
        }
    }
    dimensions
}
