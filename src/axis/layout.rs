//! Axis box placement around the plot area.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::axis::dimensions::{AxisTicksDimensions, get_scale_for_axis_spec};
use crate::axis::ticks::{get_available_ticks, get_visible_ticks, grid_line_for_tick};
use crate::axis::{AxisTick, GridLineSegment};
use crate::core::spec::AxisSpec;
use crate::core::types::{AxisId, Dimensions, Position, Rotation};
use crate::core::x_domain::XDomain;
use crate::core::y_domain::YDomain;
use crate::error::{ChartError, ChartResult};
use crate::theme::ChartTheme;

/// Running top/bottom/left/right offsets threaded through the placement
/// fold. Left/top axes push the plot origin forward; right/bottom axes
/// extend the bounding box backward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutAccumulator {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Placement of one axis box plus its accumulator increments.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisPlacement {
    dimensions: Dimensions,
    top_increment: f64,
    bottom_increment: f64,
    left_increment: f64,
    right_increment: f64,
}

/// Full axis chrome layout for one chart pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisLayout {
    pub axis_positions: IndexMap<AxisId, Dimensions>,
    pub axis_ticks: IndexMap<AxisId, Vec<AxisTick>>,
    pub axis_visible_ticks: IndexMap<AxisId, Vec<AxisTick>>,
    pub axis_grid_lines: IndexMap<AxisId, Vec<GridLineSegment>>,
}

/// Pixel range of an axis's scale, oriented by position and rotation.
///
/// Horizontal axes span the chart width, vertical ones the height. Y ranges
/// run bottom-up (`[height, 0]`) in the default rotation; 180/-90 rotations
/// flip the direction of the domain they carry.
#[must_use]
pub fn get_min_max_range(
    position: Position,
    rotation: Rotation,
    chart_dimensions: Dimensions,
) -> [f64; 2] {
    let Dimensions { width, height, .. } = chart_dimensions;
    match position {
        Position::Bottom | Position::Top => match rotation {
            Rotation::Deg0 | Rotation::Deg90 => [0.0, width],
            Rotation::Deg180 | Rotation::DegNeg90 => [width, 0.0],
        },
        Position::Left | Position::Right => match rotation {
            Rotation::Deg90 => [0.0, height],
            Rotation::Deg180 => [0.0, height],
            Rotation::DegNeg90 => [height, 0.0],
            Rotation::Deg0 => [height, 0.0],
        },
    }
}

fn place_axis(
    chart_dimensions: Dimensions,
    theme: &ChartTheme,
    axis_spec: &AxisSpec,
    axis_dim: &AxisTicksDimensions,
    acc: LayoutAccumulator,
    tick_dimension: f64,
    label_padding_sum: f64,
    title_dimension: f64,
) -> AxisPlacement {
    let margins = theme.chart_margins;
    let mut dimensions = chart_dimensions;
    let mut placement = AxisPlacement {
        dimensions,
        top_increment: 0.0,
        bottom_increment: 0.0,
        left_increment: 0.0,
        right_increment: 0.0,
    };

    if axis_spec.position.is_vertical() {
        let dim_width =
            label_padding_sum + axis_dim.max_label_bbox_width + tick_dimension + title_dimension;
        if axis_spec.position == Position::Left {
            placement.left_increment = margins.left + dim_width;
            dimensions.left = acc.left + margins.left;
        } else {
            placement.right_increment = dim_width + margins.right;
            dimensions.left = chart_dimensions.left + chart_dimensions.width + acc.right;
        }
        dimensions.width = dim_width;
    } else {
        let dim_height =
            label_padding_sum + axis_dim.max_label_bbox_height + tick_dimension + title_dimension;
        if axis_spec.position == Position::Top {
            placement.top_increment = dim_height + margins.top;
            dimensions.top = acc.top + margins.top;
        } else {
            placement.bottom_increment = dim_height + margins.bottom;
            dimensions.top = chart_dimensions.top + chart_dimensions.height + acc.bottom;
        }
        dimensions.height = dim_height;
    }
    placement.dimensions = dimensions;
    placement
}

/// Lays out every measured axis around the plot area.
///
/// Axes are placed in spec order, folding a [`LayoutAccumulator`] left to
/// right; each axis contributes its ticks, visible ticks, optional gridlines
/// and its box. An axis whose scale cannot be resolved here is a fatal
/// configuration inconsistency.
#[allow(clippy::too_many_arguments)]
pub fn compute_axis_layout(
    chart_dimensions: Dimensions,
    theme: &ChartTheme,
    rotation: Rotation,
    axis_specs: &[AxisSpec],
    axis_dimensions: &IndexMap<AxisId, AxisTicksDimensions>,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    total_bars_in_cluster: usize,
    enable_histogram_mode: bool,
) -> ChartResult<AxisLayout> {
    let mut layout = AxisLayout::default();
    let mut acc = LayoutAccumulator {
        top: 0.0,
        bottom: theme.chart_paddings.bottom,
        left: theme.chart_paddings.left,
        right: theme.chart_paddings.right,
    };
    let timezone = x_domain.descriptor.timezone;

    for (axis_id, axis_dim) in axis_dimensions {
        let Some(axis_spec) = axis_specs.iter().find(|s| &s.id == axis_id) else {
            continue;
        };
        let range = get_min_max_range(axis_spec.position, rotation, chart_dimensions);
        let scale = get_scale_for_axis_spec(
            axis_spec,
            x_domain,
            y_domains,
            total_bars_in_cluster,
            rotation,
            range,
            theme.bars_padding,
            enable_histogram_mode,
        )
        .ok_or_else(|| ChartError::UnresolvableAxis {
            axis_id: axis_id.clone(),
        })?;

        let all_ticks = get_available_ticks(
            axis_spec,
            &scale,
            total_bars_in_cluster,
            enable_histogram_mode,
            timezone,
        );
        let visible_ticks = get_visible_ticks(&all_ticks, axis_spec, axis_dim);

        if axis_spec.show_grid_lines {
            let is_vertical = axis_spec.position.is_vertical();
            let grid_lines = visible_ticks
                .iter()
                .map(|tick| grid_line_for_tick(is_vertical, tick.position, chart_dimensions))
                .collect();
            layout.axis_grid_lines.insert(axis_id.clone(), grid_lines);
        }

        let tick_dimension = if axis_spec.hide {
            0.0
        } else {
            theme.axis.tick_line_size + theme.axis.tick_padding
        };
        let label_padding_sum = theme.axis.tick_label_padding * 2.0;
        let title_dimension = if axis_spec.title.is_some() {
            theme.axis.title_padding + theme.axis.title_font_size
        } else {
            0.0
        };

        let placement = place_axis(
            chart_dimensions,
            theme,
            axis_spec,
            axis_dim,
            acc,
            tick_dimension,
            label_padding_sum,
            title_dimension,
        );
        acc.top += placement.top_increment;
        acc.bottom += placement.bottom_increment;
        acc.left += placement.left_increment;
        acc.right += placement.right_increment;

        layout
            .axis_positions
            .insert(axis_id.clone(), placement.dimensions);
        layout.axis_ticks.insert(axis_id.clone(), all_ticks);
        layout
            .axis_visible_ticks
            .insert(axis_id.clone(), visible_ticks);
    }
    Ok(layout)
}
