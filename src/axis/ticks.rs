//! Tick positioning, histogram tick extension and overlap resolution.

use std::collections::HashSet;

use crate::axis::{AxisTick, AxisTicksDimensions, GridLineSegment};
use crate::core::scales::Scale;
use crate::core::spec::AxisSpec;
use crate::core::types::{CategoryValue, Dimensions, TimeZone};

/// Computes all ticks for one axis, positioned along the scale.
///
/// Histogram mode on a banded scale appends trailing boundary ticks spaced
/// at the last observed tick interval until `min_interval` past the last raw
/// tick, so the final bucket gets a closing boundary. A single-value
/// histogram instead synthesizes exactly two ticks spanning its one bucket.
/// Duplicate labels are collapsed unless the spec opts out.
#[must_use]
pub fn get_available_ticks(
    axis_spec: &AxisSpec,
    scale: &Scale,
    total_bars_in_cluster: usize,
    enable_histogram_mode: bool,
    timezone: TimeZone,
) -> Vec<AxisTick> {
    let mut tick_values = scale.tick_values();
    let is_single_value_scale = match scale {
        Scale::Continuous(s) => s.is_single_value(),
        Scale::Band(_) => false,
    };
    let has_additional_ticks = enable_histogram_mode && scale.bandwidth() > 0.0;

    if has_additional_ticks && !is_single_value_scale {
        let last_two = match tick_values.as_slice() {
            [.., penultimate, last] => penultimate.as_f64().zip(last.as_f64()),
            _ => None,
        };
        if let Some((prev, last)) = last_two {
            let tick_distance = last - prev;
            if tick_distance > 0.0 {
                let extra = (scale.min_interval() / tick_distance) as usize;
                for i in 1..=extra {
                    tick_values.push(CategoryValue::num(last + i as f64 * tick_distance));
                }
            }
        }
    }

    let shift = total_bars_in_cluster.max(1) as f64;
    let band = scale.bandwidth() / (1.0 - scale.bars_padding());
    let half_padding = (band - scale.bandwidth()) / 2.0;
    let offset = if enable_histogram_mode {
        -half_padding
    } else {
        (scale.bandwidth() * shift) / 2.0
    };

    if is_single_value_scale && has_additional_ticks {
        let Some(first_value) = tick_values.first().cloned() else {
            return Vec::new();
        };
        let first_tick = AxisTick {
            label: axis_spec.tick_format.format(&first_value, timezone),
            position: scale.project(&first_value).unwrap_or(0.0) + offset,
            value: first_value.clone(),
        };
        let last_value =
            CategoryValue::num(first_value.as_f64().unwrap_or(0.0) + scale.min_interval());
        let last_tick = AxisTick {
            label: axis_spec.tick_format.format(&last_value, timezone),
            position: scale.bandwidth() + half_padding * 2.0,
            value: last_value,
        };
        return vec![first_tick, last_tick];
    }

    let all_ticks: Vec<AxisTick> = tick_values
        .into_iter()
        .map(|value| AxisTick {
            label: axis_spec.tick_format.format(&value, timezone),
            position: scale.project(&value).unwrap_or(0.0) + offset,
            value,
        })
        .collect();

    if axis_spec.show_duplicated_ticks {
        return all_ticks;
    }
    let mut seen: HashSet<String> = HashSet::new();
    all_ticks
        .into_iter()
        .filter(|tick| seen.insert(tick.label.clone()))
        .collect()
}

/// Filters ticks down to a non-overlapping visible subset.
///
/// Ticks are walked in position order, each claiming half the axis's
/// maximum label footprint on both sides. The first tick is always kept;
/// later ticks are kept only when their required space clears the claimed
/// space, otherwise the spec's overlap flags decide between dropping the
/// tick, keeping it unlabeled, or keeping it labeled anyway.
#[must_use]
pub fn get_visible_ticks(
    all_ticks: &[AxisTick],
    axis_spec: &AxisSpec,
    axis_dim: &AxisTicksDimensions,
) -> Vec<AxisTick> {
    let mut ticks: Vec<AxisTick> = all_ticks.to_vec();
    ticks.sort_by(|a, b| a.position.total_cmp(&b.position));

    let required_space = if axis_spec.position.is_vertical() {
        axis_dim.max_label_bbox_height / 2.0
    } else {
        axis_dim.max_label_bbox_width / 2.0
    };

    let mut previous_occupied_space = 0.0;
    let mut visible = Vec::with_capacity(ticks.len());
    for (i, tick) in ticks.into_iter().enumerate() {
        if i == 0 || tick.position - required_space >= previous_occupied_space {
            previous_occupied_space = tick.position + required_space;
            visible.push(tick);
        } else if axis_spec.show_overlapping_ticks || axis_spec.show_overlapping_labels {
            let mut tick = tick;
            if !axis_spec.show_overlapping_labels {
                tick.label = String::new();
            }
            visible.push(tick);
        }
    }
    visible
}

/// Full-width/height gridline segment for one visible tick.
#[must_use]
pub fn grid_line_for_tick(
    is_vertical_axis: bool,
    tick_position: f64,
    chart_dimensions: Dimensions,
) -> GridLineSegment {
    if is_vertical_axis {
        GridLineSegment {
            x0: 0.0,
            y0: tick_position,
            x1: chart_dimensions.width,
            y1: tick_position,
        }
    } else {
        GridLineSegment {
            x0: tick_position,
            y0: 0.0,
            x1: tick_position,
            y1: chart_dimensions.height,
        }
    }
}
