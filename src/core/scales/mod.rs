//! Scale factory: builds concrete band and continuous scales from merged
//! domains plus a target pixel range.

pub mod band;
pub mod continuous;
pub mod ticks;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use band::BandScale;
pub use continuous::{ContinuousScale, ContinuousScaleOptions, SnappedValue};

use crate::core::series::FormattedDataSeries;
use crate::core::spec::HistogramAlignment;
use crate::core::types::{CategoryValue, GroupId, ScaleType};
use crate::core::x_domain::{Domain, XDomain};
use crate::core::y_domain::YDomain;

/// Concrete scale for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Band(BandScale),
    Continuous(ContinuousScale),
}

impl Scale {
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Scale::Band(s) => s.bandwidth(),
            Scale::Continuous(s) => s.bandwidth(),
        }
    }

    #[must_use]
    pub fn bars_padding(&self) -> f64 {
        match self {
            Scale::Band(s) => s.bars_padding(),
            Scale::Continuous(s) => s.bars_padding(),
        }
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        match self {
            Scale::Band(_) => 0.0,
            Scale::Continuous(s) => s.min_interval(),
        }
    }

    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        match self {
            Scale::Band(s) => s.range(),
            Scale::Continuous(s) => s.range(),
        }
    }

    #[must_use]
    pub fn is_single_value(&self) -> bool {
        match self {
            Scale::Band(s) => s.is_single_value(),
            Scale::Continuous(s) => s.is_single_value(),
        }
    }

    /// Maps an X category to its pixel position, `None` when the value lies
    /// outside the scale's domain.
    #[must_use]
    pub fn scale_value(&self, value: &CategoryValue) -> Option<f64> {
        match self {
            Scale::Band(s) => s.scale(value),
            Scale::Continuous(s) => {
                let v = value.as_f64()?;
                if !s.is_value_in_domain(v) {
                    return None;
                }
                Some(s.scale(v))
            }
        }
    }

    /// Maps a value to its pixel position without domain clamping, used for
    /// tick placement where histogram boundary ticks sit past the domain.
    #[must_use]
    pub fn project(&self, value: &CategoryValue) -> Option<f64> {
        match self {
            Scale::Band(s) => s.scale(value),
            Scale::Continuous(s) => value.as_f64().map(|v| s.scale(v)),
        }
    }

    /// Tick values of this scale as category values.
    #[must_use]
    pub fn tick_values(&self) -> Vec<CategoryValue> {
        match self {
            Scale::Band(s) => s.ticks(),
            Scale::Continuous(s) => s.ticks().into_iter().map(CategoryValue::num).collect(),
        }
    }
}

/// Bar-cluster counts derived from the formatted data.
///
/// A stacked group draws all its bar series into one shared sub-band, so it
/// counts as a single cluster member; non-stacked bar series each take one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BarsInCluster {
    pub stacked_bars_in_cluster: usize,
    pub total_bars_in_cluster: usize,
}

#[must_use]
pub fn count_bars_in_cluster(formatted: &FormattedDataSeries) -> BarsInCluster {
    let stacked_bars_in_cluster = formatted
        .stacked
        .iter()
        .filter(|group| group.counts.bar_series > 0)
        .count();
    let non_stacked: usize = formatted
        .non_stacked
        .iter()
        .map(|group| group.counts.bar_series)
        .sum();
    BarsInCluster {
        stacked_bars_in_cluster,
        total_bars_in_cluster: stacked_bars_in_cluster + non_stacked,
    }
}

/// Shrinks a band-continuous range by one bandwidth at the appropriate end,
/// so the last bucket stays inside the axis. Single-value histograms keep
/// the full range; their one bucket already spans it.
fn band_scale_range(
    is_inverse: bool,
    is_single_value_histogram: bool,
    min_range: f64,
    max_range: f64,
    bandwidth: f64,
) -> [f64; 2] {
    let offset = if is_single_value_histogram {
        0.0
    } else {
        bandwidth
    };
    if is_inverse {
        [min_range - offset, max_range]
    } else {
        [min_range, max_range - offset]
    }
}

/// Builds the X scale for the merged X domain.
///
/// Ordinal domains get a band scale whose bandwidth splits each category
/// band evenly among the clustered bar series. Band-continuous domains
/// bucket the span by the minimum interval, with one closing bucket unless
/// the domain is a single-value histogram. Plain continuous domains map
/// straight through with zero bandwidth.
#[must_use]
pub fn compute_x_scale(
    x_domain: &XDomain,
    total_bars_in_cluster: usize,
    range: [f64; 2],
    bars_padding: f64,
    enable_histogram_mode: bool,
) -> Scale {
    let [min_range, max_range] = range;
    match &x_domain.domain {
        Domain::Ordinal(categories) => {
            let dividend = total_bars_in_cluster.max(1) as f64;
            let range_span = (max_range - min_range).abs();
            let bandwidth = range_span / (categories.len().max(1) as f64 * dividend);
            Scale::Band(BandScale::new(
                categories.clone(),
                range,
                Some(bandwidth),
                bars_padding,
            ))
        }
        Domain::Continuous { min, max } => {
            let scale_type = x_domain.descriptor.scale_type;
            let timezone = x_domain.descriptor.timezone;
            if x_domain.descriptor.is_band_scale && x_domain.min_interval > 0.0 {
                let is_single_value_histogram = enable_histogram_mode && max - min == 0.0;
                // A single-value histogram occupies exactly one bucket.
                let domain = if is_single_value_histogram {
                    [*min, min + x_domain.min_interval]
                } else {
                    [*min, *max]
                };
                let interval_count = (domain[1] - domain[0]) / x_domain.min_interval;
                let interval_count_offset = if is_single_value_histogram { 0.0 } else { 1.0 };
                let range_span = (max_range - min_range).abs();
                let bandwidth = range_span / (interval_count + interval_count_offset);
                let is_inverse = max_range < min_range;
                let adjusted_range = band_scale_range(
                    is_inverse,
                    is_single_value_histogram,
                    min_range,
                    max_range,
                    bandwidth,
                );
                Scale::Continuous(ContinuousScale::new(
                    scale_type,
                    domain,
                    adjusted_range,
                    ContinuousScaleOptions {
                        bandwidth: bandwidth / total_bars_in_cluster.max(1) as f64,
                        min_interval: x_domain.min_interval,
                        timezone,
                        total_bars_in_cluster,
                        bars_padding,
                        is_single_value_histogram,
                        ..ContinuousScaleOptions::default()
                    },
                ))
            } else {
                Scale::Continuous(ContinuousScale::new(
                    scale_type,
                    [*min, *max],
                    range,
                    ContinuousScaleOptions {
                        min_interval: x_domain.min_interval,
                        timezone,
                        total_bars_in_cluster,
                        bars_padding,
                        ..ContinuousScaleOptions::default()
                    },
                ))
            }
        }
    }
}

/// Builds one Y scale per group over the shared pixel range.
#[must_use]
pub fn compute_y_scales(
    y_domains: &[YDomain],
    range: [f64; 2],
    tick_count: usize,
) -> IndexMap<GroupId, ContinuousScale> {
    y_domains
        .iter()
        .map(|domain| {
            let scale_type = if domain.scale_type.is_continuous() {
                domain.scale_type
            } else {
                ScaleType::Linear
            };
            (
                domain.group_id.clone(),
                ContinuousScale::new(
                    scale_type,
                    [domain.min, domain.max],
                    range,
                    ContinuousScaleOptions {
                        tick_count,
                        ..ContinuousScaleOptions::default()
                    },
                ),
            )
        })
        .collect()
}

/// Horizontal shift aligning histogram buckets to their datum value.
///
/// Start alignment shifts geometry left by half a band plus the padding
/// half, so the bucket's left edge sits on the datum; center leaves it as
/// mapped; end mirrors the start shift.
#[must_use]
pub fn compute_x_scale_offset(
    x_scale: &Scale,
    enable_histogram_mode: bool,
    alignment: HistogramAlignment,
) -> f64 {
    if !enable_histogram_mode {
        return 0.0;
    }
    let bandwidth = x_scale.bandwidth();
    let bars_padding = x_scale.bars_padding();
    let band = bandwidth / (1.0 - bars_padding);
    let half_padding = (band - bandwidth) / 2.0;
    let start_alignment_offset = bandwidth / 2.0 + half_padding;
    match alignment {
        HistogramAlignment::Start => start_alignment_offset,
        HistogramAlignment::Center => 0.0,
        HistogramAlignment::End => -start_alignment_offset,
    }
}
