//! Continuous scale over linear, power, log and time transforms, with
//! optional banding for bar/histogram rendering on continuous domains.

use serde::{Deserialize, Serialize};

use crate::core::scales::ticks::{limit_log_domain, linear_ticks, log_ticks, time_ticks};
use crate::core::types::{ScaleType, TimeZone};

pub const DEFAULT_TICK_COUNT: usize = 10;

/// Result of snapping a pixel to the nearest data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnappedValue {
    pub value: f64,
    /// True when the pixel falls inside the bandwidth occupied by the
    /// snapped point rather than in the gap next to it.
    pub within_bandwidth: bool,
}

/// Options shaping a continuous scale beyond its domain and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousScaleOptions {
    /// Raw per-bucket bandwidth; 0 for pure point scales.
    pub bandwidth: f64,
    pub min_interval: f64,
    pub timezone: TimeZone,
    pub total_bars_in_cluster: usize,
    pub bars_padding: f64,
    pub tick_count: usize,
    /// True when the scale was adjusted to fit a one-bucket histogram.
    pub is_single_value_histogram: bool,
}

impl Default for ContinuousScaleOptions {
    fn default() -> Self {
        Self {
            bandwidth: 0.0,
            min_interval: 0.0,
            timezone: TimeZone::Utc,
            total_bars_in_cluster: 1,
            bars_padding: 0.0,
            tick_count: DEFAULT_TICK_COUNT,
            is_single_value_histogram: false,
        }
    }
}

/// Continuous scale mapping a numeric domain to a pixel range.
///
/// The forward mapping applies the type's transform (identity, signed square
/// root, log, or identity over epoch milliseconds) before the linear range
/// projection. Banded instances additionally offset every mapped value by
/// half the cluster's bandwidth padding, so bars stay centered inside their
/// padded step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    scale_type: ScaleType,
    domain: [f64; 2],
    range: [f64; 2],
    bandwidth: f64,
    bandwidth_padding: f64,
    min_interval: f64,
    bars_padding: f64,
    total_bars_in_cluster: usize,
    timezone: TimeZone,
    tick_count: usize,
    is_inverted: bool,
    is_single_value_histogram: bool,
}

impl ContinuousScale {
    #[must_use]
    pub fn new(
        scale_type: ScaleType,
        domain: [f64; 2],
        range: [f64; 2],
        options: ContinuousScaleOptions,
    ) -> Self {
        let domain = if scale_type == ScaleType::Log {
            limit_log_domain(domain)
        } else {
            domain
        };
        let padding = options.bars_padding.clamp(0.0, 1.0);
        Self {
            scale_type,
            domain,
            range,
            bandwidth: options.bandwidth * (1.0 - padding),
            bandwidth_padding: options.bandwidth * padding,
            min_interval: options.min_interval,
            bars_padding: padding,
            total_bars_in_cluster: options.total_bars_in_cluster.max(1),
            timezone: options.timezone,
            tick_count: options.tick_count.max(1),
            is_inverted: domain[0] > domain[1],
            is_single_value_histogram: options.is_single_value_histogram,
        }
    }

    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    #[must_use]
    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn bandwidth_padding(&self) -> f64 {
        self.bandwidth_padding
    }

    #[must_use]
    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }

    #[must_use]
    pub fn bars_padding(&self) -> f64 {
        self.bars_padding
    }

    #[must_use]
    pub fn total_bars_in_cluster(&self) -> usize {
        self.total_bars_in_cluster
    }

    #[must_use]
    pub fn timezone(&self) -> TimeZone {
        self.timezone
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.is_inverted
    }

    fn transform(&self, value: f64) -> f64 {
        match self.scale_type {
            ScaleType::Linear | ScaleType::Time | ScaleType::Ordinal => value,
            ScaleType::Sqrt => value.signum() * value.abs().sqrt(),
            ScaleType::Log => value.signum() * value.abs().ln(),
        }
    }

    fn untransform(&self, value: f64) -> f64 {
        match self.scale_type {
            ScaleType::Linear | ScaleType::Time | ScaleType::Ordinal => value,
            ScaleType::Sqrt => value.signum() * (value * value),
            ScaleType::Log => value.signum() * value.abs().exp(),
        }
    }

    /// Forward mapping: domain value to pixel coordinate.
    ///
    /// Degenerate zero-span domains map every value to the range start.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        let t0 = self.transform(self.domain[0]);
        let t1 = self.transform(self.domain[1]);
        let span = t1 - t0;
        let normalized = if span == 0.0 {
            0.0
        } else {
            (self.transform(value) - t0) / span
        };
        let projected = self.range[0] + normalized * (self.range[1] - self.range[0]);
        projected + (self.bandwidth_padding / 2.0) * self.total_bars_in_cluster as f64
    }

    /// Inverse mapping: pixel coordinate back to a domain value.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let pixel = pixel - (self.bandwidth_padding / 2.0) * self.total_bars_in_cluster as f64;
        let range_span = self.range[1] - self.range[0];
        let normalized = if range_span == 0.0 {
            0.0
        } else {
            (pixel - self.range[0]) / range_span
        };
        let t0 = self.transform(self.domain[0]);
        let t1 = self.transform(self.domain[1]);
        self.untransform(t0 + normalized * (t1 - t0))
    }

    /// Snaps a pixel to the data point (ascending X values) whose step
    /// contains it, used for hover/crosshair semantics.
    ///
    /// Pixels landing on a `min_interval` multiple with no datum there snap
    /// to the nearest datum on the left with `within_bandwidth` false.
    /// Point scales (no banding, zero interval) snap to the closest value.
    #[must_use]
    pub fn invert_with_step(&self, pixel: f64, data: &[f64]) -> Option<SnappedValue> {
        if data.is_empty() {
            return None;
        }
        let inverted = self.invert(pixel);
        let bisect_value = if self.bandwidth == 0.0 {
            inverted + self.min_interval / 2.0
        } else {
            inverted
        };
        let left_index = data.partition_point(|v| *v < bisect_value);

        if left_index == 0 {
            if inverted < data[0] {
                let steps = ((data[0] - inverted) / self.min_interval).ceil();
                return Some(SnappedValue {
                    value: data[0] - self.min_interval * steps,
                    within_bandwidth: false,
                });
            }
            return Some(SnappedValue {
                value: data[0],
                within_bandwidth: true,
            });
        }

        let current = data[left_index - 1];
        if self.min_interval == 0.0 {
            let value = match data.get(left_index) {
                Some(&next) if (next - inverted).abs() <= (inverted - current).abs() => next,
                _ => current,
            };
            return Some(SnappedValue {
                value,
                within_bandwidth: true,
            });
        }
        if inverted - current <= self.min_interval {
            return Some(SnappedValue {
                value: current,
                within_bandwidth: true,
            });
        }
        let steps = ((inverted - current) / self.min_interval).floor();
        Some(SnappedValue {
            value: current + self.min_interval * steps,
            within_bandwidth: false,
        })
    }

    #[must_use]
    pub fn is_single_value(&self) -> bool {
        self.is_single_value_histogram || self.domain[0] == self.domain[1]
    }

    #[must_use]
    pub fn is_value_in_domain(&self, value: f64) -> bool {
        let lo = self.domain[0].min(self.domain[1]);
        let hi = self.domain[0].max(self.domain[1]);
        (lo..=hi).contains(&value)
    }

    /// Tick values for this scale.
    ///
    /// Banded scales with a positive minimum interval tick every interval
    /// boundary, so ticks land between buckets instead of inside them.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        if self.bandwidth > 0.0 && self.min_interval > 0.0 {
            let span = self.domain[1] - self.domain[0];
            let intervals = (span / self.min_interval).floor() as usize;
            return (0..=intervals)
                .map(|i| self.domain[0] + i as f64 * self.min_interval)
                .collect();
        }
        match self.scale_type {
            ScaleType::Log => log_ticks(self.domain, self.tick_count),
            ScaleType::Time => time_ticks(
                self.domain[0],
                self.domain[1],
                self.tick_count,
                self.timezone,
            ),
            _ => linear_ticks(self.domain[0], self.domain[1], self.tick_count),
        }
    }
}
