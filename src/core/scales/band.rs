//! Ordinal band scale: one fixed-width band per category.

use serde::{Deserialize, Serialize};

use crate::core::types::CategoryValue;

/// Band scale over an ordered category list.
///
/// The range is divided into one step per category; `bars_padding` shrinks
/// the drawable bandwidth inside each step, with half a padding unit on each
/// outer edge. An explicit bandwidth override (used for bar clustering)
/// replaces the derived bandwidth while keeping step and positions intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<CategoryValue>,
    range: [f64; 2],
    bandwidth: f64,
    step: f64,
    bars_padding: f64,
}

impl BandScale {
    #[must_use]
    pub fn new(
        domain: Vec<CategoryValue>,
        range: [f64; 2],
        override_bandwidth: Option<f64>,
        bars_padding: f64,
    ) -> Self {
        let padding = bars_padding.clamp(0.0, 1.0);
        let n = domain.len().max(1) as f64;
        let span = range[1] - range[0];
        let step = span / n;
        let bandwidth = match override_bandwidth {
            Some(bw) => bw * (1.0 - padding),
            None => step.abs() * (1.0 - padding),
        };
        Self {
            domain,
            range,
            bandwidth,
            step,
            bars_padding: padding,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[CategoryValue] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Drawable bandwidth, after padding and any cluster override.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bars_padding(&self) -> f64 {
        self.bars_padding
    }

    /// Pixel position of the band start for `value`, or `None` when the
    /// value is not part of the domain.
    #[must_use]
    pub fn scale(&self, value: &CategoryValue) -> Option<f64> {
        let index = self.domain.iter().position(|v| v == value)?;
        let padding_offset = self.step * self.bars_padding / 2.0;
        Some(self.range[0] + padding_offset + self.step * index as f64)
    }

    /// Category whose step contains the pixel, snapping range-edge pixels to
    /// the first/last category.
    #[must_use]
    pub fn invert_with_step(&self, pixel: f64) -> Option<&CategoryValue> {
        if self.domain.is_empty() || self.step == 0.0 {
            return None;
        }
        let index = ((pixel - self.range[0]) / self.step).floor() as isize;
        let index = index.clamp(0, self.domain.len() as isize - 1) as usize;
        self.domain.get(index)
    }

    #[must_use]
    pub fn is_value_in_domain(&self, value: &CategoryValue) -> bool {
        self.domain.contains(value)
    }

    #[must_use]
    pub fn is_single_value(&self) -> bool {
        self.domain.len() <= 1
    }

    /// One tick per category.
    #[must_use]
    pub fn ticks(&self) -> Vec<CategoryValue> {
        self.domain.clone()
    }
}
