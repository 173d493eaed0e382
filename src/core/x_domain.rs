//! X-domain merger: unifies the X scale type, range and minimum interval
//! across all series specs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::extent::{ExtentPolicy, compute_continuous_extent, compute_ordinal_domain, merge_bounds};
use crate::core::spec::{CustomXDomain, SeriesKind, SeriesSpec};
use crate::core::types::{CategoryValue, ScaleType, TimeZone};
use crate::error::{ChartError, ChartResult};

/// The authoritative X scale descriptor resolved from all series specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XScaleDescriptor {
    pub scale_type: ScaleType,
    /// True when any series is a bar series: the scale reserves one
    /// bandwidth unit of the range per category/bucket.
    pub is_band_scale: bool,
    pub timezone: TimeZone,
}

/// Tagged X domain: either an ordered category list or a continuous extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Domain {
    Ordinal(Vec<CategoryValue>),
    Continuous { min: f64, max: f64 },
}

/// The merged X domain shared by every series of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XDomain {
    pub descriptor: XScaleDescriptor,
    pub domain: Domain,
    /// Smallest absolute gap between two consecutive sorted X values.
    /// 0 for empty inputs, 1 for a single point.
    pub min_interval: f64,
}

impl XDomain {
    #[must_use]
    pub fn continuous_bounds(&self) -> Option<[f64; 2]> {
        match &self.domain {
            Domain::Continuous { min, max } => Some([*min, *max]),
            Domain::Ordinal(_) => None,
        }
    }
}

/// Resolves one scale descriptor from all series specs.
///
/// Any ordinal series forces an ordinal scale; mixed continuous types
/// coerce to linear; disagreeing time zones coerce to UTC. Any bar series
/// marks the result as a band scale.
pub fn convert_x_scale_types(specs: &[SeriesSpec]) -> ChartResult<XScaleDescriptor> {
    if specs.is_empty() {
        return Err(ChartError::MissingScaleType);
    }

    let is_band_scale = specs.iter().any(|s| s.kind == SeriesKind::Bar);

    if specs.iter().any(|s| s.x_scale_type == ScaleType::Ordinal) {
        return Ok(XScaleDescriptor {
            scale_type: ScaleType::Ordinal,
            is_band_scale,
            timezone: TimeZone::Utc,
        });
    }

    let first = specs[0].x_scale_type;
    let uniform = specs.iter().all(|s| s.x_scale_type == first);
    let scale_type = if uniform { first } else { ScaleType::Linear };

    let timezone = if scale_type == ScaleType::Time {
        let first_zone = specs[0].timezone.unwrap_or_default();
        let same_zone = specs
            .iter()
            .all(|s| s.timezone.unwrap_or_default() == first_zone);
        if same_zone { first_zone } else { TimeZone::Utc }
    } else {
        TimeZone::Utc
    };

    Ok(XScaleDescriptor {
        scale_type,
        is_band_scale,
        timezone,
    })
}

/// Computes the minimum absolute gap between any two values of the set.
///
/// Returns 0 for an empty set and 1 for a single value, the degenerate
/// bucket widths used by the band-scale and histogram logic.
#[must_use]
pub fn find_min_interval(values: &[f64]) -> f64 {
    match values.len() {
        0 => 0.0,
        1 => 1.0,
        _ => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            sorted
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).abs())
                .fold(f64::INFINITY, f64::min)
        }
    }
}

/// Merges the observed X values into one domain under the resolved scale
/// descriptor, applying and validating the optional custom override.
pub fn merge_x_domain(
    specs: &[SeriesSpec],
    x_values: &[CategoryValue],
    custom: Option<&CustomXDomain>,
) -> ChartResult<XDomain> {
    let descriptor = convert_x_scale_types(specs)?;

    if descriptor.scale_type == ScaleType::Ordinal {
        let domain = match custom {
            Some(CustomXDomain::Ordinal(values)) => values.clone(),
            Some(CustomXDomain::Range(_)) => {
                return Err(ChartError::InvalidOrdinalOverride(
                    "xDomain for an ordinal scale must be an array of values, not a domain range"
                        .to_owned(),
                ));
            }
            None => compute_ordinal_domain(x_values.iter().cloned()),
        };
        let numeric = numeric_values(x_values);
        return Ok(XDomain {
            descriptor,
            min_interval: find_min_interval(&numeric),
            domain: Domain::Ordinal(domain),
        });
    }

    let numeric = numeric_values(x_values);
    let computed = compute_continuous_extent(numeric.iter().copied(), ExtentPolicy::Fit);
    let computed_min_interval = find_min_interval(&numeric);

    let (bounds, min_interval) = match custom {
        Some(CustomXDomain::Ordinal(_)) => {
            return Err(ChartError::InvalidOrdinalOverride(
                "xDomain for a continuous scale must be a domain range, not an array of values"
                    .to_owned(),
            ));
        }
        Some(CustomXDomain::Range(range)) => {
            let bounds = merge_bounds(computed, range.min, range.max, "xDomain")?;
            let min_interval = match range.min_interval {
                Some(custom_interval) => {
                    validate_min_interval(custom_interval, computed_min_interval, numeric.len())?
                }
                None => computed_min_interval,
            };
            (bounds, min_interval)
        }
        None => (computed, computed_min_interval),
    };

    Ok(XDomain {
        descriptor,
        domain: Domain::Continuous {
            min: bounds[0],
            max: bounds[1],
        },
        min_interval,
    })
}

fn validate_min_interval(custom: f64, computed: f64, value_count: usize) -> ChartResult<f64> {
    if custom < 0.0 {
        return Err(ChartError::InvalidMinInterval(
            "custom minInterval is less than 0".to_owned(),
        ));
    }
    // A custom interval may only replace the computed one when it does not
    // exceed it, except for single-datum sets where any width is plausible.
    if value_count > 1 && custom > computed {
        return Err(ChartError::InvalidMinInterval(
            "custom minInterval is greater than computed minInterval".to_owned(),
        ));
    }
    Ok(custom)
}

fn numeric_values(x_values: &[CategoryValue]) -> Vec<f64> {
    let mut numeric = Vec::with_capacity(x_values.len());
    for value in x_values {
        match value.as_f64() {
            Some(v) if v.is_finite() => numeric.push(v),
            _ => debug!(value = %value, "skipping non-numeric X value on continuous scale"),
        }
    }
    numeric
}
