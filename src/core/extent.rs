//! Pure numeric helpers computing continuous and ordinal extents from
//! observed data values.

use crate::core::types::CategoryValue;
use crate::error::{ChartError, ChartResult};

/// How a computed continuous extent relates to the zero baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentPolicy {
    /// Extend the extent to include zero.
    ZeroAnchored,
    /// Keep the raw data extent.
    Fit,
}

/// Computes the `[min, max]` extent of an iterator of values.
///
/// Returns `[0, 0]` for an empty iterator. With `ZeroAnchored` the extent is
/// widened to include the zero baseline; with `Fit` the raw extent is kept.
#[must_use]
pub fn compute_continuous_extent(
    values: impl IntoIterator<Item = f64>,
    policy: ExtentPolicy,
) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        if !value.is_finite() {
            continue;
        }
        min = min.min(value);
        max = max.max(value);
    }

    if min > max {
        return [0.0, 0.0];
    }

    match policy {
        ExtentPolicy::Fit => [min, max],
        ExtentPolicy::ZeroAnchored => [min.min(0.0), max.max(0.0)],
    }
}

/// Builds a sorted, de-duplicated ordinal domain from observed values.
///
/// Ordering is lexicographic on the stringified form of each value.
#[must_use]
pub fn compute_ordinal_domain(values: impl IntoIterator<Item = CategoryValue>) -> Vec<CategoryValue> {
    let mut domain: Vec<CategoryValue> = values.into_iter().collect();
    domain.sort();
    domain.dedup();
    domain
}

/// Merges a partial custom range into a computed extent, bound by bound.
///
/// A fully bounded override replaces the extent outright but must satisfy
/// `min <= max`. A lower-only override must not exceed the computed max and
/// an upper-only override must not fall below the computed min. `axis` labels
/// the error with the offending axis/group.
pub fn merge_bounds(
    computed: [f64; 2],
    min: Option<f64>,
    max: Option<f64>,
    axis: &str,
) -> ChartResult<[f64; 2]> {
    match (min, max) {
        (Some(lo), Some(hi)) => {
            if lo > hi {
                return Err(ChartError::InvalidDomainBounds {
                    axis: axis.to_owned(),
                    reason: "min is greater than max".to_owned(),
                });
            }
            Ok([lo, hi])
        }
        (Some(lo), None) => {
            if lo > computed[1] {
                return Err(ChartError::InvalidDomainBounds {
                    axis: axis.to_owned(),
                    reason: "custom min is greater than computed max".to_owned(),
                });
            }
            Ok([lo, computed[1]])
        }
        (None, Some(hi)) => {
            if computed[0] > hi {
                return Err(ChartError::InvalidDomainBounds {
                    axis: axis.to_owned(),
                    reason: "computed min is greater than custom max".to_owned(),
                });
            }
            Ok([computed[0], hi])
        }
        (None, None) => Ok(computed),
    }
}
