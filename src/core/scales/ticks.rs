//! Tick value generation for continuous scales.

use chrono::{Offset, TimeZone as _};

use crate::core::types::TimeZone;

/// Smallest absolute bound a log-scale domain is limited to.
pub const LOG_MIN_ABS_DOMAIN: f64 = 1.0;

/// Nice linear ticks on a 1-2-5 ladder covering `[min, max]`.
///
/// A degenerate zero-span domain yields the single value. An inverted domain
/// yields the same ticks in descending order.
#[must_use]
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let reversed = min > max;
    let (lo, hi) = if reversed { (max, min) } else { (min, max) };

    let step = tick_increment(lo, hi, count.max(1));
    if step <= 0.0 || !step.is_finite() {
        return vec![lo, hi];
    }

    let start = (lo / step).ceil();
    let stop = (hi / step).floor();
    if stop < start {
        return Vec::new();
    }
    let n = (stop - start) as i64;
    let mut ticks: Vec<f64> = (0..=n).map(|i| (start + i as f64) * step).collect();
    if reversed {
        ticks.reverse();
    }
    ticks
}

/// 1-2-5 step selection matching the usual "nice ticks" ladder.
fn tick_increment(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Limits a log-scale domain away from zero and from sign crossings.
///
/// A bound at zero is pushed to `±LOG_MIN_ABS_DOMAIN`; a sign-crossing domain
/// keeps the side with the larger magnitude. The mapping stays finite for any
/// input, which is all the scale guarantees — log scales remain a
/// positive-domain caller contract.
#[must_use]
pub fn limit_log_domain([d0, d1]: [f64; 2]) -> [f64; 2] {
    if d0 == 0.0 {
        if d1 > 0.0 {
            return [LOG_MIN_ABS_DOMAIN, d1];
        }
        if d1 < 0.0 {
            return [-LOG_MIN_ABS_DOMAIN, d1];
        }
        return [LOG_MIN_ABS_DOMAIN, LOG_MIN_ABS_DOMAIN];
    }
    if d1 == 0.0 {
        if d0 > 0.0 {
            return [d0, LOG_MIN_ABS_DOMAIN];
        }
        return [d0, -LOG_MIN_ABS_DOMAIN];
    }
    if d0 < 0.0 && d1 > 0.0 {
        if d1.abs() >= d0.abs() {
            return [LOG_MIN_ABS_DOMAIN, d1];
        }
        return [d0, -LOG_MIN_ABS_DOMAIN];
    }
    if d0 > 0.0 && d1 < 0.0 {
        if d0.abs() >= d1.abs() {
            return [d0, LOG_MIN_ABS_DOMAIN];
        }
        return [-LOG_MIN_ABS_DOMAIN, d1];
    }
    [d0, d1]
}

/// Decade-based ticks for a log scale.
///
/// The domain is limited first, so zero/crossing bounds never reach the log.
/// When the decade count exceeds the requested count, decades are thinned to
/// every k-th power.
#[must_use]
pub fn log_ticks(domain: [f64; 2], count: usize) -> Vec<f64> {
    let [d0, d1] = limit_log_domain(domain);
    let negative = d0 < 0.0 && d1 < 0.0;
    let (lo, hi) = if negative {
        (d1.abs().min(d0.abs()), d1.abs().max(d0.abs()))
    } else {
        (d0.min(d1), d0.max(d1))
    };
    if lo <= 0.0 || hi <= 0.0 {
        return Vec::new();
    }

    let first = lo.log10().ceil() as i32;
    let last = hi.log10().floor() as i32;
    if first > last {
        return vec![lo, hi];
    }
    let decades = (last - first + 1) as usize;
    let stride = decades.div_ceil(count.max(1)).max(1) as i32;

    let mut ticks: Vec<f64> = (first..=last)
        .step_by(stride as usize)
        .map(|p| 10f64.powi(p))
        .collect();
    if negative {
        ticks = ticks.into_iter().map(|t| -t).collect();
        ticks.reverse();
    }
    if d0 > d1 {
        ticks.reverse();
    }
    ticks
}

/// Candidate tick intervals in milliseconds, seconds through years.
const TIME_STEPS_MS: &[f64] = &[
    1_000.0,
    5_000.0,
    15_000.0,
    30_000.0,
    60_000.0,
    300_000.0,
    900_000.0,
    1_800_000.0,
    3_600_000.0,
    10_800_000.0,
    21_600_000.0,
    43_200_000.0,
    86_400_000.0,
    172_800_000.0,
    604_800_000.0,
    2_592_000_000.0,
    7_776_000_000.0,
    31_536_000_000.0,
];

/// Ticks for a time scale over millisecond timestamps.
///
/// Picks the smallest step of the interval ladder that yields at most `count`
/// ticks and aligns tick boundaries to the scale's zone, so day and hour
/// ticks land on local midnights/hours rather than UTC ones. The zone offset
/// is sampled once at the domain start; offset transitions inside the domain
/// keep the step but not the local alignment.
#[must_use]
pub fn time_ticks(min_ms: f64, max_ms: f64, count: usize, timezone: TimeZone) -> Vec<f64> {
    if !min_ms.is_finite() || !max_ms.is_finite() {
        return Vec::new();
    }
    if min_ms == max_ms {
        return vec![min_ms];
    }
    let (lo, hi) = if min_ms < max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    let span = hi - lo;
    let target = span / count.max(1) as f64;
    let step = TIME_STEPS_MS
        .iter()
        .copied()
        .find(|s| *s >= target)
        .unwrap_or_else(|| {
            // Beyond the ladder: whole multiples of a year.
            let year = TIME_STEPS_MS[TIME_STEPS_MS.len() - 1];
            (target / year).ceil() * year
        });

    let offset = zone_offset_millis(timezone, lo);
    let first = ((lo + offset) / step).ceil() * step - offset;
    let mut ticks = Vec::new();
    let mut tick = first;
    while tick <= hi {
        ticks.push(tick);
        tick += step;
    }
    if min_ms > max_ms {
        ticks.reverse();
    }
    ticks
}

/// UTC offset of the zone in milliseconds, sampled at `at_ms`.
fn zone_offset_millis(timezone: TimeZone, at_ms: f64) -> f64 {
    match timezone {
        TimeZone::Utc => 0.0,
        TimeZone::FixedMinutes(minutes) => f64::from(minutes) * 60_000.0,
        TimeZone::Local => chrono::Local
            .timestamp_millis_opt(at_ms as i64)
            .single()
            .map(|dt| f64::from(dt.offset().fix().local_minus_utc()) * 1_000.0)
            .unwrap_or(0.0),
    }
}
