use proptest::prelude::*;

use chartgrid::axis::{AxisTick, AxisTicksDimensions, get_visible_ticks};
use chartgrid::core::extent::{ExtentPolicy, compute_continuous_extent};
use chartgrid::core::scales::{ContinuousScale, ContinuousScaleOptions};
use chartgrid::core::spec::{AxisSpec, CustomXDomain, DomainRange, SeriesKind, SeriesSpec};
use chartgrid::core::types::{CategoryValue, Position, ScaleType};
use chartgrid::core::x_domain::{find_min_interval, merge_x_domain};

proptest! {
    #[test]
    fn min_interval_ignores_permutations(mut values in proptest::collection::vec(-1e6..1e6f64, 2..40)) {
        let original = find_min_interval(&values);
        values.reverse();
        prop_assert_eq!(find_min_interval(&values), original);
    }

    #[test]
    fn min_interval_never_exceeds_any_adjacent_gap(values in proptest::collection::vec(-1e6..1e6f64, 2..40)) {
        let interval = find_min_interval(&values);
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        for pair in sorted.windows(2) {
            prop_assert!(interval <= (pair[1] - pair[0]).abs() + 1e-9);
        }
    }

    #[test]
    fn extent_contains_every_value(values in proptest::collection::vec(-1e6..1e6f64, 1..40)) {
        let [min, max] = compute_continuous_extent(values.iter().copied(), ExtentPolicy::Fit);
        for value in &values {
            prop_assert!((min..=max).contains(value));
        }
    }

    #[test]
    fn zero_anchored_extent_contains_the_baseline(values in proptest::collection::vec(-1e6..1e6f64, 1..40)) {
        let [min, max] = compute_continuous_extent(values, ExtentPolicy::ZeroAnchored);
        prop_assert!(min <= 0.0);
        prop_assert!(max >= 0.0);
    }

    #[test]
    fn inverted_custom_bounds_always_error(lo in -1e6..1e6f64, gap in 1e-6..1e6f64) {
        let specs = vec![SeriesSpec::new("a", SeriesKind::Line)];
        let values = [CategoryValue::num(0.0), CategoryValue::num(1.0)];
        let custom = CustomXDomain::Range(DomainRange::bounded(lo + gap, lo));
        prop_assert!(merge_x_domain(&specs, &values, Some(&custom)).is_err());
    }

    #[test]
    fn merged_continuous_domain_covers_the_data(values in proptest::collection::vec(-1e6..1e6f64, 1..40)) {
        let specs = vec![SeriesSpec::new("a", SeriesKind::Line)];
        let categories: Vec<CategoryValue> = values.iter().copied().map(CategoryValue::num).collect();
        let merged = merge_x_domain(&specs, &categories, None).unwrap();
        let [min, max] = merged.continuous_bounds().unwrap();
        for value in &values {
            prop_assert!((min..=max).contains(value));
        }
    }

    #[test]
    fn linear_scale_round_trips(
        lo in -1e4..1e4f64,
        span in 1e-3..1e4f64,
        fraction in 0.0..1.0f64,
    ) {
        let scale = ContinuousScale::new(
            ScaleType::Linear,
            [lo, lo + span],
            [0.0, 500.0],
            ContinuousScaleOptions::default(),
        );
        let value = lo + span * fraction;
        let round_tripped = scale.invert(scale.scale(value));
        prop_assert!((round_tripped - value).abs() <= span * 1e-9 + 1e-9);
    }

    #[test]
    fn scale_maps_the_domain_into_the_range(
        lo in -1e4..1e4f64,
        span in 1e-3..1e4f64,
        fraction in 0.0..1.0f64,
    ) {
        let scale = ContinuousScale::new(
            ScaleType::Linear,
            [lo, lo + span],
            [0.0, 500.0],
            ContinuousScaleOptions::default(),
        );
        let pixel = scale.scale(lo + span * fraction);
        prop_assert!((-1e-6..=500.0 + 1e-6).contains(&pixel));
    }

    #[test]
    fn visible_ticks_never_overlap(
        positions in proptest::collection::vec(0.0..1000.0f64, 1..60),
        label_width in 1.0..60.0f64,
    ) {
        let ticks: Vec<AxisTick> = positions
            .iter()
            .map(|&position| AxisTick {
                value: CategoryValue::num(position),
                label: position.to_string(),
                position,
            })
            .collect();
        let spec = AxisSpec::new("bottom", Position::Bottom);
        let dims = AxisTicksDimensions {
            max_label_bbox_width: label_width,
            ..AxisTicksDimensions::default()
        };
        let visible = get_visible_ticks(&ticks, &spec, &dims);
        prop_assert!(!visible.is_empty());
        for pair in visible.windows(2) {
            prop_assert!(pair[1].position - pair[0].position >= label_width - 1e-9);
        }
    }
}
