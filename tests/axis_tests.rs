use approx::assert_relative_eq;
use indexmap::IndexMap;

use chartgrid::axis::{
    AxisTick, AxisTicksDimensions, compute_all_axes_dimensions, compute_axis_layout,
    compute_axis_ticks_dimensions, compute_rotated_label_size, get_available_ticks,
    get_min_max_range, get_visible_ticks, is_y_domain,
};
use chartgrid::core::scales::compute_x_scale;
use chartgrid::core::spec::{AxisSpec, TickFormat};
use chartgrid::core::types::{
    CategoryValue, Dimensions, Position, Rotation, ScaleType, Size, TimeZone,
};
use chartgrid::core::x_domain::{Domain, XDomain, XScaleDescriptor};
use chartgrid::core::y_domain::YDomain;
use chartgrid::error::ChartError;
use chartgrid::measure::FixedGlyphMeasurer;
use chartgrid::theme::ChartTheme;

fn band_x_domain(min: f64, max: f64, min_interval: f64) -> XDomain {
    XDomain {
        descriptor: XScaleDescriptor {
            scale_type: ScaleType::Linear,
            is_band_scale: true,
            timezone: TimeZone::Utc,
        },
        domain: Domain::Continuous { min, max },
        min_interval,
    }
}

fn y_domain(group_id: &str, min: f64, max: f64) -> YDomain {
    YDomain {
        group_id: group_id.to_owned(),
        scale_type: ScaleType::Linear,
        min,
        max,
    }
}

fn chart_dimensions(width: f64, height: f64) -> Dimensions {
    Dimensions {
        top: 0.0,
        left: 0.0,
        width,
        height,
    }
}

#[test]
fn y_domain_axes_follow_the_chart_rotation() {
    assert!(is_y_domain(Position::Left, Rotation::Deg0));
    assert!(is_y_domain(Position::Right, Rotation::Deg180));
    assert!(!is_y_domain(Position::Bottom, Rotation::Deg0));
    // A ±90 rotation swaps the domains between axis orientations.
    assert!(is_y_domain(Position::Bottom, Rotation::Deg90));
    assert!(!is_y_domain(Position::Left, Rotation::DegNeg90));
}

#[test]
fn axis_ranges_follow_position_and_rotation() {
    let dims = chart_dimensions(100.0, 80.0);
    assert_eq!(get_min_max_range(Position::Bottom, Rotation::Deg0, dims), [0.0, 100.0]);
    assert_eq!(get_min_max_range(Position::Bottom, Rotation::Deg180, dims), [100.0, 0.0]);
    assert_eq!(get_min_max_range(Position::Left, Rotation::Deg0, dims), [80.0, 0.0]);
    assert_eq!(get_min_max_range(Position::Left, Rotation::Deg90, dims), [0.0, 80.0]);
}

#[test]
fn rotated_label_size_swaps_axes_at_ninety_degrees() {
    let rotated = compute_rotated_label_size(Size::new(40.0, 10.0), 90.0);
    assert_relative_eq!(rotated.width, 10.0, epsilon = 1e-9);
    assert_relative_eq!(rotated.height, 40.0, epsilon = 1e-9);
    let unrotated = compute_rotated_label_size(Size::new(40.0, 10.0), 0.0);
    assert_relative_eq!(unrotated.width, 40.0);
    assert_relative_eq!(unrotated.height, 10.0);
}

#[test]
fn histogram_mode_appends_a_trailing_boundary_tick() {
    let x_domain = band_x_domain(0.0, 100.0, 10.0);
    let scale = compute_x_scale(&x_domain, 1, [0.0, 110.0], 0.0, true);
    let spec = AxisSpec::new("bottom", Position::Bottom);
    let ticks = get_available_ticks(&spec, &scale, 1, true, TimeZone::Utc);

    assert_eq!(ticks.len(), 12);
    assert_eq!(ticks[0].label, "0");
    assert_eq!(ticks[11].label, "110");
    assert_relative_eq!(ticks[0].position, 0.0);
    assert_relative_eq!(ticks[11].position, 110.0);
}

#[test]
fn non_histogram_band_ticks_sit_at_the_band_center() {
    let x_domain = band_x_domain(0.0, 100.0, 10.0);
    let scale = compute_x_scale(&x_domain, 1, [0.0, 110.0], 0.0, false);
    let spec = AxisSpec::new("bottom", Position::Bottom);
    let ticks = get_available_ticks(&spec, &scale, 1, false, TimeZone::Utc);

    assert_eq!(ticks.len(), 11);
    // Half the 10px bandwidth shifts each tick into its band.
    assert_relative_eq!(ticks[0].position, 5.0);
    assert_relative_eq!(ticks[10].position, 105.0);
}

#[test]
fn single_value_histogram_gets_exactly_two_boundary_ticks() {
    let x_domain = band_x_domain(10.0, 10.0, 1.0);
    let scale = compute_x_scale(&x_domain, 1, [0.0, 100.0], 0.0, true);
    let spec = AxisSpec::new("bottom", Position::Bottom);
    let ticks = get_available_ticks(&spec, &scale, 1, true, TimeZone::Utc);

    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].label, "10");
    assert_relative_eq!(ticks[0].position, 0.0);
    assert_eq!(ticks[1].label, "11");
    assert_relative_eq!(ticks[1].position, 100.0);
}

#[test]
fn duplicate_labels_are_collapsed_unless_opted_out() {
    let x_domain = XDomain {
        descriptor: XScaleDescriptor {
            scale_type: ScaleType::Linear,
            is_band_scale: false,
            timezone: TimeZone::Utc,
        },
        domain: Domain::Continuous { min: 0.0, max: 2.0 },
        min_interval: 0.0,
    };
    let scale = compute_x_scale(&x_domain, 1, [0.0, 100.0], 0.0, false);
    let mut spec = AxisSpec::new("bottom", Position::Bottom);
    spec.tick_format = TickFormat::Fixed(0);

    let deduped = get_available_ticks(&spec, &scale, 1, false, TimeZone::Utc);
    let labels: Vec<&str> = deduped.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["0", "1", "2"]);

    spec.show_duplicated_ticks = true;
    let all = get_available_ticks(&spec, &scale, 1, false, TimeZone::Utc);
    assert!(all.len() > deduped.len());
}

fn tick_at(value: f64, position: f64) -> AxisTick {
    AxisTick {
        value: CategoryValue::num(value),
        label: value.to_string(),
        position,
    }
}

#[test]
fn overlapping_ticks_are_dropped_by_default() {
    let ticks: Vec<AxisTick> = (0..5).map(|i| tick_at(i as f64, i as f64 * 10.0)).collect();
    let spec = AxisSpec::new("bottom", Position::Bottom);
    let dims = AxisTicksDimensions {
        max_label_bbox_width: 20.0,
        max_label_bbox_height: 12.0,
        max_label_text_width: 20.0,
        max_label_text_height: 12.0,
    };
    let visible = get_visible_ticks(&ticks, &spec, &dims);
    let positions: Vec<f64> = visible.iter().map(|t| t.position).collect();
    assert_eq!(positions, [0.0, 20.0, 40.0]);
}

#[test]
fn no_two_visible_ticks_overlap() {
    let ticks: Vec<AxisTick> = (0..50).map(|i| tick_at(i as f64, i as f64 * 7.0)).collect();
    let spec = AxisSpec::new("bottom", Position::Bottom);
    let dims = AxisTicksDimensions {
        max_label_bbox_width: 24.0,
        ..AxisTicksDimensions::default()
    };
    let visible = get_visible_ticks(&ticks, &spec, &dims);
    for pair in visible.windows(2) {
        assert!(pair[1].position - pair[0].position >= dims.max_label_bbox_width);
    }
}

#[test]
fn overlapping_ticks_can_be_kept_with_blank_labels() {
    let ticks: Vec<AxisTick> = (0..3).map(|i| tick_at(i as f64, i as f64 * 10.0)).collect();
    let mut spec = AxisSpec::new("bottom", Position::Bottom);
    spec.show_overlapping_ticks = true;
    let dims = AxisTicksDimensions {
        max_label_bbox_width: 20.0,
        ..AxisTicksDimensions::default()
    };
    let visible = get_visible_ticks(&ticks, &spec, &dims);
    assert_eq!(visible.len(), 3);
    assert_eq!(visible[0].label, "0");
    assert_eq!(visible[1].label, "");
    assert_eq!(visible[2].label, "2");
}

#[test]
fn overlapping_labels_can_be_kept_verbatim() {
    let ticks: Vec<AxisTick> = (0..3).map(|i| tick_at(i as f64, i as f64 * 10.0)).collect();
    let mut spec = AxisSpec::new("bottom", Position::Bottom);
    spec.show_overlapping_labels = true;
    let dims = AxisTicksDimensions {
        max_label_bbox_width: 20.0,
        ..AxisTicksDimensions::default()
    };
    let visible = get_visible_ticks(&ticks, &spec, &dims);
    assert_eq!(visible.len(), 3);
    assert_eq!(visible[1].label, "1");
}

#[test]
fn vertical_axes_resolve_overlap_on_label_height() {
    let ticks: Vec<AxisTick> = (0..4).map(|i| tick_at(i as f64, i as f64 * 10.0)).collect();
    let spec = AxisSpec::new("left", Position::Left);
    let dims = AxisTicksDimensions {
        max_label_bbox_width: 100.0,
        max_label_bbox_height: 12.0,
        ..AxisTicksDimensions::default()
    };
    let visible = get_visible_ticks(&ticks, &spec, &dims);
    // 12px tall labels on a 10px pitch keep every other tick.
    assert_eq!(visible.len(), 2);
}

#[test]
fn tick_label_maxima_drive_the_axis_dimensions() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let spec = AxisSpec::new("left", Position::Left);
    let measurer = FixedGlyphMeasurer::default();
    let theme = ChartTheme::default();

    let dims = compute_axis_ticks_dimensions(
        &spec,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    )
    .expect("dimensions");

    // Widest label is "10": 2 glyphs at 6px plus 1px padding per side.
    assert_relative_eq!(dims.max_label_bbox_width, 14.0);
    assert_relative_eq!(dims.max_label_bbox_height, 12.0);
}

#[test]
fn hidden_axes_without_gridlines_are_not_measured() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let mut spec = AxisSpec::new("left", Position::Left);
    spec.hide = true;
    let measurer = FixedGlyphMeasurer::default();
    let theme = ChartTheme::default();

    let dims = compute_axis_ticks_dimensions(
        &spec,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    );
    assert!(dims.is_none());

    spec.show_grid_lines = true;
    let dims = compute_axis_ticks_dimensions(
        &spec,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    );
    assert!(dims.is_some());
}

#[test]
fn axes_with_unknown_groups_are_skipped_during_measurement() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let specs = vec![
        AxisSpec::new("left", Position::Left),
        AxisSpec::new("orphan", Position::Right).with_group("missing"),
    ];
    let measurer = FixedGlyphMeasurer::default();
    let theme = ChartTheme::default();

    let dims = compute_all_axes_dimensions(
        &specs,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    );
    assert_eq!(dims.len(), 1);
    assert!(dims.contains_key("left"));
}

#[test]
fn layout_places_axes_around_the_plot_area() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let specs = vec![
        AxisSpec::new("left", Position::Left),
        AxisSpec::new("bottom", Position::Bottom),
    ];
    let measurer = FixedGlyphMeasurer::default();
    let theme = ChartTheme::default();
    let dims = chart_dimensions(100.0, 100.0);

    let axis_dimensions = compute_all_axes_dimensions(
        &specs,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    );
    let layout = compute_axis_layout(
        dims,
        &theme,
        Rotation::Deg0,
        &specs,
        &axis_dimensions,
        &x_domain,
        &y_domains,
        1,
        false,
    )
    .expect("layout");

    let left = layout.axis_positions.get("left").expect("left box");
    // 2px label padding + 14px widest label + 20px tick chrome.
    assert_relative_eq!(left.width, 36.0);
    assert_relative_eq!(left.left, 0.0);

    let bottom = layout.axis_positions.get("bottom").expect("bottom box");
    assert_relative_eq!(bottom.height, 34.0);
    assert_relative_eq!(bottom.top, 100.0);

    assert!(layout.axis_ticks.contains_key("left"));
    assert!(layout.axis_visible_ticks.contains_key("bottom"));
    assert!(layout.axis_grid_lines.is_empty());
}

#[test]
fn stacked_axes_on_one_side_accumulate_offsets() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let specs = vec![
        AxisSpec::new("left-a", Position::Left),
        AxisSpec::new("left-b", Position::Left),
    ];
    let measurer = FixedGlyphMeasurer::default();
    let theme = ChartTheme::default();
    let dims = chart_dimensions(100.0, 100.0);

    let axis_dimensions = compute_all_axes_dimensions(
        &specs,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    );
    let layout = compute_axis_layout(
        dims,
        &theme,
        Rotation::Deg0,
        &specs,
        &axis_dimensions,
        &x_domain,
        &y_domains,
        1,
        false,
    )
    .expect("layout");

    let first = layout.axis_positions.get("left-a").expect("first box");
    let second = layout.axis_positions.get("left-b").expect("second box");
    assert_relative_eq!(first.left, 0.0);
    assert_relative_eq!(second.left, first.width);
}

#[test]
fn titled_axes_reserve_space_for_the_title() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let specs = vec![AxisSpec::new("left", Position::Left).with_title("count")];
    let measurer = FixedGlyphMeasurer::default();
    let theme = ChartTheme::default();
    let dims = chart_dimensions(100.0, 100.0);

    let axis_dimensions = compute_all_axes_dimensions(
        &specs,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    );
    let layout = compute_axis_layout(
        dims,
        &theme,
        Rotation::Deg0,
        &specs,
        &axis_dimensions,
        &x_domain,
        &y_domains,
        1,
        false,
    )
    .expect("layout");

    let left = layout.axis_positions.get("left").expect("left box");
    // Base 36px plus 5px title padding and 12px title font.
    assert_relative_eq!(left.width, 53.0);
}

#[test]
fn gridlines_span_the_plot_area_for_visible_ticks() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let mut spec = AxisSpec::new("left", Position::Left);
    spec.show_grid_lines = true;
    let specs = vec![spec];
    let measurer = FixedGlyphMeasurer::default();
    let theme = ChartTheme::default();
    let dims = chart_dimensions(100.0, 100.0);

    let axis_dimensions = compute_all_axes_dimensions(
        &specs,
        &x_domain,
        &y_domains,
        1,
        &measurer,
        Rotation::Deg0,
        &theme.axis,
        theme.bars_padding,
        false,
    );
    let layout = compute_axis_layout(
        dims,
        &theme,
        Rotation::Deg0,
        &specs,
        &axis_dimensions,
        &x_domain,
        &y_domains,
        1,
        false,
    )
    .expect("layout");

    let grid_lines = layout.axis_grid_lines.get("left").expect("grid lines");
    let visible = layout.axis_visible_ticks.get("left").expect("ticks");
    assert_eq!(grid_lines.len(), visible.len());
    for (line, tick) in grid_lines.iter().zip(visible) {
        assert_relative_eq!(line.x0, 0.0);
        assert_relative_eq!(line.x1, 100.0);
        assert_relative_eq!(line.y0, tick.position);
        assert_relative_eq!(line.y1, tick.position);
    }
}

#[test]
fn layout_fails_on_an_unresolvable_axis() {
    let x_domain = band_x_domain(0.0, 10.0, 1.0);
    let y_domains = vec![y_domain("__global__", 0.0, 10.0)];
    let specs = vec![AxisSpec::new("orphan", Position::Left).with_group("missing")];
    let theme = ChartTheme::default();
    let dims = chart_dimensions(100.0, 100.0);

    // Dimensions measured before the group's series were removed.
    let mut axis_dimensions = IndexMap::new();
    axis_dimensions.insert("orphan".to_owned(), AxisTicksDimensions::default());

    let err = compute_axis_layout(
        dims,
        &theme,
        Rotation::Deg0,
        &specs,
        &axis_dimensions,
        &x_domain,
        &y_domains,
        1,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, ChartError::UnresolvableAxis { axis_id } if axis_id == "orphan"));
}
