//! Raw and formatted series data.
//!
//! Raw per-series datasets feed the domain mergers; the formatted form
//! (stacked cumulative `y0`/`y1`, optionally percent-normalized) feeds the
//! geometry coordinator.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::spec::{SeriesKind, SeriesSpec};
use crate::core::types::{CategoryValue, GroupId, SpecId};

/// One observed datum of a raw dataset.
///
/// `y` is `None` for missing values; they contribute nothing to stacks and
/// produce no geometry. `y0` is an optional explicit baseline for banded
/// (high/low style) non-stacked series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDatum {
    pub x: CategoryValue,
    pub y: Option<f64>,
    pub y0: Option<f64>,
}

impl RawDatum {
    #[must_use]
    pub fn new(x: impl Into<CategoryValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y: Some(y),
            y0: None,
        }
    }
}

/// Raw dataset for one series, keyed back to its spec by `series_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub series_id: SpecId,
    pub data: Vec<RawDatum>,
}

impl SeriesData {
    #[must_use]
    pub fn new(series_id: impl Into<SpecId>, data: Vec<RawDatum>) -> Self {
        Self {
            series_id: series_id.into(),
            data,
        }
    }

    #[must_use]
    pub fn from_points(series_id: impl Into<SpecId>, points: &[(f64, f64)]) -> Self {
        Self::new(
            series_id,
            points.iter().map(|&(x, y)| RawDatum::new(x, y)).collect(),
        )
    }
}

/// One datum after stacking/formatting, ready for geometry emission.
///
/// `y0`/`y1` are the plotted band bounds; `initial_y1` keeps the raw value
/// before stacking or percent normalization for hit-testing and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedDatum {
    pub x: CategoryValue,
    pub y0: f64,
    pub y1: f64,
    pub initial_y0: Option<f64>,
    pub initial_y1: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSeries {
    pub series_id: SpecId,
    pub data: Vec<FormattedDatum>,
}

/// Per-kind series counts within one formatted group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GroupSeriesCounts {
    pub bar_series: usize,
    pub line_series: usize,
    pub area_series: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedGroup {
    pub group_id: GroupId,
    pub series: Vec<FormattedSeries>,
    pub counts: GroupSeriesCounts,
}

/// Formatted data partitioned the way the geometry coordinator walks it:
/// stacked groups first, then non-stacked groups, both in group order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormattedDataSeries {
    pub stacked: Vec<FormattedGroup>,
    pub non_stacked: Vec<FormattedGroup>,
}

fn count_series_kinds(specs: &[&SeriesSpec]) -> GroupSeriesCounts {
    let mut counts = GroupSeriesCounts::default();
    for spec in specs {
        match spec.kind {
            SeriesKind::Bar => counts.bar_series += 1,
            SeriesKind::Line => counts.line_series += 1,
            SeriesKind::Area => counts.area_series += 1,
        }
    }
    counts
}

/// Formats raw datasets for geometry emission.
///
/// Non-stacked series pass through with `y0` defaulting to the zero
/// baseline. Stacked series are accumulated per X in series order; in
/// percent mode every contribution is divided by the stack total at that X.
#[must_use]
pub fn format_data_series(
    specs: &[SeriesSpec],
    data: &IndexMap<SpecId, SeriesData>,
) -> FormattedDataSeries {
    let mut formatted = FormattedDataSeries::default();
    let mut group_order: Vec<GroupId> = Vec::new();
    for spec in specs {
        if !group_order.contains(&spec.group_id) {
            group_order.push(spec.group_id.clone());
        }
    }

    for group_id in group_order {
        let group_specs: Vec<&SeriesSpec> =
            specs.iter().filter(|s| s.group_id == group_id).collect();
        let stacked: Vec<&SeriesSpec> = group_specs
            .iter()
            .copied()
            .filter(|s| s.is_stacked())
            .collect();
        let non_stacked: Vec<&SeriesSpec> = group_specs
            .iter()
            .copied()
            .filter(|s| !s.is_stacked())
            .collect();

        if !stacked.is_empty() {
            let as_percentage = stacked.iter().any(|s| s.stack_as_percentage);
            formatted.stacked.push(FormattedGroup {
                group_id: group_id.clone(),
                counts: count_series_kinds(&stacked),
                series: format_stacked_series(&stacked, data, as_percentage),
            });
        }
        if !non_stacked.is_empty() {
            formatted.non_stacked.push(FormattedGroup {
                group_id: group_id.clone(),
                counts: count_series_kinds(&non_stacked),
                series: format_non_stacked_series(&non_stacked, data),
            });
        }
    }

    formatted
}

fn format_non_stacked_series(
    specs: &[&SeriesSpec],
    data: &IndexMap<SpecId, SeriesData>,
) -> Vec<FormattedSeries> {
    specs
        .iter()
        .filter_map(|spec| data.get(&spec.id))
        .map(|series| FormattedSeries {
            series_id: series.series_id.clone(),
            data: series
                .data
                .iter()
                .map(|datum| FormattedDatum {
                    x: datum.x.clone(),
                    y0: datum.y0.unwrap_or(0.0),
                    y1: datum.y.unwrap_or(0.0),
                    initial_y0: datum.y0,
                    initial_y1: datum.y,
                })
                .collect(),
        })
        .collect()
}

fn format_stacked_series(
    specs: &[&SeriesSpec],
    data: &IndexMap<SpecId, SeriesData>,
    as_percentage: bool,
) -> Vec<FormattedSeries> {
    let datasets: Vec<&SeriesData> = specs
        .iter()
        .filter_map(|spec| data.get(&spec.id))
        .collect();

    // Stack totals per X, used only in percent mode.
    let mut totals: BTreeMap<CategoryValue, f64> = BTreeMap::new();
    if as_percentage {
        for series in &datasets {
            for datum in &series.data {
                *totals.entry(datum.x.clone()).or_insert(0.0) += datum.y.unwrap_or(0.0);
            }
        }
    }

    // Running cumulative sum per X as series stack in declaration order.
    let mut cumulative: BTreeMap<CategoryValue, f64> = BTreeMap::new();
    datasets
        .iter()
        .map(|series| {
            let data = series
                .data
                .iter()
                .map(|datum| {
                    let raw = datum.y.unwrap_or(0.0);
                    let contribution = if as_percentage {
                        let total = totals.get(&datum.x).copied().unwrap_or(0.0);
                        if total == 0.0 { 0.0 } else { raw / total }
                    } else {
                        raw
                    };
                    let base = cumulative.entry(datum.x.clone()).or_insert(0.0);
                    let y0 = *base;
                    let y1 = y0 + contribution;
                    *base = y1;
                    FormattedDatum {
                        x: datum.x.clone(),
                        y0,
                        y1,
                        initial_y0: datum.y0,
                        initial_y1: datum.y,
                    }
                })
                .collect();
            FormattedSeries {
                series_id: series.series_id.clone(),
                data,
            }
        })
        .collect()
}

/// Collects the distinct X values observed across all datasets, in
/// first-seen order.
#[must_use]
pub fn collect_x_values(data: &IndexMap<SpecId, SeriesData>) -> Vec<CategoryValue> {
    let mut seen: IndexSet<CategoryValue> = IndexSet::new();
    for series in data.values() {
        for datum in &series.data {
            seen.insert(datum.x.clone());
        }
    }
    seen.into_iter().collect()
}

/// Gathers per-X stacks of Y values for the stacked-domain computation.
///
/// Each entry holds the individual contributions at that X; callers add the
/// running sum whenever more than one series contributes.
#[must_use]
pub fn collect_stacks(datasets: &[&SeriesData]) -> BTreeMap<CategoryValue, SmallVec<[f64; 4]>> {
    let mut stacks: BTreeMap<CategoryValue, SmallVec<[f64; 4]>> = BTreeMap::new();
    for series in datasets {
        for datum in &series.data {
            if let Some(y) = datum.y {
                stacks.entry(datum.x.clone()).or_default().push(y);
            }
        }
    }
    stacks
}
