use serde::{Deserialize, Serialize};

use crate::core::types::{AxisId, CategoryValue, GroupId, Position, ScaleType, SpecId, TimeZone};

/// The drawable kind of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Bar,
    Line,
    Area,
}

/// Declarative description of one data series.
///
/// Immutable once handed to the domain mergers for a computation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub id: SpecId,
    pub group_id: GroupId,
    pub kind: SeriesKind,
    pub x_scale_type: ScaleType,
    pub y_scale_type: ScaleType,
    /// Time zone declared for a time X scale. Ignored for other scale types.
    pub timezone: Option<TimeZone>,
    /// Accessors used to stack this series with others in the same group.
    /// A non-empty list marks the series as stacked.
    pub stack_accessors: Vec<String>,
    /// Normalize the stack so the total at every X equals 1.
    pub stack_as_percentage: bool,
    /// Fit the Y domain exactly to the data extent instead of zero-anchoring.
    pub fit_to_extent: bool,
    /// Force this series' group domain to the union of all opted-in groups
    /// plus the global group.
    pub use_default_group_domain: bool,
    /// Treat each bar datum as a histogram bucket rather than a point.
    pub enable_histogram_mode: bool,
    pub histogram_alignment: HistogramAlignment,
    /// Explicit series color; falls back to the theme palette when unset.
    pub color: Option<String>,
}

impl SeriesSpec {
    /// Minimal spec with the defaults used throughout the test suites.
    #[must_use]
    pub fn new(id: impl Into<SpecId>, kind: SeriesKind) -> Self {
        Self {
            id: id.into(),
            group_id: crate::core::types::DEFAULT_GROUP_ID.to_owned(),
            kind,
            x_scale_type: ScaleType::Linear,
            y_scale_type: ScaleType::Linear,
            timezone: None,
            stack_accessors: Vec::new(),
            stack_as_percentage: false,
            fit_to_extent: false,
            use_default_group_domain: false,
            enable_histogram_mode: false,
            histogram_alignment: HistogramAlignment::Start,
            color: None,
        }
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        !self.stack_accessors.is_empty()
    }

    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = group_id.into();
        self
    }

    #[must_use]
    pub fn with_x_scale(mut self, scale_type: ScaleType) -> Self {
        self.x_scale_type = scale_type;
        self
    }

    #[must_use]
    pub fn with_y_scale(mut self, scale_type: ScaleType) -> Self {
        self.y_scale_type = scale_type;
        self
    }

    #[must_use]
    pub fn stacked(mut self) -> Self {
        self.stack_accessors = vec!["y".to_owned()];
        self
    }
}

/// Alignment of histogram buckets relative to their datum X value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HistogramAlignment {
    #[default]
    Start,
    Center,
    End,
}

/// Partial continuous domain override. Unset bounds fall back to the
/// computed data extent; `min_interval` may only widen the computed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DomainRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_interval: Option<f64>,
}

impl DomainRange {
    #[must_use]
    pub fn bounded(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            min_interval: None,
        }
    }

    #[must_use]
    pub fn lower(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            min_interval: None,
        }
    }

    #[must_use]
    pub fn upper(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
            min_interval: None,
        }
    }

    #[must_use]
    pub fn with_min_interval(min_interval: f64) -> Self {
        Self {
            min: None,
            max: None,
            min_interval: Some(min_interval),
        }
    }
}

/// Custom X domain override supplied by the host.
///
/// The shape must match the resolved X scale kind: an ordinal scale takes an
/// explicit category list, a continuous scale takes a `DomainRange`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomXDomain {
    Ordinal(Vec<CategoryValue>),
    Range(DomainRange),
}

/// Label formatting policy for axis ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickFormat {
    /// Minimal decimal representation.
    #[default]
    Auto,
    /// Fixed number of decimal places.
    Fixed(u8),
    /// Value formatted as a percentage of 1.
    Percent,
    /// chrono format string applied to millisecond timestamps in the
    /// axis time zone.
    Time(String),
}

impl TickFormat {
    /// Formats a tick value into its display label.
    #[must_use]
    pub fn format(&self, value: &CategoryValue, timezone: TimeZone) -> String {
        match self {
            TickFormat::Auto => value.label(),
            TickFormat::Fixed(places) => match value.as_f64() {
                Some(v) => format!("{v:.*}", usize::from(*places)),
                None => value.label(),
            },
            TickFormat::Percent => match value.as_f64() {
                Some(v) => format!("{:.0}%", v * 100.0),
                None => value.label(),
            },
            TickFormat::Time(pattern) => match value.as_f64() {
                Some(millis) => format_time_label(millis, pattern, timezone),
                None => value.label(),
            },
        }
    }
}

fn format_time_label(millis: f64, pattern: &str, timezone: TimeZone) -> String {
    use chrono::{Local, TimeZone as _, Utc};

    let millis = millis as i64;
    match timezone {
        TimeZone::Utc => match Utc.timestamp_millis_opt(millis).single() {
            Some(dt) => dt.format(pattern).to_string(),
            None => millis.to_string(),
        },
        TimeZone::Local => match Local.timestamp_millis_opt(millis).single() {
            Some(dt) => dt.format(pattern).to_string(),
            None => millis.to_string(),
        },
        TimeZone::FixedMinutes(minutes) => match chrono::FixedOffset::east_opt(minutes * 60) {
            Some(offset) => match offset.timestamp_millis_opt(millis).single() {
                Some(dt) => dt.format(pattern).to_string(),
                None => millis.to_string(),
            },
            // Out-of-range offsets fall back to UTC rendering.
            None => format_time_label(millis as f64, pattern, TimeZone::Utc),
        },
    }
}

/// Declarative description of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub id: AxisId,
    /// Y group this axis reads from when it resolves to the Y domain.
    pub group_id: GroupId,
    pub position: Position,
    pub title: Option<String>,
    pub hide: bool,
    pub show_overlapping_ticks: bool,
    pub show_overlapping_labels: bool,
    /// Keep ticks whose formatted label duplicates a previous tick.
    pub show_duplicated_ticks: bool,
    pub show_grid_lines: bool,
    /// Desired tick count hint passed to the scale's tick generator.
    pub desired_tick_count: Option<usize>,
    pub tick_format: TickFormat,
}

impl AxisSpec {
    #[must_use]
    pub fn new(id: impl Into<AxisId>, position: Position) -> Self {
        Self {
            id: id.into(),
            group_id: crate::core::types::DEFAULT_GROUP_ID.to_owned(),
            position,
            title: None,
            hide: false,
            show_overlapping_ticks: false,
            show_overlapping_labels: false,
            show_duplicated_ticks: false,
            show_grid_lines: false,
            desired_tick_count: None,
            tick_format: TickFormat::Auto,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = group_id.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
