use std::cmp::Ordering;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

pub type SpecId = String;
pub type GroupId = String;
pub type AxisId = String;

/// Group id of the default ("global") Y axis group. Groups that opt into
/// `use_default_group_domain` have their domain synchronized with this group.
pub const DEFAULT_GROUP_ID: &str = "__global__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    Ordinal,
    Linear,
    Log,
    Sqrt,
    Time,
}

impl ScaleType {
    #[must_use]
    pub fn is_continuous(self) -> bool {
        !matches!(self, ScaleType::Ordinal)
    }
}

/// Time zone attached to a time X scale.
///
/// Fixed offsets are expressed in minutes east of UTC, so `utc+3` is
/// `FixedMinutes(180)`. When series specs disagree the merger coerces to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeZone {
    Utc,
    Local,
    FixedMinutes(i32),
}

impl Default for TimeZone {
    fn default() -> Self {
        TimeZone::Utc
    }
}

/// Chart rotation in degrees. Determines which domain (X or Y) backs a
/// horizontal vs vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    DegNeg90,
}

impl Rotation {
    /// True for 0/180 rotations, where the X domain runs horizontally.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Rotation::Deg0 | Rotation::Deg180)
    }
}

/// Placement of an axis around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Top,
    Bottom,
    Left,
    Right,
}

impl Position {
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Position::Left | Position::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A positioned box, used both for the plot area and for per-axis boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Dimensions {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// A single X value as observed in series data.
///
/// Continuous scales only consume `Num` values; ordinal scales accept both
/// and order them lexicographically on their stringified form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryValue {
    Num(OrderedFloat<f64>),
    Str(String),
}

impl CategoryValue {
    #[must_use]
    pub fn num(value: f64) -> Self {
        CategoryValue::Num(OrderedFloat(value))
    }

    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        CategoryValue::Str(value.into())
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CategoryValue::Num(v) => Some(v.0),
            CategoryValue::Str(_) => None,
        }
    }

    /// Stringified form used for ordinal ordering and datum keys.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Num(v) => {
                // Minimal decimal representation: integers render without a
                // trailing ".0" so `1.0` and the category "1" collate together.
                if v.0.fract() == 0.0 && v.0.abs() < 1e15 {
                    write!(f, "{}", v.0 as i64)
                } else {
                    write!(f, "{}", v.0)
                }
            }
            CategoryValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl PartialOrd for CategoryValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CategoryValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic on the label, with a variant tie-break so a numeric
        // `1` and the category "1" stay distinct keys, consistent with `Eq`.
        self.label()
            .cmp(&other.label())
            .then_with(|| match (self, other) {
                (CategoryValue::Num(a), CategoryValue::Num(b)) => a.cmp(b),
                (CategoryValue::Num(_), CategoryValue::Str(_)) => Ordering::Less,
                (CategoryValue::Str(_), CategoryValue::Num(_)) => Ordering::Greater,
                (CategoryValue::Str(a), CategoryValue::Str(b)) => a.cmp(b),
            })
    }
}

impl From<f64> for CategoryValue {
    fn from(value: f64) -> Self {
        CategoryValue::num(value)
    }
}

impl From<&str> for CategoryValue {
    fn from(value: &str) -> Self {
        CategoryValue::str(value)
    }
}
