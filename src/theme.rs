//! Numeric theme tokens consumed by the layout passes.
//!
//! Only the tokens that influence layout live here: fonts and paddings for
//! tick label measurement, tick line sizes for axis box accounting, chart
//! margins, and the bar padding fractions. Colors and visual styling stay
//! with the drawing layer.

use serde::{Deserialize, Serialize};

use crate::core::types::Margins;

/// Font and padding tokens for axis tick labels.
///
/// Serializable so host applications can persist chart setup without
/// inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTheme {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Length of the tick mark line, perpendicular to the axis.
    #[serde(default = "default_tick_line_size")]
    pub tick_line_size: f64,
    /// Gap between the tick mark and its label.
    #[serde(default = "default_tick_padding")]
    pub tick_padding: f64,
    /// Padding applied around each label during measurement.
    #[serde(default = "default_tick_label_padding")]
    pub tick_label_padding: f64,
    /// Tick label rotation in degrees.
    #[serde(default)]
    pub tick_label_rotation: f64,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: f64,
    /// Gap between the axis title and the tick labels.
    #[serde(default = "default_title_padding")]
    pub title_padding: f64,
}

impl Default for AxisTheme {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            tick_line_size: default_tick_line_size(),
            tick_padding: default_tick_padding(),
            tick_label_padding: default_tick_label_padding(),
            tick_label_rotation: 0.0,
            title_font_size: default_title_font_size(),
            title_padding: default_title_padding(),
        }
    }
}

/// Layout-relevant theme tokens for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartTheme {
    #[serde(default)]
    pub axis: AxisTheme,
    #[serde(default)]
    pub chart_margins: Margins,
    #[serde(default)]
    pub chart_paddings: Margins,
    /// Fraction of each band left empty between clustered bars, 0..1.
    #[serde(default)]
    pub bars_padding: f64,
    /// Fraction of each band left empty between histogram buckets, 0..1.
    #[serde(default)]
    pub histogram_padding: f64,
}

fn default_font_family() -> String {
    "sans-serif".to_owned()
}

fn default_font_size() -> f64 {
    10.0
}

fn default_tick_line_size() -> f64 {
    10.0
}

fn default_tick_padding() -> f64 {
    10.0
}

fn default_tick_label_padding() -> f64 {
    1.0
}

fn default_title_font_size() -> f64 {
    12.0
}

fn default_title_padding() -> f64 {
    5.0
}
