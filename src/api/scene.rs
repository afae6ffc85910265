use serde::Serialize;

use crate::config::{DisplaySettings, SeriesKind};
use crate::core::{PlotLayout, RenderPoint};
use crate::error::{ChartError, ChartResult};

/// Technology-agnostic description of one rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartScene {
    pub layout: PlotLayout,
    pub display: DisplaySettings,
    /// One entry per configured series, in configuration order.
    pub series: Vec<SeriesPath>,
    pub x_ticks: Vec<PlacedTick>,
    pub y_ticks: Vec<PlacedTick>,
    pub legend: Vec<LegendEntry>,
}

/// Projected polyline of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPath {
    pub name: String,
    pub color: String,
    pub kind: SeriesKind,
    /// `M x y L x y ...` instructions; empty when the series produced no
    /// samples.
    pub path: String,
    pub sample_count: usize,
    #[serde(skip)]
    pub runs: Vec<Vec<RenderPoint>>,
}

impl SeriesPath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Axis tick with its pixel coordinate along the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedTick {
    pub value: f64,
    pub label: String,
    pub pixel: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

impl ChartScene {
    #[must_use]
    pub fn series_path(&self, index: usize) -> Option<&str> {
        self.series.get(index).map(|series| series.path.as_str())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize scene: {e}")))
    }
}
