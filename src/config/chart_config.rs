use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{DEFAULT_STEPS, DEFAULT_TICK_COUNT, MAX_STEPS};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_TITLE: &str = "Function Chart";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_GRID_COLOR: &str = "#dddddd";
pub const DEFAULT_X_RANGE: AxisRange = AxisRange::new(-5.0, 5.0);
pub const DEFAULT_Y_RANGE: AxisRange = AxisRange::new(-2.0, 2.0);
/// Upper bound on ticks per axis.
pub const MAX_TICK_COUNT: u32 = 1_000;

/// Colors handed out to series that do not specify one.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#ff0000", "#1f77b4", "#2ca02c", "#ff7f0e", "#9467bd", "#17becf", "#e377c2", "#8c564b",
];

/// Closed (min, max) numeric interval of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn validate(self, axis: &str) -> ChartResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "{axis}Range must hold finite numbers"
            )));
        }
        if self.min >= self.max {
            return Err(ChartError::InvalidConfig(format!(
                "{axis}Range minimum {} must be below maximum {}",
                self.min, self.max
            )));
        }
        if !(self.max - self.min).is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "{axis}Range span overflows"
            )));
        }
        Ok(())
    }
}

impl From<AxisRange> for [f64; 2] {
    fn from(range: AxisRange) -> Self {
        [range.min, range.max]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    #[serde(alias = "expression")]
    Expression,
    #[serde(alias = "external_signal", alias = "signal", alias = "entity")]
    ExternalSignal,
}

/// Where a series takes its values from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum SeriesSource {
    /// Math expression over the free variable `x`.
    Expression {
        #[serde(rename = "source")]
        expression: String,
    },
    /// Named host signal, plotted as a horizontal segment at its current value.
    ExternalSignal {
        #[serde(rename = "signalId")]
        signal_id: String,
    },
}

/// One plotted curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub name: String,
    pub color: String,
    #[serde(flatten)]
    pub source: SeriesSource,
}

impl SeriesSpec {
    #[must_use]
    pub fn expression(
        name: impl Into<String>,
        color: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            source: SeriesSource::Expression {
                expression: expression.into(),
            },
        }
    }

    #[must_use]
    pub fn signal(
        name: impl Into<String>,
        color: impl Into<String>,
        signal_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            source: SeriesSource::ExternalSignal {
                signal_id: signal_id.into(),
            },
        }
    }

    /// Stroke color of the series at `index`; a blank color falls back to
    /// the palette.
    #[must_use]
    pub fn resolved_color(&self, index: usize) -> &str {
        non_blank(Some(self.color.as_str())).unwrap_or_else(|| palette_color(index))
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        match self.source {
            SeriesSource::Expression { .. } => SeriesKind::Expression,
            SeriesSource::ExternalSignal { .. } => SeriesKind::ExternalSignal,
        }
    }
}

/// Validated chart configuration.
///
/// Hosts exchange configuration as a nested JSON object; this type is the
/// typed view of it with per-entry defaults filled in. Deserialization accepts
/// partial objects, legacy series keys and unknown host fields, then validates
/// the result once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawChartConfig")]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_color: Option<String>,
    pub show_grid: bool,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub steps: u32,
    pub tick_count: u32,
    #[serde(rename = "functions")]
    pub series: Vec<SeriesSpec>,
}

/// Display values with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub title: String,
    pub background_color: String,
    pub grid_color: String,
    pub show_grid: bool,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl ChartConfig {
    /// Creates a config with default display settings and ranges.
    #[must_use]
    pub fn new(series: Vec<SeriesSpec>) -> Self {
        Self {
            title: None,
            background_color: None,
            grid_color: None,
            show_grid: true,
            x_range: DEFAULT_X_RANGE,
            y_range: DEFAULT_Y_RANGE,
            x_label: None,
            y_label: None,
            steps: DEFAULT_STEPS,
            tick_count: DEFAULT_TICK_COUNT,
            series,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = AxisRange::new(min, max);
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = AxisRange::new(min, max);
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: u32) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_show_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Starter configuration offered when a chart is first added to a dashboard.
    #[must_use]
    pub fn stub() -> Self {
        Self::new(vec![SeriesSpec::expression("Sinus", "#FF0000", "Math.sin(x)")])
            .with_title(DEFAULT_TITLE)
            .with_axis_labels("X", "Y")
    }

    /// `stub()` in the host's JSON form.
    #[must_use]
    pub fn stub_value() -> Value {
        serde_json::json!({
            "title": DEFAULT_TITLE,
            "showGrid": true,
            "backgroundColor": DEFAULT_BACKGROUND_COLOR,
            "gridColor": DEFAULT_GRID_COLOR,
            "xRange": [-5, 5],
            "yRange": [-2, 2],
            "xLabel": "X",
            "yLabel": "Y",
            "functions": [
                {
                    "kind": "Expression",
                    "source": "Math.sin(x)",
                    "name": "Sinus",
                    "color": "#FF0000"
                }
            ]
        })
    }

    /// Rejects configs that cannot be rendered.
    pub fn validate(&self) -> ChartResult<()> {
        if self.series.is_empty() {
            return Err(ChartError::InvalidConfig(
                "at least one function must be defined".to_owned(),
            ));
        }
        self.x_range.validate("x")?;
        self.y_range.validate("y")?;
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ChartError::InvalidConfig(format!(
                "steps must be in 1..={MAX_STEPS}, got {}",
                self.steps
            )));
        }
        if self.tick_count == 0 || self.tick_count > MAX_TICK_COUNT {
            return Err(ChartError::InvalidConfig(format!(
                "tickCount must be in 1..={MAX_TICK_COUNT}, got {}",
                self.tick_count
            )));
        }
        for (index, spec) in self.series.iter().enumerate() {
            check_color(&format!("functions.{index}.color"), &spec.color)?;
        }
        if let Some(color) = &self.background_color {
            check_color("backgroundColor", color)?;
        }
        if let Some(color) = &self.grid_color {
            check_color("gridColor", color)?;
        }
        Ok(())
    }

    pub fn from_value(value: &Value) -> ChartResult<Self> {
        Self::deserialize(value).map_err(|e| ChartError::InvalidConfig(e.to_string()))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| ChartError::InvalidConfig(e.to_string()))
    }

    pub fn to_value(&self) -> ChartResult<Value> {
        serde_json::to_value(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    #[must_use]
    pub fn display(&self) -> DisplaySettings {
        DisplaySettings {
            title: non_empty(&self.title).unwrap_or(DEFAULT_TITLE).to_owned(),
            background_color: non_blank(self.background_color.as_deref())
                .unwrap_or(DEFAULT_BACKGROUND_COLOR)
                .to_owned(),
            grid_color: non_blank(self.grid_color.as_deref())
                .unwrap_or(DEFAULT_GRID_COLOR)
                .to_owned(),
            show_grid: self.show_grid,
            x_label: non_empty(&self.x_label).map(str::to_owned),
            y_label: non_empty(&self.y_label).map(str::to_owned),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

// Blank colors resolve to defaults; control characters never reach a renderer.
fn check_color(field: &str, color: &str) -> ChartResult<()> {
    if color.chars().any(char::is_control) {
        return Err(ChartError::InvalidConfig(format!(
            "{field} `{}` contains control characters",
            color.escape_debug()
        )));
    }
    Ok(())
}

/// Default label for the series at `index` (0-based).
#[must_use]
pub fn default_series_name(index: usize) -> String {
    format!("Function {}", index + 1)
}

/// Palette color for the series at `index` (0-based).
#[must_use]
pub fn palette_color(index: usize) -> &'static str {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChartConfig {
    title: Option<String>,
    background_color: Option<String>,
    grid_color: Option<String>,
    show_grid: Option<bool>,
    x_range: Option<Vec<Option<f64>>>,
    y_range: Option<Vec<Option<f64>>>,
    x_label: Option<String>,
    y_label: Option<String>,
    steps: Option<f64>,
    tick_count: Option<f64>,
    #[serde(alias = "series")]
    functions: Option<Vec<RawSeriesSpec>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeriesSpec {
    kind: Option<SeriesKind>,
    #[serde(alias = "expression")]
    source: Option<String>,
    #[serde(alias = "signal", alias = "entity")]
    signal_id: Option<String>,
    name: Option<String>,
    color: Option<String>,
}

impl RawSeriesSpec {
    fn resolve(self, index: usize) -> Result<SeriesSpec, String> {
        let kind = match self.kind {
            Some(kind) => kind,
            None if self.source.is_some() => SeriesKind::Expression,
            None if self.signal_id.is_some() => SeriesKind::ExternalSignal,
            None => {
                return Err(format!(
                    "function {index} needs either `source` or `signalId`"
                ));
            }
        };
        let source = match kind {
            SeriesKind::Expression => SeriesSource::Expression {
                expression: self
                    .source
                    .ok_or_else(|| format!("expression function {index} has no `source`"))?,
            },
            SeriesKind::ExternalSignal => SeriesSource::ExternalSignal {
                signal_id: self
                    .signal_id
                    .ok_or_else(|| format!("signal function {index} has no `signalId`"))?,
            },
        };
        Ok(SeriesSpec {
            name: self.name.unwrap_or_else(|| default_series_name(index)),
            color: self
                .color
                .filter(|color| !color.trim().is_empty())
                .unwrap_or_else(|| palette_color(index).to_owned()),
            source,
        })
    }
}

fn resolve_range(
    raw: Option<Vec<Option<f64>>>,
    default: AxisRange,
    axis: &str,
) -> Result<AxisRange, String> {
    let Some(entries) = raw else {
        return Ok(default);
    };
    if entries.len() > 2 {
        return Err(format!(
            "{axis}Range must hold two numbers, got {}",
            entries.len()
        ));
    }
    let entry = |i: usize| entries.get(i).copied().flatten();
    Ok(AxisRange::new(
        entry(0).unwrap_or(default.min),
        entry(1).unwrap_or(default.max),
    ))
}

fn resolve_count(raw: Option<f64>, default: u32, field: &str) -> Result<u32, String> {
    let Some(value) = raw else {
        return Ok(default);
    };
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(format!("{field} must be a non-negative integer, got {value}"));
    }
    Ok(value as u32)
}

impl TryFrom<RawChartConfig> for ChartConfig {
    type Error = String;

    fn try_from(raw: RawChartConfig) -> Result<Self, Self::Error> {
        let series = raw
            .functions
            .ok_or_else(|| "at least one function must be defined".to_owned())?
            .into_iter()
            .enumerate()
            .map(|(index, spec)| spec.resolve(index))
            .collect::<Result<Vec<_>, _>>()?;

        let config = Self {
            title: raw.title,
            background_color: raw.background_color,
            grid_color: raw.grid_color,
            show_grid: raw.show_grid.unwrap_or(true),
            x_range: resolve_range(raw.x_range, DEFAULT_X_RANGE, "x")?,
            y_range: resolve_range(raw.y_range, DEFAULT_Y_RANGE, "y")?,
            x_label: raw.x_label,
            y_label: raw.y_label,
            steps: resolve_count(raw.steps, DEFAULT_STEPS, "steps")?,
            tick_count: resolve_count(raw.tick_count, DEFAULT_TICK_COUNT, "tickCount")?,
            series,
        };

        config.validate().map_err(|err| match err {
            ChartError::InvalidConfig(message) => message,
            other => other.to_string(),
        })?;
        Ok(config)
    }
}
