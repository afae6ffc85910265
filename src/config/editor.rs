//! Editor-side config mutations.
//!
//! The editor form never mutates the host's configuration. Every field change
//! and every add/remove action produces a complete new configuration, which is
//! kept as the editor's current state and announced as a
//! [`ConfigChangedEvent`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::chart_config::{DEFAULT_PALETTE, SeriesKind};
use crate::config::path::{ConfigPath, PathSegment};
use crate::error::{ChartError, ChartResult};

/// Config key holding the series list.
pub const SERIES_KEY: &str = "functions";
/// Expression given to newly added expression series.
pub const NEW_SERIES_EXPRESSION: &str = "Math.sin(x)";

/// Raw value coming from one editor form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    /// Text of a numeric field; parsed as a finite number.
    Number(String),
    Checkbox(bool),
}

impl FieldInput {
    /// Converts the widget value into the JSON value stored in the config.
    pub fn to_value(&self) -> ChartResult<Value> {
        match self {
            Self::Text(text) => Ok(Value::String(text.clone())),
            Self::Checkbox(checked) => Ok(Value::Bool(*checked)),
            Self::Number(text) => {
                let number = text.trim().parse::<f64>().map_err(|_| {
                    ChartError::InvalidData(format!("`{text}` is not a number"))
                })?;
                json_number(number)
            }
        }
    }
}

/// Full configuration after one edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigChangedEvent {
    pub config: Value,
}

impl ConfigChangedEvent {
    /// Event name the host listens for.
    pub const NAME: &'static str = "config-changed";
}

/// Receiver of editor change notifications.
pub trait ConfigListener {
    fn on_config_changed(&mut self, event: &ConfigChangedEvent);
}

impl<F: FnMut(&ConfigChangedEvent)> ConfigListener for F {
    fn on_config_changed(&mut self, event: &ConfigChangedEvent) {
        self(event);
    }
}

/// Editor state: the current configuration plus change listeners.
#[derive(Default)]
pub struct ConfigEditor {
    config: Value,
    listeners: Vec<Box<dyn ConfigListener>>,
}

impl std::fmt::Debug for ConfigEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigEditor")
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ConfigEditor {
    /// Starts editing a copy of `config`.
    #[must_use]
    pub fn new(config: &Value) -> Self {
        Self {
            config: config.clone(),
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// Replaces the edited config without emitting an event.
    pub fn set_config(&mut self, config: &Value) {
        self.config = config.clone();
    }

    pub fn add_listener(&mut self, listener: Box<dyn ConfigListener>) {
        self.listeners.push(listener);
    }

    /// Number of series currently configured.
    #[must_use]
    pub fn series_len(&self) -> usize {
        self.config
            .get(SERIES_KEY)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Writes one form field at `path` (e.g. `xRange.0`, `functions.1.color`).
    pub fn apply_input(&mut self, path: &str, input: FieldInput) -> ChartResult<ConfigChangedEvent> {
        let path = ConfigPath::parse(path)?;
        let value = input.to_value()?;
        self.write(&path, value)
    }

    /// Writes an already-typed JSON value at `path`.
    pub fn apply_value(&mut self, path: &ConfigPath, value: Value) -> ChartResult<ConfigChangedEvent> {
        self.write(path, value)
    }

    /// Appends a `Math.sin(x)` series with a random palette color.
    pub fn add_expression_series(&mut self) -> ChartResult<ConfigChangedEvent> {
        self.add_expression_series_with(&mut rand::rng())
    }

    /// Like `add_expression_series` with a caller-provided random source.
    pub fn add_expression_series_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> ChartResult<ConfigChangedEvent> {
        let position = self.series_len() + 1;
        let spec = json!({
            "kind": SeriesKind::Expression,
            "source": NEW_SERIES_EXPRESSION,
            "name": format!("Function {position}"),
            "color": random_palette_color(rng),
        });
        self.append_series(spec)
    }

    /// Appends a series bound to the host signal `signal_id`.
    pub fn add_signal_series(&mut self, signal_id: impl Into<String>) -> ChartResult<ConfigChangedEvent> {
        self.add_signal_series_with(signal_id, &mut rand::rng())
    }

    pub fn add_signal_series_with<R: Rng + ?Sized>(
        &mut self,
        signal_id: impl Into<String>,
        rng: &mut R,
    ) -> ChartResult<ConfigChangedEvent> {
        let position = self.series_len() + 1;
        let spec = json!({
            "kind": SeriesKind::ExternalSignal,
            "signalId": signal_id.into(),
            "name": format!("Signal {position}"),
            "color": random_palette_color(rng),
        });
        self.append_series(spec)
    }

    /// Removes the series at `index`; later series shift down.
    pub fn remove_series(&mut self, index: usize) -> ChartResult<ConfigChangedEvent> {
        let path = series_path(index);
        let (updated, removed) = path.remove(&self.config).inspect_err(|err| {
            warn!(error = %err, index, "series removal rejected");
        })?;
        debug!(index, removed = %removed, "removed series");
        Ok(self.commit(updated))
    }

    fn append_series(&mut self, spec: Value) -> ChartResult<ConfigChangedEvent> {
        let path = series_path(self.series_len());
        self.write(&path, spec)
    }

    fn write(&mut self, path: &ConfigPath, value: Value) -> ChartResult<ConfigChangedEvent> {
        let updated = path.set(&self.config, value).inspect_err(|err| {
            warn!(path = %path, error = %err, "config edit rejected");
        })?;
        debug!(path = %path, "config field updated");
        Ok(self.commit(updated))
    }

    fn commit(&mut self, updated: Value) -> ConfigChangedEvent {
        self.config = updated;
        let event = ConfigChangedEvent {
            config: self.config.clone(),
        };
        for listener in &mut self.listeners {
            listener.on_config_changed(&event);
        }
        event
    }
}

fn series_path(index: usize) -> ConfigPath {
    ConfigPath::key(SERIES_KEY).child(PathSegment::Index(index))
}

fn random_palette_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DEFAULT_PALETTE[rng.random_range(0..DEFAULT_PALETTE.len())]
}

// Integral values are stored as JSON integers so count fields such as `steps`
// keep their integer form.
fn json_number(number: f64) -> ChartResult<Value> {
    if !number.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "numeric field value must be finite, got {number}"
        )));
    }
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        return Ok(Value::from(number as i64));
    }
    serde_json::Number::from_f64(number)
        .map(Value::Number)
        .ok_or_else(|| ChartError::InvalidData(format!("`{number}` cannot be stored as json")))
}
