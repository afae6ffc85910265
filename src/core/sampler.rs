use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{SeriesSource, SeriesSpec};
use crate::core::types::Sample;
use crate::error::{ChartError, ChartResult};
use crate::expr::{EvalError, Expression};

/// Default number of intervals walked across the x range.
pub const DEFAULT_STEPS: u32 = 100;
/// Upper bound on intervals per series, keeping one render pass bounded.
pub const MAX_STEPS: u32 = 100_000;

/// Read-only point-in-time values of named external signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSnapshot {
    values: IndexMap<String, f64>,
}

impl SignalSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_signal(mut self, id: impl Into<String>, value: f64) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: f64) {
        self.values.insert(id.into(), value);
    }

    /// Returns the value of `id`; non-finite values count as missing.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied().filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a snapshot from a JSON object of `id -> value`.
    ///
    /// Numbers and numeric strings (dashboard state strings such as `"21.5"`)
    /// are accepted; entries of any other type are skipped.
    pub fn from_json_value(value: &Value) -> ChartResult<Self> {
        let Value::Object(entries) = value else {
            return Err(ChartError::InvalidData(
                "signal snapshot must be a JSON object".to_owned(),
            ));
        };

        let mut snapshot = Self::new();
        for (id, raw) in entries {
            let parsed = match raw {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse::<f64>().ok(),
                _ => None,
            };
            match parsed {
                Some(number) => snapshot.insert(id.clone(), number),
                None => debug!(signal = %id, "skipping non-numeric signal value"),
            }
        }
        Ok(snapshot)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse signal snapshot json: {e}"))
        })?;
        Self::from_json_value(&value)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SignalSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (id, value) in iter {
            snapshot.insert(id, value);
        }
        snapshot
    }
}

/// Runtime producer of samples for one series.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Expression(Expression),
    ExternalSignal { signal_id: String },
}

impl DataSource {
    /// Compiles the source described by a series spec.
    pub fn from_spec(spec: &SeriesSpec) -> Result<Self, EvalError> {
        match &spec.source {
            SeriesSource::Expression { expression } => {
                Expression::compile(expression).map(Self::Expression)
            }
            SeriesSource::ExternalSignal { signal_id } => Ok(Self::ExternalSignal {
                signal_id: signal_id.clone(),
            }),
        }
    }
}

/// Sampling interval and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleDomain {
    pub x_min: f64,
    pub x_max: f64,
    pub steps: u32,
}

impl SampleDomain {
    pub fn new(x_min: f64, x_max: f64, steps: u32) -> ChartResult<Self> {
        if !x_min.is_finite() || !x_max.is_finite() || x_min >= x_max {
            return Err(ChartError::InvalidConfig(format!(
                "sample range [{x_min}, {x_max}] must be finite with min < max"
            )));
        }
        if !(x_max - x_min).is_finite() {
            return Err(ChartError::InvalidConfig(format!(
                "sample range [{x_min}, {x_max}] spans more than f64 can hold"
            )));
        }
        if steps == 0 || steps > MAX_STEPS {
            return Err(ChartError::InvalidConfig(format!(
                "steps must be in 1..={MAX_STEPS}, got {steps}"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            steps,
        })
    }

    /// Query point `i` of `steps + 1`, never beyond `x_max`.
    #[must_use]
    pub fn x_at(self, i: u32) -> f64 {
        let dx = (self.x_max - self.x_min) / f64::from(self.steps);
        (self.x_min + f64::from(i) * dx).min(self.x_max)
    }
}

/// Produces the valid samples of `source` over `domain`.
///
/// Expression points that evaluate to NaN or infinity are dropped, so the
/// result may hold fewer than `steps + 1` samples. A signal contributes a flat
/// two-point segment when present in `snapshot` and nothing otherwise.
#[must_use]
pub fn sample(source: &DataSource, domain: SampleDomain, snapshot: &SignalSnapshot) -> Vec<Sample> {
    match source {
        DataSource::Expression(expression) => {
            let mut samples = Vec::with_capacity(domain.steps as usize + 1);
            let mut dropped = 0usize;
            for i in 0..=domain.steps {
                let x = domain.x_at(i);
                match expression.eval(x) {
                    Ok(y) => samples.push(Sample::new(x, y)),
                    Err(_) => dropped += 1,
                }
            }
            trace!(
                source = expression.source(),
                kept = samples.len(),
                dropped,
                "sampled expression"
            );
            samples
        }
        DataSource::ExternalSignal { signal_id } => match snapshot.get(signal_id) {
            Some(value) => vec![
                Sample::new(domain.x_min, value),
                Sample::new(domain.x_max, value),
            ],
            None => {
                debug!(signal = %signal_id, "signal missing from snapshot");
                Vec::new()
            }
        },
    }
}

/// Validates the interval and samples `source` in one call.
pub fn sample_range(
    source: &DataSource,
    x_min: f64,
    x_max: f64,
    steps: u32,
    snapshot: &SignalSnapshot,
) -> ChartResult<Vec<Sample>> {
    let domain = SampleDomain::new(x_min, x_max, steps)?;
    Ok(sample(source, domain, snapshot))
}
