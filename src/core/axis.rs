use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default number of intervals between ticks on each axis.
pub const DEFAULT_TICK_COUNT: u32 = 10;

/// One graduation mark at a fixed fraction of the axis range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Fraction of the axis range, in `[0, 1]`.
    pub position: f64,
    pub value: f64,
    pub label: String,
}

/// Plans `count + 1` evenly spaced ticks from `domain_min` to `domain_max`.
///
/// End ticks carry the exact range bounds so labels never drift by a rounding
/// error at the edges.
pub fn plan_ticks(domain_min: f64, domain_max: f64, count: u32) -> ChartResult<Vec<AxisTick>> {
    if count == 0 {
        return Err(ChartError::InvalidConfig(
            "tick count must be >= 1".to_owned(),
        ));
    }
    if !domain_min.is_finite() || !domain_max.is_finite() {
        return Err(ChartError::InvalidConfig(
            "axis range must be finite".to_owned(),
        ));
    }

    let span = domain_max - domain_min;
    let ticks = (0..=count)
        .map(|i| {
            let position = f64::from(i) / f64::from(count);
            let value = if i == 0 {
                domain_min
            } else if i == count {
                domain_max
            } else {
                domain_min + position * span
            };
            AxisTick {
                position,
                value,
                label: format_tick_label(value),
            }
        })
        .collect();
    Ok(ticks)
}

/// Formats a tick value with one decimal place.
///
/// Exact ties at the second decimal (odd multiples of `0.25`) round away from
/// zero; every other value rounds from its exact binary expansion.
#[must_use]
pub fn format_tick_label(value: f64) -> String {
    let quarters = value * 4.0;
    let is_tie = quarters.fract() == 0.0 && quarters % 2.0 != 0.0;
    let rounded = if is_tie {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    let label = format!("{rounded:.1}");
    if label == "-0.0" && value == 0.0 {
        return "0.0".to_owned();
    }
    label
}
