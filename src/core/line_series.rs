use crate::core::scale::{ClipPolicy, CoordinateMapper};
use crate::core::types::{RenderPoint, Sample};

/// Projects samples into contiguous pixel-space runs.
///
/// With `ClipPolicy::Unclipped` there is at most one run holding every point
/// whose projection is finite (values large enough to overflow are skipped).
/// With `ClipPolicy::BreakSegments` points outside the plotting rectangle are
/// dropped and each gap starts a new run.
#[must_use]
pub fn project_polyline(
    samples: &[Sample],
    mapper: &CoordinateMapper,
    clip: ClipPolicy,
) -> Vec<Vec<RenderPoint>> {
    let mut runs: Vec<Vec<RenderPoint>> = Vec::new();
    let mut current: Vec<RenderPoint> = Vec::new();

    for sample in samples {
        let point = mapper.to_pixel(*sample);
        let finite = point.px.is_finite() && point.py.is_finite();
        if !finite && clip == ClipPolicy::Unclipped {
            continue;
        }
        if clip == ClipPolicy::BreakSegments && !(finite && mapper.contains(point)) {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(point);
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Serializes runs as path instructions: `M x y` opens each run and `L x y`
/// continues it, all separated by single spaces.
#[must_use]
pub fn path_instructions(runs: &[Vec<RenderPoint>]) -> String {
    let mut out = String::new();
    for run in runs {
        for (i, point) in run.iter().enumerate() {
            if !out.is_empty() {
                out.push(' ');
            }
            let command = if i == 0 { 'M' } else { 'L' };
            out.push(command);
            out.push(' ');
            out.push_str(&format_coordinate(point.px));
            out.push(' ');
            out.push_str(&format_coordinate(point.py));
        }
    }
    out
}

/// Shortest round-trip decimal form; negative zero prints as `0`.
///
/// Magnitudes from `1e21` up and below `1e-6` switch to exponent form
/// (`1e+300`, `2.5e-7`), the way browsers stringify numbers in path data.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if magnitude.is_finite() && (magnitude >= 1e21 || magnitude < 1e-6) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    value.to_string()
}
