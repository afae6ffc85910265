use serde::{Deserialize, Serialize};

use crate::core::types::{PlotDomain, PlotLayout, RenderPoint, Sample};
use crate::error::{ChartError, ChartResult};

/// One-dimensional linear mapping between a domain interval and `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidConfig(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Fraction of the domain covered up to `value` (0 at start, 1 at end).
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        (value - self.domain_start) / span
    }

    #[must_use]
    pub fn denormalize(self, fraction: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        self.domain_start + fraction * span
    }
}

/// What to do with points that project outside the plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClipPolicy {
    /// Emit every point; the drawing surface truncates the curve.
    #[default]
    Unclipped,
    /// Drop outside points and restart the polyline at the next inside point.
    BreakSegments,
}

/// Projects domain-space samples into render-space pixels.
///
/// The y axis is inverted: larger domain values render closer to the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    x_scale: LinearScale,
    y_scale: LinearScale,
    layout: PlotLayout,
}

impl CoordinateMapper {
    pub fn new(domain: PlotDomain, layout: PlotLayout) -> ChartResult<Self> {
        let layout = layout.validate()?;
        let x_scale = ascending_scale("x", domain.x_min, domain.x_max)?;
        let y_scale = ascending_scale("y", domain.y_min, domain.y_max)?;
        Ok(Self {
            x_scale,
            y_scale,
            layout,
        })
    }

    #[must_use]
    pub fn layout(&self) -> PlotLayout {
        self.layout
    }

    #[must_use]
    pub fn to_pixel(&self, sample: Sample) -> RenderPoint {
        RenderPoint::new(
            self.x_fraction_to_pixel(self.x_scale.normalize(sample.x)),
            self.y_fraction_to_pixel(self.y_scale.normalize(sample.y)),
        )
    }

    #[must_use]
    pub fn x_fraction_to_pixel(&self, fraction: f64) -> f64 {
        self.layout.margin + fraction * self.layout.plot_width()
    }

    #[must_use]
    pub fn y_fraction_to_pixel(&self, fraction: f64) -> f64 {
        self.layout.height() - (self.layout.margin + fraction * self.layout.plot_height())
    }

    /// Inverse of `to_pixel`, used by hosts for pointer read-outs.
    #[must_use]
    pub fn to_domain(&self, point: RenderPoint) -> Sample {
        let fx = (point.px - self.layout.margin) / self.layout.plot_width();
        let fy = (self.layout.height() - point.py - self.layout.margin) / self.layout.plot_height();
        Sample::new(self.x_scale.denormalize(fx), self.y_scale.denormalize(fy))
    }

    /// Returns `true` when the point lies inside the plotting rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: RenderPoint) -> bool {
        let (left, top, right, bottom) = self.layout.plot_rect();
        (left..=right).contains(&point.px) && (top..=bottom).contains(&point.py)
    }
}

fn ascending_scale(axis: &str, min: f64, max: f64) -> ChartResult<LinearScale> {
    if min.is_nan() || max.is_nan() || min >= max {
        return Err(degenerate_axis(axis, min, max));
    }
    LinearScale::new(min, max).map_err(|_| degenerate_axis(axis, min, max))
}

fn degenerate_axis(axis: &str, min: f64, max: f64) -> ChartError {
    ChartError::InvalidConfig(format!(
        "{axis} range [{min}, {max}] must be finite with min < max"
    ))
}
