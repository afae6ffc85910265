use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Canvas plus the fixed inset that surrounds the plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub viewport: Viewport,
    pub margin: f64,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(400, 300),
            margin: 50.0,
        }
    }
}

impl PlotLayout {
    #[must_use]
    pub fn new(viewport: Viewport, margin: f64) -> Self {
        Self { viewport, margin }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ChartError::InvalidData(
                "plot margin must be finite and >= 0".to_owned(),
            ));
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margin {} leaves no plotting area in a {}x{} canvas",
                self.margin, self.viewport.width, self.viewport.height
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        f64::from(self.viewport.width)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        f64::from(self.viewport.height)
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.width() - 2.0 * self.margin
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.height() - 2.0 * self.margin
    }

    /// Plotting rectangle as `(left, top, right, bottom)` in pixels.
    #[must_use]
    pub fn plot_rect(self) -> (f64, f64, f64, f64) {
        (
            self.margin,
            self.margin,
            self.width() - self.margin,
            self.height() - self.margin,
        )
    }
}

/// Domain-space sample produced by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel-space point; origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderPoint {
    pub px: f64,
    pub py: f64,
}

impl RenderPoint {
    #[must_use]
    pub fn new(px: f64, py: f64) -> Self {
        Self { px, py }
    }
}

/// Visible domain rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotDomain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotDomain {
    #[must_use]
    pub fn new(x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            x_min: x_range.0,
            x_max: x_range.1,
            y_min: y_range.0,
            y_max: y_range.1,
        }
    }
}
