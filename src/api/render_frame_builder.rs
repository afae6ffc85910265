use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, PathPrimitive, RenderFrame, TextHAlign, TextPrimitive,
    TextVAlign,
};

use super::scene::ChartScene;

const GRID_STROKE_PX: f64 = 1.0;
const GRID_DASH_PX: f64 = 4.0;
const AXIS_STROKE_PX: f64 = 2.0;
const SERIES_STROKE_PX: f64 = 2.0;
const TICK_LABEL_FONT_PX: f64 = 12.0;
const AXIS_TITLE_FONT_PX: f64 = 14.0;
/// Distance from the bottom plot edge down to x tick label baselines.
const X_TICK_LABEL_OFFSET_PX: f64 = 20.0;
/// Gap between y tick labels and the left plot edge.
const Y_TICK_LABEL_GAP_PX: f64 = 10.0;
const X_TITLE_BOTTOM_INSET_PX: f64 = 10.0;
const Y_TITLE_LEFT_INSET_PX: f64 = 15.0;
const AXIS_COLOR: &str = "black";
/// Labels follow the host's text color.
const LABEL_COLOR: &str = "currentColor";

impl ChartScene {
    /// Materializes backend-agnostic primitives for one draw pass.
    ///
    /// Paint order: grid, axes, tick labels, axis titles, series paths.
    /// Series without samples contribute no path.
    pub fn to_render_frame(&self) -> ChartResult<RenderFrame> {
        let layout = self.layout;
        let (left, top, right, bottom) = layout.plot_rect();
        let width = layout.width();
        let height = layout.height();
        let mut frame = RenderFrame::new(layout.viewport, Color::css(&self.display.background_color));

        if self.display.show_grid {
            let grid_color = Color::css(&self.display.grid_color);
            let dashed = LineStrokeStyle::Dashed {
                dash_px: GRID_DASH_PX,
                gap_px: GRID_DASH_PX,
            };
            for tick in &self.x_ticks {
                frame = frame.with_line(
                    LinePrimitive::new(
                        tick.pixel,
                        top,
                        tick.pixel,
                        bottom,
                        GRID_STROKE_PX,
                        grid_color.clone(),
                    )
                    .with_stroke_style(dashed),
                );
            }
            for tick in &self.y_ticks {
                frame = frame.with_line(
                    LinePrimitive::new(
                        left,
                        tick.pixel,
                        right,
                        tick.pixel,
                        GRID_STROKE_PX,
                        grid_color.clone(),
                    )
                    .with_stroke_style(dashed),
                );
            }
        }

        let axis_color = Color::css(AXIS_COLOR);
        frame = frame
            .with_line(LinePrimitive::new(
                left,
                bottom,
                right,
                bottom,
                AXIS_STROKE_PX,
                axis_color.clone(),
            ))
            .with_line(LinePrimitive::new(
                left,
                top,
                left,
                bottom,
                AXIS_STROKE_PX,
                axis_color,
            ));

        let label_color = Color::css(LABEL_COLOR);
        for tick in &self.x_ticks {
            frame = frame.with_text(TextPrimitive::new(
                tick.label.clone(),
                tick.pixel,
                bottom + X_TICK_LABEL_OFFSET_PX,
                TICK_LABEL_FONT_PX,
                label_color.clone(),
                TextHAlign::Center,
            ));
        }
        for tick in &self.y_ticks {
            frame = frame.with_text(
                TextPrimitive::new(
                    tick.label.clone(),
                    left - Y_TICK_LABEL_GAP_PX,
                    tick.pixel,
                    TICK_LABEL_FONT_PX,
                    label_color.clone(),
                    TextHAlign::Right,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }

        if let Some(x_label) = &self.display.x_label {
            frame = frame.with_text(TextPrimitive::new(
                x_label.clone(),
                width / 2.0,
                height - X_TITLE_BOTTOM_INSET_PX,
                AXIS_TITLE_FONT_PX,
                label_color.clone(),
                TextHAlign::Center,
            ));
        }
        if let Some(y_label) = &self.display.y_label {
            frame = frame.with_text(
                TextPrimitive::new(
                    y_label.clone(),
                    Y_TITLE_LEFT_INSET_PX,
                    height / 2.0,
                    AXIS_TITLE_FONT_PX,
                    label_color,
                    TextHAlign::Center,
                )
                .with_rotation(-90.0),
            );
        }

        for series in self.series.iter().filter(|series| !series.runs.is_empty()) {
            frame = frame.with_path(PathPrimitive::new(
                series.runs.clone(),
                SERIES_STROKE_PX,
                Color::css(&series.color),
            ));
        }

        frame.validate()?;
        Ok(frame)
    }
}
