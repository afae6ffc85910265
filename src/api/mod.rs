mod chart_builder;
mod engine;
mod render_frame_builder;
mod scene;

pub use chart_builder::ChartBuilder;
pub use engine::ChartEngine;
pub use scene::{ChartScene, LegendEntry, PlacedTick, SeriesPath};
