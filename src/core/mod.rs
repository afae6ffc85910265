pub mod axis;
pub mod line_series;
pub mod sampler;
pub mod scale;
pub mod types;

pub use axis::{AxisTick, DEFAULT_TICK_COUNT, format_tick_label, plan_ticks};
pub use line_series::{format_coordinate, path_instructions, project_polyline};
pub use sampler::{
    DEFAULT_STEPS, DataSource, MAX_STEPS, SampleDomain, SignalSnapshot, sample, sample_range,
};
pub use scale::{ClipPolicy, CoordinateMapper, LinearScale};
pub use types::{PlotDomain, PlotLayout, RenderPoint, Sample, Viewport};
