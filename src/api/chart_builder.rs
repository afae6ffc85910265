use serde_json::Value;
use tracing::{debug, warn};

#[cfg(feature = "parallel-sampling")]
use rayon::prelude::*;

use crate::config::{ChartConfig, SeriesSpec};
use crate::core::{
    AxisTick, ClipPolicy, CoordinateMapper, DataSource, PlotDomain, PlotLayout, SampleDomain,
    SignalSnapshot, path_instructions, plan_ticks, project_polyline, sample,
};
use crate::error::ChartResult;

use super::scene::{ChartScene, LegendEntry, PlacedTick, SeriesPath};

/// Turns a chart configuration plus a signal snapshot into a [`ChartScene`].
///
/// The builder holds only the canvas layout and clipping policy, so one
/// instance can serve any number of configs, including from several threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartBuilder {
    layout: PlotLayout,
    clip_policy: ClipPolicy,
}

impl ChartBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layout(mut self, layout: PlotLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_clip_policy(mut self, clip_policy: ClipPolicy) -> Self {
        self.clip_policy = clip_policy;
        self
    }

    #[must_use]
    pub fn layout(&self) -> PlotLayout {
        self.layout
    }

    #[must_use]
    pub fn clip_policy(&self) -> ClipPolicy {
        self.clip_policy
    }

    /// Parses the host's JSON configuration and builds its scene.
    pub fn build_from_value(&self, config: &Value, snapshot: &SignalSnapshot) -> ChartResult<ChartScene> {
        let config = ChartConfig::from_value(config)?;
        self.build(&config, snapshot)
    }

    pub fn build(&self, config: &ChartConfig, snapshot: &SignalSnapshot) -> ChartResult<ChartScene> {
        config.validate()?;
        let layout = self.layout.validate()?;
        let domain = PlotDomain::new(config.x_range.as_tuple(), config.y_range.as_tuple());
        let mapper = CoordinateMapper::new(domain, layout)?;
        let sample_domain = SampleDomain::new(config.x_range.min, config.x_range.max, config.steps)?;
        let clip = self.clip_policy;

        #[cfg(feature = "parallel-sampling")]
        let series: Vec<SeriesPath> = config
            .series
            .par_iter()
            .enumerate()
            .map(|(index, spec)| {
                trace_series(index, spec, sample_domain, snapshot, &mapper, clip)
            })
            .collect();

        #[cfg(not(feature = "parallel-sampling"))]
        let series: Vec<SeriesPath> = config
            .series
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                trace_series(index, spec, sample_domain, snapshot, &mapper, clip)
            })
            .collect();

        let x_ticks = plan_ticks(config.x_range.min, config.x_range.max, config.tick_count)?
            .into_iter()
            .map(|tick| {
                let pixel = mapper.x_fraction_to_pixel(tick.position);
                place(tick, pixel)
            })
            .collect();
        let y_ticks = plan_ticks(config.y_range.min, config.y_range.max, config.tick_count)?
            .into_iter()
            .map(|tick| {
                let pixel = mapper.y_fraction_to_pixel(tick.position);
                place(tick, pixel)
            })
            .collect();

        let legend = config
            .series
            .iter()
            .enumerate()
            .map(|(index, spec)| LegendEntry {
                name: spec.name.clone(),
                color: spec.resolved_color(index).to_owned(),
            })
            .collect();

        debug!(
            series = config.series.len(),
            steps = config.steps,
            clip = ?clip,
            "built chart scene"
        );

        Ok(ChartScene {
            layout,
            display: config.display(),
            series,
            x_ticks,
            y_ticks,
            legend,
        })
    }
}

fn place(tick: AxisTick, pixel: f64) -> PlacedTick {
    PlacedTick {
        value: tick.value,
        label: tick.label,
        pixel,
    }
}

// A series whose expression does not compile is drawn empty; the other series
// of the chart still render.
fn trace_series(
    index: usize,
    spec: &SeriesSpec,
    domain: SampleDomain,
    snapshot: &SignalSnapshot,
    mapper: &CoordinateMapper,
    clip: ClipPolicy,
) -> SeriesPath {
    let samples = match DataSource::from_spec(spec) {
        Ok(source) => sample(&source, domain, snapshot),
        Err(err) => {
            warn!(series = %spec.name, error = %err, "series expression rejected");
            Vec::new()
        }
    };
    let runs = project_polyline(&samples, mapper, clip);
    SeriesPath {
        name: spec.name.clone(),
        color: spec.resolved_color(index).to_owned(),
        kind: spec.kind(),
        path: path_instructions(&runs),
        sample_count: samples.len(),
        runs,
    }
}
