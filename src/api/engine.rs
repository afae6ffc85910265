use serde_json::Value;
use tracing::debug;

use crate::config::ChartConfig;
use crate::core::SignalSnapshot;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartBuilder, ChartScene};

/// Long-lived chart bound to one renderer.
///
/// Hosts hand it a new configuration when the user edits the card and a new
/// signal snapshot whenever live values change, then ask it to render. A
/// rejected configuration leaves the previous one in place.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    builder: ChartBuilder,
    config: ChartConfig,
    snapshot: SignalSnapshot,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            builder: ChartBuilder::default(),
            config,
            snapshot: SignalSnapshot::default(),
        })
    }

    #[must_use]
    pub fn with_builder(mut self, builder: ChartBuilder) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Replaces the configuration from the host's JSON form.
    pub fn set_config_value(&mut self, value: &Value) -> ChartResult<()> {
        self.set_config(ChartConfig::from_value(value)?)
    }

    #[must_use]
    pub fn snapshot(&self) -> &SignalSnapshot {
        &self.snapshot
    }

    pub fn set_signals(&mut self, snapshot: SignalSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn build_scene(&self) -> ChartResult<ChartScene> {
        self.builder.build(&self.config, &self.snapshot)
    }

    /// Builds the current scene and hands its frame to the renderer.
    pub fn render(&mut self) -> ChartResult<ChartScene> {
        let scene = self.build_scene()?;
        let frame = scene.to_render_frame()?;
        self.renderer.render(&frame)?;
        debug!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            paths = frame.paths.len(),
            "rendered chart frame"
        );
        Ok(scene)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
