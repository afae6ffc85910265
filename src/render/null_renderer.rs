use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless backend that validates frames and records what it would draw.
///
/// Hosts use it to dry-run a chart pass; tests use the counters to check
/// frame composition without parsing SVG.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_viewport: Option<Viewport>,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_path_count: usize,
    /// Vertices across every path of the last frame.
    pub last_vertex_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_viewport = Some(frame.viewport);
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        self.last_path_count = frame.paths.len();
        self.last_vertex_count = frame.paths.iter().map(|path| path.point_count()).sum();
        Ok(())
    }
}
