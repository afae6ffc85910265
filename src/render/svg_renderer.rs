use std::fmt::Write as _;

use crate::core::format_coordinate;
use crate::error::{ChartError, ChartResult};
use crate::render::{LineStrokeStyle, RenderFrame, Renderer, TextHAlign, TextVAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub texts_drawn: usize,
    pub paths_drawn: usize,
}

/// Serializes frames into standalone SVG documents.
///
/// Each `render` call replaces the previous document. Colors are written
/// as-is; text content and attribute values are XML-escaped.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    /// Markup of the last rendered frame; empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut stats = SvgRenderStats::default();
        let document = build_document(frame, &mut stats)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

fn build_document(frame: &RenderFrame, stats: &mut SvgRenderStats) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let width = frame.viewport.width;
    let height = frame.viewport.height;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" style="background: {}">"#,
        escape_xml(frame.background.as_str())
    )?;

    for line in &frame.lines {
        write!(
            out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}""#,
            format_coordinate(line.x1),
            format_coordinate(line.y1),
            format_coordinate(line.x2),
            format_coordinate(line.y2),
            escape_xml(line.color.as_str()),
            format_coordinate(line.stroke_width),
        )?;
        if let LineStrokeStyle::Dashed { dash_px, gap_px } = line.stroke_style {
            write!(
                out,
                r#" stroke-dasharray="{},{}""#,
                format_coordinate(dash_px),
                format_coordinate(gap_px)
            )?;
        }
        out.push_str("/>\n");
        stats.lines_drawn += 1;
    }

    for text in &frame.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        let x = format_coordinate(text.x);
        let y = format_coordinate(text.y);
        write!(
            out,
            r#"  <text x="{x}" y="{y}" text-anchor="{anchor}" font-size="{}" fill="{}""#,
            format_coordinate(text.font_size_px),
            escape_xml(text.color.as_str()),
        )?;
        if text.v_align == TextVAlign::Middle {
            out.push_str(r#" alignment-baseline="middle""#);
        }
        if text.rotation_deg != 0.0 {
            write!(
                out,
                r#" transform="rotate({}, {x}, {y})""#,
                format_coordinate(text.rotation_deg)
            )?;
        }
        writeln!(out, ">{}</text>", escape_xml(&text.text))?;
        stats.texts_drawn += 1;
    }

    for path in &frame.paths {
        writeln!(
            out,
            r#"  <path d="{}" stroke="{}" fill="none" stroke-width="{}"/>"#,
            path.data(),
            escape_xml(path.color.as_str()),
            format_coordinate(path.stroke_width),
        )?;
        stats.paths_drawn += 1;
    }

    out.push_str("</svg>\n");
    Ok(out)
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_xml(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &apos;y&apos;&lt;/b&gt;"
        );
        assert_eq!(escape_xml("sin(x)"), "sin(x)");
    }
}
