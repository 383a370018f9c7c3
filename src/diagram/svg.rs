//! SVG backend for render commands.
//!
//! Consumes a batch of [`RenderCommand`]s and produces a standalone SVG
//! document.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::render::{FontWeight, RenderCommand, TextAlign, TextBaseline};
use super::theme;
use crate::Result;

/// Arrowhead length as a fraction of the arrowhead scale
const HEAD_LENGTH_RATIO: f64 = 0.4;
/// Arrowhead half-width as a fraction of the arrowhead scale
const HEAD_HALF_WIDTH_RATIO: f64 = 0.2;

/// Document-level settings for the SVG output
#[derive(Debug, Clone)]
pub struct SvgDocument<'a> {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Document title (shown by viewers as the window title)
    pub title: &'a str,
    /// Render time, recorded in the generator comment when set
    pub generated_at: Option<DateTime<Utc>>,
}

impl SvgDocument<'_> {
    fn generator_comment(&self) -> String {
        let mut comment = format!(
            "Generated by vlsi-flow {} (commit {}, built {})",
            env!("CARGO_PKG_VERSION"),
            env!("VLSI_FLOW_GIT_COMMIT"),
            env!("VLSI_FLOW_BUILD_TIMESTAMP"),
        );
        if let Some(at) = self.generated_at {
            comment.push_str(&format!(" at {}", at.format("%Y-%m-%dT%H:%M:%SZ")));
        }
        comment
    }
}

/// Render a command batch into an SVG document
pub fn render_svg(document: &SvgDocument, commands: &[RenderCommand]) -> Result<String> {
    let mut svg = String::new();

    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(svg, "<!-- {} -->", escape_xml(&document.generator_comment()))?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}" font-family="{font}">"#,
        w = document.width,
        h = document.height,
        font = escape_xml(theme::text::FONT_FAMILY),
    )?;
    writeln!(svg, "  <title>{}</title>", escape_xml(document.title))?;

    for command in commands {
        write_command(&mut svg, command)?;
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

fn write_command(svg: &mut String, command: &RenderCommand) -> std::fmt::Result {
    match command {
        RenderCommand::Clear { color } => writeln!(
            svg,
            r#"  <rect x="0" y="0" width="100%" height="100%" fill="{}"/>"#,
            color
        ),
        RenderCommand::RoundedRect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            line_width,
            corner_radius,
        } => writeln!(
            svg,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{r:.2}" ry="{r:.2}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
            x,
            y,
            width,
            height,
            fill,
            stroke,
            line_width,
            r = corner_radius,
        ),
        RenderCommand::Text {
            x,
            y,
            text,
            color,
            font_size,
            font_weight,
            align,
            baseline,
        } => writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" fill="{}" font-size="{:.2}" font-weight="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
            x,
            y,
            color,
            font_size,
            font_weight_attr(*font_weight),
            text_anchor_attr(*align),
            baseline_attr(*baseline),
            escape_xml(text),
        ),
        RenderCommand::Arrow {
            x1,
            y1,
            x2,
            y2,
            color,
            line_width,
            arrow_size,
        } => write_arrow(svg, (*x1, *y1), (*x2, *y2), color, *line_width, *arrow_size),
    }
}

/// Draw a shaft that stops at the arrowhead base, then the filled head
fn write_arrow(
    svg: &mut String,
    (sx, sy): (f64, f64),
    (ex, ey): (f64, f64),
    color: &str,
    line_width: f64,
    arrow_size: f64,
) -> std::fmt::Result {
    let dx = ex - sx;
    let dy = ey - sy;
    let len = (dx * dx + dy * dy).sqrt();

    if len < 0.001 {
        return Ok(());
    }

    // Unit vector along the shaft, and its perpendicular
    let ux = dx / len;
    let uy = dy / len;
    let px = -uy;
    let py = ux;

    let head_len = (arrow_size * HEAD_LENGTH_RATIO).min(len);
    let half_width = arrow_size * HEAD_HALF_WIDTH_RATIO;
    let base_x = ex - ux * head_len;
    let base_y = ey - uy * head_len;

    writeln!(
        svg,
        r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="round"/>"#,
        sx, sy, base_x, base_y, color, line_width
    )?;
    writeln!(
        svg,
        r#"  <polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{}"/>"#,
        ex,
        ey,
        base_x + px * half_width,
        base_y + py * half_width,
        base_x - px * half_width,
        base_y - py * half_width,
        color
    )
}

fn font_weight_attr(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    }
}

fn text_anchor_attr(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn baseline_attr(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "hanging",
        TextBaseline::Middle => "middle",
        TextBaseline::Bottom => "text-after-edge",
        TextBaseline::Alphabetic => "alphabetic",
    }
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
