//! Abstract rendering commands for the flow diagram
//!
//! The renderer turns a [`FlowLayout`] into an ordered batch of
//! [`RenderCommand`]s in screen coordinates (pixels, y down). A backend such
//! as [`super::svg`] consumes the batch in one pass; nothing here knows about
//! the output format.
//!
//! # Batch order
//!
//! 1. `Clear` with the canvas background
//! 2. The figure heading
//! 3. Per step, in index order: box, title lines, description lines
//! 4. Per transition, in index order: one arrow
//!
//! Arrows come last so their heads are never hidden under a neighbouring box.

use super::layout::{ArrowKind, ArrowRoute, FlowLayout, LayoutConfig, PlacedStep, Position};
use super::theme::{self, pt};

/// A render command that can be executed on any rendering backend
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Fill the whole canvas
    Clear { color: String },
    /// Draw a filled and stroked rounded rectangle; (x, y) is the top-left corner
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        stroke: String,
        line_width: f64,
        corner_radius: f64,
    },
    /// Draw one line of text
    Text {
        x: f64,
        y: f64,
        text: String,
        color: String,
        font_size: f64,
        font_weight: FontWeight,
        align: TextAlign,
        baseline: TextBaseline,
    },
    /// Draw an arrow (line with a filled arrowhead at (x2, y2))
    Arrow {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
        line_width: f64,
        arrow_size: f64,
    },
}

/// Font weight for text rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
    #[default]
    Alphabetic,
}

/// Maps data coordinates (y up) onto the canvas (pixels, y down).
///
/// The canvas is split into a heading band at the top and a plot area that
/// shows `[0, x_extent] x [0, y_extent]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Height of the heading band
    pub heading_height: f64,
    /// Padding around the plot area
    pub padding: f64,
    pub x_extent: f64,
    pub y_extent: f64,
}

impl Viewport {
    /// Canvas size of the figure: 20 x 9 inches
    pub const FIGURE_WIDTH_IN: f64 = 20.0;
    pub const FIGURE_HEIGHT_IN: f64 = 9.0;

    /// Viewport sized for the standard figure and the given layout extents
    pub fn for_layout(config: &LayoutConfig) -> Self {
        Self {
            width: Self::FIGURE_WIDTH_IN * theme::DPI,
            height: Self::FIGURE_HEIGHT_IN * theme::DPI,
            heading_height: 100.0,
            padding: 20.0,
            x_extent: config.x_extent,
            y_extent: config.y_extent,
        }
    }

    /// Pixels per data unit along x
    pub fn scale_x(&self) -> f64 {
        (self.width - 2.0 * self.padding) / self.x_extent
    }

    /// Pixels per data unit along y
    pub fn scale_y(&self) -> f64 {
        (self.height - self.heading_height - 2.0 * self.padding) / self.y_extent
    }

    /// Convert a data position to canvas pixels
    pub fn to_screen(&self, p: Position) -> Position {
        let plot_bottom = self.height - self.padding;
        Position {
            x: self.padding + p.x * self.scale_x(),
            y: plot_bottom - p.y * self.scale_y(),
        }
    }

    /// Centre of the heading band
    pub fn heading_anchor(&self) -> Position {
        Position::new(self.width / 2.0, self.heading_height / 2.0 + self.padding / 2.0)
    }
}

/// Box styling (fill comes from the palette)
#[derive(Debug, Clone)]
pub struct BoxStyle {
    pub stroke: &'static str,
    pub line_width: f64,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            stroke: theme::outline::COLOR,
            line_width: pt(theme::outline::WIDTH_PT),
        }
    }
}

/// Text styling for one kind of label
#[derive(Debug, Clone)]
pub struct LabelStyle {
    pub color: &'static str,
    pub font_size: f64,
    pub font_weight: FontWeight,
}

impl LabelStyle {
    /// Bold, larger style for step titles
    pub fn title() -> Self {
        Self {
            color: theme::text::TITLE,
            font_size: pt(theme::text::TITLE_SIZE_PT),
            font_weight: FontWeight::Bold,
        }
    }

    /// Lighter, smaller style for step descriptions
    pub fn description() -> Self {
        Self {
            color: theme::text::DESCRIPTION,
            font_size: pt(theme::text::DESCRIPTION_SIZE_PT),
            font_weight: FontWeight::Normal,
        }
    }

    /// Style for the figure heading
    pub fn heading() -> Self {
        Self {
            color: theme::text::HEADING,
            font_size: pt(theme::text::HEADING_SIZE_PT),
            font_weight: FontWeight::Bold,
        }
    }

    /// Rough number of characters that fit in `width` pixels
    pub fn max_chars(&self, width: f64) -> usize {
        let glyph_width = self.font_size * AVERAGE_GLYPH_RATIO;
        ((width / glyph_width).floor() as usize).max(1)
    }
}

/// Average glyph advance as a fraction of the font size
const AVERAGE_GLYPH_RATIO: f64 = 0.55;

/// Line spacing as a multiple of the font size
const LINE_HEIGHT_RATIO: f64 = 1.15;

/// Labels never wrap onto more than this many lines
const MAX_LABEL_LINES: usize = 2;

/// Edge styling
#[derive(Debug, Clone)]
pub struct EdgeStyle {
    pub color: &'static str,
    pub line_width: f64,
    pub arrow_size: f64,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: theme::arrow::COLOR,
            line_width: pt(theme::arrow::WIDTH_PT),
            arrow_size: pt(theme::arrow::HORIZONTAL_HEAD_PT),
        }
    }
}

/// Get edge style based on arrow routing
pub fn edge_style_for_kind(kind: ArrowKind) -> EdgeStyle {
    match kind {
        ArrowKind::Horizontal => EdgeStyle::default(),
        ArrowKind::Vertical => EdgeStyle {
            arrow_size: pt(theme::arrow::VERTICAL_HEAD_PT),
            ..EdgeStyle::default()
        },
    }
}

/// Generate render commands for one step: its box and both labels
pub fn render_step(
    placed: &PlacedStep,
    config: &LayoutConfig,
    viewport: &Viewport,
    style: &BoxStyle,
) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    let geometry = &placed.geometry;

    let top_left = viewport.to_screen(geometry.origin.offset(0.0, geometry.height));
    let width = geometry.width * viewport.scale_x();
    let height = geometry.height * viewport.scale_y();
    let corner_radius = config.box_pad * viewport.scale_x().min(viewport.scale_y());

    commands.push(RenderCommand::RoundedRect {
        x: top_left.x,
        y: top_left.y,
        width,
        height,
        fill: theme::palette_color(placed.cell.palette_index()).to_string(),
        stroke: style.stroke.to_string(),
        line_width: style.line_width,
        corner_radius,
    });

    let center = geometry.center();
    let title_anchor = viewport.to_screen(center.offset(0.0, config.label_offset));
    let description_anchor = viewport.to_screen(center.offset(0.0, -config.label_offset));

    commands.extend(render_label(
        placed.step.title,
        title_anchor,
        width,
        &LabelStyle::title(),
    ));
    commands.extend(render_label(
        placed.step.description,
        description_anchor,
        width,
        &LabelStyle::description(),
    ));

    commands
}

/// Render a centred label, wrapping it to fit `max_width`
fn render_label(
    text: &str,
    anchor: Position,
    max_width: f64,
    style: &LabelStyle,
) -> Vec<RenderCommand> {
    let lines = wrap_label(text, style.max_chars(max_width), MAX_LABEL_LINES);
    let line_height = style.font_size * LINE_HEIGHT_RATIO;
    let total_height = (lines.len() as f64 - 1.0) * line_height;
    let start_y = anchor.y - total_height / 2.0;

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| RenderCommand::Text {
            x: anchor.x,
            y: start_y + i as f64 * line_height,
            text: line,
            color: style.color.to_string(),
            font_size: style.font_size,
            font_weight: style.font_weight,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        })
        .collect()
}

/// Wrap text on word boundaries into lines of at most `max_chars` characters.
///
/// Once `max_lines` is reached, remaining words stay on the last line so no
/// text is lost. Lengths are counted in chars, not bytes.
fn wrap_label(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if lines.len() + 1 >= max_lines
            || current_line.chars().count() + 1 + word.chars().count() <= max_chars
        {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(text.to_string());
    }

    lines
}

/// Generate render commands for an arrow between consecutive steps
pub fn render_arrow(route: &ArrowRoute, viewport: &Viewport) -> Vec<RenderCommand> {
    let style = edge_style_for_kind(route.kind);
    let start = viewport.to_screen(route.start);
    let end = viewport.to_screen(route.end);

    vec![RenderCommand::Arrow {
        x1: start.x,
        y1: start.y,
        x2: end.x,
        y2: end.y,
        color: style.color.to_string(),
        line_width: style.line_width,
        arrow_size: style.arrow_size,
    }]
}

/// Generate the figure heading
pub fn render_heading(title: &str, viewport: &Viewport) -> Vec<RenderCommand> {
    let style = LabelStyle::heading();
    let anchor = viewport.heading_anchor();
    vec![RenderCommand::Text {
        x: anchor.x,
        y: anchor.y,
        text: title.to_string(),
        color: style.color.to_string(),
        font_size: style.font_size,
        font_weight: style.font_weight,
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    }]
}

/// Generate the full command batch for a laid-out flow
pub fn render_flow(layout: &FlowLayout, title: &str, viewport: &Viewport) -> Vec<RenderCommand> {
    let box_style = BoxStyle::default();
    let mut commands = vec![RenderCommand::Clear {
        color: theme::background::CANVAS.to_string(),
    }];

    commands.extend(render_heading(title, viewport));

    for placed in &layout.steps {
        commands.extend(render_step(placed, &layout.config, viewport, &box_style));
    }

    for route in &layout.arrows {
        commands.extend(render_arrow(route, viewport));
    }

    commands
}
