//! Command implementations for the vlsi-flow CLI.
//!
//! Each command returns a result type implementing [`Output`], which the
//! binary prints as JSON (default) or human-readable text.
//!
//! - `show` - Render the diagram, write it to the output directory, open it
//! - `render` - Render the diagram to a given file or to a string
//! - `layout` - Report the computed grid layout without drawing anything
//! - `config_show` - Report resolved settings and where they came from

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ResolvedSettings;
use crate::diagram::{
    ArrowKind, ArrowRoute, FlowLayout, RenderCommand, SvgDocument, Viewport, render_flow,
    render_svg, theme,
};
use crate::models::{DIAGRAM_TITLE, FLOW_STEPS};
use crate::{Error, Result};

/// File name used by `show` inside the output directory.
pub const DEFAULT_FILE_NAME: &str = "vlsi-chip-design-flow.svg";

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// The diagram after every stage of the pipeline.
#[derive(Debug, Clone)]
pub struct RenderedDiagram {
    pub layout: FlowLayout,
    pub commands: Vec<RenderCommand>,
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

/// Lay out, render and serialize the flow diagram.
pub fn build_diagram(generated_at: Option<DateTime<Utc>>) -> Result<RenderedDiagram> {
    let layout = FlowLayout::with_defaults(&FLOW_STEPS)?;
    let viewport = Viewport::for_layout(&layout.config);
    let commands = render_flow(&layout, DIAGRAM_TITLE, &viewport);
    let svg = render_svg(
        &SvgDocument {
            width: viewport.width,
            height: viewport.height,
            title: DIAGRAM_TITLE,
            generated_at,
        },
        &commands,
    )?;

    tracing::debug!(
        boxes = layout.steps.len(),
        arrows = layout.arrows.len(),
        commands = commands.len(),
        "Rendered diagram"
    );

    Ok(RenderedDiagram {
        layout,
        commands,
        svg,
        width: viewport.width,
        height: viewport.height,
    })
}

// === Render ===

/// Result of writing the diagram to a file.
#[derive(Debug, Serialize)]
pub struct RenderResult {
    pub path: PathBuf,
    pub bytes: usize,
    pub boxes: usize,
    pub arrows: usize,
    pub width: f64,
    pub height: f64,
    pub opened: bool,
    pub generated_at: DateTime<Utc>,
}

impl Output for RenderResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Wrote {} boxes and {} arrows to {} ({:.0}x{:.0} px, {} bytes)",
            self.boxes,
            self.arrows,
            self.path.display(),
            self.width,
            self.height,
            self.bytes
        )];
        if self.opened {
            lines.push("Opened in the default viewer".to_string());
        }
        lines.join("\n")
    }
}

/// Render the diagram and return the SVG document.
pub fn render_to_string() -> Result<String> {
    Ok(build_diagram(Some(Utc::now()))?.svg)
}

/// Render the diagram into `path`, creating parent directories as needed.
pub fn render_to_file(path: &Path) -> Result<RenderResult> {
    let generated_at = Utc::now();
    let diagram = build_diagram(Some(generated_at))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &diagram.svg)?;
    tracing::info!("Wrote diagram to {}", path.display());

    Ok(RenderResult {
        path: path.to_path_buf(),
        bytes: diagram.svg.len(),
        boxes: diagram.layout.steps.len(),
        arrows: diagram.layout.arrows.len(),
        width: diagram.width,
        height: diagram.height,
        opened: false,
        generated_at,
    })
}

// === Show ===

/// Render into the configured output directory and open the viewer.
pub fn show(settings: &ResolvedSettings) -> Result<RenderResult> {
    let path = settings.output_dir.value.join(DEFAULT_FILE_NAME);
    let mut result = render_to_file(&path)?;

    if settings.open_viewer.value {
        open_in_viewer(&path)?;
        result.opened = true;
    } else {
        tracing::debug!("Viewer disabled ({})", settings.open_viewer.source);
    }

    Ok(result)
}

fn open_in_viewer(path: &Path) -> Result<()> {
    tracing::info!("Opening {} in the default viewer", path.display());
    open::that(path).map_err(|e| Error::Viewer(format!("{}: {}", path.display(), e)))
}

// === Layout ===

/// One placed box in the layout report.
#[derive(Debug, Serialize)]
pub struct LayoutEntry {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub column: usize,
    pub row: usize,
    pub palette_index: usize,
    pub fill: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Result of the `layout` command.
#[derive(Debug, Serialize)]
pub struct LayoutResult {
    pub title: String,
    pub steps: Vec<LayoutEntry>,
    pub arrows: Vec<ArrowRoute>,
}

impl Output for LayoutResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![self.title.clone(), String::new()];
        lines.push(format!("{} steps:", self.steps.len()));
        for entry in &self.steps {
            lines.push(format!(
                "  {:>2}  col {} row {}  {}  {} - {}",
                entry.index, entry.column, entry.row, entry.fill, entry.title, entry.description
            ));
        }

        lines.push(String::new());
        lines.push(format!("{} arrows:", self.arrows.len()));
        for arrow in &self.arrows {
            let marker = match arrow.kind {
                ArrowKind::Horizontal => "->",
                ArrowKind::Vertical => "v",
            };
            lines.push(format!(
                "  {:>2} {} {:<2}  {}",
                arrow.from,
                marker,
                arrow.to,
                arrow.kind.as_str()
            ));
        }
        lines.join("\n")
    }
}

/// Compute the layout of the flow without rendering it.
pub fn layout() -> Result<LayoutResult> {
    let layout = FlowLayout::with_defaults(&FLOW_STEPS)?;

    let steps = layout
        .steps
        .iter()
        .map(|placed| LayoutEntry {
            index: placed.index,
            title: placed.step.title.to_string(),
            description: placed.step.description.to_string(),
            column: placed.cell.column,
            row: placed.cell.row,
            palette_index: placed.cell.palette_index(),
            fill: theme::palette_color(placed.cell.palette_index()).to_string(),
            x: placed.geometry.origin.x,
            y: placed.geometry.origin.y,
            width: placed.geometry.width,
            height: placed.geometry.height,
        })
        .collect();

    Ok(LayoutResult {
        title: DIAGRAM_TITLE.to_string(),
        steps,
        arrows: layout.arrows,
    })
}

// === Config ===

/// Result of `config show`.
#[derive(Debug, Serialize)]
pub struct ConfigShowResult {
    #[serde(flatten)]
    pub settings: ResolvedSettings,
}

impl Output for ConfigShowResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let s = &self.settings;
        let config_file = s
            .config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        [
            format!("config file:   {}", config_file),
            format!(
                "output-dir:    {} [{}]",
                s.output_dir.value.display(),
                s.output_dir.source
            ),
            format!(
                "open-viewer:   {} [{}]",
                s.open_viewer.value, s.open_viewer.source
            ),
            format!(
                "output-format: {} [{}]",
                s.output_format.value, s.output_format.source
            ),
        ]
        .join("\n")
    }
}

/// Report resolved settings.
pub fn config_show(settings: ResolvedSettings) -> ConfigShowResult {
    ConfigShowResult { settings }
}
