//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the KDL schema
//! - Parsing from a KDL document
//! - Validation

use std::path::PathBuf;

use kdl::KdlDocument;
use serde::{Deserialize, Serialize};

/// File name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.kdl";

/// Output format preference for CLI reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation preferences stored in config.kdl.
///
/// None of these change what the diagram looks like; they only decide where
/// it is written, whether a viewer is opened, and how reports are printed.
///
/// # KDL Schema
///
/// ```kdl
/// output-dir "/home/me/diagrams"
/// open-viewer #false
/// output-format "human"  // or "json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Directory the rendered SVG is written to by `show`
    pub output_dir: Option<PathBuf>,

    /// Whether `show` opens the SVG in the platform viewer
    pub open_viewer: Option<bool>,

    /// Default output format for reports
    pub output_format: Option<OutputFormat>,
}

impl FlowConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref dir) = self.output_dir {
            if dir.as_os_str().is_empty() {
                return Err("output-dir must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    ///
    /// Unknown nodes and values of the wrong type are ignored.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        if let Some(s) = first_string(doc, "output-dir") {
            config.output_dir = Some(PathBuf::from(s));
        }

        if let Some(node) = doc.get("open-viewer") {
            if let Some(entry) = node.entries().first() {
                config.open_viewer = entry.value().as_bool();
            }
        }

        if let Some(s) = first_string(doc, "output-format") {
            config.output_format = OutputFormat::parse(s);
        }

        config
    }
}

/// First argument of `name` as a string, if present
fn first_string<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a str> {
    doc.get(name)?.entries().first()?.value().as_string()
}
