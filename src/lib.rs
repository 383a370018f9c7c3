//! vlsi-flow - renders the modern VLSI chip design flow as a diagram.
//!
//! This library provides the core functionality for the `vlsi-flow` CLI:
//! the fixed table of design stages, the grid layout that places them, the
//! render commands that draw them, and an SVG backend.

pub mod cli;
pub mod commands;
pub mod config;
pub mod diagram;
pub mod models;

/// Library-level error type for vlsi-flow operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] kdl::KdlError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Too many steps for the grid: {steps} steps, {capacity} cells")]
    GridOverflow { steps: usize, capacity: usize },

    #[error("Failed to format SVG output")]
    Format(#[from] std::fmt::Error),

    #[error("Failed to open viewer: {0}")]
    Viewer(String),
}

/// Result type alias for vlsi-flow operations.
pub type Result<T> = std::result::Result<T, Error>;
