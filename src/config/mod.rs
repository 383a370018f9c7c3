//! Configuration for vlsi-flow.
//!
//! The diagram itself is fixed; configuration only covers presentation.
//!
//! ## config.kdl
//!
//! Located at `~/.config/vlsi-flow/config.kdl` (platform config directory),
//! or wherever `--config` / `VLSI_FLOW_CONFIG` points.
//!
//! Contains:
//! - `output-dir` - Where `show` writes the rendered SVG
//! - `open-viewer` - Whether `show` opens the SVG in the default viewer
//! - `output-format` - "json" or "human"
//!
//! ## Precedence
//!
//! CLI flag > config file > defaults
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    CONFIG_PATH_ENV, ConfigOverrides, Resolved, ResolvedSettings, ValueSource,
    default_config_path, default_output_dir, load_config, resolve_settings,
    resolve_settings_with_default,
};
pub use schema::{CONFIG_FILE_NAME, FlowConfig, OutputFormat};
