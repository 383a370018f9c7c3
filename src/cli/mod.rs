//! CLI argument definitions for vlsi-flow.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;

/// Version string with build information, shown by `--version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("VLSI_FLOW_GIT_COMMIT"),
    ", built ",
    env!("VLSI_FLOW_BUILD_TIMESTAMP"),
    ")"
);

/// vlsi-flow - Render the modern VLSI chip design flow.
///
/// With no subcommand, renders the diagram and opens it in the default viewer.
#[derive(Parser, Debug)]
#[command(name = "vlsi-flow")]
#[command(author, version, long_version = LONG_VERSION, about = "Render the modern VLSI chip design flow as a diagram", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Read settings from this config.kdl instead of the default location.
    /// The file must exist.
    #[arg(long = "config", global = true, env = "VLSI_FLOW_CONFIG")]
    pub config_path: Option<PathBuf>,

    /// Directory to write the rendered diagram to
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Do not open the rendered diagram in a viewer
    #[arg(long, global = true)]
    pub no_open: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings supplied on the command line, for precedence resolution.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config_path.clone(),
            output_dir: self.output_dir.clone(),
            no_open: self.no_open,
            human: self.human_readable,
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the diagram and open it in the default viewer (default)
    Show,

    /// Render the diagram to a file or stdout without opening a viewer
    Render {
        /// File to write (defaults to the output directory)
        #[arg(short = 'o', long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the SVG document to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print the grid layout: cells, fills and arrows
    Layout,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved settings and where each one came from
    Show,
}
