//! Precedence resolution for presentation settings.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (`--output-dir`, `--no-open`, `-H`)
//! 2. config.kdl (`--config` / `VLSI_FLOW_CONFIG`, else `~/.config/vlsi-flow/config.kdl`)
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use kdl::KdlDocument;
use serde::{Serialize, Serializer};

use crate::config::{CONFIG_FILE_NAME, FlowConfig, OutputFormat};
use crate::{Error, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "VLSI_FLOW_CONFIG";

/// Directory name used under the platform config and cache directories.
const APP_DIR: &str = "vlsi-flow";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from a config file
    ConfigFile(PathBuf),
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::ConfigFile(path) => write!(f, "config:{}", path.display()),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file; must exist when set
    pub config_path: Option<PathBuf>,
    /// Output directory for `show`
    pub output_dir: Option<PathBuf>,
    /// `--no-open` was passed
    pub no_open: bool,
    /// `-H` was passed
    pub human: bool,
}

/// Fully resolved settings with source tracking.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSettings {
    /// Config file that was read, if any
    pub config_path: Option<PathBuf>,
    pub output_dir: Resolved<PathBuf>,
    pub open_viewer: Resolved<bool>,
    pub output_format: Resolved<OutputFormat>,
}

impl ResolvedSettings {
    /// Whether reports should be human-readable
    pub fn human(&self) -> bool {
        self.output_format.value == OutputFormat::Human
    }
}

/// Default location of config.kdl, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// Default directory for rendered diagrams.
pub fn default_output_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<FlowConfig> {
    let content = fs::read_to_string(path)?;
    let doc: KdlDocument = content.parse()?;
    let config = FlowConfig::from_kdl(&doc);
    config
        .validate()
        .map_err(|msg| Error::InvalidConfig(format!("{}: {}", path.display(), msg)))?;
    Ok(config)
}

/// Resolve settings using the platform default config location.
pub fn resolve_settings(overrides: &ConfigOverrides) -> Result<ResolvedSettings> {
    resolve_settings_with_default(overrides, default_config_path().as_deref())
}

/// Resolve settings, falling back to `default_path` when no config file was
/// given explicitly. A missing default file is not an error.
pub fn resolve_settings_with_default(
    overrides: &ConfigOverrides,
    default_path: Option<&Path>,
) -> Result<ResolvedSettings> {
    let config_path = match (&overrides.config_path, default_path) {
        (Some(explicit), _) => {
            if !explicit.is_file() {
                return Err(Error::InvalidConfig(format!(
                    "config file not found: {}",
                    explicit.display()
                )));
            }
            Some(explicit.clone())
        }
        (None, Some(default)) if default.is_file() => Some(default.to_path_buf()),
        _ => None,
    };

    let config = match &config_path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => FlowConfig::default(),
    };
    let file_source = || match &config_path {
        Some(path) => ValueSource::ConfigFile(path.clone()),
        None => ValueSource::Default,
    };

    let output_dir = if let Some(ref dir) = overrides.output_dir {
        Resolved::new(dir.clone(), ValueSource::CliFlag)
    } else if let Some(ref dir) = config.output_dir {
        Resolved::new(dir.clone(), file_source())
    } else {
        Resolved::new(default_output_dir(), ValueSource::Default)
    };

    let open_viewer = if overrides.no_open {
        Resolved::new(false, ValueSource::CliFlag)
    } else if let Some(open) = config.open_viewer {
        Resolved::new(open, file_source())
    } else {
        Resolved::new(true, ValueSource::Default)
    };

    let output_format = if overrides.human {
        Resolved::new(OutputFormat::Human, ValueSource::CliFlag)
    } else if let Some(format) = config.output_format {
        Resolved::new(format, file_source())
    } else {
        Resolved::new(OutputFormat::default(), ValueSource::Default)
    };

    Ok(ResolvedSettings {
        config_path,
        output_dir,
        open_viewer,
        output_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.kdl");
        let settings =
            resolve_settings_with_default(&ConfigOverrides::default(), Some(&missing)).unwrap();

        assert!(settings.config_path.is_none());
        assert_eq!(settings.output_dir.value, default_output_dir());
        assert_eq!(settings.output_dir.source, ValueSource::Default);
        assert!(settings.open_viewer.value);
        assert_eq!(settings.output_format.value, OutputFormat::Json);
        assert!(!settings.human());
    }

    #[test]
    fn test_default_file_is_used() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "open-viewer #false\noutput-format \"human\"\n");
        let settings =
            resolve_settings_with_default(&ConfigOverrides::default(), Some(&path)).unwrap();

        assert_eq!(settings.config_path.as_deref(), Some(path.as_path()));
        assert!(!settings.open_viewer.value);
        assert_eq!(
            settings.open_viewer.source,
            ValueSource::ConfigFile(path.clone())
        );
        assert!(settings.human());
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "output-dir \"/from/config\"\nopen-viewer #true\noutput-format \"json\"\n",
        );
        let overrides = ConfigOverrides {
            config_path: Some(path),
            output_dir: Some(PathBuf::from("/from/cli")),
            no_open: true,
            human: true,
        };
        let settings = resolve_settings_with_default(&overrides, None).unwrap();

        assert_eq!(settings.output_dir.value, PathBuf::from("/from/cli"));
        assert_eq!(settings.output_dir.source, ValueSource::CliFlag);
        assert!(!settings.open_viewer.value);
        assert_eq!(settings.open_viewer.source, ValueSource::CliFlag);
        assert_eq!(settings.output_format.value, OutputFormat::Human);
    }

    #[test]
    fn test_explicit_config_wins_over_default() {
        let dir = TempDir::new().unwrap();
        let default = write_config(&dir, "output-dir \"/default\"\n");
        let explicit = dir.path().join("explicit.kdl");
        fs::write(&explicit, "output-dir \"/explicit\"\n").unwrap();

        let overrides = ConfigOverrides {
            config_path: Some(explicit.clone()),
            ..Default::default()
        };
        let settings = resolve_settings_with_default(&overrides, Some(&default)).unwrap();

        assert_eq!(settings.output_dir.value, PathBuf::from("/explicit"));
        assert_eq!(settings.output_dir.source, ValueSource::ConfigFile(explicit));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_path: Some(dir.path().join("nope.kdl")),
            ..Default::default()
        };
        let result = resolve_settings_with_default(&overrides, None);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "output-dir \"unterminated\n");
        let result = load_config(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_config_value_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "output-dir \"\"\n");
        let result = load_config(&path);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_value_source_display() {
        assert_eq!(ValueSource::CliFlag.to_string(), "cli");
        assert_eq!(ValueSource::Default.to_string(), "default");
        assert_eq!(
            ValueSource::ConfigFile(PathBuf::from("/x/config.kdl")).to_string(),
            "config:/x/config.kdl"
        );
    }

    #[test]
    fn test_resolved_settings_serialize() {
        let settings = resolve_settings_with_default(
            &ConfigOverrides {
                no_open: true,
                ..Default::default()
            },
            None,
        )
        .unwrap();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["open_viewer"]["value"], false);
        assert_eq!(json["open_viewer"]["source"], "cli");
        assert_eq!(json["output_format"]["value"], "json");
    }
}
