//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (`RenderOptions::DEFAULT`)
//! 2. Global config: `$XDG_CONFIG_HOME/treeline/treeline.toml`
//! 3. Local config: `--config <FILE>` or `./.treeline.toml`
//! 4. Environment variables: `TREELINE_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{SettingsError, SettingsResult};
use crate::glyphs::Charset;
use crate::render::RenderOptions;

const ENV_PREFIX: &str = "TREELINE";

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".treeline.toml";

/// Raw render options for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderOptions {
    pub charset: Option<Charset>,
    pub trailing_dir_slash: Option<bool>,
    pub full_path: Option<bool>,
    pub root_dot: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderOptions,
}

impl RenderOptions {
    /// Overlay wins where it specifies a value, otherwise keep self.
    pub fn merge(&self, overlay: &RawRenderOptions) -> Self {
        Self {
            charset: overlay.charset.unwrap_or(self.charset),
            trailing_dir_slash: overlay.trailing_dir_slash.unwrap_or(self.trailing_dir_slash),
            full_path: overlay.full_path.unwrap_or(self.full_path),
            root_dot: overlay.root_dot.unwrap_or(self.root_dot),
        }
    }
}

/// Unified configuration for treeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default render options
    pub render: RenderOptions,
}

/// Get the XDG config directory for treeline.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeline").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeline.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: self.render.merge(&overlay.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// `config_file` is an explicit local config and must exist. Without it,
    /// `./.treeline.toml` is used when present.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        let local_path = match config_file {
            Some(path) if !path.exists() => {
                return Err(SettingsError::MissingFile(path.to_path_buf()))
            }
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .map(|dir| local_config_path(&dir))
                .filter(|path| path.exists()),
        };
        if let Some(path) = local_path {
            debug!("loading local config {}", path.display());
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        Self::apply_env_overrides(current, None)
    }

    /// Apply `TREELINE_RENDER__*` environment variables as explicit overrides.
    ///
    /// `vars` replaces the process environment when given.
    pub fn apply_env_overrides(
        mut settings: Self,
        vars: Option<HashMap<String, String>>,
    ) -> SettingsResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("render.charset") {
            settings.render.charset = val.parse().map_err(|e| SettingsError::Config {
                message: format!("{ENV_PREFIX}_RENDER__CHARSET: {e}"),
            })?;
        }
        if let Some(val) = get_flag(&config, "render.trailing_dir_slash")? {
            settings.render.trailing_dir_slash = val;
        }
        if let Some(val) = get_flag(&config, "render.full_path")? {
            settings.render.full_path = val;
        }
        if let Some(val) = get_flag(&config, "render.root_dot")? {
            settings.render.root_dot = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SettingsResult<String> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treeline configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treeline/treeline.toml
#   Local:  ./.treeline.toml or --config <FILE>
#   Env:    TREELINE_RENDER__<FIELD>, e.g. TREELINE_RENDER__CHARSET=ascii
#   Flags:  --charset, --trailing-slash, --full-path, --no-root-dot, ...

[render]
# Connector glyphs: "unicode" (box drawing) or "ascii"
# charset = "unicode"

# Append "/" to entries that have children
# trailing_dir_slash = false

# Show every entry with the names of its ancestors
# full_path = false

# Draw the "." root line
# root_dot = true
"#
        .to_string()
    }
}

/// Missing keys are `None`; present but malformed values are errors.
fn get_flag(config: &Config, key: &str) -> SettingsResult<Option<bool>> {
    match config.get_bool(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}
