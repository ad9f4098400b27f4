//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstcheck/bstcheck.toml`
//! 3. Local config: `<project_dir>/.bstcheck.toml`
//! 4. Environment variables: `BSTCHECK_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::TokenMode;

/// How a valid tree is drawn after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Box-drawing tree, root at the top
    #[default]
    Tree,
    /// Rotated view: right subtree above, left subtree below
    Sideways,
    /// Do not draw the tree
    None,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Tree => f.write_str("tree"),
            RenderStyle::Sideways => f.write_str("sideways"),
            RenderStyle::None => f.write_str("none"),
        }
    }
}

impl FromStr for RenderStyle {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(RenderStyle::Tree),
            "sideways" => Ok(RenderStyle::Sideways),
            "none" => Ok(RenderStyle::None),
            other => Err(ApplicationError::Config {
                message: format!("unknown render style: {other} (expected tree, sideways or none)"),
            }),
        }
    }
}

/// Tree diagram settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Diagram style for valid trees
    pub style: RenderStyle,
    /// Only draw trees built from at most this many edges
    pub max_edges: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            style: RenderStyle::Tree,
            max_edges: 10,
        }
    }
}

/// Raw render settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub style: Option<RenderStyle>,
    pub max_edges: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub strict_tokens: Option<bool>,
    #[serde(default)]
    pub render: RawRenderSettings,
}

/// Unified configuration for bstcheck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Reject malformed edge tokens instead of skipping them
    pub strict_tokens: bool,
    /// Tree diagram settings
    pub render: RenderSettings,
}

/// Get the XDG config directory for bstcheck.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstcheck").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstcheck.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".bstcheck.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Token handling derived from `strict_tokens`.
    pub fn token_mode(&self) -> TokenMode {
        if self.strict_tokens {
            TokenMode::Strict
        } else {
            TokenMode::Lenient
        }
    }

    /// Overlay wins for every field it specifies.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            strict_tokens: overlay.strict_tokens.unwrap_or(self.strict_tokens),
            render: RenderSettings {
                style: overlay.render.style.unwrap_or(self.render.style),
                max_edges: overlay.render.max_edges.unwrap_or(self.render.max_edges),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.bstcheck.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/bstcheck/bstcheck.toml`
    /// 3. Local config: `<project_dir>/.bstcheck.toml`
    /// 4. Environment variables: `BSTCHECK_*` prefix, `__` between sections
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Load from a single file on top of defaults, ignoring global config and
    /// environment.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Apply BSTCHECK_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("BSTCHECK").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("strict_tokens") {
            settings.strict_tokens = val;
        }
        if let Ok(val) = config.get_string("render.style") {
            settings.render.style = val.parse()?;
        }
        if let Ok(val) = config.get_int("render.max_edges") {
            settings.render.max_edges = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("render.max_edges must not be negative: {val}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bstcheck configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bstcheck/bstcheck.toml
#   Local:  <project_dir>/.bstcheck.toml
#   Env:    BSTCHECK_* environment variables, e.g.
#           BSTCHECK_STRICT_TOKENS=true BSTCHECK_RENDER__STYLE=sideways

# Reject malformed edge tokens such as "(2, 1)" instead of skipping them
# strict_tokens = false

[render]
# Diagram drawn for valid trees: "tree", "sideways" or "none"
# style = "tree"

# Skip the diagram for inputs with more edges than this
# max_edges = 10
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
