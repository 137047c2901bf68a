//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `FAMTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{EquivalenceRule, Language};
use crate::util::path::expand_env_vars;

/// Extra name equivalence class, applied after the built-in rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasConfig {
    /// Spelling every variant is rewritten to
    pub canonical: String,
    /// Spellings rewritten to `canonical`, tried in order
    pub variants: Vec<String>,
}

impl AliasConfig {
    /// Merge variant lists keeping first-seen order.
    ///
    /// - Items from overlay are appended to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are dropped
    ///
    /// # Examples
    /// ```ignore
    /// merge_variants(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_variants(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_variants(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        for item in base {
            if !result.contains(item) {
                result.push(item.clone());
            }
        }
        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.retain(|v| v != negated);
            } else if !result.contains(pattern) {
                result.push(pattern.clone());
            }
        }
        result
    }

    /// Union overlay aliases into base, matching entries by canonical spelling.
    ///
    /// An entry whose variants end up empty is dropped.
    pub fn merge_all(base: &[AliasConfig], overlay: &[AliasConfig]) -> Vec<AliasConfig> {
        let mut result = base.to_vec();
        for alias in overlay {
            match result.iter_mut().find(|a| a.canonical == alias.canonical) {
                Some(existing) => {
                    existing.variants = Self::merge_variants(&existing.variants, &alias.variants);
                }
                None => result.push(AliasConfig {
                    canonical: alias.canonical.clone(),
                    variants: Self::merge_variants(&[], &alias.variants),
                }),
            }
        }
        result.retain(|a| !a.variants.is_empty());
        result
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub language: Option<Language>,
    pub base_url: Option<String>,
    pub asset_dir: Option<String>,
    pub aliases: Option<Vec<AliasConfig>>,
}

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree data file (.json or .toml); bundled sample when unset
    pub data_file: Option<PathBuf>,
    /// Label language
    pub language: Language,
    /// Prefix for photo URLs (default: "/")
    pub base_url: String,
    /// Directory under `base_url` holding photos (default: "optimized")
    pub asset_dir: String,
    /// Extra name equivalence classes
    pub aliases: Vec<AliasConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            language: Language::English,
            base_url: "/".into(),
            asset_dir: "optimized".into(),
            aliases: Vec::new(),
        }
    }
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
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
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(data_file) = &self.data_file {
            let expanded = expand_env_vars(data_file.to_string_lossy().as_ref());
            self.data_file = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay scalars replace; aliases union by canonical spelling.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay.data_file.clone().or_else(|| self.data_file.clone()),
            language: overlay.language.unwrap_or(self.language),
            base_url: overlay
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            asset_dir: overlay
                .asset_dir
                .clone()
                .unwrap_or_else(|| self.asset_dir.clone()),
            aliases: overlay
                .aliases
                .as_ref()
                .map(|o| AliasConfig::merge_all(&self.aliases, o))
                .unwrap_or_else(|| self.aliases.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file given on the command line
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
    /// 3. Local config (aliases UNION with global)
    /// 4. Environment variables: `FAMTREE_*` prefix (scalars only)
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(local_path) = local {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FAMTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("language") {
            settings.language = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("base_url") {
            settings.base_url = val;
        }
        if let Ok(val) = config.get_string("asset_dir") {
            settings.asset_dir = val;
        }

        Ok(settings)
    }

    /// Apply command-line overrides on top of loaded settings.
    ///
    /// The data file goes through the same tilde and variable expansion as
    /// the configured value, since clap also fills it from `FAMTREE_DATA_FILE`.
    pub fn with_overrides(mut self, data_file: Option<&Path>, language: Option<Language>) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = Some(data_file.to_path_buf());
            self.expand_paths();
        }
        if let Some(language) = language {
            self.language = language;
        }
        self
    }

    /// Configured aliases as normalizer rules.
    pub fn alias_rules(&self) -> Vec<EquivalenceRule> {
        self.aliases
            .iter()
            .map(|a| EquivalenceRule::new(a.canonical.clone(), a.variants.iter().cloned()))
            .collect()
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# famtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/famtree/famtree.toml
#   Local:  file passed with --config
#   Env:    FAMTREE_* environment variables (data_file, language, base_url, asset_dir)
#
# Aliases from the local file UNION with global ones sharing the same canonical
# spelling. Use "!variant" in the local file to REMOVE an inherited variant.

# Tree data file (.json or .toml); the bundled sample family is used when unset
# data_file = "~/family/family.json"

# Label language: "english" or "gujarati"
# language = "english"

# Photo URLs are <base_url><asset_dir>/<photo>
# base_url = "/"
# asset_dir = "optimized"

# Extra spellings treated as the same name (applied after mit/meet and hemi/hemangini)
# [[aliases]]
# canonical = "bhai"
# variants = ["bhai", "bhae"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
