//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treenum/treenum.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `TREENUM_DEFAULTS__*`

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::BehaviorOptions;

/// Option values inherited by every behavior that does not set its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Defaults {
    /// View to number: Agile, Scheduled, Bugs or Backlog
    pub view: String,
    /// Custom column receiving the labels
    pub column: String,
    /// Flat or Hierarchical
    pub numbering_style: String,
    /// Comma separated depths that get labels
    pub label_levels: String,
    /// Comma separated depths that never get labels
    pub ignore_levels: String,
    /// Host wraps notifications in batches
    pub buffered_events: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        let options = BehaviorOptions::default();
        Self {
            view: options.view,
            column: options.column,
            numbering_style: options.numbering_style,
            label_levels: options.label_levels,
            ignore_levels: options.ignore_levels,
            buffered_events: options.buffered_events,
        }
    }
}

/// Raw defaults for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDefaults {
    pub view: Option<String>,
    pub column: Option<String>,
    pub numbering_style: Option<String>,
    pub label_levels: Option<String>,
    pub ignore_levels: Option<String>,
    pub buffered_events: Option<bool>,
}

/// One `[[behavior]]` table: a target project plus optional overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BehaviorEntry {
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_levels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_levels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffered_events: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub defaults: RawDefaults,
    #[serde(rename = "behavior")]
    pub behaviors: Option<Vec<BehaviorEntry>>,
}

impl Defaults {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDefaults) -> Self {
        Self {
            view: overlay.view.clone().unwrap_or_else(|| self.view.clone()),
            column: overlay.column.clone().unwrap_or_else(|| self.column.clone()),
            numbering_style: overlay
                .numbering_style
                .clone()
                .unwrap_or_else(|| self.numbering_style.clone()),
            label_levels: overlay
                .label_levels
                .clone()
                .unwrap_or_else(|| self.label_levels.clone()),
            ignore_levels: overlay
                .ignore_levels
                .clone()
                .unwrap_or_else(|| self.ignore_levels.clone()),
            buffered_events: overlay.buffered_events.unwrap_or(self.buffered_events),
        }
    }

    /// Options for `project` using only these defaults.
    pub fn options_for(&self, project: &str) -> BehaviorOptions {
        BehaviorOptions {
            project: project.to_string(),
            view: self.view.clone(),
            column: self.column.clone(),
            numbering_style: self.numbering_style.clone(),
            label_levels: self.label_levels.clone(),
            ignore_levels: self.ignore_levels.clone(),
            buffered_events: self.buffered_events,
        }
    }
}

impl BehaviorEntry {
    /// Fill unset fields from `defaults`.
    pub fn resolve(&self, defaults: &Defaults) -> BehaviorOptions {
        let base = defaults.options_for(&self.project);
        BehaviorOptions {
            view: self.view.clone().unwrap_or(base.view),
            column: self.column.clone().unwrap_or(base.column),
            numbering_style: self.numbering_style.clone().unwrap_or(base.numbering_style),
            label_levels: self.label_levels.clone().unwrap_or(base.label_levels),
            ignore_levels: self.ignore_levels.clone().unwrap_or(base.ignore_levels),
            buffered_events: self.buffered_events.unwrap_or(base.buffered_events),
            project: base.project,
        }
    }
}

/// Unified configuration for treenum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub defaults: Defaults,
    #[serde(rename = "behavior")]
    pub behaviors: Vec<BehaviorEntry>,
}

/// Get the XDG config directory for treenum.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treenum").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treenum.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    parse_raw_settings(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_raw_settings(content: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(content)
}

impl Settings {
    /// Apply global config onto defaults: scalars overlay, a behavior list
    /// replaces the current one.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            defaults: self.defaults.merge(&global.defaults),
            behaviors: global
                .behaviors
                .clone()
                .unwrap_or_else(|| self.behaviors.clone()),
        }
    }

    /// Merge local config: scalars overlay, behaviors are appended.
    fn merge_with(&self, local: &RawSettings) -> Self {
        let mut behaviors = self.behaviors.clone();
        behaviors.extend(local.behaviors.iter().flatten().cloned());
        Self {
            defaults: self.defaults.merge(&local.defaults),
            behaviors,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; it must exist when given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        // 3. Local config
        if let Some(path) = local {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Settings from TOML text alone, on top of compiled defaults.
    pub fn from_toml(content: &str) -> Result<Self, ApplicationError> {
        let raw = parse_raw_settings(content).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Apply TREENUM_DEFAULTS__* environment variables to the defaults.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TREENUM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("defaults.view") {
            settings.defaults.view = val;
        }
        if let Ok(val) = config.get_string("defaults.column") {
            settings.defaults.column = val;
        }
        if let Ok(val) = config.get_string("defaults.numbering_style") {
            settings.defaults.numbering_style = val;
        }
        if let Ok(val) = config.get_string("defaults.label_levels") {
            settings.defaults.label_levels = val;
        }
        if let Ok(val) = config.get_string("defaults.ignore_levels") {
            settings.defaults.ignore_levels = val;
        }
        if let Ok(val) = config.get_bool("defaults.buffered_events") {
            settings.defaults.buffered_events = val;
        }

        Ok(settings)
    }

    /// Raw options of every configured behavior.
    pub fn behavior_options(&self) -> Vec<BehaviorOptions> {
        self.behaviors
            .iter()
            .map(|entry| entry.resolve(&self.defaults))
            .collect()
    }

    /// Options for `project`: its configured behavior if any, else the defaults.
    pub fn options_for(&self, project: &str) -> BehaviorOptions {
        self.behaviors
            .iter()
            .find(|entry| entry.project == project)
            .map(|entry| entry.resolve(&self.defaults))
            .unwrap_or_else(|| self.defaults.options_for(project))
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treenum configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treenum/treenum.toml
#   Local:  file passed with --config (behaviors are added to the global ones)
#   Env:    TREENUM_DEFAULTS__<FIELD> environment variables

[defaults]
# View to number: Agile, Scheduled, Bugs or Backlog
# view = "Backlog"

# Custom column that receives the labels
# column = "Rank"

# Flat ("1", "2") or Hierarchical ("1.2.3")
# numbering_style = "Flat"

# Only these depths get labels (top level is 1). Wins over ignore_levels.
# label_levels = "1,2"

# These depths never get labels
# ignore_levels = "3"

# Host delivers changes in batches; renumber once per batch
# buffered_events = true

# [[behavior]]
# project = "Galaxy"
# numbering_style = "Hierarchical"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert_eq!(settings.defaults.column, "Rank");
        assert!(settings.behaviors.is_empty());
    }

    #[test]
    fn given_entry_without_overrides_when_resolving_then_inherits_defaults() {
        let defaults = Defaults {
            numbering_style: "Hierarchical".into(),
            ..Defaults::default()
        };
        let entry = BehaviorEntry {
            project: "Galaxy".into(),
            column: Some("WBS".into()),
            ..BehaviorEntry::default()
        };

        let options = entry.resolve(&defaults);

        assert_eq!(options.project, "Galaxy");
        assert_eq!(options.column, "WBS");
        assert_eq!(options.numbering_style, "Hierarchical");
        assert_eq!(options.view, "Backlog");
        assert!(options.buffered_events);
    }

    #[test]
    fn given_global_behaviors_when_applying_then_replaces_list() {
        let base = Settings {
            defaults: Defaults::default(),
            behaviors: vec![BehaviorEntry {
                project: "Old".into(),
                ..BehaviorEntry::default()
            }],
        };
        let global = parse_raw_settings("[[behavior]]\nproject = \"New\"\n").unwrap();

        let result = base.apply_global(&global);

        assert_eq!(result.behaviors.len(), 1);
        assert_eq!(result.behaviors[0].project, "New");
    }

    #[test]
    fn given_local_behaviors_when_merging_then_appends() {
        let base = Settings::from_toml("[[behavior]]\nproject = \"A\"\n").unwrap();
        let local = parse_raw_settings(
            "[defaults]\ncolumn = \"WBS\"\n[[behavior]]\nproject = \"B\"\n",
        )
        .unwrap();

        let result = base.merge_with(&local);

        let projects: Vec<&str> = result.behaviors.iter().map(|b| b.project.as_str()).collect();
        assert_eq!(projects, vec!["A", "B"]);
        assert_eq!(result.defaults.column, "WBS");
    }

    #[test]
    fn given_settings_when_serializing_then_round_trips() {
        let settings = Settings::from_toml(
            "[defaults]\nlabel_levels = \"1,3\"\n[[behavior]]\nproject = \"Galaxy\"\nview = \"Agile\"\n",
        )
        .unwrap();

        let text = settings.to_toml().unwrap();

        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let settings = Settings::from_toml(&Settings::template()).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
