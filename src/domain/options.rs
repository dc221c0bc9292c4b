//! Behavior options: raw text as configured, and the validated form.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ViewKind;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::level_policy::{parse_level_list, LevelConfig, LevelPolicy};
use crate::domain::numbering::NumberingStyle;

pub const PROJECT: &str = "HansoftProject";
pub const VIEW: &str = "View";
pub const COLUMN_NAME: &str = "ColumnName";
pub const NUMBERING_STYLE: &str = "NumberingStyle";
pub const LABEL_LEVELS: &str = "LabelLevels";
pub const IGNORE_LEVELS: &str = "IgnoreLevels";

/// Options of one numbering behavior, exactly as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BehaviorOptions {
    pub project: String,
    pub view: String,
    pub column: String,
    pub numbering_style: String,
    pub label_levels: String,
    pub ignore_levels: String,
    pub buffered_events: bool,
}

impl Default for BehaviorOptions {
    fn default() -> Self {
        Self {
            project: String::new(),
            view: ViewKind::Backlog.as_str().to_string(),
            column: "Rank".to_string(),
            numbering_style: NumberingStyle::Flat.to_string(),
            label_levels: String::new(),
            ignore_levels: String::new(),
            buffered_events: true,
        }
    }
}

/// Validated behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    pub project: String,
    pub view: ViewKind,
    pub column: String,
    pub style: NumberingStyle,
    pub levels: LevelConfig,
    pub buffered_events: bool,
}

impl BehaviorConfig {
    /// Validate raw options. Fails on the first offending option.
    ///
    /// Both level lists are checked even though only one of them is used.
    pub fn parse(options: &BehaviorOptions) -> DomainResult<Self> {
        let project = required(PROJECT, &options.project)?;
        let view: ViewKind = options.view.parse()?;
        let column = required(COLUMN_NAME, &options.column)?;
        let style = NumberingStyle::from_option(Some(&options.numbering_style))?;
        let label = parse_level_list(LABEL_LEVELS, &options.label_levels)?;
        let ignore = parse_level_list(IGNORE_LEVELS, &options.ignore_levels)?;
        let levels = LevelConfig::from_lists(label, ignore);

        Ok(Self {
            project,
            view,
            column,
            style,
            levels,
            buffered_events: options.buffered_events,
        })
    }

    pub fn policy(&self) -> DomainResult<LevelPolicy> {
        LevelPolicy::from_config(&self.levels)
    }

    /// Human readable name used in logs and reports.
    pub fn title(&self) -> String {
        format!("NumberBehavior: {}/{}/{}", self.project, self.view, self.column)
    }
}

fn required(option: &'static str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingOption { option });
    }
    Ok(value.to_string())
}
