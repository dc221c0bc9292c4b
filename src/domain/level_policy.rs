//! Per-depth label/ignore decisions.
//!
//! Depths are 1-based: the children of the tree root sit at depth 1.

use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::options::{IGNORE_LEVELS, LABEL_LEVELS};

/// Deepest level a level list may name.
pub const MAX_LEVEL: usize = 1024;

/// Which depths receive labels, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelConfig {
    /// No level options: every depth is labeled.
    #[default]
    Default,
    /// Only the listed depths are labeled.
    Label(Vec<usize>),
    /// Every depth except the listed ones is labeled.
    Ignore(Vec<usize>),
}

impl LevelConfig {
    /// Combine the two optional level lists. An explicit label list takes
    /// precedence and the ignore list is left unused.
    pub fn from_lists(label: Option<Vec<usize>>, ignore: Option<Vec<usize>>) -> Self {
        match (label, ignore) {
            (Some(label), ignore) => {
                if ignore.is_some() {
                    debug!("LabelLevels and IgnoreLevels both given, using LabelLevels");
                }
                LevelConfig::Label(label)
            }
            (None, Some(ignore)) => LevelConfig::Ignore(ignore),
            (None, None) => LevelConfig::Default,
        }
    }
}

/// `array[i]` is true iff depth `i + 1` appears in `levels`.
/// The array is as long as the largest level.
pub fn build_level_array(option: &'static str, levels: &[usize]) -> DomainResult<Vec<bool>> {
    if let Some(&level) = levels.iter().find(|&&l| l == 0 || l > MAX_LEVEL) {
        return Err(DomainError::LevelOutOfRange {
            option,
            level: i64::try_from(level).unwrap_or(i64::MAX),
        });
    }
    let max = levels.iter().copied().max().ok_or(DomainError::EmptyLevelList)?;
    let mut array = vec![false; max];
    for &level in levels {
        array[level - 1] = true;
    }
    Ok(array)
}

/// Parse a comma separated level option such as `"1, 3"`.
///
/// Blank text means the option is not configured and yields `None`.
pub fn parse_level_list(option: &'static str, text: &str) -> DomainResult<Option<Vec<usize>>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let mut levels = Vec::new();
    for entry in text.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(DomainError::EmptyLevelEntry {
                option,
                value: text.to_string(),
            });
        }
        let level: i64 = entry.parse().map_err(|_| DomainError::InvalidLevelEntry {
            option,
            entry: entry.to_string(),
        })?;
        let level = usize::try_from(level)
            .ok()
            .filter(|l| (1..=MAX_LEVEL).contains(l))
            .ok_or(DomainError::LevelOutOfRange { option, level })?;
        levels.push(level);
    }
    Ok(Some(levels))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    All,
    Label,
    Ignore,
}

/// Decision procedure built once from a [`LevelConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPolicy {
    mode: Mode,
    levels: Vec<bool>,
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::all()
    }
}

impl LevelPolicy {
    /// Every depth is a label level.
    pub fn all() -> Self {
        Self {
            mode: Mode::All,
            levels: Vec::new(),
        }
    }

    pub fn from_config(config: &LevelConfig) -> DomainResult<Self> {
        match config {
            LevelConfig::Default => Ok(Self::all()),
            LevelConfig::Label(levels) => Ok(Self {
                mode: Mode::Label,
                levels: build_level_array(LABEL_LEVELS, levels)?,
            }),
            LevelConfig::Ignore(levels) => Ok(Self {
                mode: Mode::Ignore,
                levels: build_level_array(IGNORE_LEVELS, levels)?,
            }),
        }
    }

    /// Whether siblings at `depth` get numbered.
    ///
    /// Beyond the deepest listed level, label lists default to "not labeled"
    /// and ignore lists default to "labeled".
    pub fn is_label_level(&self, depth: usize) -> bool {
        let stored = depth.checked_sub(1).and_then(|i| self.levels.get(i)).copied();
        match self.mode {
            Mode::All => true,
            Mode::Label => stored.unwrap_or(false),
            Mode::Ignore => stored.map(|ignored| !ignored).unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unsorted_levels_when_building_then_length_is_max() {
        let array = build_level_array(LABEL_LEVELS, &[3, 1]).unwrap();
        assert_eq!(array, vec![true, false, true]);
    }

    #[test]
    fn given_empty_levels_when_building_then_errors() {
        assert_eq!(
            build_level_array(LABEL_LEVELS, &[]),
            Err(DomainError::EmptyLevelList)
        );
    }

    #[test]
    fn given_zero_level_when_building_then_names_option() {
        assert_eq!(
            build_level_array(IGNORE_LEVELS, &[0, 2]),
            Err(DomainError::LevelOutOfRange {
                option: IGNORE_LEVELS,
                level: 0
            })
        );
    }

    #[test]
    fn given_level_beyond_max_when_building_then_errors_without_allocating() {
        let err = LevelPolicy::from_config(&LevelConfig::Label(vec![usize::MAX])).unwrap_err();
        assert_eq!(
            err,
            DomainError::LevelOutOfRange {
                option: LABEL_LEVELS,
                level: i64::MAX
            }
        );
    }

    #[test]
    fn given_spaced_list_when_parsing_then_trims_entries() {
        assert_eq!(
            parse_level_list("LabelLevels", " 1, 3 ").unwrap(),
            Some(vec![1, 3])
        );
        assert_eq!(parse_level_list("LabelLevels", "   ").unwrap(), None);
    }

    #[test]
    fn given_bad_entries_when_parsing_then_names_option() {
        assert_eq!(
            parse_level_list("IgnoreLevels", "1,,2").unwrap_err(),
            DomainError::EmptyLevelEntry {
                option: "IgnoreLevels",
                value: "1,,2".into()
            }
        );
        assert_eq!(
            parse_level_list("IgnoreLevels", "1,x").unwrap_err(),
            DomainError::InvalidLevelEntry {
                option: "IgnoreLevels",
                entry: "x".into()
            }
        );
        assert_eq!(
            parse_level_list("LabelLevels", "-2").unwrap_err(),
            DomainError::LevelOutOfRange {
                option: "LabelLevels",
                level: -2
            }
        );
    }

    #[test]
    fn given_depth_zero_when_querying_then_uses_out_of_range_default() {
        let policy = LevelPolicy::from_config(&LevelConfig::Label(vec![1])).unwrap();
        assert!(!policy.is_label_level(0));
    }
}
