//! Rank label construction.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::options::NUMBERING_STYLE;

/// Separator appended after each rank when building hierarchical paths.
pub const PATH_SEPARATOR: char = '.';

/// How a rank is turned into label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberingStyle {
    /// Sibling rank only: "1", "2", ...
    #[default]
    Flat,
    /// Ancestor path plus rank: "2.1.3"
    Hierarchical,
}

impl NumberingStyle {
    /// Label for the `rank`-th child (1-based) under a parent whose
    /// accumulated path is `path` (already ending in a separator, or empty).
    pub fn rank_label(self, path: &str, rank: usize) -> String {
        match self {
            NumberingStyle::Flat => rank.to_string(),
            NumberingStyle::Hierarchical => format!("{path}{rank}"),
        }
    }

    /// Parse an optional option value; missing or blank means Flat.
    pub fn from_option(value: Option<&str>) -> Result<Self, DomainError> {
        match value.map(str::trim) {
            None | Some("") => Ok(NumberingStyle::Flat),
            Some(v) => v.parse(),
        }
    }
}

/// Path prefix handed to the children of the `rank`-th child.
pub fn child_path(path: &str, rank: usize) -> String {
    format!("{path}{rank}{PATH_SEPARATOR}")
}

impl FromStr for NumberingStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Flat" => Ok(NumberingStyle::Flat),
            "Hierarchical" => Ok(NumberingStyle::Hierarchical),
            other => Err(DomainError::UnsupportedValue {
                option: NUMBERING_STYLE,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for NumberingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberingStyle::Flat => f.write_str("Flat"),
            NumberingStyle::Hierarchical => f.write_str("Hierarchical"),
        }
    }
}
