//! Plain-text outline format.
//!
//! ```text
//! # comment
//! Epic A | 1
//!   Story one | 1.1
//!   Story two
//! Epic B
//! ```
//!
//! Two spaces of indentation per depth, optional ` | label` suffix. A bare
//! `|` inside a title is kept; a title that itself contains ` | ` is written
//! with a trailing ` |` so it reads back unchanged.

use crate::domain::error::{DomainError, DomainResult};

pub const INDENT: &str = "  ";
pub const LABEL_SEPARATOR: &str = " | ";

/// One node line of an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// 1-based source line
    pub line: usize,
    /// 1-based depth (top-level items are depth 1)
    pub depth: usize,
    pub title: String,
    pub label: String,
}

/// Parse outline text into entries in document order.
pub fn parse_outline(content: &str) -> DomainResult<Vec<OutlineEntry>> {
    let mut entries: Vec<OutlineEntry> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let body = line.trim_start_matches(' ');
        if body.starts_with('\t') {
            return Err(invalid(line_no, "tab indentation"));
        }
        let indent = line.len() - body.len();
        if indent % INDENT.len() != 0 {
            return Err(invalid(line_no, format!("odd indentation of {indent} spaces")));
        }
        let depth = indent / INDENT.len() + 1;
        let previous = entries.last().map(|e| e.depth).unwrap_or(0);
        if depth > previous + 1 {
            return Err(invalid(
                line_no,
                format!("depth {depth} follows depth {previous}"),
            ));
        }

        let body = body.trim_end();
        let (title, label) = match body.strip_suffix(LABEL_SEPARATOR.trim_end()) {
            Some(title) => (title.trim_end(), ""),
            None => match body.rsplit_once(LABEL_SEPARATOR) {
                Some((title, label)) => (title.trim_end(), label.trim()),
                None => (body, ""),
            },
        };
        if title.is_empty() {
            return Err(invalid(line_no, "missing title"));
        }

        entries.push(OutlineEntry {
            line: line_no,
            depth,
            title: title.to_string(),
            label: label.to_string(),
        });
    }

    Ok(entries)
}

/// Format a single outline line.
pub fn format_entry(depth: usize, title: &str, label: &str) -> String {
    let indent = INDENT.repeat(depth.saturating_sub(1));
    if label.is_empty() && title.contains(LABEL_SEPARATOR) {
        format!("{indent}{title}{}", LABEL_SEPARATOR.trim_end())
    } else if label.is_empty() {
        format!("{indent}{title}")
    } else {
        format!("{indent}{title}{LABEL_SEPARATOR}{label}")
    }
}

fn invalid(line: usize, message: impl Into<String>) -> DomainError {
    DomainError::InvalidOutline {
        line,
        message: message.into(),
    }
}
