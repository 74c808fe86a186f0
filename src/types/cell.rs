use serde::{Deserialize, Serialize};

use super::StyleRef;

/// A single cell: formatted display text, the value's type, and its style.
///
/// The display text arrives pre-formatted (number formatting is the parsing
/// collaborator's job); the kind drives default alignment.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Formatted display text; may span multiple lines.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub kind: CellKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleRef>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            kind: CellKind::Text,
            style: None,
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            kind: CellKind::Number,
            style: None,
        }
    }

    pub fn boolean(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            kind: CellKind::Boolean,
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<StyleRef>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// The data type behind a cell's formatted text.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    #[default]
    Text,
    Number,
    Boolean,
    DateTime,
    /// Styled but valueless (fills, borders and merges still render).
    Empty,
}
