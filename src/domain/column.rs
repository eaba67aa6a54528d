//! Column descriptors for a data grid.
//!
//! Views declare their columns once and hand them to the grid controller, which
//! treats them as read-only. Descriptors deserialize from the same shape the
//! console pages use (`{"prop": "name", "label": "Name", "type": "input"}`), so a
//! page can keep its column table in JSON or TOML.

use crate::domain::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// How a cell is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    /// Plain text.
    #[default]
    Text,
    /// Editable single-line input.
    Input,
    /// Boolean toggle.
    Switch,
    /// Dropdown over [`ColumnDescriptor::options`].
    Select,
    /// Date picker.
    Date,
}

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// One entry of a select column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one grid column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Row field this column reads. Unique within a [`ColumnSet`].
    #[serde(alias = "prop")]
    pub key: String,

    /// Header text.
    pub label: String,

    /// Cell renderer.
    #[serde(default, alias = "type")]
    pub render_kind: RenderKind,

    /// CSS dimension such as `"120"` or `"20%"`; `None` lets the column flex.
    #[serde(default)]
    pub width: Option<String>,

    #[serde(default, alias = "align")]
    pub alignment: Alignment,

    /// Choices for [`RenderKind::Select`]; ignored for other kinds.
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl ColumnDescriptor {
    /// Creates a left-aligned text column.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render_kind: RenderKind::Text,
            width: None,
            alignment: Alignment::Left,
            options: Vec::new(),
        }
    }

    /// Creates a select column with the given options.
    pub fn select(key: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            render_kind: RenderKind::Select,
            options,
            ..Self::text(key, label)
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: RenderKind) -> Self {
        self.render_kind = kind;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Label of the select option whose value equals `value`.
    #[must_use]
    pub fn option_label(&self, value: &Value) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| &opt.value == value)
            .map(|opt| opt.label.as_str())
    }
}

/// An ordered set of columns with unique keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSet {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSet {
    /// Validates key uniqueness and wraps the columns.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidInput`] naming the first duplicated key.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(ConsoleError::InvalidInput(format!(
                    "duplicate column key: {}",
                    column.key
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Parses a JSON array of descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidInput`] for malformed JSON or duplicate keys.
    pub fn from_json(json: &str) -> Result<Self> {
        let columns: Vec<ColumnDescriptor> = serde_json::from_str(json)
            .map_err(|e| ConsoleError::InvalidInput(format!("invalid column descriptors: {e}")))?;
        Self::new(columns)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor> {
        self.columns.iter()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a ColumnDescriptor;
    type IntoIter = std::slice::Iter<'a, ColumnDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
