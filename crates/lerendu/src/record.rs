// Per-node display records

use crate::traits::{NodeId, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Indentation unit, repeated once per depth level
pub const INDENT_UNIT: &str = "  ";

/// Separator between a field name and the node's type label
pub const FIELD_SEPARATOR: &str = ": ";

/// One rendered line of a syntax tree.
///
/// The record keeps the node's id and span so a caller can map a displayed
/// line back to its source range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatTree {
    /// Identity of the rendered node
    pub id: NodeId,

    /// Start of the node's span
    pub start_position: Point,

    /// End of the node's span
    pub end_position: Point,

    /// Indentation, optionally followed by `"<field>: "`
    pub prefix: String,

    /// Node type label
    pub name: String,

    /// Span annotation, ` [row, col] - [row, col]`
    pub suffix: String,
}

impl FormatTree {
    /// Nesting depth for records rendered with an empty initial indent
    pub fn depth(&self) -> usize {
        self.depth_below("")
    }

    /// Nesting depth below `base`, the indentation of the starting node.
    ///
    /// Works for any initial indent, including ones that are not spaces.
    pub fn depth_below(&self, base: &str) -> usize {
        self.indent().len().saturating_sub(base.len()) / INDENT_UNIT.len()
    }

    /// Indentation part of the prefix, without the field annotation
    pub fn indent(&self) -> &str {
        match self.prefix.strip_suffix(FIELD_SEPARATOR) {
            Some(rest) => rest.trim_end_matches(|c: char| !c.is_whitespace()),
            None => &self.prefix,
        }
    }

    /// Field name annotation, if the prefix carries one
    pub fn field_name(&self) -> Option<&str> {
        let rest = self.prefix.strip_suffix(FIELD_SEPARATOR)?;
        let name = &rest[self.indent().len()..];
        (!name.is_empty()).then_some(name)
    }

    /// Whether `point` lies within this record's span (end exclusive)
    pub fn contains(&self, point: Point) -> bool {
        self.start_position <= point && point < self.end_position
    }
}

impl fmt::Display for FormatTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.name, self.suffix)
    }
}

/// Span annotation used as a record suffix
pub fn span_suffix(start: Point, end: Point) -> String {
    format!(" {} - {}", start, end)
}

/// Record prefix for a node at `base` indentation with an optional field name
pub fn prefix_for(base: &str, field: Option<&str>) -> String {
    match field {
        Some(name) => format!("{}{}{}", base, name, FIELD_SEPARATOR),
        None => base.to_string(),
    }
}
