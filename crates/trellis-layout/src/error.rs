#![forbid(unsafe_code)]

//! Errors surfaced by layout passes and textual configuration.

use std::fmt;

/// Failures that abort a layout pass.
///
/// Running out of space is never an error: children shrink to their minimum
/// and overflow. Only structural conflicts in grid placement are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A child's merged cell overlaps a cell already claimed by an earlier
    /// child.
    GridConflict {
        child: usize,
        row: usize,
        column: usize,
    },
    /// Every cell is taken; the child has nowhere to go.
    GridFull { child: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridConflict { child, row, column } => write!(
                f,
                "grid child {child} overlaps an occupied cell at row {row}, column {column}"
            ),
            Self::GridFull { child } => {
                write!(f, "grid has no free cell left for child {child}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Failures of [`Layout::set_attribute`](crate::Layout::set_attribute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The active strategy does not know this attribute.
    Unrecognized { name: String },
    /// The attribute is known but its value does not parse.
    InvalidValue { name: String, value: String },
}

impl AttributeError {
    pub(crate) fn unrecognized(name: &str) -> Self {
        Self::Unrecognized {
            name: name.to_owned(),
        }
    }

    pub(crate) fn invalid(name: &str, value: &str) -> Self {
        Self::InvalidValue {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized { name } => write!(f, "unrecognized layout attribute {name:?}"),
            Self::InvalidValue { name, value } => {
                write!(f, "invalid value {value:?} for layout attribute {name:?}")
            }
        }
    }
}

impl std::error::Error for AttributeError {}
