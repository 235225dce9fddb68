//! Error types shared across the Tessera workspace.

use crate::cell::Cell;
use std::error::Error;
use std::fmt;

/// Errors from grid construction and grid queries.
///
/// Every fallible operation in the workspace returns this type, so
/// callers match one enum regardless of which grid produced the error.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// A constructor or query was given a structurally invalid argument,
    /// such as a zero cell size, an inverted bound, or malformed mesh data.
    InvalidArgument {
        /// Human-readable description of what was wrong.
        reason: String,
    },
    /// A query named a cell that is not part of the grid, either because
    /// its coordinates are not valid for the tessellation or because it
    /// falls outside the grid's bound.
    CellNotInGrid {
        /// The offending cell.
        cell: Cell,
    },
    /// An enumeration or counting operation was invoked on a grid or
    /// bound with infinitely many cells.
    Unbounded {
        /// Which collection was unbounded.
        what: &'static str,
    },
    /// The operation is well-formed but not defined for this grid or
    /// cell type.
    Unsupported {
        /// Description of the unsupported operation.
        op: &'static str,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::CellNotInGrid { cell } => write!(f, "cell {cell} is not in the grid"),
            Self::Unbounded { what } => {
                write!(f, "{what} is unbounded; the operation needs a finite cell set")
            }
            Self::Unsupported { op } => write!(f, "unsupported operation: {op}"),
        }
    }
}

impl Error for GridError {}

impl GridError {
    /// Shorthand for [`GridError::InvalidArgument`] from anything stringly.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_failure() {
        let e = GridError::invalid("cell size must be positive");
        assert_eq!(e.to_string(), "invalid argument: cell size must be positive");

        let e = GridError::CellNotInGrid {
            cell: Cell::new(3, -1, 0),
        };
        assert_eq!(e.to_string(), "cell (3, -1, 0) is not in the grid");

        let e = GridError::Unbounded { what: "cell set" };
        assert_eq!(
            e.to_string(),
            "cell set is unbounded; the operation needs a finite cell set"
        );

        let e = GridError::Unsupported {
            op: "cell type of a hex prism",
        };
        assert_eq!(e.to_string(), "unsupported operation: cell type of a hex prism");
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(
            GridError::invalid("x"),
            GridError::InvalidArgument {
                reason: "x".to_string()
            }
        );
        assert_ne!(GridError::invalid("x"), GridError::invalid("y"));
    }
}
