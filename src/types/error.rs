use std::fmt;

use thiserror::Error;

use super::kind::{Arity, LogicalOperator, NodeKind};

/// A node field named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Predicate,
    Operator,
    Parameters,
    BooleanValue,
    Children,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Predicate => write!(f, "a predicate"),
            Field::Operator => write!(f, "an operator"),
            Field::Parameters => write!(f, "parameters"),
            Field::BooleanValue => write!(f, "a boolean value"),
            Field::Children => write!(f, "children"),
        }
    }
}

/// A structural invariant of a condition node is violated.
///
/// Every variant carries `node`, the rendered snapshot of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} node is missing {field}; node: {node}")]
    MissingField {
        kind: NodeKind,
        field: Field,
        node: String,
    },

    #[error("{kind} node must not carry {field}; node: {node}")]
    StrayField {
        kind: NodeKind,
        field: Field,
        node: String,
    },

    #[error("{operator} node requires {expected} children, found {found}; node: {node}")]
    Arity {
        operator: LogicalOperator,
        expected: Arity,
        found: usize,
        node: String,
    },
}

impl ValidationError {
    /// Rendered snapshot of the node that failed validation.
    #[must_use]
    pub fn snapshot(&self) -> &str {
        match self {
            ValidationError::MissingField { node, .. }
            | ValidationError::StrayField { node, .. }
            | ValidationError::Arity { node, .. } => node,
        }
    }
}

/// A combinator was asked to build a node that does not satisfy its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombinatorError {
    #[error("`{combinator}` produced a malformed node: {source}")]
    Malformed {
        combinator: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl CombinatorError {
    #[must_use]
    pub fn snapshot(&self) -> &str {
        match self {
            CombinatorError::Malformed { source, .. } => source.snapshot(),
        }
    }
}

/// A numeric code does not name any variant of a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}
