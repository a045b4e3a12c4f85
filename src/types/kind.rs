//! Closed enumerations that tag condition nodes.
//!
//! Every enum here carries a stable `u8` code. External encoders map nodes onto
//! a fixed ledger schema through these codes, so existing codes must never be
//! renumbered.

use std::fmt;

use super::error::UnknownCode;

/// Which of the three node shapes a [`ConditionNode`](super::ConditionNode) has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeKind {
    Expression = 0,
    LogicalOperator = 1,
    BooleanValue = 2,
}

/// Logical operators combining child conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LogicalOperator {
    And = 0,
    Or = 1,
    Not = 2,
}

/// Atomic predicates evaluated against runtime parameters by an external
/// interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExpressionKind {
    Equals = 0,
    NotEquals = 1,
    GreaterThan = 2,
    GreaterThanOrEqual = 3,
    LessThan = 4,
    LessThanOrEqual = 5,
}

/// Number of children an operator node admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    AtLeast(usize),
    Exactly(usize),
}

impl Arity {
    #[must_use]
    pub fn admits(self, count: usize) -> bool {
        match self {
            Arity::AtLeast(min) => count >= min,
            Arity::Exactly(n) => count == n,
        }
    }
}

impl NodeKind {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl LogicalOperator {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// AND and OR need at least two children; NOT takes exactly one.
    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            LogicalOperator::And | LogicalOperator::Or => Arity::AtLeast(2),
            LogicalOperator::Not => Arity::Exactly(1),
        }
    }
}

impl ExpressionKind {
    pub const ALL: [ExpressionKind; 6] = [
        ExpressionKind::Equals,
        ExpressionKind::NotEquals,
        ExpressionKind::GreaterThan,
        ExpressionKind::GreaterThanOrEqual,
        ExpressionKind::LessThan,
        ExpressionKind::LessThanOrEqual,
    ];

    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for NodeKind {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(NodeKind::Expression),
            1 => Ok(NodeKind::LogicalOperator),
            2 => Ok(NodeKind::BooleanValue),
            _ => Err(UnknownCode {
                kind: "node kind",
                code,
            }),
        }
    }
}

impl TryFrom<u8> for LogicalOperator {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LogicalOperator::And),
            1 => Ok(LogicalOperator::Or),
            2 => Ok(LogicalOperator::Not),
            _ => Err(UnknownCode {
                kind: "logical operator",
                code,
            }),
        }
    }
}

impl TryFrom<u8> for ExpressionKind {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ExpressionKind::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(UnknownCode {
                kind: "expression kind",
                code,
            })
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Expression => write!(f, "expression"),
            NodeKind::LogicalOperator => write!(f, "logical operator"),
            NodeKind::BooleanValue => write!(f, "boolean value"),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "AND"),
            LogicalOperator::Or => write!(f, "OR"),
            LogicalOperator::Not => write!(f, "NOT"),
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionKind::Equals => write!(f, "EQUALS"),
            ExpressionKind::NotEquals => write!(f, "NOT_EQUALS"),
            ExpressionKind::GreaterThan => write!(f, "GREATER_THAN"),
            ExpressionKind::GreaterThanOrEqual => write!(f, "GREATER_THAN_OR_EQUAL"),
            ExpressionKind::LessThan => write!(f, "LESS_THAN"),
            ExpressionKind::LessThanOrEqual => write!(f, "LESS_THAN_OR_EQUAL"),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::AtLeast(n) => write!(f, "at least {n}"),
            Arity::Exactly(n) => write!(f, "exactly {n}"),
        }
    }
}
