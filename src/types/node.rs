use std::mem;
use std::sync::Arc;

use super::error::{CombinatorError, ValidationError};
use super::kind::{ExpressionKind, LogicalOperator, NodeKind};
use super::param::Param;

/// A node in a restriction plugin's condition tree.
///
/// A node is exactly one of: an expression predicate with parameters, a
/// logical operator over owned children, or a boolean literal. Nodes are
/// immutable once built. Leaves come from [`ConditionNode::expression`] and
/// [`ConditionNode::boolean`]; operator nodes only come from the combinators
/// [`and`](crate::and), [`or`](crate::or) and [`not`](crate::not).
///
/// Cloning is cheap: children and parameters live behind [`Arc`].
///
/// Dropping, rendering and the traversal helpers walk the tree with an
/// explicit stack, so arbitrarily deep trees are safe to build and discard.
/// The derived `PartialEq` and `Debug` impls still recurse once per level.
///
/// # Example
///
/// ```
/// use condtree::{ConditionNode, ExpressionKind};
///
/// let is_member = ConditionNode::expression(ExpressionKind::Equals, ["0xabc", "MEMBER"])?;
/// let has_stake = ConditionNode::expression(ExpressionKind::GreaterThan, ["0xabc", "100"])?;
/// let condition = is_member.and(&has_stake)?;
///
/// assert_eq!(condition.children().len(), 2);
/// # Ok::<(), condtree::ConditionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionNode {
    pub(crate) body: NodeBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeBody {
    Expression {
        predicate: ExpressionKind,
        parameters: Arc<[Param]>,
    },
    Operator {
        operator: LogicalOperator,
        children: Arc<[ConditionNode]>,
    },
    Boolean(bool),
}

/// Loose description of a node, used where fields arrive independently of each
/// other and have not been checked yet.
#[derive(Debug, Clone)]
pub(crate) struct NodeParts {
    pub(crate) kind: NodeKind,
    pub(crate) predicate: Option<ExpressionKind>,
    pub(crate) operator: Option<LogicalOperator>,
    pub(crate) parameters: Vec<Param>,
    pub(crate) boolean_value: Option<bool>,
    pub(crate) children: Vec<ConditionNode>,
}

impl NodeParts {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            predicate: None,
            operator: None,
            parameters: Vec::new(),
            boolean_value: None,
            children: Vec::new(),
        }
    }
}

impl ConditionNode {
    /// Build an expression leaf.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `predicate` is `None`.
    pub fn expression<P>(
        predicate: impl Into<Option<ExpressionKind>>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Result<Self, ValidationError>
    where
        P: Into<Param>,
    {
        crate::validate::assemble(NodeParts {
            predicate: predicate.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            ..NodeParts::new(NodeKind::Expression)
        })
    }

    /// Build a boolean literal leaf.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self {
            body: NodeBody::Boolean(value),
        }
    }

    /// Build an operator node over `children`. Only combinators and decoders
    /// reach this; callers never author operator nodes directly.
    pub(crate) fn from_operator(
        operator: LogicalOperator,
        children: Vec<ConditionNode>,
    ) -> Result<Self, ValidationError> {
        let node = Self {
            body: NodeBody::Operator {
                operator,
                children: children.into(),
            },
        };
        crate::validate::check_node(&node)?;
        Ok(node)
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Expression { .. } => NodeKind::Expression,
            NodeBody::Operator { .. } => NodeKind::LogicalOperator,
            NodeBody::Boolean(_) => NodeKind::BooleanValue,
        }
    }

    #[must_use]
    pub fn predicate(&self) -> Option<ExpressionKind> {
        match self.body {
            NodeBody::Expression { predicate, .. } => Some(predicate),
            _ => None,
        }
    }

    #[must_use]
    pub fn operator(&self) -> Option<LogicalOperator> {
        match self.body {
            NodeBody::Operator { operator, .. } => Some(operator),
            _ => None,
        }
    }

    /// Expression parameters in order; empty for other node kinds.
    #[must_use]
    pub fn parameters(&self) -> &[Param] {
        match &self.body {
            NodeBody::Expression { parameters, .. } => parameters,
            _ => &[],
        }
    }

    /// Children in left-to-right order; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[ConditionNode] {
        match &self.body {
            NodeBody::Operator { children, .. } => children,
            _ => &[],
        }
    }

    #[must_use]
    pub fn boolean_value(&self) -> Option<bool> {
        match self.body {
            NodeBody::Boolean(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_operator(&self, operator: LogicalOperator) -> bool {
        self.operator() == Some(operator)
    }

    /// See [`and`](crate::and).
    ///
    /// # Errors
    ///
    /// Returns [`CombinatorError`] if the combined node is malformed.
    pub fn and(&self, other: &ConditionNode) -> Result<ConditionNode, CombinatorError> {
        crate::combine::and(self, other)
    }

    /// See [`or`](crate::or).
    ///
    /// # Errors
    ///
    /// Returns [`CombinatorError`] if the combined node is malformed.
    pub fn or(&self, other: &ConditionNode) -> Result<ConditionNode, CombinatorError> {
        crate::combine::or(self, other)
    }

    /// See [`not`](crate::not).
    ///
    /// # Errors
    ///
    /// Returns [`CombinatorError`] if the combined node is malformed.
    pub fn not(&self) -> Result<ConditionNode, CombinatorError> {
        crate::combine::not(self)
    }

    /// Encode this tree into the checksummed binary snapshot format.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::SerializeError) if encoding fails.
    #[cfg(feature = "binary-cache")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, crate::serial::SerializeError> {
        crate::serial::encode(self)
    }

    /// Decode and re-validate a tree produced by [`to_bytes()`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::DeserializeError) if the header,
    /// checksum or payload is invalid, or if the decoded tree breaks a node
    /// invariant.
    #[cfg(feature = "binary-cache")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::serial::DeserializeError> {
        crate::serial::decode(bytes)
    }
}

impl From<bool> for ConditionNode {
    fn from(value: bool) -> Self {
        ConditionNode::boolean(value)
    }
}

impl Drop for ConditionNode {
    fn drop(&mut self) {
        let NodeBody::Operator { children, .. } = &mut self.body else {
            return;
        };
        let mut pending = vec![mem::replace(children, Arc::from(Vec::new()))];
        while let Some(mut list) = pending.pop() {
            // Shared lists are released by whoever holds the last reference.
            let Some(nodes) = Arc::get_mut(&mut list) else {
                continue;
            };
            for node in nodes.iter_mut() {
                if let NodeBody::Operator { children, .. } = &mut node.body {
                    pending.push(mem::replace(children, Arc::from(Vec::new())));
                }
            }
        }
    }
}
