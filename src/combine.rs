//! Combinators building operator nodes from existing nodes.
//!
//! Operands are borrowed and never modified. Consecutive combinations with the
//! same operator are flattened into one node instead of nesting.

use std::iter;

use crate::{CombinatorError, ConditionNode, LogicalOperator};

/// Conjunction of `left` and `right`.
///
/// If `left` is already an AND node, `right` is appended to its children.
/// Otherwise, if `right` is an AND node, `left` is prepended to its children.
/// Otherwise the result is a fresh AND over `[left, right]`.
///
/// ```
/// use condtree::{and, ConditionNode, ExpressionKind};
///
/// let a = ConditionNode::expression(ExpressionKind::Equals, [1_i64])?;
/// let b = ConditionNode::expression(ExpressionKind::Equals, [2_i64])?;
/// let c = ConditionNode::expression(ExpressionKind::Equals, [3_i64])?;
///
/// let abc = and(&and(&a, &b)?, &c)?;
/// assert_eq!(abc.children(), &[a, b, c]);
/// # Ok::<(), condtree::ConditionError>(())
/// ```
///
/// # Errors
///
/// Returns [`CombinatorError`] if the resulting node is malformed.
pub fn and(left: &ConditionNode, right: &ConditionNode) -> Result<ConditionNode, CombinatorError> {
    combine("and", LogicalOperator::And, left, right)
}

/// Disjunction of `left` and `right`, flattened the same way as [`and`].
///
/// # Errors
///
/// Returns [`CombinatorError`] if the resulting node is malformed.
pub fn or(left: &ConditionNode, right: &ConditionNode) -> Result<ConditionNode, CombinatorError> {
    combine("or", LogicalOperator::Or, left, right)
}

/// Negation of `operand`. Double negations are kept as two nested NOT nodes.
///
/// # Errors
///
/// Returns [`CombinatorError`] if the resulting node is malformed.
pub fn not(operand: &ConditionNode) -> Result<ConditionNode, CombinatorError> {
    build("not", LogicalOperator::Not, vec![operand.clone()])
}

fn combine(
    combinator: &'static str,
    operator: LogicalOperator,
    left: &ConditionNode,
    right: &ConditionNode,
) -> Result<ConditionNode, CombinatorError> {
    let children: Vec<ConditionNode> = if left.is_operator(operator) {
        left.children()
            .iter()
            .cloned()
            .chain(iter::once(right.clone()))
            .collect()
    } else if right.is_operator(operator) {
        iter::once(left.clone())
            .chain(right.children().iter().cloned())
            .collect()
    } else {
        vec![left.clone(), right.clone()]
    };
    build(combinator, operator, children)
}

fn build(
    combinator: &'static str,
    operator: LogicalOperator,
    children: Vec<ConditionNode>,
) -> Result<ConditionNode, CombinatorError> {
    let node = ConditionNode::from_operator(operator, children).map_err(|source| {
        tracing::debug!(combinator, error = %source, "combinator produced a malformed node");
        CombinatorError::Malformed { combinator, source }
    })?;
    tracing::trace!(
        combinator,
        operator = %operator,
        children = node.children().len(),
        "combined condition nodes"
    );
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExpressionKind, Param};

    fn leaf(n: i64) -> ConditionNode {
        ConditionNode::expression(ExpressionKind::Equals, [n]).unwrap()
    }

    #[test]
    fn and_two_leaves() {
        let node = and(&leaf(1), &leaf(2)).unwrap();
        assert!(node.is_operator(LogicalOperator::And));
        assert_eq!(node.children(), &[leaf(1), leaf(2)]);
    }

    #[test]
    fn and_flattens_left() {
        let node = and(&and(&leaf(1), &leaf(2)).unwrap(), &leaf(3)).unwrap();
        assert_eq!(node.children(), &[leaf(1), leaf(2), leaf(3)]);
    }

    #[test]
    fn and_flattens_right() {
        let node = and(&leaf(1), &and(&leaf(2), &leaf(3)).unwrap()).unwrap();
        assert_eq!(node.children(), &[leaf(1), leaf(2), leaf(3)]);
    }

    #[test]
    fn and_of_two_ands_appends_right_whole() {
        let left = and(&leaf(1), &leaf(2)).unwrap();
        let right = and(&leaf(3), &leaf(4)).unwrap();
        let node = and(&left, &right).unwrap();
        assert_eq!(node.children(), &[leaf(1), leaf(2), right]);
    }

    #[test]
    fn and_does_not_flatten_or() {
        let or_node = or(&leaf(1), &leaf(2)).unwrap();
        let node = and(&or_node, &leaf(3)).unwrap();
        assert_eq!(node.children(), &[or_node, leaf(3)]);
    }

    #[test]
    fn and_does_not_flatten_not() {
        let not_node = not(&leaf(1)).unwrap();
        let node = and(&not_node, &leaf(2)).unwrap();
        assert_eq!(node.children(), &[not_node, leaf(2)]);
    }

    #[test]
    fn and_with_boolean_literal() {
        let node = and(&ConditionNode::boolean(true), &leaf(1)).unwrap();
        assert_eq!(node.children(), &[ConditionNode::boolean(true), leaf(1)]);
    }

    #[test]
    fn or_mirrors_and() {
        let node = or(&or(&leaf(1), &leaf(2)).unwrap(), &leaf(3)).unwrap();
        assert!(node.is_operator(LogicalOperator::Or));
        assert_eq!(node.children(), &[leaf(1), leaf(2), leaf(3)]);

        let node = or(&leaf(0), &node).unwrap();
        assert_eq!(node.children(), &[leaf(0), leaf(1), leaf(2), leaf(3)]);
    }

    #[test]
    fn or_does_not_flatten_and() {
        let and_node = and(&leaf(1), &leaf(2)).unwrap();
        let node = or(&leaf(0), &and_node).unwrap();
        assert_eq!(node.children(), &[leaf(0), and_node]);
    }

    #[test]
    fn not_wraps_single_child() {
        let node = not(&leaf(1)).unwrap();
        assert!(node.is_operator(LogicalOperator::Not));
        assert_eq!(node.children(), &[leaf(1)]);
    }

    #[test]
    fn double_negation_kept() {
        let node = not(&not(&leaf(1)).unwrap()).unwrap();
        let inner = &node.children()[0];
        assert!(inner.is_operator(LogicalOperator::Not));
        assert_eq!(inner.children(), &[leaf(1)]);
    }

    #[test]
    fn operands_untouched() {
        let a = and(&leaf(1), &leaf(2)).unwrap();
        let before = a.clone();
        let _ = and(&a, &leaf(3)).unwrap();
        let _ = or(&a, &leaf(4)).unwrap();
        assert_eq!(a, before);
        assert_eq!(a.children().len(), 2);
    }

    #[test]
    fn same_leaf_on_both_sides() {
        let x = ConditionNode::expression(ExpressionKind::LessThan, [Param::from("x")]).unwrap();
        let node = and(&x, &x).unwrap();
        assert_eq!(node.children(), &[x.clone(), x]);
    }
}
