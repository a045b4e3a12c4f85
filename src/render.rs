//! Diagnostic rendering of condition trees.
//!
//! The output is meant for logs and error messages; it cannot be parsed back
//! into a tree.

use std::fmt;

use crate::types::{NodeBody, NodeParts};
use crate::{ConditionNode, ExpressionKind, LogicalOperator, NodeKind, Param};

/// Render `node` and all of its descendants on one line.
///
/// ```
/// use condtree::{serialize, ConditionNode, ExpressionKind};
///
/// let node = ConditionNode::expression(ExpressionKind::Equals, ["0xabc", "ADMIN"])?;
/// assert_eq!(serialize(&node), "Expression: EQUALS(0xabc,ADMIN)");
/// # Ok::<(), condtree::ValidationError>(())
/// ```
#[must_use]
pub fn serialize(node: &ConditionNode) -> String {
    node.to_string()
}

// Children follow their operator's header in pre-order, so the tree is
// written without recursing into subtrees.
impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.preorder().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match &node.body {
                NodeBody::Expression {
                    predicate,
                    parameters,
                } => write_expression(f, Some(*predicate), parameters)?,
                NodeBody::Operator { operator, children } => {
                    write_operator_head(f, Some(*operator), !children.is_empty())?;
                }
                NodeBody::Boolean(value) => write_boolean(f, Some(*value))?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for NodeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Expression => write_expression(f, self.predicate, &self.parameters),
            NodeKind::LogicalOperator => {
                write_operator_head(f, self.operator, !self.children.is_empty())?;
                for child in &self.children {
                    write!(f, " {child}")?;
                }
                Ok(())
            }
            NodeKind::BooleanValue => write_boolean(f, self.boolean_value),
        }
    }
}

fn write_expression(
    f: &mut fmt::Formatter<'_>,
    predicate: Option<ExpressionKind>,
    parameters: &[Param],
) -> fmt::Result {
    write!(f, "Expression: ")?;
    write_or_none(f, predicate)?;
    write!(f, "(")?;
    for (i, param) in parameters.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{param}")?;
    }
    write!(f, ")")
}

fn write_operator_head(
    f: &mut fmt::Formatter<'_>,
    operator: Option<LogicalOperator>,
    has_children: bool,
) -> fmt::Result {
    write!(f, "LogicalOperator: ")?;
    write_or_none(f, operator)?;
    if has_children {
        write!(f, " Child List:")?;
    }
    Ok(())
}

fn write_boolean(f: &mut fmt::Formatter<'_>, value: Option<bool>) -> fmt::Result {
    write!(f, "BooleanValue: ")?;
    write_or_none(f, value)
}

fn write_or_none(f: &mut fmt::Formatter<'_>, value: Option<impl fmt::Display>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{value}"),
        None => write!(f, "<none>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equals(a: &str, b: i64) -> ConditionNode {
        ConditionNode::expression(ExpressionKind::Equals, [Param::from(a), Param::Int(b)]).unwrap()
    }

    #[test]
    fn expression() {
        assert_eq!(serialize(&equals("0xabc", 1)), "Expression: EQUALS(0xabc,1)");
    }

    #[test]
    fn expression_without_parameters() {
        let node =
            ConditionNode::expression(ExpressionKind::GreaterThan, Vec::<Param>::new()).unwrap();
        assert_eq!(serialize(&node), "Expression: GREATER_THAN()");
    }

    #[test]
    fn boolean() {
        assert_eq!(serialize(&ConditionNode::boolean(true)), "BooleanValue: true");
        assert_eq!(serialize(&ConditionNode::boolean(false)), "BooleanValue: false");
    }

    #[test]
    fn operator_lists_children_in_order() {
        let node = equals("a", 1).and(&equals("b", 2)).unwrap();
        assert_eq!(
            serialize(&node),
            "LogicalOperator: AND Child List: Expression: EQUALS(a,1) Expression: EQUALS(b,2)"
        );
    }

    #[test]
    fn nested_operators() {
        let node = equals("a", 1)
            .or(&ConditionNode::boolean(false))
            .unwrap()
            .not()
            .unwrap();
        assert_eq!(
            serialize(&node),
            "LogicalOperator: NOT Child List: LogicalOperator: OR Child List: \
             Expression: EQUALS(a,1) BooleanValue: false"
        );
    }

    #[test]
    fn deep_tree_renders() {
        let mut node = ConditionNode::boolean(true);
        for _ in 0..100_000 {
            node = node.not().unwrap();
        }
        let text = serialize(&node);
        assert_eq!(text.matches("LogicalOperator: NOT Child List:").count(), 100_000);
        assert!(text.ends_with("Child List: BooleanValue: true"));
    }

    #[test]
    fn parts_render_nested_children() {
        let parts = NodeParts {
            operator: Some(LogicalOperator::Or),
            children: vec![equals("a", 1).not().unwrap(), ConditionNode::boolean(true)],
            ..NodeParts::new(NodeKind::LogicalOperator)
        };
        assert_eq!(
            parts.to_string(),
            "LogicalOperator: OR Child List: LogicalOperator: NOT Child List: \
             Expression: EQUALS(a,1) BooleanValue: true"
        );
    }

    #[test]
    fn parts_render_missing_fields() {
        let parts = NodeParts::new(NodeKind::LogicalOperator);
        assert_eq!(parts.to_string(), "LogicalOperator: <none>");
    }
}
