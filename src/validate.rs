use crate::types::{NodeBody, NodeParts};
use crate::{ConditionNode, Field, LogicalOperator, NodeKind, ValidationError};

/// Check every node of `tree` against the node invariants.
///
/// Nodes are visited parent first, children left to right; the first
/// violation is returned. Trees built through the public constructors and
/// combinators always pass; this is for trees that reached the caller some
/// other way.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(tree: &ConditionNode) -> Result<(), ValidationError> {
    for node in tree.preorder() {
        if let Err(err) = check_node(node) {
            tracing::debug!(error = %err, "condition tree failed validation");
            return Err(err);
        }
    }
    Ok(())
}

/// Check a single node, assuming its children were checked when they were
/// built. The typed representation rules out stray fields, so only operator
/// arity can be wrong here.
pub(crate) fn check_node(node: &ConditionNode) -> Result<(), ValidationError> {
    match &node.body {
        NodeBody::Operator { operator, children } => {
            check_arity(*operator, children.len(), || node.to_string())
        }
        NodeBody::Expression { .. } | NodeBody::Boolean(_) => Ok(()),
    }
}

/// Check loose node parts and build the node they describe.
pub(crate) fn assemble(parts: NodeParts) -> Result<ConditionNode, ValidationError> {
    let result = assemble_checked(parts);
    if let Err(err) = &result {
        tracing::debug!(error = %err, "rejected condition node");
    }
    result
}

fn assemble_checked(parts: NodeParts) -> Result<ConditionNode, ValidationError> {
    let body = match parts.kind {
        NodeKind::Expression => {
            let Some(predicate) = parts.predicate else {
                return Err(missing(&parts, Field::Predicate));
            };
            reject_stray(
                &parts,
                &[
                    (parts.operator.is_some(), Field::Operator),
                    (parts.boolean_value.is_some(), Field::BooleanValue),
                    (!parts.children.is_empty(), Field::Children),
                ],
            )?;
            NodeBody::Expression {
                predicate,
                parameters: parts.parameters.into(),
            }
        }
        NodeKind::LogicalOperator => {
            let Some(operator) = parts.operator else {
                return Err(missing(&parts, Field::Operator));
            };
            reject_stray(
                &parts,
                &[
                    (parts.predicate.is_some(), Field::Predicate),
                    (!parts.parameters.is_empty(), Field::Parameters),
                    (parts.boolean_value.is_some(), Field::BooleanValue),
                ],
            )?;
            check_arity(operator, parts.children.len(), || parts.to_string())?;
            NodeBody::Operator {
                operator,
                children: parts.children.into(),
            }
        }
        NodeKind::BooleanValue => {
            let Some(value) = parts.boolean_value else {
                return Err(missing(&parts, Field::BooleanValue));
            };
            reject_stray(
                &parts,
                &[
                    (parts.predicate.is_some(), Field::Predicate),
                    (parts.operator.is_some(), Field::Operator),
                    (!parts.parameters.is_empty(), Field::Parameters),
                    (!parts.children.is_empty(), Field::Children),
                ],
            )?;
            NodeBody::Boolean(value)
        }
    };
    Ok(ConditionNode { body })
}

fn check_arity(
    operator: LogicalOperator,
    found: usize,
    snapshot: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    let expected = operator.arity();
    if expected.admits(found) {
        Ok(())
    } else {
        Err(ValidationError::Arity {
            operator,
            expected,
            found,
            node: snapshot(),
        })
    }
}

fn missing(parts: &NodeParts, field: Field) -> ValidationError {
    ValidationError::MissingField {
        kind: parts.kind,
        field,
        node: parts.to_string(),
    }
}

fn reject_stray(parts: &NodeParts, fields: &[(bool, Field)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(present, _)| *present) {
        Some(&(_, field)) => Err(ValidationError::StrayField {
            kind: parts.kind,
            field,
            node: parts.to_string(),
        }),
        None => Ok(()),
    }
}
