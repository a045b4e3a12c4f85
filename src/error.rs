use thiserror::Error;

use crate::{CombinatorError, UnknownCode, ValidationError};

/// Unified error type covering construction, combination, and snapshot I/O.
///
/// Every module-level error converts into it with `?`.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Combinator(#[from] CombinatorError),

    #[error(transparent)]
    UnknownCode(#[from] UnknownCode),

    #[cfg(feature = "binary-cache")]
    #[error(transparent)]
    Serialize(#[from] crate::serial::SerializeError),

    #[cfg(feature = "binary-cache")]
    #[error(transparent)]
    Deserialize(#[from] crate::serial::DeserializeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConditionNode, ExpressionKind};

    fn build() -> Result<ConditionNode, ConditionError> {
        let a = ConditionNode::expression(ExpressionKind::Equals, [1_i64])?;
        let b = ConditionNode::expression(None::<ExpressionKind>, [2_i64])?;
        Ok(a.and(&b)?)
    }

    #[test]
    fn validation_error_converts() {
        let err = build().unwrap_err();
        assert!(matches!(err, ConditionError::Validation(_)));
        assert!(err.to_string().starts_with("expression node is missing a predicate"));
    }

    #[test]
    fn unknown_code_converts() {
        let err: ConditionError = ExpressionKind::try_from(42).unwrap_err().into();
        assert_eq!(err.to_string(), "unknown expression kind code 42");
    }
}
