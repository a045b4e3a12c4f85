//! Boolean condition trees for governance restriction plugins.
//!
//! Build leaves with [`ConditionNode::expression`] and
//! [`ConditionNode::boolean`], combine them with [`and`], [`or`] and [`not`],
//! and hand the validated root to a [`RestrictionPlugin`]. Every constructor
//! checks the node invariants before returning.
//!
//! ```
//! use condtree::{
//!     and, serialize, ConditionNode, ExpressionKind, Param, PluginReturnType, PluginType,
//!     RestrictionPlugin,
//! };
//!
//! let balance = ConditionNode::expression(
//!     ExpressionKind::Equals,
//!     [Param::from("0xabc"), Param::from(1_i64)],
//! )?;
//! let admin = ConditionNode::expression(ExpressionKind::Equals, ["0xabc", "ADMIN"])?;
//! let condition = and(&balance, &admin)?;
//!
//! assert_eq!(
//!     serialize(&condition),
//!     "LogicalOperator: AND Child List: Expression: EQUALS(0xabc,1) Expression: EQUALS(0xabc,ADMIN)"
//! );
//!
//! let plugin = RestrictionPlugin::new(
//!     "funded admins pass without a vote",
//!     condition,
//!     PluginReturnType::AbsolutelyYes,
//!     PluginType::BeforeOperation,
//! )?;
//! assert_eq!(plugin.condition().node_count(), 3);
//! # Ok::<(), condtree::ConditionError>(())
//! ```

mod combine;
mod error;
mod render;
#[cfg(feature = "binary-cache")]
mod serial;
mod traverse;
mod types;
mod validate;

pub use combine::{and, not, or};
pub use error::ConditionError;
pub use render::serialize;
#[cfg(feature = "binary-cache")]
pub use serial::{DeserializeError, SerializeError, MAX_DEPTH};
pub use traverse::Preorder;
pub use types::{
    Arity, CombinatorError, ConditionNode, ExpressionKind, Field, LogicalOperator, NodeKind, Param,
    PluginReturnType, PluginType, RestrictionPlugin, UnknownCode, ValidationError,
};
pub use validate::validate;
