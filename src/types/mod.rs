mod error;
mod kind;
mod node;
mod param;
mod plugin;

pub use error::{CombinatorError, Field, UnknownCode, ValidationError};
pub use kind::{Arity, ExpressionKind, LogicalOperator, NodeKind};
pub use node::ConditionNode;
pub(crate) use node::{NodeBody, NodeParts};
pub use param::Param;
pub use plugin::{PluginReturnType, PluginType, RestrictionPlugin};
