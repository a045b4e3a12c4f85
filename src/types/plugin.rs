use std::fmt;

use super::error::ValidationError;
use super::node::ConditionNode;

/// What a restriction plugin answers when its condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PluginReturnType {
    No = 0,
    AbsolutelyYes = 1,
    VotingNeeded = 2,
}

/// Whether a plugin gates an operation before or after it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PluginType {
    BeforeOperation = 0,
    AfterOperation = 1,
}

impl PluginReturnType {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl PluginType {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A governance rule gating an operation, holding the root of its condition
/// tree.
///
/// Voting parameters and submission to a ledger are handled elsewhere; this
/// type only pairs a validated condition with its return and timing tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionPlugin {
    description: String,
    condition: ConditionNode,
    return_type: PluginReturnType,
    plugin_type: PluginType,
}

impl RestrictionPlugin {
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `condition` breaks a node invariant.
    pub fn new(
        description: impl Into<String>,
        condition: ConditionNode,
        return_type: PluginReturnType,
        plugin_type: PluginType,
    ) -> Result<Self, ValidationError> {
        crate::validate::validate(&condition)?;
        Ok(Self {
            description: description.into(),
            condition,
            return_type,
            plugin_type,
        })
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn condition(&self) -> &ConditionNode {
        &self.condition
    }

    #[must_use]
    pub fn return_type(&self) -> PluginReturnType {
        self.return_type
    }

    #[must_use]
    pub fn plugin_type(&self) -> PluginType {
        self.plugin_type
    }
}

impl fmt::Display for PluginReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginReturnType::No => write!(f, "NO"),
            PluginReturnType::AbsolutelyYes => write!(f, "ABSOLUTELY_YES"),
            PluginReturnType::VotingNeeded => write!(f, "VOTING_NEEDED"),
        }
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginType::BeforeOperation => write!(f, "BEFORE_OPERATION"),
            PluginType::AfterOperation => write!(f, "AFTER_OPERATION"),
        }
    }
}

impl fmt::Display for RestrictionPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] -> {}: {}",
            self.description, self.plugin_type, self.return_type, self.condition
        )
    }
}
