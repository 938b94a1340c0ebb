//! Activation State
//!
//! ```text
//! Uninitialized
//!   ↓ initialize / activate
//! Initialized(active_id)
//!   ↺ activate, key navigation, reconcile
//! ```
//!
//! There is no state after `Initialized`; transitions only swap the payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "activeId", rename_all = "lowercase")]
pub enum ActivationState {
    /// No initialization event seen yet
    #[default]
    Uninitialized,
    /// Initialized; `None` only when the registry was empty
    Initialized(Option<String>),
}

impl ActivationState {
    pub fn is_initialized(&self) -> bool {
        matches!(self, ActivationState::Initialized(_))
    }

    pub fn active_id(&self) -> Option<&str> {
        match self {
            ActivationState::Initialized(id) => id.as_deref(),
            ActivationState::Uninitialized => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationState::Uninitialized => "uninitialized",
            ActivationState::Initialized(_) => "initialized",
        }
    }
}

impl std::fmt::Display for ActivationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.active_id() {
            Some(id) => write!(f, "{}({})", self.as_str(), id),
            None => write!(f, "{}", self.as_str()),
        }
    }
}
