//! Tab descriptor
//!
//! A tab header as the render layer sees it:
//! - Stable id (derived once, never regenerated)
//! - Label (may be empty)
//! - Optional icon markup
//! - Default flag

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TabError;
use crate::Result;

/// Prefix shared by every tab id; the panel and its header use the same id.
pub const TAB_ID_PREFIX: &str = "tab-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDescriptor {
    /// Unique identifier within the owning registry
    pub id: String,
    /// Display text
    #[serde(default)]
    pub label: String,
    /// Opaque icon markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Preferred initial tab
    #[serde(default)]
    pub is_default: bool,
}

impl TabDescriptor {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TabError::EmptyId);
        }

        Ok(Self {
            id,
            label: String::new(),
            icon: None,
            is_default: false,
        })
    }

    /// A freshly inserted tab gets a random client id, like the editor does.
    pub fn generated() -> Self {
        Self {
            id: Self::derive_id(Some(&Uuid::new_v4().to_string()), 0),
            label: String::new(),
            icon: None,
            is_default: false,
        }
    }

    /// Derive the id from a stored identifier, falling back to the position.
    pub fn derive_id(stored: Option<&str>, position: usize) -> String {
        match stored.map(str::trim).filter(|s| !s.is_empty()) {
            Some(stored) => format!("{TAB_ID_PREFIX}{stored}"),
            None => format!("{TAB_ID_PREFIX}{position}"),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        self.icon = if icon.is_empty() { None } else { Some(icon) };
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn has_icon(&self) -> bool {
        self.icon.as_deref().is_some_and(|i| !i.is_empty())
    }

    /// Label shown in the header, `Tab N` when neither label nor icon is set.
    ///
    /// Returns `None` for icon-only tabs.
    pub fn display_label(&self, position: usize) -> Option<String> {
        if !self.label.is_empty() {
            Some(self.label.clone())
        } else if !self.has_icon() {
            Some(format!("Tab {}", position + 1))
        } else {
            None
        }
    }
}
