//! Tab registry
//!
//! Ordered, de-duplicated tabs of one Tabs instance. Insertion order is
//! presentation order, and the first tab is the fallback default.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::TabError;
use crate::tab::TabDescriptor;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TabRegistry {
    tabs: Vec<TabDescriptor>,
}

impl TabRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(tabs: Vec<TabDescriptor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tabs.len());
        for tab in &tabs {
            if !seen.insert(tab.id.as_str()) {
                return Err(TabError::DuplicateId(tab.id.clone()));
            }
        }

        Ok(Self { tabs })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabDescriptor> {
        self.tabs.iter()
    }

    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&TabDescriptor> {
        self.tabs.get(index)
    }

    pub fn get(&self, id: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// First flagged tab, else the first tab, else `None`.
    pub fn default_id(&self) -> Option<&str> {
        self.tabs
            .iter()
            .find(|t| t.is_default)
            .or_else(|| self.tabs.first())
            .map(|t| t.id.as_str())
    }

    /// Position of the effective default tab.
    pub fn default_index(&self) -> Option<usize> {
        self.default_id().and_then(|id| self.index_of(id))
    }

    /// Mark exactly one tab as default, or clear every flag with `None`.
    pub fn set_default(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if !self.contains(id) {
                return Err(TabError::NotFound(id.to_string()));
            }
        }

        for tab in &mut self.tabs {
            tab.is_default = Some(tab.id.as_str()) == id;
        }

        Ok(())
    }

    pub fn push(&mut self, tab: TabDescriptor) -> Result<()> {
        if self.contains(&tab.id) {
            return Err(TabError::DuplicateId(tab.id));
        }

        tracing::debug!(tab_id = %tab.id, position = self.tabs.len(), "Added tab");
        self.tabs.push(tab);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<TabDescriptor> {
        let index = self
            .index_of(id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))?;

        tracing::debug!(tab_id = %id, position = index, "Removed tab");
        Ok(self.tabs.remove(index))
    }

    /// Move the tab at `from` so that it ends up at `to`.
    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tabs.len();
        if from >= len {
            return Err(TabError::IndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(TabError::IndexOutOfRange { index: to, len });
        }

        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        Ok(())
    }
}
