//! Tabs instance
//!
//! One Tabs block on a page: its attributes, its registry, its own
//! activation controller and the panel markup of each tab.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use blocktabs_activation::{
    ActivationController, KeyOutcome, Orientation, TabDescriptor, TabKey, TabRegistry, TabView,
};
use blocktabs_block::{extract_tabs, render_tabs, ExtractedTabs, ParsedBlock, TabsAttributes};

use crate::config::Config;
use crate::Result;

pub struct TabsInstance {
    /// Unique identifier
    pub id: String,
    /// Human readable name
    pub name: String,
    /// Container attributes; `active_tab` mirrors the default tab
    pub attributes: TabsAttributes,
    registry: TabRegistry,
    controller: ActivationController,
    panels: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TabsInstance {
    /// Build an instance and initialize its activation state.
    pub fn new(name: impl Into<String>, attributes: TabsAttributes, registry: TabRegistry) -> Self {
        let now = Utc::now();
        let mut instance = Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            attributes,
            registry,
            controller: ActivationController::new(),
            panels: HashMap::new(),
            created_at: now,
            updated_at: now,
        };
        instance.sync_default_index();
        instance.controller.initialize(&instance.registry);
        instance
    }

    /// An instance with `labels.len()` freshly generated tabs and the
    /// configured defaults.
    pub fn blank(name: impl Into<String>, labels: &[String], config: &Config) -> Result<Self> {
        let mut attributes = TabsAttributes {
            orientation: config.default_orientation,
            ..Default::default()
        };
        attributes.tab_border.on_active = config.border_on_active;

        let tabs = labels
            .iter()
            .map(|label| TabDescriptor::generated().with_label(label.clone()))
            .collect();

        Ok(Self::new(name, attributes, TabRegistry::new(tabs)?))
    }

    pub fn from_block(name: impl Into<String>, block: &ParsedBlock) -> Result<Self> {
        let extracted = extract_tabs(block)?;
        let panels = extracted
            .registry
            .iter()
            .map(|t| t.id.clone())
            .zip(extracted.panels)
            .collect();

        let mut instance = Self::new(name, extracted.attributes, extracted.registry);
        instance.panels = panels;

        tracing::info!(
            instance_id = %instance.id,
            tab_count = instance.registry.len(),
            "Created tabs instance from block"
        );

        Ok(instance)
    }

    /// Swap in a controller carrying listeners or a focus target. It is
    /// initialized against this instance's registry, and an active id it
    /// brought from elsewhere is reconciled away.
    pub fn with_controller(mut self, mut controller: ActivationController) -> Self {
        if !controller.initialize(&self.registry) {
            controller.reconcile(&self.registry);
        }
        self.controller = controller;
        self
    }

    pub fn set_panel(&mut self, tab_id: &str, content: impl Into<String>) {
        self.panels.insert(tab_id.to_string(), content.into());
    }

    pub fn panel(&self, tab_id: &str) -> &str {
        self.panels.get(tab_id).map(String::as_str).unwrap_or_default()
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn controller(&self) -> &ActivationController {
        &self.controller
    }

    pub fn active_id(&self) -> Option<&str> {
        self.controller.active_id()
    }

    pub fn orientation(&self) -> Orientation {
        self.attributes.orientation
    }

    pub fn border_on_active(&self) -> bool {
        self.attributes.border_on_active()
    }

    /// Click on a tab header. Unknown ids are ignored.
    pub fn click(&mut self, tab_id: &str) -> bool {
        match self.controller.activate(&self.registry, tab_id) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(instance_id = %self.id, error = %e, "Click ignored");
                false
            }
        }
    }

    /// Keydown on the header `current_id`, with the DOM key name.
    pub fn key_down(&mut self, key: &str, current_id: &str) -> KeyOutcome {
        let orientation = self.orientation();
        self.controller
            .handle_key(&self.registry, &TabKey::from(key), current_id, orientation)
    }

    pub fn views(&self) -> Vec<TabView> {
        self.controller
            .views(&self.registry, self.border_on_active())
    }

    pub fn add_tab(&mut self, tab: TabDescriptor) -> Result<()> {
        self.registry.push(tab)?;
        self.after_mutation();
        Ok(())
    }

    pub fn remove_tab(&mut self, tab_id: &str) -> Result<TabDescriptor> {
        let removed = self.registry.remove(tab_id)?;
        self.panels.remove(tab_id);
        self.after_mutation();
        Ok(removed)
    }

    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        self.registry.move_tab(from, to)?;
        self.after_mutation();
        Ok(())
    }

    /// The editor's "default tab" toggle. `None` restores the first-tab
    /// fallback.
    pub fn set_default_tab(&mut self, tab_id: Option<&str>) -> Result<()> {
        self.registry.set_default(tab_id)?;
        self.after_mutation();
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        let extracted = ExtractedTabs {
            attributes: self.attributes.clone(),
            registry: self.registry.clone(),
            panels: self
                .registry
                .iter()
                .map(|t| self.panel(&t.id).to_string())
                .collect(),
        };
        Ok(render_tabs(&extracted, &self.controller)?)
    }

    pub(crate) fn restore(
        id: String,
        name: String,
        attributes: TabsAttributes,
        registry: TabRegistry,
        panels: HashMap<String, String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut controller = ActivationController::new();
        controller.initialize(&registry);
        Self {
            id,
            name,
            attributes,
            registry,
            controller,
            panels,
            created_at,
            updated_at,
        }
    }

    fn after_mutation(&mut self) {
        self.sync_default_index();
        self.controller.reconcile(&self.registry);
        self.updated_at = Utc::now();
    }

    /// Only an explicitly flagged tab is persisted as the container index.
    fn sync_default_index(&mut self) {
        self.attributes.active_tab = self
            .registry
            .iter()
            .position(|t| t.is_default)
            .map(|i| i as i64);
    }
}

impl std::fmt::Debug for TabsInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabsInstance")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("tabs", &self.registry.len())
            .field("controller", &self.controller)
            .finish()
    }
}
