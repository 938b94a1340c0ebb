//! Page state
//!
//! Every Tabs container on a page owns an independent instance. Events are
//! routed by instance id; nothing is shared between instances.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use blocktabs_activation::{KeyOutcome, TabView};
use blocktabs_block::{hydrate_page, HydratedTabs, TabsAttributes};

use crate::error::CoreError;
use crate::instance::TabsInstance;
use crate::Result;

#[derive(Default)]
struct PageInner {
    instances: HashMap<String, TabsInstance>,
    order: Vec<String>,
}

/// Thread-safe set of Tabs instances on one page
#[derive(Clone, Default)]
pub struct TabsPage {
    inner: Arc<Mutex<PageInner>>,
}

impl TabsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page from rendered markup, one instance per container.
    pub fn hydrate(html: &str) -> Result<Self> {
        let page = Self::new();
        for hydrated in hydrate_page(html)? {
            let (mut instance, anchor) = instance_from_hydrated(hydrated);
            if let Some(anchor) = anchor {
                if page.contains(&anchor) {
                    tracing::warn!(
                        anchor = %anchor,
                        instance_id = %instance.id,
                        "Duplicate tabs container id, keeping generated id"
                    );
                } else {
                    instance.id = anchor;
                }
            }
            page.insert(instance);
        }

        tracing::debug!(instances = page.len(), "Tabs page ready");
        Ok(page)
    }

    /// Add an instance; returns its id. An instance with the same id is
    /// replaced in place.
    pub fn insert(&self, instance: TabsInstance) -> String {
        let id = instance.id.clone();
        let mut inner = self.inner.lock();
        if inner.instances.insert(id.clone(), instance).is_none() {
            inner.order.push(id.clone());
        }
        id
    }

    pub fn remove(&self, id: &str) -> Result<TabsInstance> {
        let mut inner = self.inner.lock();
        let instance = inner
            .instances
            .remove(id)
            .ok_or_else(|| CoreError::InstanceNotFound(id.to_string()))?;
        inner.order.retain(|i| i != id);
        Ok(instance)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().instances.contains_key(id)
    }

    /// Instance ids in document order
    pub fn ids(&self) -> Vec<String> {
        self.inner.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn with_instance<F, T>(&self, id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut TabsInstance) -> T,
    {
        let mut inner = self.inner.lock();
        match inner.instances.get_mut(id) {
            Some(instance) => Ok(f(instance)),
            None => {
                tracing::warn!(instance_id = %id, "Event for unknown tabs instance");
                Err(CoreError::InstanceNotFound(id.to_string()))
            }
        }
    }

    pub fn click(&self, id: &str, tab_id: &str) -> Result<bool> {
        self.with_instance(id, |instance| instance.click(tab_id))
    }

    pub fn key_down(&self, id: &str, key: &str, current_tab: &str) -> Result<KeyOutcome> {
        self.with_instance(id, |instance| instance.key_down(key, current_tab))
    }

    pub fn active_id(&self, id: &str) -> Result<Option<String>> {
        self.with_instance(id, |instance| instance.active_id().map(str::to_owned))
    }

    pub fn views(&self, id: &str) -> Result<Vec<TabView>> {
        self.with_instance(id, |instance| instance.views())
    }

    pub fn render(&self, id: &str) -> Result<String> {
        self.with_instance(id, |instance| instance.render())?
    }
}

/// The instance keeps its generated id; the container anchor is returned
/// for the caller to apply.
fn instance_from_hydrated(hydrated: HydratedTabs) -> (TabsInstance, Option<String>) {
    let mut attributes = TabsAttributes {
        orientation: hydrated.orientation,
        ..Default::default()
    };
    attributes.tab_border.on_active = hydrated.border_on_active;

    let name = hydrated
        .anchor
        .clone()
        .unwrap_or_else(|| format!("tabs-{}", hydrated.index + 1));
    let mut instance = TabsInstance::new(name, attributes, hydrated.registry);
    for (tab_id, content) in hydrated.panels {
        instance.set_panel(&tab_id, content);
    }

    (instance, hydrated.anchor)
}
