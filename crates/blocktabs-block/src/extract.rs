//! Tab extraction from a parsed Tabs block

use blocktabs_activation::{TabDescriptor, TabRegistry};

use crate::attributes::{ParsedBlock, TabAttributes, TabsAttributes};
use crate::Result;

/// Everything the render layer needs from one parsed Tabs block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTabs {
    pub attributes: TabsAttributes,
    pub registry: TabRegistry,
    /// Panel markup per tab, in registry order
    pub panels: Vec<String>,
}

/// Build the registry of a Tabs block from its Tab children.
///
/// Tabs without inner content are not rendered and are dropped. Ids come
/// from the stored `tabId`, or the child position when none was stored; a
/// tab whose id is already taken is dropped as well.
pub fn extract_tabs(block: &ParsedBlock) -> Result<ExtractedTabs> {
    let attributes: TabsAttributes = block.attributes()?;

    let mut tabs = Vec::with_capacity(block.inner_blocks.len());
    let mut panels = Vec::with_capacity(block.inner_blocks.len());

    for (position, inner) in block.inner_blocks.iter().enumerate() {
        if !inner.has_inner_blocks() {
            tracing::debug!(position, "Skipping tab without content");
            continue;
        }

        let attrs: TabAttributes = inner.attributes()?;
        let id = TabDescriptor::derive_id(attrs.tab_id.as_deref(), position);
        if tabs.iter().any(|t: &TabDescriptor| t.id == id) {
            tracing::warn!(position, tab_id = %id, "Skipping tab with duplicate id");
            continue;
        }
        let tab = TabDescriptor::new(id)?
            .with_label(attrs.tabname.unwrap_or_default())
            .with_icon(attrs.tab_icon.unwrap_or_default());

        tabs.push(tab);
        panels.push(inner.inner_html.clone());
    }

    // The container stores the default as an index; only a valid one
    // becomes a flag, otherwise the first-tab fallback applies.
    if let Some(index) = attributes.active_tab {
        if index >= 0 {
            if let Some(tab) = tabs.get_mut(index as usize) {
                tab.is_default = true;
            }
        }
    }

    let registry = TabRegistry::new(tabs)?;

    Ok(ExtractedTabs {
        attributes,
        registry,
        panels,
    })
}
