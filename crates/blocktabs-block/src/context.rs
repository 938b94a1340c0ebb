//! Interactivity context
//!
//! JSON attached to each rendered Tabs container. The front end reads it to
//! rebuild the registry and border flag for that one instance.

use blocktabs_activation::{Orientation, TabDescriptor, TabRegistry};
use serde::{Deserialize, Serialize};

use crate::extract::ExtractedTabs;
use crate::style::tab_button_border_styles;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextTab {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_true", rename = "hasInnerblock")]
    pub has_inner_block: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractivityContext {
    pub tabs: Vec<ContextTab>,
    /// Index of the default tab
    pub active_tab: usize,
    pub active_id: String,
    #[serde(default)]
    pub tab_button_border_styles: String,
    #[serde(default)]
    pub border_on_active: bool,
    #[serde(default)]
    pub orientation: Orientation,
}

impl InteractivityContext {
    /// `None` when there is nothing to render.
    pub fn build(extracted: &ExtractedTabs) -> Option<Self> {
        let registry = &extracted.registry;
        let active_tab = registry.default_index()?;
        let active_id = registry.at(active_tab)?.id.clone();

        Some(Self {
            tabs: registry
                .iter()
                .map(|t| ContextTab {
                    id: t.id.clone(),
                    label: t.label.clone(),
                    has_inner_block: true,
                })
                .collect(),
            active_tab,
            active_id,
            tab_button_border_styles: tab_button_border_styles(&extracted.attributes),
            border_on_active: extracted.attributes.border_on_active(),
            orientation: extracted.attributes.orientation,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the registry, flagging the tab at `active_tab` as default.
    pub fn to_registry(&self) -> Result<TabRegistry> {
        let tabs = self
            .tabs
            .iter()
            .filter(|t| t.has_inner_block)
            .enumerate()
            .map(|(index, t)| {
                Ok(TabDescriptor::new(t.id.clone())?
                    .with_label(t.label.clone())
                    .with_default(index == self.active_tab))
            })
            .collect::<blocktabs_activation::Result<Vec<_>>>()?;

        Ok(TabRegistry::new(tabs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::TabsAttributes;

    fn extracted(default: Option<usize>) -> ExtractedTabs {
        let mut tabs: Vec<_> = ["tab-a", "tab-b", "tab-c"]
            .iter()
            .map(|id| TabDescriptor::new(*id).unwrap().with_label(id.to_uppercase()))
            .collect();
        if let Some(index) = default {
            tabs[index].is_default = true;
        }

        ExtractedTabs {
            attributes: TabsAttributes::default(),
            registry: TabRegistry::new(tabs).unwrap(),
            panels: vec![String::new(); 3],
        }
    }

    #[test]
    fn test_build_uses_default_tab() {
        let context = InteractivityContext::build(&extracted(Some(2))).unwrap();
        assert_eq!(context.active_tab, 2);
        assert_eq!(context.active_id, "tab-c");
        assert_eq!(context.tabs.len(), 3);

        let context = InteractivityContext::build(&extracted(None)).unwrap();
        assert_eq!(context.active_id, "tab-a");
    }

    #[test]
    fn test_build_empty_is_none() {
        let empty = ExtractedTabs {
            attributes: TabsAttributes::default(),
            registry: TabRegistry::empty(),
            panels: Vec::new(),
        };
        assert!(InteractivityContext::build(&empty).is_none());
    }

    #[test]
    fn test_json_shape() {
        let context = InteractivityContext::build(&extracted(Some(1))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&context.to_json().unwrap()).unwrap();
        assert_eq!(value["activeTab"], 1);
        assert_eq!(value["activeId"], "tab-b");
        assert_eq!(value["borderOnActive"], false);
        assert_eq!(value["tabs"][0]["hasInnerblock"], true);
        assert_eq!(value["orientation"], "horizontal");
    }

    #[test]
    fn test_registry_roundtrip_keeps_default() {
        let context = InteractivityContext::build(&extracted(Some(1))).unwrap();
        let parsed = InteractivityContext::from_json(&context.to_json().unwrap()).unwrap();
        let registry = parsed.to_registry().unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.default_id(), Some("tab-b"));
        assert_eq!(registry.at(0).unwrap().label, "TAB-A");
    }

    #[test]
    fn test_minimal_context_from_older_markup() {
        let json = r#"{"tabs":[{"id":"tab-0","label":""}],"activeTab":0,"activeId":"tab-0"}"#;
        let context = InteractivityContext::from_json(json).unwrap();
        assert!(!context.border_on_active);
        assert_eq!(context.orientation, Orientation::Horizontal);
        assert_eq!(context.to_registry().unwrap().default_id(), Some("tab-0"));
    }
}
