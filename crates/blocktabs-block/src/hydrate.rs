//! Hydration of rendered markup
//!
//! Finds every Tabs container on a page and rebuilds its registry. Each
//! container carries its own context, so instances never share state.

use blocktabs_activation::{Orientation, TabDescriptor, TabRegistry};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use crate::context::InteractivityContext;
use crate::error::BlockError;
use crate::render::INTERACTIVE_NAMESPACE;
use crate::Result;

/// One Tabs container found in a page
#[derive(Debug, Clone, PartialEq)]
pub struct HydratedTabs {
    /// Position of the container in document order
    pub index: usize,
    /// The container's `id` attribute, when it has one
    pub anchor: Option<String>,
    pub registry: TabRegistry,
    pub border_on_active: bool,
    pub orientation: Orientation,
    /// Panel markup keyed by the id of the tab that labels it
    pub panels: HashMap<String, String>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BlockError::Selector(format!("{css}: {e}")))
}

/// Scan `html` for Tabs containers.
///
/// Containers whose context is missing or malformed fall back to the tab
/// headers in their markup; containers with neither are skipped.
pub fn hydrate_page(html: &str) -> Result<Vec<HydratedTabs>> {
    let doc = Html::parse_document(html);
    let containers = selector(&format!(r#"[data-wp-interactive="{INTERACTIVE_NAMESPACE}"]"#))?;
    let headers = selector(r#"[role="tab"]"#)?;
    let label = selector(".tab-button-text")?;
    let panels = selector(r#"[role="tabpanel"]"#)?;

    let mut found = Vec::new();
    for (index, container) in doc.select(&containers).enumerate() {
        let anchor = container.value().attr("id").map(str::to_owned);

        let hydrated = match container.value().attr("data-wp-context") {
            Some(json) => match from_context(json) {
                Ok(hydrated) => Some(hydrated),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Malformed tabs context, reading headers");
                    from_headers(container, &headers, &label)
                }
            },
            None => from_headers(container, &headers, &label),
        };

        match hydrated {
            Some((registry, border_on_active, orientation)) => {
                let panels = panel_markup(container, &panels, &registry);
                found.push(HydratedTabs {
                    index,
                    anchor,
                    registry,
                    border_on_active,
                    orientation,
                    panels,
                })
            }
            None => tracing::warn!(index, "Tabs container without tabs skipped"),
        }
    }

    tracing::info!(instances = found.len(), "Hydrated tabs page");
    Ok(found)
}

fn panel_markup(
    container: ElementRef<'_>,
    panels: &Selector,
    registry: &TabRegistry,
) -> HashMap<String, String> {
    container
        .select(panels)
        .filter_map(|panel| {
            let tab_id = panel.value().attr("aria-labelledby")?;
            registry
                .contains(tab_id)
                .then(|| (tab_id.to_owned(), panel.inner_html()))
        })
        .collect()
}

fn from_context(json: &str) -> Result<(TabRegistry, bool, Orientation)> {
    let context = InteractivityContext::from_json(json)?;
    let registry = context.to_registry()?;
    Ok((registry, context.border_on_active, context.orientation))
}

fn from_headers(
    container: ElementRef<'_>,
    headers: &Selector,
    label: &Selector,
) -> Option<(TabRegistry, bool, Orientation)> {
    let mut tabs = Vec::new();
    for header in container.select(headers) {
        let Some(id) = header.value().attr("id") else {
            continue;
        };
        let text = header
            .select(label)
            .next()
            .map(|l| l.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let selected = header.value().attr("aria-selected") == Some("true");

        match TabDescriptor::new(id) {
            Ok(tab) => tabs.push(tab.with_label(text).with_default(selected)),
            Err(e) => tracing::debug!(error = %e, "Skipping tab header"),
        }
    }

    if tabs.is_empty() {
        return None;
    }

    let orientation = container
        .select(&Selector::parse(r#"[role="tablist"]"#).ok()?)
        .next()
        .and_then(|list| list.value().attr("aria-orientation"))
        .and_then(|o| o.parse().ok())
        .unwrap_or_default();

    match TabRegistry::new(tabs) {
        Ok(registry) => Some((registry, false, orientation)),
        Err(e) => {
            tracing::warn!(error = %e, "Tabs headers rejected");
            None
        }
    }
}
