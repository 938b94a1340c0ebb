//! Server-side markup
//!
//! Emits the Tabs container, one header per tab and one panel per tab. The
//! initial `tabindex`, `aria-selected`, active class, border and `hidden`
//! state come from an [`ActivationController`], so the markup matches what
//! the interactive layer will compute on hydration.

use blocktabs_activation::{ActivationController, TabRegistry, TabView};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::attributes::{ParsedBlock, TabsAttributes};
use crate::context::InteractivityContext;
use crate::extract::{extract_tabs, ExtractedTabs};
use crate::style::{container_styles, generate_styles, inline_style};
use crate::Result;

/// Store namespace of the front-end interactivity layer
pub const INTERACTIVE_NAMESPACE: &str = "blablablocks-tabs";

/// Panel id for a tab header id
pub fn panel_id(tab_id: &str) -> String {
    format!("{tab_id}-panel")
}

/// Classes of the outer container.
pub fn wrapper_classes(attributes: &TabsAttributes) -> Vec<String> {
    let orientation = attributes.orientation.as_str();
    let mut classes = vec![
        "blablablocks-tabs".to_string(),
        "blablablocks-tab-container".to_string(),
        format!("blablablocks-tabs__{orientation}"),
        format!("blablablocks-tabs__{}", attributes.vertical_position()),
    ];

    if attributes.justification() == "stretch" && orientation == "horizontal" {
        classes.push("blablablocks-tabs__autoWidth".to_string());
    }

    classes.push(format!(
        "blablablocks-tabs-icon__{}",
        attributes.icon_position()
    ));
    classes
}

/// Parse, initialize and render one Tabs block. Empty blocks render nothing.
pub fn render_block(block: &ParsedBlock) -> Result<String> {
    let extracted = extract_tabs(block)?;
    let mut controller = ActivationController::new();
    controller.initialize(&extracted.registry);
    render_tabs(&extracted, &controller)
}

/// Render with the current state of `controller`.
pub fn render_tabs(extracted: &ExtractedTabs, controller: &ActivationController) -> Result<String> {
    let Some(context) = InteractivityContext::build(extracted) else {
        return Ok(String::new());
    };

    let attributes = &extracted.attributes;
    let registry = &extracted.registry;
    let views = controller.views(registry, attributes.border_on_active());

    let mut html = String::new();
    html.push_str(&format!(
        r#"<div class="{}" style="{}" data-wp-interactive="{}" data-wp-context="{}" data-wp-init="callbacks.initTabs" data-wp-watch="callbacks.updateTabBorders">"#,
        attr(&wrapper_classes(attributes).join(" ")),
        attr(&inline_style(&generate_styles(attributes))),
        INTERACTIVE_NAMESPACE,
        attr(&context.to_json()?),
    ));

    html.push_str(&format!(
        r#"<ul class="blablablocks-tabs-buttons" role="tablist" aria-orientation="{}" style="{}">"#,
        attributes.orientation,
        attr(&container_styles(attributes)),
    ));
    for (position, view) in views.iter().enumerate() {
        html.push_str(&render_header(registry, position, view, &context.tab_button_border_styles));
    }
    html.push_str("</ul>");

    html.push_str(r#"<div class="blablablocks-tabs-content">"#);
    for (view, panel) in views.iter().zip(&extracted.panels) {
        html.push_str(&render_panel(view, panel));
    }
    html.push_str("</div></div>");

    tracing::debug!(
        tab_count = registry.len(),
        active_id = ?controller.active_id(),
        "Rendered tabs block"
    );

    Ok(html)
}

fn render_header(registry: &TabRegistry, position: usize, view: &TabView, border_style: &str) -> String {
    let Some(tab) = registry.at(position) else {
        return String::new();
    };

    let class = if view.is_active {
        "blablablock-tab-btn is-bbb-active-tab"
    } else {
        "blablablock-tab-btn"
    };

    let style = if view.show_active_border && !border_style.is_empty() {
        format!(r#" style="{}""#, attr(border_style))
    } else {
        String::new()
    };

    let mut html = format!(
        r#"<li class="{class}" id="{id}" role="tab" aria-controls="{panel}" aria-selected="{selected}" tabindex="{tabindex}" data-wp-bind--tabindex="state.tabIndex" data-wp-bind--aria-selected="state.isActive" data-wp-on--click="actions.setActiveTab" data-wp-on--keydown="actions.handleOnKeyDown" data-wp-class--is-bbb-active-tab="state.isActive"{style}>"#,
        id = attr(&tab.id),
        panel = attr(&panel_id(&tab.id)),
        selected = view.aria_selected,
        tabindex = view.tab_index,
    );

    // Icon markup is authored SVG and is emitted as is.
    if let Some(icon) = tab.icon.as_deref().filter(|i| !i.is_empty()) {
        html.push_str(&format!(r#"<span class="bbb-tab-icon">{icon}</span>"#));
    }
    if let Some(label) = tab.display_label(position) {
        html.push_str(&format!(
            r#"<span class="tab-button-text">{}</span>"#,
            text(&label)
        ));
    }

    html.push_str("</li>");
    html
}

fn render_panel(view: &TabView, content: &str) -> String {
    let hidden = if view.is_active { "" } else { " hidden" };
    format!(
        r#"<div class="blablablocks-tab-content" id="{panel}" role="tabpanel" tabindex="0" aria-labelledby="{id}" data-wp-bind--hidden="!state.isActive"{hidden}>{content}</div>"#,
        panel = attr(&panel_id(&view.id)),
        id = attr(&view.id),
    )
}
