//! Style generation
//!
//! Turns container attributes into CSS custom properties and inline
//! declarations. Pure formatting: no state, no knowledge of activation.

use blocktabs_activation::Orientation;

use crate::attributes::{
    BlockGap, BorderAttributes, BorderRadius, BorderSide, BoxSpacing, ColorValue, CssValue,
    StateColors, TabsAttributes,
};

const DEFAULT_GAP: &str = "0.5em";
const DEFAULT_ICON_SIZE: &str = "24";
const DEFAULT_VERTICAL_WIDTH: &str = "50";

/// Ordered CSS declarations, e.g. `[("--bbb-tabs-gap", "0.5em")]`.
pub type Declarations = Vec<(String, String)>;

/// `prop:value;` pairs concatenated, ready for a `style` attribute.
pub fn inline_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(prop, value)| format!("{prop}:{value};"))
        .collect()
}

/// `var:a|b|c` becomes `var(--wp--a--b--c)`, numbers become pixels, anything
/// else passes through. Missing values use `default`.
pub fn resolve_spacing_size(value: Option<&CssValue>, default: &str) -> String {
    match value {
        Some(CssValue::Text(text)) => match text.strip_prefix("var:") {
            Some(rest) => format!("var(--wp--{})", rest.replace('|', "--")),
            None => text.clone(),
        },
        Some(CssValue::Number(n)) => format!("{n}px"),
        None => default.to_string(),
    }
}

/// Preset gaps (`var:preset|spacing|40`) become custom properties.
pub fn gap_css_value(value: &str) -> String {
    match value.strip_prefix("var:preset|spacing|") {
        Some(slug) if !slug.is_empty() && slug.bytes().all(|b| b.is_ascii_digit()) => {
            format!("var(--wp--preset--spacing--{slug})")
        }
        _ => value.to_string(),
    }
}

/// A `var:preset|color|slug` reference becomes its custom property.
fn preset_color(value: &str) -> String {
    match value.strip_prefix("var:preset|color|") {
        Some(_) => {
            let slug = value.rsplit('|').next().unwrap_or_default();
            format!("var(--wp--preset--color--{slug})")
        }
        None => value.to_string(),
    }
}

/// Raw colors pass through; preset objects prefer the slug's custom property.
pub fn resolve_color_value(value: Option<&ColorValue>, fallback: &str) -> String {
    match value {
        Some(ColorValue::Text(text)) if !text.is_empty() => text.clone(),
        Some(ColorValue::Preset { slug: Some(slug), .. }) if !slug.is_empty() => {
            format!("var(--wp--preset--color--{slug})")
        }
        Some(ColorValue::Preset { color: Some(color), .. }) if !color.is_empty() => color.clone(),
        _ => fallback.to_string(),
    }
}

/// Gap between the tab list and panels, and between tab headers.
///
/// The editor stores `top` as the main axis and `left` as the cross axis; a
/// vertical layout swaps which one separates the list from the panels.
pub fn gap_styles(attributes: &TabsAttributes) -> Declarations {
    let (main, cross) = match &attributes.style.spacing.block_gap {
        None => (DEFAULT_GAP.to_string(), DEFAULT_GAP.to_string()),
        Some(BlockGap::Uniform(gap)) => (gap_css_value(gap), gap_css_value(gap)),
        Some(BlockGap::Axes { top, left }) => (
            gap_css_value(top.as_deref().unwrap_or(DEFAULT_GAP)),
            gap_css_value(left.as_deref().unwrap_or(DEFAULT_GAP)),
        ),
    };

    let (list_gap, tabs_gap) = match attributes.orientation {
        Orientation::Vertical => (main, cross),
        Orientation::Horizontal => (cross, main),
    };

    vec![
        ("--bbb-tabs-list-gap".to_string(), list_gap),
        ("--bbb-tabs-gap".to_string(), tabs_gap),
    ]
}

fn padding_shorthand(padding: &BoxSpacing, defaults: [&str; 4]) -> String {
    format!(
        "{} {} {} {}",
        resolve_spacing_size(padding.top.as_ref(), defaults[0]),
        resolve_spacing_size(padding.right.as_ref(), defaults[1]),
        resolve_spacing_size(padding.bottom.as_ref(), defaults[2]),
        resolve_spacing_size(padding.left.as_ref(), defaults[3]),
    )
}

/// Custom properties consumed by the block stylesheet.
pub fn generate_styles(attributes: &TabsAttributes) -> Declarations {
    let mut styles = gap_styles(attributes);

    styles.push((
        "--bbb-tab-padding".to_string(),
        padding_shorthand(&attributes.tab_padding, ["5px", "15px", "5px", "15px"]),
    ));

    // (state, text, background, icon) defaults
    let defaults = [
        ("default", "#000", "#fff", "#000"),
        ("hover", "#fff", "#000", "#fff"),
        ("active", "#fff", "#000", "#fff"),
    ];

    let pick = |colors: &StateColors, state: &str| match state {
        "default" => colors.default.clone(),
        "hover" => colors.hover.clone(),
        _ => colors.active.clone(),
    };

    for (state, text, background, icon) in defaults {
        styles.push((
            format!("--bbb-tab-text-{state}-color"),
            resolve_color_value(pick(&attributes.tab_text_color, state).as_ref(), text),
        ));
        styles.push((
            format!("--bbb-tab-background-{state}-color"),
            resolve_color_value(
                pick(&attributes.tab_background_color, state).as_ref(),
                background,
            ),
        ));
        styles.push((
            format!("--bbb-tab-icon-{state}-color"),
            resolve_color_value(pick(&attributes.tab_icon_color, state).as_ref(), icon),
        ));
    }

    styles.push((
        "--bbb-tab-buttons-justify-content".to_string(),
        attributes.justification().to_string(),
    ));

    let icon_size = match &attributes.icon_size {
        Some(CssValue::Number(n)) => n.to_string(),
        Some(CssValue::Text(s)) if !s.is_empty() => s.clone(),
        _ => DEFAULT_ICON_SIZE.to_string(),
    };
    styles.push(("--bbb-tab-icon-size".to_string(), format!("{icon_size}px")));

    styles
}

fn numeric_px(value: &CssValue) -> String {
    match value {
        CssValue::Text(text) if text.trim().parse::<f64>().is_ok() => format!("{text}px"),
        other => other.to_px(),
    }
}

fn side_value(side: Option<&BorderSide>, prop: &str) -> Option<String> {
    let side = side?;
    match prop {
        "width" => side.width.as_ref().filter(|w| !w.is_empty()).map(numeric_px),
        "color" => side.color.as_deref().filter(|c| !c.is_empty()).map(preset_color),
        _ => side.style.clone().filter(|s| !s.is_empty()),
    }
}

/// Border declarations: radius, then width, color and style, each either as
/// a shorthand or per side.
pub fn border_styles(border: &BorderAttributes) -> String {
    let mut styles = Vec::new();

    match &border.radius {
        Some(BorderRadius::Uniform(radius)) if !radius.is_empty() => {
            styles.push(format!("border-radius: {};", numeric_px(radius)));
        }
        Some(BorderRadius::Corners {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }) => {
            let corner = |v: &Option<CssValue>| v.as_ref().map(numeric_px).unwrap_or_else(|| "0px".to_string());
            styles.push(format!(
                "border-radius: {} {} {} {};",
                corner(top_left),
                corner(top_right),
                corner(bottom_right),
                corner(bottom_left)
            ));
        }
        _ => {}
    }

    for prop in ["width", "color", "style"] {
        let shorthand = match prop {
            "width" => border.width.as_ref().filter(|w| !w.is_empty()).map(numeric_px),
            "color" => border.color.as_deref().filter(|c| !c.is_empty()).map(preset_color),
            _ => border.style.clone().filter(|s| !s.is_empty()),
        };

        if let Some(value) = shorthand {
            styles.push(format!("border-{prop}: {value};"));
            continue;
        }

        let sides = [
            ("top", border.top.as_ref()),
            ("right", border.right.as_ref()),
            ("bottom", border.bottom.as_ref()),
            ("left", border.left.as_ref()),
        ];
        for (name, side) in sides {
            if let Some(value) = side_value(side, prop) {
                styles.push(format!("border-{name}-{prop}: {value};"));
            }
        }
    }

    styles.join(" ")
}

/// Inline border style for each tab header.
pub fn tab_button_border_styles(attributes: &TabsAttributes) -> String {
    border_styles(&attributes.tab_border).trim().to_string()
}

/// Inline style for the tab list container.
pub fn container_styles(attributes: &TabsAttributes) -> String {
    let mut styles = vec![border_styles(&attributes.style.border)];

    let color = &attributes.style.color;
    if let Some(background) = color.background.as_deref().filter(|b| !b.is_empty()) {
        styles.push(format!("background-color: {background};"));
    }
    if let Some(gradient) = color.gradient.as_deref().filter(|g| !g.is_empty()) {
        styles.push(format!("background: {gradient};"));
    }

    styles.push(format!(
        "padding: {};",
        padding_shorthand(&attributes.style.spacing.padding, ["0px"; 4])
    ));

    match attributes.orientation {
        Orientation::Horizontal => {
            let margin = match attributes.justification() {
                "left" => Some("margin: 0 0 auto;"),
                "center" => Some("margin: 0 auto;"),
                "right" => Some("margin: 0 0 0 auto;"),
                "stretch" => Some("margin: 0;"),
                _ => None,
            };
            if let Some(margin) = margin {
                styles.push(margin.to_string());
            }
        }
        Orientation::Vertical => {
            let width = attributes
                .width
                .as_ref()
                .map(|w| match w {
                    CssValue::Number(n) => n.to_string(),
                    CssValue::Text(s) => s.clone(),
                })
                .unwrap_or_else(|| DEFAULT_VERTICAL_WIDTH.to_string());
            styles.push(format!("min-width: {width}%;"));
        }
    }

    styles
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
