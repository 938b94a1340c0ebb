//! Block attribute model
//!
//! Mirrors the JSON the block editor stores for a Tabs container and its Tab
//! children. Everything is optional; missing values fall back to the
//! defaults applied in [`crate::style`].

use blocktabs_activation::Orientation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A block as produced by the block parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBlock {
    #[serde(default)]
    pub block_name: Option<String>,
    #[serde(default)]
    pub attrs: serde_json::Value,
    #[serde(default)]
    pub inner_blocks: Vec<ParsedBlock>,
    #[serde(default, rename = "innerHTML")]
    pub inner_html: String,
}

impl ParsedBlock {
    /// Decode `attrs` into a typed attribute struct. Absent attrs decode to
    /// the default value.
    pub fn attributes<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if self.attrs.is_null() {
            return Ok(T::default());
        }
        Ok(serde_json::from_value(self.attrs.clone())?)
    }

    pub fn has_inner_blocks(&self) -> bool {
        !self.inner_blocks.is_empty()
    }
}

/// A CSS length as stored by the editor: either a bare number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssValue {
    Number(serde_json::Number),
    Text(String),
}

impl CssValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CssValue::Number(_) => false,
            CssValue::Text(s) => s.is_empty(),
        }
    }

    /// Numbers become pixels; strings pass through.
    pub fn to_px(&self) -> String {
        match self {
            CssValue::Number(n) => format!("{n}px"),
            CssValue::Text(s) => s.clone(),
        }
    }
}

/// A color as stored by the editor: raw value or a normalized preset object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Text(String),
    Preset {
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        slug: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateColors {
    pub default: Option<ColorValue>,
    pub hover: Option<ColorValue>,
    pub active: Option<ColorValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSpacing {
    pub top: Option<CssValue>,
    pub right: Option<CssValue>,
    pub bottom: Option<CssValue>,
    pub left: Option<CssValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockGap {
    Uniform(String),
    Axes {
        #[serde(default)]
        top: Option<String>,
        #[serde(default)]
        left: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    pub block_gap: Option<BlockGap>,
    pub padding: BoxSpacing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorStyle {
    pub background: Option<String>,
    pub gradient: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BorderRadius {
    Uniform(CssValue),
    #[serde(rename_all = "camelCase")]
    Corners {
        #[serde(default)]
        top_left: Option<CssValue>,
        #[serde(default)]
        top_right: Option<CssValue>,
        #[serde(default)]
        bottom_right: Option<CssValue>,
        #[serde(default)]
        bottom_left: Option<CssValue>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSide {
    pub width: Option<CssValue>,
    pub color: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderAttributes {
    pub radius: Option<BorderRadius>,
    pub width: Option<CssValue>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub top: Option<BorderSide>,
    pub right: Option<BorderSide>,
    pub bottom: Option<BorderSide>,
    pub left: Option<BorderSide>,
    /// Restrict the tab border to the active tab
    pub on_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStyle {
    pub spacing: Spacing,
    pub color: ColorStyle,
    pub border: BorderAttributes,
}

/// Attributes of the Tabs container block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabsAttributes {
    /// Index of the default tab among the rendered tabs
    pub active_tab: Option<i64>,
    pub orientation: Orientation,
    pub vertical_position: Option<String>,
    pub justification: Option<String>,
    pub icon_position: Option<String>,
    pub icon_size: Option<CssValue>,
    /// Tab list width in percent, vertical layout only
    pub width: Option<CssValue>,
    pub tab_padding: BoxSpacing,
    pub tab_text_color: StateColors,
    pub tab_background_color: StateColors,
    pub tab_icon_color: StateColors,
    pub tab_border: BorderAttributes,
    pub style: BlockStyle,
}

impl TabsAttributes {
    pub fn border_on_active(&self) -> bool {
        self.tab_border.on_active
    }

    pub fn justification(&self) -> &str {
        self.justification.as_deref().unwrap_or("left")
    }

    pub fn vertical_position(&self) -> &str {
        self.vertical_position.as_deref().unwrap_or("left")
    }

    pub fn icon_position(&self) -> &str {
        self.icon_position.as_deref().unwrap_or("left")
    }
}

/// Attributes of one Tab child block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabAttributes {
    pub tab_id: Option<String>,
    pub tabname: Option<String>,
    pub tab_icon: Option<String>,
}
