//! Tabs Block markup layer
//!
//! Reads the parsed block tree, produces the registry the activation core
//! runs on, renders the markup and rebuilds registries from rendered pages.

mod attributes;
mod context;
mod error;
mod extract;
mod hydrate;
mod render;
mod style;

pub use attributes::{
    BlockGap, BlockStyle, BorderAttributes, BorderRadius, BorderSide, BoxSpacing, ColorStyle,
    ColorValue, CssValue, ParsedBlock, Spacing, StateColors, TabAttributes, TabsAttributes,
};
pub use context::{ContextTab, InteractivityContext};
pub use error::BlockError;
pub use extract::{extract_tabs, ExtractedTabs};
pub use hydrate::{hydrate_page, HydratedTabs};
pub use render::{panel_id, render_block, render_tabs, wrapper_classes, INTERACTIVE_NAMESPACE};
pub use style::{
    border_styles, container_styles, gap_css_value, gap_styles, generate_styles, inline_style,
    resolve_color_value, resolve_spacing_size, tab_button_border_styles, Declarations,
};

pub type Result<T> = std::result::Result<T, BlockError>;
