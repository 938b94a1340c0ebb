//! Tabs Block activation
//!
//! One Tabs instance owns one [`TabRegistry`] and one [`ActivationController`].
//! The controller decides which single tab is active, reacts to clicks and
//! keyboard input, and derives the per-tab view state (tabindex,
//! aria-selected, active border) the render layer emits.

mod border;
mod controller;
mod error;
mod key;
mod registry;
mod state;
mod tab;

pub use border::should_show_active_border;
pub use controller::{ActivationController, ChangeListener, FocusTarget, TabView};
pub use error::TabError;
pub use key::{KeyOutcome, Orientation, Step, TabKey};
pub use registry::TabRegistry;
pub use state::ActivationState;
pub use tab::TabDescriptor;

pub type Result<T> = std::result::Result<T, TabError>;
