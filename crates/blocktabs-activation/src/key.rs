//! Keyboard input for tab headers

use serde::{Deserialize, Serialize};

/// Layout of the tab list. Decides which arrow pair moves between tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

/// A key pressed while a tab header has focus, named after DOM `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabKey {
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Other(String),
}

/// Relative move through the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

impl TabKey {
    /// Enter and Space activate the focused tab.
    pub fn is_select(&self) -> bool {
        matches!(self, TabKey::Enter | TabKey::Space)
    }

    /// Arrows only move along the axis of the tab list.
    pub fn step(&self, orientation: Orientation) -> Option<Step> {
        match (orientation, self) {
            (Orientation::Horizontal, TabKey::ArrowRight) => Some(Step::Next),
            (Orientation::Horizontal, TabKey::ArrowLeft) => Some(Step::Previous),
            (Orientation::Vertical, TabKey::ArrowDown) => Some(Step::Next),
            (Orientation::Vertical, TabKey::ArrowUp) => Some(Step::Previous),
            _ => None,
        }
    }
}

impl From<&str> for TabKey {
    fn from(key: &str) -> Self {
        match key {
            "Enter" => TabKey::Enter,
            " " | "Space" | "Spacebar" => TabKey::Space,
            "ArrowLeft" | "Left" => TabKey::ArrowLeft,
            "ArrowRight" | "Right" => TabKey::ArrowRight,
            "ArrowUp" | "Up" => TabKey::ArrowUp,
            "ArrowDown" | "Down" => TabKey::ArrowDown,
            other => TabKey::Other(other.to_string()),
        }
    }
}

/// Result of a keydown on a tab header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key changed (or confirmed) the active tab.
    /// `focus` names the tab that must receive input focus, if any.
    Activated { id: String, focus: Option<String> },
    /// Recognised key but nothing to act on (empty registry, unknown tab)
    Ignored,
    /// Not a tab key; the caller keeps the browser default
    Unhandled,
}

impl KeyOutcome {
    /// Whether the caller should suppress the browser default.
    pub fn is_handled(&self) -> bool {
        !matches!(self, KeyOutcome::Unhandled)
    }

    pub fn focus_target(&self) -> Option<&str> {
        match self {
            KeyOutcome::Activated { focus, .. } => focus.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_names() {
        assert_eq!(TabKey::from(" "), TabKey::Space);
        assert_eq!(TabKey::from("Enter"), TabKey::Enter);
        assert_eq!(TabKey::from("ArrowRight"), TabKey::ArrowRight);
        assert_eq!(TabKey::from("Tab"), TabKey::Other("Tab".to_string()));
    }

    #[test]
    fn test_step_follows_orientation() {
        assert_eq!(TabKey::ArrowRight.step(Orientation::Horizontal), Some(Step::Next));
        assert_eq!(TabKey::ArrowLeft.step(Orientation::Horizontal), Some(Step::Previous));
        assert_eq!(TabKey::ArrowDown.step(Orientation::Horizontal), None);
        assert_eq!(TabKey::ArrowDown.step(Orientation::Vertical), Some(Step::Next));
        assert_eq!(TabKey::ArrowUp.step(Orientation::Vertical), Some(Step::Previous));
        assert_eq!(TabKey::ArrowRight.step(Orientation::Vertical), None);
        assert_eq!(TabKey::Enter.step(Orientation::Horizontal), None);
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("Vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
