//! Activation Controller
//!
//! Single source of truth for which tab of one Tabs instance is active.
//! Every operation is synchronous and absorbs stale or out-of-range input as
//! a no-op; nothing here may take the page down.

use serde::Serialize;

use crate::border::should_show_active_border;
use crate::error::TabError;
use crate::key::{KeyOutcome, Orientation, Step, TabKey};
use crate::registry::TabRegistry;
use crate::state::ActivationState;
use crate::Result;

/// Called with `(previous, current)` whenever the active id changes.
pub type ChangeListener = Box<dyn FnMut(Option<&str>, Option<&str>) + Send>;

/// Moves input focus to a tab header. Injected so the controller never
/// touches a document.
pub trait FocusTarget: Send {
    fn focus(&mut self, tab_id: &str);
}

impl<F> FocusTarget for F
where
    F: FnMut(&str) + Send,
{
    fn focus(&mut self, tab_id: &str) {
        self(tab_id)
    }
}

/// Derived per-tab view state, read once per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    pub id: String,
    pub is_active: bool,
    pub tab_index: i32,
    pub aria_selected: bool,
    pub show_active_border: bool,
}

#[derive(Default)]
pub struct ActivationController {
    state: ActivationState,
    focus: Option<Box<dyn FocusTarget>>,
    on_change: Option<ChangeListener>,
}

impl ActivationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_focus_target(mut self, target: impl FocusTarget + 'static) -> Self {
        self.focus = Some(Box::new(target));
        self
    }

    pub fn with_change_listener(
        mut self,
        listener: impl FnMut(Option<&str>, Option<&str>) + Send + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn state(&self) -> &ActivationState {
        &self.state
    }

    pub fn active_id(&self) -> Option<&str> {
        self.state.active_id()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Pick the registry default. Repeated calls are no-ops.
    ///
    /// Returns `true` only for the call that performed the initialization.
    pub fn initialize(&mut self, registry: &TabRegistry) -> bool {
        if self.state.is_initialized() {
            return false;
        }

        let initial = registry.default_id().map(str::to_owned);
        tracing::debug!(
            active_id = ?initial,
            tab_count = registry.len(),
            "Initialized tab activation"
        );
        self.set_active(initial);
        true
    }

    /// Activate a tab by id. Unknown ids leave the state untouched.
    pub fn activate(&mut self, registry: &TabRegistry, id: &str) -> Result<()> {
        if !registry.contains(id) {
            return Err(TabError::NotFound(id.to_string()));
        }

        self.set_active(Some(id.to_string()));
        Ok(())
    }

    pub fn activate_by_index(&mut self, registry: &TabRegistry, index: usize) -> Result<()> {
        let tab = registry.at(index).ok_or(TabError::IndexOutOfRange {
            index,
            len: registry.len(),
        })?;

        self.set_active(Some(tab.id.clone()));
        Ok(())
    }

    /// Keyboard navigation relative to the focused tab `current_id`, which is
    /// not necessarily the active one.
    pub fn handle_key(
        &mut self,
        registry: &TabRegistry,
        key: &TabKey,
        current_id: &str,
        orientation: Orientation,
    ) -> KeyOutcome {
        if key.is_select() {
            return match self.activate(registry, current_id) {
                Ok(()) => KeyOutcome::Activated {
                    id: current_id.to_string(),
                    focus: None,
                },
                Err(_) => KeyOutcome::Ignored,
            };
        }

        let Some(step) = key.step(orientation) else {
            return KeyOutcome::Unhandled;
        };

        let Some(current) = registry.index_of(current_id) else {
            tracing::debug!(tab_id = %current_id, "Key on unknown tab ignored");
            return KeyOutcome::Ignored;
        };

        let len = registry.len();
        let target = match step {
            Step::Next => (current + 1) % len,
            Step::Previous => (current + len - 1) % len,
        };
        let Some(tab) = registry.at(target) else {
            return KeyOutcome::Ignored;
        };
        let id = tab.id.clone();

        self.set_active(Some(id.clone()));
        if let Some(focus) = self.focus.as_mut() {
            focus.focus(&id);
        }

        KeyOutcome::Activated {
            id: id.clone(),
            focus: Some(id),
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.state.active_id() == Some(id)
    }

    /// Roving tabindex: only the active tab is reachable with Tab.
    pub fn tab_index_for(&self, id: &str) -> i32 {
        if self.is_active(id) {
            0
        } else {
            -1
        }
    }

    /// Re-resolve after the registry mutated. Falls back to the registry
    /// default when the active id no longer exists.
    ///
    /// Returns `true` when the active tab changed.
    pub fn reconcile(&mut self, registry: &TabRegistry) -> bool {
        let stale = match &self.state {
            ActivationState::Uninitialized => return false,
            ActivationState::Initialized(Some(id)) => !registry.contains(id),
            ActivationState::Initialized(None) => !registry.is_empty(),
        };

        if !stale {
            return false;
        }

        let fallback = registry.default_id().map(str::to_owned);
        tracing::debug!(
            stale = ?self.state.active_id(),
            fallback = ?fallback,
            "Reconciled active tab"
        );
        self.set_active(fallback);
        true
    }

    pub fn views(&self, registry: &TabRegistry, border_on_active: bool) -> Vec<TabView> {
        let active = self.active_id();
        registry
            .iter()
            .map(|tab| {
                let is_active = self.is_active(&tab.id);
                TabView {
                    id: tab.id.clone(),
                    is_active,
                    tab_index: self.tab_index_for(&tab.id),
                    aria_selected: is_active,
                    show_active_border: should_show_active_border(
                        &tab.id,
                        active,
                        border_on_active,
                    ),
                }
            })
            .collect()
    }

    fn set_active(&mut self, next: Option<String>) {
        let previous = self.state.active_id().map(str::to_owned);
        self.state = ActivationState::Initialized(next);

        let current = self.state.active_id();
        if previous.as_deref() == current {
            return;
        }

        tracing::debug!(
            from = previous.as_deref().unwrap_or("-"),
            to = current.unwrap_or("-"),
            "Tab activation transition"
        );

        if let Some(listener) = self.on_change.as_mut() {
            listener(previous.as_deref(), current);
        }
    }
}

impl std::fmt::Debug for ActivationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationController")
            .field("state", &self.state)
            .field("focus", &self.focus.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::TabDescriptor;
    use std::sync::{Arc, Mutex};

    fn registry(ids: &[&str]) -> TabRegistry {
        TabRegistry::new(
            ids.iter()
                .map(|id| TabDescriptor::new(*id).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn initialized(registry: &TabRegistry) -> ActivationController {
        let mut controller = ActivationController::new();
        controller.initialize(registry);
        controller
    }

    fn right(controller: &mut ActivationController, registry: &TabRegistry, current: &str) -> KeyOutcome {
        controller.handle_key(registry, &TabKey::ArrowRight, current, Orientation::Horizontal)
    }

    fn left(controller: &mut ActivationController, registry: &TabRegistry, current: &str) -> KeyOutcome {
        controller.handle_key(registry, &TabKey::ArrowLeft, current, Orientation::Horizontal)
    }

    #[test]
    fn test_initialize_picks_first_tab() {
        let tabs = registry(&["a", "b", "c"]);
        let controller = initialized(&tabs);
        assert_eq!(controller.active_id(), Some("a"));
    }

    #[test]
    fn test_initialize_picks_flagged_tab() {
        let tabs = TabRegistry::new(vec![
            TabDescriptor::new("a").unwrap(),
            TabDescriptor::new("b").unwrap().with_default(true),
            TabDescriptor::new("c").unwrap(),
        ])
        .unwrap();
        let controller = initialized(&tabs);
        assert_eq!(controller.active_id(), Some("b"));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = ActivationController::new();
        assert!(controller.initialize(&tabs));
        controller.activate(&tabs, "c").unwrap();
        assert!(!controller.initialize(&tabs));
        assert_eq!(controller.active_id(), Some("c"));
    }

    #[test]
    fn test_empty_registry() {
        let tabs = TabRegistry::empty();
        let mut controller = initialized(&tabs);
        assert!(controller.is_initialized());
        assert_eq!(controller.active_id(), None);
        assert!(!controller.is_active("anything"));
        assert_eq!(controller.tab_index_for("anything"), -1);

        assert!(controller.activate(&tabs, "anything").is_err());
        assert_eq!(right(&mut controller, &tabs, "anything"), KeyOutcome::Ignored);
        assert_eq!(
            controller.handle_key(&tabs, &TabKey::Enter, "anything", Orientation::Horizontal),
            KeyOutcome::Ignored
        );
        assert_eq!(controller.active_id(), None);
    }

    #[test]
    fn test_activate_is_exclusive() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);
        for tab in tabs.iter() {
            controller.activate(&tabs, &tab.id).unwrap();
            assert!(controller.is_active(&tab.id));
            for other in tabs.iter().filter(|t| t.id != tab.id) {
                assert!(!controller.is_active(&other.id));
            }
        }
    }

    #[test]
    fn test_activate_unknown_id_is_noop() {
        let tabs = registry(&["a", "b"]);
        let mut controller = initialized(&tabs);
        let result = controller.activate(&tabs, "nonexistent-id");
        assert_eq!(result, Err(TabError::NotFound("nonexistent-id".to_string())));
        assert_eq!(controller.active_id(), Some("a"));
    }

    #[test]
    fn test_activate_by_index() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);
        controller.activate_by_index(&tabs, 2).unwrap();
        assert_eq!(controller.active_id(), Some("c"));

        let result = controller.activate_by_index(&tabs, 3);
        assert_eq!(result, Err(TabError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(controller.active_id(), Some("c"));
    }

    #[test]
    fn test_arrow_right_wraps_forward() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);
        controller.activate(&tabs, "b").unwrap();

        right(&mut controller, &tabs, "b");
        assert_eq!(controller.active_id(), Some("c"));

        let outcome = right(&mut controller, &tabs, "c");
        assert_eq!(controller.active_id(), Some("a"));
        assert_eq!(outcome.focus_target(), Some("a"));
    }

    #[test]
    fn test_arrow_left_wraps_backward() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);

        let outcome = left(&mut controller, &tabs, "a");
        assert_eq!(controller.active_id(), Some("c"));
        assert_eq!(
            outcome,
            KeyOutcome::Activated {
                id: "c".to_string(),
                focus: Some("c".to_string()),
            }
        );
    }

    #[test]
    fn test_wrap_for_every_position() {
        let ids = ["a", "b", "c", "d"];
        let tabs = registry(&ids);
        let n = ids.len();
        for i in 0..n {
            let mut controller = initialized(&tabs);
            right(&mut controller, &tabs, ids[i]);
            assert_eq!(controller.active_id(), Some(ids[(i + 1) % n]));

            left(&mut controller, &tabs, ids[i]);
            assert_eq!(controller.active_id(), Some(ids[(i + n - 1) % n]));
        }
    }

    #[test]
    fn test_single_tab_wraps_to_itself() {
        let tabs = registry(&["only"]);
        let mut controller = initialized(&tabs);
        right(&mut controller, &tabs, "only");
        assert_eq!(controller.active_id(), Some("only"));
        left(&mut controller, &tabs, "only");
        assert_eq!(controller.active_id(), Some("only"));
    }

    #[test]
    fn test_navigation_is_relative_to_focused_tab() {
        let tabs = registry(&["a", "b", "c", "d"]);
        let mut controller = initialized(&tabs);
        // "a" is active but focus sits on "c"
        right(&mut controller, &tabs, "c");
        assert_eq!(controller.active_id(), Some("d"));
    }

    #[test]
    fn test_enter_and_space_activate_focused_tab() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);

        let outcome = controller.handle_key(&tabs, &TabKey::Enter, "b", Orientation::Horizontal);
        assert_eq!(
            outcome,
            KeyOutcome::Activated {
                id: "b".to_string(),
                focus: None,
            }
        );

        controller.handle_key(&tabs, &TabKey::Space, "c", Orientation::Vertical);
        assert_eq!(controller.active_id(), Some("c"));
    }

    #[test]
    fn test_vertical_orientation_uses_up_down() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);

        controller.handle_key(&tabs, &TabKey::ArrowDown, "a", Orientation::Vertical);
        assert_eq!(controller.active_id(), Some("b"));
        controller.handle_key(&tabs, &TabKey::ArrowUp, "a", Orientation::Vertical);
        assert_eq!(controller.active_id(), Some("c"));

        let outcome = controller.handle_key(&tabs, &TabKey::ArrowRight, "c", Orientation::Vertical);
        assert_eq!(outcome, KeyOutcome::Unhandled);
        assert_eq!(controller.active_id(), Some("c"));
    }

    #[test]
    fn test_other_keys_unhandled() {
        let tabs = registry(&["a", "b"]);
        let mut controller = initialized(&tabs);
        let outcome = controller.handle_key(
            &tabs,
            &TabKey::from("Tab"),
            "a",
            Orientation::Horizontal,
        );
        assert_eq!(outcome, KeyOutcome::Unhandled);
        assert!(!outcome.is_handled());
        assert_eq!(controller.active_id(), Some("a"));
    }

    #[test]
    fn test_roving_tab_index() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);
        let events = ["b", "c", "a"];
        for id in events {
            controller.activate(&tabs, id).unwrap();
            let reachable = tabs
                .iter()
                .filter(|t| controller.tab_index_for(&t.id) == 0)
                .count();
            assert_eq!(reachable, 1);
            assert_eq!(controller.tab_index_for(id), 0);
        }
    }

    #[test]
    fn test_reconcile_after_removal() {
        let mut tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);
        controller.activate(&tabs, "b").unwrap();

        tabs.remove("b").unwrap();
        assert!(!controller.is_active("a"));
        assert!(controller.reconcile(&tabs));
        assert_eq!(controller.active_id(), Some("a"));

        assert!(!controller.reconcile(&tabs));
    }

    #[test]
    fn test_reconcile_uses_flagged_default() {
        let mut tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);
        tabs.set_default(Some("c")).unwrap();
        tabs.remove("a").unwrap();
        controller.reconcile(&tabs);
        assert_eq!(controller.active_id(), Some("c"));
    }

    #[test]
    fn test_reconcile_after_tabs_added_to_empty() {
        let mut tabs = TabRegistry::empty();
        let mut controller = initialized(&tabs);
        tabs.push(TabDescriptor::new("a").unwrap()).unwrap();
        assert!(controller.reconcile(&tabs));
        assert_eq!(controller.active_id(), Some("a"));
    }

    #[test]
    fn test_reconcile_before_initialize_is_noop() {
        let tabs = registry(&["a"]);
        let mut controller = ActivationController::new();
        assert!(!controller.reconcile(&tabs));
        assert!(!controller.is_initialized());
    }

    #[test]
    fn test_change_listener_sees_transitions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let tabs = registry(&["a", "b"]);
        let mut controller = ActivationController::new().with_change_listener(move |from, to| {
            sink.lock()
                .unwrap()
                .push(format!("{}->{}", from.unwrap_or("-"), to.unwrap_or("-")));
        });

        controller.initialize(&tabs);
        controller.activate(&tabs, "b").unwrap();
        // same tab again: no notification
        controller.activate(&tabs, "b").unwrap();
        right(&mut controller, &tabs, "b");

        assert_eq!(*seen.lock().unwrap(), vec!["-->a", "a->b", "b->a"]);
    }

    #[test]
    fn test_focus_target_called_on_arrow_only() {
        let focused = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&focused);
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = ActivationController::new()
            .with_focus_target(move |id: &str| sink.lock().unwrap().push(id.to_string()));
        controller.initialize(&tabs);

        controller.handle_key(&tabs, &TabKey::Enter, "b", Orientation::Horizontal);
        left(&mut controller, &tabs, "a");
        controller.handle_key(&tabs, &TabKey::from("Escape"), "c", Orientation::Horizontal);

        assert_eq!(*focused.lock().unwrap(), vec!["c"]);
    }

    #[test]
    fn test_views() {
        let tabs = registry(&["a", "b", "c"]);
        let mut controller = initialized(&tabs);
        controller.activate(&tabs, "b").unwrap();

        let views = controller.views(&tabs, true);
        assert_eq!(views.len(), 3);
        assert_eq!(
            views[1],
            TabView {
                id: "b".to_string(),
                is_active: true,
                tab_index: 0,
                aria_selected: true,
                show_active_border: true,
            }
        );
        assert!(!views[0].show_active_border);
        assert_eq!(views[0].tab_index, -1);

        let views = controller.views(&tabs, false);
        assert!(views.iter().all(|v| v.show_active_border));
    }
}
