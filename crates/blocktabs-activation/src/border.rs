//! Active border presence

/// Whether `tab_id` renders the configured tab border right now.
///
/// With `border_on_active` off the border is static and always shown; with it
/// on, only the active tab keeps it.
pub fn should_show_active_border(tab_id: &str, active_id: Option<&str>, border_on_active: bool) -> bool {
    if !border_on_active {
        return true;
    }

    active_id == Some(tab_id)
}
