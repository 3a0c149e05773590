//! Taskbar buttons: one per open window, in the order windows were opened.

use crate::window::{WindowId, WindowRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarButton {
    pub id: WindowId,
    pub title: String,
    pub icon: Option<String>,
    /// Drawn pressed: the window is focused and on screen.
    pub active: bool,
}

pub fn buttons(registry: &WindowRegistry) -> Vec<TaskbarButton> {
    registry
        .iter()
        .map(|window| TaskbarButton {
            id: window.id(),
            title: window.title().to_string(),
            icon: window.icon().map(str::to_string),
            active: window.is_focused() && !window.is_minimized(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarAction {
    Minimized,
    Focused,
    Ignored,
}

/// Click on a taskbar button.
///
/// Clicking the active window's button minimizes it; clicking any other
/// button (including a minimized window's) restores and focuses it.
pub fn activate(registry: &mut WindowRegistry, id: WindowId) -> TaskbarAction {
    let Some(window) = registry.get(id) else {
        return TaskbarAction::Ignored;
    };
    if window.is_focused() && !window.is_minimized() {
        registry.minimize(id);
        TaskbarAction::Minimized
    } else {
        registry.focus(id);
        TaskbarAction::Focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::OpenDescriptor;

    #[test]
    fn buttons_follow_creation_order() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "Alpha"));
        let b = reg.open(OpenDescriptor::new("b", "Beta"));
        reg.focus(a);
        let buttons = buttons(&reg);
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].id, a);
        assert_eq!(buttons[1].id, b);
        assert!(buttons[0].active);
        assert!(!buttons[1].active);
    }

    #[test]
    fn activate_toggles_active_window() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "Alpha"));
        assert_eq!(activate(&mut reg, a), TaskbarAction::Minimized);
        assert!(reg.get(a).unwrap().is_minimized());
        assert_eq!(activate(&mut reg, a), TaskbarAction::Focused);
        let window = reg.get(a).unwrap();
        assert!(!window.is_minimized());
        assert!(window.is_focused());
    }

    #[test]
    fn activate_background_window_focuses_it() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "Alpha"));
        let b = reg.open(OpenDescriptor::new("b", "Beta"));
        assert_eq!(activate(&mut reg, a), TaskbarAction::Focused);
        assert!(reg.get(a).unwrap().is_focused());
        assert!(!reg.get(b).unwrap().is_focused());
    }

    #[test]
    fn activate_unknown_is_ignored() {
        let mut reg = WindowRegistry::new();
        assert_eq!(
            activate(&mut reg, WindowId::new(9)),
            TaskbarAction::Ignored
        );
    }
}
