use super::{AppKey, OpenDescriptor, WindowId, WindowRecord};
use crate::config::{ConfigError, WmConfig};
use crate::geometry::{Point, Rect, Size};

/// A named, atomic request to change registry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Open(OpenDescriptor),
    Close(WindowId),
    Minimize(WindowId),
    ToggleMaximize(WindowId),
    Focus(WindowId),
    Reposition { id: WindowId, position: Point },
    Resize { id: WindowId, size: Size },
    Rename { id: WindowId, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// A new window was created.
    Opened(WindowId),
    /// An open request matched a live window, which was restored and focused.
    Reused(WindowId),
    Applied,
    /// Unknown id or a redundant request; state is unchanged.
    Ignored,
}

impl IntentOutcome {
    pub fn window_id(self) -> Option<WindowId> {
        match self {
            IntentOutcome::Opened(id) | IntentOutcome::Reused(id) => Some(id),
            IntentOutcome::Applied | IntentOutcome::Ignored => None,
        }
    }

    pub fn changed(self) -> bool {
        !matches!(self, IntentOutcome::Ignored)
    }
}

/// The in-memory collection of open windows.
///
/// Records are kept in creation order (the taskbar order). Every intent is
/// applied in a single synchronous step and re-derives focus flags and
/// z-indices before returning, so the invariants hold between any two calls:
///
/// - ids are never reused;
/// - at most one record per [`AppKey`];
/// - at most one focused record, and it holds the highest z-index;
/// - z-indices are unique;
/// - sizes never drop below the record's minimum;
/// - `position.y` never goes negative.
///
/// Unknown ids are silent no-ops. A close can race an in-flight drag update
/// from the presentation layer, and the late update must simply vanish.
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    config: WmConfig,
    windows: Vec<WindowRecord>,
    next_id: u64,
    highest_z: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::from_valid_config(WmConfig::default())
    }

    pub fn with_config(config: WmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: WmConfig) -> Self {
        Self {
            config,
            windows: Vec::new(),
            next_id: 1,
            highest_z: u64::from(config.base_z_index),
        }
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    /// Apply one intent and report what it did.
    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::Open(descriptor) => self.apply_open(descriptor),
            Intent::Close(id) => self.apply_close(id),
            Intent::Minimize(id) => self.apply_minimize(id),
            Intent::ToggleMaximize(id) => self.apply_toggle_maximize(id),
            Intent::Focus(id) => self.apply_focus(id),
            Intent::Reposition { id, position } => self.apply_reposition(id, position),
            Intent::Resize { id, size } => self.apply_resize(id, size),
            Intent::Rename { id, title } => self.apply_rename(id, title),
        }
    }

    /// Open a window, or restore and focus the live window with the same key.
    pub fn open(&mut self, descriptor: OpenDescriptor) -> WindowId {
        self.open_window(descriptor).0
    }

    pub fn close(&mut self, id: WindowId) -> bool {
        self.apply(Intent::Close(id)).changed()
    }

    pub fn minimize(&mut self, id: WindowId) -> bool {
        self.apply(Intent::Minimize(id)).changed()
    }

    pub fn toggle_maximize(&mut self, id: WindowId) -> bool {
        self.apply(Intent::ToggleMaximize(id)).changed()
    }

    pub fn focus(&mut self, id: WindowId) -> bool {
        self.apply(Intent::Focus(id)).changed()
    }

    pub fn reposition(&mut self, id: WindowId, position: Point) -> bool {
        self.apply(Intent::Reposition { id, position }).changed()
    }

    pub fn resize(&mut self, id: WindowId, size: Size) -> bool {
        self.apply(Intent::Resize { id, size }).changed()
    }

    pub fn rename(&mut self, id: WindowId, title: impl Into<String>) -> bool {
        self.apply(Intent::Rename {
            id,
            title: title.into(),
        })
        .changed()
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|window| window.id == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|window| window.id == id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn find(&self, app: &AppKey) -> Option<&WindowRecord> {
        self.windows.iter().find(|window| &window.app == app)
    }

    /// Records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn focused(&self) -> Option<&WindowRecord> {
        self.windows.iter().find(|window| window.focused)
    }

    /// Painted (non-minimized) windows, bottom first.
    pub fn paint_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| !w.minimized).collect();
        visible.sort_by_key(|window| window.z_index);
        visible
    }

    /// Rendered rectangle of `id` inside `work_area`.
    pub fn frame_rect(&self, id: WindowId, work_area: Rect) -> Option<Rect> {
        self.get(id).and_then(|window| window.frame_rect(work_area))
    }

    /// Topmost painted window whose rendered rectangle contains `point`.
    pub fn topmost_at(&self, point: Point, work_area: Rect) -> Option<WindowId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|window| {
                window
                    .frame_rect(work_area)
                    .is_some_and(|rect| rect.contains(point))
            })
            .map(|window| window.id)
    }

    fn bump_z(&mut self) -> u64 {
        self.highest_z = self.highest_z.saturating_add(1);
        self.highest_z
    }

    /// Give `id` the next z-index and focus, clearing focus everywhere else.
    fn raise_and_focus(&mut self, id: WindowId) -> u64 {
        let z = self.bump_z();
        for window in &mut self.windows {
            if window.id == id {
                window.minimized = false;
                window.focused = true;
                window.z_index = z;
            } else {
                window.focused = false;
            }
        }
        z
    }

    fn apply_open(&mut self, descriptor: OpenDescriptor) -> IntentOutcome {
        match self.open_window(descriptor) {
            (id, true) => IntentOutcome::Reused(id),
            (id, false) => IntentOutcome::Opened(id),
        }
    }

    /// Returns the window id and whether an existing window was reused.
    fn open_window(&mut self, descriptor: OpenDescriptor) -> (WindowId, bool) {
        if let Some(existing) = self.find(&descriptor.app).map(|window| window.id) {
            let z = self.raise_and_focus(existing);
            tracing::debug!(
                window_id = %existing,
                app = %descriptor.app,
                z_index = z,
                "reused open window"
            );
            return (existing, true);
        }

        let seq = self.next_id;
        self.next_id = seq.saturating_add(1);
        let id = WindowId::new(seq);
        let min_size = descriptor
            .min_size
            .unwrap_or(self.config.default_min_size);
        let size = descriptor
            .size
            .unwrap_or(self.config.default_size)
            .clamp_min(min_size);
        let position = descriptor
            .position
            .unwrap_or_else(|| self.config.cascade.slot(seq))
            .floor_y();
        let z = self.bump_z();

        for window in &mut self.windows {
            window.focused = false;
        }
        tracing::debug!(
            window_id = %id,
            app = %descriptor.app,
            x = position.x,
            y = position.y,
            width = size.width,
            height = size.height,
            z_index = z,
            "opened window"
        );
        self.windows.push(WindowRecord {
            id,
            app: descriptor.app,
            title: descriptor.title,
            icon: descriptor.icon,
            position,
            size,
            min_size,
            minimized: false,
            maximized: false,
            focused: true,
            z_index: z,
        });
        (id, false)
    }

    fn apply_close(&mut self, id: WindowId) -> IntentOutcome {
        let before = self.windows.len();
        self.windows.retain(|window| window.id != id);
        if self.windows.len() == before {
            return IntentOutcome::Ignored;
        }
        // No other window is promoted to focus here.
        tracing::debug!(window_id = %id, "closed window");
        IntentOutcome::Applied
    }

    fn apply_minimize(&mut self, id: WindowId) -> IntentOutcome {
        let Some(window) = self.get_mut(id) else {
            return IntentOutcome::Ignored;
        };
        if window.minimized {
            return IntentOutcome::Ignored;
        }
        window.minimized = true;
        window.focused = false;
        tracing::debug!(window_id = %id, "minimized window");
        IntentOutcome::Applied
    }

    fn apply_toggle_maximize(&mut self, id: WindowId) -> IntentOutcome {
        let Some(window) = self.get_mut(id) else {
            return IntentOutcome::Ignored;
        };
        window.maximized = !window.maximized;
        tracing::debug!(window_id = %id, maximized = window.maximized, "toggled maximize");
        IntentOutcome::Applied
    }

    fn apply_focus(&mut self, id: WindowId) -> IntentOutcome {
        if !self.contains(id) {
            return IntentOutcome::Ignored;
        }
        let z = self.raise_and_focus(id);
        tracing::debug!(window_id = %id, z_index = z, "focused window");
        IntentOutcome::Applied
    }

    fn apply_reposition(&mut self, id: WindowId, position: Point) -> IntentOutcome {
        let Some(window) = self.get_mut(id) else {
            return IntentOutcome::Ignored;
        };
        window.position = position.floor_y();
        IntentOutcome::Applied
    }

    fn apply_resize(&mut self, id: WindowId, size: Size) -> IntentOutcome {
        let Some(window) = self.get_mut(id) else {
            return IntentOutcome::Ignored;
        };
        window.size = size.clamp_min(window.min_size);
        IntentOutcome::Applied
    }

    fn apply_rename(&mut self, id: WindowId, title: String) -> IntentOutcome {
        let Some(window) = self.get_mut(id) else {
            return IntentOutcome::Ignored;
        };
        window.title = title;
        IntentOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(registry: &WindowRegistry) {
        let mut ids: Vec<_> = registry.iter().map(|w| w.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), registry.len(), "duplicate ids");

        let mut keys: Vec<_> = registry.iter().map(|w| w.app().clone()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), registry.len(), "duplicate app keys");

        let focused: Vec<_> = registry
            .iter()
            .filter(|w| w.is_focused() && !w.is_minimized())
            .collect();
        assert!(focused.len() <= 1, "more than one focused window");

        let mut zs: Vec<_> = registry.iter().map(|w| w.z_index()).collect();
        zs.sort_unstable();
        zs.dedup();
        assert_eq!(zs.len(), registry.len(), "duplicate z-index");
        if let Some(top) = focused.first() {
            assert_eq!(Some(&top.z_index()), zs.last());
        }

        for w in registry.iter() {
            assert!(w.size().width >= w.min_size().width);
            assert!(w.size().height >= w.min_size().height);
            assert!(w.position().y >= 0);
        }
    }

    #[test]
    fn open_assigns_cascade_defaults() {
        let mut reg = WindowRegistry::new();
        let id = reg.open(OpenDescriptor::new("calculator", "Calculator"));
        let window = reg.get(id).unwrap();
        assert_eq!(id, WindowId::new(1));
        assert_eq!(window.z_index(), 101);
        assert_eq!(window.position(), Point::new(110, 85));
        assert_eq!(window.size(), Size::new(640, 480));
        assert_eq!(window.min_size(), Size::new(200, 150));
        assert!(window.is_focused());
        assert_invariants(&reg);
    }

    #[test]
    fn successive_windows_stagger() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        let b = reg.open(OpenDescriptor::new("b", "B"));
        assert_ne!(reg.get(a).unwrap().position(), reg.get(b).unwrap().position());
    }

    #[test]
    fn open_clamps_supplied_geometry() {
        let mut reg = WindowRegistry::new();
        let id = reg.open(
            OpenDescriptor::new("snake", "Snake Game")
                .with_size(Size::new(100, 100))
                .with_min_size(Size::new(400, 400))
                .at(Point::new(-10, -40)),
        );
        let window = reg.get(id).unwrap();
        assert_eq!(window.size(), Size::new(400, 400));
        assert_eq!(window.position(), Point::new(-10, 0));
        assert_invariants(&reg);
    }

    #[test]
    fn reopen_reuses_and_keeps_geometry() {
        let mut reg = WindowRegistry::new();
        let paint = reg.open(OpenDescriptor::new("paint", "Paint"));
        reg.reposition(paint, Point::new(300, 200));
        reg.minimize(paint);
        let other = reg.open(OpenDescriptor::new("notepad", "Notepad"));

        let outcome = reg.apply(Intent::Open(
            OpenDescriptor::new("paint", "Paint").with_size(Size::new(999, 999)),
        ));
        assert_eq!(outcome, IntentOutcome::Reused(paint));
        let window = reg.get(paint).unwrap();
        assert!(!window.is_minimized());
        assert!(window.is_focused());
        assert_eq!(window.position(), Point::new(300, 200));
        assert_eq!(window.size(), Size::new(640, 480));
        assert!(!reg.get(other).unwrap().is_focused());
        assert_eq!(reg.len(), 2);
        assert_invariants(&reg);
    }

    #[test]
    fn document_keys_open_separate_windows() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new(AppKey::document("notepad", "a"), "a.txt"));
        let b = reg.open(OpenDescriptor::new(AppKey::document("notepad", "b"), "b.txt"));
        let again = reg.open(OpenDescriptor::new(AppKey::document("notepad", "a"), "a.txt"));
        assert_ne!(a, b);
        assert_eq!(again, a);
        assert_eq!(reg.len(), 2);
        assert_invariants(&reg);
    }

    #[test]
    fn ids_are_not_reused_after_close() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        assert!(reg.close(a));
        let b = reg.open(OpenDescriptor::new("a", "A"));
        assert!(b > a);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut reg = WindowRegistry::new();
        let ghost = WindowId::new(42);
        assert_eq!(reg.apply(Intent::Close(ghost)), IntentOutcome::Ignored);
        assert_eq!(reg.apply(Intent::Focus(ghost)), IntentOutcome::Ignored);
        assert_eq!(reg.apply(Intent::Minimize(ghost)), IntentOutcome::Ignored);
        assert_eq!(
            reg.apply(Intent::ToggleMaximize(ghost)),
            IntentOutcome::Ignored
        );
        assert!(!reg.reposition(ghost, Point::new(1, 1)));
        assert!(!reg.resize(ghost, Size::new(1, 1)));
        assert!(!reg.rename(ghost, "x"));
        assert!(reg.is_empty());
    }

    #[test]
    fn minimize_twice_is_ignored() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        assert!(reg.minimize(a));
        assert!(!reg.minimize(a));
        let window = reg.get(a).unwrap();
        assert!(window.is_minimized());
        assert!(!window.is_focused());
    }

    #[test]
    fn focus_bumps_z_every_call() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        reg.focus(a);
        let first = reg.get(a).unwrap().z_index();
        reg.focus(a);
        let second = reg.get(a).unwrap().z_index();
        assert!(second > first);
        assert_invariants(&reg);
    }

    #[test]
    fn toggle_maximize_preserves_stored_rect() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        let before = reg.get(a).unwrap().rect();
        let work = Rect::new(0, 0, 1024, 732);
        reg.toggle_maximize(a);
        assert_eq!(reg.frame_rect(a, work), Some(work));
        assert_eq!(reg.get(a).unwrap().rect(), before);
        reg.toggle_maximize(a);
        assert_eq!(reg.frame_rect(a, work), Some(before));
    }

    #[test]
    fn resize_and_reposition_clamp() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        reg.resize(a, Size::new(1, 1));
        reg.reposition(a, Point::new(100, -50));
        let window = reg.get(a).unwrap();
        assert_eq!(window.size(), Size::new(200, 150));
        assert_eq!(window.position(), Point::new(100, 0));
    }

    #[test]
    fn reposition_leaves_focus_and_z_alone() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        let b = reg.open(OpenDescriptor::new("b", "B"));
        let z = reg.get(a).unwrap().z_index();
        reg.reposition(a, Point::new(5, 5));
        reg.resize(a, Size::new(300, 300));
        assert_eq!(reg.get(a).unwrap().z_index(), z);
        assert!(reg.get(b).unwrap().is_focused());
    }

    #[test]
    fn rename_replaces_title() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("notepad", "Untitled - Notepad"));
        assert!(reg.rename(a, "notes.txt - Notepad"));
        assert_eq!(reg.get(a).unwrap().title(), "notes.txt - Notepad");
    }

    #[test]
    fn topmost_at_follows_z_and_skips_minimized() {
        let mut reg = WindowRegistry::new();
        let work = Rect::new(0, 0, 2000, 2000);
        let a = reg.open(OpenDescriptor::new("a", "A").at(Point::new(0, 0)));
        let b = reg.open(OpenDescriptor::new("b", "B").at(Point::new(100, 100)));
        let overlap = Point::new(150, 150);
        assert_eq!(reg.topmost_at(overlap, work), Some(b));
        reg.focus(a);
        assert_eq!(reg.topmost_at(overlap, work), Some(a));
        reg.minimize(a);
        assert_eq!(reg.topmost_at(overlap, work), Some(b));
        assert_eq!(reg.topmost_at(Point::new(1900, 1900), work), None);
    }

    #[test]
    fn with_config_rejects_invalid() {
        let config = WmConfig {
            default_min_size: Size::new(0, 150),
            ..WmConfig::default()
        };
        assert!(WindowRegistry::with_config(config).is_err());
    }

    #[test]
    fn custom_base_z_index() {
        let config = WmConfig {
            base_z_index: 10,
            ..WmConfig::default()
        };
        let mut reg = WindowRegistry::with_config(config).unwrap();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        assert_eq!(reg.get(a).unwrap().z_index(), 11);
    }

    #[test]
    fn mixed_intent_sequence_keeps_invariants() {
        let keys = [
            AppKey::app("notepad"),
            AppKey::document("notepad", "todo.txt"),
            AppKey::document("notepad", "readme.txt"),
            AppKey::app("paint"),
            AppKey::app("calculator"),
            AppKey::app("snake"),
        ];
        let mut reg = WindowRegistry::new();
        let mut highest_issued = 0;
        // Fixed LCG so the sequence is the same on every run.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 33) % bound
        };

        for step in 0..600 {
            let live: Vec<WindowId> = reg.iter().map(|w| w.id()).collect();
            let pick = |roll: u64| -> WindowId {
                if live.is_empty() || roll == 0 {
                    WindowId::new(9_999)
                } else {
                    live[(roll as usize) % live.len()]
                }
            };
            let intent = match next(8) {
                0 | 1 => {
                    let key = keys[next(keys.len() as u64) as usize].clone();
                    let title = key.to_string();
                    Intent::Open(
                        OpenDescriptor::new(key, title)
                            .with_size(Size::new(next(900) as u32, next(700) as u32))
                            .with_min_size(Size::new(200, 150)),
                    )
                }
                2 => Intent::Close(pick(next(6))),
                3 => Intent::Minimize(pick(next(6))),
                4 => Intent::ToggleMaximize(pick(next(6))),
                5 => Intent::Focus(pick(next(6))),
                6 => Intent::Reposition {
                    id: pick(next(6)),
                    position: Point::new(next(800) as i32 - 400, next(600) as i32 - 300),
                },
                _ => Intent::Resize {
                    id: pick(next(6)),
                    size: Size::new(next(900) as u32, next(700) as u32),
                },
            };

            let was_open = match &intent {
                Intent::Open(descriptor) => reg.find(&descriptor.app).map(|w| w.id()),
                _ => None,
            };
            match reg.apply(intent) {
                IntentOutcome::Opened(id) => {
                    assert!(was_open.is_none(), "step {step}: duplicate for live key");
                    assert!(id.get() > highest_issued, "step {step}: id {id} reused");
                    highest_issued = id.get();
                    assert_eq!(reg.focused().map(|w| w.id()), Some(id));
                }
                IntentOutcome::Reused(id) => {
                    assert_eq!(was_open, Some(id), "step {step}");
                    let window = reg.get(id).unwrap();
                    assert!(window.is_focused() && !window.is_minimized());
                }
                IntentOutcome::Applied | IntentOutcome::Ignored => {}
            }
            assert_invariants(&reg);
        }
        assert!(highest_issued > 6);
    }
}
