use luna_wm::geometry::{Point, Size};
use luna_wm::window::{AppKey, Intent, IntentOutcome, OpenDescriptor, WindowId, WindowRegistry};

fn open(reg: &mut WindowRegistry, app: &str) -> WindowId {
    reg.apply(Intent::Open(OpenDescriptor::new(app, app.to_uppercase())))
        .window_id()
        .unwrap()
}

#[test]
fn open_focus_minimize_close_scenario() {
    let mut reg = WindowRegistry::new();
    let a = open(&mut reg, "a");
    let b = open(&mut reg, "b");
    assert_eq!((a.get(), reg.get(a).unwrap().z_index()), (1, 101));
    assert_eq!((b.get(), reg.get(b).unwrap().z_index()), (2, 102));
    assert!(!reg.get(a).unwrap().is_focused());
    assert!(reg.get(b).unwrap().is_focused());

    assert_eq!(reg.apply(Intent::Focus(a)), IntentOutcome::Applied);
    assert_eq!(reg.get(a).unwrap().z_index(), 103);
    assert!(reg.get(a).unwrap().is_focused());
    assert!(!reg.get(b).unwrap().is_focused());

    reg.apply(Intent::Minimize(a));
    assert!(reg.get(a).unwrap().is_minimized());
    assert!(reg.focused().is_none());

    reg.apply(Intent::Close(b));
    let left: Vec<WindowId> = reg.iter().map(|w| w.id()).collect();
    assert_eq!(left, vec![a]);
    assert!(reg.paint_order().is_empty());
}

#[test]
fn reopening_an_app_reuses_its_window() {
    let mut reg = WindowRegistry::new();
    let first = open(&mut reg, "notepad");
    open(&mut reg, "paint");
    reg.minimize(first);

    let outcome = reg.apply(Intent::Open(OpenDescriptor::new("notepad", "Notepad")));
    assert_eq!(outcome, IntentOutcome::Reused(first));
    let window = reg.get(first).unwrap();
    assert!(!window.is_minimized());
    assert!(window.is_focused());
    assert_eq!(window.z_index(), 103);
    assert_eq!(reg.len(), 2);
}

#[test]
fn documents_of_one_app_open_side_by_side() {
    let mut reg = WindowRegistry::new();
    let readme = reg.open(OpenDescriptor::new(AppKey::document("notepad", "readme"), "readme"));
    let todo = reg.open(OpenDescriptor::new(AppKey::document("notepad", "todo"), "todo"));
    assert_ne!(readme, todo);
    assert_eq!(
        reg.open(OpenDescriptor::new(AppKey::document("notepad", "readme"), "readme")),
        readme
    );
    assert_eq!(reg.len(), 2);
}

#[test]
fn ids_are_never_reused_after_close() {
    let mut reg = WindowRegistry::new();
    let a = open(&mut reg, "a");
    reg.close(a);
    let again = open(&mut reg, "a");
    assert_eq!(again.get(), 2);
}

#[test]
fn unknown_ids_are_silent_noops() {
    let mut reg = WindowRegistry::new();
    let a = open(&mut reg, "a");
    let before: Vec<_> = reg.iter().cloned().collect();
    let ghost = WindowId::new(99);

    for intent in [
        Intent::Close(ghost),
        Intent::Minimize(ghost),
        Intent::ToggleMaximize(ghost),
        Intent::Focus(ghost),
        Intent::Reposition {
            id: ghost,
            position: Point::new(1, 1),
        },
        Intent::Resize {
            id: ghost,
            size: Size::new(900, 900),
        },
    ] {
        assert_eq!(reg.apply(intent), IntentOutcome::Ignored);
    }
    let after: Vec<_> = reg.iter().cloned().collect();
    assert_eq!(before, after);
    assert!(reg.get(a).unwrap().is_focused());
}

#[test]
fn cascade_places_new_windows_by_sequence() {
    let mut reg = WindowRegistry::new();
    let ids: Vec<WindowId> = ["a", "b", "c"].iter().map(|app| open(&mut reg, app)).collect();
    let positions: Vec<Point> = ids
        .iter()
        .map(|id| reg.get(*id).unwrap().position())
        .collect();
    assert_eq!(
        positions,
        vec![Point::new(110, 85), Point::new(140, 110), Point::new(170, 135)]
    );
}

#[test]
fn reposition_floors_y_and_resize_honors_min_size() {
    let mut reg = WindowRegistry::new();
    let id = reg.open(
        OpenDescriptor::new("calculator", "Calculator")
            .with_size(Size::new(240, 310))
            .with_min_size(Size::new(220, 280)),
    );
    reg.reposition(id, Point::new(-40, -12));
    assert_eq!(reg.get(id).unwrap().position(), Point::new(-40, 0));

    reg.resize(id, Size::new(10, 900));
    assert_eq!(reg.get(id).unwrap().size(), Size::new(220, 900));
}

#[test]
fn maximize_keeps_the_restored_rectangle() {
    let mut reg = WindowRegistry::new();
    let id = open(&mut reg, "paint");
    let restored = reg.get(id).unwrap().rect();
    let work = luna_wm::geometry::Rect::new(0, 0, 1024, 732);

    reg.toggle_maximize(id);
    assert_eq!(reg.frame_rect(id, work), Some(work));
    assert_eq!(reg.get(id).unwrap().rect(), restored);

    reg.toggle_maximize(id);
    assert_eq!(reg.frame_rect(id, work), Some(restored));
}
