//! Pointer gestures that move and resize windows.
//!
//! Both controllers follow the same three-state machine:
//!
//! ```text
//! Idle --pointer-down (window not maximized)--> Active
//! Active --pointer-move--> Active   (latest rectangle queued for the next tick)
//! Active --pointer-up--> Idle       (wherever the pointer is released)
//! ```
//!
//! Controllers never hold on to window geometry between calls. Each entry
//! point receives the [`WindowHost`] and looks the window up at that moment,
//! so a registry change between two events (another window opening, a close
//! racing the drag) is always observed.

mod coalesce;
mod drag;
mod resize;

pub use coalesce::FrameCoalescer;
pub use drag::DragController;
pub use resize::{EdgeSigns, ParseEdgeError, ResizeController, ResizeEdge, apply_resize};

use crate::geometry::{Point, Rect, Size};
use crate::window::{WindowId, WindowRegistry};

/// Geometry a controller needs at the start of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub position: Point,
    pub size: Size,
    pub min_size: Size,
    pub maximized: bool,
}

impl WindowGeometry {
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// The registry surface gesture controllers drive.
pub trait WindowHost {
    fn geometry(&self, id: WindowId) -> Option<WindowGeometry>;
    fn focus(&mut self, id: WindowId);
    /// Returns `false` when `id` is no longer known.
    fn reposition(&mut self, id: WindowId, position: Point) -> bool;
    /// Returns `false` when `id` is no longer known.
    fn resize(&mut self, id: WindowId, size: Size) -> bool;
}

impl WindowHost for WindowRegistry {
    fn geometry(&self, id: WindowId) -> Option<WindowGeometry> {
        self.get(id).map(|window| WindowGeometry {
            position: window.position(),
            size: window.size(),
            min_size: window.min_size(),
            maximized: window.is_maximized(),
        })
    }

    fn focus(&mut self, id: WindowId) {
        WindowRegistry::focus(self, id);
    }

    fn reposition(&mut self, id: WindowId, position: Point) -> bool {
        WindowRegistry::reposition(self, id, position)
    }

    fn resize(&mut self, id: WindowId, size: Size) -> bool {
        WindowRegistry::resize(self, id, size)
    }
}

impl<T: WindowHost + ?Sized> WindowHost for &mut T {
    fn geometry(&self, id: WindowId) -> Option<WindowGeometry> {
        (**self).geometry(id)
    }

    fn focus(&mut self, id: WindowId) {
        (**self).focus(id)
    }

    fn reposition(&mut self, id: WindowId, position: Point) -> bool {
        (**self).reposition(id, position)
    }

    fn resize(&mut self, id: WindowId, size: Size) -> bool {
        (**self).resize(id, size)
    }
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureTarget {
    TitleBar(WindowId),
    ResizeHandle(WindowId, ResizeEdge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging(WindowId),
    Resizing(WindowId, ResizeEdge),
}

/// Owns one drag and one resize controller and arms at most one of them.
///
/// There is a single pointer, so a second pointer-down while a gesture is
/// active ends the first gesture before the new one starts.
#[derive(Debug, Default)]
pub struct GestureRouter {
    drag: DragController,
    resize: ResizeController,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        if let Some(id) = self.drag.active_window() {
            GesturePhase::Dragging(id)
        } else if let Some((id, edge)) = self.resize.active() {
            GesturePhase::Resizing(id, edge)
        } else {
            GesturePhase::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == GesturePhase::Idle
    }

    /// Start a gesture. Returns `false` (and stays idle) when the target
    /// window is unknown or maximized.
    pub fn pointer_down<H: WindowHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: GestureTarget,
        pointer: Point,
    ) -> bool {
        self.pointer_up();
        match target {
            GestureTarget::TitleBar(id) => self.drag.pointer_down(host, id, pointer),
            GestureTarget::ResizeHandle(id, edge) => {
                self.resize.pointer_down(host, id, edge, pointer)
            }
        }
    }

    /// Feed a pointer position. Returns `true` when a commit is now waiting
    /// for the next tick.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        if self.drag.is_active() {
            self.drag.pointer_move(pointer);
        } else if self.resize.is_active() {
            self.resize.pointer_move(pointer);
        }
        self.frame_pending()
    }

    pub fn frame_pending(&self) -> bool {
        self.drag.frame_pending() || self.resize.frame_pending()
    }

    /// Display-refresh tick: commit the latest queued geometry, if any.
    /// Returns whether a window actually changed.
    pub fn on_frame<H: WindowHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let dragged = self.drag.on_frame(host);
        let resized = self.resize.on_frame(host);
        dragged || resized
    }

    /// End whichever gesture is active. Returns whether one was.
    pub fn pointer_up(&mut self) -> bool {
        let dragged = self.drag.pointer_up();
        let resized = self.resize.pointer_up();
        dragged || resized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::OpenDescriptor;

    #[test]
    fn router_arms_one_controller_at_a_time() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A").at(Point::new(0, 0)));
        let b = reg.open(OpenDescriptor::new("b", "B").at(Point::new(400, 0)));
        let mut router = GestureRouter::new();

        assert!(router.pointer_down(&mut reg, GestureTarget::TitleBar(a), Point::new(10, 5)));
        assert_eq!(router.phase(), GesturePhase::Dragging(a));

        assert!(router.pointer_down(
            &mut reg,
            GestureTarget::ResizeHandle(b, ResizeEdge::Right),
            Point::new(1040, 100),
        ));
        assert_eq!(router.phase(), GesturePhase::Resizing(b, ResizeEdge::Right));

        router.pointer_move(Point::new(1100, 100));
        assert!(router.on_frame(&mut reg));
        assert_eq!(reg.get(b).unwrap().size().width, 700);
        assert_eq!(reg.get(a).unwrap().position(), Point::new(0, 0));

        assert!(router.pointer_up());
        assert!(router.is_idle());
        assert!(!router.pointer_up());
    }

    #[test]
    fn router_refuses_maximized_target() {
        let mut reg = WindowRegistry::new();
        let a = reg.open(OpenDescriptor::new("a", "A"));
        reg.toggle_maximize(a);
        let mut router = GestureRouter::new();
        assert!(!router.pointer_down(&mut reg, GestureTarget::TitleBar(a), Point::new(1, 1)));
        assert!(!router.pointer_down(
            &mut reg,
            GestureTarget::ResizeHandle(a, ResizeEdge::BottomRight),
            Point::new(1, 1),
        ));
        assert!(router.is_idle());
        assert!(!router.pointer_move(Point::new(50, 50)));
    }
}
