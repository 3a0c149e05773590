use super::{FrameCoalescer, WindowHost};
use crate::geometry::Point;
use crate::window::WindowId;

#[derive(Debug, Clone, Copy)]
struct DragSession {
    id: WindowId,
    /// Pointer position relative to the window origin at pointer-down.
    grab: Point,
    moves: u64,
    commits: u64,
}

/// Moves a window by its title bar.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    pending: FrameCoalescer<Point>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.session.map(|session| session.id)
    }

    pub fn frame_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Begin dragging `id` from `pointer`.
    ///
    /// Maximized windows are immovable until restored, so the gesture is
    /// refused for them (and for unknown ids). Starting a drag focuses the
    /// window.
    pub fn pointer_down<H: WindowHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: WindowId,
        pointer: Point,
    ) -> bool {
        let Some(geometry) = host.geometry(id) else {
            return false;
        };
        if geometry.maximized {
            tracing::debug!(window_id = %id, "drag refused: window is maximized");
            return false;
        }
        self.pending.cancel();
        self.pending.reset_counters();
        host.focus(id);
        self.session = Some(DragSession {
            id,
            grab: pointer.offset_from(geometry.position),
            moves: 0,
            commits: 0,
        });
        tracing::debug!(window_id = %id, x = pointer.x, y = pointer.y, "drag started");
        true
    }

    /// Queue the position implied by `pointer` for the next tick.
    pub fn pointer_move(&mut self, pointer: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.moves = session.moves.saturating_add(1);
        let candidate = pointer.offset_from(session.grab).floor_y();
        self.pending.schedule(candidate);
    }

    /// Commit the queued position. Returns `false` when nothing was queued
    /// or the window has closed since.
    pub fn on_frame<H: WindowHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(position) = self.pending.take() else {
            return false;
        };
        let applied = host.reposition(session.id, position);
        if applied {
            session.commits = session.commits.saturating_add(1);
        }
        applied
    }

    /// End the gesture and drop any position still waiting for a tick.
    pub fn pointer_up(&mut self) -> bool {
        let dropped = self.pending.cancel();
        let Some(session) = self.session.take() else {
            return false;
        };
        tracing::debug!(
            window_id = %session.id,
            moves = session.moves,
            commits = session.commits,
            superseded = self.pending.superseded(),
            dropped,
            "drag ended"
        );
        true
    }
}
