use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{FrameCoalescer, WindowHost};
use crate::geometry::{Point, Rect, Size};
use crate::window::WindowId;

/// Resize handles a window exposes.
///
/// There are no top handles: resizing never moves the title bar, so it
/// cannot slide out from under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Right,
    Bottom,
    Left,
    BottomRight,
    BottomLeft,
}

/// How pointer displacement maps onto a window rectangle, per axis, in
/// `{-1, 0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSigns {
    /// Non-zero when `position.x` follows the pointer to keep the right edge
    /// anchored.
    pub dx: i32,
    pub dy: i32,
    pub dwidth: i32,
    pub dheight: i32,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 5] = [
        ResizeEdge::Right,
        ResizeEdge::Bottom,
        ResizeEdge::Left,
        ResizeEdge::BottomRight,
        ResizeEdge::BottomLeft,
    ];

    pub fn signs(self) -> EdgeSigns {
        let (dx, dy, dwidth, dheight) = match self {
            ResizeEdge::Right => (0, 0, 1, 0),
            ResizeEdge::Bottom => (0, 0, 0, 1),
            ResizeEdge::Left => (1, 0, -1, 0),
            ResizeEdge::BottomRight => (0, 0, 1, 1),
            ResizeEdge::BottomLeft => (1, 0, -1, 1),
        };
        EdgeSigns {
            dx,
            dy,
            dwidth,
            dheight,
        }
    }

    /// Whether resizing from this edge also moves the window horizontally.
    pub fn shifts_x(self) -> bool {
        self.signs().dx != 0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeEdge::Right => "right",
            ResizeEdge::Bottom => "bottom",
            ResizeEdge::Left => "left",
            ResizeEdge::BottomRight => "bottom-right",
            ResizeEdge::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for ResizeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown resize edge `{0}`")]
pub struct ParseEdgeError(String);

impl FromStr for ResizeEdge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeEdge::ALL
            .into_iter()
            .find(|edge| edge.as_str() == s)
            .ok_or_else(|| ParseEdgeError(s.to_string()))
    }
}

/// Rectangle produced by dragging `edge` of `start` from `start_pointer` to
/// `pointer`.
///
/// Each dimension is floored at `min`. For left-anchored edges the new `x`
/// is `start.x + (start.width - width)`, which keeps the right edge fixed
/// even once the width is clamped.
pub fn apply_resize(
    start: Rect,
    min: Size,
    edge: ResizeEdge,
    start_pointer: Point,
    pointer: Point,
) -> Rect {
    let signs = edge.signs();
    let dx = pointer.x as i64 - start_pointer.x as i64;
    let dy = pointer.y as i64 - start_pointer.y as i64;

    let width = clamp_dimension(start.width as i64 + dx * signs.dwidth as i64, min.width);
    let height = clamp_dimension(start.height as i64 + dy * signs.dheight as i64, min.height);

    let x = if signs.dx != 0 {
        start.x as i64 + (start.width as i64 - width as i64)
    } else {
        start.x as i64
    };
    let y = if signs.dy != 0 {
        start.y as i64 + (start.height as i64 - height as i64)
    } else {
        start.y as i64
    };

    Rect {
        x: x.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        y: y.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        width,
        height,
    }
}

fn clamp_dimension(raw: i64, min: u32) -> u32 {
    raw.clamp(min as i64, u32::MAX as i64) as u32
}

#[derive(Debug, Clone, Copy)]
struct ResizeSession {
    id: WindowId,
    edge: ResizeEdge,
    start_pointer: Point,
    start: Rect,
    min_size: Size,
    moves: u64,
    commits: u64,
}

/// Resizes a window from one of its [`ResizeEdge`] handles.
#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
    pending: FrameCoalescer<Rect>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active(&self) -> Option<(WindowId, ResizeEdge)> {
        self.session.map(|session| (session.id, session.edge))
    }

    pub fn frame_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Begin resizing `id` from `edge`. Refused for unknown or maximized
    /// windows; otherwise focuses the window and snapshots its rectangle.
    pub fn pointer_down<H: WindowHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: WindowId,
        edge: ResizeEdge,
        pointer: Point,
    ) -> bool {
        let Some(geometry) = host.geometry(id) else {
            return false;
        };
        if geometry.maximized {
            tracing::debug!(window_id = %id, %edge, "resize refused: window is maximized");
            return false;
        }
        self.pending.cancel();
        self.pending.reset_counters();
        host.focus(id);
        self.session = Some(ResizeSession {
            id,
            edge,
            start_pointer: pointer,
            start: geometry.rect(),
            min_size: geometry.min_size,
            moves: 0,
            commits: 0,
        });
        tracing::debug!(window_id = %id, %edge, "resize started");
        true
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.moves = session.moves.saturating_add(1);
        let rect = apply_resize(
            session.start,
            session.min_size,
            session.edge,
            session.start_pointer,
            pointer,
        );
        self.pending.schedule(rect);
    }

    /// Commit the queued rectangle: always the size, and the position too
    /// when the edge shifts the window horizontally. Returns `false` when
    /// nothing was queued or the window has closed since.
    pub fn on_frame<H: WindowHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(rect) = self.pending.take() else {
            return false;
        };
        if !host.resize(session.id, rect.size()) {
            return false;
        }
        if session.edge.shifts_x() {
            host.reposition(session.id, rect.position());
        }
        session.commits = session.commits.saturating_add(1);
        true
    }

    pub fn pointer_up(&mut self) -> bool {
        let dropped = self.pending.cancel();
        let Some(session) = self.session.take() else {
            return false;
        };
        tracing::debug!(
            window_id = %session.id,
            edge = %session.edge,
            moves = session.moves,
            commits = session.commits,
            superseded = self.pending.superseded(),
            dropped,
            "resize ended"
        );
        true
    }
}
