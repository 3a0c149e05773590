//! Shared crate-wide constants.

use crate::geometry::{Point, Size};

/// Size given to a window when the open request does not carry one.
pub const DEFAULT_WINDOW_SIZE: Size = Size::new(640, 480);

/// Lower bound on window size when the open request does not carry one.
pub const DEFAULT_MIN_SIZE: Size = Size::new(200, 150);

/// Top-left corner of the first cascade slot.
pub const CASCADE_ORIGIN: Point = Point::new(80, 60);

/// Offset between neighbouring cascade slots.
///
/// Successive windows are staggered by this many pixels so they never stack
/// exactly on top of each other.
pub const CASCADE_STEP: Point = Point::new(30, 25);

/// Number of horizontal cascade slots before the offset wraps around.
pub const CASCADE_COLUMNS: u32 = 8;

/// Number of vertical cascade slots before the offset wraps around.
pub const CASCADE_ROWS: u32 = 6;

/// Z-index the counter starts from. The first window gets `BASE_Z_INDEX + 1`.
pub const BASE_Z_INDEX: u32 = 100;

/// Height of the taskbar strip removed from the viewport when a window is
/// maximized.
pub const TASKBAR_HEIGHT: u32 = 36;

/// Two clicks on the same title bar within this many milliseconds toggle
/// maximize.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// Layout pixels covered by one terminal column.
pub const DEFAULT_CELL_WIDTH: u16 = 8;

/// Layout pixels covered by one terminal row.
pub const DEFAULT_CELL_HEIGHT: u16 = 16;

/// Interval between display-refresh ticks of the terminal desktop.
pub const DEFAULT_TICK_MS: u64 = 16;
