//! Registry configuration.
//!
//! [`WmConfig::default`] reproduces the stock desktop: 640x480 windows with a
//! 200x150 floor, cascading from (80, 60) in 30x25 steps, z-indices counting
//! up from 100 and a 36 px taskbar.

use thiserror::Error;

use crate::constants::{
    BASE_Z_INDEX, CASCADE_COLUMNS, CASCADE_ORIGIN, CASCADE_ROWS, CASCADE_STEP,
    DEFAULT_MIN_SIZE, DEFAULT_WINDOW_SIZE, TASKBAR_HEIGHT,
};
use crate::geometry::{Point, Rect, Size};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("default minimum size must be non-zero, got {width}x{height}")]
    EmptyMinSize { width: u32, height: u32 },
    #[error("default size {size:?} is smaller than the default minimum {min:?}")]
    DefaultBelowMin { size: Size, min: Size },
    #[error("cascade grid needs at least one column and one row")]
    EmptyCascadeGrid,
    #[error("cell scale must be non-zero, got {width}x{height}")]
    EmptyCellScale { width: u16, height: u16 },
    #[error("tick interval must be between 1 and 1000 ms, got {0}")]
    TickOutOfRange(u64),
    #[error("unknown app `{0}`")]
    UnknownApp(String),
}

/// Staggered placement for windows opened without an explicit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub origin: Point,
    pub step: Point,
    pub columns: u32,
    pub rows: u32,
}

impl Default for Cascade {
    fn default() -> Self {
        Self {
            origin: CASCADE_ORIGIN,
            step: CASCADE_STEP,
            columns: CASCADE_COLUMNS,
            rows: CASCADE_ROWS,
        }
    }
}

impl Cascade {
    /// Slot for the window created with sequence number `seq`.
    pub fn slot(&self, seq: u64) -> Point {
        let col = (seq % self.columns.max(1) as u64) as i32;
        let row = (seq % self.rows.max(1) as u64) as i32;
        Point::new(
            self.origin.x.saturating_add(col.saturating_mul(self.step.x)),
            self.origin.y.saturating_add(row.saturating_mul(self.step.y)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmConfig {
    pub default_size: Size,
    pub default_min_size: Size,
    pub cascade: Cascade,
    /// Z-index below the first window. The registry counts upward from here
    /// in 64 bits, so even `u32::MAX` leaves room for every later raise.
    pub base_z_index: u32,
    pub taskbar_height: u32,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_WINDOW_SIZE,
            default_min_size: DEFAULT_MIN_SIZE,
            cascade: Cascade::default(),
            base_z_index: BASE_Z_INDEX,
            taskbar_height: TASKBAR_HEIGHT,
        }
    }
}

impl WmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_min_size.is_empty() {
            return Err(ConfigError::EmptyMinSize {
                width: self.default_min_size.width,
                height: self.default_min_size.height,
            });
        }
        if self.default_size.width < self.default_min_size.width
            || self.default_size.height < self.default_min_size.height
        {
            return Err(ConfigError::DefaultBelowMin {
                size: self.default_size,
                min: self.default_min_size,
            });
        }
        if self.cascade.columns == 0 || self.cascade.rows == 0 {
            return Err(ConfigError::EmptyCascadeGrid);
        }
        Ok(())
    }

    /// The area a maximized window fills: the viewport minus the taskbar.
    pub fn work_area(&self, viewport: Size) -> Rect {
        Rect::new(
            0,
            0,
            viewport.width,
            viewport.height.saturating_sub(self.taskbar_height),
        )
    }
}
