//! Layout-pixel geometry shared by the registry, the gesture controllers and
//! the desktop renderer.
//!
//! Origins are signed so a window can be dragged partly past the left edge of
//! the desktop; sizes are unsigned.

use ratatui::prelude::Rect as CellRect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(self, other: Point) -> Point {
        Point {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }

    /// Clamp `y` so the point never sits above the work area.
    pub fn floor_y(self) -> Point {
        Point {
            x: self.x,
            y: self.y.max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Raise each dimension to at least the matching dimension of `min`.
    pub fn clamp_min(self, min: Size) -> Size {
        Size {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A window rectangle in layout pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains(&self, point: Point) -> bool {
        let px = point.x as i64;
        let py = point.y as i64;
        px >= self.x as i64 && px < self.right() && py >= self.y as i64 && py < self.bottom()
    }

    /// Project the rectangle onto terminal cells without clipping.
    ///
    /// `scale` is the number of layout pixels covered by one cell in each
    /// direction; the result is offset by the top-left corner of `origin`.
    pub fn to_cell_units(&self, scale: CellScale, origin: CellRect) -> Rect {
        let sw = scale.width.max(1) as i64;
        let sh = scale.height.max(1) as i64;
        let x0 = (self.x as i64).div_euclid(sw);
        let y0 = (self.y as i64).div_euclid(sh);
        let x1 = self.right().div_euclid(sw);
        let y1 = self.bottom().div_euclid(sh);
        Rect {
            x: (x0 + origin.x as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            y: (y0 + origin.y as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            width: (x1 - x0).max(0) as u32,
            height: (y1 - y0).max(0) as u32,
        }
    }

    /// Project onto terminal cells and clip to `bounds`. Returns an empty
    /// rectangle when nothing is visible.
    pub fn to_cells(&self, scale: CellScale, bounds: CellRect) -> CellRect {
        self.to_cell_units(scale, bounds).clip(bounds)
    }

    /// Intersect a rectangle already in cell units with `bounds`.
    pub fn clip(&self, bounds: CellRect) -> CellRect {
        let left = (self.x as i64).max(bounds.x as i64);
        let top = (self.y as i64).max(bounds.y as i64);
        let right = self.right().min(bounds.x as i64 + bounds.width as i64);
        let bottom = self.bottom().min(bounds.y as i64 + bounds.height as i64);
        if right <= left || bottom <= top {
            return CellRect::default();
        }
        CellRect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }

    pub fn from_cells(rect: CellRect) -> Self {
        Self::new(
            rect.x as i32,
            rect.y as i32,
            rect.width as u32,
            rect.height as u32,
        )
    }
}

/// Layout pixels per terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub width: u16,
    pub height: u16,
}

impl CellScale {
    /// Map a cell coordinate (relative to `origin`) to the layout pixel at the
    /// cell's top-left corner.
    pub fn cell_to_point(&self, column: u16, row: u16, origin: CellRect) -> Point {
        let col = column as i32 - origin.x as i32;
        let row = row as i32 - origin.y as i32;
        Point::new(col * self.width as i32, row * self.height as i32)
    }

    /// Layout-pixel size of an area measured in cells.
    pub fn cells_to_size(&self, area: CellRect) -> Size {
        Size::new(
            area.width as u32 * self.width as u32,
            area.height as u32 * self.height as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_y_only_touches_negative_rows() {
        assert_eq!(Point::new(100, -50).floor_y(), Point::new(100, 0));
        assert_eq!(Point::new(-20, 7).floor_y(), Point::new(-20, 7));
    }

    #[test]
    fn clamp_min_is_per_dimension() {
        let min = Size::new(200, 150);
        assert_eq!(Size::new(1, 1).clamp_min(min), min);
        assert_eq!(Size::new(640, 10).clamp_min(min), Size::new(640, 150));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(14, 14)));
        assert!(!rect.contains(Point::new(15, 10)));
        assert!(!rect.contains(Point::new(9, 12)));
    }

    #[test]
    fn to_cells_clips_negative_origin() {
        let scale = CellScale {
            width: 8,
            height: 16,
        };
        let bounds = CellRect {
            x: 0,
            y: 0,
            width: 100,
            height: 40,
        };
        let rect = Rect::new(-16, 32, 80, 64);
        let cells = rect.to_cells(scale, bounds);
        assert_eq!(
            cells,
            CellRect {
                x: 0,
                y: 2,
                width: 8,
                height: 4
            }
        );
    }

    #[test]
    fn cell_units_keep_offscreen_origin() {
        let scale = CellScale {
            width: 8,
            height: 16,
        };
        let origin = CellRect::new(1, 0, 40, 20);
        let cells = Rect::new(-16, 32, 80, 64).to_cell_units(scale, origin);
        assert_eq!(cells, Rect::new(-1, 2, 10, 4));
    }

    #[test]
    fn cell_to_point_respects_origin() {
        let scale = CellScale {
            width: 8,
            height: 16,
        };
        let origin = CellRect {
            x: 2,
            y: 1,
            width: 50,
            height: 20,
        };
        assert_eq!(scale.cell_to_point(4, 3, origin), Point::new(16, 32));
    }
}
