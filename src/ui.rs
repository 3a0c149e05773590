use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Write `text` at `(x, y)`, truncating at the right edge of `bounds` and
/// ignoring writes that start outside it.
pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Like [`safe_set_string`] but accepts a signed start column; characters
/// left of `bounds` are skipped.
pub(crate) fn set_string_clipped(
    buffer: &mut Buffer,
    bounds: Rect,
    x: i32,
    y: i32,
    text: &str,
    style: Style,
) {
    if y < bounds.y as i32 || y > u16::MAX as i32 {
        return;
    }
    let skip = (bounds.x as i32 - x).max(0) as usize;
    let start = x.max(bounds.x as i32);
    if start > u16::MAX as i32 {
        return;
    }
    let visible: String = text.chars().skip(skip).collect();
    safe_set_string(buffer, bounds, start as u16, y as u16, &visible, style);
}

/// Paint every cell of `area ∩ bounds` with a blank symbol in `style`.
pub(crate) fn fill(buffer: &mut Buffer, bounds: Rect, area: Rect, style: Style) {
    let area = area.intersection(bounds);
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
}
