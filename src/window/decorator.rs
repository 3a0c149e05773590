//! Window chrome: title bar, caption buttons and the resize frame.
//!
//! The decorator works in cell units with a signed origin so windows dragged
//! past the left edge still draw (and hit-test) their visible part.

use ratatui::buffer::Buffer;
use ratatui::prelude::Rect as CellRect;
use ratatui::style::{Modifier, Style};

use crate::catalog::icon_glyph;
use crate::geometry::{Point, Rect};
use crate::gesture::ResizeEdge;
use crate::theme;

const BUTTON_WIDTH: i64 = 3;
const MIN_WIDTH_FOR_BUTTONS: u32 = 12;

#[derive(Debug, Clone, Copy)]
pub struct WindowChrome<'a> {
    pub title: &'a str,
    pub icon: Option<&'a str>,
    pub focused: bool,
    pub maximized: bool,
}

/// What a pointer-down on a window frame lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameHit {
    Minimize,
    Maximize,
    Close,
    TitleBar,
    Resize(ResizeEdge),
    Body,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        frame: Rect,
        bounds: CellRect,
        chrome: &WindowChrome<'_>,
    );

    /// Classify `cell` against a window drawn at `frame`. Returns `None` when
    /// the cell is outside the frame.
    fn hit_test(&self, frame: Rect, maximized: bool, cell: Point) -> Option<FrameHit>;

    /// Area inside the chrome left for the window body.
    fn content_area(&self, frame: Rect) -> Rect;
}

#[derive(Debug, Default)]
pub struct LunaDecorator;

impl LunaDecorator {
    fn button_at(frame: Rect, x: i64) -> Option<FrameHit> {
        if frame.width < MIN_WIDTH_FOR_BUTTONS {
            return None;
        }
        let right = frame.right();
        if x >= right - BUTTON_WIDTH {
            Some(FrameHit::Close)
        } else if x >= right - 2 * BUTTON_WIDTH {
            Some(FrameHit::Maximize)
        } else if x >= right - 3 * BUTTON_WIDTH {
            Some(FrameHit::Minimize)
        } else {
            None
        }
    }
}

struct Painter<'b> {
    buffer: &'b mut Buffer,
    bounds: CellRect,
}

impl Painter<'_> {
    fn put(&mut self, x: i64, y: i64, symbol: &str, style: Style) {
        let bx = self.bounds.x as i64;
        let by = self.bounds.y as i64;
        if x < bx
            || y < by
            || x >= bx + self.bounds.width as i64
            || y >= by + self.bounds.height as i64
        {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    fn text(&mut self, x: i64, y: i64, max_x: i64, text: &str, style: Style) {
        for (idx, ch) in text.chars().enumerate() {
            let cx = x + idx as i64;
            if cx >= max_x {
                break;
            }
            let mut tmp = [0u8; 4];
            self.put(cx, y, ch.encode_utf8(&mut tmp), style);
        }
    }
}

impl WindowDecorator for LunaDecorator {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        frame: Rect,
        bounds: CellRect,
        chrome: &WindowChrome<'_>,
    ) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        let mut painter = Painter { buffer, bounds };

        let left = frame.x as i64;
        let top = frame.y as i64;
        let right = frame.right();
        let bottom = frame.bottom();

        let header = Style::default()
            .bg(theme::title_bg(chrome.focused))
            .fg(theme::title_fg())
            .add_modifier(Modifier::BOLD);
        let border = Style::default().bg(theme::frame_border(chrome.focused));
        let face = Style::default()
            .bg(theme::window_face())
            .fg(theme::window_text());

        for x in left..right {
            painter.put(x, top, " ", header);
        }
        let buttons_shown = frame.width >= MIN_WIDTH_FOR_BUTTONS;
        let title_end = if buttons_shown {
            right - 3 * BUTTON_WIDTH - 1
        } else {
            right - 1
        };
        let glyph = chrome.icon.map(icon_glyph).unwrap_or(" ");
        painter.put(left + 1, top, glyph, header);
        painter.text(left + 3, top, title_end, chrome.title, header);

        if buttons_shown {
            let button = Style::default()
                .bg(theme::title_bg(chrome.focused))
                .fg(theme::title_fg());
            let close = Style::default()
                .bg(theme::close_button_bg())
                .fg(theme::title_fg())
                .add_modifier(Modifier::BOLD);
            let max_glyph = if chrome.maximized { "❐" } else { "□" };
            painter.put(right - 8, top, "_", button);
            painter.put(right - 5, top, max_glyph, button);
            for x in right - BUTTON_WIDTH..right {
                painter.put(x, top, " ", close);
            }
            painter.put(right - 2, top, "✕", close);
        }

        for y in top + 1..bottom {
            let last_row = y == bottom - 1;
            for x in left..right {
                let edge = x == left || x == right - 1 || last_row;
                if edge {
                    painter.put(x, y, " ", border);
                } else {
                    painter.put(x, y, " ", face);
                }
            }
        }
        if !chrome.maximized && frame.height > 1 {
            let grip = Style::default()
                .bg(theme::frame_border(chrome.focused))
                .fg(theme::title_fg());
            painter.put(right - 1, bottom - 1, "◢", grip);
        }
    }

    fn hit_test(&self, frame: Rect, maximized: bool, cell: Point) -> Option<FrameHit> {
        if !frame.contains(cell) {
            return None;
        }
        let x = cell.x as i64;
        let y = cell.y as i64;
        let left = frame.x as i64;
        let top = frame.y as i64;
        let right = frame.right() - 1;
        let bottom = frame.bottom() - 1;

        if y == top {
            return Some(Self::button_at(frame, x).unwrap_or(FrameHit::TitleBar));
        }
        if maximized {
            return Some(FrameHit::Body);
        }
        let hit = if y == bottom && x == left {
            FrameHit::Resize(ResizeEdge::BottomLeft)
        } else if y == bottom && x == right {
            FrameHit::Resize(ResizeEdge::BottomRight)
        } else if y == bottom {
            FrameHit::Resize(ResizeEdge::Bottom)
        } else if x == left {
            FrameHit::Resize(ResizeEdge::Left)
        } else if x == right {
            FrameHit::Resize(ResizeEdge::Right)
        } else {
            FrameHit::Body
        };
        Some(hit)
    }

    fn content_area(&self, frame: Rect) -> Rect {
        Rect::new(
            frame.x.saturating_add(1),
            frame.y.saturating_add(1),
            frame.width.saturating_sub(2),
            frame.height.saturating_sub(2),
        )
    }
}
