//! The taskbar: start button, one button per open window and the clock tray,
//! plus the start menu that opens upward from the start button.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::catalog::icon_glyph;
use crate::taskbar::TaskbarButton;
use crate::theme;
use crate::ui::{fill, safe_set_string, truncate_to_width};
use crate::window::WindowId;

const START_LABEL: &str = " ⊞ start ";
const TASK_BUTTON_WIDTH: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Start,
    Window(WindowId),
    Tray,
}

#[derive(Debug, Clone, Copy)]
struct PanelWindowHit {
    id: WindowId,
    rect: Rect,
}

#[derive(Debug, Clone, Copy)]
struct PanelMenuHit {
    index: usize,
    rect: Rect,
}

#[derive(Debug, Default)]
struct StartMenu {
    bounds: Option<Rect>,
    item_hits: Vec<PanelMenuHit>,
}

#[derive(Debug, Default)]
pub struct Panel {
    area: Rect,
    start_rect: Option<Rect>,
    tray_rect: Option<Rect>,
    window_hits: Vec<PanelWindowHit>,
    menu: StartMenu,
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(ratatui::layout::Position::new(column, row))
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.start_rect = None;
        self.tray_rect = None;
        self.window_hits.clear();
        self.menu.bounds = None;
        self.menu.item_hits.clear();
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn render(
        &mut self,
        buffer: &mut Buffer,
        area: Rect,
        buttons: &[TaskbarButton],
        menu_open: bool,
        clock: &str,
    ) {
        self.area = area;
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        fill(buffer, bounds, bounds, base);

        let label_row = bounds.y + bounds.height / 2;
        let max_x = bounds.x.saturating_add(bounds.width);
        let mut x = bounds.x;

        let start_width = START_LABEL.chars().count() as u16;
        if x.saturating_add(start_width) <= max_x {
            let mut style = Style::default()
                .bg(theme::start_bg())
                .fg(theme::taskbar_fg())
                .add_modifier(Modifier::BOLD | Modifier::ITALIC);
            if menu_open {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let rect = Rect::new(x, bounds.y, start_width, bounds.height);
            fill(buffer, bounds, rect, style);
            safe_set_string(buffer, bounds, x, label_row, START_LABEL, style);
            self.start_rect = Some(rect);
            x = x.saturating_add(start_width + 1);
        }

        let clock_chunk = format!(" {clock} ");
        let clock_width = clock_chunk.chars().count() as u16;
        let tray_x = max_x.saturating_sub(clock_width).max(x);
        if tray_x < max_x {
            let style = Style::default().bg(theme::tray_bg()).fg(theme::taskbar_fg());
            let rect = Rect::new(tray_x, bounds.y, max_x - tray_x, bounds.height);
            fill(buffer, bounds, rect, style);
            safe_set_string(buffer, bounds, tray_x, label_row, &clock_chunk, style);
            self.tray_rect = Some(rect);
        }

        for button in buttons {
            let room = tray_x.saturating_sub(x).saturating_sub(1);
            if room < 4 {
                break;
            }
            let width = TASK_BUTTON_WIDTH.min(room);
            let glyph = button.icon.as_deref().map(icon_glyph).unwrap_or(" ");
            let label = format!(" {glyph} {}", button.title);
            let label = truncate_to_width(&label, width as usize);
            let mut style = Style::default()
                .bg(theme::task_button_bg(button.active))
                .fg(theme::taskbar_fg());
            if button.active {
                style = style.add_modifier(Modifier::BOLD);
            }
            let rect = Rect::new(x, bounds.y, width, bounds.height);
            fill(buffer, bounds, rect, style);
            safe_set_string(buffer, bounds, x, label_row, &label, style);
            self.window_hits.push(PanelWindowHit {
                id: button.id,
                rect,
            });
            x = x.saturating_add(width + 1);
        }
    }

    /// Draw the start menu above the start button. `items` pairs an icon name
    /// with the text shown for it.
    pub fn render_menu(
        &mut self,
        buffer: &mut Buffer,
        bounds: Rect,
        open: bool,
        items: &[(&str, &str)],
    ) {
        if !open || items.is_empty() {
            return;
        }
        let Some(anchor) = self.start_rect else {
            return;
        };
        let bounds = bounds.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let label_width = items
            .iter()
            .map(|(_, label)| label.chars().count() as u16)
            .max()
            .unwrap_or(1);
        let max_width = bounds
            .x
            .saturating_add(bounds.width)
            .saturating_sub(anchor.x)
            .max(1);
        let width = (label_width + 6).min(max_width);
        let room_above = anchor.y.saturating_sub(bounds.y);
        let height = (items.len() as u16).saturating_add(2).min(room_above);
        if height < 3 {
            return;
        }
        let top = anchor.y - height;
        let menu_rect = Rect::new(anchor.x, top, width, height);
        let menu_style = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
        let header_style = Style::default()
            .bg(theme::title_bg(true))
            .fg(theme::title_fg())
            .add_modifier(Modifier::BOLD);
        fill(buffer, bounds, menu_rect, menu_style);
        fill(buffer, bounds, Rect::new(anchor.x, top, width, 1), header_style);
        safe_set_string(buffer, bounds, anchor.x + 1, top, "Programs", header_style);
        self.menu.bounds = Some(menu_rect);

        let visible = (height - 2) as usize;
        let inner_width = width.saturating_sub(2).max(1) as usize;
        for (idx, (icon, label)) in items.iter().take(visible).enumerate() {
            let y = top + 1 + idx as u16;
            let rect = Rect::new(anchor.x, y, width, 1);
            fill(buffer, bounds, rect, menu_style);
            let line = truncate_to_width(&format!("{} {label}", icon_glyph(icon)), inner_width);
            safe_set_string(buffer, bounds, anchor.x + 1, y, &line, menu_style);
            self.menu.item_hits.push(PanelMenuHit { index: idx, rect });
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<PanelHit> {
        if let Some(rect) = self.start_rect
            && rect_contains(rect, column, row)
        {
            return Some(PanelHit::Start);
        }
        if let Some(hit) = self
            .window_hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
        {
            return Some(PanelHit::Window(hit.id));
        }
        if let Some(rect) = self.tray_rect
            && rect_contains(rect, column, row)
        {
            return Some(PanelHit::Tray);
        }
        None
    }

    pub fn contains_point(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn menu_contains_point(&self, column: u16, row: u16) -> bool {
        self.menu
            .bounds
            .is_some_and(|rect| rect_contains(rect, column, row))
    }

    pub fn hit_test_menu_item(&self, column: u16, row: u16) -> Option<usize> {
        self.menu
            .item_hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
            .map(|hit| hit.index)
    }
}
