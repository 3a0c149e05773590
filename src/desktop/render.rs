use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::prelude::Rect as CellRect;
use ratatui::style::{Modifier, Style};

use super::Desktop;
use crate::catalog::icon_glyph;
use crate::taskbar;
use crate::theme;
use crate::ui::{fill, safe_set_string, set_string_clipped, truncate_to_width};
use crate::window::WindowRecord;
use crate::window::decorator::WindowChrome;

const LOG_STRIP_MAX_ROWS: u16 = 8;
const CONFIRM_WIDTH: u16 = 40;
const CONFIRM_HEIGHT: u16 = 5;

impl Desktop {
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        self.set_screen(frame.area());
        let clock = chrono::Local::now().format("%I:%M %p").to_string();
        self.draw(frame.buffer_mut(), &clock);
    }

    /// Paint the whole desktop into `buffer` for the current screen.
    pub fn draw(&mut self, buffer: &mut Buffer, clock: &str) {
        let screen = self.screen.intersection(buffer.area);
        if screen.width == 0 || screen.height == 0 {
            return;
        }
        let work = self.work_cells();

        fill(
            buffer,
            screen,
            work,
            Style::default().bg(theme::desktop_bg()).fg(theme::desktop_fg()),
        );
        self.draw_icons(buffer, work);
        for window in self.registry.paint_order() {
            self.draw_window(buffer, work, window);
        }

        let taskbar_area = self.taskbar_cells();
        let menu_open = self.start_menu_open;
        let buttons = taskbar::buttons(&self.registry);
        self.panel.begin_frame();
        self.panel
            .render(buffer, taskbar_area, &buttons, menu_open, clock);
        let items: Vec<(&str, &str)> = self
            .catalog
            .entries()
            .iter()
            .map(|entry| (entry.icon, entry.title))
            .collect();
        self.panel.render_menu(buffer, screen, menu_open, &items);

        if self.log_visible {
            self.draw_log_strip(buffer, work);
        }
        if self.confirm_exit {
            self.draw_confirm(buffer, screen);
        }
    }

    fn draw_icons(&self, buffer: &mut Buffer, work: CellRect) {
        let entries = self.catalog.entries();
        for (index, rect) in self.icon_layout() {
            let Some(entry) = entries.get(index) else {
                continue;
            };
            let style = if self.selected_icon == Some(index) {
                Style::default()
                    .bg(theme::selection_bg())
                    .fg(theme::selection_fg())
            } else {
                Style::default()
                    .bg(theme::desktop_bg())
                    .fg(theme::desktop_fg())
            };
            let label = truncate_to_width(
                &format!("{} {}", icon_glyph(entry.icon), entry.label),
                rect.width as usize,
            );
            safe_set_string(buffer, work, rect.x, rect.y, &label, style);
        }
    }

    fn draw_window(&self, buffer: &mut Buffer, work: CellRect, window: &WindowRecord) {
        let Some(frame) = self.window_cells(window.id()) else {
            return;
        };
        let chrome = WindowChrome {
            title: window.title(),
            icon: window.icon(),
            focused: window.is_focused(),
            maximized: window.is_maximized(),
        };
        self.decorator.render_window(buffer, frame, work, &chrome);

        let content = self.decorator.content_area(frame);
        let Some(body) = clip_bounds(content.clip(work)) else {
            return;
        };
        let text = Style::default()
            .bg(theme::window_face())
            .fg(theme::window_text());
        let dim = text.add_modifier(Modifier::DIM);
        let rect = window.rect();
        let lines = [
            (window.app().to_string(), text.add_modifier(Modifier::BOLD)),
            (
                format!("{}x{} at ({}, {})", rect.width, rect.height, rect.x, rect.y),
                text,
            ),
            (
                format!("{} · z {}", window.id(), window.z_index()),
                dim,
            ),
        ];
        for (offset, (line, style)) in lines.iter().enumerate() {
            set_string_clipped(
                buffer,
                body,
                content.x.saturating_add(1),
                content.y.saturating_add(offset as i32),
                line,
                *style,
            );
        }
    }

    fn draw_log_strip(&self, buffer: &mut Buffer, work: CellRect) {
        let rows = LOG_STRIP_MAX_ROWS.min(work.height / 3).max(1);
        if work.height < rows || work.width == 0 {
            return;
        }
        let strip = CellRect::new(
            work.x,
            work.y + work.height - rows,
            work.width,
            rows,
        );
        let style = Style::default().bg(theme::log_bg()).fg(theme::log_fg());
        fill(buffer, strip, strip, style);
        safe_set_string(
            buffer,
            strip,
            strip.x,
            strip.y,
            " log (F12 to hide) ",
            style.add_modifier(Modifier::REVERSED),
        );
        let lines = self
            .log
            .as_ref()
            .map(|log| log.tail(rows.saturating_sub(1) as usize))
            .unwrap_or_default();
        for (offset, line) in lines.iter().enumerate() {
            safe_set_string(
                buffer,
                strip,
                strip.x,
                strip.y + 1 + offset as u16,
                line,
                style,
            );
        }
    }

    fn draw_confirm(&self, buffer: &mut Buffer, screen: CellRect) {
        let width = CONFIRM_WIDTH.min(screen.width);
        let height = CONFIRM_HEIGHT.min(screen.height);
        let area = CellRect::new(
            screen.x + (screen.width - width) / 2,
            screen.y + (screen.height - height) / 2,
            width,
            height,
        );
        let face = Style::default()
            .bg(theme::window_face())
            .fg(theme::window_text());
        let header = Style::default()
            .bg(theme::title_bg(true))
            .fg(theme::title_fg())
            .add_modifier(Modifier::BOLD);
        fill(buffer, screen, area, face);
        fill(buffer, screen, CellRect::new(area.x, area.y, area.width, 1), header);
        safe_set_string(buffer, area, area.x + 1, area.y, "Log Off Windows", header);
        let count = self.registry.len();
        let prompt = format!(
            "Close {count} open window{} and exit?",
            if count == 1 { "" } else { "s" }
        );
        safe_set_string(buffer, area, area.x + 2, area.y + 2, &prompt, face);
        safe_set_string(
            buffer,
            area,
            area.x + 2,
            area.y + 3,
            "[Y]es    [N]o",
            face.add_modifier(Modifier::BOLD),
        );
    }
}

fn clip_bounds(rect: CellRect) -> Option<CellRect> {
    (rect.width > 0 && rect.height > 0).then_some(rect)
}
