//! The terminal desktop: routes crossterm input to the registry and the
//! gesture controllers, and paints the result with ratatui.
//!
//! Layout happens in layout pixels; the desktop maps terminal cells to pixels
//! with a fixed [`CellScale`] so the registry never sees cell coordinates.

mod render;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::Rect as CellRect;

use crate::catalog::AppCatalog;
use crate::cli::{DesktopConfig, LaunchSpec};
use crate::config::ConfigError;
use crate::constants::DOUBLE_CLICK_MS;
use crate::geometry::{CellScale, Point, Rect};
use crate::gesture::{GestureRouter, GestureTarget};
use crate::log_buffer::LogHandle;
use crate::panel::{Panel, PanelHit};
use crate::taskbar;
use crate::window::decorator::{FrameHit, LunaDecorator, WindowDecorator};
use crate::window::{WindowId, WindowRegistry};

const ICON_COLUMN_WIDTH: u16 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopFlow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickTarget {
    TitleBar(WindowId),
    Icon(usize),
}

#[derive(Debug)]
pub struct Desktop {
    registry: WindowRegistry,
    gestures: GestureRouter,
    catalog: AppCatalog,
    decorator: Arc<dyn WindowDecorator>,
    panel: Panel,
    scale: CellScale,
    screen: CellRect,
    selected_icon: Option<usize>,
    start_menu_open: bool,
    last_click: Option<(ClickTarget, Instant)>,
    double_click: Duration,
    confirm_exit: bool,
    log_visible: bool,
    log: Option<LogHandle>,
}

impl Desktop {
    pub fn new(config: &DesktopConfig) -> Result<Self, ConfigError> {
        if config.scale.width == 0 || config.scale.height == 0 {
            return Err(ConfigError::EmptyCellScale {
                width: config.scale.width,
                height: config.scale.height,
            });
        }
        Ok(Self {
            registry: WindowRegistry::with_config(config.wm)?,
            gestures: GestureRouter::new(),
            catalog: AppCatalog::stock(),
            decorator: Arc::new(LunaDecorator),
            panel: Panel::new(),
            scale: config.scale,
            screen: CellRect::default(),
            selected_icon: None,
            start_menu_open: false,
            last_click: None,
            double_click: Duration::from_millis(DOUBLE_CLICK_MS),
            confirm_exit: false,
            log_visible: false,
            log: None,
        })
    }

    /// Attach the log buffer shown in the F12 strip.
    pub fn with_log(mut self, log: LogHandle) -> Self {
        self.log = Some(log);
        self
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WindowRegistry {
        &mut self.registry
    }

    pub fn gestures(&self) -> &GestureRouter {
        &self.gestures
    }

    pub fn catalog(&self) -> &AppCatalog {
        &self.catalog
    }

    pub fn screen(&self) -> CellRect {
        self.screen
    }

    pub fn set_screen(&mut self, screen: CellRect) {
        self.screen = screen;
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn confirm_exit_visible(&self) -> bool {
        self.confirm_exit
    }

    pub fn log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn selected_icon(&self) -> Option<usize> {
        self.selected_icon
    }

    /// Open a catalog app, or one of its documents. Returns `None` for apps
    /// the catalog does not know.
    pub fn launch(&mut self, spec: &LaunchSpec) -> Option<WindowId> {
        let Some(entry) = self.catalog.get(&spec.app) else {
            tracing::warn!(app = %spec.app, "launch of unknown app ignored");
            return None;
        };
        let descriptor = match &spec.document {
            Some(doc) => entry.document_descriptor(doc, &format!("{doc} - {}", entry.title)),
            None => entry.descriptor(),
        };
        Some(self.registry.open(descriptor))
    }

    /// Display-refresh tick: commit at most one pending gesture update.
    pub fn tick(&mut self) -> bool {
        self.gestures.on_frame(&mut self.registry)
    }

    pub fn handle_event(&mut self, event: &Event) -> DesktopFlow {
        self.handle_event_at(event, Instant::now())
    }

    /// [`Desktop::handle_event`] with an explicit clock for double-click
    /// detection.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> DesktopFlow {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse, now);
                DesktopFlow::Continue
            }
            Event::Resize(width, height) => {
                self.screen = CellRect::new(0, 0, *width, *height);
                DesktopFlow::Continue
            }
            _ => DesktopFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> DesktopFlow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if self.confirm_exit {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    return DesktopFlow::Quit;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_exit = false;
                }
                _ => {}
            }
            return DesktopFlow::Continue;
        }
        match key.code {
            KeyCode::Char('q') if ctrl => {
                if self.registry.is_empty() {
                    return DesktopFlow::Quit;
                }
                self.confirm_exit = true;
            }
            KeyCode::Char('w') if ctrl => {
                if let Some(id) = self.registry.focused().map(|w| w.id()) {
                    self.registry.close(id);
                }
            }
            KeyCode::F(12) => self.log_visible = !self.log_visible,
            KeyCode::Esc => self.start_menu_open = false,
            _ => {}
        }
        DesktopFlow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer_down(mouse.column, mouse.row, now);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let pointer = self.to_point(mouse.column, mouse.row);
                self.gestures.pointer_move(pointer);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.gestures.pointer_up();
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16, now: Instant) {
        if self.confirm_exit {
            return;
        }
        if self.start_menu_open {
            if let Some(index) = self.panel.hit_test_menu_item(column, row) {
                self.start_menu_open = false;
                self.note_click(None, now);
                if let Some(app) = self.catalog.entries().get(index).map(|e| e.app) {
                    self.launch(&LaunchSpec::app(app));
                }
                return;
            }
            if self.panel.menu_contains_point(column, row) {
                return;
            }
            self.start_menu_open = false;
            if self.panel.hit_test(column, row) == Some(PanelHit::Start) {
                return;
            }
        }

        if self.panel.contains_point(column, row) {
            self.note_click(None, now);
            match self.panel.hit_test(column, row) {
                Some(PanelHit::Start) => self.start_menu_open = true,
                Some(PanelHit::Window(id)) => {
                    taskbar::activate(&mut self.registry, id);
                }
                Some(PanelHit::Tray) | None => {}
            }
            return;
        }

        if let Some((id, frame, maximized)) = self.window_at(column, row) {
            self.selected_icon = None;
            let cell = Point::new(column as i32, row as i32);
            let hit = self.decorator.hit_test(frame, maximized, cell);
            let target =
                matches!(hit, Some(FrameHit::TitleBar)).then_some(ClickTarget::TitleBar(id));
            let double = self.note_click(target, now);
            let pointer = self.to_point(column, row);
            self.window_pointer_down(id, hit, double, pointer);
            return;
        }

        match self.icon_at(column, row) {
            Some(index) => {
                self.selected_icon = Some(index);
                if self.note_click(Some(ClickTarget::Icon(index)), now)
                    && let Some(app) = self.catalog.entries().get(index).map(|e| e.app)
                {
                    self.launch(&LaunchSpec::app(app));
                }
            }
            None => {
                self.selected_icon = None;
                self.note_click(None, now);
            }
        }
    }

    fn window_pointer_down(
        &mut self,
        id: WindowId,
        hit: Option<FrameHit>,
        double_click: bool,
        pointer: Point,
    ) {
        match hit {
            Some(FrameHit::Close) => {
                self.registry.close(id);
            }
            Some(FrameHit::Minimize) => {
                self.registry.focus(id);
                self.registry.minimize(id);
            }
            Some(FrameHit::Maximize) => {
                self.registry.focus(id);
                self.registry.toggle_maximize(id);
            }
            Some(FrameHit::TitleBar) if double_click => {
                self.registry.focus(id);
                self.registry.toggle_maximize(id);
            }
            Some(FrameHit::TitleBar) => {
                let target = GestureTarget::TitleBar(id);
                if !self.gestures.pointer_down(&mut self.registry, target, pointer) {
                    self.registry.focus(id);
                }
            }
            Some(FrameHit::Resize(edge)) => {
                let target = GestureTarget::ResizeHandle(id, edge);
                if !self.gestures.pointer_down(&mut self.registry, target, pointer) {
                    self.registry.focus(id);
                }
            }
            Some(FrameHit::Body) | None => {
                self.registry.focus(id);
            }
        }
    }

    /// Record a click and report whether it completes a double-click on the
    /// same target.
    fn note_click(&mut self, target: Option<ClickTarget>, now: Instant) -> bool {
        let Some(target) = target else {
            self.last_click = None;
            return false;
        };
        let double = matches!(
            self.last_click,
            Some((prev, at)) if prev == target
                && now.saturating_duration_since(at) <= self.double_click
        );
        self.last_click = if double { None } else { Some((target, now)) };
        double
    }

    fn to_point(&self, column: u16, row: u16) -> Point {
        self.scale.cell_to_point(column, row, self.screen)
    }

    /// Layout-pixel area a maximized window fills.
    pub fn work_area(&self) -> Rect {
        let viewport = self.scale.cells_to_size(self.screen);
        self.registry.config().work_area(viewport)
    }

    fn work_cells(&self) -> CellRect {
        self.work_area().to_cells(self.scale, self.screen)
    }

    fn taskbar_cells(&self) -> CellRect {
        let work = self.work_cells();
        let top = if work.height == 0 {
            self.screen.y
        } else {
            work.y.saturating_add(work.height)
        };
        let bottom = self.screen.y.saturating_add(self.screen.height);
        CellRect::new(self.screen.x, top, self.screen.width, bottom.saturating_sub(top))
    }

    /// Cell-unit frame of a painted window.
    fn window_cells(&self, id: WindowId) -> Option<Rect> {
        self.registry
            .frame_rect(id, self.work_area())
            .map(|rect| rect.to_cell_units(self.scale, self.screen))
    }

    /// Topmost painted window under a cell, with its cell frame and
    /// maximized flag.
    fn window_at(&self, column: u16, row: u16) -> Option<(WindowId, Rect, bool)> {
        let work = self.work_cells();
        if !work.contains(ratatui::layout::Position::new(column, row)) {
            return None;
        }
        let cell = Point::new(column as i32, row as i32);
        self.registry.paint_order().into_iter().rev().find_map(|window| {
            let frame = self.window_cells(window.id())?;
            frame
                .contains(cell)
                .then_some((window.id(), frame, window.is_maximized()))
        })
    }

    /// Desktop icon hit regions, laid out top to bottom in columns.
    fn icon_layout(&self) -> Vec<(usize, CellRect)> {
        let work = self.work_cells();
        let mut layout = Vec::new();
        if work.width < 4 || work.height < 2 {
            return layout;
        }
        let mut x = work.x.saturating_add(1);
        let mut y = work.y.saturating_add(1);
        let bottom = work.y.saturating_add(work.height);
        let right = work.x.saturating_add(work.width);
        for (index, entry) in self.catalog.entries().iter().enumerate() {
            if y >= bottom {
                y = work.y.saturating_add(1);
                x = x.saturating_add(ICON_COLUMN_WIDTH);
            }
            if x >= right {
                break;
            }
            let width = (entry.label.chars().count() as u16 + 2)
                .min(ICON_COLUMN_WIDTH - 1)
                .min(right - x);
            layout.push((index, CellRect::new(x, y, width, 1)));
            y = y.saturating_add(2);
        }
        layout
    }

    fn icon_at(&self, column: u16, row: u16) -> Option<usize> {
        self.icon_layout()
            .into_iter()
            .find(|(_, rect)| rect.contains(ratatui::layout::Position::new(column, row)))
            .map(|(index, _)| index)
    }
}
