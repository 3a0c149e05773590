use std::fmt;
use std::io;
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;

use luna_wm::cli::{DesktopConfig, LaunchSpec};
use luna_wm::desktop::Desktop;
use luna_wm::geometry::{CellScale, Rect};
use luna_wm::gesture::ResizeEdge;
use luna_wm::window::WindowId;

/// How far (in cells) the synthetic pointer wanders from where it went down.
const SWING: i32 = 12;

#[derive(Parser, Debug)]
#[command(
    name = "wm-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replays a synthetic drag or resize through the desktop and counts committed updates"
)]
struct BenchCli {
    /// `drag`, or a resize edge: right, bottom, left, bottom-right, bottom-left.
    #[arg(short = 'g', long = "gesture", value_name = "GESTURE", default_value = "drag")]
    gesture: Gesture,

    /// Display ticks to simulate.
    #[arg(short = 'f', long = "frames", value_name = "FRAMES", default_value_t = 600)]
    frames: u32,

    /// Pointer moves delivered between two ticks.
    #[arg(short = 'm', long = "moves-per-frame", value_name = "MOVES", default_value_t = 8)]
    moves_per_frame: u32,

    /// Catalog windows opened before the gesture starts. The last one is
    /// the gesture target.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 4)]
    windows: usize,

    /// Screen size in cells, as COLSxROWS.
    #[arg(long = "screen", value_name = "COLSxROWS", default_value = "160x50")]
    screen: ScreenSize,

    /// Skip drawing the desktop after each tick.
    #[arg(long = "no-render")]
    no_render: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Drag,
    Resize(ResizeEdge),
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("drag") {
            return Ok(Gesture::Drag);
        }
        value
            .parse::<ResizeEdge>()
            .map(Gesture::Resize)
            .map_err(|err| err.to_string())
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Drag => f.write_str("drag"),
            Gesture::Resize(edge) => write!(f, "resize {edge}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenSize {
    cols: u16,
    rows: u16,
}

impl FromStr for ScreenSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (cols, rows) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected COLSxROWS, got `{value}`"))?;
        let cols = cols.trim().parse().map_err(|_| format!("bad column count `{cols}`"))?;
        let rows = rows.trim().parse().map_err(|_| format!("bad row count `{rows}`"))?;
        Ok(Self { cols, rows })
    }
}

struct BenchConfig {
    gesture: Gesture,
    frames: u32,
    moves_per_frame: u32,
    windows: usize,
    screen: CellRect,
    render: bool,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=100_000).contains(&cli.frames) {
            return Err("frames must be between 1 and 100000".to_string());
        }
        if !(1..=1_000).contains(&cli.moves_per_frame) {
            return Err("moves per frame must be between 1 and 1000".to_string());
        }
        if !(1..=8).contains(&cli.windows) {
            return Err("windows must be between 1 and 8".to_string());
        }
        if cli.screen.cols < 80 || cli.screen.rows < 24 {
            return Err("screen must be at least 80x24".to_string());
        }
        Ok(Self {
            gesture: cli.gesture,
            frames: cli.frames,
            moves_per_frame: cli.moves_per_frame,
            windows: cli.windows,
            screen: CellRect::new(0, 0, cli.screen.cols, cli.screen.rows),
            render: !cli.no_render,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    let stats = run_bench(&config)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn run_bench(config: &BenchConfig) -> io::Result<BenchStats> {
    let desktop_config = DesktopConfig::default();
    let scale = desktop_config.scale;
    let mut desktop = Desktop::new(&desktop_config).map_err(io::Error::other)?;
    desktop.set_screen(config.screen);

    let apps: Vec<&'static str> = desktop
        .catalog()
        .entries()
        .iter()
        .take(config.windows)
        .map(|entry| entry.app)
        .collect();
    let mut target = None;
    for app in apps {
        target = desktop.launch(&LaunchSpec::app(app));
    }
    let target = target.ok_or_else(|| io::Error::other("no window to drive"))?;

    let frame = window_cells(&desktop, target, scale)
        .ok_or_else(|| io::Error::other("target window is not on screen"))?;
    let (start_col, start_row) = grab_cell(frame, config.gesture);
    let mut buffer = Buffer::empty(config.screen);
    let mut stats = BenchStats::new(desktop.registry().get(target).map(|w| w.rect()));

    desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), start_col, start_row));
    let mut step: i32 = 0;
    for _ in 0..config.frames {
        let frame_start = Instant::now();
        for _ in 0..config.moves_per_frame {
            step = step.wrapping_add(1);
            let (col, row) = wander(start_col, start_row, step, config.screen);
            desktop.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), col, row));
            stats.moves += 1;
        }
        let committed = desktop.tick();
        if config.render {
            desktop.draw(&mut buffer, "12:00 PM");
        }
        stats.record_frame(committed, frame_start.elapsed());
    }
    desktop.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), start_col, start_row));
    stats.final_rect = desktop.registry().get(target).map(|w| w.rect());
    stats.completed = true;
    Ok(stats)
}

fn window_cells(desktop: &Desktop, id: WindowId, scale: CellScale) -> Option<Rect> {
    desktop
        .registry()
        .frame_rect(id, desktop.work_area())
        .map(|rect| rect.to_cell_units(scale, desktop.screen()))
}

/// The cell a user would press to start `gesture` on a window drawn at
/// `frame`.
fn grab_cell(frame: Rect, gesture: Gesture) -> (u16, u16) {
    let left = frame.x;
    let top = frame.y;
    let right = (frame.right() - 1) as i32;
    let bottom = (frame.bottom() - 1) as i32;
    let mid_x = left + frame.width as i32 / 2;
    let mid_y = top + frame.height as i32 / 2;
    let (col, row) = match gesture {
        Gesture::Drag => (left + 2, top),
        Gesture::Resize(ResizeEdge::Right) => (right, mid_y),
        Gesture::Resize(ResizeEdge::Bottom) => (mid_x, bottom),
        Gesture::Resize(ResizeEdge::Left) => (left, mid_y),
        Gesture::Resize(ResizeEdge::BottomRight) => (right, bottom),
        Gesture::Resize(ResizeEdge::BottomLeft) => (left, bottom),
    };
    (col.max(0) as u16, row.max(0) as u16)
}

/// Triangle-wave walk around the start cell, clamped to the screen.
fn wander(col: u16, row: u16, step: i32, screen: CellRect) -> (u16, u16) {
    let period = SWING * 4;
    let phase = step.rem_euclid(period);
    let offset = if phase < SWING * 2 {
        phase - SWING
    } else {
        SWING * 3 - phase
    };
    let max_col = screen.width.saturating_sub(1) as i32;
    let max_row = screen.height.saturating_sub(1) as i32;
    let c = (col as i32 + offset).clamp(0, max_col);
    let r = (row as i32 + offset / 2).clamp(0, max_row);
    (c as u16, r as u16)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    completed: bool,
    frame_count: u64,
    moves: u64,
    commits: u64,
    total_frame_time: Duration,
    slowest_frame: Duration,
    start_rect: Option<Rect>,
    final_rect: Option<Rect>,
}

impl BenchStats {
    fn new(start_rect: Option<Rect>) -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            completed: false,
            frame_count: 0,
            moves: 0,
            commits: 0,
            total_frame_time: Duration::ZERO,
            slowest_frame: Duration::ZERO,
            start_rect,
            final_rect: None,
        }
    }

    fn record_frame(&mut self, committed: bool, frame_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        if committed {
            self.commits = self.commits.saturating_add(1);
        }
        self.total_frame_time += frame_time;
        if frame_time > self.slowest_frame {
            self.slowest_frame = frame_time;
        }
        self.completed_at = Some(Instant::now());
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.total_frame_time.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let coalesced = self.moves.saturating_sub(self.commits);
        let ratio = if self.moves > 0 {
            self.commits as f64 / self.moves as f64
        } else {
            0.0
        };
        let describe = |rect: Option<Rect>| match rect {
            Some(r) => format!("{}x{} at ({}, {})", r.width, r.height, r.x, r.y),
            None => "gone".to_string(),
        };
        indoc::formatdoc!(
            r#"
            Gesture bench {status}: {gesture} over {windows} window(s){render}.
            Frames: {frames} | Moves: {moves} ({per_frame}/frame)
            Commits: {commits} | Coalesced moves: {coalesced} | Commit ratio: {ratio:.3}
            Avg frame: {avg:.3} ms | Worst: {worst:.3} ms | Wall: {elapsed:.2}s
            Window: {before} -> {after}
            "#,
            status = if self.completed { "completed" } else { "aborted" },
            gesture = config.gesture,
            windows = config.windows,
            render = if config.render { " with rendering" } else { "" },
            frames = self.frame_count,
            moves = self.moves,
            per_frame = config.moves_per_frame,
            commits = self.commits,
            coalesced = coalesced,
            ratio = ratio,
            avg = self.average_frame_ms(),
            worst = self.slowest_frame.as_secs_f64() * 1_000.0,
            elapsed = self.elapsed().as_secs_f64(),
            before = describe(self.start_rect),
            after = describe(self.final_rect),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(gesture: Gesture) -> BenchConfig {
        BenchConfig {
            gesture,
            frames: 30,
            moves_per_frame: 5,
            windows: 3,
            screen: CellRect::new(0, 0, 160, 50),
            render: true,
        }
    }

    #[test]
    fn every_frame_commits_at_most_once() {
        let stats = run_bench(&config(Gesture::Drag)).unwrap();
        assert_eq!(stats.moves, 150);
        assert!(stats.commits <= 30);
        assert!(stats.commits > 0);
        assert_ne!(stats.start_rect, stats.final_rect);
    }

    #[test]
    fn resize_edges_change_size() {
        for edge in ResizeEdge::ALL {
            let stats = run_bench(&config(Gesture::Resize(edge))).unwrap();
            let before = stats.start_rect.unwrap();
            let after = stats.final_rect.unwrap();
            assert!(stats.commits > 0, "{edge}");
            assert_ne!(before.size(), after.size(), "{edge}");
        }
    }

    #[test]
    fn gesture_and_screen_parse() {
        assert_eq!("drag".parse::<Gesture>(), Ok(Gesture::Drag));
        assert_eq!(
            "bottom-left".parse::<Gesture>(),
            Ok(Gesture::Resize(ResizeEdge::BottomLeft))
        );
        assert!("top".parse::<Gesture>().is_err());
        assert_eq!(
            "120x40".parse::<ScreenSize>(),
            Ok(ScreenSize { cols: 120, rows: 40 })
        );
        assert!("120".parse::<ScreenSize>().is_err());
    }

    #[test]
    fn wander_stays_on_screen() {
        let screen = CellRect::new(0, 0, 80, 24);
        for step in 0..200 {
            let (c, r) = wander(1, 23, step, screen);
            assert!(c < 80 && r < 24);
        }
    }
}
