use ratatui::style::Color;

// Luna palette. Colors are declared as RGB and mapped to whatever the
// terminal supports at render time.

pub const DESKTOP_RGB: (u8, u8, u8) = (58, 110, 165);
pub const TITLE_ACTIVE_RGB: (u8, u8, u8) = (36, 84, 219);
pub const TITLE_INACTIVE_RGB: (u8, u8, u8) = (122, 150, 223);
pub const WINDOW_FACE_RGB: (u8, u8, u8) = (236, 233, 216);
pub const CLOSE_RGB: (u8, u8, u8) = (224, 67, 22);
pub const TASKBAR_RGB: (u8, u8, u8) = (30, 58, 110);
pub const TASK_ACTIVE_RGB: (u8, u8, u8) = (30, 70, 160);
pub const TASK_IDLE_RGB: (u8, u8, u8) = (60, 129, 243);
pub const START_RGB: (u8, u8, u8) = (60, 140, 50);
pub const TRAY_RGB: (u8, u8, u8) = (15, 130, 220);
pub const SELECTION_RGB: (u8, u8, u8) = (49, 106, 197);

/// Map an RGB triple to a terminal color. Truecolor terminals (`COLORTERM`
/// containing `truecolor` or `24bit`) get the exact value; everything else
/// gets the nearest entry of the xterm 6x6x6 cube.
pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    if truecolor() {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    } else {
        Color::Indexed(cube_index(rgb))
    }
}

fn truecolor() -> bool {
    std::env::var("COLORTERM")
        .map(|v| {
            let v = v.to_ascii_lowercase();
            v.contains("truecolor") || v.contains("24bit")
        })
        .unwrap_or(false)
}

fn cube_index((r, g, b): (u8, u8, u8)) -> u8 {
    let level = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

pub fn desktop_bg() -> Color {
    rgb_to_color(DESKTOP_RGB)
}
pub fn desktop_fg() -> Color {
    Color::White
}

// Window chrome
pub fn title_bg(focused: bool) -> Color {
    if focused {
        rgb_to_color(TITLE_ACTIVE_RGB)
    } else {
        rgb_to_color(TITLE_INACTIVE_RGB)
    }
}
pub fn title_fg() -> Color {
    Color::White
}
pub fn frame_border(focused: bool) -> Color {
    title_bg(focused)
}
pub fn window_face() -> Color {
    rgb_to_color(WINDOW_FACE_RGB)
}
pub fn window_text() -> Color {
    Color::Black
}
pub fn close_button_bg() -> Color {
    rgb_to_color(CLOSE_RGB)
}

// Taskbar
pub fn taskbar_bg() -> Color {
    rgb_to_color(TASKBAR_RGB)
}
pub fn taskbar_fg() -> Color {
    Color::White
}
pub fn task_button_bg(active: bool) -> Color {
    if active {
        rgb_to_color(TASK_ACTIVE_RGB)
    } else {
        rgb_to_color(TASK_IDLE_RGB)
    }
}
pub fn start_bg() -> Color {
    rgb_to_color(START_RGB)
}
pub fn tray_bg() -> Color {
    rgb_to_color(TRAY_RGB)
}

// Menus and selection
pub fn menu_bg() -> Color {
    Color::White
}
pub fn menu_fg() -> Color {
    Color::Black
}
pub fn selection_bg() -> Color {
    rgb_to_color(SELECTION_RGB)
}
pub fn selection_fg() -> Color {
    Color::White
}

// Log strip
pub fn log_bg() -> Color {
    Color::Black
}
pub fn log_fg() -> Color {
    Color::Gray
}
