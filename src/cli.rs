//! Command line for the terminal desktop.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use indoc::indoc;
use tracing::Level;

use crate::catalog::AppCatalog;
use crate::config::{ConfigError, WmConfig};
use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_TICK_MS};
use crate::geometry::CellScale;

const KEY_HELP: &str = indoc! {"
    Mouse:
      drag a title bar          move the window
      drag a frame edge         resize (left, right, bottom and both bottom corners)
      double-click a title bar  maximize / restore
      double-click an icon      open the app

    Keys:
      Ctrl+W   close the focused window
      Ctrl+Q   quit (asks first while windows are open)
      F12      show or hide the log strip
      Esc      close the start menu
"};

#[derive(Parser, Debug)]
#[command(
    name = "luna-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "An XP-style floating window desktop in the terminal",
    after_help = KEY_HELP
)]
pub struct Cli {
    /// Layout pixels covered by one terminal column.
    #[arg(long = "cell-width", value_name = "PX", default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: u16,

    /// Layout pixels covered by one terminal row.
    #[arg(long = "cell-height", value_name = "PX", default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: u16,

    /// Milliseconds between display-refresh ticks. Drag and resize updates
    /// are committed at most once per tick.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Open an app at startup. Use `app:document` for a document window.
    /// May be repeated.
    #[arg(long = "open", value_name = "APP")]
    pub open: Vec<LaunchSpec>,

    /// Send log output to stderr instead of the in-app log strip.
    #[arg(long = "log-stderr")]
    pub log_stderr: bool,

    /// Most verbose level recorded: error, warn, info, debug or trace.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::DEBUG)]
    pub log_level: Level,
}

/// An app to launch, optionally for one document: `notepad` or
/// `notepad:todo.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub app: String,
    pub document: Option<String>,
}

impl LaunchSpec {
    pub fn app(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            document: None,
        }
    }
}

impl FromStr for LaunchSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (app, document) = match value.split_once(':') {
            Some((app, doc)) => (app.trim(), Some(doc.trim())),
            None => (value.trim(), None),
        };
        if app.is_empty() {
            return Err(format!("missing app name in `{value}`"));
        }
        if document.is_some_and(str::is_empty) {
            return Err(format!("missing document name in `{value}`"));
        }
        Ok(Self {
            app: app.to_string(),
            document: document.map(str::to_string),
        })
    }
}

impl fmt::Display for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.document {
            Some(doc) => write!(f, "{}:{doc}", self.app),
            None => f.write_str(&self.app),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DesktopConfig {
    pub wm: WmConfig,
    pub scale: CellScale,
    pub tick: Duration,
    pub open: Vec<LaunchSpec>,
    pub log_stderr: bool,
    pub log_level: Level,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            wm: WmConfig::default(),
            scale: CellScale {
                width: DEFAULT_CELL_WIDTH,
                height: DEFAULT_CELL_HEIGHT,
            },
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            open: Vec::new(),
            log_stderr: false,
            log_level: Level::DEBUG,
        }
    }
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.cell_width == 0 || cli.cell_height == 0 {
            return Err(ConfigError::EmptyCellScale {
                width: cli.cell_width,
                height: cli.cell_height,
            });
        }
        if !(1..=1000).contains(&cli.tick_ms) {
            return Err(ConfigError::TickOutOfRange(cli.tick_ms));
        }
        let catalog = AppCatalog::stock();
        if let Some(unknown) = cli.open.iter().find(|spec| catalog.get(&spec.app).is_none()) {
            return Err(ConfigError::UnknownApp(unknown.app.clone()));
        }
        let wm = WmConfig::default();
        wm.validate()?;
        Ok(Self {
            wm,
            scale: CellScale {
                width: cli.cell_width,
                height: cli.cell_height,
            },
            tick: Duration::from_millis(cli.tick_ms),
            open: cli.open.clone(),
            log_stderr: cli.log_stderr,
            log_level: cli.log_level,
        })
    }
}
