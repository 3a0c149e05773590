use std::io;

use clap::Parser;

use luna_wm::cli::{Cli, DesktopConfig};
use luna_wm::desktop::{Desktop, DesktopFlow};
use luna_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use luna_wm::drivers::{InputDriver, OutputDriver};
use luna_wm::event_loop::{ControlFlow, EventLoop};
use luna_wm::log_buffer::LogHandle;
use luna_wm::tracing_sub::{self, LogSink};

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = DesktopConfig::try_from(&cli)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let log = LogHandle::default();
    let sink = if config.log_stderr {
        LogSink::Stderr
    } else {
        LogSink::Buffer(log.clone())
    };
    tracing_sub::init(config.log_level, sink);

    let mut desktop = Desktop::new(&config).map_err(io::Error::other)?.with_log(log);
    for spec in &config.open {
        desktop.launch(spec);
    }

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;

    let mut event_loop = EventLoop::new(input, config.tick);
    let result = event_loop.run(|_, event| match event {
        None => {
            desktop.tick();
            output.draw(|frame| desktop.render(frame))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => match desktop.handle_event(&event) {
            DesktopFlow::Quit => Ok(ControlFlow::Quit),
            DesktopFlow::Continue => Ok(ControlFlow::Continue),
        },
    });

    output.exit()?;
    tracing::info!(windows = desktop.registry().len(), "desktop closed");
    result
}
