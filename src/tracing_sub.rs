//! `tracing` subscriber for the desktop.
//!
//! While the desktop owns the alternate screen, anything written to stderr
//! lands on top of the drawing. [`LogSink::Buffer`] routes formatted events
//! into a [`LogHandle`] instead; the desktop shows its tail in the log strip.

use std::io;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::EitherWriter;

use crate::log_buffer::{LogHandle, LogWriter};

/// Where formatted log lines go.
#[derive(Clone, Debug)]
pub enum LogSink {
    Buffer(LogHandle),
    Stderr,
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = EitherWriter<LogWriter, io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            LogSink::Buffer(handle) => EitherWriter::A(handle.writer()),
            LogSink::Stderr => EitherWriter::B(io::stderr()),
        }
    }
}

/// Install the global subscriber. Returns `false` when one was already set.
pub fn init(level: Level, sink: LogSink) -> bool {
    let ansi = matches!(sink, LogSink::Stderr);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(sink)
        .with_target(false)
        .with_ansi(ansi)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn buffer_sink_collects_lines() {
        let handle = LogHandle::new(8);
        let sink = LogSink::Buffer(handle.clone());
        let mut writer = sink.make_writer();
        writer.write_all(b"opened window\nfocused").unwrap();
        drop(writer);
        assert_eq!(
            handle.tail(8),
            vec!["opened window".to_string(), "focused".to_string()]
        );
    }

    #[test]
    fn each_writer_starts_empty() {
        let handle = LogHandle::new(8);
        let sink = LogSink::Buffer(handle.clone());
        sink.make_writer().write_all(b"one\n").unwrap();
        sink.make_writer().write_all(b"two\n").unwrap();
        assert_eq!(handle.len(), 2);
    }
}
