//! `tracing` output routed to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

/// Buffers one formatted event and hands it to `console.*` on drop.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = console_line(&self.buffer) else {
            return;
        };
        let line = JsValue::from_str(&line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

// Formatted events end with a newline the console does not need
fn console_line(buffer: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buffer);
    let line = text.trim_end();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// Installs the console subscriber. Later calls are ignored.
pub fn init() {
    // No wall clock on wasm32-unknown-unknown, so no timestamps
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::DEBUG)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::console_line;

    #[test]
    fn strips_trailing_newline() {
        assert_eq!(
            console_line(b" INFO camera ready\n").as_deref(),
            Some(" INFO camera ready")
        );
    }

    #[test]
    fn skips_blank_output() {
        assert_eq!(console_line(b"\n"), None);
        assert_eq!(console_line(b""), None);
    }
}
