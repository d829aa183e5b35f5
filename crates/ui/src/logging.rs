//! `tracing` output to the browser console
//!
//! A fmt layer without timestamps or ANSI colors, writing one console call
//! per event. Errors and warnings go to `console.error`/`console.warn` so the
//! browser highlights them. The filter starts at a fixed level and is
//! replaced once the configuration has been loaded.

use std::io;

use tracing::{Level, Metadata, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};
use wasm_bindgen::JsValue;

/// Creates one [`ConsoleLine`] per formatted event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriter;

/// Buffers a formatted event and logs it to the console when dropped.
#[derive(Debug)]
pub struct ConsoleLine {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = JsValue::from_str(text.trim_end());
        if self.level == Level::ERROR {
            web_sys::console::error_1(&line);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&line);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&line);
        } else {
            web_sys::console::debug_1(&line);
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Handle for changing the filter after startup.
#[derive(Debug, Clone)]
pub struct LogHandle(reload::Handle<EnvFilter, Registry>);

impl LogHandle {
    /// Replace the filter with `directive`; invalid directives are logged
    /// and ignored.
    pub fn set_level(&self, directive: &str) {
        match EnvFilter::try_new(directive) {
            Ok(filter) => {
                if let Err(e) = self.0.reload(filter) {
                    warn!(error = %e, "Failed to replace log filter");
                }
            }
            Err(e) => warn!(directive, error = %e, "Ignoring invalid log level"),
        }
    }
}

/// Install the console subscriber. Returns `None` if a global subscriber
/// is already set.
pub fn init(directive: &str) -> Option<LogHandle> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(ConsoleWriter),
        )
        .try_init()
        .ok()
        .map(|()| LogHandle(handle))
}
