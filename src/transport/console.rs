//! Colorized console transport

use super::{Record, Transport};
use crate::error::Result;
use colored::Colorize;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes `<timestamp> - <level>: <message>` lines, colored by level
pub struct ConsoleTransport {
    writer: Mutex<Box<dyn Write + Send>>,
    colorize: bool,
}

impl ConsoleTransport {
    /// Console transport on standard output
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console transport on any writer
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            colorize: true,
        }
    }

    /// Enable or disable level colors
    pub fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Render a record as one console line, without the trailing newline
    pub fn format_line(&self, record: &Record<'_>) -> String {
        let line = match &record.timestamp {
            Some(ts) => format!("{} - {}: {}", ts, record.level.name(), record.message),
            None => format!("{}: {}", record.level.name(), record.message),
        };

        match record.level.color().terminal() {
            Some(color) if self.colorize => line.color(color).to_string(),
            _ => line,
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&self, record: &Record<'_>) -> Result<()> {
        let line = self.format_line(record);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}
