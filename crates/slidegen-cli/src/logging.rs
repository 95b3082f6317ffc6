//! Logger setup: every record goes to stderr and to an append-only log file.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use env_logger::{Env, Target};
use log::Level;

/// Log file written in the working directory
pub const LOG_FILE: &str = "slidegen.log";

/// Environment variable holding the log filter (`env_logger` syntax)
pub const LOG_ENV: &str = "SLIDEGEN_LOG";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writer duplicating output to stderr and a file
pub struct TeeWriter<W: Write> {
    file: W,
}

impl<W: Write> TeeWriter<W> {
    pub fn new(file: W) -> Self {
        Self { file }
    }

    pub fn into_inner(self) -> W {
        self.file
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Format one log line: `2024-01-31 12:00:00 - INFO - message`
pub fn format_line(timestamp: &str, level: Level, message: impl Display) -> String {
    format!("{} - {} - {}", timestamp, level, message)
}

fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger
///
/// Falls back to stderr only when `log_file` cannot be opened. Calling this
/// more than once keeps the first logger.
pub fn init(log_file: impl AsRef<Path>) {
    let log_file = log_file.as_ref();
    let mut builder = env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV, "info"));
    builder.format(|buf, record| {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(buf, "{}", format_line(&timestamp.to_string(), record.level(), record.args()))
    });

    let file_error = match open_log(log_file) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(TeeWriter::new(file))));
            None
        }
        Err(e) => {
            builder.target(Target::Stderr);
            Some(e)
        }
    };

    if builder.try_init().is_err() {
        return;
    }
    if let Some(e) = file_error {
        log::warn!("Cannot open log file {}: {}", log_file.display(), e);
    }
}
