use crate::errors::MergerResult;
use chrono::Local; // Importing Local from chrono to get the current date and time
use crossterm::style::Stylize; // Importing Stylize from crossterm to style log levels
use log::{Level, LevelFilter, Metadata, Record}; // Importing logging types from the log crate
use std::{
    fs::{File, OpenOptions}, // Importing File and OpenOptions for file operations
    io::Write,               // Importing Write trait for writing to files
    path::Path,              // Importing Path to handle file paths
    sync::Mutex,             // Importing Mutex for thread-safe access to files
};

// Logger that mirrors console output into an optional log file and an
// optional errors-only file. Used instead of env_logger when either file is
// requested on the command line.
pub struct Logger {
    log_file: Option<Mutex<File>>,
    error_file: Option<Mutex<File>>,
    level: LevelFilter,
}

fn open_append(path: &Path) -> std::io::Result<Mutex<File>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Mutex::new)
}

impl Logger {
    pub fn new(
        log_path: Option<&Path>,
        error_path: Option<&Path>,
        level: LevelFilter,
    ) -> MergerResult<Self> {
        let log_file = log_path.map(open_append).transpose()?;
        let error_file = error_path.map(open_append).transpose()?;

        Ok(Logger {
            log_file,
            error_file,
            level,
        })
    }

    // Install as the global logger
    pub fn init(
        log_path: Option<&Path>,
        error_path: Option<&Path>,
        level: LevelFilter,
    ) -> MergerResult<()> {
        let logger = Self::new(log_path, error_path, level)?;
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(())
    }

    // Plain line written to files
    fn format_plain(record: &Record) -> String {
        format!(
            "[{}] {} - {}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    }

    // Colored line written to the terminal
    fn format_console(record: &Record) -> String {
        let level_str = match record.level() {
            Level::Error => record.level().to_string().red(),
            Level::Warn => record.level().to_string().yellow(),
            Level::Info => record.level().to_string().green(),
            Level::Debug => record.level().to_string().blue(),
            Level::Trace => record.level().to_string().magenta(),
        };

        format!(
            "[{}] {} - {}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level_str,
            record.target(),
            record.args()
        )
    }
}

// Implement the Log trait for the Logger struct
impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprint!("{}", Self::format_console(record));

        let plain = Self::format_plain(record);
        if let Some(log_file) = &self.log_file {
            if let Ok(mut file) = log_file.lock() {
                let _ = file.write_all(plain.as_bytes());
            }
        }

        if record.level() == Level::Error {
            if let Some(error_file) = &self.error_file {
                if let Ok(mut file) = error_file.lock() {
                    let _ = file.write_all(plain.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        for file in [&self.log_file, &self.error_file].into_iter().flatten() {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
