//! Rolling Logger
//!
//! Writes tracing output to `<dir>/<app>.log`. When the file would grow past
//! its size limit it is renamed to `<app>.log.1`, older backups shift up by
//! one and the oldest is dropped. Everything is mirrored to stderr.
//!
//! `log` records are bridged into tracing, so the `info`/`error` helpers and
//! any dependency using the `log` facade end up in the same file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing_subscriber::fmt::{time::ChronoLocal, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_BACKUPS: usize = 3;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

struct RollingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    max_backups: usize,
}

impl RollingFile {
    fn open(path: PathBuf, max_bytes: u64, max_backups: usize) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            file,
            written,
            max_bytes,
            max_backups,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_backups == 0 {
            self.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Shared handle to a rotating log file, usable as a tracing writer.
#[derive(Clone)]
pub struct RollingFileWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingFileWriter {
    pub fn new(log_dir: impl AsRef<Path>, app_name: &str) -> Result<Self, LoggerError> {
        Self::with_limits(log_dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    pub fn with_limits(
        log_dir: impl AsRef<Path>,
        app_name: &str,
        max_bytes: u64,
        max_backups: usize,
    ) -> Result<Self, LoggerError> {
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir).map_err(|source| LoggerError::Io {
            path: log_dir.to_path_buf(),
            source,
        })?;

        let path = log_dir.join(format!("{app_name}.log"));
        let file = RollingFile::open(path.clone(), max_bytes, max_backups)
            .map_err(|source| LoggerError::Io { path, source })?;

        Ok(Self {
            inner: Arc::new(Mutex::new(file)),
        })
    }

    /// Path of the active log file
    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RollingFile> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to the log file for one event.
pub struct RollingFileGuard<'a>(MutexGuard<'a, RollingFile>);

impl Write for RollingFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RollingFileGuard(self.lock())
    }
}

/// Install the global subscriber: stderr plus `<log_dir>/<app_name>.log`.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Returns the path of
/// the active log file.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    let writer = RollingFileWriter::new(log_dir, app_name)?;
    let path = writer.path();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(ChronoLocal::rfc_3339())
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(ChronoLocal::rfc_3339())
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    Ok(path)
}

pub fn info(message: &str) {
    log::info!(target: "rolling_logger", "{message}");
}

pub fn error(message: &str) {
    log::error!(target: "rolling_logger", "{message}");
}
