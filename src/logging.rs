use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_NAME: &str = "projtree.log";
const LOG_ENV: &str = "PROJTREE_LOG";
const DEFAULT_FILTER: &str = "projtree=info";
/// The status bar is one row; longer events are cut with an ellipsis.
const STATUS_MAX_CHARS: usize = 160;

pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    log_dir: PathBuf,
    status_rx: Option<Receiver<String>>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &std::path::Path {
        &self.log_dir
    }

    pub fn take_log_rx(&mut self) -> Option<Receiver<String>> {
        self.status_rx.take()
    }
}

fn status_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.chars().count() <= STATUS_MAX_CHARS {
        return Some(line.to_string());
    }
    let mut cut: String = line.chars().take(STATUS_MAX_CHARS - 1).collect();
    cut.push('…');
    Some(cut)
}

/// Buffers one formatted event and hands its lines to the status bar on drop.
struct StatusWriter {
    buf: Vec<u8>,
    tx: Sender<String>,
}

impl StatusWriter {
    fn new(tx: Sender<String>) -> Self {
        Self {
            buf: Vec::with_capacity(128),
            tx,
        }
    }
}

impl Write for StatusWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for StatusWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        for line in text.lines().filter_map(status_line) {
            let _ = self.tx.send(line);
        }
    }
}

#[derive(Clone)]
struct StatusMakeWriter {
    tx: Sender<String>,
}

impl<'a> MakeWriter<'a> for StatusMakeWriter {
    type Writer = StatusWriter;

    fn make_writer(&'a self) -> Self::Writer {
        StatusWriter::new(self.tx.clone())
    }
}

fn resolve_log_dir() -> Option<PathBuf> {
    projtree::kernel::services::adapters::ensure_log_dir()
        .or_else(|err| -> io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("projtree").join("logs");
            std::fs::create_dir_all(&dir)?;
            eprintln!("projtree: log dir unavailable ({err}), using {}", dir.display());
            Ok(dir)
        })
        .ok()
}

/// Installs the global subscriber.
///
/// The daily file under the log dir gets every event with source locations. The status bar
/// channel (`LoggingGuard::take_log_rx`) only gets compact INFO-and-above lines.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let (status_tx, status_rx) = mpsc::channel::<String>();

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    let status_layer = tracing_subscriber::fmt::layer()
        .with_writer(StatusMakeWriter { tx: status_tx })
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .compact()
        .with_filter(LevelFilter::INFO);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(status_layer);

    if subscriber.try_init().is_err() {
        return None;
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(panic = %panic_info, "panic");
        default_hook(panic_info);
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _file_guard: file_guard,
        log_dir,
        status_rx: Some(status_rx),
    })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
