use crate::adapters::infrastructure::log_buffer::{LogBuffer, LogBufferLayer};
use crate::config::LoggingConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the log buffer layer and optional file output.
///
/// The returned guard flushes the file writer on drop and must live as long
/// as the process logs.
pub fn init(config: &LoggingConfig, log_buffer: LogBuffer) -> Option<WorkerGuard> {
    // Default to info level for all modules; can be overridden via RUST_LOG env var
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(LogBufferLayer::new(log_buffer));

    if !config.enabled {
        subscriber.init();
        return None;
    }

    // Runs before the subscriber exists, so outcomes are logged afterwards
    let dir_error = fs::create_dir_all(&config.directory).err();
    let cleanup = cleanup_old_logs(config);

    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.directory, &config.file_prefix),
        "never" => tracing_appender::rolling::never(&config.directory, &config.file_prefix),
        _ => tracing_appender::rolling::daily(&config.directory, &config.file_prefix),
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    subscriber
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    if let Some(e) = dir_error {
        tracing::warn!(directory = %config.directory, error = %e, "Failed to create log directory");
    }
    cleanup.report();

    Some(guard)
}

/// A file in the log directory carrying the configured prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Outcome of a log directory sweep
#[derive(Debug, Default)]
pub struct LogCleanup {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, std::io::Error)>,
}

impl LogCleanup {
    fn report(&self) {
        for (path, e) in &self.failed {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete old log file");
        }
        if !self.removed.is_empty() {
            tracing::info!(removed = self.removed.len(), "Cleaned up old log files");
        }
    }
}

/// Pick the files to delete: everything beyond the newest `max_files`,
/// plus anything older than `max_age_days`. A zero limit is disabled.
pub fn select_expired(
    mut files: Vec<LogFile>,
    max_files: u32,
    max_age_days: u32,
    now: SystemTime,
) -> Vec<PathBuf> {
    files.sort_by(|a, b| b.modified.cmp(&a.modified));

    let max_age = Duration::from_secs(u64::from(max_age_days) * 24 * 60 * 60);
    let too_old = |file: &LogFile| {
        max_age_days > 0
            && now
                .duration_since(file.modified)
                .map(|age| age > max_age)
                .unwrap_or(false)
    };

    files
        .into_iter()
        .enumerate()
        .filter(|(rank, file)| (max_files > 0 && *rank >= max_files as usize) || too_old(file))
        .map(|(_, file)| file.path)
        .collect()
}

fn scan_log_files(directory: &Path, prefix: &str) -> std::io::Result<Vec<LogFile>> {
    let files = fs::read_dir(directory)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok().filter(|m| m.is_file())?;
            Some(LogFile {
                path: entry.path(),
                modified: metadata.modified().ok()?,
            })
        })
        .collect();
    Ok(files)
}

/// Delete rotated log files that fall outside the retention policy
pub fn cleanup_old_logs(config: &LoggingConfig) -> LogCleanup {
    let mut cleanup = LogCleanup::default();
    if config.max_files == 0 && config.max_age_days == 0 {
        return cleanup;
    }

    let Ok(files) = scan_log_files(Path::new(&config.directory), &config.file_prefix) else {
        return cleanup;
    };

    for path in select_expired(files, config.max_files, config.max_age_days, SystemTime::now()) {
        match fs::remove_file(&path) {
            Ok(()) => cleanup.removed.push(path),
            Err(e) => cleanup.failed.push((path, e)),
        }
    }
    cleanup
}
