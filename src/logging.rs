//! Tracing subscriber setup
//!
//! The interactive editor owns the terminal, so it logs to a file under the
//! user's cache directory. Command-line subcommands log to stderr. In both
//! cases `RUST_LOG` takes precedence over the configured level.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "promolist.log";

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// The default log file, `<cache_dir>/promolist/promolist.log`
    ///
    /// Falls back to stderr when no cache directory is known.
    #[must_use]
    pub fn default_file() -> Self {
        dirs::cache_dir().map_or(Self::Stderr, |dir| {
            Self::File(dir.join("promolist").join(LOG_FILE_NAME))
        })
    }
}

/// Build the filter: `RUST_LOG` if set and valid, otherwise `level`
#[must_use]
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and stops the file writer. A subscriber that is already
/// installed is left in place and no guard is returned.
///
/// # Errors
///
/// Returns an I/O error if the log directory cannot be created.
pub fn init(level: &str, target: &LogTarget) -> io::Result<Option<WorkerGuard>> {
    let filter = env_filter(level);

    match target {
        LogTarget::Stderr => {
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(io::stderr))
                .try_init();
            if let Err(e) = installed {
                debug!("keeping existing subscriber: {e}");
            }
            Ok(None)
        }
        LogTarget::File(path) => {
            let (dir, file_name) = split_log_path(path);
            fs::create_dir_all(&dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init();
            if let Err(e) = installed {
                debug!("keeping existing subscriber: {e}");
                return Ok(None);
            }
            Ok(Some(guard))
        }
    }
}

fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let file_name = path
        .file_name()
        .map_or_else(|| LOG_FILE_NAME.to_string(), |n| n.to_string_lossy().into_owned());
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/tmp/promolist/run.log"));
        assert_eq!(dir, PathBuf::from("/tmp/promolist"));
        assert_eq!(name, "run.log");

        let (dir, name) = split_log_path(Path::new("bare.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "bare.log");
    }

    #[test]
    fn test_default_file_is_named() {
        if let LogTarget::File(path) = LogTarget::default_file() {
            assert!(path.ends_with("promolist/promolist.log"));
        }
    }

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("promolist.log");

        assert!(init("debug", &LogTarget::Stderr).unwrap().is_none());
        let guard = init("debug", &LogTarget::File(path.clone())).unwrap();

        // file writer is not installed, so no guard to hold
        assert!(guard.is_none());
        assert!(path.parent().unwrap().is_dir());
    }
}
