use std::fs::{self, File, OpenOptions};
use std::io::{IsTerminal, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Trim `log_path` to its most recent `keep` bytes once it grows past `max`.
fn rotate_log_if_needed(log_path: &Path, max: u64, keep: u64) -> std::io::Result<bool> {
    if !log_path.exists() {
        return Ok(false);
    }

    let metadata = fs::metadata(log_path)?;
    if metadata.len() <= max {
        return Ok(false);
    }

    let mut file = File::open(log_path)?;
    let start_pos = metadata.len().saturating_sub(keep);

    file.seek(SeekFrom::Start(start_pos))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    drop(file);

    // Skip to the first newline to avoid partial lines
    let skip = buffer
        .iter()
        .position(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- Log rotated (older entries removed) ---\n")?;
    file.write_all(&buffer[skip..])?;

    Ok(true)
}

/// A writer factory that produces writers for the shared log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?;
        file.flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

/// Directives applied when `RUST_LOG` is unset: the front end and the core share one level.
fn default_filter(level: &str) -> String {
    format!("chainsim={level},chainsim_core={level}")
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)))
}

/// Initialize logging.
///
/// Without a `log_file`, events go to stderr so stdout carries only the report.
/// With one, they are appended to that file with size-based rotation: past 5MB,
/// only the last 1MB is kept. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let filter = env_filter(level);

    match log_file {
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(std::io::stderr().is_terminal())
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();
        }
        Some(log_path) => {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }

            if let Err(e) = rotate_log_if_needed(log_path, MAX_LOG_SIZE, KEEP_SIZE) {
                eprintln!("Warning: Failed to rotate log file: {}", e);
            }

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(LogWriterFactory {
                            file: Arc::new(Mutex::new(file)),
                        })
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();

            tracing::info!("chainsim logging initialized (log_path={})", log_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_recent_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainsim.log");
        let content: String = (0..100).map(|i| format!("line {i:03}\n")).collect();
        fs::write(&path, &content).unwrap();

        let rotated = rotate_log_if_needed(&path, 100, 50).unwrap();
        assert!(rotated);

        let after = fs::read_to_string(&path).unwrap();
        assert!(after.starts_with("--- Log rotated"));
        assert!(after.ends_with("line 099\n"));
        assert!(!after.contains("line 000"));
        // No partial line survives the cut
        for line in after.lines().skip(1) {
            assert!(line.starts_with("line "), "partial line {line:?}");
        }
    }

    #[test]
    fn test_small_or_missing_log_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainsim.log");

        assert!(!rotate_log_if_needed(&path, 100, 50).unwrap());

        fs::write(&path, "short\n").unwrap();
        assert!(!rotate_log_if_needed(&path, 100, 50).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn test_log_level_reaches_core_events() {
        let subscriber =
            tracing_subscriber::registry().with(EnvFilter::new(default_filter("debug")));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(
                target: "chainsim_core::simulation",
                tracing::Level::DEBUG
            ));
            assert!(tracing::enabled!(target: "chainsim::cli", tracing::Level::DEBUG));
            assert!(!tracing::enabled!(
                target: "chainsim_core::simulation",
                tracing::Level::TRACE
            ));
        });
    }

    #[test]
    fn test_quiet_level_applies_to_core() {
        let subscriber =
            tracing_subscriber::registry().with(EnvFilter::new(default_filter("warn")));

        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(
                target: "chainsim_core::simulation",
                tracing::Level::INFO
            ));
            assert!(tracing::enabled!(
                target: "chainsim_core::simulation",
                tracing::Level::WARN
            ));
        });
    }
}
