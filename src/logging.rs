use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logging setup for the binary
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset
    pub debug: bool,
    /// Directory for daily-rotated JSON log files; console only when `None`
    pub log_dir: Option<PathBuf>,
}

impl LogOptions {
    fn default_directive(&self) -> &'static str {
        if self.debug {
            "record_pipeline=debug"
        } else {
            "record_pipeline=info"
        }
    }
}

/// Installs the global subscriber: console output plus an optional JSON file layer.
///
/// Keep the returned guard alive for the life of the program so buffered file
/// output is flushed on exit.
pub fn init_logging(options: &LogOptions) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_directive()));

    // Console logs go to stderr so stdout stays clean for JSON output
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &options.log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(dir, "record_pipeline.log");
                let (writer, guard) = tracing_appender::non_blocking(file_appender);
                (Some(fmt::layer().json().with_writer(writer)), Some(guard))
            }
            Err(e) => {
                eprintln!("Could not create log directory {}: {}", dir.display(), e);
                (None, None)
            }
        },
        None => (None, None),
    };

    // try_init so repeated calls (tests, embedding) don't panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_follows_debug_flag() {
        assert_eq!(LogOptions::default().default_directive(), "record_pipeline=info");
        let debug = LogOptions {
            debug: true,
            log_dir: None,
        };
        assert_eq!(debug.default_directive(), "record_pipeline=debug");
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let options = LogOptions {
            debug: false,
            log_dir: Some(dir.path().join("logs")),
        };
        let _guard = init_logging(&options);
        let _second = init_logging(&LogOptions::default());
        assert!(dir.path().join("logs").is_dir());
    }
}
