use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, filter, fmt, prelude::*};

use crate::config::DualstackConfig;

/// Target for events the binary also reports to the user on stderr. They
/// go to the log file only.
pub const FAILURE_TARGET: &str = "dualstack::failure";

fn on_console(target: &str) -> bool {
    target != FAILURE_TARGET
}

/// Initializes file + stderr logging. `level` is the fallback when
/// `RUST_LOG` is unset. Returns a guard that must be kept alive for the
/// duration of the process.
pub fn init_logging(level: &str) -> Result<WorkerGuard> {
    let logs_dir = DualstackConfig::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    // File appender: daily rotation
    let file_appender = tracing_appender::rolling::daily(&logs_dir, "dualstack");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,dualstack_app={level},dualstack_core={level},dualstack_mapping={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(filter::filter_fn(|meta| on_console(meta.target()))),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

/// Initialize logging to a custom directory with a custom filter.
/// Useful for tests or embedded scenarios where `~/.dualstack/logs` is not desired.
pub fn init_logging_to_dir(logs_dir: &std::path::Path, filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "dualstack");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_to_dir_creates_directory() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let logs_dir = tmp.path().join("nested").join("logs");
        assert!(!logs_dir.exists());

        // Only one global subscriber per process; a second test may get Err.
        let result = init_logging_to_dir(&logs_dir, "warn");
        assert!(logs_dir.exists());

        match result {
            Ok(guard) => drop(guard),
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("logging"), "unexpected error: {msg}");
            }
        }
    }

    #[test]
    fn init_logging_to_dir_existing_directory() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let logs_dir = tmp.path().join("logs");
        std::fs::create_dir_all(&logs_dir).unwrap();

        let result = init_logging_to_dir(&logs_dir, "info");
        assert!(logs_dir.exists());
        drop(result);
    }

    #[test]
    fn env_filter_accepts_config_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let directives = format!(
                "warn,dualstack_app={level},dualstack_core={level},dualstack_mapping={level}"
            );
            assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn failure_events_stay_off_the_console() {
        assert!(!on_console(FAILURE_TARGET));
        assert!(on_console("dualstack_app"));
        assert!(on_console("dualstack_mapping::address_book"));
    }
}
