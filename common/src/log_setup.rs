use std::path::Path;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "despeckle";
const MAX_LOG_FILES: usize = 5;

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `base_level`. Console output goes to stdout,
/// with warnings and errors mirrored to stderr. When `log_dir` is given, a daily
/// rotating file layer is added as well.
pub fn setup_logging(base_level: &str, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(base_level))?;

    let console_writer = std::io::stdout.and(std::io::stderr.with_max_level(Level::WARN));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(console_writer);

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            let file_appender = tracing_appender::rolling::Builder::new()
                .rotation(tracing_appender::rolling::Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .max_log_files(MAX_LOG_FILES)
                .build(dir)?;

            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            if LOG_GUARD.set(guard).is_err() {
                anyhow::bail!("Logging already initialized");
            }

            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(file_writer),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
