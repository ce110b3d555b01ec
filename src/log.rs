use crate::locations::get_log_dir;
use chrono::Utc;
use std::io::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, Registry};

const MAX_LOG_AGE_DAYS: i64 = 30;

/// Send all tracing output to a fresh logfile. Stdout belongs to the shell.
/// The returned guard must live until the program exits.
pub fn init_logging(debug: bool) -> Result<WorkerGuard> {
    let log_file = get_log_location()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let formatter = BunyanFormattingLayer::new("tarsh".into(), non_blocking);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatter);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(guard)
}

fn get_log_location() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let timestamp = Utc::now().format("%Y-%m-%d-%H-%M-%S");
    let log_file = log_dir.join(format!("tarsh-{}.log", timestamp));
    clean_logfiles(&log_dir)?;
    Ok(log_file)
}

fn clean_logfiles(log_dir: &Path) -> Result<()> {
    for file in std::fs::read_dir(log_dir)? {
        let file = file?;
        let modified = file.metadata()?.modified()?;
        let modified: chrono::DateTime<Utc> = chrono::DateTime::from(modified);
        let age = Utc::now().signed_duration_since(modified);
        if age.num_days() > MAX_LOG_AGE_DAYS {
            std::fs::remove_file(file.path())?;
        }
    }
    Ok(())
}
