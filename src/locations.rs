use directories::BaseDirs;
use std::io::{Error, ErrorKind, Result};
use std::path::PathBuf;

/// Per-user data directory for tarsh, created on first use.
pub(crate) fn get_main_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "No home directory for this user"))?;
    let main_dir = base_dirs.data_dir().join("tarsh");
    if !main_dir.exists() {
        std::fs::create_dir_all(&main_dir)?;
    }
    Ok(main_dir)
}

pub(crate) fn get_log_dir() -> Result<PathBuf> {
    let log_dir = get_main_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}
