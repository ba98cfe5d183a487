use anyhow::{Context, Result};
use std::path::Path;

/// Read a log file into memory, replacing invalid UTF-8 rather than failing.
/// Build logs routinely contain binary garbage from crashed processes.
pub fn read_log_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
