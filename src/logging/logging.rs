use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::{Level, info};

/// Send all tracing output to `path`. Stdout is owned by the terminal UI, so
/// nothing is written there.
pub fn init(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::INFO)
        .init();

    info!(
        "=== Session started at {} ===",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
