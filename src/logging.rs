use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::path::PathBuf;

const LOG_FILE: &str = "film-explorer.log";

/// Where log records go. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

pub fn log_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "film-explorer", "film-explorer")
        .map(|dirs| dirs.cache_dir().join(LOG_FILE))
}

/// Install the global logger. `RUST_LOG` overrides `default_level`.
///
/// Returns the log file path when logging to a file.
pub fn init(default_level: &str, target: LogTarget) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_level));

    let path = match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
            None
        }
        LogTarget::File => {
            let path = log_path().ok_or("Could not determine cache directory")?;
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder.target(Target::Pipe(Box::new(file)));
            Some(path)
        }
    };

    builder.try_init()?;
    Ok(path)
}
