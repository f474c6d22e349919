use std::path::PathBuf;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/leo.txt";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const DATA_ENV: &str = "LEO_DATA";
const LOG_LEVEL_ENV: &str = "LEO_LOG";
const LOG_DIR_ENV: &str = "LEO_LOG_DIR";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Config {
    /// Resolves settings from command-line values, then environment variables, then defaults.
    ///
    /// - data file: `--file`, `LEO_DATA`, `data/leo.txt`
    /// - log level: `--log-level`, `LEO_LOG`, `info`
    /// - log directory: `LEO_LOG_DIR`, `~/.local/share/leo/logs` (on Linux), `./data/leo/logs`
    pub fn resolve(file: Option<PathBuf>, log_level: Option<String>) -> Config {
        let data_file = file
            .or_else(|| std::env::var(DATA_ENV).ok().filter(|s| !s.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let log_level = log_level
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Config { data_file, log_level, log_dir: log_dir() }
    }
}

fn log_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV).map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("data"));
        p.push("leo");
        p.push("logs");
        p
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let c = Config::resolve(Some(PathBuf::from("/tmp/tasks.txt")), Some("debug".into()));
        assert_eq!(c.data_file, PathBuf::from("/tmp/tasks.txt"));
        assert_eq!(c.log_level, "debug");
    }
}
