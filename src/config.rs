use std::env;
use std::path::PathBuf;

// Constants
pub const DEFAULT_STORE_PATH: &str = "database/prescriptions.bin.gz";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const STORE_ENV: &str = "OPTIRX_STORE";
pub const LOG_ENV: &str = "OPTIRX_LOG";

/// Runtime settings for the command-line front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Where the prescription snapshot is read from and written to
    pub store_path: PathBuf,

    /// `env_logger` filter directive
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(path) = lookup(STORE_ENV).filter(|v| !v.trim().is_empty()) {
            config.store_path = PathBuf::from(path.trim());
        }
        if let Some(filter) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }
        config
    }

    /// Install the global logger. Safe to call more than once.
    pub fn init_logging(&self) {
        let _ = env_logger::Builder::new()
            .parse_filters(&self.log_filter)
            .try_init();
    }
}
