//! Application constants and the environment-derived runtime settings.

use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Phytora";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tracing filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "phytora=info,tower_http=info";

/// Get the application data directory, ~/Phytora/ on all platforms
/// (user-visible). `None` when the home directory cannot be determined.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Phytora"))
}

/// Default location of the scan history file.
pub fn default_history_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("scan_history.json"))
}

/// Runtime settings, read once at startup.
///
/// No `Debug` impl: the API key must never reach logs or error output.
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub history_file: PathBuf,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// `OPENAI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self, String> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Factored out of `from_env` so
    /// tests can inject values without touching the process environment.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or("OPENAI_API_KEY is not set")?;

        let base_url =
            lookup("OPENAI_BASE_URL").unwrap_or_else(|| "https://api.openai.com".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a number between 0 and 65535, got {raw:?}"))?,
            None => 3000,
        };

        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("uploads"));

        let history_file = match lookup("HISTORY_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_history_path().ok_or("Cannot determine home directory")?,
        };

        Ok(Self {
            api_key,
            base_url,
            port,
            upload_dir,
            history_file,
        })
    }
}
