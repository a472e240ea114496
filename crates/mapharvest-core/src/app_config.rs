use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process configuration, resolved once at startup and passed down
/// explicitly to the batch runner and the page session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub output_dir: PathBuf,
    /// YAML keyword list; `None` selects the built-in list.
    pub keywords_path: Option<PathBuf>,
    /// Landing URL of the map search surface.
    pub search_url: String,
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
    pub navigation_timeout_ms: u64,
    pub results_timeout_ms: u64,
    pub settle_ms: u64,
    pub scroll_delta_px: u32,
    pub stable_patience: u32,
    pub max_scroll_cycles: u32,
    pub click_attempts: u32,
    pub click_timeout_ms: u64,
    pub click_backoff_ms: u64,
    pub detail_attempts: u32,
    pub detail_timeout_ms: u64,
    pub inter_keyword_delay_ms: u64,
}
