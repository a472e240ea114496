use std::time::Duration;

use mapharvest_core::config::DEFAULT_SEARCH_URL;
use mapharvest_core::AppConfig;

/// Tuning for the results-list scroll loop.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// How long to wait for the results panel to show any listing.
    pub panel_timeout: Duration,
    /// Wait after every scroll before counting.
    pub settle: Duration,
    pub scroll_delta_px: u32,
    /// Consecutive identical counts that mean the list stopped growing.
    pub stable_patience: u32,
    /// Hard bound on scroll cycles, whatever the counts say.
    pub max_cycles: u32,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            panel_timeout: Duration::from_secs(20),
            settle: Duration::from_secs(2),
            scroll_delta_px: 5000,
            stable_patience: 8,
            max_cycles: 50,
        }
    }
}

/// Everything the per-keyword orchestrator needs besides the page itself.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub search_url: String,
    pub navigation_timeout: Duration,
    /// Wait after loading the search page and after typing the keyword.
    pub page_settle: Duration,
    pub results_timeout: Duration,
    /// Wait after results first appear, before touching the list.
    pub results_settle: Duration,
    pub discovery: DiscoverySettings,
    pub click_attempts: u32,
    pub click_timeout: Duration,
    pub click_backoff: Duration,
    /// Wait after a listing click lands.
    pub click_settle: Duration,
    pub detail_attempts: u32,
    pub detail_timeout: Duration,
    pub detail_backoff: Duration,
    /// Wait after the detail view reports ready, before extraction.
    pub detail_settle: Duration,
    pub max_service_snippets: usize,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            navigation_timeout: Duration::from_secs(30),
            page_settle: Duration::from_secs(2),
            results_timeout: Duration::from_secs(20),
            results_settle: Duration::from_secs(3),
            discovery: DiscoverySettings::default(),
            click_attempts: 5,
            click_timeout: Duration::from_secs(10),
            click_backoff: Duration::from_secs(1),
            click_settle: Duration::from_millis(1500),
            detail_attempts: 5,
            detail_timeout: Duration::from_secs(15),
            detail_backoff: Duration::from_secs(2),
            detail_settle: Duration::from_secs(3),
            max_service_snippets: 10,
        }
    }
}

impl ScrapeSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let settle = Duration::from_millis(config.settle_ms);
        Self {
            search_url: config.search_url.clone(),
            navigation_timeout: Duration::from_millis(config.navigation_timeout_ms),
            page_settle: settle,
            results_timeout: Duration::from_millis(config.results_timeout_ms),
            discovery: DiscoverySettings {
                panel_timeout: Duration::from_millis(config.results_timeout_ms),
                settle,
                scroll_delta_px: config.scroll_delta_px,
                stable_patience: config.stable_patience,
                max_cycles: config.max_scroll_cycles,
            },
            click_attempts: config.click_attempts,
            click_timeout: Duration::from_millis(config.click_timeout_ms),
            click_backoff: Duration::from_millis(config.click_backoff_ms),
            detail_attempts: config.detail_attempts,
            detail_timeout: Duration::from_millis(config.detail_timeout_ms),
            ..Self::default()
        }
    }
}
