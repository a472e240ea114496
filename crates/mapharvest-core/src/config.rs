use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default landing view of the map search surface.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/maps/@32.9817464,70.1930781,3.67z?";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got \"{other}\""),
            }),
        }
    };

    let non_empty_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    };

    let env = parse_environment(&or_default("MAPHARVEST_ENV", "development"))?;
    let log_level = or_default("MAPHARVEST_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("MAPHARVEST_OUTPUT_DIR", "./scraping_results"));
    let keywords_path = non_empty_path("MAPHARVEST_KEYWORDS_PATH");
    let search_url = or_default("MAPHARVEST_SEARCH_URL", DEFAULT_SEARCH_URL);
    let headless = parse_bool("MAPHARVEST_HEADLESS", "true")?;
    let chrome_path = non_empty_path("MAPHARVEST_CHROME_PATH");

    let navigation_timeout_ms = parse_u64("MAPHARVEST_NAVIGATION_TIMEOUT_MS", "30000")?;
    let results_timeout_ms = parse_u64("MAPHARVEST_RESULTS_TIMEOUT_MS", "20000")?;
    let settle_ms = parse_u64("MAPHARVEST_SETTLE_MS", "2000")?;
    let scroll_delta_px = parse_u32("MAPHARVEST_SCROLL_DELTA_PX", "5000")?;
    let stable_patience = parse_u32("MAPHARVEST_STABLE_PATIENCE", "8")?;
    let max_scroll_cycles = parse_u32("MAPHARVEST_MAX_SCROLL_CYCLES", "50")?;
    let click_attempts = parse_u32("MAPHARVEST_CLICK_ATTEMPTS", "5")?;
    let click_timeout_ms = parse_u64("MAPHARVEST_CLICK_TIMEOUT_MS", "10000")?;
    let click_backoff_ms = parse_u64("MAPHARVEST_CLICK_BACKOFF_MS", "1000")?;
    let detail_attempts = parse_u32("MAPHARVEST_DETAIL_ATTEMPTS", "5")?;
    let detail_timeout_ms = parse_u64("MAPHARVEST_DETAIL_TIMEOUT_MS", "15000")?;
    let inter_keyword_delay_ms = parse_u64("MAPHARVEST_INTER_KEYWORD_DELAY_MS", "2000")?;

    if stable_patience == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAPHARVEST_STABLE_PATIENCE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        output_dir,
        keywords_path,
        search_url,
        headless,
        chrome_path,
        navigation_timeout_ms,
        results_timeout_ms,
        settle_ms,
        scroll_delta_px,
        stable_patience,
        max_scroll_cycles,
        click_attempts,
        click_timeout_ms,
        click_backoff_ms,
        detail_attempts,
        detail_timeout_ms,
        inter_keyword_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MAPHARVEST_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
