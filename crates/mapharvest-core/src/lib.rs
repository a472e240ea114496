pub mod app_config;
pub mod category;
pub mod config;
pub mod keywords;
pub mod place;
pub mod progress;

pub use app_config::{AppConfig, Environment};
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{builtin_keywords, load_keywords, KeywordsFile};
pub use place::{Admission, Coordinates, PlaceRecord, PlaceSet, TriState};
pub use progress::ScrapeProgress;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read keywords file {path}: {source}")]
    KeywordsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse keywords file: {0}")]
    KeywordsFileParse(#[source] serde_yaml::Error),

    #[error("keyword validation failed: {0}")]
    Validation(String),
}
