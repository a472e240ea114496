//! Search keyword lists: the built-in Malappuram district list and YAML
//! keyword files.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

const TOWNS: [&str; 8] = [
    "malappuram",
    "manjeri",
    "perinthalmanna",
    "nilambur",
    "tirur",
    "ponnani",
    "kondotty",
    "tirurangadi",
];

/// Business terms crossed with [`TOWNS`], and how many towns each covers.
/// `mess` only has listings in the first four towns.
const TERMS: [(&str, usize); 15] = [
    ("bakery", 8),
    ("hotel", 8),
    ("restaurant", 8),
    ("tea shop", 8),
    ("snacks shop", 8),
    ("catering", 8),
    ("event management", 8),
    ("wholesale snacks", 8),
    ("frozen food", 8),
    ("biryani", 8),
    ("fast food", 8),
    ("canteen", 8),
    ("mess", 4),
    ("supermarket", 8),
    ("grocery store", 8),
];

/// The default keyword list, in scrape order.
#[must_use]
pub fn builtin_keywords() -> Vec<String> {
    TERMS
        .iter()
        .flat_map(|(term, towns)| TOWNS[..*towns].iter().map(move |t| format!("{term} {t}")))
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct KeywordsFile {
    pub keywords: Vec<String>,
}

/// Load and validate a keyword list from a YAML file of the form
/// `keywords: ["bakery tirur", ...]`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_keywords(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KeywordsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: KeywordsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::KeywordsFileParse)?;

    validate_keywords(&file.keywords)?;

    Ok(file.keywords.into_iter().map(|k| k.trim().to_string()).collect())
}

fn validate_keywords(keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::Validation(
            "keyword list must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for keyword in keywords {
        let normalized = keyword.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ConfigError::Validation(
                "keywords must be non-empty".to_string(),
            ));
        }
        if !seen.insert(normalized) {
            return Err(ConfigError::Validation(format!(
                "duplicate keyword: '{}'",
                keyword.trim()
            )));
        }
    }

    Ok(())
}
