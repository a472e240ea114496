//! Pure text parsers for the raw strings read off a detail view.
//!
//! Nothing here touches the page; every function takes the text a locator
//! produced and returns `None` when it cannot make sense of it.

use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d[\d,\u{a0}\u{202f}']*").expect("digit-run regex is valid")
});

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[.,]\d+").expect("decimal regex is valid"));

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?\d+\.\d+),(-?\d+\.\d+)").expect("coordinates regex is valid")
});

static PLACE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"place/[^/]+/data=.*?!3m1!4b1!4m\d+!3m\d+!1s([^!]+)")
        .expect("place id regex is valid")
});

static PLACE_ID_FALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data=.*?1s([^!]+)").expect("place id regex is valid"));

/// Separators the maps UI puts between a category and its service options.
const MIDDOTS: [char; 2] = ['·', '⋅'];

/// Reads the first run of digits, ignoring thousands separators.
///
/// `"1,234 reviews"` and `"(1 234)"` (narrow no-break space) both yield 1234.
#[must_use]
pub fn parse_review_count(raw: &str) -> Option<u64> {
    first_integer(raw)
}

/// Reads a rating like `"4.2"` or the decimal-comma form `"4,2"`.
///
/// A bare integer (`"5"`) is accepted only when it is the whole string.
#[must_use]
pub fn parse_rating(raw: &str) -> Option<f64> {
    if let Some(m) = DECIMAL.find(raw) {
        return m.as_str().replace(',', ".").parse().ok();
    }
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    None
}

/// A short open/closed status plus the full hours text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHours {
    pub status: String,
    pub full: String,
}

/// Splits `"Open ⋅ Closes 10 pm"` into status `"Closes 10 pm"` and the full
/// cleaned string. Text without a separator is used for both.
#[must_use]
pub fn split_hours(raw: &str) -> Option<OpeningHours> {
    let full = raw
        .replace('\u{202f}', "")
        .replace('\u{a0}', " ")
        .trim()
        .to_string();
    if full.is_empty() {
        return None;
    }
    let status = full
        .rsplit(MIDDOTS)
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or(&full)
        .to_string();
    Some(OpeningHours { status, full })
}

/// Extracts `"lat, lng"` from the `@lat,lng,zoom` segment of a maps URL.
#[must_use]
pub fn coordinates_from_url(url: &str) -> Option<String> {
    let caps = COORDINATES.captures(url)?;
    Some(format!("{}, {}", &caps[1], &caps[2]))
}

/// Extracts the provider's opaque place identifier from a maps URL.
#[must_use]
pub fn provider_id_from_url(url: &str) -> Option<String> {
    PLACE_ID
        .captures(url)
        .or_else(|| PLACE_ID_FALLBACK.captures(url))
        .map(|caps| caps[1].to_string())
}

/// A service option advertised in a detail-view snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Shopping,
    Pickup,
    Takeaway,
    Delivery,
    DineIn,
    Reservations,
    Wheelchair,
    Verified,
}

const SYNONYMS: &[(&[&str], &[Service])] = &[
    (&["shop", "shopping", "store"], &[Service::Shopping]),
    (
        &["pickup", "pick-up", "takeaway"],
        &[Service::Pickup, Service::Takeaway],
    ),
    (&["delivery", "deliver"], &[Service::Delivery]),
    (&["dine-in", "dine in", "dining"], &[Service::DineIn]),
    (&["reservation", "booking"], &[Service::Reservations]),
    (
        &["wheelchair", "accessible", "accessibility"],
        &[Service::Wheelchair],
    ),
    (&["verified"], &[Service::Verified]),
];

/// What one service snippet said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSnippet {
    /// The lowercased text after the first separator.
    pub tag: String,
    pub services: Vec<Service>,
}

/// Scans a snippet such as `"Bakery · Dine-in · Takeaway"`.
///
/// Only text after the first middot is considered, so the leading category
/// label never triggers a flag. Snippets without a separator yield `None`.
#[must_use]
pub fn scan_service_snippet(raw: &str) -> Option<ServiceSnippet> {
    let (_, tail) = raw.split_once(MIDDOTS)?;
    let tag = tail.replace('\n', "").trim().to_lowercase();
    if tag.is_empty() {
        return None;
    }
    let mut services = Vec::new();
    for (words, flagged) in SYNONYMS {
        if words.iter().any(|w| tag.contains(w)) {
            services.extend_from_slice(flagged);
        }
    }
    Some(ServiceSnippet { tag, services })
}

/// Reads a photo count from an aria label such as `"1,024 photos"`.
#[must_use]
pub fn photo_count_from_label(label: &str) -> Option<u64> {
    if !label.to_lowercase().contains("photo") {
        return None;
    }
    first_integer(label)
}

fn first_integer(raw: &str) -> Option<u64> {
    let run = DIGIT_RUN.find(raw)?;
    let digits: String = run.as_str().chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
