//! The extracted business-listing record and its keyword-level accumulator.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A Yes / No / Unknown attribute. `Unknown` means nothing was detected;
/// `No` is the explicit default for service flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriState {
    Yes,
    No,
    #[default]
    Unknown,
}

impl TriState {
    /// Promote to `Yes`. Flags are never demoted during an extraction pass.
    pub fn raise(&mut self) {
        *self = TriState::Yes;
    }

    #[must_use]
    pub fn is_yes(self) -> bool {
        self == TriState::Yes
    }
}

impl std::fmt::Display for TriState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriState::Yes => write!(f, "Yes"),
            TriState::No => write!(f, "No"),
            TriState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Parsed `lat, lng` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Parses the `"lat, lng"` form stored on [`PlaceRecord::coordinates`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (lat, lng) = raw.split_once(',')?;
        Some(Self {
            lat: lat.trim().parse().ok()?,
            lng: lng.trim().parse().ok()?,
        })
    }
}

/// One discovered business.
///
/// Field order is the CSV column order; serde names are the column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceRecord {
    pub name: String,
    pub address: String,
    #[serde(rename = "phone_number")]
    pub phone: String,
    /// Detail-page URL the record was read from.
    #[serde(rename = "google_maps_url")]
    pub source_url: String,
    /// Provider identifier parsed out of `source_url`; empty when the URL
    /// shape was not recognised.
    #[serde(rename = "place_id")]
    pub provider_id: String,
    /// Raw `"lat, lng"`; see [`Coordinates::parse`].
    pub coordinates: String,
    pub website: String,
    pub place_type: String,
    pub category: Category,
    #[serde(rename = "reviews_average")]
    pub rating: Option<f64>,
    #[serde(rename = "reviews_count")]
    pub review_count: Option<u64>,
    pub price_range: String,
    /// Short "today" status, e.g. `Opens 9AM`.
    #[serde(rename = "opens_at")]
    pub hours_status: String,
    pub full_hours: String,
    pub store_shopping: TriState,
    pub in_store_pickup: TriState,
    #[serde(rename = "store_delivery")]
    pub delivery: TriState,
    pub dine_in: TriState,
    pub takeaway: TriState,
    pub reservations: TriState,
    pub wheelchair_accessible: TriState,
    #[serde(rename = "verified_business")]
    pub verified: TriState,
    pub introduction: String,
    /// `"; "`-joined service snippets.
    #[serde(rename = "services_offered")]
    pub service_tags: String,
    #[serde(rename = "photos_count")]
    pub photo_count: Option<u64>,
    pub popular_times: String,
    #[serde(rename = "search_keyword")]
    pub keyword: String,
    #[serde(with = "scraped_at_format")]
    pub scraped_at: NaiveDateTime,
}

/// `scraped_at` is written as local wall-clock `YYYY-mm-dd HH:MM:SS`.
/// ISO-8601 (`T` separator) is accepted on read.
mod scraped_at_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub(super) fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(NaiveDateTime::default());
        }
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| raw.parse::<NaiveDateTime>())
            .map_err(serde::de::Error::custom)
    }
}

impl Default for PlaceRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            source_url: String::new(),
            provider_id: String::new(),
            coordinates: String::new(),
            website: String::new(),
            place_type: String::new(),
            category: Category::Other,
            rating: None,
            review_count: None,
            price_range: String::new(),
            hours_status: String::new(),
            full_hours: String::new(),
            store_shopping: TriState::No,
            in_store_pickup: TriState::No,
            delivery: TriState::No,
            dine_in: TriState::No,
            takeaway: TriState::No,
            reservations: TriState::No,
            wheelchair_accessible: TriState::Unknown,
            verified: TriState::Unknown,
            introduction: String::new(),
            service_tags: String::new(),
            photo_count: None,
            popular_times: String::new(),
            keyword: String::new(),
            scraped_at: NaiveDateTime::default(),
        }
    }
}

impl PlaceRecord {
    /// A record is worth keeping when at least one identity field is present.
    #[must_use]
    pub fn is_useful(&self) -> bool {
        [&self.name, &self.address, &self.phone]
            .iter()
            .any(|s| !s.trim().is_empty())
    }

    /// Scrape-time identity: name + address + phone.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.name.trim().to_lowercase(),
            self.address.trim().to_lowercase(),
            self.phone.trim()
        )
    }

    /// Merge-time identity used when appending into a master file:
    /// name + address + source URL.
    #[must_use]
    pub fn merge_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.name.trim().to_lowercase(),
            self.address.trim().to_lowercase(),
            self.source_url.trim()
        )
    }

    #[must_use]
    pub fn parsed_coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(&self.coordinates)
    }
}

/// Why [`PlaceSet::insert`] did or did not keep a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Added,
    Duplicate,
    NotUseful,
}

/// Insertion-ordered, deduplicated collection of records for one keyword.
#[derive(Debug, Default)]
pub struct PlaceSet {
    records: Vec<PlaceRecord>,
    keys: HashSet<String>,
}

impl PlaceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` if it is useful and its [`PlaceRecord::dedup_key`]
    /// has not been seen.
    pub fn insert(&mut self, record: PlaceRecord) -> Admission {
        if !record.is_useful() {
            return Admission::NotUseful;
        }
        if !self.keys.insert(record.dedup_key()) {
            return Admission::Duplicate;
        }
        self.records.push(record);
        Admission::Added
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PlaceRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<PlaceRecord> {
        self.records
    }
}
