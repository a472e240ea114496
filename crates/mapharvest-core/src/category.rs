//! Keyword → business category classification.

use serde::{Deserialize, Serialize};

/// Output bucket a search keyword (and every record it yields) is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food_Businesses")]
    FoodBusinesses,
    #[serde(rename = "Event_Catering")]
    EventCatering,
    #[serde(rename = "Wholesale_Frozen")]
    WholesaleFrozen,
    #[serde(rename = "Specialty_Food")]
    SpecialtyFood,
    #[serde(rename = "Large_Scale_Buyers")]
    LargeScaleBuyers,
    Other,
}

/// Substring rules in priority order; the first matching rule wins.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::FoodBusinesses,
        &["bakery", "hotel", "restaurant", "tea shop", "snacks shop"],
    ),
    (Category::EventCatering, &["catering", "event management"]),
    (Category::WholesaleFrozen, &["wholesale", "frozen food"]),
    (Category::SpecialtyFood, &["biryani", "fast food"]),
    (Category::LargeScaleBuyers, &["canteen", "mess"]),
];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::FoodBusinesses,
        Category::EventCatering,
        Category::WholesaleFrozen,
        Category::SpecialtyFood,
        Category::LargeScaleBuyers,
        Category::Other,
    ];

    /// Classify a search keyword. Matching is case-insensitive and purely
    /// substring based.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        let lower = keyword.to_lowercase();
        RULES
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
            .map_or(Category::Other, |(category, _)| *category)
    }

    /// Directory and file-name form, e.g. `Food_Businesses`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::FoodBusinesses => "Food_Businesses",
            Category::EventCatering => "Event_Catering",
            Category::WholesaleFrozen => "Wholesale_Frozen",
            Category::SpecialtyFood => "Specialty_Food",
            Category::LargeScaleBuyers => "Large_Scale_Buyers",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
