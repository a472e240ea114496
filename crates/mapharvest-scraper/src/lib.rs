pub mod browser;
pub mod builder;
pub mod discover;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod outcome;
pub mod page;
mod retry;
pub mod selectors;
pub mod settings;

pub use browser::{BrowserSettings, ChromiumPage};
pub use builder::PlaceRecordBuilder;
pub use discover::{Discovery, ListingHandle, ResultListDiscoverer, StopReason};
pub use error::{PageError, ScraperError};
pub use extract::FieldExtractor;
pub use orchestrator::{KeywordScrapeOrchestrator, KeywordScraper};
pub use outcome::Outcome;
pub use page::{Locator, Page};
pub use settings::{DiscoverySettings, ScrapeSettings};
