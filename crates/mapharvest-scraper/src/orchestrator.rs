//! Runs one keyword end to end: search, discover, then visit every listing.

use async_trait::async_trait;
use mapharvest_core::{Admission, Category, PlaceRecord, PlaceSet};

use crate::builder::PlaceRecordBuilder;
use crate::discover::{ListingHandle, ResultListDiscoverer};
use crate::error::{PageError, ScraperError};
use crate::page::Page;
use crate::retry::retry_on_page;
use crate::selectors;
use crate::settings::ScrapeSettings;

/// Anything that can turn a keyword into records. The batch runner is
/// written against this so it can be exercised without a browser.
#[async_trait]
pub trait KeywordScraper: Send {
    /// # Errors
    ///
    /// Returns an error only for failures that make the whole keyword
    /// unusable, such as the search page not loading.
    async fn scrape_keyword(
        &mut self,
        keyword: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<PlaceRecord>, ScraperError>;
}

/// Drives an exclusively owned [`Page`] through one keyword at a time.
pub struct KeywordScrapeOrchestrator<P: Page> {
    page: P,
    settings: ScrapeSettings,
}

impl<P: Page> KeywordScrapeOrchestrator<P> {
    pub fn new(page: P, settings: ScrapeSettings) -> Self {
        Self { page, settings }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    /// Searches for `keyword` and extracts up to `max_results` listings.
    ///
    /// An empty result panel yields `Ok(vec![])`. Per-listing failures are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Navigation`] if the search page cannot be
    /// loaded and [`ScraperError::Search`] if the keyword cannot be entered.
    pub async fn run(
        &self,
        keyword: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<PlaceRecord>, ScraperError> {
        let category = Category::from_keyword(keyword);
        tracing::info!(keyword, category = %category, "scraping keyword");

        self.submit_search(keyword).await?;

        let settings = &self.settings;
        if let Err(e) = self
            .page
            .wait_for(&selectors::RESULT_LINK, settings.results_timeout)
            .await
        {
            tracing::warn!(keyword, error = %e, "no results for keyword");
            return Ok(Vec::new());
        }
        self.page.pause(settings.results_settle).await;
        if let Err(e) = self.page.hover(&selectors::RESULT_LINK, 0).await {
            tracing::debug!(error = %e, "could not hover first result");
        }

        let discovery = ResultListDiscoverer::new(&self.page, &settings.discovery)
            .discover(max_results)
            .await;
        let total = discovery.handles.len();

        let builder = PlaceRecordBuilder::new(&self.page, settings.max_service_snippets);
        let mut places = PlaceSet::new();
        for (idx, handle) in discovery.handles.iter().enumerate() {
            if let Err(e) = self.open_listing(handle).await {
                tracing::warn!(
                    keyword,
                    listing = idx + 1,
                    total,
                    error = %e,
                    "skipping listing that would not open"
                );
                continue;
            }
            if let Err(e) = self.await_detail().await {
                tracing::debug!(listing = idx + 1, error = %e, "detail view not confirmed; extracting anyway");
            }

            let record = builder.build(keyword, category).await;
            let name = record.name.clone();
            match places.insert(record) {
                Admission::Added => {
                    tracing::info!(listing = idx + 1, total, name = %name, "extracted listing");
                }
                Admission::Duplicate => {
                    tracing::debug!(listing = idx + 1, name = %name, "duplicate listing dropped");
                }
                Admission::NotUseful => {
                    tracing::debug!(listing = idx + 1, "listing had no identity fields");
                }
            }
        }

        tracing::info!(keyword, places = places.len(), discovered = total, "keyword finished");
        Ok(places.into_vec())
    }

    async fn submit_search(&self, keyword: &str) -> Result<(), ScraperError> {
        let settings = &self.settings;
        self.page
            .goto(&settings.search_url, settings.navigation_timeout)
            .await
            .map_err(|source| ScraperError::Navigation {
                url: settings.search_url.clone(),
                source,
            })?;
        self.page.pause(settings.page_settle).await;

        let search_err = |source| ScraperError::Search {
            keyword: keyword.to_string(),
            source,
        };
        self.page
            .wait_for(&selectors::SEARCH_BOX, settings.navigation_timeout)
            .await
            .map_err(search_err)?;
        self.page
            .fill(&selectors::SEARCH_BOX, keyword)
            .await
            .map_err(search_err)?;
        self.page.pause(settings.page_settle).await;
        self.page
            .press(&selectors::SEARCH_BOX, "Enter")
            .await
            .map_err(search_err)
    }

    async fn open_listing(&self, handle: &ListingHandle) -> Result<(), PageError> {
        let locator = handle.locator();
        let settings = &self.settings;
        retry_on_page(
            &self.page,
            "listing click",
            settings.click_attempts,
            settings.click_backoff,
            || self.page.click(&locator, 0, settings.click_timeout),
        )
        .await?;
        self.page.pause(settings.click_settle).await;
        Ok(())
    }

    async fn await_detail(&self) -> Result<(), PageError> {
        let settings = &self.settings;
        let ready = selectors::DETAIL_READY;
        retry_on_page(
            &self.page,
            "detail view",
            settings.detail_attempts,
            settings.detail_backoff,
            || self.page.wait_for(&ready, settings.detail_timeout),
        )
        .await?;
        self.page.pause(settings.detail_settle).await;
        Ok(())
    }
}

#[async_trait]
impl<P: Page> KeywordScraper for KeywordScrapeOrchestrator<P> {
    async fn scrape_keyword(
        &mut self,
        keyword: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<PlaceRecord>, ScraperError> {
        self.run(keyword, max_results).await
    }
}
