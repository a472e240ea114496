//! A scripted [`Page`] for driving the scraper without a browser.
//!
//! The fake renders a results list whose length follows a per-scroll count
//! script, and a set of detail views keyed by listing href. Clicking a
//! listing's locator opens its detail view.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use mapharvest_scraper::selectors;
use mapharvest_scraper::{Locator, Page, PageError};

pub const SEARCH_URL: &str = "https://maps.test/search";

#[derive(Debug, Clone, Default)]
pub struct Detail {
    pub url: String,
    pub ready: bool,
    pub texts: HashMap<Locator, Vec<String>>,
    pub labels: HashMap<Locator, Vec<String>>,
}

impl Detail {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ready: true,
            ..Self::default()
        }
    }

    pub fn text(mut self, locator: &Locator, value: &str) -> Self {
        self.texts
            .entry(locator.clone())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn label(mut self, locator: &Locator, value: &str) -> Self {
        self.labels
            .entry(locator.clone())
            .or_default()
            .push(value.to_string());
        self
    }

    /// A detail view with the three identity fields set.
    pub fn business(url: &str, name: &str, address: &str, phone: &str) -> Self {
        Self::new(url)
            .text(&selectors::NAME[0], name)
            .text(&selectors::ADDRESS[0], address)
            .text(&selectors::PHONE[0], phone)
    }
}

#[derive(Debug, Default)]
struct State {
    hrefs: Vec<String>,
    counts: Vec<usize>,
    scrolls: usize,
    details: HashMap<String, Detail>,
    failing_clicks: HashSet<String>,
    broken: HashSet<Locator>,
    current: Option<String>,
    fail_goto: bool,
    queried: Vec<Locator>,
    waited: Vec<Locator>,
    calls: Vec<String>,
    paused: Duration,
}

impl State {
    fn rendered(&self) -> usize {
        let Some(last) = self.counts.len().checked_sub(1) else {
            return self.hrefs.len();
        };
        self.counts[self.scrolls.saturating_sub(1).min(last)]
    }

    fn detail(&self) -> Option<&Detail> {
        self.current.as_ref().and_then(|href| self.details.get(href))
    }

    fn count(&self, locator: &Locator) -> usize {
        if *locator == selectors::RESULT_LINK {
            return self.rendered();
        }
        if *locator == selectors::SEARCH_BOX {
            return 1;
        }
        let Some(detail) = self.detail() else {
            return 0;
        };
        // The ready marker shares its XPath with the first name candidate, so
        // fixture text for that XPath wins over the `ready` flag.
        if let Some(values) = detail.texts.get(locator).or_else(|| detail.labels.get(locator)) {
            return values.len();
        }
        if *locator == selectors::DETAIL_READY {
            return usize::from(detail.ready);
        }
        0
    }
}

#[derive(Debug, Default)]
pub struct FakePage {
    state: Mutex<State>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result links in DOM order. Duplicates are allowed.
    pub fn with_results(self, hrefs: &[&str]) -> Self {
        self.lock().hrefs = hrefs.iter().map(|h| (*h).to_string()).collect();
        self
    }

    /// Listing counts reported after the 1st, 2nd, ... scroll. The last value
    /// sticks.
    pub fn with_scroll_counts(self, counts: &[usize]) -> Self {
        self.lock().counts = counts.to_vec();
        self
    }

    pub fn with_detail(self, href: &str, detail: Detail) -> Self {
        self.lock().details.insert(href.to_string(), detail);
        self
    }

    pub fn with_failing_click(self, href: &str) -> Self {
        self.lock().failing_clicks.insert(href.to_string());
        self
    }

    /// Every call touching `locator` fails with a protocol error.
    pub fn with_broken(self, locator: &Locator) -> Self {
        self.lock().broken.insert(locator.clone());
        self
    }

    pub fn with_failing_goto(self) -> Self {
        self.lock().fail_goto = true;
        self
    }

    /// Opens `href`'s detail view without a click.
    pub fn opened_on(self, href: &str) -> Self {
        self.lock().current = Some(href.to_string());
        self
    }

    pub fn scrolls(&self) -> usize {
        self.lock().scrolls
    }

    pub fn queried(&self) -> Vec<Locator> {
        self.lock().queried.clone()
    }

    /// How many times `wait_for` was called with `locator`.
    pub fn waits_on(&self, locator: &Locator) -> usize {
        self.lock().waited.iter().filter(|l| *l == locator).count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake page state poisoned")
    }

    fn touch(&self, locator: &Locator) -> Result<MutexGuard<'_, State>, PageError> {
        let mut state = self.lock();
        state.queried.push(locator.clone());
        if state.broken.contains(locator) {
            return Err(PageError::Protocol(format!("broken locator {locator}")));
        }
        Ok(state)
    }
}

fn not_found(locator: &Locator, nth: usize) -> PageError {
    PageError::NotFound(format!("{locator} [{nth}]"))
}

#[async_trait]
impl Page for FakePage {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<(), PageError> {
        let mut state = self.lock();
        state.calls.push(format!("goto {url}"));
        if state.fail_goto {
            return Err(PageError::Protocol("net::ERR_NAME_NOT_RESOLVED".into()));
        }
        state.current = None;
        state.scrolls = 0;
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize, PageError> {
        Ok(self.touch(locator)?.count(locator))
    }

    async fn inner_text(&self, locator: &Locator, nth: usize) -> Result<String, PageError> {
        let state = self.touch(locator)?;
        let Some(detail) = state.detail() else {
            return Err(not_found(locator, nth));
        };
        if let Some(texts) = detail.texts.get(locator) {
            return texts.get(nth).cloned().ok_or_else(|| not_found(locator, nth));
        }
        // A ready view without fixture text shows an empty heading.
        if *locator == selectors::DETAIL_READY && detail.ready && nth == 0 {
            return Ok(String::new());
        }
        Err(not_found(locator, nth))
    }

    async fn attribute(
        &self,
        locator: &Locator,
        nth: usize,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        let state = self.touch(locator)?;
        if *locator == selectors::RESULT_LINK && name == "href" {
            if nth >= state.rendered() {
                return Err(not_found(locator, nth));
            }
            return Ok(state.hrefs.get(nth).cloned());
        }
        if name != "aria-label" {
            return Ok(None);
        }
        state
            .detail()
            .and_then(|d| d.labels.get(locator))
            .and_then(|labels| labels.get(nth))
            .map(|label| Some(label.clone()))
            .ok_or_else(|| not_found(locator, nth))
    }

    async fn click(
        &self,
        locator: &Locator,
        nth: usize,
        timeout: Duration,
    ) -> Result<(), PageError> {
        let mut state = self.touch(locator)?;
        let target = state
            .hrefs
            .iter()
            .find(|href| Locator::listing(href) == *locator)
            .cloned();
        let Some(href) = target else {
            return Err(not_found(locator, nth));
        };
        state.calls.push(format!("click {href}"));
        if state.failing_clicks.contains(&href) {
            return Err(PageError::Timeout {
                what: locator.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }
        state.current = Some(href);
        Ok(())
    }

    async fn hover(&self, locator: &Locator, nth: usize) -> Result<(), PageError> {
        let state = self.touch(locator)?;
        if state.count(locator) > nth {
            Ok(())
        } else {
            Err(not_found(locator, nth))
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), PageError> {
        let mut state = self.touch(locator)?;
        state.calls.push(format!("fill {text}"));
        Ok(())
    }

    async fn press(&self, locator: &Locator, key: &str) -> Result<(), PageError> {
        let mut state = self.touch(locator)?;
        state.calls.push(format!("press {key}"));
        Ok(())
    }

    async fn scroll(&self, _delta_y: u32) -> Result<(), PageError> {
        self.lock().scrolls += 1;
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), PageError> {
        let mut state = self.touch(locator)?;
        state.waited.push(locator.clone());
        if state.count(locator) > 0 {
            Ok(())
        } else {
            Err(PageError::Timeout {
                what: locator.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
        }
    }

    async fn current_url(&self) -> Result<String, PageError> {
        let state = self.lock();
        Ok(state
            .detail()
            .map_or_else(|| SEARCH_URL.to_string(), |d| d.url.clone()))
    }

    async fn pause(&self, duration: Duration) {
        self.lock().paused += duration;
    }
}
