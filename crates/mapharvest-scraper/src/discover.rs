//! Scrolls the results panel until the listing count settles, then
//! collects the distinct listing hrefs.
//!
//! The loop moves through these phases:
//!
//! ```text
//! Idle -> Scrolling -> Counting -> (Growing | Unchanged) -> Scrolling ...
//!                               -> Capped | Stable | CycleLimit -> Done
//! ```
//!
//! A panel that never appears goes straight to `Done` with no handles.

use std::collections::HashSet;

use crate::page::{Locator, Page};
use crate::selectors;
use crate::settings::DiscoverySettings;

/// A reference to one listing in the results panel, valid only while that
/// panel is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingHandle {
    pub href: String,
}

impl ListingHandle {
    /// The locator that opens this listing's detail view when clicked.
    #[must_use]
    pub fn locator(&self) -> Locator {
        Locator::listing(&self.href)
    }
}

/// Why the scroll loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The results panel never showed a listing.
    NoResults,
    /// The count reached the caller's cap.
    Capped,
    /// The count stayed the same for `stable_patience` readings.
    Stable,
    /// `max_cycles` scrolls ran without the count settling.
    CycleLimit,
    /// Scrolling or counting raised; whatever was rendered is collected.
    PageFailure,
}

#[derive(Debug, Clone)]
pub struct Discovery {
    pub handles: Vec<ListingHandle>,
    pub cycles: u32,
    pub stop: StopReason,
}

/// What a single count reading means for the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Growing,
    Unchanged,
    Capped,
    Stable,
}

/// Tracks consecutive identical readings.
///
/// The first reading of a new value starts a run of one; the list is stable
/// once a run reaches `patience`. A drop in count starts a new run like
/// growth does.
#[derive(Debug)]
struct StabilityTracker {
    patience: u32,
    cap: Option<usize>,
    last: Option<usize>,
    run: u32,
}

impl StabilityTracker {
    fn new(patience: u32, cap: Option<usize>) -> Self {
        Self {
            patience: patience.max(1),
            cap,
            last: None,
            run: 0,
        }
    }

    fn observe(&mut self, count: usize) -> Verdict {
        if self.cap.is_some_and(|cap| count >= cap) {
            return Verdict::Capped;
        }
        let verdict = if self.last == Some(count) {
            self.run += 1;
            Verdict::Unchanged
        } else {
            self.last = Some(count);
            self.run = 1;
            Verdict::Growing
        };
        if self.run >= self.patience {
            Verdict::Stable
        } else {
            verdict
        }
    }
}

pub struct ResultListDiscoverer<'p, P: Page + ?Sized> {
    page: &'p P,
    settings: &'p DiscoverySettings,
}

impl<'p, P: Page + ?Sized> ResultListDiscoverer<'p, P> {
    pub fn new(page: &'p P, settings: &'p DiscoverySettings) -> Self {
        Self { page, settings }
    }

    /// Runs the scroll loop and returns at most `cap` distinct handles in
    /// first-seen order. Never fails; page errors end the loop early.
    pub async fn discover(&self, cap: Option<usize>) -> Discovery {
        let link = &selectors::RESULT_LINK;
        if let Err(e) = self.page.wait_for(link, self.settings.panel_timeout).await {
            tracing::warn!(error = %e, "results panel did not appear");
            return Discovery {
                handles: Vec::new(),
                cycles: 0,
                stop: StopReason::NoResults,
            };
        }

        let mut tracker = StabilityTracker::new(self.settings.stable_patience, cap);
        let mut cycles = 0u32;
        let stop = loop {
            if cycles >= self.settings.max_cycles {
                tracing::info!(cycles, "scroll cycle limit reached");
                break StopReason::CycleLimit;
            }
            if let Err(e) = self.page.scroll(self.settings.scroll_delta_px).await {
                tracing::warn!(cycle = cycles + 1, error = %e, "scroll failed");
                break StopReason::PageFailure;
            }
            self.page.pause(self.settings.settle).await;
            cycles += 1;

            let count = match self.page.count(link).await {
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!(cycle = cycles, error = %e, "listing count failed");
                    break StopReason::PageFailure;
                }
            };
            tracing::debug!(cycle = cycles, count, "listings rendered");

            match tracker.observe(count) {
                Verdict::Capped => break StopReason::Capped,
                Verdict::Stable => break StopReason::Stable,
                Verdict::Growing | Verdict::Unchanged => {}
            }
        };

        let mut handles = self.collect(link).await;
        if let Some(cap) = cap {
            handles.truncate(cap);
        }
        tracing::info!(
            listings = handles.len(),
            cycles,
            stop = ?stop,
            "result discovery finished"
        );
        Discovery {
            handles,
            cycles,
            stop,
        }
    }

    async fn collect(&self, link: &Locator) -> Vec<ListingHandle> {
        let rendered = match self.page.count(link).await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "could not count listings for collection");
                return Vec::new();
            }
        };
        let mut seen = HashSet::new();
        let mut handles = Vec::new();
        for nth in 0..rendered {
            match self.page.attribute(link, nth, "href").await {
                Ok(Some(href)) if !href.is_empty() => {
                    if seen.insert(href.clone()) {
                        handles.push(ListingHandle { href });
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(nth, error = %e, "listing href unreadable");
                }
            }
        }
        handles
    }
}
