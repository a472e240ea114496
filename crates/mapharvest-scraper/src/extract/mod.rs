//! Best-effort field lookups against an open detail view.

pub mod parse;

use crate::outcome::Outcome;
use crate::page::{Locator, Page};

pub use parse::{OpeningHours, Service, ServiceSnippet};

/// Location fields derived from the detail view's URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFields {
    pub source_url: String,
    pub coordinates: String,
    pub provider_id: String,
}

/// Reads fields from the page one candidate locator list at a time.
///
/// No method here returns an error: a page failure becomes
/// [`Outcome::TransientFailure`] and the caller falls back to a default.
pub struct FieldExtractor<'p, P: Page + ?Sized> {
    page: &'p P,
}

impl<'p, P: Page + ?Sized> FieldExtractor<'p, P> {
    pub fn new(page: &'p P) -> Self {
        Self { page }
    }

    /// Returns the trimmed text of the first match of the first candidate
    /// that has non-empty text.
    ///
    /// Candidates are tried in order and the search stops at the first hit.
    /// If nothing matched and at least one candidate errored, the last error
    /// is reported as a transient failure.
    pub async fn resolve(&self, candidates: &[Locator]) -> Outcome<String> {
        let mut last_failure = None;
        for locator in candidates {
            match self.first_text(locator).await {
                Outcome::Found(text) => return Outcome::Found(text),
                Outcome::NotFound => {}
                Outcome::TransientFailure(reason) => {
                    tracing::debug!(locator = %locator, reason = %reason, "candidate locator failed");
                    last_failure = Some(reason);
                }
            }
        }
        last_failure.map_or(Outcome::NotFound, Outcome::TransientFailure)
    }

    /// [`Self::resolve`] collapsed to a string; misses become `""`.
    pub async fn text(&self, candidates: &[Locator]) -> String {
        self.resolve(candidates).await.unwrap_or_default()
    }

    pub async fn review_count(&self, candidates: &[Locator]) -> Outcome<u64> {
        self.resolve(candidates)
            .await
            .and_then_parse(|raw| parse::parse_review_count(&raw))
    }

    pub async fn rating(&self, candidates: &[Locator]) -> Outcome<f64> {
        self.resolve(candidates)
            .await
            .and_then_parse(|raw| parse::parse_rating(&raw))
    }

    pub async fn hours(&self, candidates: &[Locator]) -> Outcome<OpeningHours> {
        self.resolve(candidates)
            .await
            .and_then_parse(|raw| parse::split_hours(&raw))
    }

    pub async fn url_fields(&self) -> Outcome<UrlFields> {
        match self.page.current_url().await {
            Ok(url) if url.is_empty() => Outcome::NotFound,
            Ok(url) => Outcome::Found(UrlFields {
                coordinates: parse::coordinates_from_url(&url).unwrap_or_default(),
                provider_id: parse::provider_id_from_url(&url).unwrap_or_default(),
                source_url: url,
            }),
            Err(e) => Outcome::TransientFailure(e.to_string()),
        }
    }

    /// Scans at most `limit` matching nodes for service snippets, taken from
    /// the candidates in order.
    ///
    /// Unlike [`Self::resolve`] this does not stop at the first candidate;
    /// all of them contribute until the budget is spent.
    pub async fn service_snippets(
        &self,
        candidates: &[Locator],
        limit: usize,
    ) -> Vec<ServiceSnippet> {
        let mut snippets = Vec::new();
        let mut remaining = limit;
        for locator in candidates {
            if remaining == 0 {
                break;
            }
            let count = match self.page.count(locator).await {
                Ok(n) => n.min(remaining),
                Err(e) => {
                    tracing::debug!(locator = %locator, error = %e, "service snippet count failed");
                    continue;
                }
            };
            remaining -= count;
            for nth in 0..count {
                match self.page.inner_text(locator, nth).await {
                    Ok(raw) => snippets.extend(parse::scan_service_snippet(raw.trim())),
                    Err(e) => {
                        tracing::debug!(locator = %locator, nth, error = %e, "service snippet read failed");
                    }
                }
            }
        }
        snippets
    }

    /// The first photo count found in the `aria-label` of a `locator` match.
    pub async fn photo_count(&self, locator: &Locator) -> Outcome<u64> {
        let count = match self.page.count(locator).await {
            Ok(n) => n,
            Err(e) => return Outcome::TransientFailure(e.to_string()),
        };
        for nth in 0..count {
            match self.page.attribute(locator, nth, "aria-label").await {
                Ok(Some(label)) => {
                    if let Some(photos) = parse::photo_count_from_label(&label) {
                        return Outcome::Found(photos);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(nth, error = %e, "photo label read failed");
                }
            }
        }
        Outcome::NotFound
    }

    /// Whether anything matches `locator` right now.
    pub async fn present(&self, locator: &Locator) -> Outcome<bool> {
        match self.page.count(locator).await {
            Ok(n) => Outcome::Found(n > 0),
            Err(e) => Outcome::TransientFailure(e.to_string()),
        }
    }

    async fn first_text(&self, locator: &Locator) -> Outcome<String> {
        match self.page.count(locator).await {
            Ok(0) => return Outcome::NotFound,
            Ok(_) => {}
            Err(e) => return Outcome::TransientFailure(e.to_string()),
        }
        match self.page.inner_text(locator, 0).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    Outcome::NotFound
                } else {
                    Outcome::Found(text.to_string())
                }
            }
            Err(e) => Outcome::TransientFailure(e.to_string()),
        }
    }
}
