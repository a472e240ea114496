//! Sequential keyword loop with per-keyword persistence and checkpoints.

use std::time::Duration;

use mapharvest_core::{Category, PlaceRecord, ScrapeProgress};
use mapharvest_scraper::KeywordScraper;
use mapharvest_store::{append_or_merge, save_progress, write_summary, RunLayout, WriteMode};

use crate::interrupt::Interrupt;

pub(crate) struct BatchRunner<S> {
    scraper: S,
    layout: RunLayout,
    inter_keyword_delay: Duration,
    interrupt: Interrupt,
}

impl<S: KeywordScraper> BatchRunner<S> {
    pub(crate) fn new(
        scraper: S,
        layout: RunLayout,
        inter_keyword_delay: Duration,
        interrupt: Interrupt,
    ) -> Self {
        Self {
            scraper,
            layout,
            inter_keyword_delay,
            interrupt,
        }
    }

    pub(crate) fn into_scraper(self) -> S {
        self.scraper
    }

    /// Scrapes `keywords` from `progress.resume_index()` onward, adding to
    /// `progress`.
    ///
    /// Keyword failures are recorded and the loop moves on. Interruption ends
    /// the loop; the keyword in flight is abandoned and its partial results
    /// are not written. Progress is checkpointed after every keyword, and the
    /// final progress and summary report are written before returning.
    pub(crate) async fn run(
        &mut self,
        keywords: &[String],
        mut progress: ScrapeProgress,
        max_per_keyword: Option<usize>,
    ) -> ScrapeProgress {
        let total = keywords.len();
        let start_index = progress.resume_index();
        if start_index >= total {
            tracing::warn!(start_index, total, "start index is past the end of the keyword list");
        }
        tracing::info!(
            total,
            start_index,
            run_dir = %self.layout.root().display(),
            "starting batch"
        );

        let mut interrupted = false;
        for (idx, keyword) in keywords.iter().enumerate().skip(start_index) {
            if self.interrupt.is_set() {
                interrupted = true;
                break;
            }
            tracing::info!(index = idx + 1, total, keyword = %keyword, "processing keyword");

            let result = tokio::select! {
                result = self.scraper.scrape_keyword(keyword, max_per_keyword) => result,
                () = self.interrupt.triggered() => {
                    tracing::warn!(keyword = %keyword, "interrupted; discarding in-flight keyword");
                    interrupted = true;
                    break;
                }
            };

            match result {
                Ok(places) => {
                    let category = Category::from_keyword(keyword);
                    if places.is_empty() {
                        tracing::warn!(keyword = %keyword, "no places found");
                    } else {
                        self.persist(keyword, category, &places);
                        tracing::info!(keyword = %keyword, places = places.len(), category = %category, "keyword saved");
                    }
                    progress.record_completed(idx, keyword, category, places.len());
                }
                Err(e) => {
                    tracing::error!(keyword = %keyword, error = %e, "keyword failed");
                    progress.record_failed(keyword);
                }
            }
            self.checkpoint(&progress);

            if idx + 1 < total {
                tokio::time::sleep(self.inter_keyword_delay).await;
            }
        }

        progress.finish(interrupted);
        self.checkpoint(&progress);
        if let Err(e) = write_summary(&self.layout.summary_file(), &progress) {
            tracing::error!(error = %e, "failed to write summary report");
        }
        tracing::info!(
            completed = progress.completed,
            failed = progress.failed,
            places = progress.total_places,
            interrupted,
            "batch finished"
        );
        progress
    }

    fn persist(&self, keyword: &str, category: Category, places: &[PlaceRecord]) {
        let keyword_file = self.layout.keyword_file(category, keyword);
        if let Err(e) = append_or_merge(places, &keyword_file, WriteMode::Overwrite) {
            tracing::error!(keyword = %keyword, error = %e, "failed to write keyword file");
        }
        let master_file = self.layout.master_file(category);
        if let Err(e) = append_or_merge(places, &master_file, WriteMode::AppendMerge) {
            tracing::error!(keyword = %keyword, error = %e, "failed to merge into category file");
        }
    }

    fn checkpoint(&self, progress: &ScrapeProgress) {
        if let Err(e) = save_progress(&self.layout.progress_file(), progress) {
            tracing::error!(error = %e, "failed to save progress");
        }
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
