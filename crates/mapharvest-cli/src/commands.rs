use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use mapharvest_core::{
    builtin_keywords, load_keywords, AppConfig, Category, PlaceRecord, ScrapeProgress,
};
use mapharvest_scraper::{BrowserSettings, ChromiumPage, KeywordScrapeOrchestrator, ScrapeSettings};
use mapharvest_store::{append_or_merge, load_progress, test_file, RunLayout, WriteMode};

use crate::batch::BatchRunner;
use crate::interrupt::listen_for_interrupt;
use crate::telemetry::init_tracing;
use crate::BatchArgs;

const SAMPLE_COUNT: usize = 3;

/// Keyword file from the flag, then `MAPHARVEST_KEYWORDS_PATH`, then the
/// built-in list.
fn resolve_keywords(config: &AppConfig, flag: Option<&Path>) -> anyhow::Result<Vec<String>> {
    match flag.or(config.keywords_path.as_deref()) {
        Some(path) => Ok(load_keywords(path)?),
        None => Ok(builtin_keywords()),
    }
}

async fn launch(config: &AppConfig) -> anyhow::Result<KeywordScrapeOrchestrator<ChromiumPage>> {
    let page = ChromiumPage::launch(&BrowserSettings::from_config(config)).await?;
    Ok(KeywordScrapeOrchestrator::new(
        page,
        ScrapeSettings::from_config(config),
    ))
}

pub(crate) async fn run_batch(config: &AppConfig, args: BatchArgs) -> anyhow::Result<()> {
    let keywords = resolve_keywords(config, args.keywords_file.as_deref())?;

    let (layout, progress) = match &args.resume {
        Some(progress_path) => {
            let progress = load_progress(progress_path)?.with_context(|| {
                format!("no progress file at {}", progress_path.display())
            })?;
            let run_dir = progress_path
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (RunLayout::existing(run_dir), progress.resumed(keywords.len()))
        }
        None => {
            let output_dir = args
                .output_dir
                .clone()
                .unwrap_or_else(|| config.output_dir.clone());
            (
                RunLayout::create(&output_dir, Local::now())?,
                ScrapeProgress::new(keywords.len(), args.start_from),
            )
        }
    };
    let start_index = progress.resume_index();
    init_tracing(&config.log_level, Some(layout.log_file().as_path()))?;
    tracing::info!(
        env = %config.env,
        keywords = keywords.len(),
        start_index,
        max_results = ?args.max_results,
        "batch configured"
    );

    let orchestrator = launch(config).await?;
    let mut runner = BatchRunner::new(
        orchestrator,
        layout.clone(),
        Duration::from_millis(config.inter_keyword_delay_ms),
        listen_for_interrupt(),
    );
    let progress = runner.run(&keywords, progress, args.max_results).await;
    runner.into_scraper().into_page().close().await;

    println!(
        "Processed {}/{} keywords, {} places, {} failed",
        progress.completed, progress.total_keywords, progress.total_places, progress.failed
    );
    if progress.interrupted {
        println!(
            "Interrupted. Resume with: mapharvest batch --resume {}",
            layout.progress_file().display()
        );
    }
    println!("Results: {}", layout.root().display());
    Ok(())
}

pub(crate) async fn run_single(
    config: &AppConfig,
    keyword: &str,
    max_results: Option<usize>,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let orchestrator = launch(config).await?;
    let result = orchestrator.run(keyword, max_results).await;
    orchestrator.into_page().close().await;
    let places = result?;

    let path = test_file(output_dir, keyword);
    append_or_merge(&places, &path, WriteMode::Overwrite)?;

    println!("Found {} places for \"{keyword}\"", places.len());
    for place in places.iter().take(SAMPLE_COUNT) {
        println!("{}", describe(place));
    }
    if !places.is_empty() {
        println!("Saved to {}", path.display());
    }
    Ok(())
}

pub(crate) fn list_keywords(config: &AppConfig, flag: Option<&Path>) -> anyhow::Result<()> {
    for (idx, keyword) in resolve_keywords(config, flag)?.iter().enumerate() {
        println!("{idx:>4}  {:<18}  {keyword}", Category::from_keyword(keyword).as_str());
    }
    Ok(())
}

fn describe(place: &PlaceRecord) -> String {
    let rating = place
        .rating
        .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
    let reviews = place
        .review_count
        .map_or_else(|| "-".to_string(), |n| n.to_string());
    let mut line = format!(
        "- {} | {} | {} | rating {rating} ({reviews} reviews) | {}",
        place.name, place.address, place.phone, place.source_url
    );
    if let Some(at) = place.parsed_coordinates() {
        line.push_str(&format!(" @ {:.5},{:.5}", at.lat, at.lng));
    }
    line
}
