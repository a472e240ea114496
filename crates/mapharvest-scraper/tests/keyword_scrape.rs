//! End-to-end runs of `KeywordScrapeOrchestrator` over a scripted page.

mod support;

use mapharvest_core::{Category, TriState};
use mapharvest_scraper::selectors;
use mapharvest_scraper::{
    KeywordScrapeOrchestrator, KeywordScraper, ScrapeSettings, ScraperError,
};
use support::{Detail, FakePage, SEARCH_URL};

const A: &str = "https://www.google.com/maps/place/Tirur+Bakes/data=!4m7!3m6!1s0x3ba7a:0x11!8m2";
const B: &str = "https://www.google.com/maps/place/Broken+Bakery/data=!4m7!3m6!1s0x3ba7b:0x22!8m2";
const C: &str = "https://www.google.com/maps/place/Sweet+Corner/data=!4m7!3m6!1s0x3ba7c:0x33!8m2";

fn settings() -> ScrapeSettings {
    let mut settings = ScrapeSettings {
        search_url: SEARCH_URL.to_string(),
        ..ScrapeSettings::default()
    };
    settings.discovery.stable_patience = 2;
    settings
}

fn bakery_page() -> FakePage {
    FakePage::new()
        .with_results(&[A, B, C])
        .with_detail(
            A,
            Detail::business(
                "https://www.google.com/maps/place/Tirur+Bakes/@10.9146,75.9213,17z/data=!3m1!4b1!4m6!3m5!1s0x3ba7a:0x11!8m2",
                "Tirur Bakes",
                "Main Rd, Tirur",
                "0494 242 0000",
            )
            .text(&selectors::REVIEW_COUNT[1], "1,234 reviews")
            .text(&selectors::RATING[0], "4,2")
            .text(&selectors::HOURS[0], "Open ⋅ Closes 10\u{202f}pm")
            .text(&selectors::SERVICE_SNIPPETS[0], "Bakery · Dine-in · Takeaway")
            .text(&selectors::PLACE_TYPE[0], "Bakery")
            .text(&selectors::POPULAR_TIMES, "Popular times")
            .label(&selectors::PHOTO_BUTTON, "See 87 photos"),
        )
        .with_detail(B, Detail::business(B, "Broken Bakery", "Nowhere", ""))
        .with_detail(
            C,
            Detail::business(C, "Sweet Corner", "Bus Stand, Tirur", "+91 98470 00000"),
        )
        .with_failing_click(B)
}

#[tokio::test]
async fn skips_listing_that_will_not_open() {
    let orchestrator = KeywordScrapeOrchestrator::new(bakery_page(), settings());

    let places = orchestrator.run("bakery tirur", None).await.unwrap();

    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Tirur Bakes", "Sweet Corner"]);
    for place in &places {
        assert_eq!(place.category, Category::FoodBusinesses);
        assert_eq!(place.keyword, "bakery tirur");
    }

    let clicks_on_b = orchestrator
        .page()
        .calls()
        .iter()
        .filter(|c| *c == &format!("click {B}"))
        .count();
    assert_eq!(clicks_on_b, 5);
}

#[tokio::test]
async fn extracts_detail_fields() {
    let orchestrator = KeywordScrapeOrchestrator::new(bakery_page(), settings());

    let places = orchestrator.run("bakery tirur", None).await.unwrap();
    let place = &places[0];

    assert_eq!(place.address, "Main Rd, Tirur");
    assert_eq!(place.phone, "0494 242 0000");
    assert_eq!(place.coordinates, "10.9146, 75.9213");
    assert_eq!(place.provider_id, "0x3ba7a:0x11");
    assert!(place.source_url.contains("@10.9146,75.9213"));
    assert_eq!(place.review_count, Some(1234));
    assert_eq!(place.rating, Some(4.2));
    assert_eq!(place.hours_status, "Closes 10pm");
    assert_eq!(place.full_hours, "Open ⋅ Closes 10pm");
    assert_eq!(place.place_type, "Bakery");
    assert_eq!(place.dine_in, TriState::Yes);
    assert_eq!(place.takeaway, TriState::Yes);
    assert_eq!(place.in_store_pickup, TriState::Yes);
    assert_eq!(place.delivery, TriState::No);
    assert_eq!(place.service_tags, "dine-in · takeaway");
    assert_eq!(place.photo_count, Some(87));
    assert_eq!(place.popular_times, "Available");
    assert_eq!(place.introduction, "None Found");
}

#[tokio::test]
async fn missing_fields_fall_back_to_defaults() {
    let orchestrator = KeywordScrapeOrchestrator::new(bakery_page(), settings());

    let places = orchestrator.run("bakery tirur", None).await.unwrap();
    let place = &places[1];

    assert_eq!(place.rating, None);
    assert_eq!(place.review_count, None);
    assert_eq!(place.photo_count, None);
    assert_eq!(place.hours_status, "");
    assert_eq!(place.popular_times, "Not Available");
    assert_eq!(place.store_shopping, TriState::No);
    assert_eq!(place.wheelchair_accessible, TriState::Unknown);
}

#[tokio::test]
async fn submits_keyword_through_search_box() {
    let orchestrator = KeywordScrapeOrchestrator::new(bakery_page(), settings());

    orchestrator.run("bakery tirur", Some(1)).await.unwrap();

    let calls = orchestrator.page().calls();
    assert_eq!(calls[0], format!("goto {SEARCH_URL}"));
    assert_eq!(calls[1], "fill bakery tirur");
    assert_eq!(calls[2], "press Enter");
}

#[tokio::test]
async fn max_results_limits_listings_visited() {
    let orchestrator = KeywordScrapeOrchestrator::new(bakery_page(), settings());

    let places = orchestrator.run("bakery tirur", Some(1)).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Tirur Bakes");
}

#[tokio::test]
async fn duplicate_listings_are_dropped() {
    let page = FakePage::new()
        .with_results(&[A, C])
        .with_detail(A, Detail::business(A, "Hotel Malabar", "Manjeri", "04832 766 000"))
        .with_detail(C, Detail::business(C, " hotel malabar", "MANJERI ", "04832 766 000"));
    let orchestrator = KeywordScrapeOrchestrator::new(page, settings());

    let places = orchestrator.run("hotel manjeri", None).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Hotel Malabar");
}

#[tokio::test]
async fn listing_without_identity_is_not_kept() {
    let page = FakePage::new()
        .with_results(&[A, C])
        .with_detail(A, Detail::new(A).text(&selectors::PLACE_TYPE[0], "Restaurant"))
        .with_detail(C, Detail::business(C, "Canteen One", "", ""));
    let orchestrator = KeywordScrapeOrchestrator::new(page, settings());

    let places = orchestrator.run("canteen nilambur", None).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].category, Category::LargeScaleBuyers);
}

#[tokio::test]
async fn empty_results_panel_is_not_an_error() {
    let orchestrator = KeywordScrapeOrchestrator::new(FakePage::new(), settings());

    let places = orchestrator.run("frozen food ponnani", None).await.unwrap();

    assert!(places.is_empty());
    assert_eq!(orchestrator.page().scrolls(), 0);
}

#[tokio::test]
async fn unreachable_search_page_fails_the_keyword() {
    let mut orchestrator =
        KeywordScrapeOrchestrator::new(bakery_page().with_failing_goto(), settings());

    let err = orchestrator
        .scrape_keyword("bakery tirur", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ScraperError::Navigation { .. }));
}

#[tokio::test]
async fn listing_is_extracted_when_detail_marker_never_appears() {
    let mut detail = Detail::new(A)
        .text(&selectors::NAME[1], "Tirur Bakes")
        .text(&selectors::ADDRESS[0], "Main Rd, Tirur");
    detail.ready = false;
    let page = FakePage::new().with_results(&[A]).with_detail(A, detail);
    let orchestrator = KeywordScrapeOrchestrator::new(page, settings());

    let places = orchestrator.run("bakery tirur", None).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Tirur Bakes");
    assert_eq!(places[0].address, "Main Rd, Tirur");
    assert_eq!(
        orchestrator.page().waits_on(&selectors::DETAIL_READY),
        usize::try_from(settings().detail_attempts).unwrap()
    );
}

#[tokio::test]
async fn service_snippet_budget_is_shared_across_candidates() {
    let mut detail = Detail::business(A, "Tirur Bakes", "Main Rd, Tirur", "");
    for _ in 0..4 {
        detail = detail.text(&selectors::SERVICE_SNIPPETS[0], "Bakery · Dine-in");
    }
    for _ in 0..4 {
        detail = detail.text(&selectors::SERVICE_SNIPPETS[1], "Bakery · Delivery");
    }
    let page = FakePage::new().with_results(&[A]).with_detail(A, detail);
    let mut limited = settings();
    limited.max_service_snippets = 5;
    let orchestrator = KeywordScrapeOrchestrator::new(page, limited);

    let places = orchestrator.run("bakery tirur", None).await.unwrap();

    let snippet_reads = orchestrator
        .page()
        .queried()
        .iter()
        .filter(|l| selectors::SERVICE_SNIPPETS.contains(*l))
        .count();
    // one count per candidate reached plus one read per node
    assert_eq!(snippet_reads, 2 + 5);
    assert_eq!(places[0].dine_in, TriState::Yes);
    assert_eq!(places[0].delivery, TriState::Yes);
}
