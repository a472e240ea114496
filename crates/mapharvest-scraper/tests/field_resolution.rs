//! `FieldExtractor` lookups against an open detail view.

mod support;

use mapharvest_scraper::selectors::{NAME, RATING, REVIEW_COUNT};
use mapharvest_scraper::{FieldExtractor, Outcome};
use support::{Detail, FakePage};

const HREF: &str = "https://www.google.com/maps/place/x";

fn open(detail: Detail) -> FakePage {
    FakePage::new()
        .with_results(&[HREF])
        .with_detail(HREF, detail)
        .opened_on(HREF)
}

#[tokio::test]
async fn resolve_stops_at_first_hit() {
    let page = open(
        Detail::new(HREF)
            .text(&NAME[0], "  Tirur Bakes  ")
            .text(&NAME[1], "Something Else"),
    );

    let got = FieldExtractor::new(&page).resolve(NAME).await;

    assert_eq!(got, Outcome::Found("Tirur Bakes".to_string()));
    assert!(!page.queried().contains(&NAME[1]));
    assert!(!page.queried().contains(&NAME[2]));
}

#[tokio::test]
async fn resolve_skips_blank_and_broken_candidates() {
    let page = open(Detail::new(HREF).text(&NAME[1], "   ").text(&NAME[2], "Ponnani Hotel"))
        .with_broken(&NAME[0]);

    let got = FieldExtractor::new(&page).resolve(NAME).await;

    assert_eq!(got, Outcome::Found("Ponnani Hotel".to_string()));
}

#[tokio::test]
async fn resolve_reports_transient_failure_when_nothing_answers() {
    let page = open(Detail::new(HREF)).with_broken(&NAME[1]);

    let got = FieldExtractor::new(&page).resolve(NAME).await;

    assert!(matches!(got, Outcome::TransientFailure(_)));
    assert_eq!(FieldExtractor::new(&page).text(NAME).await, "");
}

#[tokio::test]
async fn resolve_with_no_matches_is_not_found() {
    let page = open(Detail::new(HREF));
    assert_eq!(FieldExtractor::new(&page).resolve(NAME).await, Outcome::NotFound);
}

#[tokio::test]
async fn review_count_parses_separated_digits() {
    let page = open(Detail::new(HREF).text(&REVIEW_COUNT[1], "1,234 reviews"));
    assert_eq!(
        FieldExtractor::new(&page).review_count(REVIEW_COUNT).await,
        Outcome::Found(1234)
    );
}

#[tokio::test]
async fn rating_accepts_decimal_comma_and_point() {
    let comma = open(Detail::new(HREF).text(&RATING[0], "4,2"));
    let point = open(Detail::new(HREF).text(&RATING[0], "4.2"));
    assert_eq!(FieldExtractor::new(&comma).rating(RATING).await, Outcome::Found(4.2));
    assert_eq!(FieldExtractor::new(&point).rating(RATING).await, Outcome::Found(4.2));
}

#[tokio::test]
async fn unparseable_rating_is_not_found() {
    let page = open(Detail::new(HREF).text(&RATING[0], "New"));
    assert_eq!(FieldExtractor::new(&page).rating(RATING).await, Outcome::NotFound);
}
