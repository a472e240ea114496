//! Assembles a [`PlaceRecord`] from whatever the open detail view exposes.

use chrono::Local;
use mapharvest_core::{Category, PlaceRecord};

use crate::extract::{FieldExtractor, Service, ServiceSnippet};
use crate::outcome::Outcome;
use crate::page::Page;
use crate::selectors;

const NO_INTRODUCTION: &str = "None Found";
const POPULAR_TIMES_AVAILABLE: &str = "Available";
const POPULAR_TIMES_MISSING: &str = "Not Available";

/// Builds one record per detail view. Every field is best-effort; a missing
/// or unreadable field leaves its default in place.
pub struct PlaceRecordBuilder<'p, P: Page + ?Sized> {
    fields: FieldExtractor<'p, P>,
    max_service_snippets: usize,
}

impl<'p, P: Page + ?Sized> PlaceRecordBuilder<'p, P> {
    pub fn new(page: &'p P, max_service_snippets: usize) -> Self {
        Self {
            fields: FieldExtractor::new(page),
            max_service_snippets,
        }
    }

    pub async fn build(&self, keyword: &str, category: Category) -> PlaceRecord {
        let f = &self.fields;
        let mut record = PlaceRecord {
            name: f.text(selectors::NAME).await,
            address: f.text(selectors::ADDRESS).await,
            website: f.text(selectors::WEBSITE).await,
            phone: f.text(selectors::PHONE).await,
            keyword: keyword.to_string(),
            category,
            scraped_at: Local::now().naive_local(),
            ..PlaceRecord::default()
        };

        match f.url_fields().await {
            Outcome::Found(url) => {
                record.source_url = url.source_url;
                record.coordinates = url.coordinates;
                record.provider_id = url.provider_id;
            }
            Outcome::NotFound => {}
            Outcome::TransientFailure(reason) => {
                tracing::debug!(reason = %reason, "could not read detail url");
            }
        }

        record.place_type = f.text(selectors::PLACE_TYPE).await;
        record.introduction = f
            .resolve(selectors::INTRODUCTION)
            .await
            .found()
            .unwrap_or_else(|| NO_INTRODUCTION.to_string());
        record.price_range = f.text(selectors::PRICE_RANGE).await;
        record.review_count = f.review_count(selectors::REVIEW_COUNT).await.found();
        record.rating = f.rating(selectors::RATING).await.found();

        let snippets = f
            .service_snippets(selectors::SERVICE_SNIPPETS, self.max_service_snippets)
            .await;
        apply_services(&mut record, &snippets);

        record.photo_count = f.photo_count(&selectors::PHOTO_BUTTON).await.found();

        if let Some(hours) = f.hours(selectors::HOURS).await.found() {
            record.hours_status = hours.status;
            record.full_hours = hours.full;
        }

        record.popular_times = match f.present(&selectors::POPULAR_TIMES).await {
            Outcome::Found(true) => POPULAR_TIMES_AVAILABLE,
            _ => POPULAR_TIMES_MISSING,
        }
        .to_string();

        if let Outcome::Found(true) = f.present(&selectors::VERIFIED_BADGE).await {
            record.verified.raise();
        }

        record
    }
}

/// Raises the flag for every service the snippets mention and joins their
/// distinct tags, first-seen order, with `"; "`.
fn apply_services(record: &mut PlaceRecord, snippets: &[ServiceSnippet]) {
    let mut tags: Vec<&str> = Vec::new();
    for snippet in snippets {
        for service in &snippet.services {
            let flag = match service {
                Service::Shopping => &mut record.store_shopping,
                Service::Pickup => &mut record.in_store_pickup,
                Service::Takeaway => &mut record.takeaway,
                Service::Delivery => &mut record.delivery,
                Service::DineIn => &mut record.dine_in,
                Service::Reservations => &mut record.reservations,
                Service::Wheelchair => &mut record.wheelchair_accessible,
                Service::Verified => &mut record.verified,
            };
            flag.raise();
        }
        if !tags.contains(&snippet.tag.as_str()) {
            tags.push(&snippet.tag);
        }
    }
    record.service_tags = tags.join("; ");
}
