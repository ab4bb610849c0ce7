use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::stream::{self, StreamExt};
use tracker_core::HarvestedEvent;

use crate::fetch::Fetcher;
use crate::scrape::{parse_listing, parse_schedule, schedule_url, ConferenceLink};
use crate::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("listing page {url} unavailable: {source}")]
    Listing { url: String, source: FetchError },
}

/// Fetches the listing page, then every conference schedule with bounded
/// concurrency. Results arrive in completion order.
pub struct Harvester {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    concurrency: usize,
}

impl Harvester {
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: impl Into<String>, concurrency: usize) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            concurrency: concurrency.max(1),
        }
    }

    pub async fn list_conferences(&self) -> Result<Vec<ConferenceLink>, HarvestError> {
        let page = self
            .fetcher
            .fetch(&self.base_url)
            .await
            .map_err(|source| HarvestError::Listing {
                url: self.base_url.clone(),
                source,
            })?;
        let conferences = parse_listing(&page.html, &page.final_url);
        engine_info!(
            "Found {} upcoming conferences on {}",
            conferences.len(),
            self.base_url
        );
        Ok(conferences)
    }

    /// Every schedule row of every listed conference, in no particular order.
    ///
    /// Only a failed listing page is an error; a conference whose page cannot
    /// be fetched contributes no events.
    pub async fn harvest(&self) -> Result<Vec<HarvestedEvent>, HarvestError> {
        let conferences = self.list_conferences().await?;
        let per_conference: Vec<Vec<HarvestedEvent>> = stream::iter(conferences)
            .map(|conference| self.harvest_conference(conference))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        Ok(per_conference.into_iter().flatten().collect())
    }

    async fn harvest_conference(&self, conference: ConferenceLink) -> Vec<HarvestedEvent> {
        let Some(url) = schedule_url(&conference.link, &self.base_url) else {
            engine_debug!("Skipping {} hosted at {}", conference.name, conference.link);
            return Vec::new();
        };

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(err) => {
                engine_warn!("Failed to fetch schedule for {}: {}", conference.name, err);
                return Vec::new();
            }
        };

        let events: Vec<HarvestedEvent> = parse_schedule(&page.html, &page.final_url)
            .into_iter()
            .map(|row| HarvestedEvent {
                conference: conference.name.clone(),
                conference_link: conference.link.clone(),
                date: row.date,
                track: row.track,
                content: row.content,
                link: row.link,
            })
            .collect();
        engine_debug!("{}: {} schedule rows", conference.name, events.len());
        events
    }
}
