use super::{AchievementProvider, EntityRecord, ListingProvider, Progress, RawEntity};
use crate::Result;
use crate::config::Config;
use crate::ranking::{RankedRecord, rank};
use core::time::Duration;
use std::sync::Arc;

const LOG_TARGET: &str = " collector";

/// Runs the whole acquisition pipeline: listing, per-entity metrics with enrichment, and ranking.
pub struct Collector {
    listing_provider: ListingProvider,
    achievement_provider: AchievementProvider,
    target_count: usize,
    start_page: u32,
    page_delay: Duration,
    item_delay: Duration,
    progress: Arc<dyn Progress>,
}

impl core::fmt::Debug for Collector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collector")
            .field("listing_provider", &self.listing_provider)
            .field("achievement_provider", &self.achievement_provider)
            .field("target_count", &self.target_count)
            .field("start_page", &self.start_page)
            .field("page_delay", &self.page_delay)
            .field("item_delay", &self.item_delay)
            .field("progress", &"<dyn Progress>")
            .finish()
    }
}

impl Collector {
    pub fn new(config: &Config, progress: impl Progress + 'static) -> Result<Self> {
        Ok(Self {
            listing_provider: ListingProvider::new(Some(config.listing_url.as_str()), config.listing_timeout)?,
            achievement_provider: AchievementProvider::new(Some(config.achievements_url.as_str()), config.achievements_timeout)?,
            target_count: config.target_count,
            start_page: config.start_page,
            page_delay: config.page_delay,
            item_delay: config.item_delay,
            progress: Arc::new(progress),
        })
    }

    /// Build the ranked catalog.
    ///
    /// Fails only if the listing source fails; enrichment problems degrade individual records.
    pub async fn collect(&self) -> Result<Vec<RankedRecord>> {
        self.progress.set_phase("Listing");
        let entities = self
            .listing_provider
            .collect(self.target_count, self.start_page, self.page_delay, self.progress.as_ref())
            .await?;

        log::info!(target: LOG_TARGET, "Collected {} of {} requested entities", entities.len(), self.target_count);

        self.progress.set_phase("Enriching");
        let records = self.build_records(&entities).await;

        self.progress.set_phase("Ranking");
        let ranked = rank(records);

        self.progress.done();
        Ok(ranked)
    }

    /// Compute one [`EntityRecord`] per entity, in order, fetching each entity's enrichment.
    pub async fn build_records(&self, entities: &[RawEntity]) -> Vec<EntityRecord> {
        let total = entities.len();
        self.progress.set_length(total as u64);

        let mut records = Vec::with_capacity(total);
        for (index, raw) in entities.iter().enumerate() {
            let appid = raw.appid.value_or(0);
            let enrichment = self.achievement_provider.average_pct(appid, self.item_delay).await;
            let record = EntityRecord::compute(raw, enrichment);

            log::debug!(
                target: LOG_TARGET,
                "[{}/{total}] {} | {:.1}h | stars={} | achievements={} | ccu={}",
                index + 1,
                record.name,
                record.avg_playtime_hours,
                format_opt(record.rating_stars),
                format_opt(record.enrichment_avg_pct),
                record.peak_concurrent,
            );

            self.progress.set_position((index + 1) as u64, &record.name);
            records.push(record);
        }

        records
    }
}

fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"))
}
