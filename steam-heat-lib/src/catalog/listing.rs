use super::{Progress, RawEntity};
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde_json::{Map, Value};

const LOG_TARGET: &str = "   listing";

pub const STEAMSPY_API_URL: &str = "https://steamspy.com/api.php";

/// Default timeout for one page of the bulk listing.
pub const DEFAULT_LISTING_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the paginated bulk listing source.
///
/// Every failure on this path is fatal: a page that cannot be fetched or decoded
/// aborts collection.
#[derive(Debug, Clone)]
pub struct ListingProvider {
    client: reqwest::Client,
    base_url: String,
}

impl ListingProvider {
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("steam-heat")
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client for the listing source")?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or(STEAMSPY_API_URL).to_string(),
        })
    }

    /// Collect up to `target` entities, starting at `start_page`.
    ///
    /// Pages are requested one at a time until `target` entities are accumulated or a page
    /// comes back empty. `page_delay` is slept between pages, and only while more pages are
    /// still needed. The result is truncated to `target`.
    pub async fn collect(&self, target: usize, start_page: u32, page_delay: Duration, progress: &dyn Progress) -> Result<Vec<RawEntity>> {
        let mut entities = Vec::with_capacity(target);
        let mut page = start_page;

        progress.set_length(target as u64);

        while entities.len() < target {
            log::info!(target: LOG_TARGET, "Fetching page {page} ({}/{target} collected)", entities.len());
            let page_entities = self.fetch_page(page).await?;

            if page_entities.is_empty() {
                log::warn!(target: LOG_TARGET, "Page {page} is empty, stopping with {} entities", entities.len());
                break;
            }

            let count = page_entities.len();
            entities.extend(page_entities);
            log::info!(target: LOG_TARGET, "Page {page} returned {count} entities, {} collected", entities.len());
            progress.set_position(entities.len().min(target) as u64, &format!("page {page}"));

            page += 1;

            if entities.len() < target {
                log::info!(target: LOG_TARGET, "Waiting {}s before the next page", page_delay.as_secs_f64());
                tokio::time::sleep(page_delay).await;
            }
        }

        entities.truncate(target);
        Ok(entities)
    }

    /// Fetch one page of the listing, preserving the order entities appear in the response.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<RawEntity>> {
        let page_str = page.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("request", "all"), ("page", page_str.as_str())])
            .send()
            .await
            .into_app_err_with(|| format!("requesting page {page} from {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(app_err!("unexpected HTTP status {status} for page {page} from {}", self.base_url));
        }

        let body: Map<String, Value> = response
            .json()
            .await
            .into_app_err_with(|| format!("decoding page {page} from {}", self.base_url))?;

        Ok(body.values().map(RawEntity::from_value).collect())
    }
}
