use super::ProviderResult;
use crate::Result;
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const LOG_TARGET: &str = "achievements";

pub const ACHIEVEMENTS_API_URL: &str = "https://api.steampowered.com/ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/";

/// Default timeout for one achievement-percentage request.
pub const DEFAULT_ACHIEVEMENTS_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Default, Deserialize)]
struct AchievementsResponse {
    #[serde(default, rename = "achievementpercentages")]
    percentages: Option<AchievementPercentages>,
}

#[derive(Debug, Default, Deserialize)]
struct AchievementPercentages {
    /// Raw entries; each `percent` is checked individually.
    #[serde(default)]
    achievements: Option<Vec<Value>>,
}

/// Client for the per-game global achievement percentages.
///
/// Failures here are never fatal: a game without achievements, or one the
/// endpoint refuses to describe, simply ends up without an average.
#[derive(Debug, Clone)]
pub struct AchievementProvider {
    client: reqwest::Client,
    base_url: String,
}

impl AchievementProvider {
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("steam-heat")
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client for the achievements source")?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or(ACHIEVEMENTS_API_URL).to_string(),
        })
    }

    /// Average global unlock percentage for `appid`, or `None` if it cannot be determined.
    ///
    /// Sleeps for `item_delay` after the request whatever its outcome.
    pub async fn average_pct(&self, appid: u64, item_delay: Duration) -> Option<f64> {
        let result = self.fetch_average(appid).await;

        match &result {
            ProviderResult::Found(avg) => log::debug!(target: LOG_TARGET, "App {appid} averages {avg:.1}% unlocked"),
            ProviderResult::Unavailable(reason) => log::debug!(target: LOG_TARGET, "No achievement average for app {appid}: {reason}"),
            ProviderResult::Error(e) => log::debug!(target: LOG_TARGET, "Could not get achievements for app {appid}: {e:#}"),
        }

        tokio::time::sleep(item_delay).await;
        result.found()
    }

    /// Fetch and reduce the achievement percentages for `appid`.
    pub async fn fetch_average(&self, appid: u64) -> ProviderResult<f64> {
        match self.fetch_response(appid).await {
            Ok(response) => average_of(response),
            Err(e) => ProviderResult::Error(Arc::new(e.enrich_with(|| format!("fetching achievement percentages for app {appid}")))),
        }
    }

    async fn fetch_response(&self, appid: u64) -> Result<AchievementsResponse> {
        let appid_str = appid.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("gameid", appid_str.as_str()), ("format", "json")])
            .send()
            .await
            .into_app_err_with(|| format!("sending HTTP request to {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(app_err!("unexpected HTTP status {status} from {}", self.base_url));
        }

        let text = response.text().await.into_app_err("reading achievements response body")?;
        serde_json::from_str(&text).into_app_err("parsing achievements response")
    }
}

/// Mean of every numeric `percent` in the response. Non-numeric entries are skipped.
fn average_of(response: AchievementsResponse) -> ProviderResult<f64> {
    let achievements = response.percentages.and_then(|p| p.achievements).unwrap_or_default();
    if achievements.is_empty() {
        return ProviderResult::Unavailable("no achievements listed".into());
    }

    let percents: Vec<f64> = achievements
        .iter()
        .filter_map(|a| a.get("percent").and_then(Value::as_f64))
        .collect();

    if percents.is_empty() {
        return ProviderResult::Unavailable("no numeric achievement percentages".into());
    }

    #[expect(clippy::cast_precision_loss, reason = "achievement counts are far below 2^52")]
    let avg = percents.iter().sum::<f64>() / percents.len() as f64;
    ProviderResult::Found(avg)
}
