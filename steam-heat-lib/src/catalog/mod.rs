//! Acquisition of the raw catalog and per-entity metrics
//!
//! # Implementation Model
//!
//! The [`Collector`] drives the pipeline one request at a time:
//! - **Listing**: [`ListingProvider`] pages through the bulk source until the
//!   target count is reached or a page comes back empty. Any failure is fatal.
//! - **Coercion**: each listing value becomes a [`RawEntity`] whose fields are
//!   typed [`Field`] values, so malformed data is isolated per field.
//! - **Enrichment**: [`AchievementProvider`] fetches one secondary average per
//!   entity. Failures are captured as a [`ProviderResult`] and degrade to an
//!   absent value.
//! - **Metrics**: [`EntityRecord::compute`] derives the typed record, using
//!   [`parse_range_estimate`] for the owners field.
//!
//! Ranking of the finished records lives in [`crate::ranking`].

mod achievements;
mod collector;
mod entity_record;
mod listing;
mod progress;
mod provider_result;
mod range;
mod raw_entity;

pub use achievements::{ACHIEVEMENTS_API_URL, AchievementProvider, DEFAULT_ACHIEVEMENTS_TIMEOUT};
pub use collector::Collector;
pub use entity_record::EntityRecord;
pub use listing::{DEFAULT_LISTING_TIMEOUT, ListingProvider, STEAMSPY_API_URL};
pub use progress::Progress;
pub use provider_result::ProviderResult;
pub use range::parse_range_estimate;
pub use raw_entity::{Field, RawEntity};
