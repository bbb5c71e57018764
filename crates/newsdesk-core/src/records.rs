//! Record shapes for the three append-only news tables.
//!
//! `RawNewsRecord` and `CuratedNewsRecord` deliberately share the same seven
//! columns: curation is a projection, and keeping the shapes separate means a
//! future raw-side column (full article body, fetch metadata) cannot leak
//! into the curated schema unnoticed.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One feed entry normalized for the `raw_news` table.
///
/// `id` is the feed guid and is unique across stored rows by virtue of
/// state-set filtering at ingest time; storage does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNewsRecord {
    pub title: String,
    /// Publication time parsed from the entry's RFC 2822 `pubDate`.
    /// Persisted with microsecond precision.
    pub published_time: DateTime<Utc>,
    pub description: String,
    pub link: String,
    /// Feed guid.
    pub id: String,
    pub thumbnail_url: Option<String>,
    /// Feed name from the configured feed map (e.g. `"Technology"`).
    pub category: String,
}

/// One row of the `curated_news` table: the fixed 7-column projection of
/// [`RawNewsRecord`]. One-to-one with its raw row, immutable once written.
/// Adding or removing a column here is a schema break that must be versioned
/// through a migration, never applied silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedNewsRecord {
    pub title: String,
    pub published_time: DateTime<Utc>,
    pub description: String,
    pub link: String,
    pub id: String,
    pub thumbnail_url: Option<String>,
    pub category: String,
}

/// One row of the `news_actors` table: a single actor mentioned by a single
/// article. Zero rows for an article means extraction failed for it or the
/// article legitimately named nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    /// Advisory foreign key to `CuratedNewsRecord::id`; not enforced by
    /// storage.
    pub news_id: String,
    pub actor_name: String,
    pub actor_role: String,
    /// `true` for actors the classifier judged central to the event.
    pub is_main_actor: bool,
    /// Event classification returned alongside the actors for this article.
    pub event_category: EventCategory,
}

/// Closed set of event classifications the enrichment model may return.
///
/// The wire representation is the human-readable label; an unrecognized
/// label fails deserialization rather than being coerced to [`Self::Others`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EventCategory {
    #[serde(rename = "Political Turmoil")]
    PoliticalTurmoil,
    #[serde(rename = "New Product Announced")]
    NewProductAnnounced,
    #[serde(rename = "Leadership Change")]
    LeadershipChange,
    #[serde(rename = "Housing Issues")]
    HousingIssues,
    Others,
}

impl EventCategory {
    /// The wire/storage label for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::PoliticalTurmoil => "Political Turmoil",
            EventCategory::NewProductAnnounced => "New Product Announced",
            EventCategory::LeadershipChange => "Leadership Change",
            EventCategory::HousingIssues => "Housing Issues",
            EventCategory::Others => "Others",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
