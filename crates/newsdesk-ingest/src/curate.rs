//! Curation: the stable projection from raw records to the reporting
//! schema.
//!
//! Curated rows are what the dashboard and downstream joins consume, so
//! their shape is a contract: exactly the seven reporting columns, in
//! the same order the raw table carries them. Keeping this step a pure
//! function (no filtering, no mutation of the input) means replaying raw
//! rows through it always reproduces the curated table.

use newsdesk_core::{CuratedNewsRecord, RawNewsRecord};

/// Projects raw records into curated records, preserving order.
pub fn curate(raw: &[RawNewsRecord]) -> Vec<CuratedNewsRecord> {
    raw.iter().map(curate_one).collect()
}

fn curate_one(raw: &RawNewsRecord) -> CuratedNewsRecord {
    CuratedNewsRecord {
        title: raw.title.clone(),
        published_time: raw.published_time,
        description: raw.description.clone(),
        link: raw.link.clone(),
        id: raw.id.clone(),
        thumbnail_url: raw.thumbnail_url.clone(),
        category: raw.category.clone(),
    }
}
