//! The ingestion pipeline: fetch feeds, skip already-processed entries,
//! normalize, persist, and enrich.
//!
//! The pipeline is deliberately incremental. A JSON state file records
//! every entry id that has been durably stored; reruns skip those ids, so
//! running the pipeline twice against an unchanged feed writes nothing
//! new. State is saved only after the storage appends succeed, which
//! makes the pipeline at-least-once: a crash between append and save
//! re-processes entries rather than losing them.

pub mod curate;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod store;

pub use curate::curate;
pub use error::IngestError;
pub use pipeline::{run_feed, run_feeds, FeedSummary, IngestOutcome, RunReport};
pub use state::StateStore;
pub use store::TableStore;
