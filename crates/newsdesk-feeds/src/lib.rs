//! RSS feed fetching and parsing.
//!
//! [`FeedClient`] wraps the HTTP transport; [`parse_feed`] turns a feed
//! document into [`FeedEntry`] values in document order. The [`FeedSource`]
//! trait is the seam the ingestion pipeline consumes, so tests can substitute
//! scripted sources for the network.

pub mod client;
pub mod error;
pub mod parse;
pub mod types;

pub use client::{FeedClient, FeedSource};
pub use error::FeedError;
pub use parse::parse_feed;
pub use types::FeedEntry;
