/// One article as exposed by a syndication source.
///
/// `published` is kept as the raw RFC 2822 `pubDate` string: parsing it is
/// the ingestion pipeline's job, so a bad timestamp surfaces as an ingest
/// fault rather than a transport fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Stable identifier from the feed's `<guid>`; the dedup key.
    pub guid: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub published: Option<String>,
    pub thumbnail_url: Option<String>,
}
