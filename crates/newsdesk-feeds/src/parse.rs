//! Feed document parsing.
//!
//! RSS 2.0 via serde-derived structs and `quick_xml::de`. The deserializer
//! matches namespaced elements by local name, so the BBC `media:thumbnail`
//! element is matched as plain `thumbnail`.

use serde::Deserialize;

use crate::error::FeedError;
use crate::types::FeedEntry;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default, rename = "item")]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    guid: Option<Guid>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    // Repeated in some feeds; the first url wins. Local name only: the
    // deserializer strips the media: prefix.
    #[serde(default, rename = "thumbnail")]
    thumbnails: Vec<MediaThumbnail>,
}

// The isPermaLink attribute is ignored; only the text content matters.
#[derive(Debug, Deserialize)]
struct Guid {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaThumbnail {
    #[serde(rename = "@url")]
    url: Option<String>,
}

/// Parse an RSS document into entries, preserving document order.
///
/// Items without a guid are skipped with a warning: the guid is the dedup
/// key, and an entry we cannot dedup would be re-ingested on every run.
/// Missing title/description/link become empty strings.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] if the document is not well-formed RSS.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;

    let mut entries = Vec::with_capacity(rss.channel.items.len());
    for item in rss.channel.items {
        let guid = item
            .guid
            .and_then(|g| g.value)
            .filter(|v| !v.trim().is_empty());
        let Some(guid) = guid else {
            tracing::warn!(
                title = item.title.as_deref().unwrap_or(""),
                "skipping feed item without guid"
            );
            continue;
        };

        entries.push(FeedEntry {
            guid,
            title: item.title.unwrap_or_default(),
            description: item.description.unwrap_or_default(),
            link: item.link.unwrap_or_default(),
            published: item.pub_date,
            thumbnail_url: item.thumbnails.into_iter().find_map(|t| t.url),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:media="http://search.yahoo.com/mrss/" version="2.0">
  <channel>
    <title>BBC News - Technology</title>
    <link>https://www.bbc.co.uk/news/technology</link>
    <description>BBC News - Technology</description>
    <item>
      <title>Chip maker unveils new processor</title>
      <description><![CDATA[The company says the chip doubles performance.]]></description>
      <link>https://www.bbc.co.uk/news/articles/c1111111111o</link>
      <guid isPermaLink="false">https://www.bbc.co.uk/news/articles/c1111111111o</guid>
      <pubDate>Sat, 22 Aug 2026 09:15:00 GMT</pubDate>
      <media:thumbnail width="240" height="135" url="https://ichef.bbci.co.uk/ace/standard/240/cpsprodpb/1111.jpg"/>
    </item>
    <item>
      <title>Regulator opens inquiry into app store</title>
      <description>The inquiry will examine store fees.</description>
      <link>https://www.bbc.co.uk/news/articles/c2222222222o</link>
      <guid isPermaLink="false">https://www.bbc.co.uk/news/articles/c2222222222o</guid>
      <pubDate>Sat, 22 Aug 2026 08:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_in_document_order() {
        let entries = parse_feed(SAMPLE_RSS).expect("sample feed should parse");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].guid, "https://www.bbc.co.uk/news/articles/c1111111111o");
        assert_eq!(entries[0].title, "Chip maker unveils new processor");
        assert_eq!(
            entries[0].description,
            "The company says the chip doubles performance."
        );
        assert_eq!(
            entries[0].published.as_deref(),
            Some("Sat, 22 Aug 2026 09:15:00 GMT")
        );
        assert_eq!(
            entries[0].thumbnail_url.as_deref(),
            Some("https://ichef.bbci.co.uk/ace/standard/240/cpsprodpb/1111.jpg")
        );
        assert_eq!(entries[1].guid, "https://www.bbc.co.uk/news/articles/c2222222222o");
    }

    #[test]
    fn missing_thumbnail_is_none() {
        let entries = parse_feed(SAMPLE_RSS).unwrap();
        assert_eq!(entries[1].thumbnail_url, None);
    }

    #[test]
    fn prefixed_thumbnail_elements_are_matched_first_url_wins() {
        let xml = r#"<?xml version="1.0"?>
<rss xmlns:media="http://search.yahoo.com/mrss/" version="2.0">
  <channel>
    <item>
      <title>Two thumbnails</title>
      <guid>thumbs</guid>
      <media:thumbnail width="240" height="135" url="https://ichef.bbci.co.uk/240/a.jpg"/>
      <media:thumbnail width="480" height="270" url="https://ichef.bbci.co.uk/480/a.jpg"/>
    </item>
  </channel>
</rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(
            entries[0].thumbnail_url.as_deref(),
            Some("https://ichef.bbci.co.uk/240/a.jpg")
        );
    }

    #[test]
    fn item_without_guid_is_skipped() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <item>
      <title>No guid here</title>
      <link>https://example.com/a</link>
      <description>d</description>
      <pubDate>Sat, 22 Aug 2026 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Has guid</title>
      <link>https://example.com/b</link>
      <description>d</description>
      <guid>key-b</guid>
      <pubDate>Sat, 22 Aug 2026 08:05:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].guid, "key-b");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <item>
      <guid>bare-item</guid>
    </item>
  </channel>
</rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].description, "");
        assert_eq!(entries[0].link, "");
        assert_eq!(entries[0].published, None);
    }

    #[test]
    fn empty_channel_yields_no_entries() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Empty</title>
  </channel>
</rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let result = parse_feed("this is not xml at all");
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }
}
