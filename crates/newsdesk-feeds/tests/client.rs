use newsdesk_feeds::{FeedClient, FeedError, FeedSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:media="http://search.yahoo.com/mrss/" version="2.0">
  <channel>
    <title>BBC News - Business</title>
    <item>
      <title>Markets rally after rate decision</title>
      <description>Shares rose across Europe.</description>
      <link>https://www.bbc.co.uk/news/articles/cmarkets0001o</link>
      <guid isPermaLink="false">https://www.bbc.co.uk/news/articles/cmarkets0001o</guid>
      <pubDate>Fri, 21 Aug 2026 17:30:00 GMT</pubDate>
      <media:thumbnail width="240" height="135" url="https://ichef.bbci.co.uk/ace/standard/240/cpsprodpb/m1.jpg"/>
    </item>
    <item>
      <title>Airline reports record profits</title>
      <description>Passenger numbers are back above 2019 levels.</description>
      <link>https://www.bbc.co.uk/news/articles/cairline0002o</link>
      <guid isPermaLink="false">https://www.bbc.co.uk/news/articles/cairline0002o</guid>
      <pubDate>Fri, 21 Aug 2026 16:05:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

fn client() -> FeedClient {
    FeedClient::new(5, "newsdesk-tests/0.1").expect("client should build")
}

#[tokio::test]
async fn fetch_returns_entries_in_document_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/business/rss.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED_BODY, "application/xml"))
        .mount(&server)
        .await;

    let url = format!("{}/news/business/rss.xml", server.uri());
    let entries = client().fetch(&url).await.expect("fetch should succeed");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Markets rally after rate decision");
    assert_eq!(
        entries[0].thumbnail_url.as_deref(),
        Some("https://ichef.bbci.co.uk/ace/standard/240/cpsprodpb/m1.jpg")
    );
    assert_eq!(entries[1].guid, "https://www.bbc.co.uk/news/articles/cairline0002o");
    assert_eq!(entries[1].thumbnail_url, None);
}

#[tokio::test]
async fn fetch_error_status_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/business/rss.xml"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let url = format!("{}/news/business/rss.xml", server.uri());
    let result = client().fetch(&url).await;

    match result {
        Err(FeedError::UnexpectedStatus { status, .. }) => {
            assert_eq!(status.as_u16(), 503);
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/business/rss.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not a feed</html>"))
        .mount(&server)
        .await;

    let url = format!("{}/news/business/rss.xml", server.uri());
    let result = client().fetch(&url).await;

    assert!(matches!(result, Err(FeedError::Parse(_))), "got: {result:?}");
}

#[tokio::test]
async fn fetch_unreachable_host_is_http_error() {
    // Port 1 on localhost is never listening.
    let result = client().fetch("http://127.0.0.1:1/rss.xml").await;
    assert!(matches!(result, Err(FeedError::Http(_))), "got: {result:?}");
}
