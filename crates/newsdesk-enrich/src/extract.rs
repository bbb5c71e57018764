//! Batch actor extraction over curated articles.
//!
//! One LLM call per article, with per-article fault isolation: a failed
//! analysis logs a warning and contributes no rows, while every other
//! article in the batch is still processed.

use newsdesk_core::{ActorRecord, CuratedNewsRecord};

use crate::client::EventAnalyzer;
use crate::types::EventInsight;

/// Analyzes each article and flattens the results into actor rows.
///
/// The text sent for analysis is the title and description joined by a
/// newline. Articles whose analysis fails (transport, API, or validation)
/// are skipped with a warning; the returned rows cover only the articles
/// that succeeded.
pub async fn extract_actors(
    analyzer: &dyn EventAnalyzer,
    articles: &[CuratedNewsRecord],
) -> Vec<ActorRecord> {
    let mut rows = Vec::new();

    for article in articles {
        let text = format!("{}\n{}", article.title, article.description);

        match analyzer.analyze(&text).await {
            Ok(insight) => rows.extend(actor_rows(&article.id, insight)),
            Err(error) => {
                tracing::warn!(
                    article_id = %article.id,
                    error = %error,
                    "actor extraction failed, skipping article"
                );
            }
        }
    }

    rows
}

/// Flattens one insight into rows, main actors first.
fn actor_rows(news_id: &str, insight: EventInsight) -> Vec<ActorRecord> {
    let category = insight.category;
    let main = insight.main_actors.into_iter().map(|m| (m, true));
    let other = insight.other_actors.into_iter().map(|m| (m, false));

    main.chain(other)
        .map(|(mention, is_main_actor)| ActorRecord {
            news_id: news_id.to_owned(),
            actor_name: mention.name,
            actor_role: mention.role,
            is_main_actor,
            event_category: category,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use newsdesk_core::EventCategory;

    use super::*;
    use crate::error::EnrichError;
    use crate::types::ActorMention;

    fn article(id: &str, title: &str) -> CuratedNewsRecord {
        CuratedNewsRecord {
            title: title.to_string(),
            published_time: Utc.with_ymd_and_hms(2026, 8, 21, 9, 0, 0).unwrap(),
            description: format!("details about {title}"),
            link: format!("https://example.org/{id}"),
            id: id.to_string(),
            thumbnail_url: None,
            category: "Business".to_string(),
        }
    }

    /// Fails any text containing `FAIL`; otherwise answers with one main
    /// actor named after the first line of the text.
    struct ScriptedAnalyzer {
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedAnalyzer {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EventAnalyzer for ScriptedAnalyzer {
        async fn analyze(&self, text: &str) -> Result<EventInsight, EnrichError> {
            self.seen.lock().unwrap().push(text.to_string());

            if text.contains("FAIL") {
                return Err(EnrichError::MissingContent);
            }

            let headline = text.lines().next().unwrap_or_default().to_string();
            Ok(EventInsight {
                main_actors: vec![ActorMention {
                    name: headline,
                    role: "Subject of the report".to_string(),
                }],
                other_actors: vec![],
                category: EventCategory::Others,
            })
        }
    }

    /// Always answers with a fixed two-tier cast.
    struct FixedAnalyzer;

    #[async_trait]
    impl EventAnalyzer for FixedAnalyzer {
        async fn analyze(&self, _text: &str) -> Result<EventInsight, EnrichError> {
            Ok(EventInsight {
                main_actors: vec![ActorMention {
                    name: "Apple".to_string(),
                    role: "Company announcing a new product launch".to_string(),
                }],
                other_actors: vec![
                    ActorMention {
                        name: "Tim Cook".to_string(),
                        role: "Chief executive presenting the device".to_string(),
                    },
                    ActorMention {
                        name: "Foxconn".to_string(),
                        role: "Manufacturing partner".to_string(),
                    },
                ],
                category: EventCategory::NewProductAnnounced,
            })
        }
    }

    #[tokio::test]
    async fn main_and_other_actors_get_flagged() {
        let articles = vec![article("news-1", "Apple unveils new handset")];
        let rows = extract_actors(&FixedAnalyzer, &articles).await;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].actor_name, "Apple");
        assert!(rows[0].is_main_actor);
        assert_eq!(rows[1].actor_name, "Tim Cook");
        assert!(!rows[1].is_main_actor);
        assert!(!rows[2].is_main_actor);

        for row in &rows {
            assert_eq!(row.news_id, "news-1");
            assert_eq!(row.event_category, EventCategory::NewProductAnnounced);
        }
    }

    #[tokio::test]
    async fn failed_article_is_skipped_but_others_survive() {
        let articles = vec![
            article("news-1", "Budget passes"),
            article("news-2", "Rates held"),
            article("news-3", "FAIL this one"),
            article("news-4", "Exports up"),
            article("news-5", "Merger cleared"),
        ];

        let rows = extract_actors(&ScriptedAnalyzer::new(), &articles).await;

        let ids: Vec<&str> = rows.iter().map(|r| r.news_id.as_str()).collect();
        assert_eq!(ids, vec!["news-1", "news-2", "news-4", "news-5"]);
    }

    #[tokio::test]
    async fn article_with_no_actors_yields_no_rows() {
        struct EmptyAnalyzer;

        #[async_trait]
        impl EventAnalyzer for EmptyAnalyzer {
            async fn analyze(&self, _text: &str) -> Result<EventInsight, EnrichError> {
                Ok(EventInsight {
                    main_actors: vec![],
                    other_actors: vec![],
                    category: EventCategory::Others,
                })
            }
        }

        let articles = vec![article("news-1", "Quiet day")];
        let rows = extract_actors(&EmptyAnalyzer, &articles).await;

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn analyzer_sees_title_and_description_joined() {
        let analyzer = ScriptedAnalyzer::new();
        let articles = vec![article("news-1", "Housing starts fall")];

        extract_actors(&analyzer, &articles).await;

        let seen = analyzer.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            ["Housing starts fall\ndetails about Housing starts fall"]
        );
    }
}
