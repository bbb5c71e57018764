use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One configured feed: a category name and the RSS endpoint serving it.
///
/// The name doubles as the `category` column on every record ingested from
/// this feed, so renaming a feed changes how new rows are labelled (old rows
/// keep their label — the tables are append-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedsFile {
    pub feeds: Vec<FeedConfig>,
}

/// Load and validate the feed map from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_feeds(path: &Path) -> Result<FeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let feeds_file: FeedsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::FeedsFileParse)?;

    validate_feeds(&feeds_file)?;

    Ok(feeds_file)
}

fn validate_feeds(feeds_file: &FeedsFile) -> Result<(), ConfigError> {
    if feeds_file.feeds.is_empty() {
        return Err(ConfigError::Validation(
            "feeds file must configure at least one feed".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for feed in &feeds_file.feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feed name must be non-empty".to_string(),
            ));
        }

        if !(feed.url.starts_with("http://") || feed.url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "feed '{}' has invalid url '{}'; must start with http:// or https://",
                feed.name, feed.url
            )));
        }

        let lower_name = feed.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate feed name: '{}'",
                feed.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(name: &str, url: &str) -> FeedConfig {
        FeedConfig {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn validate_accepts_valid_feeds() {
        let feeds_file = FeedsFile {
            feeds: vec![
                feed("Technology", "http://feeds.bbci.co.uk/news/technology/rss.xml"),
                feed("Business", "https://feeds.bbci.co.uk/news/business/rss.xml"),
            ],
        };
        assert!(validate_feeds(&feeds_file).is_ok());
    }

    #[test]
    fn validate_rejects_empty_file() {
        let feeds_file = FeedsFile { feeds: vec![] };
        let err = validate_feeds(&feeds_file).unwrap_err();
        assert!(err.to_string().contains("at least one feed"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let feeds_file = FeedsFile {
            feeds: vec![feed("  ", "http://example.com/rss.xml")],
        };
        let err = validate_feeds(&feeds_file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let feeds_file = FeedsFile {
            feeds: vec![feed("Technology", "ftp://example.com/rss.xml")],
        };
        let err = validate_feeds(&feeds_file).unwrap_err();
        assert!(err.to_string().contains("invalid url"));
    }

    #[test]
    fn validate_rejects_duplicate_name_case_insensitive() {
        let feeds_file = FeedsFile {
            feeds: vec![
                feed("Technology", "http://example.com/a.xml"),
                feed("technology", "http://example.com/b.xml"),
            ],
        };
        let err = validate_feeds(&feeds_file).unwrap_err();
        assert!(err.to_string().contains("duplicate feed name"));
    }

    #[test]
    fn load_feeds_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("feeds.yaml");
        assert!(
            path.exists(),
            "feeds.yaml missing at {path:?} — required for this test"
        );
        let result = load_feeds(&path);
        assert!(result.is_ok(), "failed to load feeds.yaml: {result:?}");
        let feeds_file = result.unwrap();
        assert!(!feeds_file.feeds.is_empty());
    }

    #[test]
    fn load_feeds_missing_file_is_io_error() {
        let result = load_feeds(Path::new("/nonexistent/feeds.yaml"));
        assert!(matches!(result, Err(ConfigError::FeedsFileIo { .. })));
    }
}
