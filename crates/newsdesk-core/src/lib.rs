//! Shared types and configuration for the newsdesk workspace.
//!
//! Everything here is plain data: the news record shapes written to the
//! three append-only tables, the closed event-category vocabulary, the
//! environment-driven [`AppConfig`], and the `feeds.yaml` feed map. Crates
//! higher in the stack depend on this one; nothing here depends on them.

pub mod app_config;
pub mod config;
pub mod feeds;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use feeds::{load_feeds, FeedConfig, FeedsFile};
pub use records::{ActorRecord, CuratedNewsRecord, EventCategory, RawNewsRecord};

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read feeds file {path}: {source}")]
    FeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feeds file: {0}")]
    FeedsFileParse(serde_yaml::Error),

    #[error("feeds file validation failed: {0}")]
    Validation(String),
}
