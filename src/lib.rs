//! Litres-Harvest: a book catalog extractor for LitRes pages
//!
//! This crate turns rendered LitRes book pages into normalized catalog
//! records. Given a list of book page URLs it fetches the pages with a
//! bounded-concurrency batch fetcher, parses the embedded metadata (title,
//! publish date, synopsis, cover image, tags, genres, series), resolves every
//! referenced author profile with a second fetch+parse pass, and returns one
//! outcome per requested book.
//!
//! The public entry point is [`pipeline::Pipeline::run`]. Everything else is
//! plumbing for it: [`fetch`] retrieves pages, [`extract`] parses them,
//! [`record`] holds the output model, and [`config`] carries the knobs.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod record;
pub mod site;

use thiserror::Error;

/// Main error type for Litres-Harvest operations
///
/// This is the error carried by a failed [`pipeline::BookOutcome`]: every
/// per-book failure, whether it happened while fetching the book page,
/// fetching one of its author pages, or parsing either document, converts
/// into one of these variants.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] fetch::FetchError),

    #[error(transparent)]
    Extract(#[from] extract::ExtractError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Site error: {0}")]
    Site(#[from] SiteError),

    #[error("Extraction task for {0} did not complete")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Site origin and URL rewriting errors
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Failed to parse URL {url:?}: {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Invalid origin scheme: {0}")]
    InvalidScheme(String),

    #[error("Origin is missing a host: {0}")]
    MissingHost(String),
}

/// Result type alias for Litres-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::ExtractError;
pub use fetch::{FetchError, FetchedPage, Fetcher};
pub use pipeline::{BookOutcome, Pipeline};
pub use record::{AuthorRecord, BookRecord, Genre, Tag};
pub use site::SiteOrigin;
