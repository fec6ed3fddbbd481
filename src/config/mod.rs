//! Configuration module for Litres-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. A [`Config`] can also be built in code; [`Config::default`] carries
//! the knobs the extractor ships with (the public LitRes origin and a
//! three-request concurrency cap).
//!
//! # Example
//!
//! ```no_run
//! use litres_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Fetch cap: {}", config.fetcher.max_in_flight);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, SiteConfig};

// Re-export parser functions
pub use parser::load_config;

pub(crate) use validation::validate;
