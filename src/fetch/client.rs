//! HTTP client construction
//!
//! The site serves different markup to obvious bots, so requests go out with
//! an ordinary desktop browser User-Agent. The string is chosen once when the
//! fetcher is built and reused for every request it makes; it is never
//! renegotiated per request.

use crate::config::FetcherConfig;
use rand::seq::SliceRandom;
use reqwest::Client;
use std::time::Duration;

/// Candidate User-Agent strings, one of which is picked per fetcher
const USER_AGENT_POOL: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) \
     Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36",
];

/// Picks a User-Agent string from the candidate pool
pub(crate) fn select_user_agent() -> &'static str {
    USER_AGENT_POOL
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENT_POOL[0])
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration (timeouts)
/// * `user_agent` - The User-Agent string every request will carry
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &FetcherConfig,
    user_agent: &str,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_user_agent_from_pool() {
        let ua = select_user_agent();
        assert!(USER_AGENT_POOL.contains(&ua));
    }

    #[test]
    fn test_build_http_client() {
        let config = FetcherConfig::default();
        let client = build_http_client(&config, select_user_agent());
        assert!(client.is_ok());
    }
}
