use serde::Deserialize;

/// Main configuration structure for Litres-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Fetcher behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Maximum number of simultaneously in-flight requests per fetch batch
    #[serde(rename = "max-in-flight", default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Total per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Source site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Scheme + host used to absolutize relative links and image paths
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_max_in_flight() -> usize {
    3
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_origin() -> String {
    "https://litres.ru".to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            site: SiteConfig::default(),
        }
    }
}
