use crate::config::types::{Config, FetcherConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_site_config(&config.site)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_in_flight < 1 || config.max_in_flight > 100 {
        return Err(ConfigError::Validation(format!(
            "max_in_flight must be between 1 and 100, got {}",
            config.max_in_flight
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates site configuration
///
/// The origin must be an absolute http(s) URL with a host; everything the
/// extractors absolutize is resolved against it.
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.origin)
        .map_err(|e| ConfigError::Validation(format!("Invalid site origin: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Site origin must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "Site origin '{}' has no host",
            config.origin
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_in_flight_rejected() {
        let mut config = Config::default();
        config.fetcher.max_in_flight = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_oversized_in_flight_rejected() {
        let mut config = Config::default();
        config.fetcher.max_in_flight = 500;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let mut config = Config::default();
        config.site.origin = "not a url".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_http_origin_rejected() {
        let mut config = Config::default();
        config.site.origin = "ftp://litres.ru".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_http_origin_allowed() {
        // Plain http is allowed so tests can point at local mock servers
        let mut config = Config::default();
        config.site.origin = "http://127.0.0.1:8080".to_string();
        assert!(validate(&config).is_ok());
    }
}
