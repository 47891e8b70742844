use crate::config::types::{Config, HttpConfig, OutputConfig, SearchConfig, VpnConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_http_config(&config.http)?;
    validate_vpn_config(&config.vpn)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates search endpoint configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    validate_http_url("endpoint", &config.endpoint)?;
    validate_http_url("base-origin", &config.base_origin)?;
    validate_http_url("listings-page", &config.listings_page)?;

    // Relative listing links start with '/', so the origin must not end
    // with one or the joined URL gets a double slash.
    if config.base_origin.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-origin must not end with '/', got '{}'",
            config.base_origin
        )));
    }

    if config.query.is_empty() {
        return Err(ConfigError::Validation("query cannot be empty".to_string()));
    }

    if config.take < 1 {
        return Err(ConfigError::Validation(format!(
            "take must be >= 1, got {}",
            config.take
        )));
    }

    if config.lang.is_empty() {
        return Err(ConfigError::Validation("lang cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates HTTP request configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user-agents must contain at least one entry".to_string(),
        ));
    }

    for user_agent in &config.user_agents {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agents entries cannot be empty".to_string(),
            ));
        }
    }

    if config.session_cookie.is_empty() {
        return Err(ConfigError::Validation(
            "session-cookie cannot be empty".to_string(),
        ));
    }

    if !config.session_cookie.contains('=') {
        return Err(ConfigError::Validation(format!(
            "session-cookie must be a 'name=value' pair, got '{}'",
            config.session_cookie
        )));
    }

    Ok(())
}

/// Validates VPN configuration
fn validate_vpn_config(config: &VpnConfig) -> Result<(), ConfigError> {
    if config.enabled && config.region.trim().is_empty() {
        return Err(ConfigError::Validation(
            "vpn region cannot be empty when the vpn is enabled".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.workbook_path.is_empty() {
        return Err(ConfigError::Validation(
            "workbook-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parses a config URL and requires an http(s) scheme
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use an http(s) scheme, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_endpoint_url() {
        let mut config = Config::default();
        config.search.endpoint = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_ftp_endpoint_rejected() {
        let mut config = Config::default();
        config.search.endpoint = "ftp://www.fi.se/search".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_base_origin_trailing_slash_rejected() {
        let mut config = Config::default();
        config.search.base_origin = "https://www.fi.se/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_take_rejected() {
        let mut config = Config::default();
        config.search.take = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agents_rejected() {
        let mut config = Config::default();
        config.http.user_agents.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_cookie_without_pair_rejected() {
        let mut config = Config::default();
        config.http.session_cookie = "garbage".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_region_rejected_only_when_enabled() {
        let mut config = Config::default();
        config.vpn.region = String::new();
        assert!(validate(&config).is_err());

        config.vpn.enabled = false;
        assert!(validate(&config).is_ok());
    }
}
