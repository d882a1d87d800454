use crate::config::types::{Config, FetchConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if Url::parse(&config.root_url).is_err() {
        return Err(ConfigError::Validation(format!(
            "root-url is not a valid URL: {}",
            config.root_url
        )));
    }

    if Url::parse(&config.region_link_prefix).is_err() {
        return Err(ConfigError::Validation(format!(
            "region-link-prefix is not a valid URL prefix: {}",
            config.region_link_prefix
        )));
    }

    if config.leaf_link_text.trim().is_empty() {
        return Err(ConfigError::Validation(
            "leaf-link-text must not be empty".to_string(),
        ));
    }

    // Resolve the encoding label now so the crawl never starts with one
    // that encoding_rs cannot map
    if encoding_rs::Encoding::for_label(config.page_encoding.as_bytes()).is_none() {
        return Err(ConfigError::Validation(format!(
            "page-encoding is not a recognized encoding label: {}",
            config.page_encoding
        )));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs ({}) must not exceed timeout-secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_root_url() {
        let mut config = Config::default();
        config.site.root_url = "::not-a-url::".to_string();
        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_leaf_link_text() {
        let mut config = Config::default();
        config.site.leaf_link_text = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unknown_encoding_label() {
        let mut config = Config::default();
        config.site.page_encoding = "koi9-unreal".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_known_encoding_aliases_accepted() {
        let mut config = Config::default();
        // cp1251 is a recognized alias for windows-1251
        config.site.page_encoding = "cp1251".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_connect_timeout_exceeding_total_rejected() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 5;
        config.fetch.connect_timeout_secs = 10;
        assert!(validate(&config).is_err());
    }
}
