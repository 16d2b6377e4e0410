use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
pub fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if !config.delay_seconds.is_finite() || config.delay_seconds < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay_seconds must be a non-negative number, got {}",
            config.delay_seconds
        )));
    }

    if config.page_timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "page_timeout_seconds must be > 0".to_string(),
        ));
    }

    if config.download_timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "download_timeout_seconds must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if config.crawler_name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "crawler_name must not contain whitespace, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "crawler_version must not contain whitespace, got '{}'",
            config.crawler_version
        )));
    }

    Ok(())
}

/// Validates output configuration
pub fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    validate_file_name("manifest_name", &config.manifest_name)?;
    validate_file_name("archive_name", &config.archive_name)?;

    if config.manifest_name.eq_ignore_ascii_case(&config.archive_name) {
        return Err(ConfigError::Validation(format!(
            "manifest_name and archive_name must differ, both are '{}'",
            config.manifest_name
        )));
    }

    Ok(())
}

/// Validates that a value is a bare file name inside the output folder
fn validate_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "{} must be a plain file name, got '{}'",
            field, name
        )));
    }

    Ok(())
}
