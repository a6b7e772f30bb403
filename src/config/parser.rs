use crate::config::types::Config;
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Loads a configuration file if a path was given, otherwise returns the
/// built-in defaults (also validated, so a bad default never slips through).
pub fn load_config_or_default(path: Option<&Path>) -> ConfigResult<Config> {
    match path {
        Some(p) => load_config(p),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[site]
base-url = "http://books.example.test/"

[fetcher]
user-agent = "TestAgent/1.0"
request-timeout-secs = 15
connect-timeout-secs = 5

[output]
directory = "./out"
download-images = true
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "http://books.example.test/");
        assert_eq!(config.fetcher.user_agent, "TestAgent/1.0");
        assert_eq!(config.fetcher.request_timeout_secs, 15);
        assert!(config.output.download_images);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let file = create_temp_config("[output]\ndirectory = \"./books\"\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "http://books.toscrape.com/");
        assert_eq!(config.output.directory, "./books");
        assert!(!config.output.download_images);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/bookscrape.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[site]
base-url = "ftp://books.example.test/"
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.site.base_url, "http://books.toscrape.com/");
        assert_eq!(config.fetcher.request_timeout_secs, 30);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let file = create_temp_config("[site]\nbase-url = \"http://x.test/\"\ntypo-key = 1\n");
        assert!(load_config(file.path()).is_err());
    }
}
