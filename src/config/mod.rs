mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment fallback for the OpenAI API key.
pub const ENV_OPENAI_KEY: &str = "VIDFORGE_OPENAI_KEY";
/// Environment fallback for the YouTube access token.
pub const ENV_YT_TOKEN: &str = "VIDFORGE_YT_TOKEN";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    apply_env_fallbacks(&mut config);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./vidforge.toml",
        "~/.config/vidforge/config.toml",
        "/etc/vidforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_fallbacks(&mut config);
    Ok(config)
}

/// Fill credentials from the environment when the file omits them.
fn apply_env_fallbacks(config: &mut Config) {
    if config.openai.api_key.is_none() {
        config.openai.api_key = std::env::var(ENV_OPENAI_KEY).ok().filter(|v| !v.is_empty());
    }
    if config.youtube.access_token.is_none() {
        config.youtube.access_token = std::env::var(ENV_YT_TOKEN).ok().filter(|v| !v.is_empty());
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.openai.base_url.is_empty() {
        anyhow::bail!("OpenAI base URL cannot be empty");
    }

    if config.youtube.upload_url.is_empty() {
        anyhow::bail!("YouTube upload URL cannot be empty");
    }

    Ok(())
}

impl Config {
    /// Names of required credentials that are not configured.
    ///
    /// A run cannot start while this is non-empty; the server itself can.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai.api_key.as_deref().unwrap_or("").is_empty() {
            missing.push("openai.api_key");
        }
        if self.youtube.access_token.as_deref().unwrap_or("").is_empty() {
            missing.push("youtube.access_token");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_lists_both() {
        let config = Config::default();
        assert_eq!(
            config.missing_credentials(),
            vec!["openai.api_key", "youtube.access_token"]
        );
    }

    #[test]
    fn test_missing_credentials_empty_when_set() {
        let mut config = Config::default();
        config.openai.api_key = Some("sk-test".to_string());
        config.youtube.access_token = Some("ya29.test".to_string());
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let mut config = Config::default();
        config.openai.api_key = Some(String::new());
        config.youtube.access_token = Some("ya29.test".to_string());
        assert_eq!(config.missing_credentials(), vec!["openai.api_key"]);
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let config: Config = toml::from_str("[server]\nport = 0").unwrap();
        assert!(validate_config(&config).is_err());
    }
}
