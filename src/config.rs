use serde::Deserialize;
use std::path::PathBuf;

use crate::models::ScoringMode;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL connection URL for the wardrobe table; unset uses an in-memory wardrobe
    #[serde(default)]
    pub database_url: Option<String>,

    /// JSON fixture seeding the in-memory wardrobe (user id -> items)
    #[serde(default)]
    pub wardrobe_file: Option<PathBuf>,

    /// Explicit rule document location, probed before the built-in search path
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Weather API base URL
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// Scoring mode used when a request does not choose one
    #[serde(default)]
    pub scoring_mode: ScoringMode,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_weather_api_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.scoring_mode, ScoringMode::RuleOnly);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_scoring_mode_from_environment() {
        let vars = vec![
            ("SCORING_MODE".to_string(), "hybrid".to_string()),
            ("RULES_PATH".to_string(), "/etc/outfit/rules.json".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.scoring_mode, ScoringMode::Hybrid);
        assert_eq!(
            config.rules_path,
            Some(PathBuf::from("/etc/outfit/rules.json"))
        );
        assert_eq!(config.port, 8080);
    }
}
