// Upstream API configuration, built once at startup and shared read-only

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_WEATHER_BASE: &str = "https://api.weather.gov";
pub const DEFAULT_BLOG_BASE: &str = "https://public-api.wordpress.com/wp/v2/sites/hafiz.blog";
pub const DEFAULT_BLOG_NAME: &str = "hafiz.blog";
pub const DEFAULT_USER_AGENT: &str = "wp-mcp/1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the National Weather Service API
    #[serde(default = "default_weather_base")]
    pub weather_base: String,

    /// Base URL of the WordPress.com REST API for the blog site
    #[serde(default = "default_blog_base")]
    pub blog_base: String,

    /// Display name of the blog, used in the posts header
    #[serde(default = "default_blog_name")]
    pub blog_name: String,

    /// Client-identifying User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u32,
}

fn default_weather_base() -> String {
    DEFAULT_WEATHER_BASE.to_string()
}

fn default_blog_base() -> String {
    DEFAULT_BLOG_BASE.to_string()
}

fn default_blog_name() -> String {
    DEFAULT_BLOG_NAME.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_posts_per_page() -> u32 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            weather_base: default_weather_base(),
            blog_base: default_blog_base(),
            blog_name: default_blog_name(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            posts_per_page: default_posts_per_page(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a TOML file, falling back to defaults when it is absent.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!(
                path = %config_path.display(),
                "Configuration file not found, using defaults"
            );
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_base_url("weather_base", &self.weather_base)?;
        validate_base_url("blog_base", &self.blog_base)?;

        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if !(1..=100).contains(&self.posts_per_page) {
            bail!(
                "posts_per_page must be between 1 and 100, got {}",
                self.posts_per_page
            );
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Active alerts for a (normalized) area code
    pub fn alerts_url(&self, area: &str) -> String {
        format!("{}/alerts?area={}", trim_base(&self.weather_base), area)
    }

    /// Grid point lookup; coordinates are fixed to four decimal places
    pub fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/points/{:.4},{:.4}",
            trim_base(&self.weather_base),
            latitude,
            longitude
        )
    }

    pub fn posts_url(&self) -> String {
        format!(
            "{}/posts?per_page={}&_fields=id,title,link,date,excerpt",
            trim_base(&self.blog_base),
            self.posts_per_page
        )
    }
}

fn trim_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", field, value))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("{} must use http or https, got {}", field, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert_eq!(config.weather_base, "https://api.weather.gov");
        assert_eq!(config.user_agent, "wp-mcp/1.0");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.posts_per_page, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_builders() {
        let config = ApiConfig::default();

        assert_eq!(
            config.alerts_url("CA"),
            "https://api.weather.gov/alerts?area=CA"
        );
        assert_eq!(
            config.points_url(39.7456, -97.0892),
            "https://api.weather.gov/points/39.7456,-97.0892"
        );
        assert_eq!(
            config.points_url(40.0, -105.123456),
            "https://api.weather.gov/points/40.0000,-105.1235"
        );
        assert_eq!(
            config.posts_url(),
            "https://public-api.wordpress.com/wp/v2/sites/hafiz.blog/posts?per_page=10&_fields=id,title,link,date,excerpt"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let config = ApiConfig {
            weather_base: "http://localhost:8080/".to_string(),
            ..Default::default()
        };

        assert_eq!(config.alerts_url("NY"), "http://localhost:8080/alerts?area=NY");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = ApiConfig {
            blog_base: "not a url".to_string(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());

        let bad_scheme = ApiConfig {
            weather_base: "ftp://api.weather.gov".to_string(),
            ..Default::default()
        };
        assert!(bad_scheme.validate().is_err());

        let zero_timeout = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let too_many_posts = ApiConfig {
            posts_per_page: 500,
            ..Default::default()
        };
        assert!(too_many_posts.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ApiConfig::load(&temp_dir.path().join("missing.toml")).unwrap();

        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wp-mcp.toml");
        std::fs::write(
            &path,
            "weather_base = \"http://127.0.0.1:9000\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ApiConfig::load(&path).unwrap();

        assert_eq!(config.weather_base, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.blog_base, DEFAULT_BLOG_BASE);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wp-mcp.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        assert!(ApiConfig::load(&path).is_err());
    }
}
