use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use coinboard_core::DashboardSettings;
use coinboard_market_data::provider::coingecko::DEFAULT_BASE_URL;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8088";
const DEFAULT_CACHE_PATH: &str = "./data/cache.json";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Server configuration, read from `CB_*` environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// JSON file backing the snapshot cache
    pub cache_path: PathBuf,
    pub api_base_url: String,
    pub api_key: Option<String>,
    /// Empty means any origin
    pub cors_allow_origins: Vec<String>,
    pub request_timeout: Duration,
    pub settings: DashboardSettings,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = DashboardSettings::default();

        let listen_addr = env_parse("CB_LISTEN_ADDR").unwrap_or_else(|| {
            DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8088)))
        });
        let cache_path = std::env::var("CB_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_PATH));
        let api_base_url =
            std::env::var("CB_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("CB_COINGECKO_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let cors_allow_origins = std::env::var("CB_CORS_ALLOW_ORIGINS")
            .map(|value| parse_list(&value))
            .unwrap_or_default();
        let request_timeout = Duration::from_millis(
            env_parse("CB_REQUEST_TIMEOUT_MS").unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        );

        let settings = DashboardSettings {
            freshness_window: env_parse("CB_FRESHNESS_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.freshness_window),
            refresh_interval: env_parse("CB_REFRESH_INTERVAL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
            page_size: env_parse("CB_PAGE_SIZE").unwrap_or(defaults.page_size),
            per_page: env_parse("CB_PER_PAGE").unwrap_or(defaults.per_page),
            ..defaults
        };

        Self {
            listen_addr,
            cache_path,
            api_base_url,
            api_key,
            cors_allow_origins,
            request_timeout,
            settings,
        }
    }
}

/// Unset and unparseable values both yield `None`.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_skips_blanks() {
        assert_eq!(
            parse_list(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        std::env::set_var("CB_TEST_ENV_PARSE_NUM", " 42 ");
        std::env::set_var("CB_TEST_ENV_PARSE_BAD", "forty-two");
        assert_eq!(env_parse::<u64>("CB_TEST_ENV_PARSE_NUM"), Some(42));
        assert_eq!(env_parse::<u64>("CB_TEST_ENV_PARSE_BAD"), None);
        assert_eq!(env_parse::<u64>("CB_TEST_ENV_PARSE_MISSING"), None);
        std::env::remove_var("CB_TEST_ENV_PARSE_NUM");
        std::env::remove_var("CB_TEST_ENV_PARSE_BAD");
    }
}
