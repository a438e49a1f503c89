use thiserror::Error;

/// Production REST base of the broker OpenAPI.
pub const DEFAULT_BASE_URL: &str = "https://api-invest.tinkoff.ru/openapi";

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "stocks.db";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The broker API token is required for every job
    #[error("TINVEST_TOKEN is not set")]
    MissingToken,
}

/// Runtime configuration for the sync binaries
///
/// Built once in `main` and passed into the jobs explicitly - there is no
/// global token state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Broker API bearer token (`TINVEST_TOKEN`, required)
    pub token: String,

    /// SQLite database path (`DATABASE_URL`, default `stocks.db`)
    pub database_url: String,

    /// REST base URL of the broker API (`TINVEST_BASE_URL`)
    pub base_url: String,

    /// Maximum connections in the r2d2 pool (`DB_POOL_MAX_SIZE`, default 1)
    pub pool_size: u32,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            token: std::env::var("TINVEST_TOKEN").map_err(|_| ConfigError::MissingToken)?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            base_url: std::env::var("TINVEST_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            pool_size: std::env::var("DB_POOL_MAX_SIZE")
                .ok()
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so all cases live in one test
    // to avoid races with parallel test threads.
    #[test]
    fn test_from_env() {
        std::env::remove_var("TINVEST_TOKEN");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingToken)
        ));

        std::env::set_var("TINVEST_TOKEN", "t.secret");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("TINVEST_BASE_URL");
        std::env::remove_var("DB_POOL_MAX_SIZE");

        let config = Config::from_env().unwrap();
        assert_eq!(config.token, "t.secret");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.pool_size, 1);

        std::env::set_var("DB_POOL_MAX_SIZE", "4");
        let config = Config::from_env().unwrap();
        assert_eq!(config.pool_size, 4);

        std::env::remove_var("TINVEST_TOKEN");
        std::env::remove_var("DB_POOL_MAX_SIZE");
    }
}
