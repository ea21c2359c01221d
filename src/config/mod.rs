use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub catalog_path: Option<PathBuf>,
    pub feed_page_size: usize,
    pub trending_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = env_or("HTTP_ADDR", "0.0.0.0:8080");
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;

        let feed_page_size: usize = env_or_parse("FEED_PAGE_SIZE", "6")?;
        if feed_page_size == 0 {
            return Err(anyhow!("invalid FEED_PAGE_SIZE: must be at least 1"));
        }

        Ok(Self {
            http_addr,
            catalog_path: std::env::var("CATALOG_PATH").ok().map(PathBuf::from),
            feed_page_size,
            trending_limit: env_or_parse("TRENDING_LIMIT", "10")?,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".to_string(),
            catalog_path: None,
            feed_page_size: crate::app::query::DEFAULT_PAGE_SIZE,
            trending_limit: 10,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
