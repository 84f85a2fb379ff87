use std::net::SocketAddr;

use anyhow::Context;

use crate::sources::UsdaConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Usda,
    Local,
}

impl std::str::FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usda" => Ok(SourceKind::Usda),
            "local" => Ok(SourceKind::Local),
            other => anyhow::bail!("unknown nutrition source {:?}", other),
        }
    }
}

/// Parse a comma separated priority list such as `usda,local`.
pub fn parse_source_order(raw: &str) -> anyhow::Result<Vec<SourceKind>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// `APP_HOST`/`APP_PORT`, defaulting to `0.0.0.0:8080`.
pub fn parse_listen_addr(host: Option<&str>, port: Option<&str>) -> anyhow::Result<SocketAddr> {
    let host = host.unwrap_or("0.0.0.0");
    let port: u16 = match port {
        Some(p) => p
            .trim()
            .parse()
            .with_context(|| format!("APP_PORT {:?} is not a port number", p))?,
        None => 8080,
    };
    format!("{}:{}", host.trim(), port)
        .parse()
        .with_context(|| format!("APP_HOST {:?} is not an IP address", host))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub sources: Vec<SourceKind>,
    /// `None` when no API key is configured.
    pub usda: Option<UsdaConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr = parse_listen_addr(
            std::env::var("APP_HOST").ok().as_deref(),
            std::env::var("APP_PORT").ok().as_deref(),
        )?;
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let sources = parse_source_order(
            &std::env::var("NUTRITION_SOURCES").unwrap_or_else(|_| "usda,local".into()),
        )?;

        let usda = std::env::var("USDA_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(|api_key| {
                let defaults = UsdaConfig::default();
                UsdaConfig {
                    api_key,
                    base_url: std::env::var("USDA_BASE_URL").unwrap_or(defaults.base_url),
                    timeout_secs: std::env::var("USDA_TIMEOUT_SECS")
                        .ok()
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(defaults.timeout_secs),
                    page_size: std::env::var("USDA_PAGE_SIZE")
                        .ok()
                        .and_then(|v| v.parse::<u32>().ok())
                        .unwrap_or(defaults.page_size),
                }
            });

        Ok(Self {
            listen_addr,
            database_url,
            sources,
            usda,
        })
    }
}
