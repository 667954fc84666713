use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown store backend '{other}', expected postgres or memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub database_max_connections: u32,
    pub ranking_cache_ttl: Duration,
    pub enforce_plausibility: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse().context("Invalid STORE_BACKEND")?,
            None => StoreBackend::Postgres,
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("Cannot load DATABASE_URL env variable");
        }

        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url,
            store_backend,
            database_max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(value) => value
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
                None => 5,
            },
            ranking_cache_ttl: match lookup("RANKING_CACHE_TTL_SECS") {
                Some(value) => Duration::from_secs(
                    value
                        .parse()
                        .context("RANKING_CACHE_TTL_SECS must be a number of seconds")?,
                ),
                None => Duration::from_secs(120),
            },
            enforce_plausibility: match lookup("ENFORCE_PLAUSIBILITY") {
                Some(value) => value
                    .trim()
                    .parse()
                    .context("ENFORCE_PLAUSIBILITY must be true or false")?,
                None => true,
            },
        })
    }
}
