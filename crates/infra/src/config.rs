//! Configuration loading and representation.
//!
//! Everything comes from environment variables read once at startup.

use std::net::SocketAddr;

use anyhow::Context;

use sponsorship_auth::password::DEFAULT_BCRYPT_COST;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `JWT_SECRET`; falls back to an insecure dev value.
    pub jwt_secret: String,
    /// `DATABASE_URL`; `None` selects the in-memory stores.
    pub database_url: Option<String>,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `BCRYPT_COST`
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {v:?}")
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(v) => v.parse::<u32>().context("BCRYPT_COST must be an integer")?,
            None => DEFAULT_BCRYPT_COST,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            database_url,
            max_connections,
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.jwt_secret, "dev-secret");
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.bcrypt_cost, 10);
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/sponsorship"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BCRYPT_COST", "12"),
        ]))
        .unwrap();

        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/sponsorship"));
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.bcrypt_cost, 12);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(AppConfig::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "many")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).is_err());
    }
}
