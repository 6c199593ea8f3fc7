use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    pub secure: bool,
}

/// Which repository backend serves the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub featured_limit: i64,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so parsing can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match get("STORE").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => anyhow::bail!("unknown STORE backend: {other}"),
        };

        let database_url = get("DATABASE_URL");
        if store == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORE=postgres");
        }

        let port = match get("APP_PORT").or_else(|| get("PORT")) {
            Some(v) => v.parse::<u16>().with_context(|| format!("invalid port: {v}"))?,
            None => 8080,
        };

        let jwt = JwtConfig {
            secret: get("JWT_SECRET")
                .or_else(|| get("SECRET_KEY"))
                .context("JWT_SECRET (or SECRET_KEY) must be set")?,
            issuer: get("JWT_ISSUER").unwrap_or_else(|| "food-surplus-saver".into()),
            audience: get("JWT_AUDIENCE").unwrap_or_else(|| "food-surplus-saver-users".into()),
            ttl_minutes: get("JWT_TTL_MINUTES")
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };

        let cookie = CookieConfig {
            secure: get("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            store,
            database_url,
            max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            featured_limit: get("FEATURED_LIMIT")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(6),
            jwt,
            cookie,
        })
    }

    /// Config for the in-memory backend with the given signing secret.
    pub fn in_memory(secret: &str) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            store: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
            featured_limit: 6,
            jwt: JwtConfig {
                secret: secret.into(),
                issuer: "food-surplus-saver".into(),
                audience: "food-surplus-saver-users".into(),
                ttl_minutes: 60,
            },
            cookie: CookieConfig {
                secure: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_for_postgres() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/food"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .expect("config");
        assert_eq!(cfg.store, StoreBackend::Postgres);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.featured_limit, 6);
        assert_eq!(cfg.jwt.ttl_minutes, 60);
        assert!(!cfg.cookie.secure);
    }

    #[test]
    fn secret_key_is_accepted_as_fallback() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("STORE", "memory"),
            ("SECRET_KEY", "legacy"),
            ("PORT", "3000"),
        ]))
        .expect("config");
        assert_eq!(cfg.jwt.secret, "legacy");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.store, StoreBackend::Memory);
    }

    #[test]
    fn postgres_without_database_url_fails() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "x")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn missing_secret_fails() {
        let err = AppConfig::from_lookup(lookup(&[("STORE", "memory")])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn unknown_store_fails() {
        let err = AppConfig::from_lookup(lookup(&[("STORE", "mongo"), ("JWT_SECRET", "x")]))
            .unwrap_err();
        assert!(err.to_string().contains("mongo"));
    }

    #[test]
    fn non_positive_featured_limit_falls_back() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("STORE", "memory"),
            ("JWT_SECRET", "x"),
            ("FEATURED_LIMIT", "0"),
            ("COOKIE_SECURE", "true"),
        ]))
        .expect("config");
        assert_eq!(cfg.featured_limit, 6);
        assert!(cfg.cookie.secure);
    }
}
