use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub analytics_db_path: PathBuf,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("MP_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8000".to_string())
            .parse()
            .context("Invalid MP_LISTEN_ADDR")?;
        let analytics_db_path = lookup("MP_ANALYTICS_DB")
            .unwrap_or_else(|| "./db/analytics.db".into())
            .into();
        let cors_allow = lookup("MP_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup("MP_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .trim()
            .parse()
            .context("Invalid MP_REQUEST_TIMEOUT_MS")?;
        Ok(Self {
            listen_addr,
            analytics_db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
