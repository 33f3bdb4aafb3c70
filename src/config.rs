use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,

    // Attendance / organization backend
    pub upstream_base_url: String,
    pub upstream_token: String,
    pub upstream_timeout: Duration,
    pub tenant_code: String,
    pub reference_date: NaiveDate,

    // Response cache
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let reference_date = match env::var("REFERENCE_DATE") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("REFERENCE_DATE must be YYYY-MM-DD, got {raw:?}"))?,
            Err(_) => Local::now().date_naive(),
        };

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            jwt_secret: required("JWT_SECRET")?,
            upstream_base_url: required("UPSTREAM_BASE_URL")?,
            upstream_token: env::var("UPSTREAM_TOKEN").unwrap_or_default(),
            upstream_timeout: Duration::from_secs(parsed_or("UPSTREAM_TIMEOUT_SECS", 15)?), // default 15 s
            tenant_code: required("TENANT_CODE")?,
            reference_date,
            cache_ttl: Duration::from_secs(parsed_or("CACHE_TTL_SECS", 30)?),
            cache_max_entries: parsed_or("CACHE_MAX_ENTRIES", 10_000)?,
            rate_protected_per_min: parsed_or("RATE_PROTECTED_PER_MIN", 1000)?,
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value {raw:?}")),
        Err(_) => Ok(default),
    }
}
