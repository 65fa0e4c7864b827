use std::env;

use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,

    /// Zone used to derive the civil date and time of day of every scan.
    pub time_zone: Tz,

    // Rate limiting
    pub rate_scan_per_min: u32,

    pub run_migrations: bool,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let zone_name = env::var("TIME_ZONE").unwrap_or_else(|_| "America/Lima".to_string());
        let time_zone = zone_name
            .parse::<Tz>()
            .map_err(|e| anyhow!("TIME_ZONE {zone_name:?} is not a known zone: {e}"))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            time_zone,
            rate_scan_per_min: env::var("RATE_SCAN_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .context("RATE_SCAN_PER_MIN must be a positive integer")?,
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("RUN_MIGRATIONS must be true or false")?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}
