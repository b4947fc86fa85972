use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

pub const DEFAULT_MONTHLY_APPLICATION_LIMIT: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub monthly_application_limit: usize,
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8080".to_string(),
            database_url: None,
            database_max_connections: 10,
            monthly_application_limit: DEFAULT_MONTHLY_APPLICATION_LIMIT,
            json_logs: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            database_max_connections: get_env_parse_or(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            monthly_application_limit: get_env_parse_or(
                "APPLICATION_MONTHLY_LIMIT",
                defaults.monthly_application_limit,
            )?,
            json_logs: env::var("LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.monthly_application_limit < 1 {
            return Err(Error::Config(
                "APPLICATION_MONTHLY_LIMIT must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
