use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_CURRENCY: &str = "ETB";
const DEFAULT_CHAPA_BASE_URL: &str = "https://api.chapa.co/v1";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_INVOICE_DUE_DAYS: i64 = 7;

pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,

    pub bind_address: String,
    pub app_url: String,

    pub currency: String,
    pub invoice_due_days: i64,

    pub chapa_secret_key: Option<String>,
    pub chapa_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            database_max_connections: parse_env_or(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            bind_address: env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            app_url: env_or("APP_URL", DEFAULT_APP_URL),
            currency: env_or("CURRENCY", DEFAULT_CURRENCY),
            invoice_due_days: parse_env_or("INVOICE_DUE_DAYS", DEFAULT_INVOICE_DUE_DAYS)?,
            chapa_secret_key: std::env::var("CHAPA_SECRET_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            chapa_base_url: env_or("CHAPA_BASE_URL", DEFAULT_CHAPA_BASE_URL),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
