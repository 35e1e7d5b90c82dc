use std::{fmt, path::PathBuf};

use axum::http::HeaderValue;

use crate::errors::AppError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://db/feedback.db";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "frontend/build";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub environment: Environment,
    pub static_dir: PathBuf,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            port: DEFAULT_PORT,
            environment: Environment::Development,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            allowed_origins: vec![HeaderValue::from_static(DEFAULT_ALLOWED_ORIGINS)],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::EnvError(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let environment = match lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .as_deref()
            .map(str::trim)
        {
            None | Some("") | Some("development") => Environment::Development,
            Some("production") => Environment::Production,
            Some(other) => {
                return Err(AppError::EnvError(format!("Unknown APP_ENV: {}", other)));
            }
        };

        let static_dir = PathBuf::from(
            lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        );

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>()
                    .map_err(|_| AppError::EnvError(format!("Invalid CORS origin: {}", s)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            database_url,
            port,
            environment,
            static_dir,
            allowed_origins,
        })
    }
}
