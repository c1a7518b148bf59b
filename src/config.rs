//! Configuration
//!
//! Read once at startup from environment variables. The admin password may
//! instead come from a secret file (Docker/Swarm secrets).

use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

pub const PORT_VAR: &str = "CLUBSITE_PORT";
pub const BIND_VAR: &str = "CLUBSITE_BIND";
pub const DB_PATH_VAR: &str = "CLUBSITE_DB_PATH";
pub const LOG_DIR_VAR: &str = "CLUBSITE_LOG_DIR";
pub const ADMIN_PASSWORD_VAR: &str = "CLUBSITE_ADMIN_PASSWORD";
pub const ADMIN_PASSWORD_FILE_VAR: &str = "CLUBSITE_ADMIN_PASSWORD_FILE";
pub const SESSION_TTL_VAR: &str = "CLUBSITE_SESSION_TTL_MINUTES";
pub const MAX_BODY_VAR: &str = "CLUBSITE_MAX_BODY_BYTES";

const DEFAULT_SECRET_FILE: &str = "/run/secrets/clubsite_admin_password";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("admin password missing: set CLUBSITE_ADMIN_PASSWORD or provide {path}")]
    MissingPassword { path: String },
}

pub struct Config {
    pub bind: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub admin_password: String,
    pub session_ttl: Duration,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let ttl_minutes: u64 = try_load(&lookup, SESSION_TTL_VAR, "720")?;
        let session_ttl = match ttl_minutes.checked_mul(60) {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    key: SESSION_TTL_VAR,
                    message: "must be at least 1".to_string(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
            None => {
                return Err(ConfigError::Invalid {
                    key: SESSION_TTL_VAR,
                    message: format!("{ttl_minutes} minutes is too long"),
                })
            }
        };

        Ok(Self {
            bind: try_load(&lookup, BIND_VAR, "0.0.0.0")?,
            port: try_load(&lookup, PORT_VAR, "8080")?,
            db_path: try_load(&lookup, DB_PATH_VAR, "clubsite.db")?,
            log_dir: try_load(&lookup, LOG_DIR_VAR, "logs")?,
            admin_password: admin_password(&lookup)?,
            session_ttl,
            max_body_bytes: try_load(&lookup, MAX_BODY_VAR, "65536")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Log the effective settings, secrets excluded
    pub fn log_summary(&self) {
        info!(
            address = %self.address(),
            db_path = %self.db_path.display(),
            log_dir = %self.log_dir.display(),
            session_ttl_secs = self.session_ttl.as_secs(),
            max_body_bytes = self.max_body_bytes,
            "configuration loaded"
        );
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        })
}

fn admin_password(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    if let Some(password) = lookup(ADMIN_PASSWORD_VAR).filter(|p| !p.is_empty()) {
        return Ok(password);
    }

    let path = lookup(ADMIN_PASSWORD_FILE_VAR).unwrap_or_else(|| DEFAULT_SECRET_FILE.to_string());
    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::MissingPassword { path })
}
