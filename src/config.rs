use chrono::Utc;
use log::LevelFilter;
use rand::RngCore;
use rand_core::OsRng;
use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::auth::token;

const DEFAULT_ADDR: &str = "127.0.0.1:7878";
const DEFAULT_DATABASE: &str = "./db.sqlite3";
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);
const GENERATED_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DEVPORTAL_ADDR {value:?} is not a socket address: {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("DEVPORTAL_SESSION_TTL {value:?} is not a duration: {source}")]
    SessionTtl {
        value: String,
        source: humantime::DurationError,
    },
    #[error("DEVPORTAL_SESSION_TTL must be at least one second")]
    ZeroSessionTtl,
    #[error("DEVPORTAL_SESSION_TTL {0:?} is too long to express as a token expiry")]
    SessionTtlTooLong(String),
    #[error("DEVPORTAL_SECRET must not be empty")]
    EmptySecret,
    #[error("DEVPORTAL_LOG {0:?} is not a log level")]
    LogLevel(String),
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_path: PathBuf,
    pub secret: Vec<u8>,
    /// Set when no secret was configured and a random one was generated.
    pub secret_generated: bool,
    pub session_ttl: Duration,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("DEVPORTAL_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .map_err(|source| ConfigError::Addr { value: addr, source })?;

        let database_path = lookup("DEVPORTAL_DATABASE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        let (secret, secret_generated) = match lookup("DEVPORTAL_SECRET") {
            Some(secret) if secret.is_empty() => return Err(ConfigError::EmptySecret),
            Some(secret) => (secret.into_bytes(), false),
            None => (generate_secret(), true),
        };

        let session_ttl = match lookup("DEVPORTAL_SESSION_TTL") {
            Some(value) => {
                let ttl = humantime::parse_duration(&value).map_err(|source| {
                    ConfigError::SessionTtl {
                        value: value.clone(),
                        source,
                    }
                })?;
                if token::expiry_after(Utc::now().timestamp(), ttl).is_none() {
                    return Err(ConfigError::SessionTtlTooLong(value));
                }
                ttl
            }
            None => DEFAULT_SESSION_TTL,
        };
        if session_ttl.as_secs() == 0 {
            return Err(ConfigError::ZeroSessionTtl);
        }

        let log_level = match lookup("DEVPORTAL_LOG") {
            Some(level) => level.parse().map_err(|_| ConfigError::LogLevel(level))?,
            None => LevelFilter::Debug,
        };

        Ok(Config {
            addr,
            database_path,
            secret,
            secret_generated,
            session_ttl,
            log_level,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("database_path", &self.database_path)
            .field("secret", &"<redacted>")
            .field("secret_generated", &self.secret_generated)
            .field("session_ttl", &self.session_ttl)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn generate_secret() -> Vec<u8> {
    let mut secret = vec![0u8; GENERATED_SECRET_LEN];
    OsRng.fill_bytes(&mut secret);
    secret
}
