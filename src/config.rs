/// Configuration management for the Humanitária session core
use crate::{
    error::{HubError, HubResult},
    storage,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default key of the durable session slot
pub const DEFAULT_SESSION_KEY: &str = "humanitaria_user";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub payment: PaymentConfig,
    pub logging: LoggingConfig,
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub backend: StorageBackend,
}

/// Which durable key-value store backs the session slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StorageBackend {
    Memory,
    Disk { location: PathBuf },
    Sqlite { location: PathBuf },
}

/// Session manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key of the durable slot holding the logged-in account
    pub session_key: String,
    /// Simulated network latency for login and register
    pub auth_latency: Duration,
    /// Seed the demonstration accounts at startup
    pub seed_demo_accounts: bool,
    /// Use minimum-cost Argon2 parameters for credential hashes
    pub low_cost_hashing: bool,
}

/// Mock payment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    pub processing_delay: Duration,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> HubResult<Self> {
        dotenv::dotenv().ok();

        let data_directory: PathBuf = env::var("HUMANITARIA_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();

        let backend_name = env::var("HUMANITARIA_STORAGE_BACKEND")
            .unwrap_or_else(|_| "disk".to_string());
        let location = env::var("HUMANITARIA_STORAGE_LOCATION").ok().map(PathBuf::from);
        let backend = match backend_name.trim().to_ascii_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "disk" => StorageBackend::Disk {
                location: location.unwrap_or_else(|| data_directory.join("session")),
            },
            "sqlite" => StorageBackend::Sqlite {
                location: location.unwrap_or_else(|| data_directory.join("session.sqlite")),
            },
            other => {
                return Err(HubError::Validation(format!(
                    "Unknown storage backend: {}",
                    other
                )))
            }
        };

        let session_key = env::var("HUMANITARIA_SESSION_KEY")
            .unwrap_or_else(|_| DEFAULT_SESSION_KEY.to_string());
        let auth_latency_ms: u64 = parse_var("HUMANITARIA_AUTH_LATENCY_MS", 1000)?;
        let seed_demo_accounts = parse_var("HUMANITARIA_SEED_DEMO", true)?;
        let low_cost_hashing = parse_var("HUMANITARIA_LOW_COST_HASHING", false)?;

        let payment_delay_ms: u64 = parse_var("HUMANITARIA_PAYMENT_DELAY_MS", 2000)?;

        let log_level = env::var("RUST_LOG")
            .unwrap_or_else(|_| "humanitaria_session=info,humanitaria=info".to_string());
        let log_json = env::var("HUMANITARIA_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(AppConfig {
            storage: StorageConfig {
                data_directory,
                backend,
            },
            session: SessionConfig {
                session_key,
                auth_latency: Duration::from_millis(auth_latency_ms),
                seed_demo_accounts,
                low_cost_hashing,
            },
            payment: PaymentConfig {
                processing_delay: Duration::from_millis(payment_delay_ms),
            },
            logging: LoggingConfig {
                level: log_level,
                json: log_json,
            },
        })
    }

    /// In-memory store, demo accounts and no artificial delays
    pub fn for_tests() -> Self {
        AppConfig {
            storage: StorageConfig {
                data_directory: PathBuf::from("./data"),
                backend: StorageBackend::Memory,
            },
            session: SessionConfig {
                session_key: DEFAULT_SESSION_KEY.to_string(),
                auth_latency: Duration::ZERO,
                seed_demo_accounts: true,
                low_cost_hashing: true,
            },
            payment: PaymentConfig {
                processing_delay: Duration::ZERO,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: false,
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> HubResult<()> {
        if self.session.session_key.trim().is_empty() {
            return Err(HubError::Validation("Session key cannot be empty".to_string()));
        }

        // Every backend must be able to hold the slot
        storage::validate_key(&self.session.session_key)?;

        Ok(())
    }
}

/// Read `name`, falling back to `default` only when it is unset
fn parse_var<T: FromStr>(name: &str, default: T) -> HubResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| HubError::Validation(format!("Invalid value for {}: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
