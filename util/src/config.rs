//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from `.env` and the process environment.
//! Tests override single fields through the setters instead of touching the
//! environment.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// Period of the background scheduled-checkout run. `0` disables it.
    pub scheduled_checkout_interval_secs: u64,
    /// Period of the idle-session sweep. `0` disables it.
    pub session_timeout_interval_secs: u64,
    /// Idle timeout given to newly started sessions.
    pub session_timeout_minutes: i32,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Malformed numeric values fall back to their defaults. A missing
    /// `JWT_SECRET` is left empty here and rejected by the server at startup.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "ogs-attendance".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "data/ogs.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: var_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_duration_minutes: var_or("JWT_DURATION_MINUTES", 60),
            scheduled_checkout_interval_secs: var_or("SCHEDULED_CHECKOUT_INTERVAL_SECS", 60),
            session_timeout_interval_secs: var_or("SESSION_TIMEOUT_INTERVAL_SECS", 60),
            session_timeout_minutes: var_or("SESSION_TIMEOUT_MINUTES", 30),
        }
    }

    fn lock() -> &'static RwLock<AppConfig> {
        CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()))
    }

    /// Returns a snapshot of the global configuration.
    ///
    /// A poisoned lock still yields the last written value.
    pub fn global() -> AppConfig {
        match Self::lock().read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        Self::set_field(|cfg| *cfg = AppConfig::from_env());
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = match Self::lock().write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_session_timeout_minutes(value: i32) {
        AppConfig::set_field(|cfg| cfg.session_timeout_minutes = value);
    }
}

// --- Free accessors used across the workspace ---

pub fn env() -> String {
    AppConfig::global().env
}

pub fn project_name() -> String {
    AppConfig::global().project_name
}

pub fn log_level() -> String {
    AppConfig::global().log_level
}

pub fn log_file() -> String {
    AppConfig::global().log_file
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path
}

pub fn host() -> String {
    AppConfig::global().host
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn scheduled_checkout_interval_secs() -> u64 {
    AppConfig::global().scheduled_checkout_interval_secs
}

pub fn session_timeout_interval_secs() -> u64 {
    AppConfig::global().session_timeout_interval_secs
}

pub fn session_timeout_minutes() -> i32 {
    AppConfig::global().session_timeout_minutes
}
