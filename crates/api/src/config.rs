use chrono::{FixedOffset, Offset, Utc};
use scout_voting::scheduler;

use crate::auth::jwt::JwtConfig;
use crate::auth::yandex::YandexConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the listener stops (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Bot token the Telegram login widget signs with. Empty disables linking.
    pub telegram_bot_token: String,
    /// Yandex OAuth application credentials.
    pub yandex: YandexConfig,
    /// Launch time zone as minutes east of UTC (default: `0`).
    pub launch_utc_offset_minutes: i32,
    /// How often the server re-checks the active launch (default: `3600`).
    pub launch_rotation_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                    |
    /// | `TELEGRAM_BOT_TOKEN`            | empty                   |
    /// | `LAUNCH_UTC_OFFSET_MINUTES`     | `0`                     |
    /// | `LAUNCH_ROTATION_INTERVAL_SECS` | `3600`                  |
    ///
    /// See [`JwtConfig::from_env`] and [`YandexConfig::from_env`] for the rest.
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let telegram_bot_token = std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();

        let launch_utc_offset_minutes: i32 = std::env::var("LAUNCH_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("LAUNCH_UTC_OFFSET_MINUTES must be a valid i32");
        assert!(
            launch_offset(launch_utc_offset_minutes).is_some(),
            "LAUNCH_UTC_OFFSET_MINUTES must be within +/- 24 hours"
        );

        let launch_rotation_interval_secs =
            rotation_interval_secs(std::env::var("LAUNCH_ROTATION_INTERVAL_SECS").ok().as_deref());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            telegram_bot_token,
            yandex: YandexConfig::from_env(),
            launch_utc_offset_minutes,
            launch_rotation_interval_secs,
        }
    }

    /// The launch time zone. Falls back to UTC for an out-of-range offset.
    pub fn launch_offset(&self) -> FixedOffset {
        launch_offset(self.launch_utc_offset_minutes).unwrap_or_else(|| Utc.fix())
    }
}

fn launch_offset(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

/// Parse `LAUNCH_ROTATION_INTERVAL_SECS`, defaulting to the scheduler's interval.
///
/// # Panics
///
/// Panics on a non-numeric or zero value.
fn rotation_interval_secs(raw: Option<&str>) -> u64 {
    let secs = match raw {
        Some(raw) => raw
            .parse()
            .expect("LAUNCH_ROTATION_INTERVAL_SECS must be a valid u64"),
        None => scheduler::DEFAULT_INTERVAL.as_secs(),
    };
    assert!(secs > 0, "LAUNCH_ROTATION_INTERVAL_SECS must be positive");
    secs
}
