use std::path::PathBuf;
use std::time::Duration;

use codegen_core::retry::RetryPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Base URL of the remote ATM service.
    pub atm_base_url: String,
    /// Directory where run log artifacts are written and served from.
    pub log_dir: PathBuf,
    /// Poll attempt budget per job.
    pub max_poll_attempts: u32,
    /// Delay between status polls, in seconds.
    pub poll_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                                              |
    /// |---------------------|------------------------------------------------------|
    /// | `HOST`              | `0.0.0.0`                                            |
    /// | `PORT`              | `5000`                                               |
    /// | `CORS_ORIGINS`      | `http://localhost:5173`                              |
    /// | `ATM_BASE_URL`      | `https://test-manager-api.lambdatest.com/api/atm/v1` |
    /// | `LOG_DIR`           | `logs`                                               |
    /// | `MAX_POLL_ATTEMPTS` | `60`                                                 |
    /// | `POLL_INTERVAL_SECS`| `15`                                                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let atm_base_url = std::env::var("ATM_BASE_URL")
            .unwrap_or_else(|_| "https://test-manager-api.lambdatest.com/api/atm/v1".into());

        let log_dir = PathBuf::from(std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()));

        let max_poll_attempts: u32 = std::env::var("MAX_POLL_ATTEMPTS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("MAX_POLL_ATTEMPTS must be a valid u32");

        let poll_interval_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            atm_base_url,
            log_dir,
            max_poll_attempts,
            poll_interval_secs,
        }
    }

    /// Retry policy for orchestrator runs launched by this server.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_poll_attempts,
            interval: Duration::from_secs(self.poll_interval_secs),
        }
    }
}
