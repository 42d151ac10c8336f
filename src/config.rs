use anyhow::{Context, Result};
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub general: GeneralConfig,

    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct GeneralConfig {
    /// Default tracing filter, used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,

    /// Number of tokio worker threads. 0 means one per CPU core.
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 0,
        }
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,

    pub port: u16,

    pub user: String,

    pub password: String,

    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "apiuser".to_string(),
            password: "apipassword".to_string(),
            name: "apiapp".to_string(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

impl DatabaseConfig {
    /// Connection URL for the MySQL driver. Credentials are percent-encoded.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first when present.
    pub fn load() -> Result<Self> {
        // Runs before tracing is initialised, so nothing is logged here.
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Failed to read .env file"),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("DB_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_PORT must be a port number, got '{raw}'"))?,
            None => defaults.database.port,
        };

        let worker_threads = match get("WORKER_THREADS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("WORKER_THREADS must be a number, got '{raw}'"))?,
            None => defaults.general.worker_threads,
        };

        let json_logs = match get("LOG_FORMAT").as_deref() {
            None | Some("text") => defaults.general.json_logs,
            Some("json") => true,
            Some(other) => anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{other}'"),
        };

        Ok(Self {
            general: GeneralConfig {
                log_level: get("LOG_LEVEL").unwrap_or(defaults.general.log_level),
                json_logs,
                worker_threads,
            },
            database: DatabaseConfig {
                host: get("DB_HOST").unwrap_or(defaults.database.host),
                port,
                user: get("DB_USER").unwrap_or(defaults.database.user),
                password: get("DB_PASSWORD").unwrap_or(defaults.database.password),
                name: get("DB_NAME").unwrap_or(defaults.database.name),
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.host.trim().is_empty() {
            anyhow::bail!("DB_HOST cannot be blank");
        }

        if self.database.port == 0 {
            anyhow::bail!("DB_PORT must be non-zero");
        }

        Ok(())
    }
}
