use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, fmt, path::Path, str::FromStr, time::Duration};

use crate::constants::{DEFAULT_CACHE_SWEEP_INTERVAL, DEFAULT_CACHE_TTL};

const DEFAULT_API_USERNAME: &str = "admin";
const DEFAULT_API_PASSWORD: &str = "password";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "prod")]
    Production,
    #[serde(alias = "test")]
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(AppEnvironment::Development),
            "prod" | "production" => Ok(AppEnvironment::Production),
            "test" | "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

impl AppEnvironment {
    /// Env file loaded before anything else is read.
    pub fn env_file(&self) -> &'static str {
        match self {
            AppEnvironment::Production => "ENV",
            _ => ".env",
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    #[serde(default)]
    pub run_migrations: bool,

    #[serde(default = "default_api_username")]
    pub api_username: String,

    #[serde(default = "default_api_password")]
    pub api_password: String,

    /// Loaded for deployment parity; no route issues or checks tokens.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_cache_sweep_interval_secs")]
    pub cache_sweep_interval_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Projects-API".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_db_max_connections() -> u32 {
    20
}
fn default_api_username() -> String {
    DEFAULT_API_USERNAME.to_string()
}
fn default_api_password() -> String {
    DEFAULT_API_PASSWORD.to_string()
}
fn default_static_dir() -> String {
    "web".to_string()
}
fn default_cache_enabled() -> bool {
    true
}
fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}
fn default_cache_sweep_interval_secs() -> u64 {
    DEFAULT_CACHE_SWEEP_INTERVAL.as_secs()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            host: default_host(),
            port: default_port(),
            worker_count: default_worker_count(),
            database_url: String::new(),
            db_max_connections: default_db_max_connections(),
            run_migrations: false,
            api_username: default_api_username(),
            api_password: default_api_password(),
            jwt_secret: None,
            static_dir: default_static_dir(),
            cache_enabled: default_cache_enabled(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_sweep_interval_secs: default_cache_sweep_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Resolves the configuration once at startup.
    ///
    /// Precedence, lowest first: built-in defaults, `config/default`,
    /// `config/<mode>`, `APP_*` variables, then the deployment variables
    /// `PORT`, `DATABASE_URL`, `DATABASE_PUBLIC_URL`, `API_USERNAME`,
    /// `API_PASSWORD` and `JWT_SECRET`.
    pub fn new() -> Result<Self, ConfigError> {
        let raw_mode = env::var("MODE").unwrap_or_else(|_| "dev".into());
        let mode = AppEnvironment::from_str(&raw_mode)
            .map_err(|_| ConfigError::Message(format!("Invalid MODE value: {}", raw_mode)))?;

        load_env_file(mode.env_file());

        let port = match non_empty_env("PORT") {
            Some(raw) => Some(
                raw.parse::<u16>()
                    .map_err(|_| ConfigError::Message(format!("Invalid PORT value: {}", raw)))?,
            ),
            None => None,
        };

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", mode)).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true).ignore_empty(true))
            .set_override_option("port", port.map(i64::from))?
            .set_override_option(
                "database_url",
                resolve_database_url(non_empty_env("DATABASE_PUBLIC_URL"), non_empty_env("DATABASE_URL")),
            )?
            .set_override_option("api_username", non_empty_env("API_USERNAME"))?
            .set_override_option("api_password", non_empty_env("API_PASSWORD"))?
            .set_override_option("jwt_secret", non_empty_env("JWT_SECRET"))?;

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.env = mode;

        config.validate()?;
        config.warn_on_default_credentials();
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.port == 0 {
            errors.push("PORT must be non-zero");
        }
        if self.worker_count == 0 {
            errors.push("APP_WORKER_COUNT must be at least 1");
        }
        if self.cache_ttl_secs == 0 {
            errors.push("APP_CACHE_TTL_SECS must be at least 1");
        }
        if self.cache_sweep_interval_secs == 0 {
            errors.push("APP_CACHE_SWEEP_INTERVAL_SECS must be at least 1");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn uses_default_credentials(&self) -> bool {
        self.api_username == DEFAULT_API_USERNAME || self.api_password == DEFAULT_API_PASSWORD
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_interval_secs)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn warn_on_default_credentials(&self) {
        if self.is_production() && self.uses_default_credentials() {
            tracing::warn!("API_USERNAME/API_PASSWORD are unset; /api is guarded by the default credentials");
        }
    }
}

/// The public URL wins, matching how the hosting platform exposes both.
pub fn resolve_database_url(public: Option<String>, private: Option<String>) -> Option<String> {
    public.or(private)
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn load_env_file(path: &str) {
    if !Path::new(path).exists() {
        tracing::warn!("Env file {} not found; using process environment only", path);
        return;
    }
    if let Err(e) = dotenv::from_filename(path) {
        tracing::warn!("Failed to load env file {}: {}", path, e);
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        self.as_deref().unwrap_or_default().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("db_max_connections", &self.db_max_connections)
            .field("run_migrations", &self.run_migrations)
            .field("api_username", &self.api_username)
            .field("api_password", &self.api_password.redact())
            .field("jwt_secret", &self.jwt_secret.redact())
            .field("static_dir", &self.static_dir)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_ttl", &humantime::format_duration(self.cache_ttl()).to_string())
            .field(
                "cache_sweep_interval",
                &humantime::format_duration(self.cache_sweep_interval()).to_string(),
            )
            .finish()
    }
}
