/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可, スキーマ種別, タイムアウトなど)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

/// Origins served by the deployed survey front end.
pub const DEFAULT_CORS_ALLOWED_ORIGINS: [&str; 2] =
    ["https://research-mfe.vercel.app", "http://localhost:3000"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Which shape of the survey tables the store carries.
///
/// - `Translated`: `groups.name_en`, `questions.question_en` and `answers.what_role` exist.
/// - `Basic`: none of them exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVariant {
    #[default]
    Translated,
    Basic,
}

impl SchemaVariant {
    pub fn has_translations(&self) -> bool {
        matches!(self, Self::Translated)
    }
}

impl FromStr for SchemaVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "translated" | "en" => Ok(Self::Translated),
            "basic" => Ok(Self::Basic),
            _ => Err(ConfigError::Invalid("SURVEY_SCHEMA")),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub schema: SchemaVariant,
    pub answers_email_constraint: String,

    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_statement_timeout: Duration,

    pub request_timeout: Duration,
    pub request_body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A local .env is optional; real deployments inject the environment directly.
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 8080)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => DEFAULT_CORS_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let schema = match lookup("SURVEY_SCHEMA") {
            Some(raw) => raw.parse()?,
            None => SchemaVariant::default(),
        };

        // Postgres' default name for `UNIQUE (email)` on `answers`.
        let answers_email_constraint = lookup("ANSWERS_EMAIL_CONSTRAINT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "answers_email_key".to_string());

        let db_max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid("DB_MAX_CONNECTIONS"));
        }
        let db_acquire_timeout =
            Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECONDS", 5)?);
        let db_statement_timeout =
            Duration::from_millis(parse_or(&lookup, "DB_STATEMENT_TIMEOUT_MS", 5_000)?);

        let request_timeout =
            Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)?);
        let request_body_limit: usize =
            parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            schema,
            answers_email_constraint,
            db_max_connections,
            db_acquire_timeout,
            db_statement_timeout,
            request_timeout,
            request_body_limit,
        })
    }
}

// Unset keys fall back to the default; set-but-unparsable keys are rejected.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

// Origins are compared byte-for-byte against the request's Origin header,
// so store them the way browsers send them (no trailing slash).
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let url = Url::parse(s).map_err(|_| ConfigError::Invalid("CORS_ALLOWED_ORIGINS"))?;
            if !url.origin().is_tuple() {
                return Err(ConfigError::Invalid("CORS_ALLOWED_ORIGINS"));
            }
            Ok(url.origin().ascii_serialization())
        })
        .collect()
}
