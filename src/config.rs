/*
 * Responsibility
 * - 環境変数や設定の読み込み (API_SECRET、抽出ポリシー、HTTP 制限、初期ユーザーなど)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 値の取得元は lookup 関数で差し替え可能 (テストでは HashMap を渡す)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::{ExtractionPolicy, Secret};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
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

/// A user registered at startup, from `SEED_USERS=email:password,...`.
#[derive(Clone, PartialEq, Eq)]
pub struct UserSeed {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for UserSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSeed")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // HMAC key shared by the token issuer and validator
    pub api_secret: Secret,
    pub extraction: ExtractionPolicy,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,

    pub seed_users: Vec<UserSeed>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = lookup("PORT").and_then(|s| s.parse().ok()).unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        // Absent and empty are both fatal; `Secret::new` rejects the latter.
        let api_secret = lookup("API_SECRET")
            .ok_or(ConfigError::Missing("API_SECRET"))
            .and_then(Secret::new)?;

        let require_query_gate = match lookup("AUTH_REQUIRE_TOKEN_QUERY") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid("AUTH_REQUIRE_TOKEN_QUERY"))?,
            None => true,
        };

        let request_timeout_seconds = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let request_body_limit_bytes = lookup("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let seed_users = match lookup("SEED_USERS") {
            Some(v) => parse_seed_users(&v).ok_or(ConfigError::Invalid("SEED_USERS"))?,
            None => Vec::new(),
        };

        Ok(Self {
            addr,
            app_env,
            api_secret,
            extraction: ExtractionPolicy { require_query_gate },
            request_timeout_seconds,
            request_body_limit_bytes,
            seed_users,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `email:password` pairs separated by commas. Blank entries are skipped.
fn parse_seed_users(value: &str) -> Option<Vec<UserSeed>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (email, password) = entry.split_once(':')?;
            let email = email.trim();
            if email.is_empty() || password.is_empty() {
                return None;
            }
            Some(UserSeed {
                email: email.to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}
