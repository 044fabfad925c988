// region:    --- Imports
use crate::auction::UpdateMode;
use std::net::SocketAddr;

// endregion: --- Imports

/// 기본 서명 키. 운영 환경에서는 JWT_SECRET 으로 교체
pub const DEFAULT_JWT_SECRET: &str = "auction-marketplace-shared-secret";

// region:    --- Config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub update_mode: UpdateMode,
    pub require_auth: bool,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로 설정 로드
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup("STORAGE_BACKEND").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => return Err(invalid("STORAGE_BACKEND", other)),
        };

        let database_url = lookup("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => 5,
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("DB_MAX_CONNECTIONS", &v))?,
        };

        let bind_addr = match lookup("BIND_ADDR") {
            None => SocketAddr::from(([0, 0, 0, 0], 3000)),
            Some(v) => v.parse().map_err(|_| invalid("BIND_ADDR", &v))?,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        let update_mode = match lookup("UPDATE_SEMANTICS").as_deref() {
            None | Some("compat") => UpdateMode::Compat,
            Some("strict") => UpdateMode::Strict,
            Some(other) => return Err(invalid("UPDATE_SEMANTICS", other)),
        };

        let require_auth = match lookup("REQUIRE_AUTH").as_deref() {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => return Err(invalid("REQUIRE_AUTH", other)),
        };

        Ok(Self {
            storage,
            database_url,
            db_max_connections,
            bind_addr,
            jwt_secret,
            update_mode,
            require_auth,
        })
    }
}

fn invalid(name: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
    }
}

// endregion: --- Config

// endregion: --- Tests
