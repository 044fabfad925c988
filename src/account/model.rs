use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// 사용자 모델 (비밀번호는 해시로만 보관)
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// 로그에 해시가 남지 않도록 직접 구현
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// 회원가입 요청
#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// 로그인 요청
#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// 로그인 응답
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub message: String,
    pub token: String,
}

/// 토큰 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 식별자
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}
