/// 계정 서비스
/// 1. 회원가입
/// 2. 로그인 (토큰 발급)
// region:    --- Imports
use crate::account::model::{SigninRequest, SignupRequest, User};
use crate::account::token::TokenIssuer;
use crate::error::AppError;
use crate::store::{StoreError, UserStore};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Account Service
pub struct AccountService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    /// 1. 회원가입
    pub async fn register(&self, request: SignupRequest) -> Result<Uuid, AppError> {
        let username = required(request.username, "username")?;
        let email = required(request.email, "email")?;
        let password = required(request.password, "password")?;
        info!("{:<12} --> 회원가입 요청 username: {}", "Account", username);

        // 중복 확인
        if self.users.exists(&username, &email).await? {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: hash_password(&password)?,
            created_at: Utc::now(),
        };

        // 동시 가입으로 인한 유니크 위반도 Conflict 로 처리
        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => {
                return Err(AppError::Conflict("User already exists".to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        info!("{:<12} --> 회원가입 완료 id: {}", "Account", user.id);
        Ok(user.id)
    }

    /// 2. 로그인
    pub async fn authenticate(&self, request: SigninRequest) -> Result<String, AppError> {
        let email = required(request.email, "email")?;
        let password = required(request.password, "password")?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        verify_password(&password, &user.password_hash)?;

        info!("{:<12} --> 로그인 성공 id: {}", "Account", user.id);
        self.tokens.issue(user.id)
    }
}

// endregion: --- Account Service

// region:    --- Helpers
fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::InvalidInput(format!("{} is required", field))),
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredential)
}

// endregion: --- Helpers

// endregion: --- Tests
