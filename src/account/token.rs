use crate::account::model::Claims;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// 토큰 유효 시간 (1시간)
const TOKEN_TTL_SECS: i64 = 60 * 60;

/// 베어러 토큰 발급/검증
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// 사용자 식별자를 담은 토큰 발급
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let iat = Utc::now();
        let claims = Claims {
            id: user_id.to_string(),
            iat: iat.timestamp(),
            exp: (iat + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// 서명과 만료 검증 후 클레임 반환
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_user_id_with_one_hour_expiry() {
        let issuer = TokenIssuer::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = issuer.issue(user_id).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.id, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenIssuer::new("secret-a").issue(Uuid::new_v4()).unwrap();
        let err = TokenIssuer::new("secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret");
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            id: Uuid::new_v4().to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &issuer.encoding_key).unwrap();

        assert!(issuer.verify(&token).is_err());
    }
}
