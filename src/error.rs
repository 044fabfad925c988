// region:    --- Imports
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

// endregion: --- Imports

// region:    --- App Error
/// 서비스 계층 공통 에러
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 잘못된 식별자, 누락된 필드, 숫자가 아닌 입찰가
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    /// 사용자 이름 또는 이메일 중복
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredential,

    #[error("Auction is closed")]
    AuctionClosed,

    /// 입찰가가 현재 최고가 이하
    #[error("Bid amount must be higher than the current highest bid ({highest_bid})")]
    BidTooLow { highest_bid: f64 },

    #[error("{0}")]
    Unauthorized(String),

    /// 해싱, 토큰 서명 등 내부 실패
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredential
            | AppError::AuctionClosed
            | AppError::BidTooLow { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Store(StoreError::Duplicate(_)) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// AppError를 HTTP 응답으로 변환
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{:<12} --> 요청 처리 실패: {}", "Error", self);
            json!({
                "message": "Internal server error",
                "error": self.to_string(),
            })
        } else {
            json!({ "message": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}

// endregion: --- App Error

// endregion: --- Tests
