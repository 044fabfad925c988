// region:    --- Imports
use crate::account::model::{SigninRequest, SigninResponse, SignupRequest};
use crate::app::AppState;
use crate::auction::listing::{CreateAuctionRequest, UpdateAuctionRequest};
use crate::bidding::PlaceBidCommand;
use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

// endregion: --- Imports

/// JSON 본문 파싱 실패를 InvalidInput 으로 변환
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

// region:    --- Account Handlers

/// 회원가입
pub async fn handle_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 회원가입 요청", "Handler");
    state.accounts.register(body(payload)?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// 로그인
pub async fn handle_signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 로그인 요청", "Handler");
    let token = state.accounts.authenticate(body(payload)?).await?;

    Ok(Json(SigninResponse {
        message: "Signin successful".to_string(),
        token,
    }))
}

// endregion: --- Account Handlers

// region:    --- Command Handlers

/// 경매 상품 생성
pub async fn handle_create_auction(
    State(state): State<AppState>,
    payload: Result<Json<CreateAuctionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 경매 상품 생성 요청", "Handler");
    let item = state.listings.create(body(payload)?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Auction item created successfully",
            "auctionItem": item,
        })),
    ))
}

/// 입찰
pub async fn handle_bid(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PlaceBidCommand>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 입찰 요청 id: {}", "Handler", id);
    let item = state.bids.place_bid(&id, body(payload)?).await?;

    Ok(Json(json!({
        "message": "Bid placed successfully",
        "auctionItem": item,
    })))
}

/// 경매 상품 수정
pub async fn handle_update_auction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAuctionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 경매 상품 수정 요청 id: {}", "Handler", id);
    let item = state.listings.update(&id, body(payload)?).await?;

    Ok(Json(json!({
        "message": "Auction item updated successfully",
        "auctionItem": item,
    })))
}

/// 경매 상품 삭제
pub async fn handle_delete_auction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 경매 상품 삭제 요청 id: {}", "Handler", id);
    state.listings.delete(&id).await?;

    Ok(Json(json!({ "message": "Auction item deleted successfully" })))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 경매 상품 조회
pub async fn handle_get_auctions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 모든 경매 상품 조회", "HandlerQuery");
    Ok(Json(state.listings.list().await?))
}

/// 경매 상품 조회
pub async fn handle_get_auction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 경매 상품 조회 id: {}", "HandlerQuery", id);
    Ok(Json(state.listings.get(&id).await?))
}

// endregion: --- Query Handlers
