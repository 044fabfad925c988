// region:    --- Imports
use crate::account::{AccountService, TokenIssuer};
use crate::auction::{ListingService, UpdateMode};
use crate::bidding::BidProcessor;
use crate::error::AppError;
use crate::handlers;
use crate::store::{AuctionStore, UserStore};
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- App State
/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub listings: Arc<ListingService>,
    pub bids: Arc<BidProcessor>,
    pub tokens: TokenIssuer,
    pub require_auth: bool,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        items: Arc<dyn AuctionStore>,
        jwt_secret: &str,
        update_mode: UpdateMode,
        require_auth: bool,
    ) -> Self {
        let tokens = TokenIssuer::new(jwt_secret);
        Self {
            accounts: Arc::new(AccountService::new(users, tokens.clone())),
            listings: Arc::new(ListingService::new(Arc::clone(&items), update_mode)),
            bids: Arc::new(BidProcessor::new(items)),
            tokens,
            require_auth,
        }
    }
}

// endregion: --- App State

// region:    --- Router
/// 전체 라우터 구성
pub fn create_router(state: AppState) -> Router {
    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut listing_writes = Router::new()
        .route("/auction", post(handlers::handle_create_auction))
        .route(
            "/auction/:id",
            put(handlers::handle_update_auction).delete(handlers::handle_delete_auction),
        )
        .route("/bid/:id", post(handlers::handle_bid));

    if state.require_auth {
        info!("{:<12} --> 경매 변경 요청에 토큰 검증 적용", "Router");
        listing_writes = listing_writes
            .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));
    }

    Router::new()
        .route("/signup", post(handlers::handle_signup))
        .route("/signin", post(handlers::handle_signin))
        .route("/auctions", get(handlers::handle_get_auctions))
        .route("/auctions/:id", get(handlers::handle_get_auction))
        .merge(listing_writes)
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}

/// 베어러 토큰 검증 미들웨어
async fn require_bearer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return AppError::Unauthorized("Missing bearer token".to_string()).into_response();
    };

    match state.tokens.verify(token) {
        Ok(_) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

// endregion: --- Router

// endregion: --- Tests
