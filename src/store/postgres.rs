// region:    --- Imports
use super::{queries, AuctionStore, StoreError, UserStore};
use crate::account::model::User;
use crate::auction::model::AuctionItem;
use crate::database::DatabaseManager;
use async_trait::async_trait;
use sqlx::Row;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Helpers
/// 유니크 제약 위반을 `StoreError::Duplicate` 로 변환
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(c) if c.contains("email") => "email",
                Some(c) if c.contains("username") => "username",
                _ => "unique field",
            };
            return StoreError::Duplicate(field.to_string());
        }
    }
    StoreError::Database(err)
}

// endregion: --- Helpers

// region:    --- User Store
/// Postgres 사용자 저장소
pub struct PgUserStore {
    db_manager: Arc<DatabaseManager>,
}

impl PgUserStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        info!("{:<12} --> 사용자 저장 id: {}", "Store", user.id);
        let user = user.clone();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query(queries::INSERT_USER)
                        .bind(user.id)
                        .bind(&user.username)
                        .bind(&user.email)
                        .bind(&user.password_hash)
                        .bind(user.created_at)
                        .execute(&mut **tx)
                        .await
                        .map_err(map_unique_violation)?;
                    Ok::<_, StoreError>(())
                })
            })
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(queries::GET_USER_BY_EMAIL)
            .bind(email)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(user)
    }

    async fn exists(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(queries::USER_EXISTS)
            .bind(username)
            .bind(email)
            .fetch_one(self.db_manager.pool())
            .await?;
        Ok(row.get("found"))
    }
}

// endregion: --- User Store

// region:    --- Auction Store
/// Postgres 경매 상품 저장소
pub struct PgAuctionStore {
    db_manager: Arc<DatabaseManager>,
}

impl PgAuctionStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl AuctionStore for PgAuctionStore {
    async fn insert(&self, item: &AuctionItem) -> Result<(), StoreError> {
        info!("{:<12} --> 경매 상품 저장 id: {}", "Store", item.id);
        let item = item.clone();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query(queries::INSERT_ITEM)
                        .bind(item.id)
                        .bind(&item.title)
                        .bind(&item.description)
                        .bind(item.starting_bid)
                        .bind(item.auction_end_time)
                        .bind(item.highest_bid)
                        .bind(&item.highest_bidder)
                        .bind(item.is_closed)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, StoreError>(())
                })
            })
            .await
    }

    async fn find(&self, id: Uuid) -> Result<Option<AuctionItem>, StoreError> {
        let item = sqlx::query_as::<_, AuctionItem>(queries::GET_ITEM)
            .bind(id)
            .fetch_optional(self.db_manager.pool())
            .await?;
        Ok(item)
    }

    async fn find_all(&self) -> Result<Vec<AuctionItem>, StoreError> {
        let items = sqlx::query_as::<_, AuctionItem>(queries::GET_ALL_ITEMS)
            .fetch_all(self.db_manager.pool())
            .await?;
        Ok(items)
    }

    async fn update_details(&self, item: &AuctionItem) -> Result<bool, StoreError> {
        info!("{:<12} --> 경매 상품 정보 갱신 id: {}", "Store", item.id);
        let item = item.clone();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let result = sqlx::query(queries::UPDATE_ITEM_DETAILS)
                        .bind(item.id)
                        .bind(&item.title)
                        .bind(&item.description)
                        .bind(item.starting_bid)
                        .bind(item.auction_end_time)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, StoreError>(result.rows_affected() > 0)
                })
            })
            .await
    }

    async fn update_bid(&self, item: &AuctionItem) -> Result<bool, StoreError> {
        info!("{:<12} --> 입찰 상태 갱신 id: {}", "Store", item.id);
        let item = item.clone();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let result = sqlx::query(queries::UPDATE_ITEM_BID)
                        .bind(item.id)
                        .bind(item.highest_bid)
                        .bind(&item.highest_bidder)
                        .bind(item.is_closed)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, StoreError>(result.rows_affected() > 0)
                })
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        info!("{:<12} --> 경매 상품 삭제 id: {}", "Store", id);
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let result = sqlx::query(queries::DELETE_ITEM)
                        .bind(id)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, StoreError>(result.rows_affected() > 0)
                })
            })
            .await
    }
}

// endregion: --- Auction Store
