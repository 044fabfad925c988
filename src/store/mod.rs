/// 저장소 계층
/// 1. 사용자 저장소
/// 2. 경매 상품 저장소
// region:    --- Imports
use crate::account::model::User;
use crate::auction::model::AuctionItem;
use async_trait::async_trait;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;
mod queries;

pub use memory::{MemoryAuctionStore, MemoryUserStore};
pub use postgres::{PgAuctionStore, PgUserStore};

// endregion: --- Modules

// region:    --- Store Error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 유니크 제약 위반 (필드 이름)
    #[error("Duplicate value for {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// endregion: --- Store Error

// region:    --- Store Traits
/// 사용자 저장소 트레이트
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자 저장. username/email 중복 시 `StoreError::Duplicate`
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// username 또는 email 이 이미 존재하는지 확인
    async fn exists(&self, username: &str, email: &str) -> Result<bool, StoreError>;
}

/// 경매 상품 저장소 트레이트
#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn insert(&self, item: &AuctionItem) -> Result<(), StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<AuctionItem>, StoreError>;

    /// 생성 순서대로 전체 조회
    async fn find_all(&self) -> Result<Vec<AuctionItem>, StoreError>;

    /// 상품 정보(제목, 설명, 시작가, 종료 시각)만 갱신. 레코드가 없으면 false
    async fn update_details(&self, item: &AuctionItem) -> Result<bool, StoreError>;

    /// 입찰 상태(최고가, 입찰자, 종료 여부)만 갱신. 레코드가 없으면 false
    async fn update_bid(&self, item: &AuctionItem) -> Result<bool, StoreError>;

    /// 삭제. 레코드가 없으면 false
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

// endregion: --- Store Traits
