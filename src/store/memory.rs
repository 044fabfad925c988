//! 프로세스 메모리 저장소. 로컬 실행과 테스트용
// region:    --- Imports
use super::{AuctionStore, StoreError, UserStore};
use crate::account::model::User;
use crate::auction::model::AuctionItem;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- User Store
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate("username".to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn exists(&self, username: &str, email: &str) -> Result<bool, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .any(|u| u.username == username || u.email == email))
    }
}

// endregion: --- User Store

// region:    --- Auction Store
/// 삽입 순서를 유지하는 경매 상품 저장소
#[derive(Default)]
pub struct MemoryAuctionStore {
    items: RwLock<Vec<AuctionItem>>,
}

impl MemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuctionStore for MemoryAuctionStore {
    async fn insert(&self, item: &AuctionItem) -> Result<(), StoreError> {
        self.items.write().await.push(item.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<AuctionItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<AuctionItem>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn update_details(&self, item: &AuctionItem) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(stored) => {
                stored.title = item.title.clone();
                stored.description = item.description.clone();
                stored.starting_bid = item.starting_bid;
                stored.auction_end_time = item.auction_end_time;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_bid(&self, item: &AuctionItem) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(stored) => {
                stored.highest_bid = item.highest_bid;
                stored.highest_bidder = item.highest_bidder.clone();
                stored.is_closed = item.is_closed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() != before)
    }
}

// endregion: --- Auction Store

// endregion: --- Tests
