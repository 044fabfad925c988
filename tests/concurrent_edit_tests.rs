use async_trait::async_trait;
use auction_marketplace::auction::listing::UpdateAuctionRequest;
use auction_marketplace::auction::model::{AuctionItem, NewAuctionItem};
use auction_marketplace::auction::{ListingService, UpdateMode};
use auction_marketplace::bidding::{BidProcessor, PlaceBidCommand};
use auction_marketplace::store::{AuctionStore, MemoryAuctionStore, StoreError};
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// 다음 한 번의 조회를 지연시키는 저장소
struct StallingStore {
    inner: MemoryAuctionStore,
    stall_next_find: AtomicBool,
}

impl StallingStore {
    fn new() -> Self {
        Self {
            inner: MemoryAuctionStore::new(),
            stall_next_find: AtomicBool::new(false),
        }
    }

    fn stall_next_find(&self) {
        self.stall_next_find.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuctionStore for StallingStore {
    async fn insert(&self, item: &AuctionItem) -> Result<(), StoreError> {
        self.inner.insert(item).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<AuctionItem>, StoreError> {
        let found = self.inner.find(id).await;
        if self.stall_next_find.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        found
    }

    async fn find_all(&self) -> Result<Vec<AuctionItem>, StoreError> {
        self.inner.find_all().await
    }

    async fn update_details(&self, item: &AuctionItem) -> Result<bool, StoreError> {
        self.inner.update_details(item).await
    }

    async fn update_bid(&self, item: &AuctionItem) -> Result<bool, StoreError> {
        self.inner.update_bid(item).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.inner.delete(id).await
    }
}

async fn setup(end_offset: Duration) -> (Arc<StallingStore>, ListingService, BidProcessor, Uuid) {
    let store = Arc::new(StallingStore::new());
    let item = AuctionItem::new(NewAuctionItem {
        title: "old".to_string(),
        description: "Leica M3".to_string(),
        starting_bid: 10.0,
        auction_end_time: Utc::now() + end_offset,
    });
    store.insert(&item).await.unwrap();

    let listings = ListingService::new(store.clone(), UpdateMode::Compat);
    let bids = BidProcessor::new(store.clone());
    (store, listings, bids, item.id)
}

fn rename(title: &str) -> UpdateAuctionRequest {
    UpdateAuctionRequest {
        title: Some(json!(title)),
        ..Default::default()
    }
}

fn bid(amount: i64, bidder: &str) -> PlaceBidCommand {
    PlaceBidCommand {
        bid_amount: Some(json!(amount)),
        bidder_name: Some(json!(bidder)),
    }
}

/// 수정이 조회 후 멈춘 사이 들어온 입찰이 되돌려지지 않는지 테스트
#[tokio::test]
async fn test_bid_during_slow_edit_survives() {
    let (store, listings, bids, id) = setup(Duration::seconds(-5)).await;
    let listings = Arc::new(listings);

    store.stall_next_find();
    let edit = {
        let listings = Arc::clone(&listings);
        let id = id.to_string();
        tokio::spawn(async move { listings.update(&id, rename("new")).await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let accepted = bids.place_bid(&id.to_string(), bid(50, "alice")).await.unwrap();
    assert!(accepted.is_closed);

    let edited = edit.await.unwrap().unwrap();
    assert_eq!(edited.title, "new");
    assert_eq!(edited.highest_bid, 50.0);

    let stored = store.find(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "new");
    assert_eq!(stored.highest_bid, 50.0);
    assert_eq!(stored.highest_bidder, "alice");
    assert!(stored.is_closed);

    // 닫힌 경매가 다시 열리지 않는다
    let err = bids.place_bid(&id.to_string(), bid(60, "bob")).await.unwrap_err();
    assert_eq!(err.to_string(), "Auction is closed");
}

/// 입찰이 조회 후 멈춘 사이 들어온 수정이 되돌려지지 않는지 테스트
#[tokio::test]
async fn test_edit_during_slow_bid_survives() {
    let (store, listings, bids, id) = setup(Duration::hours(1)).await;
    let bids = Arc::new(bids);

    store.stall_next_find();
    let placing = {
        let bids = Arc::clone(&bids);
        let id = id.to_string();
        tokio::spawn(async move { bids.place_bid(&id, bid(50, "alice")).await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    listings.update(&id.to_string(), rename("new")).await.unwrap();
    placing.await.unwrap().unwrap();

    let stored = store.find(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "new");
    assert_eq!(stored.highest_bid, 50.0);
    assert_eq!(stored.highest_bidder, "alice");
    assert!(!stored.is_closed);
}
