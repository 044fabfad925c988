use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 경매 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuctionItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub starting_bid: f64,
    pub auction_end_time: DateTime<Utc>,
    pub highest_bid: f64,
    pub highest_bidder: String,
    pub is_closed: bool,
}

// 신규 경매 상품 (검증 완료된 필드)
#[derive(Debug, Clone)]
pub struct NewAuctionItem {
    pub title: String,
    pub description: String,
    pub starting_bid: f64,
    pub auction_end_time: DateTime<Utc>,
}

/// 경매 상태: Open -> Closed 단방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    Open,
    Closed,
}

impl AuctionItem {
    /// 새 경매 상품 생성 (최고가 0, 입찰자 없음, 진행 중)
    pub fn new(new_item: NewAuctionItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new_item.title,
            description: new_item.description,
            starting_bid: new_item.starting_bid,
            auction_end_time: new_item.auction_end_time,
            highest_bid: 0.0,
            highest_bidder: String::new(),
            is_closed: false,
        }
    }

    pub fn status(&self) -> AuctionStatus {
        if self.is_closed {
            AuctionStatus::Closed
        } else {
            AuctionStatus::Open
        }
    }

    /// 종료 시각 경과 여부
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.auction_end_time
    }
}
