/// 입찰 관련 커맨드 처리
/// 1. 입찰 검증 및 적용
/// 2. 종료 시각 경과 시 경매 종료
// region:    --- Imports
use crate::auction::fields::parse_number;
use crate::auction::listing::{find_item, not_found, parse_id};
use crate::auction::model::{AuctionItem, AuctionStatus};
use crate::bidding::locks::ListingLocks;
use crate::error::AppError;
use crate::store::AuctionStore;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidCommand {
    pub bid_amount: Option<Value>,
    pub bidder_name: Option<Value>,
}

/// 입찰 처리기
pub struct BidProcessor {
    items: Arc<dyn AuctionStore>,
    locks: ListingLocks,
}

impl BidProcessor {
    pub fn new(items: Arc<dyn AuctionStore>) -> Self {
        Self {
            items,
            locks: ListingLocks::new(),
        }
    }

    /// 1. 입찰
    pub async fn place_bid(
        &self,
        listing_id: &str,
        cmd: PlaceBidCommand,
    ) -> Result<AuctionItem, AppError> {
        info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);
        let id = parse_id(listing_id)?;

        // 같은 상품의 조회-비교-저장 구간 직렬화
        let _guard = self.locks.lock(id).await;

        let mut item = find_item(self.items.as_ref(), id).await?;
        apply_bid(&mut item, &cmd, Utc::now())?;

        if !self.items.update_bid(&item).await? {
            return Err(not_found());
        }

        if item.is_closed {
            info!(
                "{:<12} --> 경매 종료 id: {}, 낙찰가: {}",
                "Command", item.id, item.highest_bid
            );
        }
        Ok(item)
    }
}

/// 입찰 적용 (상태 전이)
///
/// 종료 여부 확인 -> 금액 해석 -> 최고가 비교 -> 반영 -> 종료 시각 확인 순서.
/// 종료 시각이 지난 뒤 들어온 입찰도 최종 최고가로 반영된 후 경매가 닫힌다.
pub fn apply_bid(
    item: &mut AuctionItem,
    cmd: &PlaceBidCommand,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if item.status() == AuctionStatus::Closed {
        return Err(AppError::AuctionClosed);
    }

    let bid_amount = cmd
        .bid_amount
        .as_ref()
        .and_then(parse_number)
        .ok_or_else(|| AppError::InvalidInput("Invalid bid amount".to_string()))?;

    // 동일 금액도 거절
    if bid_amount <= item.highest_bid {
        return Err(AppError::BidTooLow {
            highest_bid: item.highest_bid,
        });
    }

    item.highest_bid = bid_amount;
    item.highest_bidder = bidder_label(cmd.bidder_name.as_ref());

    if item.is_expired_at(now) {
        item.is_closed = true;
    }
    Ok(())
}

/// 입찰자 이름. 문자열이 아니면 JSON 표기를 그대로 쓴다
fn bidder_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// endregion: --- Commands

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::model::NewAuctionItem;
    use crate::store::MemoryAuctionStore;
    use chrono::Duration;
    use serde_json::json;
    use uuid::Uuid;

    fn item_ending_at(end: DateTime<Utc>) -> AuctionItem {
        AuctionItem::new(NewAuctionItem {
            title: "Vintage Camera".to_string(),
            description: "Leica M3".to_string(),
            starting_bid: 10.0,
            auction_end_time: end,
        })
    }

    fn bid(amount: Value, bidder: &str) -> PlaceBidCommand {
        PlaceBidCommand {
            bid_amount: Some(amount),
            bidder_name: Some(json!(bidder)),
        }
    }

    #[test]
    fn higher_bids_replace_and_ties_are_rejected() {
        let now = Utc::now();
        let mut item = item_ending_at(now + Duration::hours(1));

        apply_bid(&mut item, &bid(json!(50), "alice"), now).unwrap();
        assert_eq!(item.highest_bid, 50.0);
        assert_eq!(item.highest_bidder, "alice");

        let err = apply_bid(&mut item, &bid(json!(30), "bob"), now).unwrap_err();
        assert!(matches!(err, AppError::BidTooLow { highest_bid } if highest_bid == 50.0));

        let err = apply_bid(&mut item, &bid(json!(50), "bob"), now).unwrap_err();
        assert!(matches!(err, AppError::BidTooLow { .. }));
        assert_eq!(item.highest_bidder, "alice");

        apply_bid(&mut item, &bid(json!("60"), "carol"), now).unwrap();
        assert_eq!(item.highest_bid, 60.0);
        assert_eq!(item.highest_bidder, "carol");
        assert!(!item.is_closed);
    }

    #[test]
    fn bid_below_starting_bid_is_accepted_above_zero() {
        let now = Utc::now();
        let mut item = item_ending_at(now + Duration::hours(1));
        apply_bid(&mut item, &bid(json!(1), "alice"), now).unwrap();
        assert_eq!(item.highest_bid, 1.0);
    }

    #[test]
    fn non_numeric_bid_is_invalid_input() {
        let now = Utc::now();
        let mut item = item_ending_at(now + Duration::hours(1));
        for amount in [json!("lots"), json!(null), json!(true), json!("Infinity")] {
            let err = apply_bid(&mut item, &bid(amount, "alice"), now).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
        let err = apply_bid(&mut item, &PlaceBidCommand::default(), now).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(item.highest_bid, 0.0);
    }

    #[test]
    fn non_string_bidder_name_is_recorded_as_text() {
        let now = Utc::now();
        let mut item = item_ending_at(now + Duration::hours(1));

        let cmd = PlaceBidCommand {
            bid_amount: Some(json!(50)),
            bidder_name: Some(json!(7)),
        };
        apply_bid(&mut item, &cmd, now).unwrap();
        assert_eq!(item.highest_bidder, "7");

        let cmd = PlaceBidCommand {
            bid_amount: Some(json!(60)),
            bidder_name: Some(Value::Null),
        };
        apply_bid(&mut item, &cmd, now).unwrap();
        assert_eq!(item.highest_bidder, "");
    }

    #[test]
    fn late_bid_is_recorded_then_closes_auction() {
        let now = Utc::now();
        let mut item = item_ending_at(now - Duration::seconds(1));

        apply_bid(&mut item, &bid(json!(70), "dave"), now).unwrap();
        assert_eq!(item.highest_bid, 70.0);
        assert_eq!(item.highest_bidder, "dave");
        assert!(item.is_closed);
        assert_eq!(item.status(), AuctionStatus::Closed);
    }

    #[test]
    fn closed_auction_rejects_any_bid() {
        let now = Utc::now();
        let mut item = item_ending_at(now + Duration::hours(1));
        item.is_closed = true;

        for amount in [json!(1_000_000), json!("abc"), json!(0)] {
            let err = apply_bid(&mut item, &bid(amount, "eve"), now).unwrap_err();
            assert!(matches!(err, AppError::AuctionClosed));
        }
        assert_eq!(item.highest_bid, 0.0);
    }

    #[test]
    fn bid_at_exact_end_time_keeps_auction_open() {
        let end = Utc::now();
        let mut item = item_ending_at(end);
        apply_bid(&mut item, &bid(json!(5), "alice"), end).unwrap();
        assert!(!item.is_closed);
    }

    #[tokio::test]
    async fn place_bid_persists_result() {
        let store = Arc::new(MemoryAuctionStore::new());
        let item = item_ending_at(Utc::now() + Duration::hours(1));
        store.insert(&item).await.unwrap();
        let processor = BidProcessor::new(store.clone());

        let updated = processor
            .place_bid(&item.id.to_string(), bid(json!(50), "alice"))
            .await
            .unwrap();
        assert_eq!(updated.highest_bid, 50.0);

        let stored = store.find(item.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn place_bid_validates_id_before_lookup() {
        let processor = BidProcessor::new(Arc::new(MemoryAuctionStore::new()));

        let err = processor
            .place_bid("123", bid(json!(10), "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = processor
            .place_bid(&Uuid::new_v4().to_string(), bid(json!("abc"), "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_bids_never_lose_the_highest() {
        let store = Arc::new(MemoryAuctionStore::new());
        let item = item_ending_at(Utc::now() + Duration::hours(1));
        store.insert(&item).await.unwrap();
        let processor = Arc::new(BidProcessor::new(store.clone()));

        let mut handles = vec![];
        for i in 1..=50 {
            let processor = Arc::clone(&processor);
            let id = item.id.to_string();
            handles.push(tokio::spawn(async move {
                processor
                    .place_bid(&id, bid(json!(i * 10), &format!("bidder-{}", i)))
                    .await
            }));
        }
        for handle in handles {
            let _ = handle.await.unwrap();
        }

        let stored = store.find(item.id).await.unwrap().unwrap();
        assert_eq!(stored.highest_bid, 500.0);
        assert_eq!(stored.highest_bidder, "bidder-50");
    }
}
// endregion: --- Tests
