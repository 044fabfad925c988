/// 경매 상품 CRUD
/// 1. 생성
/// 2. 조회 / 전체 조회
/// 3. 수정
/// 4. 삭제
// region:    --- Imports
use crate::auction::fields::{is_falsy, parse_number, parse_text, parse_timestamp};
use crate::auction::model::{AuctionItem, NewAuctionItem};
use crate::error::AppError;
use crate::store::AuctionStore;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Requests
/// 경매 상품 생성 요청
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuctionRequest {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub starting_bid: Option<Value>,
    pub auction_end_time: Option<Value>,
}

/// 경매 상품 수정 요청 (부분 필드)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuctionRequest {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub starting_bid: Option<Value>,
    pub auction_end_time: Option<Value>,
}

/// 수정 요청에서 "값 없음"을 판단하는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// null, 0, "", false 모두 값 없음으로 취급 (기존 API 동작)
    #[default]
    Compat,
    /// 누락 또는 null 만 값 없음으로 취급
    Strict,
}

// endregion: --- Requests

// region:    --- Listing Service
pub struct ListingService {
    items: Arc<dyn AuctionStore>,
    update_mode: UpdateMode,
}

impl ListingService {
    pub fn new(items: Arc<dyn AuctionStore>, update_mode: UpdateMode) -> Self {
        Self { items, update_mode }
    }

    /// 1. 생성
    pub async fn create(&self, request: CreateAuctionRequest) -> Result<AuctionItem, AppError> {
        let new_item = NewAuctionItem {
            title: required(request.title, "title", parse_text)?,
            description: required(request.description, "description", parse_text)?,
            starting_bid: required(request.starting_bid, "startingBid", parse_number)?,
            auction_end_time: required(request.auction_end_time, "auctionEndTime", parse_timestamp)?,
        };

        let item = AuctionItem::new(new_item);
        self.items.insert(&item).await?;
        info!("{:<12} --> 경매 상품 생성 id: {}", "Listing", item.id);
        Ok(item)
    }

    /// 2. 조회
    pub async fn get(&self, id: &str) -> Result<AuctionItem, AppError> {
        let id = parse_id(id)?;
        find_item(self.items.as_ref(), id).await
    }

    /// 2. 전체 조회
    pub async fn list(&self) -> Result<Vec<AuctionItem>, AppError> {
        Ok(self.items.find_all().await?)
    }

    /// 3. 수정
    pub async fn update(
        &self,
        id: &str,
        request: UpdateAuctionRequest,
    ) -> Result<AuctionItem, AppError> {
        let id = parse_id(id)?;
        let mut item = find_item(self.items.as_ref(), id).await?;

        apply_update(&mut item, request, self.update_mode)?;

        // 입찰 상태는 입찰 처리기만 쓴다. 응답에는 최신 입찰 상태를 다시 읽어 싣는다
        if !self.items.update_details(&item).await? {
            return Err(not_found());
        }
        info!("{:<12} --> 경매 상품 수정 id: {}", "Listing", id);
        find_item(self.items.as_ref(), id).await
    }

    /// 4. 삭제
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if !self.items.delete(id).await? {
            return Err(not_found());
        }
        info!("{:<12} --> 경매 상품 삭제 id: {}", "Listing", id);
        Ok(())
    }
}

// endregion: --- Listing Service

// region:    --- Helpers
/// 경매 상품 식별자 검증
pub fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidInput("Invalid auction item ID".to_string()))
}

pub fn not_found() -> AppError {
    AppError::NotFound("Auction item not found".to_string())
}

pub async fn find_item(items: &dyn AuctionStore, id: Uuid) -> Result<AuctionItem, AppError> {
    items.find(id).await?.ok_or_else(not_found)
}

/// 필수 필드 해석. 누락, null, 빈 문자열은 누락으로 본다
fn required<T>(
    value: Option<Value>,
    field: &str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Result<T, AppError> {
    let value = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => Some(v),
    }
    .ok_or_else(|| AppError::InvalidInput(format!("{} is required", field)))?;

    parse(&value).ok_or_else(|| AppError::InvalidInput(format!("{} is invalid", field)))
}

/// 수정 모드에 따라 실제로 제공된 값만 남긴다
fn provided(value: Option<Value>, mode: UpdateMode) -> Option<Value> {
    let value = value?;
    let absent = match mode {
        UpdateMode::Compat => is_falsy(&value),
        UpdateMode::Strict => value.is_null(),
    };
    (!absent).then_some(value)
}

fn optional<T>(
    value: Option<Value>,
    field: &str,
    mode: UpdateMode,
    parse: impl Fn(&Value) -> Option<T>,
) -> Result<Option<T>, AppError> {
    provided(value, mode)
        .map(|v| parse(&v).ok_or_else(|| AppError::InvalidInput(format!("{} is invalid", field))))
        .transpose()
}

/// 수정 요청 적용. 입찰 상태(최고가, 입찰자, 종료 여부)는 건드리지 않는다
fn apply_update(
    item: &mut AuctionItem,
    request: UpdateAuctionRequest,
    mode: UpdateMode,
) -> Result<(), AppError> {
    let title = optional(request.title, "title", mode, parse_text)?;
    let description = optional(request.description, "description", mode, parse_text)?;
    let starting_bid = optional(request.starting_bid, "startingBid", mode, parse_number)?;
    let auction_end_time =
        optional(request.auction_end_time, "auctionEndTime", mode, parse_timestamp)?;

    // 모든 필드 검증 후 한 번에 반영
    if let Some(title) = title {
        item.title = title;
    }
    if let Some(description) = description {
        item.description = description;
    }
    if let Some(starting_bid) = starting_bid {
        item.starting_bid = starting_bid;
    }
    if let Some(auction_end_time) = auction_end_time {
        item.auction_end_time = auction_end_time;
    }
    Ok(())
}

// endregion: --- Helpers

// endregion: --- Tests
