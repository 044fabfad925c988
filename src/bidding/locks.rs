// region:    --- Imports
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Listing Locks
/// 경매 상품별 입찰 직렬화용 락 테이블
/// 같은 상품의 조회-비교-저장 구간을 한 번에 하나만 실행한다
#[derive(Default)]
pub struct ListingLocks {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl ListingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 상품 락 획득. 가드가 drop 되면 해제된다
    pub async fn lock(&self, id: Uuid) -> ListingGuard<'_> {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };
        let guard = mutex.lock_owned().await;
        ListingGuard {
            owner: self,
            id,
            guard: Some(guard),
        }
    }

    /// 대기자가 없는 락 항목 정리
    fn prune(&self, id: Uuid) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(&id).is_some_and(|m| Arc::strong_count(m) == 1) {
            locks.remove(&id);
        }
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ListingGuard<'a> {
    owner: &'a ListingLocks,
    id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ListingGuard<'_> {
    fn drop(&mut self) {
        // 가드를 먼저 놓아야 참조 카운트가 정확하다
        self.guard.take();
        self.owner.prune(self.id);
    }
}

// endregion: --- Listing Locks

// endregion: --- Tests
