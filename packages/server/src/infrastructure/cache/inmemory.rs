//! InMemory Membership Cache 実装
//!
//! HashMap に文字列値と有効期限を保持します。
//! 期限切れのエントリは読み出し時に削除され、ミスとして扱われます。
//! 書き込みのたびに期限切れのエントリをまとめて破棄します。

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{sync::Mutex, time::Instant};

use crate::domain::{CacheError, MembershipCache};

#[derive(Debug)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// インメモリ Membership Cache 実装
///
/// Clone するとキャッシュを共有するハンドルが得られます。
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl InMemoryMembershipCache {
    /// 新しい空のキャッシュを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 有効なエントリが存在するか
    pub async fn contains(&self, key: &str) -> bool {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }

    /// 保持しているエントリ数（未回収の期限切れエントリを含む）
    pub async fn entry_count(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[async_trait]
impl MembershipCache for InMemoryMembershipCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let now = Instant::now();
        let expires_at = ttl.map(|ttl| now + ttl);
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }
}
