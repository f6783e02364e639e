//! UseCase: ルームへのブロードキャスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastMessageUseCase::execute() メソッド
//! - キャッシュアサイドによるメンバー解決と、メンバーごとに独立した配信
//!
//! ### なぜこのテストが必要か
//! - キャッシュヒット時にストアへ問い合わせないことを保証
//! - キャッシュミス時にストアから再読み込みし、キャッシュを再構築することを保証
//! - 参加によって版が進んだ古いスナップショットを使わないことを保証
//! - ミス以外のキャッシュエラーを空のルームとして扱わないことを保証
//! - 一部メンバーへの配信失敗がブロードキャスト全体を失敗させないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：キャッシュヒット、キャッシュミス
//! - 異常系：キャッシュ障害、破損スナップショット、ストア障害、キャッシュ書き込み失敗
//! - 部分失敗：一部メンバーへの送信エラー

use std::{collections::HashSet, sync::Arc};

use futures_util::stream::{self, StreamExt};

use crate::{
    config::RoomManagerConfig,
    domain::{
        ChannelError, Client, ClientId, DeliveryChannel, MembershipCache, MembershipVersion,
        MembershipVersionFactory, MessageContent, Room, RoomStore, membership_version_key,
        snapshot_key,
    },
    infrastructure::dto::membership::{decode_snapshot, encode_snapshot},
};

use super::error::BroadcastError;

/// Where a broadcast's membership list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipSource {
    /// Served from the membership cache
    Cache,
    /// Reloaded from the durable store after a miss
    Store,
}

/// A member the broadcast could not reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub client_id: ClientId,
    pub error: ChannelError,
}

/// Outcome of a completed broadcast.
///
/// Every member was attempted exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Where membership was resolved from
    pub source: MembershipSource,
    /// Members the message was handed to (sorted by client id)
    pub delivered: Vec<ClientId>,
    /// Members whose delivery failed (sorted by client id)
    pub failed: Vec<DeliveryFailure>,
}

impl BroadcastReport {
    /// Number of members a send was attempted for
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    /// Whether `client_id` was attempted
    pub fn was_attempted(&self, client_id: &ClientId) -> bool {
        self.delivered.contains(client_id) || self.failed.iter().any(|f| &f.client_id == client_id)
    }
}

/// ブロードキャストのユースケース
pub struct BroadcastMessageUseCase {
    store: Arc<dyn RoomStore>,
    cache: Arc<dyn MembershipCache>,
    channel: Arc<dyn DeliveryChannel>,
    config: RoomManagerConfig,
}

impl BroadcastMessageUseCase {
    /// 新しい BroadcastMessageUseCase を作成
    pub fn new(
        store: Arc<dyn RoomStore>,
        cache: Arc<dyn MembershipCache>,
        channel: Arc<dyn DeliveryChannel>,
        config: RoomManagerConfig,
    ) -> Self {
        Self {
            store,
            cache,
            channel,
            config,
        }
    }

    /// ブロードキャストを実行
    ///
    /// # Arguments
    ///
    /// * `room` - 対象ルーム
    /// * `message` - 配信するメッセージ（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 全メンバーへの配信を試行した結果
    /// * `Err(BroadcastError)` - メンバー解決に失敗（配信失敗ではエラーにならない）
    pub async fn execute(
        &self,
        room: &Room,
        message: &MessageContent,
    ) -> Result<BroadcastReport, BroadcastError> {
        let (members, source) = self.resolve_members(room).await?;
        let (delivered, failed) = self.fan_out(members, message).await;

        if !failed.is_empty() {
            tracing::warn!(
                "Broadcast to room '{}' reached {} of {} members",
                room.name,
                delivered.len(),
                delivered.len() + failed.len()
            );
        }

        Ok(BroadcastReport {
            source,
            delivered,
            failed,
        })
    }

    /// キャッシュアサイドでメンバー一覧を解決する
    async fn resolve_members(
        &self,
        room: &Room,
    ) -> Result<(Vec<Client>, MembershipSource), BroadcastError> {
        let key = snapshot_key(room.key());

        // 1. キャッシュを参照（ミス以外のエラーは中断）
        if let Some(raw) = self.cache.get(key).await? {
            let snapshot = decode_snapshot(room.key(), &raw)?;
            // 2. 現在の版と一致する場合のみヒットとして扱う
            if self.current_version(room).await?.as_ref() == Some(&snapshot.version) {
                tracing::debug!("Membership cache hit for room '{}'", room.name);
                return Ok((snapshot.clients, MembershipSource::Cache));
            }
            tracing::debug!("Discarding stale membership snapshot for room '{}'", room.name);
        } else {
            tracing::debug!("Membership cache miss for room '{}'", room.name);
        }

        // 3. ミス：版を確定してからストアを読み込み、キャッシュを再構築
        let version = self.version_for_reload(room).await?;
        let members = self.store.query_clients(room.key()).await?;

        let repopulated = match encode_snapshot(&version, &members) {
            Ok(raw) => self.cache.set(key, raw, self.config.snapshot_ttl).await,
            Err(e) => Err(e),
        };
        if let Err(e) = repopulated {
            tracing::warn!(
                "Failed to repopulate membership cache for room '{}': {}",
                room.name,
                e
            );
        }

        Ok((members, MembershipSource::Store))
    }

    async fn current_version(
        &self,
        room: &Room,
    ) -> Result<Option<MembershipVersion>, BroadcastError> {
        let raw = self.cache.get(&membership_version_key(room.key())).await?;
        Ok(raw.map(MembershipVersion::new))
    }

    /// 再読み込みするスナップショットに付ける版を決める
    ///
    /// 版が存在しなければ発行してから読み込む。発行できなかった場合、
    /// 書き込むスナップショットは以後ヒットしないだけで、配信は続行する。
    async fn version_for_reload(&self, room: &Room) -> Result<MembershipVersion, BroadcastError> {
        if let Some(version) = self.current_version(room).await? {
            return Ok(version);
        }
        let version = MembershipVersionFactory::generate();
        if let Err(e) = self
            .cache
            .set(
                &membership_version_key(room.key()),
                version.as_str().to_string(),
                self.config.version_ttl,
            )
            .await
        {
            tracing::warn!(
                "Failed to publish membership version for room '{}': {}",
                room.name,
                e
            );
        }
        Ok(version)
    }

    /// 全メンバーへ並行して送信し、全ての試行の完了を待つ
    ///
    /// 同時送信数は `fanout_concurrency` で制限される。
    async fn fan_out(
        &self,
        members: Vec<Client>,
        message: &MessageContent,
    ) -> (Vec<ClientId>, Vec<DeliveryFailure>) {
        // At most one attempt per member.
        let mut seen = HashSet::new();
        let recipients: Vec<ClientId> = members
            .into_iter()
            .map(|client| client.client_id)
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let text: Arc<str> = Arc::from(message.as_str());
        let outcomes: Vec<(ClientId, Result<(), ChannelError>)> = stream::iter(recipients)
            .map(|client_id| {
                let channel = Arc::clone(&self.channel);
                let text = Arc::clone(&text);
                async move {
                    let result = channel.send(&client_id, &text).await;
                    (client_id, result)
                }
            })
            .buffer_unordered(self.config.effective_fanout())
            .collect()
            .await;

        let mut delivered = Vec::new();
        let mut failed = Vec::new();
        for (client_id, result) in outcomes {
            match result {
                Ok(()) => delivered.push(client_id),
                Err(error) => {
                    tracing::warn!("Failed to deliver message to '{}': {}", client_id, error);
                    failed.push(DeliveryFailure { client_id, error });
                }
            }
        }
        delivered.sort();
        failed.sort_by(|a, b| a.client_id.cmp(&b.client_id));

        (delivered, failed)
    }
}
