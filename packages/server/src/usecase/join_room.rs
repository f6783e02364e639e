//! UseCase: ルームへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 副作用の順序：クライアント永続化 → キャッシュ無効化 → チャンネル作成
//!
//! ### なぜこのテストが必要か
//! - 永続化に失敗した場合、キャッシュ無効化・チャンネル作成が行われないことを保証
//! - 無効化の失敗が（ベースラインでは）参加を失敗させないことを保証
//! - チャンネル作成に失敗してもクライアントレコードが残ることを保証（ロールバックしない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加してトークンを受け取る
//! - 異常系：永続化失敗、無効化失敗、チャンネル作成失敗
//! - 強化設定：strict_invalidation、compensate_failed_join

use std::sync::Arc;

use crate::{
    config::RoomManagerConfig,
    domain::{
        CacheError, Client, ClientId, DeliveryChannel, DeliveryToken, MembershipCache,
        MembershipVersionFactory, Room, RoomStore, Timestamp, membership_version_key,
        snapshot_key,
    },
};

use super::error::JoinError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    store: Arc<dyn RoomStore>,
    cache: Arc<dyn MembershipCache>,
    channel: Arc<dyn DeliveryChannel>,
    config: RoomManagerConfig,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 参加先の既存ルーム
    /// * `client_id` - 参加するクライアントの ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryToken)` - 参加者がチャンネルに接続するためのトークン
    /// * `Err(JoinError)` - 参加失敗
    pub async fn execute(
        &self,
        room: &Room,
        client_id: ClientId,
    ) -> Result<DeliveryToken, JoinError> {
        // 1. クライアントレコードをルーム配下に永続化
        let client = Client::new(client_id, room.key().clone(), Timestamp::now());
        self.store.put_client(&client).await?;
        tracing::info!("Client '{}' joined room '{}'", client.client_id, room.name);

        // 2. 永続化が成功した後にのみキャッシュを無効化
        if let Err(e) = self.invalidate(room).await {
            if self.config.strict_invalidation {
                return Err(JoinError::Invalidation(e));
            }
            tracing::warn!(
                "Failed to invalidate membership snapshot for room '{}': {}",
                room.name,
                e
            );
        }

        // 3. チャンネルを作成してトークンを返す
        match self.channel.create(&client.client_id).await {
            Ok(token) => Ok(token),
            Err(e) => {
                tracing::warn!(
                    "Failed to create delivery channel for '{}' in room '{}': {}",
                    client.client_id,
                    room.name,
                    e
                );
                if self.config.compensate_failed_join {
                    self.compensate(room, &client).await;
                }
                Err(JoinError::Channel(e))
            }
        }
    }

    /// キャッシュ上のメンバースナップショットを無効化する
    ///
    /// ベースラインでは 1 回だけ試行し、strict モードでは設定回数まで再試行する。
    async fn invalidate(&self, room: &Room) -> Result<(), CacheError> {
        let attempts = self.config.effective_invalidation_attempts();
        let mut last_error = None;
        for attempt in 1..=attempts {
            match self.invalidate_once(room).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(
                        "Invalidation attempt {}/{} for room '{}' failed: {}",
                        attempt,
                        attempts,
                        room.name,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| CacheError::Backend("no attempt made".to_string())))
    }

    /// 版を更新してからスナップショットを削除する
    ///
    /// 版の更新により、並行するブロードキャストが削除後に書き戻した
    /// 古いスナップショットも無効になる。版の更新に失敗しても削除は行う。
    async fn invalidate_once(&self, room: &Room) -> Result<(), CacheError> {
        let version = MembershipVersionFactory::generate();
        let stamped = self
            .cache
            .set(
                &membership_version_key(room.key()),
                version.into_string(),
                self.config.version_ttl,
            )
            .await;
        let deleted = self.cache.delete(snapshot_key(room.key())).await;
        stamped.and(deleted)
    }

    /// チャンネル作成に失敗した参加を取り消す
    async fn compensate(&self, room: &Room, client: &Client) {
        if let Err(e) = self.store.delete_client(&client.room, &client.client_id).await {
            tracing::warn!(
                "Failed to remove client '{}' after channel failure: {}",
                client.client_id,
                e
            );
            return;
        }
        if let Err(e) = self.invalidate(room).await {
            tracing::warn!(
                "Failed to invalidate membership snapshot for room '{}' after compensation: {}",
                room.name,
                e
            );
        }
    }
}
