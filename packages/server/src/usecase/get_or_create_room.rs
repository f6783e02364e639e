//! UseCase: ルームの取得または作成
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetOrCreateRoomUseCase::execute() メソッド
//! - 単一トランザクション内での「取得 → なければ作成」
//!
//! ### なぜこのテストが必要か
//! - 同名のルームレコードが二重に作成されないことを保証
//! - 並行した初回参加者が同じルームを観測することを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規作成、既存ルームの取得
//! - 異常系：トランザクション開始・commit の失敗
//! - 並行系：同名ルームの同時作成

use std::sync::Arc;

use crate::domain::{Room, RoomName, RoomStore, StoreError, Timestamp};

/// ルーム取得・作成のユースケース
pub struct GetOrCreateRoomUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn RoomStore>,
}

impl GetOrCreateRoomUseCase {
    /// 新しい GetOrCreateRoomUseCase を作成
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    /// ルームを取得し、存在しなければ作成する
    ///
    /// # Arguments
    ///
    /// * `name` - ルーム名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 既存または新規作成されたルーム
    /// * `Err(StoreError)` - トランザクションが commit できなかった
    pub async fn execute(&self, name: RoomName) -> Result<Room, StoreError> {
        let mut tx = self.store.begin().await?;

        let (room, created) = match tx.get_room(&name).await? {
            Some(existing) => (existing, false),
            None => {
                let room = Room::new(name, Timestamp::now());
                tx.put_room(room.clone());
                (room, true)
            }
        };

        tx.commit().await?;

        if created {
            tracing::info!("Room '{}' created", room.name);
        } else {
            tracing::debug!("Room '{}' already exists", room.name);
        }

        Ok(room)
    }
}
