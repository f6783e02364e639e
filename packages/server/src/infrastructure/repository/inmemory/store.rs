//! InMemory Room Store 実装
//!
//! ドメイン層が定義する RoomStore trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! トランザクションはストア全体のロックを保持したまま実行され、
//! commit 時にステージした書き込みをまとめて反映します。
//! ロックを保持している間、他の操作は待たされます（直列化）。

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Client, ClientId, Room, RoomName, RoomStore, StoreError, StoreTransaction};

#[derive(Debug, Default)]
struct StoreState {
    rooms: HashMap<RoomName, Room>,
    /// Clients grouped by their parent room
    clients: HashMap<RoomName, BTreeMap<ClientId, Client>>,
}

/// インメモリ Room Store 実装
///
/// Clone するとストレージを共有するハンドルが得られます。
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryRoomStore {
    /// 新しい空の InMemoryRoomStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 永続化されているルーム数
    pub async fn room_count(&self) -> usize {
        self.state.lock().await.rooms.len()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn get_room(&self, name: &RoomName) -> Result<Option<Room>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rooms.get(name).cloned())
    }

    async fn put_room(&self, room: &Room) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.rooms.insert(room.name.clone(), room.clone());
        Ok(())
    }

    async fn put_client(&self, client: &Client) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state
            .clients
            .entry(client.room.clone())
            .or_default()
            .insert(client.client_id.clone(), client.clone());
        Ok(())
    }

    async fn delete_client(
        &self,
        room: &RoomName,
        client_id: &ClientId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if let Some(members) = state.clients.get_mut(room) {
            members.remove(client_id);
        }
        Ok(())
    }

    async fn query_clients(&self, room: &RoomName) -> Result<Vec<Client>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .clients
            .get(room)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(InMemoryTransaction {
            guard,
            staged_rooms: Vec::new(),
        }))
    }
}

/// Transaction holding the store lock until commit or drop.
struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    staged_rooms: Vec<Room>,
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn get_room(&mut self, name: &RoomName) -> Result<Option<Room>, StoreError> {
        // Read-your-writes within the transaction.
        if let Some(room) = self.staged_rooms.iter().rev().find(|r| &r.name == name) {
            return Ok(Some(room.clone()));
        }
        Ok(self.guard.rooms.get(name).cloned())
    }

    fn put_room(&mut self, room: Room) {
        self.staged_rooms.push(room);
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemoryTransaction {
            mut guard,
            staged_rooms,
        } = *self;
        for room in staged_rooms {
            guard.rooms.insert(room.name.clone(), room);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomStore の基本的な CRUD 操作
    // - クライアントが親ルームのスコープで管理されること
    // - トランザクションの commit / 破棄の挙動
    //
    // 【なぜこのテストが必要か】
    // - ルームの get-or-create はトランザクションの原子性に依存する
    // - ブロードキャストのメンバー解決は query_clients の正しさに依存する
    // ========================================

    fn room_name(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    fn client(id: &str, room: &str) -> Client {
        Client::new(
            ClientId::new(id.to_string()).unwrap(),
            room_name(room),
            Timestamp::new(1000),
        )
    }

    #[tokio::test]
    async fn test_get_missing_room_returns_none() {
        // テスト項目: 存在しないルームの取得は None を返す
        // given (前提条件):
        let store = InMemoryRoomStore::new();

        // when (操作):
        let result = store.get_room(&room_name("lobby")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_put_then_get_room() {
        // テスト項目: 保存したルームを取得できる
        // given (前提条件):
        let store = InMemoryRoomStore::new();
        let room = Room::new(room_name("lobby"), Timestamp::new(0));

        // when (操作):
        store.put_room(&room).await.unwrap();

        // then (期待する結果):
        assert_eq!(store.get_room(&room_name("lobby")).await, Ok(Some(room)));
    }

    #[tokio::test]
    async fn test_query_clients_is_scoped_by_room() {
        // テスト項目: query_clients は指定ルームのクライアントのみ返す
        // given (前提条件):
        let store = InMemoryRoomStore::new();
        store.put_client(&client("alice", "lobby")).await.unwrap();
        store.put_client(&client("bob", "lobby")).await.unwrap();
        store.put_client(&client("carol", "kitchen")).await.unwrap();

        // when (操作):
        let members = store.query_clients(&room_name("lobby")).await.unwrap();

        // then (期待する結果):
        let ids: Vec<&str> = members.iter().map(|c| c.client_id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn test_put_client_twice_keeps_one_record() {
        // テスト項目: 同じクライアント ID の再登録はレコードを上書きする
        // given (前提条件):
        let store = InMemoryRoomStore::new();

        // when (操作):
        store.put_client(&client("alice", "lobby")).await.unwrap();
        store.put_client(&client("alice", "lobby")).await.unwrap();

        // then (期待する結果):
        assert_eq!(store.query_clients(&room_name("lobby")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_client_is_idempotent() {
        // テスト項目: クライアント削除は冪等
        // given (前提条件):
        let store = InMemoryRoomStore::new();
        store.put_client(&client("alice", "lobby")).await.unwrap();
        let alice = ClientId::new("alice".to_string()).unwrap();

        // when (操作):
        let first = store.delete_client(&room_name("lobby"), &alice).await;
        let second = store.delete_client(&room_name("lobby"), &alice).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert!(second.is_ok());
        assert!(store.query_clients(&room_name("lobby")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transaction_commit_applies_writes() {
        // テスト項目: commit するとステージした書き込みが反映される
        // given (前提条件):
        let store = InMemoryRoomStore::new();
        let room = Room::new(room_name("lobby"), Timestamp::new(0));

        // when (操作):
        let mut tx = store.begin().await.unwrap();
        tx.put_room(room.clone());
        assert_eq!(tx.get_room(&room_name("lobby")).await, Ok(Some(room.clone())));
        tx.commit().await.unwrap();

        // then (期待する結果):
        assert_eq!(store.get_room(&room_name("lobby")).await, Ok(Some(room)));
    }

    #[tokio::test]
    async fn test_transaction_dropped_discards_writes() {
        // テスト項目: commit せずに破棄したトランザクションは何も反映しない
        // given (前提条件):
        let store = InMemoryRoomStore::new();

        // when (操作):
        {
            let mut tx = store.begin().await.unwrap();
            tx.put_room(Room::new(room_name("lobby"), Timestamp::new(0)));
        }

        // then (期待する結果):
        assert_eq!(store.get_room(&room_name("lobby")).await, Ok(None));
        assert_eq!(store.room_count().await, 0);
    }
}
