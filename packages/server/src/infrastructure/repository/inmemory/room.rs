//! InMemory RoomRegistry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 接続表とルーム表を一つの `Mutex` で保護し、全ての操作を単一のクリティカル
//! セクションで実行します。これにより、ブロードキャスト中のスナップショットが
//! 並行する join / leave によって崩れることはなく、同一ルームへの配送順序は
//! ブロードキャストの処理順と一致します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ConnectionId, Member, Outbox, RegistryError, Room, RoomId, RoomRegistry,
    Timestamp,
};

/// 接続ごとの情報
struct ConnectionEntry {
    /// 送信チャンネル
    outbox: Outbox,
    /// 接続時刻（ログ用）
    connected_at: Timestamp,
    /// 現在参加しているルーム
    room_id: Option<RoomId>,
}

#[derive(Default)]
struct RegistryState {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    rooms: HashMap<RoomId, Room>,
}

impl RegistryState {
    /// 接続を現在のルームから外し、空になったルームを解放する
    fn detach(&mut self, connection_id: &ConnectionId) -> Option<RoomId> {
        let room_id = self.connections.get_mut(connection_id)?.room_id.take()?;
        if let Some(room) = self.rooms.get_mut(&room_id) {
            room.remove_member(connection_id);
            if room.is_empty() {
                self.rooms.remove(&room_id);
                tracing::debug!("Room '{}' is empty and has been deallocated", room_id);
            }
        }
        Some(room_id)
    }

    /// ルームの現在のメンバー（参加順）
    fn snapshot(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(Room::member_ids)
            .unwrap_or_default()
    }
}

/// インメモリ RoomRegistry 実装
///
/// ドメイン層の RoomRegistry trait を実装します（依存性の逆転）。
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn register(&self, connection_id: ConnectionId, outbox: Outbox, connected_at: Timestamp) {
        let mut state = self.state.lock().await;
        state.connections.insert(
            connection_id,
            ConnectionEntry {
                outbox,
                connected_at,
                room_id: None,
            },
        );
    }

    async fn join(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        joined_at: Timestamp,
    ) -> Result<Option<RoomId>, RegistryError> {
        let mut state = self.state.lock().await;

        let current = state
            .connections
            .get(connection_id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(connection_id.to_string()))?
            .room_id
            .clone();

        // 同じルームへの再参加は何もしない
        if current.as_ref() == Some(&room_id) {
            return Ok(None);
        }

        let previous = state.detach(connection_id);

        state
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone(), joined_at))
            .add_member(Member::new(*connection_id, joined_at));

        if let Some(entry) = state.connections.get_mut(connection_id) {
            entry.room_id = Some(room_id);
        }

        Ok(previous)
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Result<Option<RoomId>, RegistryError> {
        let mut state = self.state.lock().await;
        let left = state.detach(connection_id);
        let entry = state
            .connections
            .remove(connection_id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(connection_id.to_string()))?;
        tracing::debug!(
            "Connection '{}' removed (connected at {})",
            connection_id,
            entry.connected_at
        );
        Ok(left)
    }

    async fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state.snapshot(room_id)
    }

    async fn broadcast(&self, room_id: &RoomId, message: &ChatMessage) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        let members = state.snapshot(room_id);

        let mut delivered = Vec::with_capacity(members.len());
        for connection_id in members {
            let Some(entry) = state.connections.get(&connection_id) else {
                continue;
            };
            if entry.outbox.send(message.clone()).is_err() {
                // 切断処理中の接続: 再送はしない
                tracing::warn!("Failed to deliver message to connection '{}'", connection_id);
                continue;
            }
            delivered.push(connection_id);
        }
        delivered
    }

    async fn find_room(&self, room_id: &RoomId) -> Option<Room> {
        let state = self.state.lock().await;
        state.rooms.get(room_id).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let state = self.state.lock().await;
        let mut rooms: Vec<Room> = state.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        rooms
    }

    async fn connection_count(&self) -> usize {
        let state = self.state.lock().await;
        state.connections.len()
    }
}
