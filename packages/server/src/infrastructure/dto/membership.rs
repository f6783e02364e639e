//! Cache encoding of a room's membership snapshot.
//!
//! ```text
//! MembershipSnapshot (ドメイン) ⇄ MembershipSnapshotDto ⇄ JSON 文字列 (キャッシュ)
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{CacheError, Client, ClientId, MembershipVersion, RoomName, Timestamp};

/// A room's membership as loaded under a given version stamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSnapshot {
    pub version: MembershipVersion,
    pub clients: Vec<Client>,
}

/// One cached client record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSnapshotDto {
    pub client_id: String,
    pub room: String,
    /// Unix timestamp (milliseconds since epoch) in JST
    pub joined_at: i64,
}

/// Cached snapshot body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSnapshotDto {
    pub version: String,
    pub clients: Vec<ClientSnapshotDto>,
}

impl From<&Client> for ClientSnapshotDto {
    fn from(client: &Client) -> Self {
        Self {
            client_id: client.client_id.as_str().to_string(),
            room: client.room.as_str().to_string(),
            joined_at: client.joined_at.value(),
        }
    }
}

/// Serialize a membership list for the cache.
pub fn encode_snapshot(
    version: &MembershipVersion,
    clients: &[Client],
) -> Result<String, CacheError> {
    let dto = MembershipSnapshotDto {
        version: version.as_str().to_string(),
        clients: clients.iter().map(ClientSnapshotDto::from).collect(),
    };
    serde_json::to_string(&dto).map_err(|e| CacheError::Backend(e.to_string()))
}

/// Deserialize a cached membership snapshot for `room`.
///
/// Anything that does not decode into valid clients of `room` is reported as
/// [`CacheError::CorruptSnapshot`], never as an empty room.
pub fn decode_snapshot(room: &RoomName, raw: &str) -> Result<MembershipSnapshot, CacheError> {
    let corrupt = |reason: String| CacheError::CorruptSnapshot {
        room: room.as_str().to_string(),
        reason,
    };

    let dto: MembershipSnapshotDto =
        serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;

    let clients = dto
        .clients
        .into_iter()
        .map(|client| {
            if client.room != room.as_str() {
                return Err(corrupt(format!(
                    "client '{}' belongs to room '{}'",
                    client.client_id, client.room
                )));
            }
            let client_id =
                ClientId::new(client.client_id).map_err(|e| corrupt(e.to_string()))?;
            Ok(Client::new(
                client_id,
                room.clone(),
                Timestamp::new(client.joined_at),
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MembershipSnapshot {
        version: MembershipVersion::new(dto.version),
        clients,
    })
}
