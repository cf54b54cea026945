use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use common::PlayerId;
use common::snake::PlayerSnapshot;

/// Live snapshots of everyone currently playing, for spectator listings.
#[derive(Clone, Default)]
pub struct ActivePlayersStore {
    players: Arc<Mutex<BTreeMap<PlayerId, PlayerSnapshot>>>,
}

impl ActivePlayersStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, player: PlayerId, snapshot: PlayerSnapshot) {
        self.players.lock().await.insert(player, snapshot);
    }

    pub async fn remove(&self, player: &PlayerId) -> Option<PlayerSnapshot> {
        self.players.lock().await.remove(player)
    }

    pub async fn get(&self, player: &PlayerId) -> Option<PlayerSnapshot> {
        self.players.lock().await.get(player).copied()
    }

    /// Sorted by player id.
    pub async fn list(&self) -> Vec<(PlayerId, PlayerSnapshot)> {
        self.players
            .lock()
            .await
            .iter()
            .map(|(id, snapshot)| (id.clone(), *snapshot))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.players.lock().await.len()
    }
}
