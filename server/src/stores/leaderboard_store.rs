use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use common::PlayerId;
use common::snake::GameMode;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub player: PlayerId,
    pub score: u32,
    pub mode: GameMode,
    pub is_bot: bool,
    pub submitted_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn new(player: PlayerId, score: u32, mode: GameMode, is_bot: bool) -> Self {
        Self {
            player,
            score,
            mode,
            is_bot,
            submitted_at: Utc::now(),
        }
    }
}

/// Highest scores first; equal scores keep submission order.
#[derive(Clone)]
pub struct LeaderboardStore {
    entries: Arc<Mutex<Vec<LeaderboardEntry>>>,
    capacity: usize,
}

impl LeaderboardStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::with_capacity(capacity))),
            capacity,
        }
    }

    /// Returns the 1-based rank, or `None` if the score did not make the board.
    pub async fn submit(&self, entry: LeaderboardEntry) -> Option<usize> {
        let mut entries = self.entries.lock().await;
        let index = entries
            .iter()
            .position(|existing| existing.score < entry.score)
            .unwrap_or(entries.len());

        if index >= self.capacity {
            return None;
        }

        entries.insert(index, entry);
        entries.truncate(self.capacity);
        Some(index + 1)
    }

    pub async fn top(&self, count: usize) -> Vec<LeaderboardEntry> {
        let entries = self.entries.lock().await;
        entries.iter().take(count).cloned().collect()
    }

    pub async fn best_for(&self, player: &PlayerId) -> Option<LeaderboardEntry> {
        let entries = self.entries.lock().await;
        entries.iter().find(|e| &e.player == player).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
