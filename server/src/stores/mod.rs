mod active_players_store;
mod leaderboard_store;
mod user_store;

pub use active_players_store::ActivePlayersStore;
pub use leaderboard_store::{LeaderboardEntry, LeaderboardStore};
pub use user_store::{AuthError, UserStore};

/// Handles to every store, created once at startup and cloned into drivers.
#[derive(Clone)]
pub struct ArcadeStores {
    pub users: UserStore,
    pub leaderboard: LeaderboardStore,
    pub active_players: ActivePlayersStore,
}

impl ArcadeStores {
    pub fn new(leaderboard_size: usize) -> Self {
        Self {
            users: UserStore::new(),
            leaderboard: LeaderboardStore::new(leaderboard_size),
            active_players: ActivePlayersStore::new(),
        }
    }
}
