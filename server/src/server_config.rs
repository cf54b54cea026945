use std::time::Duration;
use serde::{Deserialize, Serialize};

use common::config::{check_range, Validate};
use common::snake::{GameMode, GridSize};

pub const DEFAULT_CONFIG_PATH: &str = "arcade.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub mode: GameMode,
    pub tick_interval_ms: u64,
    /// Cadence while a speed boost is active.
    pub boosted_tick_interval_ms: u64,
    pub spectator_count: usize,
    pub max_ticks: Option<u64>,
    pub leaderboard_size: usize,
    pub restart_spectators: bool,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            grid_width: 25,
            grid_height: 25,
            mode: GameMode::Walls,
            tick_interval_ms: 150,
            boosted_tick_interval_ms: 75,
            spectator_count: 4,
            max_ticks: None,
            leaderboard_size: 10,
            restart_spectators: true,
        }
    }
}

impl ArcadeConfig {
    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.grid_width, self.grid_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn boosted_tick_interval(&self) -> Duration {
        Duration::from_millis(self.boosted_tick_interval_ms)
    }
}

impl Validate for ArcadeConfig {
    fn validate(&self) -> Result<(), String> {
        check_range("Grid width", self.grid_width, 5, 100)?;
        check_range("Grid height", self.grid_height, 5, 100)?;
        check_range("Tick interval", self.tick_interval_ms, 20, 5000)?;
        check_range("Boosted tick interval", self.boosted_tick_interval_ms, 10, self.tick_interval_ms)?;
        check_range("Spectator count", self.spectator_count, 0, 16)?;
        check_range("Leaderboard size", self.leaderboard_size, 1, 100)?;
        if self.max_ticks == Some(0) {
            return Err("Max ticks must be positive when set".to_string());
        }
        Ok(())
    }
}
