use crate::snake::{Direction, GameMode, GridSize};
use super::{RecordedInput, Recording};

pub struct ReplayRecorder {
    seed: u64,
    mode: GameMode,
    grid_size: GridSize,
    inputs: Vec<RecordedInput>,
}

impl ReplayRecorder {
    pub fn new(seed: u64, mode: GameMode, grid_size: GridSize) -> Self {
        Self {
            seed,
            mode,
            grid_size,
            inputs: Vec::new(),
        }
    }

    /// Records the direction passed to `advance` on `tick`; a later call for the same tick replaces it.
    pub fn record_input(&mut self, tick: u64, direction: Direction) {
        if let Some(last) = self.inputs.last_mut()
            && last.tick == tick
        {
            last.direction = direction;
            return;
        }
        self.inputs.push(RecordedInput { tick, direction });
    }

    pub fn finalize(self, total_ticks: u64) -> Recording {
        Recording {
            seed: self.seed,
            mode: self.mode,
            grid_size: self.grid_size,
            inputs: self.inputs,
            total_ticks,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
