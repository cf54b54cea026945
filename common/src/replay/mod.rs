mod recorder;

pub use recorder::ReplayRecorder;

use crate::session_rng::SessionRng;
use crate::snake::{advance, create_initial_state_with_grid, Direction, GameMode, GameState, GridSize};

/// Everything needed to re-run a game: the seed drives placement and spawning,
/// the inputs are the directions the driver fed to `advance`.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    pub seed: u64,
    pub mode: GameMode,
    pub grid_size: GridSize,
    pub inputs: Vec<RecordedInput>,
    pub total_ticks: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedInput {
    pub tick: u64,
    pub direction: Direction,
}

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    InvalidGrid(String),
    InputOutOfOrder { tick: u64, previous: u64 },
    InputAfterEnd { tick: u64, total_ticks: u64 },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::InvalidGrid(e) => write!(f, "Invalid grid: {}", e),
            ReplayError::InputOutOfOrder { tick, previous } => {
                write!(f, "Input at tick {} recorded after tick {}", tick, previous)
            }
            ReplayError::InputAfterEnd { tick, total_ticks } => {
                write!(f, "Input at tick {} but the game lasted {} ticks", tick, total_ticks)
            }
        }
    }
}

impl std::error::Error for ReplayError {}

fn validate_inputs(recording: &Recording) -> Result<(), ReplayError> {
    let mut previous: Option<u64> = None;
    for input in &recording.inputs {
        if let Some(previous) = previous
            && input.tick <= previous
        {
            return Err(ReplayError::InputOutOfOrder {
                tick: input.tick,
                previous,
            });
        }
        if input.tick >= recording.total_ticks {
            return Err(ReplayError::InputAfterEnd {
                tick: input.tick,
                total_ticks: recording.total_ticks,
            });
        }
        previous = Some(input.tick);
    }
    Ok(())
}

/// Re-runs a recorded game and returns its final state.
pub fn replay(recording: &Recording) -> Result<GameState, ReplayError> {
    validate_inputs(recording)?;

    let mut rng = SessionRng::new(recording.seed);
    let mut state = create_initial_state_with_grid(recording.mode, recording.grid_size, &mut rng)
        .map_err(ReplayError::InvalidGrid)?;

    let mut inputs = recording.inputs.iter().peekable();
    for tick in 0..recording.total_ticks {
        let proposed = inputs
            .next_if(|input| input.tick == tick)
            .map(|input| input.direction);
        state = advance(&state, proposed, &mut rng);
    }

    Ok(state)
}
