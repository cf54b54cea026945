use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use common::id_generator::generate_bot_name;
use common::snake::{advance, choose_direction, create_initial_state_with_grid, GameMode, GameState, GridSize};
use common::{log, log_warn, PlayerId, SessionRng};

use crate::renderer::Renderer;
use crate::server_config::ArcadeConfig;
use crate::stores::{ArcadeStores, LeaderboardEntry};

struct SpectatedSnake {
    id: PlayerId,
    state: GameState,
    rng: SessionRng,
    games_played: u32,
}

/// Autoplays a set of bot-controlled snakes on a shared clock.
///
/// Every snake owns its own seeded rng, so one bot's spawns never shift another's.
pub struct SpectatorRunner<TRenderer: Renderer> {
    snakes: Vec<SpectatedSnake>,
    mode: GameMode,
    grid_size: GridSize,
    restart: bool,
    tick_interval: Duration,
    max_ticks: Option<u64>,
    stores: ArcadeStores,
    renderer: TRenderer,
}

impl<TRenderer: Renderer> SpectatorRunner<TRenderer> {
    pub fn new(
        config: &ArcadeConfig,
        base_seed: u64,
        stores: ArcadeStores,
        renderer: TRenderer,
    ) -> Result<Self, String> {
        let grid_size = config.grid_size();
        let mut snakes = Vec::with_capacity(config.spectator_count);

        for index in 0..config.spectator_count {
            let mut rng = SessionRng::new(base_seed.wrapping_add(index as u64));
            let id = PlayerId::new(generate_bot_name(index, &mut rng));
            let state = create_initial_state_with_grid(config.mode, grid_size, &mut rng)?;
            snakes.push(SpectatedSnake {
                id,
                state,
                rng,
                games_played: 0,
            });
        }

        Ok(Self {
            snakes,
            mode: config.mode,
            grid_size,
            restart: config.restart_spectators,
            tick_interval: config.tick_interval(),
            max_ticks: config.max_ticks,
            stores,
            renderer,
        })
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.len()
    }

    /// Advances every snake by one tick. Finished games are submitted as bot
    /// entries, then the snake either restarts or leaves the arena.
    pub async fn step(&mut self) {
        let mut retired = Vec::new();

        for (index, snake) in self.snakes.iter_mut().enumerate() {
            let state = &snake.state;
            let direction = choose_direction(&state.snake, state.food, state.direction, state.mode, state.grid_size);
            snake.state = advance(&snake.state, Some(direction), &mut snake.rng);
            self.renderer.render(snake.id.as_str(), &snake.state);

            if !snake.state.game_over {
                self.stores
                    .active_players
                    .upsert(snake.id.clone(), snake.state.snapshot())
                    .await;
                continue;
            }

            snake.games_played += 1;
            log!(
                "[spectator] {} finished game {} ({:?}) with score {} after {} ticks",
                snake.id,
                snake.games_played,
                snake.state.game_over_reason,
                snake.state.score,
                snake.state.tick
            );

            let entry = LeaderboardEntry::new(snake.id.clone(), snake.state.score, self.mode, true);
            if let Some(rank) = self.stores.leaderboard.submit(entry).await {
                log!("[spectator] {} placed #{} on the leaderboard", snake.id, rank);
            }

            if !self.restart {
                retired.push(index);
                continue;
            }

            match create_initial_state_with_grid(self.mode, self.grid_size, &mut snake.rng) {
                Ok(state) => {
                    snake.state = state;
                    self.stores
                        .active_players
                        .upsert(snake.id.clone(), snake.state.snapshot())
                        .await;
                }
                Err(e) => {
                    log_warn!("[spectator] {} could not restart: {}", snake.id, e);
                    retired.push(index);
                }
            }
        }

        for index in retired.into_iter().rev() {
            let snake = self.snakes.remove(index);
            self.stores.active_players.remove(&snake.id).await;
        }
    }

    /// Runs until every snake has retired or `max_ticks` is reached. Returns the
    /// number of ticks played.
    pub async fn run(mut self) -> u64 {
        log!(
            "[spectator] Starting {} bots on a {}x{} {:?} grid",
            self.snakes.len(),
            self.grid_size.width,
            self.grid_size.height,
            self.mode
        );

        for snake in &self.snakes {
            self.stores
                .active_players
                .upsert(snake.id.clone(), snake.state.snapshot())
                .await;
        }

        let mut clock = interval(self.tick_interval);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks: u64 = 0;

        while !self.snakes.is_empty() && self.max_ticks.is_none_or(|max| ticks < max) {
            clock.tick().await;
            self.step().await;
            ticks += 1;
        }

        for snake in &self.snakes {
            self.stores.active_players.remove(&snake.id).await;
        }

        log!("[spectator] Stopped after {} ticks", ticks);
        ticks
    }
}
