use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use common::id_generator::generate_session_id;
use common::replay::{Recording, ReplayRecorder};
use common::snake::{advance, create_initial_state_with_grid, Direction, GameState};
use common::{log, log_warn, PlayerId, SessionId, SessionRng};

use crate::renderer::Renderer;
use crate::server_config::ArcadeConfig;
use crate::stores::{ArcadeStores, LeaderboardEntry};
use crate::tick_events::{tick_events, TickEvent};

pub const GUEST_PLAYER: &str = "guest";

#[derive(Clone, Copy, Debug)]
pub struct DriverSettings {
    pub tick_interval: Duration,
    pub boosted_tick_interval: Duration,
    pub max_ticks: Option<u64>,
}

impl From<&ArcadeConfig> for DriverSettings {
    fn from(config: &ArcadeConfig) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            boosted_tick_interval: config.boosted_tick_interval(),
            max_ticks: config.max_ticks,
        }
    }
}

pub struct GameOutcome {
    pub session_id: SessionId,
    pub player: PlayerId,
    pub final_state: GameState,
    pub recording: Recording,
    pub leaderboard_rank: Option<usize>,
}

/// Owns the clock for one human game: drains queued input once per tick,
/// advances the state, renders it and publishes a snapshot.
pub struct GameDriver<TRenderer: Renderer> {
    session_id: SessionId,
    settings: DriverSettings,
    rng: SessionRng,
    state: GameState,
    inputs: mpsc::Receiver<Direction>,
    renderer: TRenderer,
    recorder: ReplayRecorder,
    stores: ArcadeStores,
}

/// First tick fires one full period from now, also when re-armed mid-game.
fn ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

impl<TRenderer: Renderer> GameDriver<TRenderer> {
    pub fn new(
        config: &ArcadeConfig,
        seed: u64,
        inputs: mpsc::Receiver<Direction>,
        renderer: TRenderer,
        stores: ArcadeStores,
    ) -> Result<Self, String> {
        let mut rng = SessionRng::new(seed);
        let state = create_initial_state_with_grid(config.mode, config.grid_size(), &mut rng)?;

        Ok(Self {
            session_id: SessionId::new(generate_session_id(&mut SessionRng::from_random())),
            settings: DriverSettings::from(config),
            rng,
            state,
            inputs,
            renderer,
            recorder: ReplayRecorder::new(seed, config.mode, config.grid_size()),
            stores,
        })
    }

    fn current_interval(&self) -> Duration {
        if self.state.speed_boosted() {
            self.settings.boosted_tick_interval
        } else {
            self.settings.tick_interval
        }
    }

    /// Last direction queued since the previous tick.
    fn drain_inputs(&mut self) -> Option<Direction> {
        let mut latest = None;
        while let Ok(direction) = self.inputs.try_recv() {
            latest = Some(direction);
        }
        latest
    }

    fn log_event(&self, player: &PlayerId, event: TickEvent) {
        match event {
            TickEvent::FoodEaten { points } => log!(
                "[session:{}] {} ate food (+{}). Score: {}",
                self.session_id,
                player,
                points,
                self.state.score
            ),
            TickEvent::BoostCollected(kind) => {
                log!("[session:{}] {} collected a {:?} boost", self.session_id, player, kind)
            }
            TickEvent::PenaltyHit { points } => log!(
                "[session:{}] {} hit a penalty ({}). Score: {}",
                self.session_id,
                player,
                points,
                self.state.score
            ),
            TickEvent::GameOver(reason) => log!(
                "[session:{}] {} game over ({:?}) at tick {} with score {}",
                self.session_id,
                player,
                reason,
                self.state.tick,
                self.state.score
            ),
        }
    }

    async fn submit_score(&self) -> Option<usize> {
        let player = match self.stores.users.require_user().await {
            Ok(player) => player,
            Err(e) => {
                log_warn!(
                    "[session:{}] Score {} not submitted: {}",
                    self.session_id,
                    self.state.score,
                    e
                );
                return None;
            }
        };

        let entry = LeaderboardEntry::new(player.clone(), self.state.score, self.state.mode, false);
        let rank = self.stores.leaderboard.submit(entry).await;
        match rank {
            Some(rank) => log!("[session:{}] {} placed #{} on the leaderboard", self.session_id, player, rank),
            None => log!("[session:{}] {} did not make the leaderboard", self.session_id, player),
        }
        rank
    }

    pub async fn run(mut self) -> GameOutcome {
        let player = self
            .stores
            .users
            .current_user()
            .await
            .unwrap_or_else(|| PlayerId::from(GUEST_PLAYER));
        log!(
            "[session:{}] {} started a {:?} game on {}x{} (seed {})",
            self.session_id,
            player,
            self.state.mode,
            self.state.grid_size.width,
            self.state.grid_size.height,
            self.recorder.seed()
        );

        let mut boosted = self.state.speed_boosted();
        let mut clock = ticker(self.current_interval());
        let mut ticks_played: u64 = 0;

        self.renderer.render(player.as_str(), &self.state);
        self.stores
            .active_players
            .upsert(player.clone(), self.state.snapshot())
            .await;

        while !self.state.game_over && self.settings.max_ticks.is_none_or(|max| ticks_played < max) {
            clock.tick().await;

            let proposed = self.drain_inputs();
            if let Some(direction) = proposed {
                self.recorder.record_input(ticks_played, direction);
            }

            let next = advance(&self.state, proposed, &mut self.rng);
            let events = tick_events(&self.state, &next);
            self.state = next;
            ticks_played += 1;

            for event in events {
                self.log_event(&player, event);
            }

            self.renderer.render(player.as_str(), &self.state);
            self.stores
                .active_players
                .upsert(player.clone(), self.state.snapshot())
                .await;

            if self.state.speed_boosted() != boosted {
                boosted = !boosted;
                clock = ticker(self.current_interval());
            }
        }

        self.stores.active_players.remove(&player).await;
        let leaderboard_rank = self.submit_score().await;

        GameOutcome {
            session_id: self.session_id,
            player,
            final_state: self.state,
            recording: self.recorder.finalize(ticks_played),
            leaderboard_rank,
        }
    }
}
