use crate::session_rng::RandomSource;
use super::geometry::{is_out_of_bounds, next_head_position, wrap};
use super::placement::{place_boost, place_food, place_food_avoiding, place_penalty};
use super::rules::{is_opposite_direction, is_self_collision};
use super::types::{
    ActiveBoost, Boost, BoostKind, DeathReason, Direction, GameMode, GridSize, Penalty, Position,
};

pub const FOOD_POINTS: u32 = 10;
pub const POINTS_BOOST_MULTIPLIER: u32 = 2;
pub const MAX_LIVE_BOOSTS: usize = 2;
pub const MAX_LIVE_PENALTIES: usize = 2;
pub const BOOST_SPAWN_PROBABILITY: f64 = 0.05;
pub const PENALTY_SPAWN_PROBABILITY: f64 = 0.03;
pub const INITIAL_SNAKE_LENGTH: i32 = 3;

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    Died(DeathReason),
    /// Food was eaten and no cell clear of the snake, boosts and penalties was left for it.
    BoardFilled,
}

/// One tick of a single-snake game. Each `advance` builds a new value.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Head first, tail last.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    pub score: u32,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub mode: GameMode,
    pub grid_size: GridSize,
    pub boosts: Vec<Boost>,
    pub penalties: Vec<Penalty>,
    pub active_boosts: Vec<ActiveBoost>,
    pub tick: u64,
}

/// Plain structural copy handed to stores and leaderboards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub score: u32,
    pub length: usize,
    pub head: Position,
    pub game_over: bool,
    pub tick: u64,
    pub mode: GameMode,
}

pub fn create_initial_state<R>(mode: GameMode, rng: &mut R) -> GameState
where
    R: RandomSource + ?Sized,
{
    create_initial_state_with_grid(mode, GridSize::default(), rng)
        .expect("Default grid always has room for the initial snake and food")
}

pub fn create_initial_state_with_grid<R>(
    mode: GameMode,
    grid_size: GridSize,
    rng: &mut R,
) -> Result<GameState, String>
where
    R: RandomSource + ?Sized,
{
    if grid_size.width < INITIAL_SNAKE_LENGTH + 1 || grid_size.height < 1 {
        return Err(format!(
            "Grid {}x{} is too small for a {}-segment snake",
            grid_size.width, grid_size.height, INITIAL_SNAKE_LENGTH
        ));
    }

    let head = Position::new(grid_size.width / 2, grid_size.height / 2);
    let snake: Vec<Position> = (0..INITIAL_SNAKE_LENGTH)
        .map(|i| Position::new(head.x - i, head.y))
        .collect();
    let food = place_food(&snake, grid_size, rng)
        .ok_or_else(|| "No free cell left for food".to_string())?;

    Ok(GameState {
        snake,
        direction: Direction::Right,
        food,
        score: 0,
        game_over: false,
        game_over_reason: None,
        mode,
        grid_size,
        boosts: Vec::new(),
        penalties: Vec::new(),
        active_boosts: Vec::new(),
        tick: 0,
    })
}

/// Advances `state` by one tick.
///
/// A proposed direction that reverses the snake is ignored. A terminal state is
/// returned unchanged.
pub fn advance<R>(state: &GameState, proposed_direction: Option<Direction>, rng: &mut R) -> GameState
where
    R: RandomSource + ?Sized,
{
    if state.game_over {
        return state.clone();
    }

    let direction = match proposed_direction {
        Some(next) if !is_opposite_direction(state.direction, next) => next,
        _ => state.direction,
    };

    let mut head = next_head_position(state.head(), direction);
    match state.mode {
        GameMode::Passthrough => head = wrap(head, state.grid_size),
        GameMode::Walls => {
            if is_out_of_bounds(head, state.grid_size) {
                return state.finished(GameOverReason::Died(DeathReason::WallCollision));
            }
        }
    }

    if is_self_collision(head, &state.snake) {
        return state.finished(GameOverReason::Died(DeathReason::SelfCollision));
    }

    let mut active_boosts: Vec<ActiveBoost> = state
        .active_boosts
        .iter()
        .filter(|b| b.remaining_ticks > 1)
        .map(|b| ActiveBoost {
            kind: b.kind,
            remaining_ticks: b.remaining_ticks - 1,
        })
        .collect();

    let multiplier = if active_boosts.iter().any(|b| b.kind == BoostKind::Points) {
        POINTS_BOOST_MULTIPLIER
    } else {
        1
    };

    let mut score = state.score;
    let mut food = state.food;
    let mut game_over_reason = None;

    let ate_food = head == state.food;
    let kept_segments = if ate_food {
        state.snake.len()
    } else {
        state.snake.len() - 1
    };
    let snake: Vec<Position> = std::iter::once(head)
        .chain(state.snake.iter().take(kept_segments).copied())
        .collect();

    if ate_food {
        score += FOOD_POINTS * multiplier;
        // The consumed boost or penalty, if any, sits under the new head.
        match place_food_avoiding(&snake, state.grid_size, &state.boosts, &state.penalties, rng) {
            Some(position) => food = position,
            None => game_over_reason = Some(GameOverReason::BoardFilled),
        }
    }

    let mut boosts = state.boosts.clone();
    if let Some(index) = boosts.iter().position(|b| b.position == head) {
        let boost = boosts.remove(index);
        active_boosts.push(ActiveBoost {
            kind: boost.kind,
            remaining_ticks: boost.duration,
        });
    }

    let mut penalties = state.penalties.clone();
    if let Some(index) = penalties.iter().position(|p| p.position == head) {
        let penalty = penalties.remove(index);
        score = (i64::from(score) + i64::from(penalty.points)).max(0) as u32;
    }

    if game_over_reason.is_none() {
        if boosts.len() < MAX_LIVE_BOOSTS
            && rng.chance(BOOST_SPAWN_PROBABILITY)
            && let Some(boost) = place_boost(&snake, food, state.grid_size, &boosts, &penalties, rng)
        {
            boosts.push(boost);
        }

        if penalties.len() < MAX_LIVE_PENALTIES
            && rng.chance(PENALTY_SPAWN_PROBABILITY)
            && let Some(penalty) =
                place_penalty(&snake, food, state.grid_size, &boosts, &penalties, rng)
        {
            penalties.push(penalty);
        }
    }

    GameState {
        snake,
        direction,
        food,
        score,
        game_over: game_over_reason.is_some(),
        game_over_reason,
        mode: state.mode,
        grid_size: state.grid_size,
        boosts,
        penalties,
        active_boosts,
        tick: state.tick + 1,
    }
}

impl GameState {
    pub fn head(&self) -> Position {
        *self.snake.first().expect("Snake body should never be empty")
    }

    pub fn has_active_boost(&self, kind: BoostKind) -> bool {
        self.active_boosts.iter().any(|b| b.kind == kind)
    }

    pub fn speed_boosted(&self) -> bool {
        self.has_active_boost(BoostKind::Speed)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            score: self.score,
            length: self.snake.len(),
            head: self.head(),
            game_over: self.game_over,
            tick: self.tick,
            mode: self.mode,
        }
    }

    fn finished(&self, reason: GameOverReason) -> GameState {
        GameState {
            game_over: true,
            game_over_reason: Some(reason),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_rng::SessionRng;
    use proptest::prelude::*;

    /// Delegates placement to a seeded rng but never spawns boosts or penalties.
    struct NoSpawnRng(SessionRng);

    impl RandomSource for NoSpawnRng {
        fn random_range(&mut self, range: std::ops::Range<i32>) -> i32 {
            self.0.random_range(range)
        }

        fn chance(&mut self, _probability: f64) -> bool {
            false
        }
    }

    /// Spawns on every roll.
    struct AlwaysSpawnRng(SessionRng);

    impl RandomSource for AlwaysSpawnRng {
        fn random_range(&mut self, range: std::ops::Range<i32>) -> i32 {
            self.0.random_range(range)
        }

        fn chance(&mut self, _probability: f64) -> bool {
            true
        }
    }

    /// Never spawns, but remembers every probability it was asked to roll.
    struct RollLogRng {
        inner: SessionRng,
        rolls: Vec<f64>,
    }

    impl RandomSource for RollLogRng {
        fn random_range(&mut self, range: std::ops::Range<i32>) -> i32 {
            self.inner.random_range(range)
        }

        fn chance(&mut self, probability: f64) -> bool {
            self.rolls.push(probability);
            false
        }
    }

    fn roll_log() -> RollLogRng {
        RollLogRng {
            inner: SessionRng::new(5),
            rolls: Vec::new(),
        }
    }

    fn no_spawn() -> NoSpawnRng {
        NoSpawnRng(SessionRng::new(42))
    }

    fn state_with(mode: GameMode, snake: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState {
            snake,
            direction,
            food,
            score: 0,
            game_over: false,
            game_over_reason: None,
            mode,
            grid_size: GridSize::new(25, 25),
            boosts: Vec::new(),
            penalties: Vec::new(),
            active_boosts: Vec::new(),
            tick: 0,
        }
    }

    fn row(head: Position, len: i32) -> Vec<Position> {
        (0..len).map(|i| Position::new(head.x - i, head.y)).collect()
    }

    #[test]
    fn test_initial_state_layout() {
        let state = create_initial_state(GameMode::Walls, &mut SessionRng::new(1));
        assert_eq!(
            state.snake,
            vec![Position::new(12, 12), Position::new(11, 12), Position::new(10, 12)]
        );
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(state.boosts.is_empty());
        assert!(state.penalties.is_empty());
        assert!(state.active_boosts.is_empty());
        assert!(!state.snake.contains(&state.food));
        assert_eq!(state.grid_size, GridSize::new(25, 25));
    }

    #[test]
    fn test_initial_state_rejects_tiny_grid() {
        let result = create_initial_state_with_grid(GameMode::Walls, GridSize::new(3, 3), &mut SessionRng::new(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_initial_state_custom_grid_centered() {
        let state =
            create_initial_state_with_grid(GameMode::Passthrough, GridSize::new(10, 6), &mut SessionRng::new(1))
                .unwrap();
        assert_eq!(state.head(), Position::new(5, 3));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.mode, GameMode::Passthrough);
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let mut state = create_initial_state(GameMode::Walls, &mut SessionRng::new(1));
        state.food = Position::new(13, 12);

        let next = advance(&state, None, &mut no_spawn());

        assert_eq!(next.head(), Position::new(13, 12));
        assert_eq!(next.snake.len(), 4);
        assert_eq!(next.score, 10);
        assert!(!next.game_over);
        assert!(!next.snake.contains(&next.food));
    }

    #[test]
    fn test_eating_food_with_points_boost_doubles_score() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(6, 5));
        state.active_boosts.push(ActiveBoost {
            kind: BoostKind::Points,
            remaining_ticks: 5,
        });

        let next = advance(&state, None, &mut no_spawn());

        assert_eq!(next.score, 20);
        assert_eq!(next.active_boosts[0].remaining_ticks, 4);
    }

    #[test]
    fn test_points_boost_expiring_this_tick_gives_no_bonus() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(6, 5));
        state.active_boosts.push(ActiveBoost {
            kind: BoostKind::Points,
            remaining_ticks: 1,
        });

        let next = advance(&state, None, &mut no_spawn());

        assert_eq!(next.score, 10);
        assert!(next.active_boosts.is_empty());
    }

    #[test]
    fn test_moving_forward_shifts_every_segment() {
        let state = state_with(GameMode::Walls, row(Position::new(5, 5), 4), Direction::Right, Position::new(20, 20));

        let next = advance(&state, None, &mut no_spawn());

        assert_eq!(next.snake, row(Position::new(6, 5), 4));
        assert_eq!(next.score, 0);
        assert_eq!(next.food, state.food);
        assert_eq!(next.tick, 1);
    }

    #[test]
    fn test_wall_collision_leaves_state_untouched() {
        let mut state = state_with(
            GameMode::Walls,
            vec![Position::new(0, 5), Position::new(1, 5)],
            Direction::Left,
            Position::new(10, 10),
        );
        state.score = 30;

        let next = advance(&state, None, &mut no_spawn());

        assert!(next.game_over);
        assert_eq!(next.game_over_reason, Some(GameOverReason::Died(DeathReason::WallCollision)));
        assert_eq!(next.snake, state.snake);
        assert_eq!(next.score, 30);
        assert_eq!(next.food, state.food);
        assert_eq!(next.tick, state.tick);
    }

    #[test]
    fn test_wall_collision_on_far_edge() {
        let state = state_with(
            GameMode::Walls,
            vec![Position::new(12, 24), Position::new(12, 23)],
            Direction::Down,
            Position::new(10, 10),
        );
        assert!(advance(&state, None, &mut no_spawn()).game_over);
    }

    #[test]
    fn test_passthrough_wraps_head() {
        let state = state_with(
            GameMode::Passthrough,
            vec![Position::new(0, 5), Position::new(1, 5)],
            Direction::Left,
            Position::new(10, 10),
        );

        let next = advance(&state, None, &mut no_spawn());

        assert!(!next.game_over);
        assert_eq!(next.head(), Position::new(24, 5));
        assert_eq!(next.snake, vec![Position::new(24, 5), Position::new(0, 5)]);
    }

    #[test]
    fn test_self_collision_ends_game() {
        // Head at (5,5) turning down into (5,6), which is occupied.
        let snake = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
            Position::new(6, 6),
        ];
        let state = state_with(GameMode::Walls, snake.clone(), Direction::Right, Position::new(20, 20));

        let next = advance(&state, Some(Direction::Down), &mut no_spawn());

        assert!(next.game_over);
        assert_eq!(next.game_over_reason, Some(GameOverReason::Died(DeathReason::SelfCollision)));
        assert_eq!(next.snake, snake);
    }

    #[test]
    fn test_moving_into_own_tail_is_collision() {
        let snake = vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ];
        let state = state_with(GameMode::Walls, snake, Direction::Up, Position::new(20, 20));

        let next = advance(&state, Some(Direction::Right), &mut no_spawn());

        assert!(next.game_over);
    }

    #[test]
    fn test_opposite_direction_is_ignored() {
        let state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));

        let next = advance(&state, Some(Direction::Left), &mut no_spawn());

        assert_eq!(next.direction, Direction::Right);
        assert_eq!(next.head(), Position::new(6, 5));
        assert!(!next.game_over);
    }

    #[test]
    fn test_perpendicular_direction_is_accepted() {
        let state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));

        let next = advance(&state, Some(Direction::Up), &mut no_spawn());

        assert_eq!(next.direction, Direction::Up);
        assert_eq!(next.head(), Position::new(5, 4));
    }

    #[test]
    fn test_penalty_clamps_score_at_zero() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        state.score = 10;
        state.penalties.push(Penalty {
            position: Position::new(6, 5),
            points: -20,
        });

        let next = advance(&state, Some(Direction::Right), &mut no_spawn());

        assert_eq!(next.score, 0);
        assert!(next.penalties.is_empty());
    }

    #[test]
    fn test_penalty_subtracts_points() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        state.score = 50;
        state.penalties.push(Penalty {
            position: Position::new(6, 5),
            points: -20,
        });

        assert_eq!(advance(&state, None, &mut no_spawn()).score, 30);
    }

    #[test]
    fn test_active_boost_expires() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        state.active_boosts.push(ActiveBoost {
            kind: BoostKind::Speed,
            remaining_ticks: 1,
        });

        let next = advance(&state, None, &mut no_spawn());

        assert!(next.active_boosts.is_empty());
        assert!(!next.speed_boosted());
    }

    #[test]
    fn test_collecting_boost_activates_full_duration() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        state.boosts.push(Boost {
            position: Position::new(6, 5),
            kind: BoostKind::Speed,
            duration: 50,
        });
        state.boosts.push(Boost {
            position: Position::new(1, 1),
            kind: BoostKind::Points,
            duration: 50,
        });

        let next = advance(&state, None, &mut no_spawn());

        assert_eq!(next.boosts.len(), 1);
        assert_eq!(next.boosts[0].position, Position::new(1, 1));
        assert_eq!(
            next.active_boosts,
            vec![ActiveBoost {
                kind: BoostKind::Speed,
                remaining_ticks: 50,
            }]
        );
        assert!(next.speed_boosted());
    }

    #[test]
    fn test_collected_points_boost_does_not_apply_same_tick() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(6, 5));
        state.boosts.push(Boost {
            position: Position::new(6, 5),
            kind: BoostKind::Points,
            duration: 50,
        });

        let next = advance(&state, None, &mut no_spawn());

        assert_eq!(next.score, 10);
        assert!(next.has_active_boost(BoostKind::Points));
    }

    #[test]
    fn test_spawning_respects_caps() {
        let mut rng = AlwaysSpawnRng(SessionRng::new(9));
        let mut state = state_with(GameMode::Passthrough, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));

        for _ in 0..10 {
            state = advance(&state, None, &mut rng);
            assert!(state.boosts.len() <= MAX_LIVE_BOOSTS);
            assert!(state.penalties.len() <= MAX_LIVE_PENALTIES);
        }
        assert!(!state.boosts.is_empty() || !state.active_boosts.is_empty());
    }

    #[test]
    fn test_spawned_entities_avoid_snake_food_and_each_other() {
        let mut rng = AlwaysSpawnRng(SessionRng::new(17));
        let state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));

        let next = advance(&state, None, &mut rng);

        assert_eq!(next.boosts.len(), 1);
        assert_eq!(next.penalties.len(), 1);
        let boost = next.boosts[0].position;
        let penalty = next.penalties[0].position;
        assert_ne!(boost, penalty);
        assert_ne!(boost, next.food);
        assert_ne!(penalty, next.food);
        assert!(!next.snake.contains(&boost));
        assert!(!next.snake.contains(&penalty));
    }

    #[test]
    fn test_terminal_state_is_never_resurrected() {
        let state = state_with(
            GameMode::Walls,
            vec![Position::new(0, 5), Position::new(1, 5)],
            Direction::Left,
            Position::new(10, 10),
        );
        let dead = advance(&state, None, &mut no_spawn());

        let again = advance(&dead, Some(Direction::Up), &mut no_spawn());

        assert_eq!(again, dead);
    }

    #[test]
    fn test_filling_the_board_ends_the_game() {
        let mut state = state_with(
            GameMode::Walls,
            vec![Position::new(1, 0), Position::new(0, 0)],
            Direction::Right,
            Position::new(2, 0),
        );
        state.grid_size = GridSize::new(3, 1);

        let next = advance(&state, None, &mut no_spawn());

        assert!(next.game_over);
        assert_eq!(next.game_over_reason, Some(GameOverReason::BoardFilled));
        assert_eq!(next.snake.len(), 3);
        assert_eq!(next.score, 10);
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let mut state = state_with(GameMode::Passthrough, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        state.score = 40;
        state.tick = 7;

        let snapshot = state.snapshot();

        assert_eq!(snapshot.score, 40);
        assert_eq!(snapshot.length, 3);
        assert_eq!(snapshot.head, Position::new(5, 5));
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.tick, 7);
        assert_eq!(snapshot.mode, GameMode::Passthrough);
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    fn mode_strategy() -> impl Strategy<Value = GameMode> {
        prop_oneof![Just(GameMode::Walls), Just(GameMode::Passthrough)]
    }

    fn input_sequence_strategy() -> impl Strategy<Value = Vec<Option<Direction>>> {
        prop::collection::vec(prop::option::of(direction_strategy()), 1..200)
    }

    fn far_boost(x: i32) -> Boost {
        Boost {
            position: Position::new(x, 20),
            kind: BoostKind::Speed,
            duration: 50,
        }
    }

    fn far_penalty(x: i32) -> Penalty {
        Penalty {
            position: Position::new(x, 22),
            points: -20,
        }
    }

    #[test]
    fn test_spawn_rolls_boost_then_penalty() {
        let state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        let mut rng = roll_log();

        advance(&state, None, &mut rng);

        assert_eq!(rng.rolls, vec![BOOST_SPAWN_PROBABILITY, PENALTY_SPAWN_PROBABILITY]);
        assert_eq!(rng.rolls, vec![0.05, 0.03]);
    }

    #[test]
    fn test_full_boost_cap_skips_boost_roll() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        state.boosts = vec![far_boost(1), far_boost(2)];
        let mut rng = roll_log();

        advance(&state, None, &mut rng);

        assert_eq!(rng.rolls, vec![PENALTY_SPAWN_PROBABILITY]);
    }

    #[test]
    fn test_full_caps_roll_nothing() {
        let mut state = state_with(GameMode::Walls, row(Position::new(5, 5), 3), Direction::Right, Position::new(20, 20));
        state.boosts = vec![far_boost(1), far_boost(2)];
        state.penalties = vec![far_penalty(1), far_penalty(2)];
        let mut rng = roll_log();

        let next = advance(&state, None, &mut rng);

        assert!(rng.rolls.is_empty());
        assert_eq!(next.boosts.len(), MAX_LIVE_BOOSTS);
        assert_eq!(next.penalties.len(), MAX_LIVE_PENALTIES);
    }

    fn corridor(width: i32) -> GameState {
        let mut state = state_with(
            GameMode::Walls,
            vec![Position::new(1, 0), Position::new(0, 0)],
            Direction::Right,
            Position::new(2, 0),
        );
        state.grid_size = GridSize::new(width, 1);
        state.boosts = vec![Boost {
            position: Position::new(3, 0),
            kind: BoostKind::Speed,
            duration: 50,
        }];
        state.penalties = vec![Penalty {
            position: Position::new(4, 0),
            points: -20,
        }];
        state
    }

    #[test]
    fn test_replaced_food_avoids_live_boosts_and_penalties() {
        let next = advance(&corridor(6), None, &mut no_spawn());

        assert!(!next.game_over);
        assert_eq!(next.food, Position::new(5, 0));
        assert_eq!(next.boosts.len(), 1);
        assert_eq!(next.penalties.len(), 1);
    }

    #[test]
    fn test_food_with_only_boost_cells_left_fills_board() {
        let next = advance(&corridor(5), None, &mut no_spawn());

        assert!(next.game_over);
        assert_eq!(next.game_over_reason, Some(GameOverReason::BoardFilled));
        assert_eq!(next.score, FOOD_POINTS);
        assert_eq!(next.snake.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_tick_invariants_hold(
            seed in any::<u64>(),
            mode in mode_strategy(),
            inputs in input_sequence_strategy(),
        ) {
            let mut rng = SessionRng::new(seed);
            let mut state = create_initial_state(mode, &mut rng);

            for input in inputs {
                let next = advance(&state, input, &mut rng);

                if next.game_over {
                    if matches!(next.game_over_reason, Some(GameOverReason::Died(_))) {
                        prop_assert_eq!(&next.snake, &state.snake);
                        prop_assert_eq!(next.score, state.score);
                    }
                    break;
                }

                prop_assert!(!next.snake.contains(&next.food));
                prop_assert!(next.boosts.len() <= MAX_LIVE_BOOSTS);
                prop_assert!(next.penalties.len() <= MAX_LIVE_PENALTIES);
                prop_assert!(next.active_boosts.iter().all(|b| b.remaining_ticks > 0));
                prop_assert!(!is_opposite_direction(state.direction, next.direction));
                prop_assert!(!is_out_of_bounds(next.head(), next.grid_size));

                let ate = next.head() == state.food;
                let expected_len = state.snake.len() + usize::from(ate);
                prop_assert_eq!(next.snake.len(), expected_len);

                let mut expected_score = i64::from(state.score);
                if ate {
                    let doubled = state
                        .active_boosts
                        .iter()
                        .any(|b| b.kind == BoostKind::Points && b.remaining_ticks > 1);
                    expected_score += i64::from(FOOD_POINTS * if doubled { POINTS_BOOST_MULTIPLIER } else { 1 });
                }
                if let Some(penalty) = state.penalties.iter().find(|p| p.position == next.head()) {
                    expected_score = (expected_score + i64::from(penalty.points)).max(0);
                }
                prop_assert_eq!(i64::from(next.score), expected_score);

                state = next;
            }
        }

        #[test]
        fn prop_reverse_input_keeps_direction(
            seed in any::<u64>(),
            direction in direction_strategy(),
        ) {
            let mut rng = NoSpawnRng(SessionRng::new(seed));
            let mut state = create_initial_state(GameMode::Passthrough, &mut rng);
            state.direction = direction;
            state.snake = (0..3)
                .map(|i| {
                    let (dx, dy) = direction.delta();
                    wrap(Position::new(12 - dx * i, 12 - dy * i), state.grid_size)
                })
                .collect();
            state.food = Position::new(0, 0);

            let next = advance(&state, Some(direction.opposite()), &mut rng);

            prop_assert_eq!(next.direction, direction);
            prop_assert!(!next.game_over);
        }

        #[test]
        fn prop_same_seed_same_game(
            seed in any::<u64>(),
            inputs in input_sequence_strategy(),
        ) {
            let mut rng_a = SessionRng::new(seed);
            let mut rng_b = SessionRng::new(seed);
            let mut a = create_initial_state(GameMode::Passthrough, &mut rng_a);
            let mut b = create_initial_state(GameMode::Passthrough, &mut rng_b);

            for input in inputs {
                a = advance(&a, input, &mut rng_a);
                b = advance(&b, input, &mut rng_b);
                prop_assert_eq!(&a, &b);
            }
        }
    }
}
