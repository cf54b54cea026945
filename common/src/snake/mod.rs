mod bot_controller;
mod game_state;
mod geometry;
mod placement;
mod rules;
mod types;

pub use bot_controller::{choose_direction, score_move, SELF_COLLISION_SCORE, WALL_COLLISION_SCORE};
pub use game_state::{
    advance, create_initial_state, create_initial_state_with_grid, GameOverReason, GameState,
    PlayerSnapshot, BOOST_SPAWN_PROBABILITY, FOOD_POINTS, INITIAL_SNAKE_LENGTH, MAX_LIVE_BOOSTS,
    MAX_LIVE_PENALTIES, PENALTY_SPAWN_PROBABILITY, POINTS_BOOST_MULTIPLIER,
};
pub use geometry::{is_out_of_bounds, next_head_position, wrap};
pub use placement::{
    place_boost, place_food, place_food_avoiding, place_penalty, BOOST_DURATION_TICKS, PENALTY_POINTS,
};
pub use rules::{is_opposite_direction, is_self_collision};
pub use types::{
    ActiveBoost, Boost, BoostKind, DeathReason, Direction, GameMode, GridSize, Penalty, Position,
};
