use super::geometry::{is_out_of_bounds, next_head_position, wrap};
use super::rules::{is_opposite_direction, is_self_collision};
use super::types::{Direction, GameMode, GridSize, Position};

pub const WALL_COLLISION_SCORE: i32 = -1000;
pub const SELF_COLLISION_SCORE: i32 = -500;

/// Greedy one-step lookahead for computer-controlled snakes.
///
/// Never reverses. Candidates are scored by [`score_move`]; the first maximum in
/// `Up, Down, Left, Right` order wins. It does not look further than one cell, so
/// it can and will steer into dead ends.
pub fn choose_direction(
    snake: &[Position],
    food: Position,
    current_direction: Direction,
    mode: GameMode,
    grid_size: GridSize,
) -> Direction {
    let Some(head) = snake.first().copied() else {
        return current_direction;
    };

    let mut best: Option<(Direction, i32)> = None;
    for direction in valid_directions(current_direction) {
        let score = score_move(head, direction, snake, food, mode, grid_size);
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((direction, score)),
        }
    }

    best.map(|(direction, _)| direction).unwrap_or(current_direction)
}

pub fn score_move(
    head: Position,
    direction: Direction,
    snake: &[Position],
    food: Position,
    mode: GameMode,
    grid_size: GridSize,
) -> i32 {
    let mut next = next_head_position(head, direction);
    match mode {
        GameMode::Passthrough => next = wrap(next, grid_size),
        GameMode::Walls => {
            if is_out_of_bounds(next, grid_size) {
                return WALL_COLLISION_SCORE;
            }
        }
    }

    if is_self_collision(next, snake) {
        return SELF_COLLISION_SCORE;
    }

    -next.manhattan_distance(food)
}

fn valid_directions(current: Direction) -> impl Iterator<Item = Direction> {
    Direction::ALL
        .into_iter()
        .filter(move |d| !is_opposite_direction(current, *d))
}
