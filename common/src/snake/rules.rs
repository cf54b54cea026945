use super::types::{Direction, Position};

/// Checks the candidate head against the pre-move body, tail included.
///
/// Moving into the cell the tail is about to vacate counts as a collision.
pub fn is_self_collision(head: Position, snake: &[Position]) -> bool {
    snake.contains(&head)
}

pub fn is_opposite_direction(current: Direction, next: Direction) -> bool {
    matches!(
        (current, next),
        (Direction::Up, Direction::Down)
            | (Direction::Down, Direction::Up)
            | (Direction::Left, Direction::Right)
            | (Direction::Right, Direction::Left)
    )
}
