use super::types::{Direction, GridSize, Position};

pub fn next_head_position(head: Position, direction: Direction) -> Position {
    let (dx, dy) = direction.delta();
    Position::new(head.x + dx, head.y + dy)
}

/// Mathematical modulo on both axes: `-1` on a width-25 grid maps to `24`.
pub fn wrap(position: Position, grid_size: GridSize) -> Position {
    Position::new(
        position.x.rem_euclid(grid_size.width),
        position.y.rem_euclid(grid_size.height),
    )
}

pub fn is_out_of_bounds(position: Position, grid_size: GridSize) -> bool {
    position.x < 0
        || position.y < 0
        || position.x >= grid_size.width
        || position.y >= grid_size.height
}
