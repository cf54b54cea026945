use std::collections::HashSet;

use crate::session_rng::RandomSource;
use super::geometry::is_out_of_bounds;
use super::types::{Boost, BoostKind, GridSize, Penalty, Position};

pub const BOOST_DURATION_TICKS: u32 = 50;
pub const PENALTY_POINTS: i32 = -20;

/// Rejection-samples a cell not in `occupied`. `None` when every cell is taken.
fn sample_free_cell<R>(grid_size: GridSize, occupied: &HashSet<Position>, rng: &mut R) -> Option<Position>
where
    R: RandomSource + ?Sized,
{
    let occupied_in_grid = occupied
        .iter()
        .filter(|p| !is_out_of_bounds(**p, grid_size))
        .count();
    if occupied_in_grid >= grid_size.cell_count() {
        return None;
    }

    loop {
        let candidate = Position::new(
            rng.random_range(0..grid_size.width),
            rng.random_range(0..grid_size.height),
        );
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
}

fn occupied_cells(
    snake: &[Position],
    food: Position,
    boosts: &[Boost],
    penalties: &[Penalty],
) -> HashSet<Position> {
    snake
        .iter()
        .copied()
        .chain(std::iter::once(food))
        .chain(boosts.iter().map(|b| b.position))
        .chain(penalties.iter().map(|p| p.position))
        .collect()
}

pub fn place_food<R>(snake: &[Position], grid_size: GridSize, rng: &mut R) -> Option<Position>
where
    R: RandomSource + ?Sized,
{
    let occupied: HashSet<Position> = snake.iter().copied().collect();
    sample_free_cell(grid_size, &occupied, rng)
}

/// Food re-placement during a game: also keeps clear of live boosts and penalties.
pub fn place_food_avoiding<R>(
    snake: &[Position],
    grid_size: GridSize,
    boosts: &[Boost],
    penalties: &[Penalty],
    rng: &mut R,
) -> Option<Position>
where
    R: RandomSource + ?Sized,
{
    let occupied: HashSet<Position> = snake
        .iter()
        .copied()
        .chain(boosts.iter().map(|b| b.position))
        .chain(penalties.iter().map(|p| p.position))
        .collect();
    sample_free_cell(grid_size, &occupied, rng)
}

pub fn place_boost<R>(
    snake: &[Position],
    food: Position,
    grid_size: GridSize,
    existing_boosts: &[Boost],
    existing_penalties: &[Penalty],
    rng: &mut R,
) -> Option<Boost>
where
    R: RandomSource + ?Sized,
{
    let occupied = occupied_cells(snake, food, existing_boosts, existing_penalties);
    let position = sample_free_cell(grid_size, &occupied, rng)?;
    let kind = if rng.coin_flip() {
        BoostKind::Speed
    } else {
        BoostKind::Points
    };

    Some(Boost {
        position,
        kind,
        duration: BOOST_DURATION_TICKS,
    })
}

pub fn place_penalty<R>(
    snake: &[Position],
    food: Position,
    grid_size: GridSize,
    existing_boosts: &[Boost],
    existing_penalties: &[Penalty],
    rng: &mut R,
) -> Option<Penalty>
where
    R: RandomSource + ?Sized,
{
    let occupied = occupied_cells(snake, food, existing_boosts, existing_penalties);
    let position = sample_free_cell(grid_size, &occupied, rng)?;

    Some(Penalty {
        position,
        points: PENALTY_POINTS,
    })
}
