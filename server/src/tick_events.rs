use common::snake::{BoostKind, GameOverReason, GameState, FOOD_POINTS, POINTS_BOOST_MULTIPLIER};

/// What happened between two consecutive states, for logging and UI layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    FoodEaten { points: u32 },
    BoostCollected(BoostKind),
    PenaltyHit { points: i32 },
    GameOver(GameOverReason),
}

/// Food value on the tick after `previous`: a points boost counts only if it
/// survives that tick's aging.
fn food_points(previous: &GameState) -> u32 {
    let doubled = previous
        .active_boosts
        .iter()
        .any(|b| b.kind == BoostKind::Points && b.remaining_ticks > 1);
    if doubled {
        FOOD_POINTS * POINTS_BOOST_MULTIPLIER
    } else {
        FOOD_POINTS
    }
}

pub fn tick_events(previous: &GameState, next: &GameState) -> Vec<TickEvent> {
    let mut events = Vec::new();

    if let Some(reason @ GameOverReason::Died(_)) = next.game_over_reason
        && !previous.game_over
    {
        events.push(TickEvent::GameOver(reason));
        return events;
    }

    if next.tick == previous.tick {
        return events;
    }

    let head = next.head();
    let penalty = previous.penalties.iter().find(|p| p.position == head);

    if head == previous.food {
        events.push(TickEvent::FoodEaten {
            points: food_points(previous),
        });
    }
    if let Some(boost) = previous.boosts.iter().find(|b| b.position == head) {
        events.push(TickEvent::BoostCollected(boost.kind));
    }
    if let Some(penalty) = penalty {
        events.push(TickEvent::PenaltyHit {
            points: penalty.points,
        });
    }
    if let Some(reason) = next.game_over_reason
        && !previous.game_over
    {
        events.push(TickEvent::GameOver(reason));
    }

    events
}
