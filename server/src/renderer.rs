use common::log;
use common::snake::{BoostKind, GameMode, GameState, Position};

/// Consumes one snapshot per tick.
pub trait Renderer: Send {
    fn render(&mut self, label: &str, state: &GameState);
}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn render(&mut self, label: &str, state: &GameState) {
        (**self).render(label, state)
    }
}

pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _label: &str, _state: &GameState) {}
}

/// Logs an ASCII frame for every tick.
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, label: &str, state: &GameState) {
        log!(
            "[{}] tick {} score {}\n{}",
            label,
            state.tick,
            state.score,
            render_frame(state)
        );
    }
}

fn cell_glyph(state: &GameState, position: Position) -> char {
    if state.head() == position {
        return '@';
    }
    if state.snake.contains(&position) {
        return 'o';
    }
    if state.food == position {
        return '*';
    }
    if let Some(boost) = state.boosts.iter().find(|b| b.position == position) {
        return match boost.kind {
            BoostKind::Speed => 'S',
            BoostKind::Points => 'P',
        };
    }
    if state.penalties.iter().any(|p| p.position == position) {
        return '-';
    }
    '.'
}

/// Text frame of the grid, one line per row. Walls mode draws a `#` border.
pub fn render_frame(state: &GameState) -> String {
    let width = state.grid_size.width as usize;
    let walls = state.mode == GameMode::Walls;
    let border: String = std::iter::repeat_n('#', width + 2).collect();

    let mut lines = Vec::with_capacity(state.grid_size.height as usize + 2);
    if walls {
        lines.push(border.clone());
    }
    for y in 0..state.grid_size.height {
        let row: String = (0..state.grid_size.width)
            .map(|x| cell_glyph(state, Position::new(x, y)))
            .collect();
        if walls {
            lines.push(format!("#{}#", row));
        } else {
            lines.push(row);
        }
    }
    if walls {
        lines.push(border);
    }
    lines.join("\n")
}
