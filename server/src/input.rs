use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use common::log_warn;
use common::snake::Direction;

pub fn parse_direction(line: &str) -> Option<Direction> {
    match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" | "k" => Some(Direction::Up),
        "s" | "down" | "j" => Some(Direction::Down),
        "a" | "left" | "h" => Some(Direction::Left),
        "d" | "right" | "l" => Some(Direction::Right),
        _ => None,
    }
}

/// Forwards directions typed on stdin until stdin closes or the receiver is dropped.
pub fn spawn_stdin_input(sender: mpsc::Sender<Direction>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_direction(&line) {
                    Some(direction) => {
                        if sender.send(direction).await.is_err() {
                            break;
                        }
                    }
                    None => log_warn!("Unknown input {:?}, use w/a/s/d", line.trim()),
                },
                Ok(None) => break,
                Err(e) => {
                    log_warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    })
}
