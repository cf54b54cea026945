pub mod config;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod replay;
pub mod session_rng;
pub mod snake;

pub use identifiers::*;
pub use session_rng::{RandomSource, SessionRng};
