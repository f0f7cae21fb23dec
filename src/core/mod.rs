//! Core types shared across the engine.
//!
//! - `Player`: the two piece colors, with opponent swap
//! - `PlayerPair`: per-player data storage indexable by `Player`
//! - `GameRng`: deterministic, injectable randomness

mod player;
mod rng;

pub use player::{Player, PlayerPair};
pub use rng::GameRng;
