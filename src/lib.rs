//! # morris
//!
//! A rules engine for six men's morris: two players place, move, and capture
//! pieces on a fixed 16-point board. The engine is the single authority on
//! game state; rendering and input translation are external collaborators
//! that call `play_*` with logical coordinates and poll the query surface.
//!
//! ## Design Principles
//!
//! 1. **Engine Owns the Rules**: all mutation goes through `play_tray`,
//!    `play_board`, and the sandbox operations. Invalid calls are silent
//!    no-ops; the engine never panics on bad input.
//!
//! 2. **Topology as Data**: the board graph is a fixed coordinate table with
//!    a precomputed neighbor-via-path lookup. Mill and move sweeps never
//!    re-derive the geometry.
//!
//! 3. **Deterministic by Injection**: the only randomness is the first-turn
//!    coin flip, drawn from an injectable seeded RNG.
//!
//! ## Modules
//!
//! - `core`: players, per-player storage, RNG
//! - `board`: topology tables, grids, legal-move mask
//! - `rules`: the game state machine (placing, moving, mills, capture,
//!   sandbox setup)
//! - `codec`: save-file token stream
//! - `scene`: top-level screen flow, decoupled from the rules

pub mod core;
pub mod board;
pub mod rules;
pub mod codec;
pub mod scene;

// Re-export commonly used types
pub use crate::core::{GameRng, Player, PlayerPair};

pub use crate::board::{CellKind, Coord, Dir, Grid, MoveMask, Topology, BOARD_SIZE, PATHS, POINTS};

pub use crate::rules::{
    GameState, Selection, SetupError, LOSING_PIECE_COUNT, PIECE_COUNT, TRAY_LEN,
};

pub use crate::codec::{LoadError, FILE_VERSION};

pub use crate::scene::Scene;
