//! The game state machine.
//!
//! `GameState` owns the board occupancy, the two trays, the turn/phase
//! flags, and the legal-move mask, and is the single authority on what a
//! play does. External callers mutate it through `play_tray`/`play_board`
//! (normal games) or the `cycle_*` sandbox operations, and poll the query
//! surface to render.

mod custom;
mod state;

pub use custom::SetupError;
pub use state::{GameState, Selection};

/// Pieces each player starts with.
pub const PIECE_COUNT: usize = 6;

/// Tray slots across both players; the first half is blue's, the second red's.
pub const TRAY_LEN: usize = PIECE_COUNT * 2;

/// A side reduced to this many pieces has lost.
pub const LOSING_PIECE_COUNT: u8 = 2;
