//! Game state and the play operations.
//!
//! ## State
//!
//! - Board occupancy (`Owner` per playable point) over the fixed `Topology`
//! - Two trays of unplaced pieces (blue slots 0..6, red slots 6..12)
//! - Turn, phase, capture-pending and sandbox flags, winner
//! - The current selection (at most one, tray or board) and the legal-move
//!   mask derived from it
//!
//! ## Play
//!
//! `play_tray` and `play_board` accept whatever the input layer reports and
//! silently ignore anything that is not a legal interaction in the current
//! state. Once a winner is set the state is frozen.

use serde::{Deserialize, Serialize};

use crate::board::{Coord, Dir, Grid, MoveMask, Topology, BOARD_SIZE};
use crate::core::{GameRng, Player, PlayerPair};

use super::{LOSING_PIECE_COUNT, PIECE_COUNT, TRAY_LEN};

/// The piece a player is about to place or move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// A tray slot (placing phase).
    Tray(usize),
    /// An own piece on the board (moving phase).
    Board(Coord),
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(skip)]
    pub(crate) topology: Topology,
    pub(crate) owners: Grid<Option<Player>>,
    pub(crate) tray: [Option<Player>; TRAY_LEN],
    pub(crate) mask: MoveMask,
    pub(crate) live: PlayerPair<u8>,
    pub(crate) to_place: PlayerPair<u8>,
    pub(crate) turn: Player,
    pub(crate) placing: bool,
    pub(crate) deletion_required: bool,
    pub(crate) customizing: bool,
    pub(crate) selection: Option<Selection>,
    pub(crate) winner: Option<Player>,
}

impl GameState {
    /// Standard new game: full trays, empty board, first turn decided by a
    /// coin flip on `rng`.
    #[must_use]
    pub fn new(mut rng: GameRng) -> Self {
        let first = if rng.coin_flip() {
            Player::Blue
        } else {
            Player::Red
        };
        log::debug!("[rules] new game, {} moves first", first);
        Self::with_first_player(first)
    }

    /// Standard new game with a pinned first player.
    #[must_use]
    pub fn with_first_player(first: Player) -> Self {
        let mut tray = [None; TRAY_LEN];
        for i in 0..PIECE_COUNT {
            tray[i] = Some(Player::Blue);
            tray[TRAY_LEN - 1 - i] = Some(Player::Red);
        }

        Self {
            topology: Topology::standard(),
            owners: Grid::filled(None),
            tray,
            mask: MoveMask::new(),
            live: PlayerPair::with_value(PIECE_COUNT as u8),
            to_place: PlayerPair::with_value(PIECE_COUNT as u8),
            turn: first,
            placing: true,
            deletion_required: false,
            customizing: false,
            selection: None,
            winner: None,
        }
    }

    /// Sandbox game: empty board and trays, populated through `cycle_board`
    /// and `cycle_tray` before play begins.
    #[must_use]
    pub fn sandbox(mut rng: GameRng) -> Self {
        let first = if rng.coin_flip() {
            Player::Blue
        } else {
            Player::Red
        };
        Self::sandbox_with_first_player(first)
    }

    /// Sandbox game with a pinned first player.
    #[must_use]
    pub fn sandbox_with_first_player(first: Player) -> Self {
        Self {
            topology: Topology::standard(),
            owners: Grid::filled(None),
            tray: [None; TRAY_LEN],
            mask: MoveMask::new(),
            live: PlayerPair::with_value(0),
            to_place: PlayerPair::with_value(0),
            turn: first,
            placing: false,
            deletion_required: false,
            customizing: true,
            selection: None,
            winner: None,
        }
    }

    // === Play ===

    /// Interact with a tray slot: select or deselect one of the current
    /// player's unplaced pieces. Only meaningful in the placing phase with
    /// no capture pending.
    pub fn play_tray(&mut self, slot: usize) {
        if self.winner.is_some() || self.customizing || slot >= TRAY_LEN {
            return;
        }
        if !self.placing || self.deletion_required {
            return;
        }
        if self.tray[slot] != Some(self.turn) {
            return;
        }

        if self.selection == Some(Selection::Tray(slot)) {
            self.deselect();
            return;
        }
        if self.selection.is_some() {
            self.deselect();
        }
        self.select_tray(slot);
    }

    /// Interact with a board cell. Branches on capture-pending first, then
    /// phase: resolve a capture, place the selected tray piece, or
    /// select/move a board piece.
    pub fn play_board(&mut self, at: Coord) {
        if self.winner.is_some() || self.customizing || !at.in_bounds() {
            return;
        }

        if self.deletion_required {
            self.play_capture(at);
        } else if self.placing {
            self.play_placement(at);
        } else {
            self.play_movement(at);
        }
    }

    /// Swap the side to move. Also exposed for the sandbox screen's turn
    /// toggle.
    pub fn next_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    // === Queries ===

    #[must_use]
    pub fn board_size(&self) -> usize {
        BOARD_SIZE
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        PIECE_COUNT
    }

    #[must_use]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[must_use]
    pub fn is_blue_turn(&self) -> bool {
        self.turn == Player::Blue
    }

    #[must_use]
    pub fn is_red_turn(&self) -> bool {
        self.turn == Player::Red
    }

    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn winner_is_blue(&self) -> bool {
        self.winner == Some(Player::Blue)
    }

    #[must_use]
    pub fn winner_is_red(&self) -> bool {
        self.winner == Some(Player::Red)
    }

    #[must_use]
    pub fn requires_deletion(&self) -> bool {
        self.deletion_required
    }

    #[must_use]
    pub fn is_placing_phase(&self) -> bool {
        self.placing
    }

    #[must_use]
    pub fn is_customizing(&self) -> bool {
        self.customizing
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selection.is_some()
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// True if the board piece at `at` is the current selection.
    #[must_use]
    pub fn is_selected_at(&self, at: Coord) -> bool {
        self.selection == Some(Selection::Board(at))
    }

    /// True if the tray slot is the current selection.
    #[must_use]
    pub fn is_tray_selected_at(&self, slot: usize) -> bool {
        self.selection == Some(Selection::Tray(slot))
    }

    /// Occupant of a board cell, if any.
    #[must_use]
    pub fn owner_at(&self, at: Coord) -> Option<Player> {
        if at.in_bounds() {
            self.owners[at]
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_blue_at(&self, at: Coord) -> bool {
        self.owner_at(at) == Some(Player::Blue)
    }

    #[must_use]
    pub fn is_red_at(&self, at: Coord) -> bool {
        self.owner_at(at) == Some(Player::Red)
    }

    /// Occupant of a tray slot, if any.
    #[must_use]
    pub fn tray_owner(&self, slot: usize) -> Option<Player> {
        if slot < TRAY_LEN {
            self.tray[slot]
        } else {
            None
        }
    }

    /// True if the cell is a playable point with no piece on it.
    #[must_use]
    pub fn is_unoccupied_at(&self, at: Coord) -> bool {
        self.topology.is_point(at) && self.owner_at(at).is_none()
    }

    #[must_use]
    pub fn tray_unoccupied(&self, slot: usize) -> bool {
        slot < TRAY_LEN && self.tray[slot].is_none()
    }

    /// True if the legal-move mask marks this cell.
    #[must_use]
    pub fn is_legal_at(&self, at: Coord) -> bool {
        self.mask.is_legal(at)
    }

    /// True if the cell is part of the board graph (point or path).
    #[must_use]
    pub fn is_valid_at(&self, at: Coord) -> bool {
        self.topology.kind(at) != crate::board::CellKind::Invalid
    }

    /// True if the cell is a playable point.
    #[must_use]
    pub fn is_point_at(&self, at: Coord) -> bool {
        self.topology.is_point(at)
    }

    /// Pieces a player has left in the game (board and tray together).
    #[must_use]
    pub fn live_count(&self, player: Player) -> u8 {
        self.live[player]
    }

    /// Pieces a player has yet to place from the tray.
    #[must_use]
    pub fn to_place(&self, player: Player) -> u8 {
        self.to_place[player]
    }

    // === Branch handlers ===

    fn play_capture(&mut self, at: Coord) {
        if !self.mask.is_legal(at) {
            return;
        }

        let victim = self.turn.opponent();
        self.owners[at] = None;
        self.deletion_required = false;
        self.mask.clear();
        self.live[victim] -= 1;
        log::debug!(
            "[rules] {} captures at {}, {} down to {} pieces",
            self.turn,
            at,
            victim,
            self.live[victim]
        );

        if self.live[victim] == LOSING_PIECE_COUNT {
            self.declare_winner(self.turn);
        }
        self.next_turn();
        if self.total_moves() == 0 {
            self.declare_winner(self.turn.opponent());
        }
    }

    fn play_placement(&mut self, at: Coord) {
        let Some(Selection::Tray(slot)) = self.selection else {
            return;
        };
        if !self.is_unoccupied_at(at) {
            return;
        }

        self.deselect();
        self.owners[at] = Some(self.turn);
        self.tray[slot] = None;
        self.to_place[self.turn] -= 1;
        log::debug!("[rules] {} places at {}", self.turn, at);
        if self.to_place[Player::Blue] == 0 && self.to_place[Player::Red] == 0 {
            self.placing = false;
            log::debug!("[rules] trays empty, moving phase begins");
        }

        if self.mill_at(at) {
            self.mark_deletable();
        } else {
            // A mover who just emptied their tray and cannot move loses on
            // the spot; otherwise the turn passes.
            if self.to_place[self.turn] == 0 && self.total_moves() == 0 {
                self.declare_winner(self.turn.opponent());
            }
            self.next_turn();
        }
    }

    fn play_movement(&mut self, at: Coord) {
        if self.owners[at] == Some(self.turn) {
            if self.selection == Some(Selection::Board(at)) {
                self.deselect();
                return;
            }
            if self.selection.is_some() {
                self.deselect();
            }
            self.select_board(at);
            return;
        }

        let Some(Selection::Board(from)) = self.selection else {
            return;
        };
        if !self.mask.is_legal(at) {
            return;
        }

        self.deselect();
        self.owners[at] = Some(self.turn);
        self.owners[from] = None;
        log::debug!("[rules] {} moves {} to {}", self.turn, from, at);

        if self.mill_at(at) {
            self.mark_deletable();
        } else {
            self.next_turn();
            if self.total_moves() == 0 {
                self.declare_winner(self.turn.opponent());
            }
        }
    }

    // === Selection and masks ===

    fn select_tray(&mut self, slot: usize) {
        self.selection = Some(Selection::Tray(slot));
        self.mark_placements();
    }

    fn select_board(&mut self, at: Coord) {
        self.selection = Some(Selection::Board(at));
        self.mark_moves(at);
    }

    fn deselect(&mut self) {
        self.selection = None;
        self.mask.clear();
    }

    /// A tray piece may go to any unoccupied point.
    fn mark_placements(&mut self) {
        self.mask.clear();
        for c in self.topology.points() {
            if self.owners[c].is_none() {
                self.mask.mark(c);
            }
        }
    }

    /// A board piece may go to any adjacent unoccupied point.
    fn mark_moves(&mut self, from: Coord) {
        self.mask.clear();
        for dir in Dir::ALL {
            if let Some(dest) = self.topology.neighbor(from, dir) {
                if self.owners[dest].is_none() {
                    self.mask.mark(dest);
                }
            }
        }
    }

    /// Mark the opponent pieces the mover may capture: every piece outside
    /// a mill, or every piece if all of them sit in mills.
    fn mark_deletable(&mut self) {
        let target = self.turn.opponent();
        self.mask.clear();

        let mut free_pieces = 0;
        for c in self.topology.points() {
            if self.owners[c] == Some(target) && !self.mill_at(c) {
                self.mask.mark(c);
                free_pieces += 1;
            }
        }

        if free_pieces == 0 {
            for c in self.topology.points() {
                if self.owners[c] == Some(target) {
                    self.mask.mark(c);
                }
            }
        }

        self.deletion_required = true;
        log::debug!(
            "[rules] {} formed a mill, {} capture targets",
            self.turn,
            self.mask.count()
        );
    }

    // === Sweeps ===

    /// True if the piece at `at` completes three-in-a-line along either axis.
    pub(crate) fn mill_at(&self, at: Coord) -> bool {
        let Some(owner) = self.owner_at(at) else {
            return false;
        };

        for (back, fwd) in [(Dir::Left, Dir::Right), (Dir::Up, Dir::Down)] {
            let count = 1 + self.run_length(at, back, owner) + self.run_length(at, fwd, owner);
            if count >= 3 {
                return true;
            }
        }
        false
    }

    /// Consecutive same-owner points walking away from `from`.
    fn run_length(&self, from: Coord, dir: Dir, owner: Player) -> usize {
        let mut len = 0;
        let mut cur = from;
        while let Some(next) = self.topology.neighbor(cur, dir) {
            if self.owners[next] != Some(owner) {
                break;
            }
            len += 1;
            cur = next;
        }
        len
    }

    /// Moves available from one point.
    fn moves_from(&self, at: Coord) -> usize {
        Dir::ALL
            .into_iter()
            .filter_map(|dir| self.topology.neighbor(at, dir))
            .filter(|&dest| self.owners[dest].is_none())
            .count()
    }

    /// Moves available to the current player across the whole board.
    /// Zero means the side to move is stalemated.
    pub(crate) fn total_moves(&self) -> usize {
        self.topology
            .points()
            .filter(|&c| self.owners[c] == Some(self.turn))
            .map(|c| self.moves_from(c))
            .sum()
    }

    pub(crate) fn declare_winner(&mut self, player: Player) {
        self.winner = Some(player);
        log::info!("[rules] {} wins", player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue_game() -> GameState {
        GameState::with_first_player(Player::Blue)
    }

    #[test]
    fn test_new_game_defaults() {
        let game = blue_game();

        assert!(game.is_placing_phase());
        assert!(!game.is_winner());
        assert!(!game.requires_deletion());
        assert!(!game.is_customizing());
        assert_eq!(game.live_count(Player::Blue), 6);
        assert_eq!(game.live_count(Player::Red), 6);
        assert_eq!(game.to_place(Player::Blue), 6);
        assert_eq!(game.to_place(Player::Red), 6);
    }

    #[test]
    fn test_tray_layout() {
        let game = blue_game();

        for slot in 0..PIECE_COUNT {
            assert_eq!(game.tray_owner(slot), Some(Player::Blue));
        }
        for slot in PIECE_COUNT..TRAY_LEN {
            assert_eq!(game.tray_owner(slot), Some(Player::Red));
        }
    }

    #[test]
    fn test_seeded_first_turn_is_reproducible() {
        let a = GameState::new(GameRng::new(123));
        let b = GameState::new(GameRng::new(123));
        assert_eq!(a.turn(), b.turn());
    }

    #[test]
    fn test_tray_selection_toggles() {
        let mut game = blue_game();

        game.play_tray(0);
        assert!(game.is_tray_selected_at(0));
        // every point is open for a tray piece
        assert!(game.is_legal_at(Coord::new(0, 0)));
        assert!(game.is_legal_at(Coord::new(4, 4)));

        game.play_tray(0);
        assert!(!game.is_selected());
        assert!(!game.is_legal_at(Coord::new(0, 0)));
    }

    #[test]
    fn test_tray_selection_moves_between_slots() {
        let mut game = blue_game();

        game.play_tray(0);
        game.play_tray(1);
        assert!(!game.is_tray_selected_at(0));
        assert!(game.is_tray_selected_at(1));
    }

    #[test]
    fn test_cannot_select_opponent_tray() {
        let mut game = blue_game();

        game.play_tray(11); // red's slot
        assert!(!game.is_selected());
    }

    #[test]
    fn test_placement_advances_turn() {
        let mut game = blue_game();

        game.play_tray(0);
        game.play_board(Coord::new(0, 0));

        assert!(game.is_blue_at(Coord::new(0, 0)));
        assert!(game.tray_unoccupied(0));
        assert_eq!(game.to_place(Player::Blue), 5);
        assert!(game.is_red_turn());
        assert!(!game.is_selected());
    }

    #[test]
    fn test_placement_needs_selection() {
        let mut game = blue_game();

        game.play_board(Coord::new(0, 0));
        assert!(game.is_unoccupied_at(Coord::new(0, 0)));
        assert!(game.is_blue_turn());
    }

    #[test]
    fn test_placement_on_path_cell_ignored() {
        let mut game = blue_game();

        game.play_tray(0);
        game.play_board(Coord::new(0, 1));
        assert!(game.is_tray_selected_at(0));
        assert_eq!(game.owner_at(Coord::new(0, 1)), None);
    }

    #[test]
    fn test_placement_on_occupied_cell_ignored() {
        let mut game = blue_game();

        game.play_tray(0);
        game.play_board(Coord::new(0, 0));
        game.play_tray(11);
        game.play_board(Coord::new(0, 0));

        assert!(game.is_blue_at(Coord::new(0, 0)));
        assert!(game.is_red_turn());
        assert!(game.is_tray_selected_at(11));
    }

    #[test]
    fn test_mill_detection_across_paths() {
        let mut game = GameState::sandbox_with_first_player(Player::Blue);
        for c in [Coord::new(0, 0), Coord::new(0, 3), Coord::new(0, 6)] {
            game.cycle_board(c);
        }

        assert!(game.mill_at(Coord::new(0, 3)));
        assert!(game.mill_at(Coord::new(0, 0)));
        assert!(game.mill_at(Coord::new(0, 6)));
    }

    #[test]
    fn test_no_mill_across_center() {
        // (0,3) and (2,3) are connected, but (4,3) is cut off by the unused
        // center, so these three do not form a line.
        let mut game = GameState::sandbox_with_first_player(Player::Blue);
        for c in [Coord::new(0, 3), Coord::new(2, 3), Coord::new(4, 3)] {
            game.cycle_board(c);
        }

        assert!(!game.mill_at(Coord::new(0, 3)));
        assert!(!game.mill_at(Coord::new(2, 3)));
        assert!(!game.mill_at(Coord::new(4, 3)));
    }

    #[test]
    fn test_mixed_line_is_no_mill() {
        let mut game = GameState::sandbox_with_first_player(Player::Blue);
        game.cycle_board(Coord::new(0, 0));
        game.cycle_board(Coord::new(0, 3));
        // red at (0,6)
        game.cycle_board(Coord::new(0, 6));
        game.cycle_board(Coord::new(0, 6));

        assert!(!game.mill_at(Coord::new(0, 0)));
        assert!(!game.mill_at(Coord::new(0, 3)));
    }

    #[test]
    fn test_out_of_bounds_play_ignored() {
        let mut game = blue_game();

        game.play_tray(0);
        game.play_board(Coord::new(8, 8));
        assert!(game.is_tray_selected_at(0));
        assert!(game.is_blue_turn());
    }
}
