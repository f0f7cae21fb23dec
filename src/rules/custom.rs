//! Sandbox board setup.
//!
//! A sandbox game starts with nothing on the board or in the trays; the
//! setup screen populates both by cycling cells and slots, may hand the
//! first turn to either side, and must pass `validate_setup` before
//! `end_customization` opens play.

use derive_more::{Display, Error};

use crate::board::Coord;
use crate::core::Player;

use super::state::GameState;
use super::{LOSING_PIECE_COUNT, PIECE_COUNT, TRAY_LEN};

/// First rule a sandbox setup violates, rendered for the setup screen.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum SetupError {
    #[display("Number of {player} pieces must be at least {min}")]
    TooFewPieces { player: Player, min: u8 },

    #[display("Number of {player} pieces must be at most {max}")]
    TooManyPieces { player: Player, max: u8 },

    #[display("Number of Blue and Red pieces cannot both be {count}")]
    BothAtLosingCount { count: u8 },

    #[display("Number of {capped} pieces must be at most {max} due to {mills} {miller} mill(s)")]
    MillCap {
        capped: Player,
        max: u8,
        mills: u8,
        miller: Player,
    },

    #[display("Number of pieces in tray must be within 1")]
    TrayImbalance,

    #[display("Turn must be {must_be}")]
    WrongTurn { must_be: Player },

    #[display("{player} must have 1 piece on the board with {in_tray} in tray")]
    NeedOneOnBoard { player: Player, in_tray: u8 },

    #[display("{player} must have at least 2 pieces on the board with {in_tray} in tray")]
    NeedTwoOnBoard { player: Player, in_tray: u8 },
}

impl GameState {
    /// Cycle a board point through empty -> blue -> red -> empty,
    /// keeping the piece counts in step. Sandbox mode only.
    pub fn cycle_board(&mut self, at: Coord) {
        if !self.customizing || !self.is_point_at(at) {
            return;
        }

        match self.owners[at] {
            None => {
                self.owners[at] = Some(Player::Blue);
                self.live[Player::Blue] += 1;
            }
            Some(Player::Blue) => {
                self.owners[at] = Some(Player::Red);
                self.live[Player::Blue] -= 1;
                self.live[Player::Red] += 1;
            }
            Some(Player::Red) => {
                self.owners[at] = None;
                self.live[Player::Red] -= 1;
            }
        }
    }

    /// Cycle a tray slot through empty -> owner -> empty, where the owner is
    /// fixed by the slot half. Adjusts the unplaced count together with the
    /// piece count and re-derives the placing flag. Sandbox mode only.
    pub fn cycle_tray(&mut self, slot: usize) {
        if !self.customizing || slot >= TRAY_LEN {
            return;
        }

        match self.tray[slot] {
            None => {
                let side = if slot < PIECE_COUNT {
                    Player::Blue
                } else {
                    Player::Red
                };
                self.tray[slot] = Some(side);
                self.to_place[side] += 1;
                self.live[side] += 1;
            }
            Some(side) => {
                self.tray[slot] = None;
                self.to_place[side] -= 1;
                self.live[side] -= 1;
            }
        }

        // placing may switch either way while slots are edited
        self.placing = self.to_place[Player::Blue] > 0 || self.to_place[Player::Red] > 0;
    }

    /// Check the sandbox position against the rules a real game could have
    /// produced, returning the first violation.
    pub fn validate_setup(&self) -> Result<(), SetupError> {
        let piece_cap = PIECE_COUNT as u8;

        for player in Player::BOTH {
            if self.live[player] < LOSING_PIECE_COUNT {
                return Err(SetupError::TooFewPieces {
                    player,
                    min: LOSING_PIECE_COUNT,
                });
            }
            if self.live[player] > piece_cap {
                return Err(SetupError::TooManyPieces {
                    player,
                    max: piece_cap,
                });
            }
        }

        if self.live[Player::Blue] == LOSING_PIECE_COUNT
            && self.live[Player::Red] == LOSING_PIECE_COUNT
        {
            return Err(SetupError::BothAtLosingCount {
                count: LOSING_PIECE_COUNT,
            });
        }

        // A side whose pieces already stand in mills earned captures the
        // other side cannot have suffered yet.
        let in_mills = |side: Player| -> u8 {
            self.topology
                .points()
                .filter(|&c| self.owners[c] == Some(side) && self.mill_at(c))
                .count() as u8
        };
        for miller in Player::BOTH {
            let capped = miller.opponent();
            let milled = in_mills(miller);
            if milled == 3 && self.live[capped] > piece_cap - 1 {
                return Err(SetupError::MillCap {
                    capped,
                    max: piece_cap - 1,
                    mills: 1,
                    miller,
                });
            }
            if milled > 3 && self.live[capped] > piece_cap - 2 {
                return Err(SetupError::MillCap {
                    capped,
                    max: piece_cap - 2,
                    mills: 2,
                    miller,
                });
            }
        }

        if self.placing {
            let blue_tray = self.to_place[Player::Blue];
            let red_tray = self.to_place[Player::Red];

            if blue_tray.abs_diff(red_tray) > 1 {
                return Err(SetupError::TrayImbalance);
            }
            if blue_tray < red_tray && self.turn == Player::Blue {
                return Err(SetupError::WrongTurn {
                    must_be: Player::Red,
                });
            }
            if red_tray < blue_tray && self.turn == Player::Red {
                return Err(SetupError::WrongTurn {
                    must_be: Player::Blue,
                });
            }

            for player in Player::BOTH {
                let in_tray = self.to_place[player];
                if in_tray == piece_cap - 1 && self.live[player] != piece_cap {
                    return Err(SetupError::NeedOneOnBoard { player, in_tray });
                }
            }
            for player in Player::BOTH {
                let in_tray = self.to_place[player];
                if in_tray < piece_cap - 1 && self.live[player] - in_tray < 2 {
                    return Err(SetupError::NeedTwoOnBoard { player, in_tray });
                }
            }
        }

        Ok(())
    }

    /// Leave sandbox mode and evaluate the win conditions once before play
    /// begins.
    pub fn end_customization(&mut self) {
        self.customizing = false;
        log::debug!("[rules] sandbox setup complete, {} to move", self.turn);

        if self.to_place[self.turn] == 0 && self.total_moves() == 0 {
            self.declare_winner(self.turn.opponent());
        }
        if self.live[Player::Blue] == LOSING_PIECE_COUNT {
            self.declare_winner(Player::Red);
        }
        if self.live[Player::Red] == LOSING_PIECE_COUNT {
            self.declare_winner(Player::Blue);
        }
    }
}
