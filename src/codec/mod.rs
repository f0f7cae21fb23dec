//! Save-file codec.
//!
//! A save is a flat stream of whitespace-delimited tokens, one value per
//! line: the version tag, 49 board cell ordinals (row-major over x then y),
//! 12 tray slot ordinals, 49 legal-move-mask ordinals, the piece counts,
//! the turn, three phase booleans, the selected coordinates, and the winner
//! ordinal. Loading fails closed: a bad tag, a short stream, or an
//! out-of-range token leaves the caller with a typed [`LoadError`] and no
//! partially-applied state.
//!
//! ## Ordinal table (frozen; changing it breaks every saved game)
//!
//! | ordinal | meaning            |
//! |---------|--------------------|
//! | 0       | blue piece         |
//! | 1       | red piece          |
//! | 2       | blue, selected     |
//! | 3       | red, selected      |
//! | 4       | unoccupied         |
//! | 5       | path cell          |
//! | 6       | unused cell        |
//! | 7       | legal (mask only)  |
//! | 8       | illegal (mask only)|
//!
//! The winner field reuses the table: 0 blue, 1 red, 4 none. Turn is 0 for
//! blue, 1 for red. Booleans are the tokens `true` and `false`.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use derive_more::{Display, Error};

use crate::board::{CellKind, Coord, BOARD_SIZE};
use crate::core::Player;
use crate::rules::{GameState, Selection, PIECE_COUNT, TRAY_LEN};

/// Version tag on the first line of every save file.
pub const FILE_VERSION: &str = "MORRISFILE1.3";

const BLUE: u8 = 0;
const RED: u8 = 1;
const BLUE_SELECTED: u8 = 2;
const RED_SELECTED: u8 = 3;
const UNOCCUPIED: u8 = 4;
const PATH: u8 = 5;
const INVALID: u8 = 6;
const LEGAL: u8 = 7;
const ILLEGAL: u8 = 8;

/// Why a save file could not be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum LoadError {
    #[display("save file not found")]
    NotFound,

    #[display("save file version tag mismatch")]
    VersionMismatch,

    #[display("save file is corrupt")]
    Corrupt,
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound
        } else {
            LoadError::Corrupt
        }
    }
}

/// Write a game to `out`, one token per line.
pub fn save<W: Write>(state: &GameState, out: &mut W) -> io::Result<()> {
    writeln!(out, "{FILE_VERSION}")?;

    for x in 0..BOARD_SIZE {
        for y in 0..BOARD_SIZE {
            writeln!(out, "{}", cell_ordinal(state, Coord::new(x, y)))?;
        }
    }

    for slot in 0..TRAY_LEN {
        writeln!(out, "{}", tray_ordinal(state, slot))?;
    }

    for x in 0..BOARD_SIZE {
        for y in 0..BOARD_SIZE {
            let ord = if state.mask.is_legal(Coord::new(x, y)) {
                LEGAL
            } else {
                ILLEGAL
            };
            writeln!(out, "{ord}")?;
        }
    }

    writeln!(out, "{}", state.live[Player::Blue])?;
    writeln!(out, "{}", state.live[Player::Red])?;
    writeln!(out, "{}", state.to_place[Player::Blue])?;
    writeln!(out, "{}", state.to_place[Player::Red])?;
    writeln!(out, "{}", side_ordinal(state.turn))?;
    writeln!(out, "{}", state.placing)?;
    writeln!(out, "{}", state.selection.is_some())?;
    writeln!(out, "{}", state.deletion_required)?;

    let (sel_x, sel_y) = match state.selection {
        Some(Selection::Tray(slot)) => (slot, 0),
        Some(Selection::Board(c)) => (c.x, c.y),
        None => (0, 0),
    };
    writeln!(out, "{sel_x}")?;
    writeln!(out, "{sel_y}")?;

    let winner = match state.winner {
        Some(p) => side_ordinal(p),
        None => UNOCCUPIED,
    };
    writeln!(out, "{winner}")?;

    Ok(())
}

/// Write a game to a file.
pub fn save_to_path<P: AsRef<Path>>(state: &GameState, path: P) -> io::Result<()> {
    let mut file = File::create(path)?;
    save(state, &mut file)
}

/// Read a game back from a token stream.
pub fn load<R: Read>(mut input: R) -> Result<GameState, LoadError> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .map_err(|_| LoadError::Corrupt)?;

    let mut tokens = Tokens(text.split_whitespace());

    if tokens.next()? != FILE_VERSION {
        log::warn!("[codec] rejecting save file: version tag mismatch");
        return Err(LoadError::VersionMismatch);
    }

    let mut state = GameState::with_first_player(Player::Blue);

    for x in 0..BOARD_SIZE {
        for y in 0..BOARD_SIZE {
            let at = Coord::new(x, y);
            let ord = tokens.next_u8()?;
            state.owners[at] = match (state.topology.kind(at), ord) {
                (CellKind::Invalid, INVALID) => None,
                (CellKind::Path, PATH) => None,
                (CellKind::Point, UNOCCUPIED) => None,
                (CellKind::Point, BLUE | BLUE_SELECTED) => Some(Player::Blue),
                (CellKind::Point, RED | RED_SELECTED) => Some(Player::Red),
                _ => return Err(LoadError::Corrupt),
            };
        }
    }

    for slot in 0..TRAY_LEN {
        state.tray[slot] = match tokens.next_u8()? {
            UNOCCUPIED => None,
            BLUE | BLUE_SELECTED => Some(Player::Blue),
            RED | RED_SELECTED => Some(Player::Red),
            _ => return Err(LoadError::Corrupt),
        };
    }

    state.mask.clear();
    for x in 0..BOARD_SIZE {
        for y in 0..BOARD_SIZE {
            match tokens.next_u8()? {
                LEGAL => state.mask.mark(Coord::new(x, y)),
                ILLEGAL => {}
                _ => return Err(LoadError::Corrupt),
            }
        }
    }

    state.live[Player::Blue] = tokens.next_count()?;
    state.live[Player::Red] = tokens.next_count()?;
    state.to_place[Player::Blue] = tokens.next_count()?;
    state.to_place[Player::Red] = tokens.next_count()?;

    state.turn = match tokens.next_u8()? {
        BLUE => Player::Blue,
        RED => Player::Red,
        _ => return Err(LoadError::Corrupt),
    };

    state.placing = tokens.next_bool()?;
    let piece_selected = tokens.next_bool()?;
    state.deletion_required = tokens.next_bool()?;

    let sel_x = tokens.next_usize()?;
    let sel_y = tokens.next_usize()?;

    state.winner = match tokens.next_u8()? {
        BLUE => Some(Player::Blue),
        RED => Some(Player::Red),
        UNOCCUPIED => None,
        _ => return Err(LoadError::Corrupt),
    };

    state.selection = if piece_selected {
        if state.placing {
            if sel_x >= TRAY_LEN {
                return Err(LoadError::Corrupt);
            }
            Some(Selection::Tray(sel_x))
        } else {
            let at = Coord::new(sel_x, sel_y);
            if !at.in_bounds() {
                return Err(LoadError::Corrupt);
            }
            Some(Selection::Board(at))
        }
    } else {
        None
    };

    log::debug!("[codec] loaded save, {} to move", state.turn);
    Ok(state)
}

/// Read a game from a file.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<GameState, LoadError> {
    let file = File::open(path)?;
    load(file)
}

fn side_ordinal(player: Player) -> u8 {
    match player {
        Player::Blue => BLUE,
        Player::Red => RED,
    }
}

fn cell_ordinal(state: &GameState, at: Coord) -> u8 {
    match state.topology.kind(at) {
        CellKind::Invalid => INVALID,
        CellKind::Path => PATH,
        CellKind::Point => match state.owners[at] {
            None => UNOCCUPIED,
            Some(p) => {
                if state.selection == Some(Selection::Board(at)) {
                    side_ordinal(p) + 2
                } else {
                    side_ordinal(p)
                }
            }
        },
    }
}

fn tray_ordinal(state: &GameState, slot: usize) -> u8 {
    match state.tray[slot] {
        None => UNOCCUPIED,
        Some(p) => {
            if state.selection == Some(Selection::Tray(slot)) {
                side_ordinal(p) + 2
            } else {
                side_ordinal(p)
            }
        }
    }
}

struct Tokens<'a>(std::str::SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn next(&mut self) -> Result<&'a str, LoadError> {
        self.0.next().ok_or(LoadError::Corrupt)
    }

    fn next_u8(&mut self) -> Result<u8, LoadError> {
        self.next()?.parse().map_err(|_| LoadError::Corrupt)
    }

    fn next_usize(&mut self) -> Result<usize, LoadError> {
        self.next()?.parse().map_err(|_| LoadError::Corrupt)
    }

    /// A piece count: 0 ..= PIECE_COUNT.
    fn next_count(&mut self) -> Result<u8, LoadError> {
        let n = self.next_u8()?;
        if n as usize > PIECE_COUNT {
            return Err(LoadError::Corrupt);
        }
        Ok(n)
    }

    fn next_bool(&mut self) -> Result<bool, LoadError> {
        match self.next()? {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(LoadError::Corrupt),
        }
    }
}
