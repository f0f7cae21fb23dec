//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The two piece colors. Blue is index 0, red is index 1; the codec and the
//! tray layout both rely on that ordering.
//!
//! ## PlayerPair
//!
//! Two-slot storage indexable by `Player`, the per-player companion used for
//! piece counts. Supports iteration and `Index`/`IndexMut` access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Blue,
    Red,
}

impl Player {
    /// Both players, blue first.
    pub const BOTH: [Player; 2] = [Player::Blue, Player::Red];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// Storage index: blue 0, red 1.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Blue => 0,
            Player::Red => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Blue => write!(f, "Blue"),
            Player::Red => write!(f, "Red"),
        }
    }
}

/// Per-player data storage.
///
/// ## Example
///
/// ```
/// use morris::{Player, PlayerPair};
///
/// let mut pieces: PlayerPair<u8> = PlayerPair::with_value(6);
/// pieces[Player::Red] -= 1;
///
/// assert_eq!(pieces[Player::Blue], 6);
/// assert_eq!(pieces[Player::Red], 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a pair from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Blue), factory(Player::Red)],
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Create a pair with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's entry.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's entry.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs, blue first.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::BOTH.iter().map(move |&p| (p, self.get(p)))
    }
}

impl<T> Index<Player> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerPair<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
