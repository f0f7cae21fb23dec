//! Top-level screen flow.
//!
//! The application hops between a menu, a board-setup screen, the game
//! itself, and a game-over screen. That flow lives here as an explicit
//! state machine: each transition consumes the current scene and returns
//! the next one, carrying the `GameState` along where a game is in
//! progress. The rules engine knows nothing about scenes; this module knows
//! nothing about rendering.

use std::path::Path;

use crate::codec::{self, LoadError};
use crate::core::GameRng;
use crate::rules::{GameState, SetupError};

/// The screen currently in charge.
#[derive(Clone, Debug, PartialEq)]
pub enum Scene {
    MainMenu,
    CustomizeBoard(GameState),
    Game(GameState),
    GameOver(GameState),
}

impl Scene {
    /// Entry point: the application starts on the menu.
    #[must_use]
    pub fn main_menu() -> Self {
        Scene::MainMenu
    }

    /// Menu action: start a standard game.
    #[must_use]
    pub fn start_standard(self, rng: GameRng) -> Self {
        match self {
            Scene::MainMenu => Scene::Game(GameState::new(rng)),
            other => other,
        }
    }

    /// Menu action: open the board-setup screen.
    #[must_use]
    pub fn start_custom(self, rng: GameRng) -> Self {
        match self {
            Scene::MainMenu => Scene::CustomizeBoard(GameState::sandbox(rng)),
            other => other,
        }
    }

    /// Menu action: resume a saved game. On failure the menu stays up and
    /// the error is reported back for display.
    pub fn load_game<P: AsRef<Path>>(self, path: P) -> (Self, Option<LoadError>) {
        match self {
            Scene::MainMenu => match codec::load_from_path(path) {
                Ok(state) => (Scene::Game(state), None),
                Err(err) => {
                    log::warn!("[scene] load failed: {err}");
                    (Scene::MainMenu, Some(err))
                }
            },
            other => (other, None),
        }
    }

    /// Setup action: validate the sandbox position and, if it holds up,
    /// enter the game. On a violation the setup screen stays up.
    pub fn finish_setup(self) -> (Self, Option<SetupError>) {
        match self {
            Scene::CustomizeBoard(mut state) => match state.validate_setup() {
                Ok(()) => {
                    state.end_customization();
                    (Scene::Game(state), None)
                }
                Err(err) => (Scene::CustomizeBoard(state), Some(err)),
            },
            other => (other, None),
        }
    }

    /// Promote a finished game to the game-over screen. Call after every
    /// play; a game without a winner is returned unchanged.
    #[must_use]
    pub fn refresh(self) -> Self {
        match self {
            Scene::Game(state) if state.is_winner() => Scene::GameOver(state),
            other => other,
        }
    }

    /// Back to the menu from anywhere, dropping any game in progress.
    #[must_use]
    pub fn exit_to_menu(self) -> Self {
        Scene::MainMenu
    }

    /// The game being played or set up, if any.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        match self {
            Scene::MainMenu => None,
            Scene::CustomizeBoard(s) | Scene::Game(s) | Scene::GameOver(s) => Some(s),
        }
    }

    /// Mutable access for the input layer.
    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        match self {
            Scene::MainMenu => None,
            Scene::CustomizeBoard(s) | Scene::Game(s) | Scene::GameOver(s) => Some(s),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::main_menu()
    }
}
