use std::sync::Arc;

use parking_lot::Mutex;

use crate::*;

/// Cloneable handle to a game shared with a poller on another thread.
///
/// Commands and queries hold the lock for their whole duration, a poller never sees half of a flood fill.
#[derive(Clone, Debug)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Runs `f` with exclusive access to the game.
    pub fn with<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// Swaps in a new game, e.g. when the player picks another level.
    pub fn replace(&self, game: Game) -> Game {
        core::mem::replace(&mut *self.inner.lock(), game)
    }

    pub fn reveal(&self, x: i64, y: i64) -> Result<RevealOutcome> {
        self.with(|game| game.reveal(x, y))
    }

    pub fn cycle_flag(&self, x: i64, y: i64) -> Result<()> {
        self.with(|game| game.cycle_flag(x, y))
    }

    pub fn drain_changed_locations(&self) -> Vec<Location> {
        self.with(|game| game.drain_changed_locations())
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.with(|game| game.elapsed_secs())
    }

    pub fn remaining_mines(&self) -> i64 {
        self.with(|game| game.remaining_mines())
    }

    pub fn state(&self) -> GameState {
        self.with(|game| game.state())
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}
