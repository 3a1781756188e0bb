use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::InProgress => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Result of a successful reveal command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The game goes on, `cells` were uncovered by this command.
    Revealed { cells: CellCount },
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

/// Starts a game on a random grid seeded from the wall clock.
pub fn new_game(width: Coord, height: Coord, mine_count: CellCount) -> Result<Game> {
    Game::new(GameConfig::new(width, height, mine_count)?)
}

/// A game from the first command to the end: the grid, its statistics and the clock.
///
/// Every command validates its input before touching the grid, a rejected command leaves the game exactly as it
/// was.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    stats: Stats,
    state: GameState,
    level: Option<GameLevel>,
    started_at: Instant,
    ended_at: Option<Instant>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::generate(config, RandomMineGenerator::from_clock())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::generate(config, RandomMineGenerator::new(seed))
    }

    pub fn from_level(level: GameLevel) -> Result<Self> {
        let mut game = Self::new(level.config())?;
        game.level = Some(level);
        Ok(game)
    }

    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        Ok(Self::from_grid(Grid::generate(config, generator)?))
    }

    pub fn from_layout(layout: &MineLayout) -> Self {
        Self::from_grid(Grid::from_layout(layout))
    }

    fn from_grid(mut grid: Grid) -> Self {
        let mut stats = Stats::new();
        stats.refresh(&mut grid);
        log::debug!(
            "New game on {}x{} with {} mines",
            grid.width(),
            grid.height(),
            grid.mine_count()
        );
        Self {
            grid,
            stats,
            state: Default::default(),
            level: None,
            started_at: Instant::now(),
            ended_at: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_in_progress(&self) -> bool {
        !self.state.is_finished()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// The preset this game was started from, `None` for custom boards.
    pub fn level(&self) -> Option<GameLevel> {
        self.level
    }

    pub fn width(&self) -> Coord {
        self.grid.width()
    }

    pub fn height(&self) -> Coord {
        self.grid.height()
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Validates signed coordinates against the grid.
    pub fn locate(&self, x: i64, y: i64) -> Result<Location> {
        self.grid.locate(x, y)
    }

    /// Mines not covered by a flag, negative when the player placed more flags than there are mines.
    pub fn remaining_mines(&self) -> i64 {
        i64::from(self.stats.mines()) - i64::from(self.stats.flagged())
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    /// Whole seconds since the game started, frozen once it ends.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Instant::now())
    }

    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        self.ended_at
            .unwrap_or(now)
            .saturating_duration_since(self.started_at)
            .as_secs()
    }

    pub fn cell_view(&self, x: i64, y: i64) -> Result<CellView> {
        self.cell_view_at(self.locate(x, y)?)
    }

    pub fn cell_view_at(&self, location: Location) -> Result<CellView> {
        Ok(self.grid.cell_at(location)?.view())
    }

    /// Locations whose view changed since the previous call, in the order they were first noticed.
    pub fn drain_changed_locations(&mut self) -> Vec<Location> {
        self.stats.drain_pending_changes()
    }

    pub fn reveal(&mut self, x: i64, y: i64) -> Result<RevealOutcome> {
        self.reveal_at(self.locate(x, y)?)
    }

    /// Reveals a concealed cell, flooding outwards through cells without neighboring mines.
    pub fn reveal_at(&mut self, location: Location) -> Result<RevealOutcome> {
        let status = self.grid.cell_at(location)?.status();
        self.check_in_progress()?;
        if status == CellStatus::Revealed {
            return Err(GameError::InvalidState("cell is already revealed"));
        }

        let opened = self.flood_reveal(location);
        self.stats.refresh(&mut self.grid);

        let outcome = self.evaluate_terminal(opened);
        log::debug!("Reveal at {}: {:?}", location, outcome);
        Ok(outcome)
    }

    pub fn cycle_flag(&mut self, x: i64, y: i64) -> Result<()> {
        self.cycle_flag_at(self.locate(x, y)?)
    }

    /// Cycles the mark of a concealed cell, revealed cells are left as they are.
    pub fn cycle_flag_at(&mut self, location: Location) -> Result<()> {
        self.grid.cell_at(location)?;
        self.check_in_progress()?;

        self.grid.cell_at_mut(location)?.cycle_flag();
        self.stats.refresh(&mut self.grid);
        Ok(())
    }

    /// Breadth-first fill from `start`, each location is queued at most once.
    fn flood_reveal(&mut self, start: Location) -> CellCount {
        let mut processed = HashSet::new();
        processed.insert(start);
        let mut to_visit = VecDeque::from([start]);
        let mut opened = 0;

        while let Some(location) = to_visit.pop_front() {
            let Ok(cell) = self.grid.cell_at_mut(location) else {
                continue;
            };

            if cell.status().is_concealed() {
                opened += 1;
            }
            if !cell.reveal() {
                continue;
            }

            log::trace!("Flooding from {}", location);
            for neighbor in self.grid.iter_neighbors(location) {
                if processed.insert(neighbor) {
                    to_visit.push_back(neighbor);
                }
            }
        }

        opened
    }

    fn evaluate_terminal(&mut self, opened: CellCount) -> RevealOutcome {
        let counts = self.stats.counts();

        // flags and question marks count as mines, their accuracy does not matter
        if counts.revealed_mines == 0 && counts.concealed() == counts.mines {
            self.end_game(GameState::Won);
            RevealOutcome::Won
        } else if counts.revealed_mines > 0 {
            self.end_game(GameState::Lost);
            RevealOutcome::HitMine
        } else {
            RevealOutcome::Revealed { cells: opened }
        }
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }
        self.state = state;

        for location in self.grid.locations() {
            if let Ok(cell) = self.grid.cell_at_mut(location) {
                if cell.is_mine() {
                    cell.reveal();
                }
            }
        }
        self.stats.refresh(&mut self.grid);

        let now = Instant::now();
        self.ended_at.replace(now);
        log::debug!(
            "Game ended {:?} after {}s",
            state,
            self.elapsed_secs_at(now)
        );
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::InvalidState("game already ended"))
        } else {
            Ok(())
        }
    }
}
