use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Grid dimensions and mine count of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self {
            width,
            height,
            mines,
        }
        .validate()
    }

    /// Checks `width > 0`, `height > 0` and `0 < mines < width * height`.
    pub fn validate(self) -> Result<Self> {
        if self.width == 0 {
            return Err(GameError::InvalidArgument("width must be positive"));
        }
        if self.height == 0 {
            return Err(GameError::InvalidArgument("height must be positive"));
        }
        if self.mines == 0 {
            return Err(GameError::InvalidArgument("at least one mine is required"));
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::InvalidArgument(
                "mine count must leave at least one safe cell",
            ));
        }
        Ok(self)
    }

    pub const fn size(&self) -> (Coord, Coord) {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

/// Named difficulty presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameLevel {
    SuperEasy,
    Easy,
    Moderate,
    Hard,
}

impl GameLevel {
    pub const ALL: [GameLevel; 4] = [Self::SuperEasy, Self::Easy, Self::Moderate, Self::Hard];

    pub const fn number(self) -> u8 {
        use GameLevel::*;
        match self {
            SuperEasy => 0,
            Easy => 1,
            Moderate => 2,
            Hard => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.number() == number)
    }

    pub const fn description(self) -> &'static str {
        use GameLevel::*;
        match self {
            SuperEasy => "Super Easy",
            Easy => "Easy",
            Moderate => "Moderate",
            Hard => "Hard",
        }
    }

    pub const fn config(self) -> GameConfig {
        use GameLevel::*;
        let (width, height, mines) = match self {
            SuperEasy => (9, 9, 4),
            Easy => (9, 9, 9),
            Moderate => (16, 16, 40),
            Hard => (30, 16, 99),
        };
        GameConfig {
            width,
            height,
            mines,
        }
    }
}

impl Default for GameLevel {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for GameLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for GameLevel {
    type Err = GameError;

    /// Accepts the level number or its name in any case, ignoring spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u8>() {
            return Self::from_number(number).ok_or(GameError::InvalidArgument("unknown level number"));
        }

        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|level| {
                let name: String = level
                    .description()
                    .chars()
                    .filter(|c| *c != ' ')
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                name == normalized
            })
            .ok_or(GameError::InvalidArgument("unknown level name"))
    }
}
