use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Strategy deciding where the mines of a new game go.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// Mine positions of a grid, kept in placement order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    size: (Coord, Coord),
    mines: Vec<Location>,
}

impl MineLayout {
    /// Builds a layout from explicit positions, the count must satisfy the same bounds as a [`GameConfig`].
    pub fn from_mine_locations(size: (Coord, Coord), mines: &[Location]) -> Result<Self> {
        let config = GameConfig::new(size.0, size.1, mines.len().try_into().unwrap_or(CellCount::MAX))?;

        let mut occupied: Array2<bool> = Array2::default([usize::from(size.0), usize::from(size.1)]);
        for &location in mines {
            if !location.is_within(size) {
                return Err(GameError::OutOfBounds {
                    x: location.x().into(),
                    y: location.y().into(),
                });
            }
            let slot = &mut occupied[location.to_nd_index()];
            if *slot {
                return Err(GameError::InvalidArgument("duplicate mine location"));
            }
            *slot = true;
        }

        Ok(Self::new_unchecked(config, mines.to_vec()))
    }

    pub(crate) fn new_unchecked(config: GameConfig, mines: Vec<Location>) -> Self {
        Self {
            size: (config.width, config.height),
            mines,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.size.0,
            height: self.size.1,
            mines: self.mine_count(),
        }
    }

    pub fn size(&self) -> (Coord, Coord) {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn mines(&self) -> &[Location] {
        &self.mines
    }

    pub fn contains_mine(&self, location: Location) -> bool {
        self.mines.contains(&location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mine_locations_keeps_order() {
        let mines = [Location::from_coords(2, 1), Location::from_coords(0, 0)];
        let layout = MineLayout::from_mine_locations((3, 3), &mines).unwrap();

        assert_eq!(layout.mines(), &mines);
        assert_eq!(layout.game_config(), GameConfig::new(3, 3, 2).unwrap());
        assert!(layout.contains_mine(Location::from_coords(0, 0)));
        assert!(!layout.contains_mine(Location::from_coords(1, 1)));
    }

    #[test]
    fn from_mine_locations_rejects_outside_positions() {
        let result = MineLayout::from_mine_locations((3, 3), &[Location::from_coords(3, 0)]);
        assert_eq!(result, Err(GameError::OutOfBounds { x: 3, y: 0 }));
    }

    #[test]
    fn from_mine_locations_rejects_duplicates() {
        let mine = Location::from_coords(1, 1);
        let result = MineLayout::from_mine_locations((3, 3), &[mine, mine]);
        assert!(matches!(result, Err(GameError::InvalidArgument(_))));
    }

    #[test]
    fn from_mine_locations_rejects_empty_and_full_layouts() {
        assert!(MineLayout::from_mine_locations((2, 2), &[]).is_err());

        let all: Vec<_> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .into_iter()
            .map(Location::from)
            .collect();
        assert!(MineLayout::from_mine_locations((2, 2), &all).is_err());
    }
}
