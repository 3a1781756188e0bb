use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// How much of a cell the player can currently see.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    Hidden,
    Flagged,
    Questioned,
    Revealed,
}

impl CellStatus {
    /// Transition applied by a flag cycle: Hidden -> Flagged -> Questioned -> Hidden.
    ///
    /// `Revealed` is a fixed point, marks cannot conceal a cell again.
    pub const fn next_mark(self) -> Self {
        use CellStatus::*;
        match self {
            Hidden => Flagged,
            Flagged => Questioned,
            Questioned => Hidden,
            Revealed => Revealed,
        }
    }

    pub const fn is_concealed(self) -> bool {
        !matches!(self, Self::Revealed)
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Mutable per-position state owned by the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    status: CellStatus,
    neighbor_mines: u8,
    dirty: bool,
}

impl Cell {
    /// New cells start hidden and dirty so that the first refresh reports every position.
    pub const fn new(mine: bool) -> Self {
        Self {
            mine,
            status: CellStatus::Hidden,
            neighbor_mines: 0,
            dirty: true,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn status(&self) -> CellStatus {
        self.status
    }

    pub const fn neighbor_mines(&self) -> u8 {
        self.neighbor_mines
    }

    /// Reveals the cell, returning `true` when its neighbors should be revealed too.
    ///
    /// Revealing an already revealed cell changes nothing and returns `false`, its neighbors were handled when it was
    /// first revealed.
    pub fn reveal(&mut self) -> bool {
        if self.status == CellStatus::Revealed {
            return false;
        }
        self.status = CellStatus::Revealed;
        self.dirty = true;
        self.neighbor_mines == 0
    }

    pub fn cycle_flag(&mut self) {
        let next = self.status.next_mark();
        if next != self.status {
            self.status = next;
            self.dirty = true;
        }
    }

    pub(crate) fn increment_neighbor_count(&mut self) {
        self.neighbor_mines += 1;
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub const fn view(&self) -> CellView {
        match self.status {
            CellStatus::Hidden => CellView::Hidden,
            CellStatus::Flagged => CellView::Flagged,
            CellStatus::Questioned => CellView::Questioned,
            CellStatus::Revealed => CellView::Revealed {
                mine: self.mine,
                neighbor_mines: self.neighbor_mines,
            },
        }
    }
}

/// Read-only projection of a cell handed to the presentation layer.
///
/// Mine and neighbor information only exists on the `Revealed` variant, a concealed view carries nothing that could
/// leak the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Questioned,
    Revealed { mine: bool, neighbor_mines: u8 },
}

impl CellView {
    pub const fn status(self) -> CellStatus {
        match self {
            Self::Hidden => CellStatus::Hidden,
            Self::Flagged => CellStatus::Flagged,
            Self::Questioned => CellStatus::Questioned,
            Self::Revealed { .. } => CellStatus::Revealed,
        }
    }

    pub const fn is_concealed(self) -> bool {
        self.status().is_concealed()
    }

    pub const fn is_mine(self) -> Result<bool> {
        match self {
            Self::Revealed { mine, .. } => Ok(mine),
            _ => Err(GameError::InvalidState("cell is not revealed")),
        }
    }

    pub const fn neighbor_mines(self) -> Result<u8> {
        match self {
            Self::Revealed { neighbor_mines, .. } => Ok(neighbor_mines),
            _ => Err(GameError::InvalidState("cell is not revealed")),
        }
    }
}
