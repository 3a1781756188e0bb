use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Aggregate counts over a grid, plus the locations that changed since the consumer last asked.
///
/// Counts are rebuilt from scratch on every [`Stats::refresh`]. Changed locations accumulate across refreshes in
/// first-seen order until [`Stats::drain_pending_changes`] hands them out.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    counts: StatCounts,
    pending: Vec<Location>,
    pending_set: HashSet<Location>,
}

/// Snapshot of the aggregate counts taken by the last refresh.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCounts {
    pub hidden: CellCount,
    pub flagged: CellCount,
    pub questioned: CellCount,
    pub revealed: CellCount,
    pub mines: CellCount,
    pub revealed_mines: CellCount,
}

impl StatCounts {
    /// Cells the player has not uncovered yet, marks included.
    pub const fn concealed(&self) -> CellCount {
        self.hidden + self.flagged + self.questioned
    }
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescans `grid` in row-major order and consumes every dirty flag.
    pub fn refresh(&mut self, grid: &mut Grid) {
        let mut counts = StatCounts::default();

        for location in grid.locations() {
            let Ok(cell) = grid.cell_at_mut(location) else {
                continue;
            };

            if cell.take_dirty() && self.pending_set.insert(location) {
                self.pending.push(location);
            }

            if cell.is_mine() {
                counts.mines += 1;
                if cell.status() == CellStatus::Revealed {
                    counts.revealed_mines += 1;
                }
            }

            match cell.status() {
                CellStatus::Hidden => counts.hidden += 1,
                CellStatus::Flagged => counts.flagged += 1,
                CellStatus::Questioned => counts.questioned += 1,
                CellStatus::Revealed => counts.revealed += 1,
            }
        }

        log::trace!("Stats refreshed: {:?}, {} pending", counts, self.pending.len());
        self.counts = counts;
    }

    /// Hands out the accumulated changes, leaving the accumulator empty.
    pub fn drain_pending_changes(&mut self) -> Vec<Location> {
        self.pending_set.clear();
        core::mem::take(&mut self.pending)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn counts(&self) -> StatCounts {
        self.counts
    }

    pub fn hidden(&self) -> CellCount {
        self.counts.hidden
    }

    pub fn flagged(&self) -> CellCount {
        self.counts.flagged
    }

    pub fn questioned(&self) -> CellCount {
        self.counts.questioned
    }

    pub fn revealed(&self) -> CellCount {
        self.counts.revealed
    }

    pub fn mines(&self) -> CellCount {
        self.counts.mines
    }

    pub fn revealed_mines(&self) -> CellCount {
        self.counts.revealed_mines
    }

    pub fn concealed(&self) -> CellCount {
        self.counts.concealed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: Coord, y: Coord) -> Location {
        Location::from_coords(x, y)
    }

    fn grid() -> Grid {
        let layout = MineLayout::from_mine_locations((3, 2), &[loc(2, 1)]).unwrap();
        Grid::from_layout(&layout)
    }

    #[test]
    fn first_refresh_reports_every_cell_in_row_major_order() {
        let mut grid = grid();
        let mut stats = Stats::new();

        stats.refresh(&mut grid);

        assert_eq!(
            stats.drain_pending_changes(),
            [loc(0, 0), loc(1, 0), loc(2, 0), loc(0, 1), loc(1, 1), loc(2, 1)]
        );
        assert_eq!(stats.hidden(), 6);
        assert_eq!(stats.mines(), 1);
        assert_eq!(stats.revealed_mines(), 0);
    }

    #[test]
    fn drain_empties_the_accumulator() {
        let mut grid = grid();
        let mut stats = Stats::new();
        stats.refresh(&mut grid);

        assert!(!stats.drain_pending_changes().is_empty());
        assert!(stats.drain_pending_changes().is_empty());

        stats.refresh(&mut grid);
        assert!(!stats.has_pending_changes());
    }

    #[test]
    fn changes_accumulate_across_refreshes_without_duplicates() {
        let mut grid = grid();
        let mut stats = Stats::new();
        stats.refresh(&mut grid);
        stats.drain_pending_changes();

        grid.cell_at_mut(loc(1, 1)).unwrap().cycle_flag();
        stats.refresh(&mut grid);
        grid.cell_at_mut(loc(0, 0)).unwrap().cycle_flag();
        grid.cell_at_mut(loc(1, 1)).unwrap().cycle_flag();
        stats.refresh(&mut grid);

        assert_eq!(stats.drain_pending_changes(), [loc(1, 1), loc(0, 0)]);
        assert_eq!(stats.flagged(), 1);
        assert_eq!(stats.questioned(), 1);
        assert_eq!(stats.hidden(), 4);
        assert_eq!(stats.concealed(), 6);
    }

    #[test]
    fn counts_are_recomputed_from_scratch() {
        let mut grid = grid();
        let mut stats = Stats::new();

        grid.cell_at_mut(loc(2, 1)).unwrap().reveal();
        grid.cell_at_mut(loc(0, 0)).unwrap().reveal();
        stats.refresh(&mut grid);
        stats.refresh(&mut grid);

        assert_eq!(
            stats.counts(),
            StatCounts {
                hidden: 4,
                flagged: 0,
                questioned: 0,
                revealed: 2,
                mines: 1,
                revealed_mines: 1,
            }
        );
    }
}
