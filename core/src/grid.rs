use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Fixed-size field of cells, indexed by [`Location`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// Random grid seeded from the wall clock.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        let config = GameConfig::new(width, height, mine_count)?;
        Self::generate(config, RandomMineGenerator::from_clock())
    }

    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        Ok(Self::from_layout(&generator.generate(config)?))
    }

    /// Fills the grid from a finished layout: safe cells everywhere, then the mines, then one increment per
    /// mine on each of its neighbors.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let (width, height) = layout.size();
        let mut cells = Array2::from_elem([usize::from(width), usize::from(height)], Cell::new(false));

        for &mine in layout.mines() {
            cells[mine.to_nd_index()] = Cell::new(true);
        }
        for &mine in layout.mines() {
            for neighbor in mine.neighbors((width, height)) {
                cells[neighbor.to_nd_index()].increment_neighbor_count();
            }
        }

        Self {
            cells,
            mine_count: layout.mine_count(),
        }
    }

    pub fn width(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.dim().1 as Coord
    }

    pub fn size(&self) -> (Coord, Coord) {
        (self.width(), self.height())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn contains(&self, location: Location) -> bool {
        location.is_within(self.size())
    }

    /// Validates signed coordinates against the grid extent.
    pub fn locate(&self, x: i64, y: i64) -> Result<Location> {
        let (width, height) = self.size();
        if (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y) {
            Ok(Location::from_coords(x as Coord, y as Coord))
        } else {
            Err(GameError::OutOfBounds { x, y })
        }
    }

    pub fn cell_at(&self, location: Location) -> Result<&Cell> {
        self.check(location)?;
        Ok(&self.cells[location.to_nd_index()])
    }

    pub(crate) fn cell_at_mut(&mut self, location: Location) -> Result<&mut Cell> {
        self.check(location)?;
        Ok(&mut self.cells[location.to_nd_index()])
    }

    pub fn adjacent_locations(&self, location: Location) -> Result<SmallVec<[Location; 8]>> {
        self.check(location)?;
        Ok(self.iter_neighbors(location).collect())
    }

    /// Every location, `y` in the outer loop and `x` in the inner one.
    pub fn locations(&self) -> impl Iterator<Item = Location> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| Location::from_coords(x, y)))
    }

    pub(crate) fn iter_neighbors(&self, location: Location) -> impl Iterator<Item = Location> + use<> {
        location.neighbors(self.size())
    }

    fn check(&self, location: Location) -> Result<()> {
        if self.contains(location) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                x: location.x().into(),
                y: location.y().into(),
            })
        }
    }
}
