use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// A position on the grid, `x` grows to the right and `y` grows downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    x: Coord,
    y: Coord,
}

impl Location {
    /// Builds a location from signed coordinates, rejecting negative values and values that do not fit
    /// in [`Coord`].
    pub fn new(x: i64, y: i64) -> Result<Self> {
        let x = Coord::try_from(x).map_err(|_| {
            GameError::InvalidArgument(if x < 0 {
                "negative x-coordinate"
            } else {
                "x-coordinate out of range"
            })
        })?;
        let y = Coord::try_from(y).map_err(|_| {
            GameError::InvalidArgument(if y < 0 {
                "negative y-coordinate"
            } else {
                "y-coordinate out of range"
            })
        })?;
        Ok(Self { x, y })
    }

    pub const fn from_coords(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub const fn x(self) -> Coord {
        self.x
    }

    pub const fn y(self) -> Coord {
        self.y
    }

    pub const fn is_within(self, (width, height): (Coord, Coord)) -> bool {
        self.x < width && self.y < height
    }

    /// The up-to-8 neighbors inside `bounds`, row by row, center excluded.
    pub fn neighbors(self, (width, height): (Coord, Coord)) -> impl Iterator<Item = Location> + use<> {
        let columns = self.x.saturating_sub(1)..=self.x.saturating_add(1).min(width.saturating_sub(1));
        let rows = self.y.saturating_sub(1)..=self.y.saturating_add(1).min(height.saturating_sub(1));
        rows.flat_map(move |y| columns.clone().map(move |x| Location::from_coords(x, y)))
            .filter(move |&neighbor| neighbor != self)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(Coord, Coord)> for Location {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::from_coords(x, y)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Location {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.x.into(), self.y.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: Coord, y: Coord) -> Location {
        Location::from_coords(x, y)
    }

    #[test]
    fn new_rejects_negative_coordinates() {
        assert!(matches!(
            Location::new(-1, 0),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            Location::new(0, -3),
            Err(GameError::InvalidArgument(_))
        ));
        assert_eq!(Location::new(4, 2), Ok(loc(4, 2)));
    }

    #[test]
    fn new_rejects_coordinates_past_coord_range() {
        assert!(matches!(
            Location::new(i64::from(Coord::MAX) + 1, 0),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn display_uses_tuple_form() {
        assert_eq!(format!("{}", loc(3, 7)), "(3, 7)");
    }

    #[test]
    fn interior_neighbors_are_row_major() {
        let neighbors: Vec<_> = loc(1, 1).neighbors((3, 3)).collect();

        assert_eq!(
            neighbors,
            [
                loc(0, 0),
                loc(1, 0),
                loc(2, 0),
                loc(0, 1),
                loc(2, 1),
                loc(0, 2),
                loc(1, 2),
                loc(2, 2),
            ]
        );
    }

    #[test]
    fn corner_neighbors_are_clipped() {
        let neighbors: Vec<_> = loc(0, 0).neighbors((9, 9)).collect();
        assert_eq!(neighbors, [loc(1, 0), loc(0, 1), loc(1, 1)]);

        let neighbors: Vec<_> = loc(8, 8).neighbors((9, 9)).collect();
        assert_eq!(neighbors, [loc(7, 7), loc(8, 7), loc(7, 8)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(loc(0, 0).neighbors((1, 1)).count(), 0);
    }

    #[test]
    fn edge_neighbors_on_a_single_row() {
        let neighbors: Vec<_> = loc(2, 0).neighbors((4, 1)).collect();
        assert_eq!(neighbors, [loc(1, 0), loc(3, 0)]);
    }
}
