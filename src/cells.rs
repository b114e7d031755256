use smallvec::SmallVec;

use crate::grid_dimensions::GridDimensions;

/// A cell on the maze grid. It is nothing more than an index into the passage matrices.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: usize,
    pub column: usize,
}

impl CellCoordinate {
    pub fn new(row: usize, column: usize) -> CellCoordinate {
        CellCoordinate { row, column }
    }

    pub fn from_row_major_index(index: usize, dimensions: &GridDimensions) -> CellCoordinate {
        let row_length = dimensions.columns().0;
        let row = index / row_length;
        let column = index - (row * row_length);
        CellCoordinate::new(row, column)
    }
}

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order candidates are listed before any shuffling.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// The coordinate one cell away in this direction, or `None` if that is off the grid.
    pub fn offset(self,
                  coord: CellCoordinate,
                  dimensions: &GridDimensions)
                  -> Option<CellCoordinate> {
        let (row, column) = (coord.row, coord.column);
        let neighbour = match self {
            Direction::Up => row.checked_sub(1).map(|r| CellCoordinate::new(r, column)),
            Direction::Right => Some(CellCoordinate::new(row, column + 1)),
            Direction::Down => Some(CellCoordinate::new(row + 1, column)),
            Direction::Left => column.checked_sub(1).map(|c| CellCoordinate::new(row, c)),
        };
        neighbour.filter(|c| dimensions.is_valid_coordinate(*c))
    }
}

/// The direction to move from `a` to reach the adjacent cell `b`.
pub fn direction_between(a: CellCoordinate, b: CellCoordinate) -> Option<Direction> {
    if a.row == b.row {
        if b.column == a.column + 1 {
            return Some(Direction::Right);
        }
        if a.column == b.column + 1 {
            return Some(Direction::Left);
        }
    } else if a.column == b.column {
        if b.row == a.row + 1 {
            return Some(Direction::Down);
        }
        if a.row == b.row + 1 {
            return Some(Direction::Up);
        }
    }
    None
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn dims(rows: usize, columns: usize) -> GridDimensions {
        GridDimensions::new(RowsCount(rows), ColumnsCount(columns)).unwrap()
    }

    #[test]
    fn offsets_inside_grid() {
        let d = dims(3, 4);
        let centre = CellCoordinate::new(1, 1);
        assert_eq!(Direction::Up.offset(centre, &d), Some(CellCoordinate::new(0, 1)));
        assert_eq!(Direction::Right.offset(centre, &d), Some(CellCoordinate::new(1, 2)));
        assert_eq!(Direction::Down.offset(centre, &d), Some(CellCoordinate::new(2, 1)));
        assert_eq!(Direction::Left.offset(centre, &d), Some(CellCoordinate::new(1, 0)));
    }

    #[test]
    fn offsets_at_corners() {
        let d = dims(3, 4);
        let gc = |r, c| CellCoordinate::new(r, c);

        assert_eq!(Direction::Up.offset(gc(0, 0), &d), None);
        assert_eq!(Direction::Left.offset(gc(0, 0), &d), None);
        assert_eq!(Direction::Up.offset(gc(0, 3), &d), None);
        assert_eq!(Direction::Right.offset(gc(0, 3), &d), None);
        assert_eq!(Direction::Down.offset(gc(2, 0), &d), None);
        assert_eq!(Direction::Left.offset(gc(2, 0), &d), None);
        assert_eq!(Direction::Down.offset(gc(2, 3), &d), None);
        assert_eq!(Direction::Right.offset(gc(2, 3), &d), None);
    }

    #[test]
    fn direction_between_adjacent_cells() {
        let gc = |r, c| CellCoordinate::new(r, c);
        assert_eq!(direction_between(gc(1, 1), gc(0, 1)), Some(Direction::Up));
        assert_eq!(direction_between(gc(1, 1), gc(1, 2)), Some(Direction::Right));
        assert_eq!(direction_between(gc(1, 1), gc(2, 1)), Some(Direction::Down));
        assert_eq!(direction_between(gc(1, 1), gc(1, 0)), Some(Direction::Left));
        assert_eq!(direction_between(gc(1, 1), gc(1, 1)), None);
        assert_eq!(direction_between(gc(1, 1), gc(2, 2)), None);
        assert_eq!(direction_between(gc(1, 1), gc(1, 3)), None);
    }

    #[test]
    fn row_major_index_round_trip() {
        let d = dims(3, 4);
        assert_eq!(CellCoordinate::from_row_major_index(0, &d), CellCoordinate::new(0, 0));
        assert_eq!(CellCoordinate::from_row_major_index(5, &d), CellCoordinate::new(1, 1));
        assert_eq!(CellCoordinate::from_row_major_index(11, &d), CellCoordinate::new(2, 3));
    }
}
