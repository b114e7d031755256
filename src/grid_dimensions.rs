use std::error::Error;
use std::fmt;

use crate::cells::CellCoordinate;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// A grid needs at least one row and one column to hold a maze, and its cell and wall counts
/// must fit in a `usize`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct InvalidDimensions {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for InvalidDimensions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "invalid maze dimensions {} rows x {} columns, both must be at least 1 and the \
                grid small enough to count its cells",
               self.rows,
               self.columns)
    }
}

impl Error for InvalidDimensions {}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl GridDimensions {
    pub fn new(rows: RowsCount,
               columns: ColumnsCount)
               -> Result<GridDimensions, InvalidDimensions> {
        // Every internal wall count is below 2 * rows * columns.
        let counts_fit = rows.0.checked_mul(columns.0)
                               .and_then(|cells| cells.checked_mul(2))
                               .is_some();
        if rows.0 == 0 || columns.0 == 0 || !counts_fit {
            return Err(InvalidDimensions {
                rows: rows.0,
                columns: columns.0,
            });
        }
        Ok(GridDimensions { rows, columns })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Shape of the walls between horizontally adjacent cells: `rows x (columns - 1)`.
    #[inline]
    pub fn vertical_passages_shape(&self) -> (RowsCount, ColumnsCount) {
        (self.rows, ColumnsCount(self.columns.0 - 1))
    }

    /// Shape of the walls between vertically adjacent cells: `(rows - 1) x columns`.
    #[inline]
    pub fn horizontal_passages_shape(&self) -> (RowsCount, ColumnsCount) {
        (RowsCount(self.rows.0 - 1), self.columns)
    }

    /// Number of internal walls, open or not, between grid adjacent cells.
    pub fn internal_walls_count(&self) -> EdgesCount {
        let (RowsCount(vr), ColumnsCount(vc)) = self.vertical_passages_shape();
        let (RowsCount(hr), ColumnsCount(hc)) = self.horizontal_passages_shape();
        EdgesCount(vr * vc + hr * hc)
    }

    /// Number of passages a perfect maze on this grid opens.
    #[inline]
    pub fn spanning_tree_edges(&self) -> EdgesCount {
        EdgesCount(self.size().0 - 1)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        coord.row < self.rows.0 && coord.column < self.columns.0
    }

    pub fn coordinate_to_index(&self, coord: CellCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns.0 + coord.column)
        } else {
            None
        }
    }

    pub fn index_to_coordinate(&self, index: usize) -> Option<CellCoordinate> {
        if index < self.size().0 {
            Some(CellCoordinate::from_row_major_index(index, self))
        } else {
            None
        }
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            dimensions: *self,
        }
    }

    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            current_index: 0,
            dimensions: *self,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    dimensions: GridDimensions,
}
impl Iterator for CellIter {
    type Item = CellCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        let coord = self.dimensions.index_to_coordinate(self.current_cell_number);
        if coord.is_some() {
            self.current_cell_number += 1;
        }
        coord
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dimensions.size().0 - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellIter {}

/// Iterates the grid one row of coordinates at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_index: usize,
    dimensions: GridDimensions,
}
impl Iterator for BatchIter {
    type Item = Vec<CellCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.dimensions.rows().0 {
            let row = self.current_index;
            let coords = (0..self.dimensions.columns().0)
                .map(|column| CellCoordinate::new(row, column))
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dimensions.rows().0 - self.current_index;
        (remaining, Some(remaining))
    }
}
