use std::fmt;

use bit_set::BitSet;

use crate::cells::{direction_between, CellCoordinate, CoordinateSmallVec, Direction};
use crate::grid_dimensions::GridDimensions;
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, RowIndex, RowsCount};


/// Fixed shape boolean matrix, `true` meaning the wall at that entry has been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageMatrix {
    rows: RowsCount,
    columns: ColumnsCount,
    open: BitSet,
}

impl PassageMatrix {
    /// A matrix with every wall present. Either count may be zero, e.g. a single column grid has
    /// no walls between horizontally adjacent cells.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> PassageMatrix {
        PassageMatrix {
            rows,
            columns,
            open: BitSet::with_capacity(rows.0 * columns.0),
        }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Number of entries, open or closed.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The entry at `(row, column)`, `None` when outside the matrix.
    pub fn get(&self, row: RowIndex, column: ColumnIndex) -> Option<bool> {
        self.bit_index(row, column).map(|i| self.open.contains(i))
    }

    #[inline]
    pub fn is_open(&self, row: RowIndex, column: ColumnIndex) -> bool {
        self.get(row, column).unwrap_or(false)
    }

    /// Remove the wall at `(row, column)`. Returns true if the entry changed from closed to open.
    ///
    /// Panics if the entry is outside the matrix.
    pub fn open(&mut self, row: RowIndex, column: ColumnIndex) -> bool {
        let index = self.bit_index(row, column)
                        .unwrap_or_else(|| {
                            panic!("passage ({}, {}) outside {}x{} matrix",
                                   row.0,
                                   column.0,
                                   self.rows.0,
                                   self.columns.0)
                        });
        self.open.insert(index)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Every entry in row-major order, each exactly once.
    pub fn iter(&self) -> impl Iterator<Item = (RowIndex, ColumnIndex, bool)> + '_ {
        let columns = self.columns.0;
        (0..self.len()).map(move |i| {
            (RowIndex(i / columns), ColumnIndex(i % columns), self.open.contains(i))
        })
    }

    /// The matrix as nested rows, mostly useful for comparisons and debugging.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows.0)
            .map(|r| {
                (0..self.columns.0)
                    .map(|c| self.is_open(RowIndex(r), ColumnIndex(c)))
                    .collect()
            })
            .collect()
    }

    fn bit_index(&self, row: RowIndex, column: ColumnIndex) -> Option<usize> {
        if row.0 < self.rows.0 && column.0 < self.columns.0 {
            Some(row.0 * self.columns.0 + column.0)
        } else {
            None
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PassageOrientation {
    /// Between horizontally adjacent cells; stored in the vertical passages matrix.
    Vertical,
    /// Between vertically adjacent cells; stored in the horizontal passages matrix.
    Horizontal,
}

/// The maze: which internal walls of a rectangular grid have been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazePassages {
    dimensions: GridDimensions,
    vertical: PassageMatrix,
    horizontal: PassageMatrix,
}

impl MazePassages {
    /// All walls present, no passages.
    pub fn new(dimensions: GridDimensions) -> MazePassages {
        let (vr, vc) = dimensions.vertical_passages_shape();
        let (hr, hc) = dimensions.horizontal_passages_shape();
        MazePassages {
            dimensions,
            vertical: PassageMatrix::new(vr, vc),
            horizontal: PassageMatrix::new(hr, hc),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    /// `rows x (columns - 1)`: entry `(r, c)` open means `(r, c)` and `(r, c + 1)` are connected.
    #[inline]
    pub fn vertical_passages(&self) -> &PassageMatrix {
        &self.vertical
    }

    /// `(rows - 1) x columns`: entry `(r, c)` open means `(r, c)` and `(r + 1, c)` are connected.
    #[inline]
    pub fn horizontal_passages(&self) -> &PassageMatrix {
        &self.horizontal
    }

    pub fn into_matrices(self) -> (PassageMatrix, PassageMatrix) {
        (self.vertical, self.horizontal)
    }

    /// Which matrix entry holds the wall on the `direction` side of `coord`.
    /// `None` if that side is the grid boundary.
    pub fn passage_entry(&self,
                         coord: CellCoordinate,
                         direction: Direction)
                         -> Option<(PassageOrientation, RowIndex, ColumnIndex)> {

        if !self.dimensions.is_valid_coordinate(coord) {
            return None;
        }
        direction.offset(coord, &self.dimensions)?;
        let (row, column) = (coord.row, coord.column);
        let entry = match direction {
            Direction::Right => (PassageOrientation::Vertical, row, column),
            Direction::Left => (PassageOrientation::Vertical, row, column - 1),
            Direction::Down => (PassageOrientation::Horizontal, row, column),
            Direction::Up => (PassageOrientation::Horizontal, row - 1, column),
        };
        Some((entry.0, RowIndex(entry.1), ColumnIndex(entry.2)))
    }

    /// Is there a passage out of `coord` in `direction`?
    pub fn is_open(&self, coord: CellCoordinate, direction: Direction) -> bool {
        self.passage_entry(coord, direction)
            .map_or(false, |(orientation, row, column)| {
                self.matrix(orientation).is_open(row, column)
            })
    }

    /// Knock down the wall on the `direction` side of `coord`.
    /// Returns true if a wall was removed, false if there was no wall to remove.
    pub fn open_passage(&mut self, coord: CellCoordinate, direction: Direction) -> bool {
        match self.passage_entry(coord, direction) {
            Some((PassageOrientation::Vertical, row, column)) => self.vertical.open(row, column),
            Some((PassageOrientation::Horizontal, row, column)) => {
                self.horizontal.open(row, column)
            }
            None => false,
        }
    }

    /// Are two cells connected directly by a passage? Order of the arguments does not matter.
    pub fn is_linked(&self, a: CellCoordinate, b: CellCoordinate) -> bool {
        direction_between(a, b).map_or(false, |dir| self.is_open(a, dir))
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: CellCoordinate) -> CoordinateSmallVec {
        Direction::ALL
            .iter()
            .filter(|dir| self.is_open(coord, **dir))
            .filter_map(|dir| dir.offset(coord, &self.dimensions))
            .collect()
    }

    pub fn open_passages_count(&self) -> EdgesCount {
        EdgesCount(self.vertical.open_count() + self.horizontal.open_count())
    }

    /// Every open passage as the pair of cells it connects, vertical passages first.
    pub fn iter_links(&self) -> impl Iterator<Item = (CellCoordinate, CellCoordinate)> + '_ {
        let verticals = self.vertical
                            .iter()
                            .filter(|&(_, _, open)| open)
                            .map(|(r, c, _)| {
                                (CellCoordinate::new(r.0, c.0), CellCoordinate::new(r.0, c.0 + 1))
                            });
        let horizontals = self.horizontal
                              .iter()
                              .filter(|&(_, _, open)| open)
                              .map(|(r, c, _)| {
                                  (CellCoordinate::new(r.0, c.0), CellCoordinate::new(r.0 + 1, c.0))
                              });
        verticals.chain(horizontals)
    }

    fn matrix(&self, orientation: PassageOrientation) -> &PassageMatrix {
        match orientation {
            PassageOrientation::Vertical => &self.vertical,
            PassageOrientation::Horizontal => &self.horizontal,
        }
    }

    /// Draw the maze as text with box drawing glyphs, optionally filling each cell's body.
    ///
    /// Walls come from the closed entries of the two passage matrices, the frame is always drawn.
    pub fn render_text(&self, display: Option<&dyn GridDisplay>) -> String {

        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let columns_count = self.dimensions.columns().0;
        let rows_count = self.dimensions.rows().0;

        // The north most boundary is special cased, every other row draws its own southern wall.
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            output.push_str(WALL_LR_3);
            let is_east_open = self.is_open(CellCoordinate::new(0, column), Direction::Right);
            if is_east_open {
                output.push_str(WALL_LR);
            } else if column == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for (index_row, row) in self.dimensions.iter_row().enumerate() {

            let is_last_row = index_row == (rows_count - 1);

            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let is_first_column = index_column == 0;
                let is_last_column = index_column == (columns_count - 1);
                let east_open = self.is_open(cell_coord, Direction::Right);
                let south_open = self.is_open(cell_coord, Direction::Down);

                let body = display.map_or_else(|| String::from("   "),
                                               |d| d.render_cell_body(cell_coord));
                row_middle_section_render.push_str(&body);
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => {
                        if east_open {
                            WALL_LR
                        } else {
                            WALL_LRU
                        }
                    }
                    (false, true) => {
                        if south_open {
                            WALL_UD
                        } else {
                            WALL_LUD
                        }
                    }
                    (false, false) => {
                        let access_se_from_east =
                            Direction::Right.offset(cell_coord, &self.dimensions)
                                .map_or(false, |c| self.is_open(c, Direction::Down));
                        let access_se_from_south =
                            Direction::Down.offset(cell_coord, &self.dimensions)
                                .map_or(false, |c| self.is_open(c, Direction::Right));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for MazePassages {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render_text(None))
    }
}
