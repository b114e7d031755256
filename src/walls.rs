//! Static geometry for a physics or rendering layer to build a maze scene from.
//!
//! Everything is measured in the drawing area's units, with the origin at the top left corner and
//! `y` growing downwards. Rectangles are described by their centre and size.

use crate::cells::CellCoordinate;
use crate::passages::{MazePassages, PassageOrientation};

/// Thickness of an interior wall.
pub const WALL_THICKNESS: f64 = 5.0;
/// Thickness of the frame around the drawing area.
pub const BOUNDARY_THICKNESS: f64 = 2.0;
/// Goal side length as a fraction of the cell size.
pub const GOAL_CELL_FRACTION: f64 = 0.7;
/// Ball radius is the smaller cell side divided by this.
pub const BALL_RADIUS_DIVISOR: f64 = 3.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub centre_x: f64,
    pub centre_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(centre_x: f64, centre_y: f64, width: f64, height: f64) -> Rectangle {
        Rectangle {
            centre_x,
            centre_y,
            width,
            height,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub centre_x: f64,
    pub centre_y: f64,
    pub radius: f64,
}

/// Size of one grid cell in drawing units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellScale {
    pub unit_width: f64,
    pub unit_height: f64,
}

impl CellScale {
    /// Divide a `width x height` drawing area evenly between the maze's cells.
    pub fn fit(maze: &MazePassages, width: f64, height: f64) -> CellScale {
        let dimensions = maze.dimensions();
        CellScale {
            unit_width: width / dimensions.columns().0 as f64,
            unit_height: height / dimensions.rows().0 as f64,
        }
    }

    pub fn cell_centre(&self, coord: CellCoordinate) -> (f64, f64) {
        (coord.column as f64 * self.unit_width + self.unit_width / 2.0,
         coord.row as f64 * self.unit_height + self.unit_height / 2.0)
    }
}

/// One closed passage, as a static obstacle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wall {
    pub orientation: PassageOrientation,
    /// The cell on the top or left side of the wall.
    pub cell: CellCoordinate,
    pub bounds: Rectangle,
}

/// An obstacle for every wall still standing, none for removed walls.
///
/// Walls between vertically adjacent cells come first, then walls between horizontally adjacent
/// cells, each in row-major order. Every matrix entry is looked at exactly once.
pub fn interior_walls(maze: &MazePassages, scale: &CellScale) -> Vec<Wall> {
    let (ux, uy) = (scale.unit_width, scale.unit_height);
    let closed_count = maze.dimensions().internal_walls_count().0 - maze.open_passages_count().0;
    let mut walls = Vec::with_capacity(closed_count);

    for (row, column, open) in maze.horizontal_passages().iter() {
        if open {
            continue;
        }
        let (r, c) = (row.0 as f64, column.0 as f64);
        walls.push(Wall {
            orientation: PassageOrientation::Horizontal,
            cell: CellCoordinate::new(row.0, column.0),
            bounds: Rectangle::new(c * ux + ux / 2.0, r * uy + uy, ux, WALL_THICKNESS),
        });
    }

    for (row, column, open) in maze.vertical_passages().iter() {
        if open {
            continue;
        }
        let (r, c) = (row.0 as f64, column.0 as f64);
        walls.push(Wall {
            orientation: PassageOrientation::Vertical,
            cell: CellCoordinate::new(row.0, column.0),
            bounds: Rectangle::new(c * ux + ux, r * uy + uy / 2.0, WALL_THICKNESS, uy),
        });
    }

    walls
}

/// The frame around a `width x height` drawing area: top, bottom, left then right.
pub fn boundary_walls(width: f64, height: f64) -> [Rectangle; 4] {
    [Rectangle::new(width / 2.0, 0.0, width, BOUNDARY_THICKNESS),
     Rectangle::new(width / 2.0, height, width, BOUNDARY_THICKNESS),
     Rectangle::new(0.0, height / 2.0, BOUNDARY_THICKNESS, height),
     Rectangle::new(width, height / 2.0, BOUNDARY_THICKNESS, height)]
}

/// All the static geometry of one maze scene.
///
/// A layout borrows nothing from the maze it was built from; starting over means generating a new
/// maze and building a new layout.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeLayout {
    pub scale: CellScale,
    pub boundary: [Rectangle; 4],
    pub walls: Vec<Wall>,
    /// Target area in the bottom right cell.
    pub goal: Rectangle,
    /// Where the ball starts, in the top left cell.
    pub ball: Circle,
}

impl MazeLayout {
    pub fn build(maze: &MazePassages, width: f64, height: f64) -> MazeLayout {
        let scale = CellScale::fit(maze, width, height);
        let dimensions = maze.dimensions();

        let goal_cell = CellCoordinate::new(dimensions.rows().0 - 1, dimensions.columns().0 - 1);
        let (goal_x, goal_y) = scale.cell_centre(goal_cell);
        let goal = Rectangle::new(goal_x,
                                  goal_y,
                                  scale.unit_width * GOAL_CELL_FRACTION,
                                  scale.unit_height * GOAL_CELL_FRACTION);

        let (ball_x, ball_y) = scale.cell_centre(CellCoordinate::new(0, 0));
        let ball = Circle {
            centre_x: ball_x,
            centre_y: ball_y,
            radius: scale.unit_width.min(scale.unit_height) / BALL_RADIUS_DIVISOR,
        };

        MazeLayout {
            scale,
            boundary: boundary_walls(width, height),
            walls: interior_walls(maze, &scale),
            goal,
            ball,
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Direction;
    use crate::generators::generate;
    use crate::grid_dimensions::GridDimensions;
    use crate::units::{ColumnsCount, RowsCount};

    fn two_by_two() -> MazePassages {
        // ┌───────┐
        // │       │
        // ├───╴   │
        // │       │
        // └───────┘
        let dims = GridDimensions::new(RowsCount(2), ColumnsCount(2)).unwrap();
        let mut maze = MazePassages::new(dims);
        maze.open_passage(CellCoordinate::new(0, 0), Direction::Right);
        maze.open_passage(CellCoordinate::new(0, 1), Direction::Down);
        maze.open_passage(CellCoordinate::new(1, 1), Direction::Left);
        maze
    }

    #[test]
    fn scale_divides_area_between_cells() {
        let maze = generate(RowsCount(14), ColumnsCount(20), Some(1)).unwrap();
        let scale = CellScale::fit(&maze, 800.0, 560.0);
        assert_eq!(scale, CellScale { unit_width: 40.0, unit_height: 40.0 });
        assert_eq!(scale.cell_centre(CellCoordinate::new(1, 2)), (100.0, 60.0));
    }

    #[test]
    fn one_wall_per_closed_passage() {
        let maze = two_by_two();
        let scale = CellScale { unit_width: 10.0, unit_height: 20.0 };
        let walls = interior_walls(&maze, &scale);
        assert_eq!(walls,
                   vec![Wall {
                            orientation: PassageOrientation::Horizontal,
                            cell: CellCoordinate::new(0, 0),
                            bounds: Rectangle::new(5.0, 20.0, 10.0, WALL_THICKNESS),
                        }]);
    }

    #[test]
    fn vertical_wall_geometry() {
        let dims = GridDimensions::new(RowsCount(2), ColumnsCount(2)).unwrap();
        let mut maze = MazePassages::new(dims);
        maze.open_passage(CellCoordinate::new(0, 0), Direction::Down);
        maze.open_passage(CellCoordinate::new(0, 1), Direction::Down);
        maze.open_passage(CellCoordinate::new(0, 0), Direction::Right);
        let scale = CellScale { unit_width: 10.0, unit_height: 20.0 };
        let walls = interior_walls(&maze, &scale);
        assert_eq!(walls,
                   vec![Wall {
                            orientation: PassageOrientation::Vertical,
                            cell: CellCoordinate::new(1, 0),
                            bounds: Rectangle::new(10.0, 30.0, WALL_THICKNESS, 20.0),
                        }]);
    }

    #[test]
    fn perfect_maze_wall_count() {
        let maze = generate(RowsCount(14), ColumnsCount(20), Some(42)).unwrap();
        let scale = CellScale::fit(&maze, 800.0, 560.0);
        let walls = interior_walls(&maze, &scale);
        // 14*19 + 13*20 internal walls, 14*20 - 1 of them removed
        assert_eq!(walls.len(), 266 + 260 - 279);
    }

    #[test]
    fn closed_grid_has_a_wall_for_every_entry() {
        let dims = GridDimensions::new(RowsCount(3), ColumnsCount(4)).unwrap();
        let maze = MazePassages::new(dims);
        let scale = CellScale { unit_width: 1.0, unit_height: 1.0 };
        let walls = interior_walls(&maze, &scale);
        assert_eq!(walls.len(), dims.internal_walls_count().0);
        let horizontal = walls.iter()
                              .filter(|w| w.orientation == PassageOrientation::Horizontal)
                              .count();
        assert_eq!(horizontal, 2 * 4);
    }

    #[test]
    fn boundary_frame() {
        let frame = boundary_walls(100.0, 50.0);
        assert_eq!(frame[0], Rectangle::new(50.0, 0.0, 100.0, BOUNDARY_THICKNESS));
        assert_eq!(frame[1], Rectangle::new(50.0, 50.0, 100.0, BOUNDARY_THICKNESS));
        assert_eq!(frame[2], Rectangle::new(0.0, 25.0, BOUNDARY_THICKNESS, 50.0));
        assert_eq!(frame[3], Rectangle::new(100.0, 25.0, BOUNDARY_THICKNESS, 50.0));
    }

    #[test]
    fn layout_goal_and_ball() {
        let maze = two_by_two();
        let layout = MazeLayout::build(&maze, 200.0, 100.0);
        assert_eq!(layout.scale, CellScale { unit_width: 100.0, unit_height: 50.0 });
        assert_eq!(layout.goal, Rectangle::new(150.0, 75.0, 70.0, 35.0));
        assert_eq!(layout.ball.centre_x, 50.0);
        assert_eq!(layout.ball.centre_y, 25.0);
        assert!((layout.ball.radius - 50.0 / 3.0).abs() < 1e-9);
        assert_eq!(layout.walls.len(), 1);
    }

    #[test]
    fn single_cell_layout_has_no_interior_walls() {
        let maze = generate(RowsCount(1), ColumnsCount(1), Some(0)).unwrap();
        let layout = MazeLayout::build(&maze, 30.0, 30.0);
        assert!(layout.walls.is_empty());
        assert_eq!(layout.goal.centre_x, layout.ball.centre_x);
    }
}
