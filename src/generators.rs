use bit_set::BitSet;
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CellCoordinate, Direction};
use crate::grid_dimensions::{GridDimensions, InvalidDimensions};
use crate::passages::MazePassages;
use crate::units::{ColumnsCount, RowsCount};


/// The random choices a maze traversal makes.
///
/// Picking the start cell and ordering each cell's neighbours are the only places randomness is
/// consumed, so scripting both scripts the whole traversal.
pub trait TraversalRandomness {
    /// A cell on the grid to start carving from.
    fn start_cell(&mut self, dimensions: &GridDimensions) -> CellCoordinate;

    /// Reorder the candidate directions out of a cell, in place.
    fn order_directions(&mut self, directions: &mut [Direction; 4]);
}

/// Uniformly random start cell and uniformly shuffled neighbours, drawn from `R`.
#[derive(Debug, Clone)]
pub struct RandomTraversal<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomTraversal<R> {
    pub fn new(rng: R) -> RandomTraversal<R> {
        RandomTraversal { rng }
    }
}

impl<R: Rng> TraversalRandomness for RandomTraversal<R> {
    fn start_cell(&mut self, dimensions: &GridDimensions) -> CellCoordinate {
        let row = self.rng.gen_range(0..dimensions.rows().0);
        let column = self.rng.gen_range(0..dimensions.columns().0);
        CellCoordinate::new(row, column)
    }

    fn order_directions(&mut self, directions: &mut [Direction; 4]) {
        shuffle(&mut self.rng, directions);
    }
}

/// Fisher-Yates: walk down from the last index, swapping each item with a uniformly chosen item
/// at the same or a lower index.
pub fn shuffle<R: Rng + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A cell being carved from, and how far through its ordered neighbours we are.
#[derive(Debug)]
struct CarveFrame {
    cell: CellCoordinate,
    directions: [Direction; 4],
    next: usize,
}

fn enter_cell<T>(cell: CellCoordinate,
                 cell_index: usize,
                 visited: &mut BitSet,
                 randomness: &mut T,
                 stack: &mut Vec<CarveFrame>)
    where T: TraversalRandomness + ?Sized
{
    visited.insert(cell_index);
    let mut directions = Direction::ALL;
    randomness.order_directions(&mut directions);
    stack.push(CarveFrame {
        cell,
        directions,
        next: 0,
    });
}

/// Apply the recursive backtracker maze generation algorithm to a fresh grid.
///
/// A randomised depth first traversal from a random start cell. Each cell visits its neighbours in
/// shuffled order, knocking down the wall to any neighbour not yet visited and carrying on from
/// there before trying the next neighbour. Only unvisited cells are ever entered, so no loops are
/// made, and every cell of the connected grid is eventually entered: the passages form a spanning
/// tree, a perfect maze.
///
/// The recursion lives on an explicit stack of frames rather than the call stack, so large grids
/// cannot overflow it. Frames are processed exactly as the recursive formulation would, which
/// keeps the randomness consumption order, and so the output for a given seed, the same.
pub fn recursive_backtracker<T>(dimensions: GridDimensions, randomness: &mut T) -> MazePassages
    where T: TraversalRandomness + ?Sized
{
    let cells_count = dimensions.size().0;
    let mut maze = MazePassages::new(dimensions);
    let mut visited = BitSet::with_capacity(cells_count);

    let start = randomness.start_cell(&dimensions);
    let start_index = dimensions.coordinate_to_index(start)
                                .unwrap_or_else(|| {
                                    panic!("Start cell {:?} is outside the {:?} grid",
                                           start,
                                           dimensions)
                                });
    debug!("Carving {}x{} maze from {:?}",
           dimensions.rows().0,
           dimensions.columns().0,
           start);

    let mut stack = Vec::with_capacity(cells_count);
    enter_cell(start, start_index, &mut visited, randomness, &mut stack);

    while let Some(frame) = stack.last_mut() {

        if frame.next == frame.directions.len() {
            // Every neighbour tried, backtrack.
            stack.pop();
            continue;
        }

        let cell = frame.cell;
        let direction = frame.directions[frame.next];
        frame.next += 1;

        let neighbour = match direction.offset(cell, &dimensions) {
            Some(coord) => coord,
            None => continue,
        };
        let neighbour_index = dimensions.coordinate_to_index(neighbour)
                                        .expect("Offset coordinates are on the grid");
        if visited.contains(neighbour_index) {
            continue;
        }

        maze.open_passage(cell, direction);
        trace!("Opened passage {:?} from {:?} to {:?}", direction, cell, neighbour);

        enter_cell(neighbour, neighbour_index, &mut visited, randomness, &mut stack);
    }

    debug!("Carved {} passages", maze.open_passages_count().0);
    maze
}

/// Generate a perfect maze on a `rows x columns` grid.
///
/// The same seed and dimensions always give the same maze. Without a seed the generator is seeded
/// from the operating system.
pub fn generate(rows: RowsCount,
                columns: ColumnsCount,
                seed: Option<u64>)
                -> Result<MazePassages, InvalidDimensions> {

    let dimensions = GridDimensions::new(rows, columns)?;
    let rng = match seed {
        Some(s) => XorShiftRng::seed_from_u64(s),
        None => XorShiftRng::from_entropy(),
    };
    let mut randomness = RandomTraversal::new(rng);
    Ok(recursive_backtracker(dimensions, &mut randomness))
}
