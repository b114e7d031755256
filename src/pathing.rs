use itertools::Itertools;
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::CellCoordinate;
use crate::passages::MazePassages;
use crate::utils::{self, FnvHashMap};


/// Step counts from a start cell to every cell reachable from it through open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: CellCoordinate,
    distances: FnvHashMap<CellCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// `None` if the start coordinate is not on the maze grid.
    pub fn new(maze: &MazePassages, start_coordinate: CellCoordinate) -> Option<Distances> {

        if !maze.dimensions().is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(maze.dimensions().size().0);
        distances.insert(start_coordinate, 0);

        // Every link is one step so the first distance written for a cell is already its shortest.
        // The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in maze.links(*cell_coord) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: CellCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Cells at the maximum distance from the start, in row-major order.
    pub fn furthest_points(&self) -> SmallVec<[CellCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` towards the start of `distances_from_start`, one linked
/// neighbour closer each step. `None` if the end point cannot be reached.
pub fn shortest_path(maze: &MazePassages,
                     distances_from_start: &Distances,
                     end_point: CellCoordinate)
                     -> Option<Vec<CellCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let closest_to_start = maze.links(current_coord)
            .into_iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(coord).map(|d| (coord, d))
            })
            .min_by_key(|&(_, d)| d);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // Not getting any closer, the distances do not belong to this maze.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The route from the ball's starting cell (top left) to the goal cell (bottom right).
pub fn solution_path(maze: &MazePassages) -> Option<Vec<CellCoordinate>> {
    let dimensions = maze.dimensions();
    let goal = CellCoordinate::new(dimensions.rows().0 - 1, dimensions.columns().0 - 1);
    let distances = Distances::new(maze, CellCoordinate::new(0, 0))?;
    shortest_path(maze, &distances, goal)
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some
/// arbitrary long path.
pub fn longest_path(maze: &MazePassages) -> Option<Vec<CellCoordinate>> {

    // The start of the longest path is the point furthest away from an arbitrary initial point
    let first_distances = Distances::new(maze, CellCoordinate::new(0, 0))?;
    let long_path_start_coordinate = first_distances.furthest_points()[0];

    let distances_from_start = Distances::new(maze, long_path_start_coordinate)?;
    let end_point = distances_from_start.furthest_points()[0];

    shortest_path(maze, &distances_from_start, end_point)
}

/// The maze as an undirected graph: one node per cell (row-major index), one edge per open
/// passage.
pub fn passage_graph(maze: &MazePassages) -> UnGraph<(), ()> {
    let dimensions = maze.dimensions();
    let mut graph = UnGraph::with_capacity(dimensions.size().0,
                                           dimensions.spanning_tree_edges().0);
    for _ in 0..dimensions.size().0 {
        let _ = graph.add_node(());
    }

    let node = |coord| {
        let index = dimensions.coordinate_to_index(coord)
                              .expect("Links iter should give valid coordinate");
        NodeIndex::new(index)
    };
    for (a, b) in maze.iter_links() {
        let _ = graph.add_edge(node(a), node(b), ());
    }
    graph
}

/// A perfect maze is a spanning tree over the grid: every cell reachable, no loops.
pub fn is_perfect_maze(maze: &MazePassages) -> bool {
    let graph = passage_graph(maze);
    graph.edge_count() == maze.dimensions().spanning_tree_edges().0 &&
    connected_components(&graph) == 1 && !is_cyclic_undirected(&graph)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Direction;
    use crate::grid_dimensions::GridDimensions;
    use crate::units::{ColumnsCount, RowsCount};

    fn closed_maze(rows: usize, columns: usize) -> MazePassages {
        MazePassages::new(GridDimensions::new(RowsCount(rows), ColumnsCount(columns)).unwrap())
    }

    // Every internal wall of a 2x2 grid removed: a loop, so not a perfect maze.
    fn looped_maze() -> MazePassages {
        let mut maze = closed_maze(2, 2);
        let gc = CellCoordinate::new;
        maze.open_passage(gc(0, 0), Direction::Right);
        maze.open_passage(gc(0, 1), Direction::Down);
        maze.open_passage(gc(1, 1), Direction::Left);
        maze.open_passage(gc(1, 0), Direction::Up);
        maze
    }

    // S-shaped single corridor over a 3x3 grid.
    fn serpentine_maze() -> MazePassages {
        let mut maze = closed_maze(3, 3);
        let gc = CellCoordinate::new;
        maze.open_passage(gc(0, 0), Direction::Right);
        maze.open_passage(gc(0, 1), Direction::Right);
        maze.open_passage(gc(0, 2), Direction::Down);
        maze.open_passage(gc(1, 2), Direction::Left);
        maze.open_passage(gc(1, 1), Direction::Left);
        maze.open_passage(gc(1, 0), Direction::Down);
        maze.open_passage(gc(2, 0), Direction::Right);
        maze.open_passage(gc(2, 1), Direction::Right);
        maze
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let maze = closed_maze(3, 3);
        assert!(Distances::new(&maze, CellCoordinate::new(3, 0)).is_none());
        assert!(Distances::new(&maze, CellCoordinate::new(0, 3)).is_none());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let maze = closed_maze(3, 3);
        let start = CellCoordinate::new(0, 0);
        let distances = Distances::new(&maze, start).unwrap();
        for coord in maze.dimensions().iter() {
            if coord == start {
                assert_eq!(distances.distance_from_start_to(coord), Some(0));
            } else {
                assert_eq!(distances.distance_from_start_to(coord), None);
            }
        }
        assert_eq!(distances.reachable_count(), 1);
        assert_eq!(distances.max(), 0);
    }

    #[test]
    fn distances_on_looped_grid() {
        let maze = looped_maze();
        let gc = CellCoordinate::new;
        let distances = Distances::new(&maze, gc(0, 0)).unwrap();
        assert_eq!(distances.start(), gc(0, 0));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points(), &[gc(1, 1)]);
    }

    #[test]
    fn shortest_path_follows_corridor() {
        let maze = serpentine_maze();
        let gc = CellCoordinate::new;
        let distances = Distances::new(&maze, gc(0, 0)).unwrap();
        assert_eq!(distances.max(), 8);
        let path = shortest_path(&maze, &distances, gc(2, 2)).unwrap();
        assert_eq!(path,
                   vec![gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 2), gc(1, 1), gc(1, 0), gc(2, 0),
                        gc(2, 1), gc(2, 2)]);
    }

    #[test]
    fn shortest_path_to_unreachable_cell_is_none() {
        let maze = closed_maze(2, 2);
        let distances = Distances::new(&maze, CellCoordinate::new(0, 0)).unwrap();
        assert_eq!(shortest_path(&maze, &distances, CellCoordinate::new(1, 1)), None);
    }

    #[test]
    fn solution_path_runs_from_top_left_to_bottom_right() {
        let maze = serpentine_maze();
        let path = solution_path(&maze).unwrap();
        assert_eq!(path.first(), Some(&CellCoordinate::new(0, 0)));
        assert_eq!(path.last(), Some(&CellCoordinate::new(2, 2)));
        assert_eq!(path.len(), 9);
    }

    #[test]
    fn solution_path_on_single_cell() {
        let maze = closed_maze(1, 1);
        assert_eq!(solution_path(&maze), Some(vec![CellCoordinate::new(0, 0)]));
    }

    #[test]
    fn longest_path_spans_corridor_ends() {
        let maze = serpentine_maze();
        let path = longest_path(&maze).unwrap();
        assert_eq!(path.len(), 9);
        let ends = [*path.first().unwrap(), *path.last().unwrap()];
        assert!(ends.contains(&CellCoordinate::new(0, 0)));
        assert!(ends.contains(&CellCoordinate::new(2, 2)));
    }

    #[test]
    fn perfect_maze_detection() {
        assert!(is_perfect_maze(&serpentine_maze()));
        assert!(is_perfect_maze(&closed_maze(1, 1)));
        assert!(!is_perfect_maze(&looped_maze()));
        assert!(!is_perfect_maze(&closed_maze(2, 2)));
    }

    #[test]
    fn passage_graph_mirrors_links() {
        let maze = serpentine_maze();
        let graph = passage_graph(&maze);
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 8);
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(1)).is_some());
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(3)).is_none());
    }
}
