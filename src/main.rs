use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use maze_passages::{
    cells::CellCoordinate,
    generators,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    passages::{MazePassages, PassageOrientation},
    pathing,
    units::{ColumnsCount, RowsCount},
    walls::MazeLayout,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Maze passages

Usage:
    maze_passages_driver -h | --help
    maze_passages_driver [(--grid-size=<n>|[--rows=<r> --columns=<c>])] [--seed=<s>] [--show-path|--show-distances|--mark-start-end] [--text-out=<path>] [--walls-out=<path>] [--area-width=<w>] [--area-height=<h>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --rows=<r>             Number of cell rows in the grid [default: 14].
    --columns=<c>          Number of cell columns in the grid [default: 20].
    --seed=<s>             Seed for the maze generator. The same seed and grid size always give the same maze.
    --show-path            Show the path from the top left cell to the goal in the bottom right cell.
    --show-distances       Show the step count from the top left cell to every other cell.
    --mark-start-end       Draw an 'S' (start) and 'E' (goal) in the top left and bottom right cells.
    --text-out=<path>      Output file path for the textual rendering of the maze, instead of stdout.
    --walls-out=<path>     Write the scene geometry: one line per rectangle, `kind centre_x centre_y width height`.
    --area-width=<w>       Width of the area the scene geometry fills [default: 800].
    --area-height=<h>      Height of the area the scene geometry fills [default: 560].
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_walls_out: String,
    flag_area_width: f64,
    flag_area_height: f64,
    flag_save_edges: String,
}

// `errors` holds the Error, ErrorKind, ResultExt and Result types `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            InvalidMaze(::maze_passages::InvalidDimensions);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (rows, columns) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_rows, args.flag_columns)
    };

    let maze = generators::generate(RowsCount(rows), ColumnsCount(columns), args.flag_seed)?;
    info!("Generated {}x{} maze with {} open passages",
          rows,
          columns,
          maze.open_passages_count().0);

    let rendered = render_maze_text(&maze, &args)?;
    if args.flag_text_out.is_empty() {
        println!("{}", rendered);
    } else {
        write_text_to_file(&rendered, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_walls_out.is_empty() {
        save_scene_geometry(&maze, &args)?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    Ok(())
}

/// Draw the maze as text, filling the cells with whatever the arguments ask to see.
fn render_maze_text(maze: &MazePassages, maze_args: &MazeArgs) -> Result<String> {

    let dimensions = maze.dimensions();
    let start = CellCoordinate::new(0, 0);
    let goal = CellCoordinate::new(dimensions.rows().0 - 1, dimensions.columns().0 - 1);

    let display: Option<Box<dyn GridDisplay>> = if maze_args.flag_show_path {
        let path = pathing::solution_path(maze)
            .ok_or("Maze generation failed to connect the start and the goal.")?;
        Some(Box::new(PathDisplay::new(&path)))
    } else if maze_args.flag_show_distances {
        let distances = pathing::Distances::new(maze, start)
            .ok_or("Invalid start coordinate from which to show path distances.")?;
        Some(Box::new(distances))
    } else if maze_args.flag_mark_start_end {
        Some(Box::new(StartEndPointsDisplay::new(vec![start], vec![goal])))
    } else {
        None
    };

    Ok(maze.render_text(display.as_deref()))
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_scene_geometry(maze: &MazePassages, maze_args: &MazeArgs) -> Result<()> {

    let layout = MazeLayout::build(maze, maze_args.flag_area_width, maze_args.flag_area_height);

    let mut scene_data = String::new();
    let mut push_rect = |kind: &str, x: f64, y: f64, w: f64, h: f64| {
        scene_data.push_str(&format!("{} {} {} {} {}\n", kind, x, y, w, h));
    };
    for rect in layout.boundary.iter() {
        push_rect("boundary", rect.centre_x, rect.centre_y, rect.width, rect.height);
    }
    for wall in &layout.walls {
        let kind = match wall.orientation {
            PassageOrientation::Horizontal => "wall_h",
            PassageOrientation::Vertical => "wall_v",
        };
        let b = wall.bounds;
        push_rect(kind, b.centre_x, b.centre_y, b.width, b.height);
    }
    let goal = layout.goal;
    push_rect("goal", goal.centre_x, goal.centre_y, goal.width, goal.height);
    let ball = layout.ball;
    push_rect("ball", ball.centre_x, ball.centre_y, 2.0 * ball.radius, 2.0 * ball.radius);

    info!("Writing {} interior walls to {}", layout.walls.len(), maze_args.flag_walls_out);
    write_text_to_file(&scene_data, &maze_args.flag_walls_out)
        .chain_err(|| format!("Failed to write scene geometry to {}", maze_args.flag_walls_out))?;

    Ok(())
}

fn save_maze_graph(maze: &MazePassages, file_path: &str) -> Result<()> {

    let dimensions = maze.dimensions();
    let mut graph_data = String::new();
    let vertices_count = dimensions.size().0;
    let edges_count = maze.open_passages_count().0;
    graph_data.push_str(&format!("{} {}\n", vertices_count, edges_count));

    for (src, dst) in maze.iter_links() {
        let index_a = dimensions.coordinate_to_index(src)
                                .ok_or("Links iter should give valid coordinate")?;
        let index_b = dimensions.coordinate_to_index(dst)
                                .ok_or("Links iter should give valid coordinate")?;
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
