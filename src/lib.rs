//! **maze_passages** generates random perfect mazes on rectangular grids and describes them as the
//! internal walls that are left standing, ready for a renderer or physics engine to build from.

pub mod cells;
pub mod generators;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod passages;
pub mod pathing;
pub mod units;
pub mod walls;
mod utils;

pub use crate::generators::generate;
pub use crate::grid_dimensions::InvalidDimensions;
pub use crate::passages::{MazePassages, PassageMatrix};
