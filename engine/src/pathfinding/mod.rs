//! Pathfinding Module
//!
//! Cheapest-path search across the hex grid backed by a bucket priority queue.
//!
//! # Example
//!
//! ```ignore
//! use hex_terrain_engine::pathfinding::Pathfinder;
//!
//! let mut pathfinder = Pathfinder::new();
//! let path = pathfinder.find_path(&mut grid, from, to);
//! for cell in path {
//!     // walk
//! }
//! ```

pub mod priority_queue;
pub mod search;

pub use priority_queue::{CellPriorityQueue, PriorityLinks};
pub use search::{Pathfinder, path_cost, step_cost};
