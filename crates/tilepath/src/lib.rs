//! Depth-bounded A* pathfinding for tile-based maps.
//!
//! The search engine is [`AStarPathFinder`]: it owns a per-cell node table
//! sized to the map, resets it on every query, and expands cells best-first
//! by `cost + heuristic` until the target is reached, the frontier runs dry,
//! or the configured search depth is exhausted.
//!
//! ```
//! use tilepath::{AStarPathFinder, TileMap};
//! use tilepath_core::Point;
//!
//! struct Open;
//!
//! impl TileMap for Open {
//!     fn width_in_tiles(&self) -> i32 { 5 }
//!     fn height_in_tiles(&self) -> i32 { 5 }
//!     fn blocked(&self, _p: Point) -> bool { false }
//! }
//!
//! let mut finder = AStarPathFinder::new(Open, 20, false).unwrap();
//! let path = finder
//!     .find_path(Point::new(0, 0), Point::new(3, 2))
//!     .unwrap()
//!     .expect("open grid is always connected");
//! assert_eq!(path.len(), 6);
//! ```
//!
//! # Trait seams
//!
//! | Trait | Role |
//! |---|---|
//! | [`TileMap`] | Bounds, blocking, step cost and the visited hook |
//! | [`Heuristic`] | Remaining-cost estimate guiding the search |
//! | [`PathFinder`] | The query surface hosts program against |

mod distance;
mod error;
mod finder;
mod frontier;
mod heuristic;
mod neighbors;
mod node;
mod path;
mod traits;

pub use distance::{chebyshev, manhattan};
pub use error::PathError;
pub use finder::{AStarPathFinder, FinderConfig, SearchOutcome, SearchStats};
pub use heuristic::{ChebyshevHeuristic, ClosestHeuristic, Heuristic, NullHeuristic};
pub use neighbors::Movement;
pub use path::Path;
pub use traits::{PathFinder, TileMap};
