//! A reference [`TileMap`](tilepath::TileMap) for tilepath: a rectangular
//! map of terrain with units standing on it.
//!
//! [`GameMap`] decides blocking from the unit kind currently being routed
//! (the *mover*), charges a flat cost per step and records which cells the
//! path finder evaluated, which is handy for visualising a search.

mod ascii;
mod gamemap;

pub use ascii::MapError;
pub use gamemap::{GameMap, Terrain, Unit};
