//! **tilepath-core** — geometry primitives for tile-based maps.
//!
//! This crate provides the coordinate types shared by the *tilepath*
//! crates: a cell [`Point`] and a half-open rectangle [`Range`] used for map
//! bounds.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
