use std::rc::Rc;
use std::sync::Arc;

use tilepath_core::{Point, Range};

use crate::{Path, PathError};

/// A tile-based map the path finder can search.
///
/// The finder only reads from the map, apart from the
/// [`path_finder_visited`](Self::path_finder_visited) notification.
pub trait TileMap {
    /// Number of columns. Valid x coordinates are `0..width`.
    fn width_in_tiles(&self) -> i32;

    /// Number of rows. Valid y coordinates are `0..height`.
    fn height_in_tiles(&self) -> i32;

    /// Whether the mover currently being routed may not enter `p`.
    fn blocked(&self, p: Point) -> bool;

    /// Cost of stepping from `from` into the adjacent cell `to`.
    ///
    /// `mover` is the start cell of the current search, which identifies the
    /// unit being moved. Must be `>= 0`.
    fn cost(&self, mover: Point, from: Point, to: Point) -> f32 {
        let _ = (mover, from, to);
        1.0
    }

    /// Called once for every neighbor the search evaluates. Has no effect on
    /// the result.
    fn path_finder_visited(&self, p: Point) {
        let _ = p;
    }

    /// The map bounds as a half-open range anchored at the origin.
    fn bounds(&self) -> Range {
        Range::with_size(self.width_in_tiles(), self.height_in_tiles())
    }
}

macro_rules! forward_tile_map {
    ($($ptr:ty),*) => {$(
        impl<T: TileMap + ?Sized> TileMap for $ptr {
            #[inline]
            fn width_in_tiles(&self) -> i32 {
                (**self).width_in_tiles()
            }

            #[inline]
            fn height_in_tiles(&self) -> i32 {
                (**self).height_in_tiles()
            }

            #[inline]
            fn blocked(&self, p: Point) -> bool {
                (**self).blocked(p)
            }

            #[inline]
            fn cost(&self, mover: Point, from: Point, to: Point) -> f32 {
                (**self).cost(mover, from, to)
            }

            #[inline]
            fn path_finder_visited(&self, p: Point) {
                (**self).path_finder_visited(p)
            }

            #[inline]
            fn bounds(&self) -> Range {
                (**self).bounds()
            }
        }
    )*};
}

forward_tile_map!(&T, Rc<T>, Arc<T>);

/// A component able to route between two cells.
pub trait PathFinder {
    /// Find a path from `start` to `target`.
    ///
    /// Returns `Ok(None)` when no path exists within the finder's limits and
    /// an error only when the arguments themselves are invalid.
    fn find_path(&mut self, start: Point, target: Point) -> Result<Option<Path>, PathError>;
}
