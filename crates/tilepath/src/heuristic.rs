use tilepath_core::Point;

use crate::distance::{chebyshev, manhattan};
use crate::traits::TileMap;

/// Estimate of the remaining cost from a cell to the target.
///
/// The estimate must never exceed the true remaining cost (admissible),
/// otherwise returned paths may be longer than necessary.
///
/// Closures of the form `Fn(Point, Point) -> f32` are heuristics too.
pub trait Heuristic {
    /// Estimated cost of travelling from `from` to `target` on `map`.
    fn estimate<M: TileMap + ?Sized>(&self, map: &M, from: Point, target: Point) -> f32;
}

/// Manhattan distance to the target, the default strategy.
///
/// Admissible when every step costs at least 1 and movement is 4-connected.
/// With diagonal moves at cost 1 it can overestimate; use
/// [`ChebyshevHeuristic`] there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosestHeuristic;

impl Heuristic for ClosestHeuristic {
    #[inline]
    fn estimate<M: TileMap + ?Sized>(&self, _map: &M, from: Point, target: Point) -> f32 {
        manhattan(from, target) as f32
    }
}

/// Chebyshev distance to the target; admissible for 8-connected movement
/// where a diagonal step costs the same as a straight one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChebyshevHeuristic;

impl Heuristic for ChebyshevHeuristic {
    #[inline]
    fn estimate<M: TileMap + ?Sized>(&self, _map: &M, from: Point, target: Point) -> f32 {
        chebyshev(from, target) as f32
    }
}

/// Always zero. Turns the search into uniform-cost (Dijkstra) ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullHeuristic;

impl Heuristic for NullHeuristic {
    #[inline]
    fn estimate<M: TileMap + ?Sized>(&self, _map: &M, _from: Point, _target: Point) -> f32 {
        0.0
    }
}

impl<F> Heuristic for F
where
    F: Fn(Point, Point) -> f32,
{
    #[inline]
    fn estimate<M: TileMap + ?Sized>(&self, _map: &M, from: Point, target: Point) -> f32 {
        self(from, target)
    }
}
