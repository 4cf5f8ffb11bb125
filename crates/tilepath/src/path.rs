use std::collections::VecDeque;
use std::fmt;

use tilepath_core::Point;

use crate::traits::TileMap;

/// An ordered route of cells, first the start and last the target.
///
/// Steps compare by coordinate, so [`contains`](Self::contains) answers
/// whether a cell lies anywhere on the route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    steps: VecDeque<Point>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps, endpoints included. A single-cell path has length 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of moves, i.e. `len() - 1` for a non-empty path.
    #[inline]
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// The step at `index`, or `None` past the end.
    #[inline]
    pub fn step(&self, index: usize) -> Option<Point> {
        self.steps.get(index).copied()
    }

    /// X coordinate of the step at `index`.
    #[inline]
    pub fn x(&self, index: usize) -> Option<i32> {
        self.step(index).map(|p| p.x)
    }

    /// Y coordinate of the step at `index`.
    #[inline]
    pub fn y(&self, index: usize) -> Option<i32> {
        self.step(index).map(|p| p.y)
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.steps.front().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.steps.back().copied()
    }

    /// Add a step to the end of the path.
    pub fn append_step(&mut self, p: Point) {
        self.steps.push_back(p);
    }

    /// Add a step to the front of the path.
    pub fn prepend_step(&mut self, p: Point) {
        self.steps.push_front(p);
    }

    /// Whether the cell `p` is one of the steps.
    pub fn contains(&self, p: Point) -> bool {
        self.steps.contains(&p)
    }

    /// All steps, start first.
    #[inline]
    pub fn steps(&self) -> &VecDeque<Point> {
        &self.steps
    }

    /// Iterate over the steps from start to target.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Point> + ExactSizeIterator + '_ {
        self.steps.iter().copied()
    }

    /// Total movement cost of the route on `map`, with the first step as the
    /// mover context.
    pub fn cost<M: TileMap + ?Sized>(&self, map: &M) -> f32 {
        let Some(mover) = self.first() else {
            return 0.0;
        };
        self.iter()
            .zip(self.iter().skip(1))
            .map(|(from, to)| map.cost(mover, from, to))
            .sum()
    }
}

impl FromIterator<Point> for Path {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.steps.into()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = Point;
    type IntoIter = std::iter::Copied<std::collections::vec_deque::Iter<'a, Point>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter().copied()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_serializes_as_step_list() {
        let path: Path = [Point::new(0, 0), Point::new(1, 0)].into_iter().collect();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[{"x":0,"y":0},{"x":1,"y":0}]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
