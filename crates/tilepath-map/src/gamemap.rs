use std::cell::Cell;

use rand::Rng;
use tilepath::TileMap;
use tilepath_core::{Point, Range};

/// Ground type of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Grass,
    Rock,
    Water,
}

/// Something standing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Soldier,
    Barracks,
    PowerPlant,
}

impl Unit {
    /// Whether this kind of unit can move at all.
    #[inline]
    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Soldier)
    }
}

/// A rectangular map of terrain and units.
///
/// Out-of-bounds coordinates read as rock with no unit; writes to them are
/// ignored.
#[derive(Debug, Clone)]
pub struct GameMap {
    bounds: Range,
    terrain: Vec<Terrain>,
    units: Vec<Option<Unit>>,
    visited: Vec<Cell<bool>>,
    mover: Unit,
}

impl GameMap {
    /// Width of the scene built by [`sample`](Self::sample).
    pub const SAMPLE_WIDTH: i32 = 30;
    /// Height of the scene built by [`sample`](Self::sample).
    pub const SAMPLE_HEIGHT: i32 = 30;

    /// An all-grass map with no units, routing soldiers.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::with_size(width, height);
        let len = bounds.len();
        Self {
            bounds,
            terrain: vec![Terrain::Grass; len],
            units: vec![None; len],
            visited: vec![Cell::new(false); len],
            mover: Unit::Soldier,
        }
    }

    /// A 30×30 grass field with a soldier at (4, 6) and a 2×2 barracks
    /// covering (4, 3) to (5, 4).
    pub fn sample() -> Self {
        let mut map = Self::new(Self::SAMPLE_WIDTH, Self::SAMPLE_HEIGHT);
        map.set_unit(Point::new(4, 6), Some(Unit::Soldier));

        for p in Range::new(4, 3, 6, 5) {
            map.set_unit(p, Some(Unit::Barracks));
        }
        map
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Set every cell of `area` (clipped to the map) to `terrain`.
    pub fn fill_area(&mut self, area: Range, terrain: Terrain) {
        for p in area {
            self.set_terrain(p, terrain);
        }
    }

    pub fn terrain(&self, p: Point) -> Terrain {
        self.index(p).map_or(Terrain::Rock, |i| self.terrain[i])
    }

    pub fn set_terrain(&mut self, p: Point, terrain: Terrain) {
        if let Some(i) = self.index(p) {
            self.terrain[i] = terrain;
        }
    }

    pub fn unit(&self, p: Point) -> Option<Unit> {
        self.index(p).and_then(|i| self.units[i])
    }

    pub fn set_unit(&mut self, p: Point, unit: Option<Unit>) {
        if let Some(i) = self.index(p) {
            self.units[i] = unit;
        }
    }

    /// The unit kind being routed.
    #[inline]
    pub fn mover(&self) -> Unit {
        self.mover
    }

    /// Change the unit kind being routed; affects [`TileMap::blocked`].
    pub fn set_mover(&mut self, mover: Unit) {
        self.mover = mover;
    }

    /// Whether the path finder evaluated `p` since the last
    /// [`clear_visited`](Self::clear_visited).
    pub fn visited(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.visited[i].get())
    }

    /// Number of cells evaluated since the last reset.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| v.get()).count()
    }

    pub fn clear_visited(&self) {
        for v in &self.visited {
            v.set(false);
        }
    }

    /// Turn `count` random grass cells without units into `terrain`.
    ///
    /// Returns the number of cells changed, which is smaller than `count`
    /// only when the map runs out of free grass.
    pub fn scatter(&mut self, rng: &mut impl Rng, count: usize, terrain: Terrain) -> usize {
        let mut free: Vec<Point> = self
            .bounds
            .iter()
            .filter(|&p| self.terrain(p) == Terrain::Grass && self.unit(p).is_none())
            .collect();
        let mut placed = 0;
        while placed < count && !free.is_empty() {
            let p = free.swap_remove(rng.random_range(0..free.len()));
            self.set_terrain(p, terrain);
            placed += 1;
        }
        log::debug!("scattered {placed} {terrain:?} cells");
        placed
    }
}

impl TileMap for GameMap {
    fn width_in_tiles(&self) -> i32 {
        self.bounds.width()
    }

    fn height_in_tiles(&self) -> i32 {
        self.bounds.height()
    }

    fn blocked(&self, p: Point) -> bool {
        if self.unit(p).is_some() {
            return true;
        }
        if self.mover.is_mobile() {
            return self.terrain(p) != Terrain::Grass;
        }
        true
    }

    /// Every step costs 1, diagonal or not.
    fn cost(&self, _mover: Point, _from: Point, _to: Point) -> f32 {
        1.0
    }

    fn path_finder_visited(&self, p: Point) {
        if let Some(i) = self.index(p) {
            self.visited[i].set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tilepath::{AStarPathFinder, SearchOutcome};

    #[test]
    fn sample_layout() {
        let map = GameMap::sample();
        assert_eq!(map.width_in_tiles(), 30);
        assert_eq!(map.height_in_tiles(), 30);
        assert_eq!(map.unit(Point::new(4, 6)), Some(Unit::Soldier));
        for p in [(4, 3), (4, 4), (5, 3), (5, 4)] {
            assert_eq!(map.unit(Point::from(p)), Some(Unit::Barracks));
        }
        assert_eq!(map.unit(Point::new(6, 3)), None);
        assert!(map.bounds().iter().all(|p| map.terrain(p) == Terrain::Grass));
    }

    #[test]
    fn units_and_terrain_block_soldiers() {
        let mut map = GameMap::new(4, 4);
        map.set_terrain(Point::new(1, 1), Terrain::Water);
        map.set_unit(Point::new(2, 2), Some(Unit::PowerPlant));
        assert!(map.blocked(Point::new(1, 1)));
        assert!(map.blocked(Point::new(2, 2)));
        assert!(!map.blocked(Point::new(0, 0)));
    }

    #[test]
    fn fill_area_is_clipped() {
        let mut map = GameMap::new(4, 4);
        map.fill_area(Range::new(2, 2, 6, 6), Terrain::Rock);
        let rocks: Vec<Point> = map
            .bounds()
            .iter()
            .filter(|&p| map.terrain(p) == Terrain::Rock)
            .collect();
        assert_eq!(rocks.len(), 4);
        assert!(rocks.iter().all(|p| p.x >= 2 && p.y >= 2));
    }

    #[test]
    fn buildings_cannot_move_anywhere() {
        let mut map = GameMap::new(3, 3);
        map.set_mover(Unit::Barracks);
        assert_eq!(map.mover(), Unit::Barracks);
        assert!(map.bounds().iter().all(|p| map.blocked(p)));
    }

    #[test]
    fn out_of_bounds_reads_and_writes() {
        let mut map = GameMap::new(2, 2);
        map.set_unit(Point::new(2, 0), Some(Unit::Soldier));
        map.set_terrain(Point::new(-1, 0), Terrain::Water);
        assert_eq!(map.unit(Point::new(2, 0)), None);
        assert_eq!(map.terrain(Point::new(-1, 0)), Terrain::Rock);
        assert!(!map.visited(Point::new(5, 5)));
        map.path_finder_visited(Point::new(5, 5));
        assert_eq!(map.visited_count(), 0);
    }

    #[test]
    fn visited_tracking() {
        let map = GameMap::new(3, 3);
        map.path_finder_visited(Point::new(1, 2));
        map.path_finder_visited(Point::new(1, 2));
        assert!(map.visited(Point::new(1, 2)));
        assert_eq!(map.visited_count(), 1);
        map.clear_visited();
        assert_eq!(map.visited_count(), 0);
    }

    #[test]
    fn scatter_only_touches_free_grass() {
        let mut map = GameMap::new(4, 4);
        map.set_unit(Point::new(0, 0), Some(Unit::Soldier));
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(map.scatter(&mut rng, 5, Terrain::Rock), 5);
        assert_eq!(map.terrain(Point::new(0, 0)), Terrain::Grass);
        let rocks = map.bounds().iter().filter(|&p| map.terrain(p) == Terrain::Rock).count();
        assert_eq!(rocks, 5);

        // Only 10 free grass cells remain.
        assert_eq!(map.scatter(&mut rng, 50, Terrain::Water), 10);
    }

    #[test]
    fn soldier_walks_around_barracks() {
        let map = GameMap::sample();
        let mut finder = AStarPathFinder::new(&map, 500, false).unwrap();
        let (s, t) = (Point::new(3, 3), Point::new(6, 5));
        let path = finder.find_path(s, t).unwrap().unwrap();
        assert_eq!(path.first(), Some(s));
        assert_eq!(path.last(), Some(t));
        assert_eq!(path.hops(), 5);
        assert_eq!(path.cost(&map), 5.0);
        for p in path.iter() {
            assert!(map.unit(p).is_none());
        }
        assert!(map.visited_count() > 0);
    }

    #[test]
    fn soldier_starts_on_its_own_cell() {
        let map = GameMap::sample();
        let mut finder = AStarPathFinder::new(&map, 500, true).unwrap();
        let path = finder
            .find_path(Point::new(4, 6), Point::new(4, 9))
            .unwrap()
            .unwrap();
        assert_eq!(path.hops(), 3);
    }

    #[test]
    fn unit_target_is_blocked() {
        let map = GameMap::sample();
        let mut finder = AStarPathFinder::new(&map, 500, false).unwrap();
        assert_eq!(finder.find_path(Point::new(0, 0), Point::new(4, 4)).unwrap(), None);
        assert_eq!(
            finder.last_search().unwrap().outcome,
            SearchOutcome::TargetBlocked
        );
    }
}
