use tilepath_core::Point;

use crate::error::PathError;
use crate::frontier::Frontier;
use crate::heuristic::{ClosestHeuristic, Heuristic};
use crate::neighbors::Movement;
use crate::node::{NodeState, NodeTable};
use crate::path::Path;
use crate::traits::{PathFinder, TileMap};

/// Search limits of an [`AStarPathFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinderConfig {
    /// Deepest hop count the search explores before giving up. No returned
    /// path has more moves than this. Must be positive.
    pub max_search_distance: u32,
    /// Allow the four diagonal steps in addition to the cardinal ones.
    pub allow_diagonal_movement: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_search_distance: 500,
            allow_diagonal_movement: false,
        }
    }
}

impl FinderConfig {
    pub fn new(max_search_distance: u32, allow_diagonal_movement: bool) -> Self {
        Self {
            max_search_distance,
            allow_diagonal_movement,
        }
    }

    /// Movement model implied by the diagonal flag.
    #[inline]
    pub fn movement(&self) -> Movement {
        Movement::from_diagonal(self.allow_diagonal_movement)
    }

    fn validate(&self) -> Result<(), PathError> {
        if self.max_search_distance == 0 {
            return Err(PathError::InvalidConfig("max search distance must be positive"));
        }
        Ok(())
    }
}

/// How the last search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A path to the target was found.
    Found,
    /// Start and target are the same cell.
    SameCell,
    /// The target cell is blocked; no search was run.
    TargetBlocked,
    /// The open set ran out before reaching the target.
    Unreachable,
    /// The depth limit was reached before the target.
    DepthExhausted,
}

impl SearchOutcome {
    /// Whether the search produced a path.
    #[inline]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found | Self::SameCell)
    }
}

/// Counters describing the last call to [`AStarPathFinder::find_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub outcome: SearchOutcome,
    /// Nodes moved from the open set to the closed set.
    pub expanded: usize,
    /// Neighbor cells evaluated, equal to the number of visited notifications.
    pub evaluated: usize,
    /// Deepest hop count assigned to any node.
    pub max_depth: u32,
    /// Steps in the returned path, zero when none was found.
    pub path_len: usize,
}

impl SearchStats {
    fn new(outcome: SearchOutcome) -> Self {
        Self {
            outcome,
            expanded: 0,
            evaluated: 0,
            max_depth: 0,
            path_len: 0,
        }
    }
}

/// Depth-bounded A* search over a [`TileMap`].
///
/// The finder owns a node table sized to the map and reuses it across
/// queries, resetting every cell at the start of each search. Queries take
/// `&mut self`; concurrent callers need their own finder, which may share the
/// map through `&M`, `Rc<M>` or `Arc<M>`.
pub struct AStarPathFinder<M, H = ClosestHeuristic> {
    map: M,
    config: FinderConfig,
    movement: Movement,
    heuristic: H,
    nodes: NodeTable,
    frontier: Frontier,
    last: Option<SearchStats>,
}

impl<M: TileMap> AStarPathFinder<M> {
    /// Create a path finder using the default [`ClosestHeuristic`].
    pub fn new(
        map: M,
        max_search_distance: u32,
        allow_diagonal_movement: bool,
    ) -> Result<Self, PathError> {
        Self::from_config(map, FinderConfig::new(max_search_distance, allow_diagonal_movement))
    }

    /// Create a path finder from a [`FinderConfig`] using the default
    /// heuristic.
    pub fn from_config(map: M, config: FinderConfig) -> Result<Self, PathError> {
        Self::with_heuristic(map, config, ClosestHeuristic)
    }
}

impl<M: TileMap, H: Heuristic> AStarPathFinder<M, H> {
    /// Create a path finder with a custom heuristic.
    pub fn with_heuristic(map: M, config: FinderConfig, heuristic: H) -> Result<Self, PathError> {
        config.validate()?;
        let nodes = NodeTable::new(map.bounds());
        Ok(Self {
            map,
            config,
            movement: config.movement(),
            heuristic,
            nodes,
            frontier: Frontier::default(),
            last: None,
        })
    }

    /// The map being searched.
    #[inline]
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Mutable access to the map between searches.
    ///
    /// If the map's dimensions change, the node table is reallocated on the
    /// next query.
    #[inline]
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Give back the map.
    pub fn into_map(self) -> M {
        self.map
    }

    #[inline]
    pub fn config(&self) -> FinderConfig {
        self.config
    }

    #[inline]
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// Statistics of the most recent search, `None` before the first one.
    #[inline]
    pub fn last_search(&self) -> Option<SearchStats> {
        self.last
    }

    /// Find a path from `start` to `target`.
    ///
    /// Returns `Ok(None)` when the target is blocked, unreachable, or further
    /// than the configured search distance, and
    /// [`PathError::OutOfBounds`] if either coordinate is outside the map.
    pub fn find_path(&mut self, start: Point, target: Point) -> Result<Option<Path>, PathError> {
        let bounds = self.map.bounds();
        self.nodes.ensure_range(bounds);
        let si = self.nodes.idx(start).ok_or(PathError::OutOfBounds {
            point: start,
            bounds,
        })?;
        let ti = self.nodes.idx(target).ok_or(PathError::OutOfBounds {
            point: target,
            bounds,
        })?;
        self.frontier.clear();

        if self.map.blocked(target) {
            let stats = SearchStats::new(SearchOutcome::TargetBlocked);
            return Ok(self.finish(start, target, stats, None));
        }
        if si == ti {
            let path = std::iter::once(start).collect();
            let stats = SearchStats::new(SearchOutcome::SameCell);
            return Ok(self.finish(start, target, stats, Some(path)));
        }

        let mut stats = self.search(start, si, target, ti);
        let path = self.reconstruct(ti, &mut stats);
        Ok(self.finish(start, target, stats, path))
    }

    /// Run the A* loop until the target is the best open node, the open set
    /// is empty, or the depth limit is reached.
    fn search(&mut self, start: Point, si: usize, target: Point, ti: usize) -> SearchStats {
        let max = self.config.max_search_distance;
        let movement = self.movement;
        let mut stats = SearchStats::new(SearchOutcome::Unreachable);

        self.nodes.reset();
        let h = self.heuristic.estimate(&self.map, start, target);
        self.nodes.seed(si, h);
        self.frontier.push(&mut self.nodes, si);

        let mut max_depth = 0;
        while max_depth < max {
            let Some(ci) = self.frontier.peek(&self.nodes) else {
                break;
            };
            if ci == ti {
                break;
            }
            self.frontier.pop_to_closed(&mut self.nodes);
            stats.expanded += 1;

            let cp = self.nodes.point(ci);
            let current_cost = self.nodes[ci].cost;

            for np in movement.neighbors(cp) {
                let Some(ni) = self.nodes.idx(np) else {
                    continue;
                };
                // The mover itself may occupy the start cell.
                if ni != si && self.map.blocked(np) {
                    continue;
                }
                self.map.path_finder_visited(np);
                stats.evaluated += 1;

                let tentative = current_cost + self.map.cost(start, cp, np);
                if tentative < self.nodes[ni].cost {
                    if self.nodes[ni].state == NodeState::Closed {
                        log::trace!(
                            "reopening {np}: cost {} -> {tentative}",
                            self.nodes[ni].cost
                        );
                    }
                    self.frontier.evict(&mut self.nodes, ni);
                }

                if self.nodes[ni].state == NodeState::Unvisited {
                    let h = self.heuristic.estimate(&self.map, np, target);
                    let depth = self.nodes.relax(ni, ci, tentative, h);
                    max_depth = max_depth.max(depth);
                    self.frontier.push(&mut self.nodes, ni);
                }
            }
        }

        stats.max_depth = max_depth;
        stats
    }

    /// Follow parent links from the target back to the start.
    fn reconstruct(&self, ti: usize, stats: &mut SearchStats) -> Option<Path> {
        let max = self.config.max_search_distance;
        if !self.nodes[ti].has_parent() {
            stats.outcome = if stats.max_depth >= max {
                SearchOutcome::DepthExhausted
            } else {
                SearchOutcome::Unreachable
            };
            return None;
        }

        let mut path = Path::new();
        for p in self.nodes.ancestry(ti) {
            path.prepend_step(p);
        }

        // Re-parenting an ancestor after the target was reached can lengthen
        // the chain past the recorded depth.
        if path.hops() > max as usize {
            stats.outcome = SearchOutcome::DepthExhausted;
            return None;
        }

        stats.outcome = SearchOutcome::Found;
        Some(path)
    }

    fn finish(
        &mut self,
        start: Point,
        target: Point,
        mut stats: SearchStats,
        path: Option<Path>,
    ) -> Option<Path> {
        stats.path_len = path.as_ref().map_or(0, Path::len);
        log::debug!(
            "path {start} -> {target}: {:?} (expanded {}, evaluated {}, depth {}, open {}, closed {}, length {})",
            stats.outcome,
            stats.expanded,
            stats.evaluated,
            stats.max_depth,
            self.frontier.open_len(),
            self.frontier.closed_len(),
            stats.path_len,
        );
        self.last = Some(stats);
        path
    }
}

impl<M: TileMap, H: Heuristic> PathFinder for AStarPathFinder<M, H> {
    fn find_path(&mut self, start: Point, target: Point) -> Result<Option<Path>, PathError> {
        AStarPathFinder::find_path(self, start, target)
    }
}
