//! Building a [`GameMap`] from ASCII art.
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | grass |
//! | `#` | rock |
//! | `~` | water |
//! | `S` | soldier on grass |
//! | `B` | barracks on grass |
//! | `P` | power plant on grass |

use std::fmt;

use tilepath_core::Point;

use crate::gamemap::{GameMap, Terrain, Unit};

/// Errors that can occur when parsing an ASCII map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The input contains no cells.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize { line: usize, expected: usize, found: usize },
    /// A character outside the map legend was found.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no cells"),
            Self::InconsistentSize { line, expected, found } => {
                write!(f, "map: line {line} has width {found}, expected {expected}")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}

fn legend(ch: char) -> Option<(Terrain, Option<Unit>)> {
    Some(match ch {
        '.' => (Terrain::Grass, None),
        '#' => (Terrain::Rock, None),
        '~' => (Terrain::Water, None),
        'S' => (Terrain::Grass, Some(Unit::Soldier)),
        'B' => (Terrain::Grass, Some(Unit::Barracks)),
        'P' => (Terrain::Grass, Some(Unit::PowerPlant)),
        _ => return None,
    })
}

impl GameMap {
    /// Parse a map from ASCII art, one line per row.
    ///
    /// Leading and trailing whitespace of the whole string is trimmed; every
    /// remaining line must have the same width.
    pub fn from_ascii(s: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = s.trim().lines().collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut map = GameMap::new(width as i32, lines.len() as i32);
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::InconsistentSize {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let (terrain, unit) = legend(ch).ok_or(MapError::InvalidRune { ch, pos })?;
                map.set_terrain(pos, terrain);
                map.set_unit(pos, unit);
            }
        }
        log::debug!("parsed {}x{} map", width, lines.len());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath::{AStarPathFinder, SearchOutcome, TileMap};

    const FORT: &str = "
.......
.#####.
.#...#.
.#.S.#.
.#...#.
.###.#.
~......
";

    #[test]
    fn parse_legend() {
        let map = GameMap::from_ascii(FORT).unwrap();
        assert_eq!(map.width_in_tiles(), 7);
        assert_eq!(map.height_in_tiles(), 7);
        assert_eq!(map.terrain(Point::new(1, 1)), Terrain::Rock);
        assert_eq!(map.terrain(Point::new(0, 6)), Terrain::Water);
        assert_eq!(map.unit(Point::new(3, 3)), Some(Unit::Soldier));
        assert_eq!(map.terrain(Point::new(3, 3)), Terrain::Grass);
    }

    #[test]
    fn inconsistent_size_error() {
        let err = GameMap::from_ascii("..\n...").unwrap_err();
        assert_eq!(
            err,
            MapError::InconsistentSize {
                line: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn invalid_rune_error() {
        let err = GameMap::from_ascii("..\n.x").unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn empty_error() {
        assert_eq!(GameMap::from_ascii("  \n ").unwrap_err(), MapError::Empty);
    }

    #[test]
    fn soldier_leaves_the_fort() {
        let map = GameMap::from_ascii(FORT).unwrap();
        let mut finder = AStarPathFinder::new(&map, 100, false).unwrap();
        let (s, t) = (Point::new(3, 3), Point::new(3, 6));
        let path = finder.find_path(s, t).unwrap().unwrap();
        // Out through the gap at (4, 5).
        assert!(path.contains(Point::new(4, 5)));
        assert_eq!(path.hops(), 5);
    }

    #[test]
    fn water_cuts_off_the_corner() {
        let map = GameMap::from_ascii(
            "
..~..
..~..
~~~..
",
        )
        .unwrap();
        let mut finder = AStarPathFinder::new(&map, 100, true).unwrap();
        assert_eq!(finder.find_path(Point::new(4, 0), Point::new(0, 0)).unwrap(), None);
        assert_eq!(
            finder.last_search().unwrap().outcome,
            SearchOutcome::Unreachable
        );
    }
}
