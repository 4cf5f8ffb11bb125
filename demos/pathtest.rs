//! Route a soldier around the barracks of the sample map and print the result.
//!
//! Run: cargo run --bin pathtest [seed]
//!
//! With a seed, random rock is scattered over the field first.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tilepath::{AStarPathFinder, FinderConfig, Path, TileMap};
use tilepath_core::Point;
use tilepath_map::{GameMap, Terrain, Unit};

const START: Point = Point::new(3, 3);
const TARGET: Point = Point::new(6, 5);
const ROCKS: usize = 180;

fn glyph(map: &GameMap, path: Option<&Path>, p: Point) -> char {
    if p == START {
        return 'A';
    }
    if p == TARGET {
        return 'Z';
    }
    if path.is_some_and(|path| path.contains(p)) {
        return '*';
    }
    match (map.unit(p), map.terrain(p)) {
        (Some(Unit::Soldier), _) => 'S',
        (Some(Unit::Barracks), _) => 'B',
        (Some(Unit::PowerPlant), _) => 'P',
        (None, Terrain::Rock) => '#',
        (None, Terrain::Water) => '~',
        (None, Terrain::Grass) if map.visited(p) => ',',
        (None, Terrain::Grass) => '.',
    }
}

fn render(map: &GameMap, path: Option<&Path>) -> String {
    let mut out = String::new();
    for y in 0..map.height_in_tiles() {
        for x in 0..map.width_in_tiles() {
            out.push(glyph(map, path, Point::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn main() {
    let mut map = GameMap::sample();

    if let Some(arg) = std::env::args().nth(1) {
        let seed = match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                eprintln!("Error: invalid seed {arg:?}: {e}");
                std::process::exit(2);
            }
        };
        let mut rng = StdRng::seed_from_u64(seed);
        map.scatter(&mut rng, ROCKS, Terrain::Rock);
        map.set_terrain(START, Terrain::Grass);
        map.set_terrain(TARGET, Terrain::Grass);
    }

    let mut finder = match AStarPathFinder::from_config(&map, FinderConfig::default()) {
        Ok(finder) => finder,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let path = match finder.find_path(START, TARGET) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match &path {
        Some(path) => {
            for (i, p) in path.iter().enumerate() {
                println!("step {i}: X: {} Y: {}", p.x, p.y);
            }
            println!("length {}, cost {}", path.len(), path.cost(&map));
        }
        None => println!("no path from {START} to {TARGET}"),
    }
    if let Some(stats) = finder.last_search() {
        println!(
            "{:?}: expanded {}, evaluated {}, visited cells {}",
            stats.outcome,
            stats.expanded,
            stats.evaluated,
            map.visited_count()
        );
    }
    print!("{}", render(&map, path.as_ref()));
}
