//! Overworld procedural generation: terrain, the river and entity placement.

use super::types::{Direction, Position, Terrain, WorldMap};
use crate::core::config::{GameConfig, TerrainWeights};
use crate::core::constants::MAX_SPAWN_ATTEMPTS;
use crate::core::error::{GameError, Result, SpawnKind};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use std::ops::Range;

/// Builds the terrain grid: wall border, weighted interior, one river band
/// with a single bridge whose banks are kept open.
pub fn generate_map(config: &GameConfig, rng: &mut impl Rng) -> WorldMap {
    let (width, height) = (config.map_width, config.map_height);
    let mut map = WorldMap::filled(width, height, Terrain::Wall);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            map.set(Position::new(x, y), roll_terrain(&config.terrain, rng));
        }
    }

    carve_river(&mut map, config.effective_river_row(), config.effective_bridge_column());
    map
}

/// Single draw against the cumulative thresholds.
pub fn roll_terrain(weights: &TerrainWeights, rng: &mut impl Rng) -> Terrain {
    let roll: f64 = rng.gen();
    if roll < weights.mountain {
        Terrain::Mountain
    } else if roll < weights.mountain + weights.forest {
        Terrain::Forest
    } else if roll < weights.mountain + weights.forest + weights.water {
        Terrain::Water
    } else {
        Terrain::Grass
    }
}

/// Water across every interior column of `row`, bridge at `bridge_x`.
/// Each bank cell becomes grass and is joined to the largest open area on
/// its side of the river.
fn carve_river(map: &mut WorldMap, row: usize, bridge_x: usize) {
    for x in 1..map.width.saturating_sub(1) {
        map.set(Position::new(x, row), Terrain::Water);
    }
    map.set(Position::new(bridge_x, row), Terrain::Bridge);

    let north = Position::new(bridge_x, row - 1);
    let south = Position::new(bridge_x, row + 1);
    map.set(north, Terrain::Grass);
    map.set(south, Terrain::Grass);
    connect_bank(map, north, 1..row);
    connect_bank(map, south, row + 1..map.height.saturating_sub(1));
}

/// Carves grass from `bank` to the nearest cell of the largest walkable
/// region within `rows`, unless the bank already belongs to it.
fn connect_bank(map: &mut WorldMap, bank: Position, rows: Range<usize>) {
    let Some(largest) = walkable_regions(map, &rows)
        .into_iter()
        .rev()
        .max_by_key(|region| region.len())
    else {
        return;
    };
    if largest.contains(&bank) {
        return;
    }
    let Some(target) = largest
        .iter()
        .min_by_key(|p| p.x.abs_diff(bank.x) + p.y.abs_diff(bank.y))
        .copied()
    else {
        return;
    };

    let mut pos = bank;
    while pos != target {
        pos = if pos.y != target.y {
            Position::new(pos.x, if pos.y < target.y { pos.y + 1 } else { pos.y - 1 })
        } else if pos.x < target.x {
            Position::new(pos.x + 1, pos.y)
        } else {
            Position::new(pos.x - 1, pos.y)
        };
        if !map.is_walkable(pos) {
            map.set(pos, Terrain::Grass);
        }
    }
}

/// Orthogonally connected walkable regions confined to `rows`, in
/// row-major order of their first cell.
fn walkable_regions(map: &WorldMap, rows: &Range<usize>) -> Vec<Vec<Position>> {
    let mut seen = HashSet::new();
    let mut regions = Vec::new();
    for start in map.positions().filter(|p| rows.contains(&p.y)) {
        if !map.is_walkable(start) || !seen.insert(start) {
            continue;
        }
        let mut region = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for next in Direction::ALL.iter().filter_map(|d| pos.step(*d)) {
                if rows.contains(&next.y) && map.is_walkable(next) && seen.insert(next) {
                    region.push(next);
                    queue.push_back(next);
                }
            }
        }
        regions.push(region);
    }
    regions
}

/// Cells that are walkable and not yet taken.
pub fn free_walkable_cells(map: &WorldMap, occupied: &HashSet<Position>) -> usize {
    map.positions()
        .filter(|p| map.is_walkable(*p) && !occupied.contains(p))
        .count()
}

/// Uniformly samples the whole grid for a free walkable cell. After
/// [`MAX_SPAWN_ATTEMPTS`] misses it picks uniformly among the free cells
/// instead, so only a map with no room left is an error.
pub fn sample_free_cell(
    map: &WorldMap,
    occupied: &HashSet<Position>,
    entity: SpawnKind,
    rng: &mut impl Rng,
) -> Result<Position> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = Position::new(rng.gen_range(0..map.width), rng.gen_range(0..map.height));
        if map.is_walkable(pos) && !occupied.contains(&pos) {
            return Ok(pos);
        }
    }
    let free: Vec<Position> = map
        .positions()
        .filter(|p| map.is_walkable(*p) && !occupied.contains(p))
        .collect();
    free.choose(rng).copied().ok_or(GameError::UnsatisfiableSpawn {
        entity,
        attempts: MAX_SPAWN_ATTEMPTS,
    })
}

/// Fails fast when the map cannot hold `needed` more entities.
pub fn ensure_capacity(
    map: &WorldMap,
    occupied: &HashSet<Position>,
    needed: usize,
    entity: SpawnKind,
) -> Result<()> {
    if free_walkable_cells(map, occupied) < needed {
        return Err(GameError::UnsatisfiableSpawn {
            entity,
            attempts: 0,
        });
    }
    Ok(())
}

/// Preferred start if walkable, otherwise the first walkable cell in
/// row-major order.
pub fn resolve_start(map: &WorldMap, preferred: Position) -> Result<Position> {
    if map.is_walkable(preferred) {
        return Ok(preferred);
    }
    map.positions()
        .find(|p| map.is_walkable(*p))
        .ok_or(GameError::UnsatisfiableSpawn {
            entity: SpawnKind::Player,
            attempts: 0,
        })
}
