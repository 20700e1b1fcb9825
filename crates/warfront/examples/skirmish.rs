//! Warfront skirmish: two squads close in across a walled map.
//!
//! Demonstrates:
//!   1. Building a NavWorld from an ASCII map
//!   2. Tracking units in the spatial index and keeping it current
//!   3. Planning routes, following them with the path cursor
//!   4. Target acquisition with `find_nearest` and line-of-fire raycasts
//!   5. Placing a wall mid-game and watching cached routes go stale
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example skirmish

use std::collections::HashMap;
use tracing_subscriber::EnvFilter;
use warfront::prelude::*;
use warfront_test_utils::TestUnit;

// ─── Map ────────────────────────────────────────────────────────

const MAP: &[&str] = &[
    "........................",
    "........................",
    "..........#.............",
    "..........#.............",
    "..........#.....###.....",
    "..........#.............",
    "..........#.............",
    "........................",
    "........................",
    "........................",
];

// ─── Tuning ─────────────────────────────────────────────────────

const TICKS: u32 = 40;
const SPEED: f32 = 0.6;
const ARRIVE: f32 = 0.4;
const SIGHT: f32 = 6.0;

const RED: FactionId = FactionId(1);
const BLUE: FactionId = FactionId(2);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let grid = PassabilityGrid::from_ascii(MAP)?;
    let mut world = NavWorld::new(grid, NavConfig::default())?;

    let mut units: Vec<TestUnit> = (0..4)
        .map(|i| TestUnit::new(i, 1.5, 2.5 + i as f32).with_faction(RED))
        .chain((4..8).map(|i| TestUnit::new(i, 22.5, i as f32).with_faction(BLUE)))
        .collect();
    for unit in &units {
        world.index_mut().insert(unit)?;
    }

    // Each squad heads for the other's spawn.
    let mut paths: HashMap<EntityId, Path> = HashMap::new();
    for unit in &units {
        let (gx, gy) = if unit.faction == RED { (22.5, 5.5) } else { (1.5, 4.5) };
        let path = world.planner_mut().find_path(unit.x, unit.y, gx, gy, true);
        println!("unit {} route: {} waypoints, {:.1} tiles", unit.id, path.len(), path.length());
        paths.insert(unit.id, path);
    }

    for tick in 0..TICKS {
        if tick == TICKS / 2 {
            // Engineers seal the gap below the wall.
            for y in 7..10 {
                world.set_passable(TileCoord::new(10, y), false)?;
            }
            println!("tick {tick}: wall extended, grid now {}", world.planner().grid().version());
        }

        for unit in &mut units {
            let Some(path) = paths.get_mut(&unit.id) else {
                continue;
            };
            path.advance_if_reached(unit.x, unit.y, ARRIVE);
            if let Some(next) = path.current() {
                let dx = next.x - unit.x;
                let dy = next.y - unit.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let step = SPEED.min(dist);
                if dist > 0.0 {
                    unit.teleport(unit.x + dx / dist * step, unit.y + dy / dist * step);
                }
            }
            world.index_mut().update(&*unit)?;
        }

        for unit in &units {
            let faction = unit.faction;
            let Some(target) = world
                .index()
                .find_nearest(unit.x, unit.y, SIGHT, |r| faction.is_hostile_to(r.faction))
            else {
                continue;
            };
            let Some(record) = world.index().record(target.id) else {
                continue;
            };
            let (tx, ty) = record.center();
            let shot = world.index().raycast(unit.x, unit.y, tx, ty, |r| r.id != unit.id);
            if let Some(hit) = shot {
                let verdict = if hit.id == target.id { "clear shot" } else { "blocked by" };
                println!(
                    "tick {tick}: unit {} sees {} at {:.1}, {verdict} {}",
                    unit.id, target.id, target.distance, hit.id
                );
            }
        }
    }

    // Replan after the wall went up: the stale entries are detected.
    for unit in &units {
        let (gx, gy) = if unit.faction == RED { (22.5, 5.5) } else { (1.5, 4.5) };
        let path = world.planner_mut().find_path(unit.x, unit.y, gx, gy, true);
        println!("unit {} replanned: {} waypoints", unit.id, path.len());
    }

    let stats = world.planner().cache_stats();
    println!(
        "cache: {} hits, {} misses, {} stale, {} entries",
        stats.hits,
        stats.misses,
        stats.stale,
        world.planner().cache_len()
    );
    if let Some(last) = world.planner().last_search() {
        println!("last search: {} after {} expansions", last.outcome, last.stats.expansions);
    }
    Ok(())
}
