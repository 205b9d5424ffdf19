//! Level population: entry/exit points or a boss, enemies, life kits, and
//! weapons, each placed through the bounded free-tile search.

use slotmap::SlotMap;

use crate::rng::RangeRng;
use crate::state::{Boss, Enemy, LevelContent, LifeKit, Weapon};
use crate::types::{Pos, TileKind, WeaponKind};

use super::model::DungeonMap;
use super::names::generate_name;

/// Populates a laid-out map for the given 1-based depth. The last depth gets
/// a boss instead of an exit point; depth 1 gets no entry point.
pub(super) fn populate_level(
    rng: &mut dyn RangeRng,
    map: DungeonMap,
    depth: i32,
    max_depth: i32,
) -> LevelContent {
    let mut level = LevelContent {
        map,
        enter_point: None,
        exit_point: None,
        boss: None,
        enemies: SlotMap::with_key(),
        life_kits: SlotMap::with_key(),
        weapons: SlotMap::with_key(),
        used_coords: Vec::new(),
    };

    if depth > 1 {
        let rect = level.map.start_rect();
        level.enter_point = Some(Pos {
            x: rng.range(rect.start_x, rect.end_x - 1),
            // One row short of the rect bottom keeps the entry off the edge
            // row players most often walk along.
            y: rng.range(rect.start_y, (rect.end_y - 2).max(rect.start_y)),
        });
    }

    if depth < max_depth {
        let rect = level.map.end_rect();
        level.exit_point = Some(Pos {
            x: rng.range(rect.start_x, rect.end_x - 1),
            y: rng.range(rect.start_y, rect.end_y - 1),
        });
    } else {
        let rect = level.map.end_rect();
        level.boss = Some(Boss {
            life: rng.range(90, 140) * depth,
            damage: rng.range(30, 45) * depth,
            pos: Pos {
                x: rng.range(rect.start_x, rect.end_x - 1),
                y: rng.range(rect.start_y, rect.end_y - 1),
            },
        });
    }

    place_enemies(rng, &mut level, depth);
    place_life_kits(rng, &mut level, depth);
    place_weapons(rng, &mut level, depth);

    level
}

fn place_enemies(rng: &mut dyn RangeRng, level: &mut LevelContent, depth: i32) {
    let room_count = level.map.rooms.len() as i32;
    let count = rng.range(room_count / 2, room_count);

    for _ in 0..count {
        let life = 20 + rng.range(30, 45) * depth;
        let damage = 5 + rng.range(1, 5) * depth;
        let Some(pos) = find_free_coord(rng, &level.map, &mut level.used_coords) else {
            continue;
        };
        level.enemies.insert(Enemy { life, damage, pos });
    }
}

fn place_life_kits(rng: &mut dyn RangeRng, level: &mut LevelContent, depth: i32) {
    let count = rng.range(5, 9);

    for _ in 0..count {
        let life = 20 + rng.range(10, 20) * depth;
        let Some(pos) = find_free_coord(rng, &level.map, &mut level.used_coords) else {
            continue;
        };
        level.life_kits.insert(LifeKit { life, pos });
    }
}

fn place_weapons(rng: &mut dyn RangeRng, level: &mut LevelContent, depth: i32) {
    let count = rng.range(3, 6);

    for _ in 0..count {
        let kind = WeaponKind::ALL[rng.range(0, WeaponKind::ALL.len() as i32 - 1) as usize];
        let name = format!("{} {}", generate_name(rng), kind.label());
        let damage =
            (5.0 + rng.range(3, 8) as f64 * depth as f64 * kind.damage_multiplier()).round() as i32;
        let Some(pos) = find_free_coord(rng, &level.map, &mut level.used_coords) else {
            continue;
        };
        level.weapons.insert(Weapon { name, kind, damage, pos });
    }
}

/// Bounded random probing for an unoccupied Room tile: up to one room pick
/// per room, each probed `width + height` times. `None` means the search
/// exhausted its budget; the caller drops the entity rather than shipping one
/// without a reachable coordinate.
fn find_free_coord(
    rng: &mut dyn RangeRng,
    map: &DungeonMap,
    used_coords: &mut Vec<Pos>,
) -> Option<Pos> {
    for _ in 0..map.rooms.len() {
        let room = &map.rooms[rng.range(0, map.rooms.len() as i32 - 1) as usize];
        let probes = room.width + room.height;

        for _ in 0..probes {
            let pos = Pos {
                x: rng.range(room.rect.start_x, room.rect.end_x - 1),
                y: rng.range(room.rect.start_y, room.rect.end_y - 1),
            };

            if map.tile_at(pos) != Some(TileKind::Room) || used_coords.contains(&pos) {
                continue;
            }

            used_coords.push(pos);
            return Some(pos);
        }
    }

    None
}
