//! Procedural dungeon generation pipeline: room graph construction, spatial
//! layout, rasterization, and level population.

pub mod model;

mod graph;
mod layout;
mod names;
mod populate;

pub use layout::MIN_SURVIVING_ROOMS;
pub use model::{DungeonMap, GridRect, PlacedRoom, Room};

use crate::rng::RangeRng;
use crate::state::LevelContent;
use crate::types::MapGenError;

/// Builds one dungeon map, or reports that too few rooms survived linking
/// and embedding to host a start and an end room.
pub fn build_dungeon(
    rng: &mut dyn RangeRng,
    room_count: usize,
    min_side: i32,
    max_side: i32,
) -> Result<DungeonMap, MapGenError> {
    let rooms = graph::build_room_graph(rng, room_count, min_side, max_side);
    layout::layout_rooms(rng, rooms)
}

/// Retries construction until a map passes the minimum room-count guard.
/// With the generation parameters used in play (20+ rooms) a retry is rare
/// and the loop converges after at most a few attempts.
pub fn generate_dungeon(
    rng: &mut dyn RangeRng,
    room_count: usize,
    min_side: i32,
    max_side: i32,
) -> DungeonMap {
    loop {
        if let Ok(map) = build_dungeon(rng, room_count, min_side, max_side) {
            return map;
        }
    }
}

/// One fully populated level at the given 1-based depth.
pub fn generate_level(
    rng: &mut dyn RangeRng,
    room_count: usize,
    min_side: i32,
    max_side: i32,
    depth: i32,
    max_depth: i32,
) -> LevelContent {
    let map = generate_dungeon(rng, room_count, min_side, max_side);
    populate::populate_level(rng, map, depth, max_depth)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use xxhash_rust::xxh3::xxh3_64;

    use crate::rng::GameRng;
    use crate::types::TileKind;

    use super::*;

    #[test]
    fn same_seed_produces_byte_identical_dungeons() {
        let left = generate_dungeon(&mut GameRng::new(123_456), 25, 4, 7);
        let right = generate_dungeon(&mut GameRng::new(123_456), 25, 4, 7);
        assert_eq!(left.canonical_bytes(), right.canonical_bytes());
    }

    #[test]
    fn dungeon_fingerprints_differ_across_seeds() {
        let left = generate_dungeon(&mut GameRng::new(1), 25, 4, 7);
        let right = generate_dungeon(&mut GameRng::new(2), 25, 4, 7);
        assert_ne!(xxh3_64(&left.canonical_bytes()), xxh3_64(&right.canonical_bytes()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_dungeons_satisfy_structural_invariants(seed in any::<u64>()) {
            let map = generate_dungeon(&mut GameRng::new(seed), 22, 4, 7);

            prop_assert!(map.rooms.len() >= MIN_SURVIVING_ROOMS);
            prop_assert_eq!(map.tiles.len(), map.width * map.height);
            prop_assert!(map.start_room < map.rooms.len());
            prop_assert!(map.end_room < map.rooms.len());

            for room in &map.rooms {
                prop_assert!(!room.linked_to.is_empty());
                for y in room.rect.start_y..room.rect.end_y {
                    for x in room.rect.start_x..room.rect.end_x {
                        let tile = map.tiles[(y as usize) * map.width + x as usize];
                        prop_assert_eq!(tile, TileKind::Room);
                    }
                }
            }
        }
    }
}
