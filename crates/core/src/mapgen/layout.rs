//! Spatial embedding of the room graph, translation into grid space, and
//! rasterization of rooms and corridors into the tile grid.

use crate::rng::RangeRng;
use crate::types::{MapGenError, Pos, TileKind};

use super::model::{DungeonMap, GridRect, PlacedRoom, Room};

/// Fewer surviving rooms than this cannot host a start and an end room.
pub const MIN_SURVIVING_ROOMS: usize = 2;

/// Embeds the linked rooms in 2D space around the most-linked anchor,
/// translates everything into non-negative grid coordinates with a one-cell
/// border, and rasterizes corridors first and room footprints second, so a
/// corridor crossing a room never shows through its floor.
pub(super) fn layout_rooms(
    rng: &mut dyn RangeRng,
    mut rooms: Vec<Room>,
) -> Result<DungeonMap, MapGenError> {
    if rooms.len() < MIN_SURVIVING_ROOMS {
        return Err(MapGenError::TooFewRooms);
    }

    let anchor = most_linked_room(&rooms);
    rooms[anchor].layout_coord = Some(Pos { y: 0, x: 0 });
    embed_neighbors(rng, &mut rooms, anchor);

    // Rooms the embedding never reached sit in link components disconnected
    // from the anchor; they get no coordinates and are dropped here.
    rooms.retain(|room| room.layout_coord.is_some());
    if rooms.len() < MIN_SURVIVING_ROOMS {
        return Err(MapGenError::TooFewRooms);
    }

    let placed = translate_to_grid(rooms);

    let grid_width = placed.iter().map(|room| room.rect.end_x).max().unwrap_or(0) as usize + 1;
    let grid_height = placed.iter().map(|room| room.rect.end_y).max().unwrap_or(0) as usize + 1;
    let mut tiles = vec![TileKind::Wall; grid_width * grid_height];

    carve_corridors(&mut tiles, grid_width, &placed);
    for room in &placed {
        stamp_room(&mut tiles, grid_width, room.rect);
    }

    let (start_room, end_room) = pick_start_and_end(&placed);

    Ok(DungeonMap {
        width: grid_width,
        height: grid_height,
        tiles,
        rooms: placed,
        start_room,
        end_room,
    })
}

fn most_linked_room(rooms: &[Room]) -> usize {
    let mut best = 0;
    let mut best_links = 0;
    for (index, room) in rooms.iter().enumerate() {
        if room.linked_to.len() > best_links {
            best_links = room.linked_to.len();
            best = index;
        }
    }
    best
}

/// Iterative version of the recursive neighbor placement: a room is pushed
/// back for another visit only when it just placed at least one neighbor, so
/// the stack shrinks once every reachable room holds a coordinate.
fn embed_neighbors(rng: &mut dyn RangeRng, rooms: &mut [Room], anchor: usize) {
    let mut stack = vec![anchor];

    while let Some(current) = stack.pop() {
        let mut placed_any = false;

        for link_slot in 0..rooms[current].linked_to.len() {
            let neighbor_id = rooms[current].linked_to[link_slot];
            let Some(neighbor) = room_index(rooms, neighbor_id) else {
                continue;
            };
            if rooms[neighbor].layout_coord.is_some() {
                continue;
            }

            let coord = place_neighbor(rng, &rooms[current], &rooms[neighbor], link_slot % 4);
            rooms[neighbor].layout_coord = Some(coord);
            placed_any = true;
        }

        if placed_any {
            for link_slot in 0..rooms[current].linked_to.len() {
                let neighbor_id = rooms[current].linked_to[link_slot];
                if let Some(neighbor) = room_index(rooms, neighbor_id) {
                    stack.push(neighbor);
                }
            }
        }
    }
}

/// Coordinate for a not-yet-placed neighbor, offset from `current` along one
/// of four directions cycled by the link's slot index. The separating-axis
/// distance adds a random gap; the perpendicular coordinate is drawn over the
/// absolute size difference of the two rooms.
fn place_neighbor(rng: &mut dyn RangeRng, current: &Room, neighbor: &Room, slot: usize) -> Pos {
    let current_coord = current.layout_coord.unwrap_or(Pos { y: 0, x: 0 });
    let gap_x = neighbor.width + rng.range(1, current.height);
    let gap_y = neighbor.height + rng.range(1, current.width);

    match slot {
        0 => Pos {
            x: rng.range(0, (current.width - neighbor.width).abs()),
            y: current_coord.y - gap_y,
        },
        1 => Pos {
            x: current_coord.x + gap_x,
            y: rng.range(0, (current.height - neighbor.height).abs()),
        },
        2 => Pos {
            x: current_coord.x - gap_x,
            y: rng.range(0, (current.height - neighbor.height).abs()),
        },
        _ => Pos {
            x: rng.range(0, (current.width - neighbor.width).abs()),
            y: current_coord.y + gap_y,
        },
    }
}

/// Shifts all layout coordinates so the smallest becomes 1, reserving a
/// one-cell wall border. Coordinates already positive keep their offset.
fn translate_to_grid(rooms: Vec<Room>) -> Vec<PlacedRoom> {
    let mut shift_x = 0;
    let mut shift_y = 0;
    for room in &rooms {
        if let Some(coord) = room.layout_coord {
            shift_x = shift_x.min(coord.x);
            shift_y = shift_y.min(coord.y);
        }
    }

    rooms
        .into_iter()
        .filter_map(|room| {
            let coord = room.layout_coord?;
            let start_x = coord.x + shift_x.abs() + 1;
            let start_y = coord.y + shift_y.abs() + 1;
            Some(PlacedRoom {
                id: room.id,
                width: room.width,
                height: room.height,
                linked_to: room.linked_to,
                rect: GridRect {
                    start_x,
                    start_y,
                    end_x: start_x + room.width,
                    end_y: start_y + room.height,
                },
            })
        })
        .collect()
}

/// Depth-first corridor carving from the first surviving room, guarded by a
/// per-room carved marker so linked cycles terminate. Each visited room marks
/// a horizontal run on its own center row and a vertical run on its own
/// center column toward every linked neighbor; the neighbor's matching runs
/// complete the orthogonal path between the two centers.
fn carve_corridors(tiles: &mut [TileKind], grid_width: usize, rooms: &[PlacedRoom]) {
    let mut carved = vec![false; rooms.len()];
    let mut stack = vec![0_usize];

    while let Some(current) = stack.pop() {
        if carved[current] {
            continue;
        }
        carved[current] = true;

        let center = rooms[current].center();
        for &neighbor_id in &rooms[current].linked_to {
            let Some(neighbor) = room_index_placed(rooms, neighbor_id) else {
                continue;
            };
            let neighbor_center = rooms[neighbor].center();

            for x in center.x.min(neighbor_center.x)..center.x.max(neighbor_center.x) {
                tiles[(center.y as usize) * grid_width + x as usize] = TileKind::Corridor;
            }
            for y in center.y.min(neighbor_center.y)..=center.y.max(neighbor_center.y) {
                tiles[(y as usize) * grid_width + center.x as usize] = TileKind::Corridor;
            }

            stack.push(neighbor);
        }
    }
}

fn stamp_room(tiles: &mut [TileKind], grid_width: usize, rect: GridRect) {
    for y in rect.start_y..rect.end_y {
        for x in rect.start_x..rect.end_x {
            tiles[(y as usize) * grid_width + x as usize] = TileKind::Room;
        }
    }
}

/// Start room: minimum Euclidean center distance from the grid origin.
/// End room: maximum. First room wins ties on both ends.
fn pick_start_and_end(rooms: &[PlacedRoom]) -> (usize, usize) {
    let mut start_room = 0;
    let mut end_room = 0;
    let mut min_distance = i64::MAX;
    let mut max_distance = i64::MIN;

    for (index, room) in rooms.iter().enumerate() {
        let center = room.center();
        let distance = (center.x as i64).pow(2) + (center.y as i64).pow(2);
        if distance < min_distance {
            min_distance = distance;
            start_room = index;
        }
        if distance > max_distance {
            max_distance = distance;
            end_room = index;
        }
    }

    (start_room, end_room)
}

fn room_index(rooms: &[Room], id: usize) -> Option<usize> {
    rooms.iter().position(|room| room.id == id)
}

fn room_index_placed(rooms: &[PlacedRoom], id: usize) -> Option<usize> {
    rooms.iter().position(|room| room.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use crate::rng::{GameRng, ScriptedRng};

    use super::super::graph::build_room_graph;
    use super::*;

    fn linked_pair(width: i32, height: i32) -> Vec<Room> {
        vec![
            Room {
                id: 0,
                width,
                height,
                max_links: 2,
                linked_to: vec![1],
                layout_coord: None,
            },
            Room {
                id: 1,
                width,
                height,
                max_links: 2,
                linked_to: vec![0],
                layout_coord: None,
            },
        ]
    }

    #[test]
    fn too_few_rooms_is_an_error() {
        let mut rng = GameRng::new(1);
        assert_eq!(layout_rooms(&mut rng, Vec::new()), Err(MapGenError::TooFewRooms));

        let lone = vec![Room {
            id: 0,
            width: 4,
            height: 4,
            max_links: 1,
            linked_to: vec![],
            layout_coord: None,
        }];
        assert_eq!(layout_rooms(&mut rng, lone), Err(MapGenError::TooFewRooms));
    }

    #[test]
    fn scripted_pair_embeds_north_with_expected_rects() {
        // Draws: east/west gap (unused axis), north/south gap, perpendicular x.
        let mut rng = ScriptedRng::new([2, 3, 0]);
        let map = layout_rooms(&mut rng, linked_pair(4, 4)).expect("pair should lay out");

        // Neighbor goes north by height 4 + gap 3 = 7; translation then puts
        // it at the border and the anchor 7 rows below.
        assert_eq!(
            map.rooms[1].rect,
            GridRect { start_x: 1, start_y: 1, end_x: 5, end_y: 5 }
        );
        assert_eq!(
            map.rooms[0].rect,
            GridRect { start_x: 1, start_y: 8, end_x: 5, end_y: 12 }
        );
        assert_eq!(map.width, 6);
        assert_eq!(map.height, 13);

        // The vertical corridor run between the two centers survives outside
        // the room rects and is overwritten by Room tiles inside them.
        for y in 5..8 {
            assert_eq!(map.tile_at(Pos { y, x: 3 }), Some(TileKind::Corridor));
        }
        assert_eq!(map.tile_at(Pos { y: 4, x: 3 }), Some(TileKind::Room));
        assert_eq!(map.tile_at(Pos { y: 8, x: 3 }), Some(TileKind::Room));
    }

    #[test]
    fn room_rects_are_always_room_tiles() {
        let mut rng = GameRng::new(42);
        let rooms = build_room_graph(&mut rng, 25, 4, 7);
        let map = layout_rooms(&mut rng, rooms).expect("layout");

        for room in &map.rooms {
            for y in room.rect.start_y..room.rect.end_y {
                for x in room.rect.start_x..room.rect.end_x {
                    assert_eq!(map.tile_at(Pos { y, x }), Some(TileKind::Room));
                }
            }
        }
    }

    #[test]
    fn border_row_and_column_stay_walls() {
        let mut rng = GameRng::new(9);
        let rooms = build_room_graph(&mut rng, 25, 4, 7);
        let map = layout_rooms(&mut rng, rooms).expect("layout");

        for x in 0..map.width {
            assert_eq!(map.tiles[x], TileKind::Wall);
        }
        for y in 0..map.height {
            assert_eq!(map.tiles[y * map.width], TileKind::Wall);
        }
    }

    #[test]
    fn start_and_end_rooms_are_distance_extremes() {
        let mut rng = GameRng::new(1234);
        let rooms = build_room_graph(&mut rng, 25, 4, 7);
        let map = layout_rooms(&mut rng, rooms).expect("layout");

        let distance = |index: usize| {
            let center = map.rooms[index].center();
            (center.x as i64).pow(2) + (center.y as i64).pow(2)
        };
        for index in 0..map.rooms.len() {
            assert!(distance(map.start_room) <= distance(index));
            assert!(distance(map.end_room) >= distance(index));
        }
    }

    #[test]
    fn every_room_center_is_walkably_reachable_from_start() {
        for seed in [5_u64, 77, 901, 4_242] {
            let mut rng = GameRng::new(seed);
            let rooms = build_room_graph(&mut rng, 22, 4, 7);
            let map = layout_rooms(&mut rng, rooms).expect("layout");
            assert!(
                all_centers_connected(&map),
                "seed {seed} produced a room center unreachable from the start room"
            );
        }
    }

    fn all_centers_connected(map: &DungeonMap) -> bool {
        let start = map.rooms[map.start_room].center();
        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);

        while let Some(pos) = open.pop_front() {
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                if seen.contains(&next) {
                    continue;
                }
                match map.tile_at(next) {
                    Some(TileKind::Room) | Some(TileKind::Corridor) => {
                        seen.insert(next);
                        open.push_back(next);
                    }
                    _ => {}
                }
            }
        }

        map.rooms.iter().all(|room| seen.contains(&room.center()))
    }
}
