//! Public data models for the generation pipeline: linked rooms, placed
//! rooms, and the rasterized dungeon grid.

use crate::types::{Pos, TileKind};

/// Half-open room footprint in grid space: `start` inclusive, `end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRect {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
}

impl GridRect {
    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.start_x && pos.x < self.end_x && pos.y >= self.start_y && pos.y < self.end_y
    }
}

/// Graph-phase room: sized and linked, but not yet embedded in space.
/// `layout_coord` is assigned during embedding and stays `None` for rooms the
/// embedding never reaches (those are dropped before rasterization).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: usize,
    pub width: i32,
    pub height: i32,
    pub max_links: usize,
    /// Link partners by room id, in link order. Order matters: the embedding
    /// derives each neighbor's direction from its index in this list.
    pub linked_to: Vec<usize>,
    pub layout_coord: Option<Pos>,
}

/// Layout-phase room: translated into non-negative grid coordinates with its
/// footprint fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedRoom {
    pub id: usize,
    pub width: i32,
    pub height: i32,
    pub linked_to: Vec<usize>,
    pub rect: GridRect,
}

impl PlacedRoom {
    pub fn center(&self) -> Pos {
        Pos { y: self.rect.start_y + self.height / 2, x: self.rect.start_x + self.width / 2 }
    }
}

/// Rasterized dungeon: surviving rooms, the tile grid, and the designated
/// start/end rooms (indices into `rooms`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonMap {
    pub width: usize,
    pub height: usize,
    /// Row-major grid; every cell is exactly one of Wall, Room, Corridor.
    pub tiles: Vec<TileKind>,
    pub rooms: Vec<PlacedRoom>,
    pub start_room: usize,
    pub end_room: usize,
}

impl DungeonMap {
    /// Tile at `pos`, or `None` outside grid extents.
    pub fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    pub fn start_rect(&self) -> GridRect {
        self.rooms[self.start_room].rect
    }

    pub fn end_rect(&self) -> GridRect {
        self.rooms[self.end_room].rect
    }

    /// Stable byte encoding of the whole map, for fingerprinting and
    /// byte-identical comparison across generation runs.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Room => 1,
                TileKind::Corridor => 2,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.id as u32).to_le_bytes());
            bytes.extend(room.rect.start_x.to_le_bytes());
            bytes.extend(room.rect.start_y.to_le_bytes());
            bytes.extend(room.rect.end_x.to_le_bytes());
            bytes.extend(room.rect.end_y.to_le_bytes());
            bytes.extend((room.linked_to.len() as u32).to_le_bytes());
            for link in &room.linked_to {
                bytes.extend((*link as u32).to_le_bytes());
            }
        }

        bytes.extend((self.start_room as u32).to_le_bytes());
        bytes.extend((self.end_room as u32).to_le_bytes());
        bytes
    }
}
