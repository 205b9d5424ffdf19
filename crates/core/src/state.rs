//! Aggregate game state: per-level entity collections, the player, and the
//! terminal flags, plus the position query used by the reducer and renderers.

use slotmap::SlotMap;

use crate::mapgen::DungeonMap;
use crate::types::{ElementAt, EnemyId, LifeKitId, Message, Pos, WeaponId, WeaponKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub life: i32,
    pub damage: i32,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeKit {
    pub life: i32,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    pub damage: i32,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Boss {
    pub life: i32,
    pub damage: i32,
    pub pos: Pos,
}

/// One dungeon level: the rasterized map plus everything placed on it.
/// Built once at generation time; the reducer consumes and rebuilds it as
/// entities are picked up or killed.
#[derive(Clone, Debug)]
pub struct LevelContent {
    pub map: DungeonMap,
    pub enter_point: Option<Pos>,
    pub exit_point: Option<Pos>,
    pub boss: Option<Boss>,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub life_kits: SlotMap<LifeKitId, LifeKit>,
    pub weapons: SlotMap<WeaponId, Weapon>,
    /// Coordinates claimed during placement, so no two entities share a tile.
    pub used_coords: Vec<Pos>,
}

impl LevelContent {
    /// What occupies `pos`. Entities shadow the tile underneath them; the
    /// order of checks fixes which entity wins if placement ever overlapped.
    pub fn element_at(&self, pos: Pos) -> ElementAt {
        let Some(tile) = self.map.tile_at(pos) else {
            return ElementAt::OutOfBounds;
        };

        if self.enter_point == Some(pos) {
            return ElementAt::Enter;
        }
        if self.exit_point == Some(pos) {
            return ElementAt::Exit;
        }
        if let Some((id, _)) = self.life_kits.iter().find(|(_, kit)| kit.pos == pos) {
            return ElementAt::LifeKit(id);
        }
        if let Some((id, _)) = self.enemies.iter().find(|(_, enemy)| enemy.pos == pos) {
            return ElementAt::Enemy(id);
        }
        if let Some((id, _)) = self.weapons.iter().find(|(_, weapon)| weapon.pos == pos) {
            return ElementAt::Weapon(id);
        }
        if self.boss.as_ref().is_some_and(|boss| boss.pos == pos) {
            return ElementAt::Boss;
        }

        ElementAt::Tile(tile)
    }

    fn canonical_bytes(&self, bytes: &mut Vec<u8>) {
        bytes.extend(self.map.canonical_bytes());

        push_opt_pos(bytes, self.enter_point);
        push_opt_pos(bytes, self.exit_point);
        match &self.boss {
            Some(boss) => {
                bytes.push(1);
                bytes.extend(boss.life.to_le_bytes());
                bytes.extend(boss.damage.to_le_bytes());
                push_pos(bytes, boss.pos);
            }
            None => bytes.push(0),
        }

        bytes.extend((self.enemies.len() as u32).to_le_bytes());
        for enemy in self.enemies.values() {
            bytes.extend(enemy.life.to_le_bytes());
            bytes.extend(enemy.damage.to_le_bytes());
            push_pos(bytes, enemy.pos);
        }
        bytes.extend((self.life_kits.len() as u32).to_le_bytes());
        for kit in self.life_kits.values() {
            bytes.extend(kit.life.to_le_bytes());
            push_pos(bytes, kit.pos);
        }
        bytes.extend((self.weapons.len() as u32).to_le_bytes());
        for weapon in self.weapons.values() {
            bytes.extend((weapon.name.len() as u32).to_le_bytes());
            bytes.extend(weapon.name.as_bytes());
            bytes.extend(weapon.damage.to_le_bytes());
            push_pos(bytes, weapon.pos);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    pub life: i32,
    pub damage: i32,
    pub exp: i32,
    pub level: i32,
    pub weapon: Option<Weapon>,
    pub pos: Pos,
}

/// Whole-run state. `Default` yields an empty placeholder with no levels;
/// playable states come from [`crate::game::new_game`].
///
/// At most one of `game_over`/`game_win` is ever set, and once either is set
/// the state is terminal: the reducer returns it unchanged.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    /// Index = depth − 1.
    pub levels: Vec<LevelContent>,
    pub current_level: usize,
    pub player: PlayerInfo,
    pub message: Option<Message>,
    pub game_over: bool,
    pub game_win: bool,
}

impl GameState {
    pub fn level(&self) -> Option<&LevelContent> {
        self.levels.get(self.current_level)
    }

    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_win
    }

    /// Stable byte encoding of everything gameplay-relevant, for snapshot
    /// fingerprinting. Two states with equal bytes are indistinguishable to
    /// a player.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.current_level as u32).to_le_bytes());
        bytes.extend(self.player.life.to_le_bytes());
        bytes.extend(self.player.damage.to_le_bytes());
        bytes.extend(self.player.exp.to_le_bytes());
        bytes.extend(self.player.level.to_le_bytes());
        push_pos(&mut bytes, self.player.pos);
        bytes.push(u8::from(self.game_over));
        bytes.push(u8::from(self.game_win));

        bytes.extend((self.levels.len() as u32).to_le_bytes());
        for level in &self.levels {
            level.canonical_bytes(&mut bytes);
        }
        bytes
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

fn push_opt_pos(bytes: &mut Vec<u8>, pos: Option<Pos>) {
    match pos {
        Some(pos) => {
            bytes.push(1);
            push_pos(bytes, pos);
        }
        None => bytes.push(0),
    }
}
