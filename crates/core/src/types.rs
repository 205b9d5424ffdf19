use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct LifeKitId;
    pub struct WeaponId;
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, delta: Pos) -> Pos {
        Pos { y: self.y + delta.y, x: self.x + delta.x }
    }
}

/// The four orthogonal unit moves the action protocol accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn delta(self) -> Pos {
        match self {
            Direction::North => Pos { y: -1, x: 0 },
            Direction::East => Pos { y: 0, x: 1 },
            Direction::South => Pos { y: 1, x: 0 },
            Direction::West => Pos { y: 0, x: -1 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Room,
    Corridor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Sword,
    Bludgeon,
    Bow,
    Cestus,
    Axe,
    Hammer,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 6] = [
        WeaponKind::Sword,
        WeaponKind::Bludgeon,
        WeaponKind::Bow,
        WeaponKind::Cestus,
        WeaponKind::Axe,
        WeaponKind::Hammer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WeaponKind::Sword => "sword",
            WeaponKind::Bludgeon => "bludgeon",
            WeaponKind::Bow => "bow",
            WeaponKind::Cestus => "cestus",
            WeaponKind::Axe => "axe",
            WeaponKind::Hammer => "hammer",
        }
    }

    pub fn damage_multiplier(self) -> f64 {
        match self {
            WeaponKind::Sword => 1.4,
            WeaponKind::Bludgeon => 1.3,
            WeaponKind::Bow => 1.1,
            WeaponKind::Cestus => 1.0,
            WeaponKind::Axe => 1.5,
            WeaponKind::Hammer => 1.2,
        }
    }
}

/// Answer of the position query over a level: the entity occupying a cell,
/// or the bare tile kind when nothing stands there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementAt {
    OutOfBounds,
    Enter,
    Exit,
    LifeKit(LifeKitId),
    Enemy(EnemyId),
    Weapon(WeaponId),
    Boss,
    Tile(TileKind),
}

/// Action protocol accepted by the reducer. The bootstrap (no prior state)
/// path lives in [`crate::game::new_game`] instead of a dedicated variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move { dir: Direction },
    ChangeWeapon { weapon: WeaponId },
}

/// Transient UI-facing message carried on the state. `Info` is dismissed by
/// the display layer after `timeout_ms`; `ChooseWeapon` blocks until the
/// player answers with a `ChangeWeapon` action or walks away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Info { text: String, timeout_ms: u32 },
    ChooseWeapon { weapon: WeaponId },
}

impl Message {
    pub const INFO_TIMEOUT_MS: u32 = 2500;
    pub const BUMP_TIMEOUT_MS: u32 = 1000;

    pub fn info(text: impl Into<String>) -> Self {
        Message::Info { text: text.into(), timeout_ms: Self::INFO_TIMEOUT_MS }
    }

    pub fn bump() -> Self {
        Message::Info { text: "Bump!".into(), timeout_ms: Self::BUMP_TIMEOUT_MS }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapGenError {
    /// Linking or embedding left fewer rooms than a playable map needs.
    TooFewRooms,
}
