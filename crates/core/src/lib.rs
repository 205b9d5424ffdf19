pub mod game;
pub mod mapgen;
pub mod rng;
pub mod state;
pub mod types;

pub use game::{Game, new_game, reduce};
pub use mapgen::{DungeonMap, build_dungeon, generate_dungeon, generate_level};
pub use rng::{GameRng, RangeRng, ScriptedRng};
pub use state::{Boss, Enemy, GameState, LevelContent, LifeKit, PlayerInfo, Weapon};
pub use types::*;
