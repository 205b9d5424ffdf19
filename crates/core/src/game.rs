//! Run bootstrap and the pure action reducer.
//!
//! [`reduce`] owns the transition `(state, action) -> state'`: it consumes
//! the previous state and returns the next one, drawing randomness only for
//! the branches that need it. [`Game`] bundles a state with its seeded RNG
//! for callers that want a dispatch loop instead of threading both by hand.

use std::mem;

use xxhash_rust::xxh3::xxh3_64;

use crate::mapgen::{self, GridRect};
use crate::rng::{GameRng, RangeRng};
use crate::state::{GameState, LevelContent, PlayerInfo};
use crate::types::{Action, Direction, ElementAt, Message, Pos, TileKind, WeaponId};

const MIN_DEPTH: i32 = 5;
const MAX_DEPTH: i32 = 10;
const MIN_ROOMS: i32 = 20;
const MAX_ROOMS: i32 = 30;
const MIN_SIDE: i32 = 4;
const MAX_SIDE: i32 = 7;

const START_LIFE: i32 = 100;
const START_DAMAGE: i32 = 10;

/// Builds the initial state: 5 to 10 levels of 20 to 30 rooms each, with the
/// player spawned on a Room tile inside level 1's start room.
pub fn new_game(rng: &mut dyn RangeRng) -> GameState {
    let max_depth = rng.range(MIN_DEPTH, MAX_DEPTH);

    let mut levels = Vec::with_capacity(max_depth as usize);
    for depth in 1..=max_depth {
        let room_count = rng.range(MIN_ROOMS, MAX_ROOMS) as usize;
        levels.push(mapgen::generate_level(rng, room_count, MIN_SIDE, MAX_SIDE, depth, max_depth));
    }

    let pos = sample_room_tile(rng, &levels[0], levels[0].map.start_rect());

    GameState {
        levels,
        current_level: 0,
        player: PlayerInfo {
            life: START_LIFE,
            damage: START_DAMAGE,
            exp: 0,
            level: 1,
            weapon: None,
            pos,
        },
        message: None,
        game_over: false,
        game_win: false,
    }
}

/// Applies one action. Terminal states are returned unchanged; every other
/// `(action, target)` combination has a defined branch, and combinations that
/// reference entities no longer present fall back to a no-op.
pub fn reduce(state: GameState, action: Action, rng: &mut dyn RangeRng) -> GameState {
    if state.is_terminal() {
        return state;
    }

    match action {
        Action::Move { dir } => apply_move(state, dir, rng),
        Action::ChangeWeapon { weapon } => apply_change_weapon(state, weapon),
    }
}

fn apply_move(mut state: GameState, dir: Direction, rng: &mut dyn RangeRng) -> GameState {
    let target = state.player.pos.offset(dir.delta());
    let Some(level) = state.level() else {
        return state;
    };

    match level.element_at(target) {
        ElementAt::OutOfBounds => state,
        ElementAt::Enter => {
            let Some(index) = state.current_level.checked_sub(1) else {
                return state;
            };
            let Some(below) = state.levels.get(index) else {
                return state;
            };
            state.player.pos = sample_room_tile(rng, below, below.map.end_rect());
            state.current_level = index;
            state
        }
        ElementAt::Exit => {
            let index = state.current_level + 1;
            let Some(above) = state.levels.get(index) else {
                return state;
            };
            state.player.pos = sample_room_tile(rng, above, above.map.start_rect());
            state.current_level = index;
            state
        }
        ElementAt::LifeKit(id) => {
            let Some(level) = state.levels.get_mut(state.current_level) else {
                return state;
            };
            let Some(kit) = level.life_kits.remove(id) else {
                return state;
            };
            state.player.pos = target;
            state.player.life += kit.life;
            state.message = Some(Message::info(format!("+{} Life Points!", kit.life)));
            state
        }
        ElementAt::Enemy(id) => {
            let attack = attack_roll(rng, &state.player);
            let Some(level) = state.levels.get_mut(state.current_level) else {
                return state;
            };
            let Some(enemy) = level.enemies.get(id) else {
                return state;
            };
            let enemy_damage = enemy.damage;
            let enemy_life_after = enemy.life - attack;

            state.player.life -= enemy_damage;
            if state.player.life <= 0 {
                // The run ends on the spot; the enemy's wounds are not
                // written back.
                state.player.life = 0;
                state.game_over = true;
                return state;
            }

            if enemy_life_after <= 0 {
                level.enemies.remove(id);
                state.player.exp += enemy_damage;

                let mut outcome = "Fight!";
                if (state.player.exp as f64).sqrt() > (3 * state.player.level) as f64 {
                    state.player.level += 1;
                    outcome = "Level UP!";
                }
                state.message = Some(Message::info(format!("{outcome} Enemy Defeated!")));
            } else {
                if let Some(enemy) = level.enemies.get_mut(id) {
                    enemy.life = enemy_life_after;
                }
                state.message = Some(Message::info("Fight!"));
            }
            state
        }
        ElementAt::Weapon(id) => {
            state.message = Some(Message::ChooseWeapon { weapon: id });
            state
        }
        ElementAt::Boss => {
            let attack = attack_roll(rng, &state.player);
            let Some(level) = state.levels.get_mut(state.current_level) else {
                return state;
            };
            let Some(boss) = level.boss.as_mut() else {
                return state;
            };
            let boss_life_after = boss.life - attack;
            let player_life_after = state.player.life - boss.damage;

            if player_life_after <= 0 {
                state.player.life = 0;
                state.game_over = true;
                return state;
            }
            if boss_life_after <= 0 {
                // Winning freezes the state as-is; the final exchange's life
                // loss is not applied.
                state.game_win = true;
                return state;
            }

            boss.life = boss_life_after;
            state.player.life = player_life_after;
            state.message = Some(Message::info("Boss Fight!"));
            state
        }
        ElementAt::Tile(TileKind::Wall) => {
            state.message = Some(Message::bump());
            state
        }
        ElementAt::Tile(TileKind::Room | TileKind::Corridor) => {
            state.player.pos = target;
            state.message = None;
            state
        }
    }
}

fn apply_change_weapon(mut state: GameState, id: WeaponId) -> GameState {
    let Some(level) = state.levels.get_mut(state.current_level) else {
        return state;
    };
    let Some(weapon) = level.weapons.remove(id) else {
        return state;
    };

    let previous_damage = state.player.weapon.as_ref().map_or(0, |weapon| weapon.damage);
    state.player.pos = weapon.pos;
    state.player.damage += weapon.damage - previous_damage;
    state.player.weapon = Some(weapon);
    state.message = Some(Message::info("New Weapon!"));
    state
}

fn attack_roll(rng: &mut dyn RangeRng, player: &PlayerInfo) -> i32 {
    player.damage + rng.range(3, 6) * player.level
}

/// Rejection-samples a coordinate in `rect` until it resolves to a bare Room
/// tile, so relocation never drops the player onto an entity or transit
/// point.
fn sample_room_tile(rng: &mut dyn RangeRng, level: &LevelContent, rect: GridRect) -> Pos {
    loop {
        let pos = Pos {
            x: rng.range(rect.start_x, rect.end_x - 1),
            y: rng.range(rect.start_y, rect.end_y - 1),
        };
        if level.element_at(pos) == ElementAt::Tile(TileKind::Room) {
            return pos;
        }
    }
}

/// A state paired with the seeded RNG that drives it.
pub struct Game {
    rng: GameRng,
    state: GameState,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let state = new_game(&mut rng);
        Game { rng, state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> &GameState {
        let state = mem::take(&mut self.state);
        self.state = reduce(state, action, &mut self.rng);
        &self.state
    }

    /// xxh3 fingerprint of the canonical state encoding.
    pub fn snapshot_hash(&self) -> u64 {
        xxh3_64(&self.state.canonical_bytes())
    }
}
