use dungeon_core::{Action, Direction, Game, GameRng, RangeRng, TileKind, new_game};

/// Drives a seeded game with a pseudo-random walk, checking the aggregate
/// invariants after every single action.
fn random_walk(seed: u64, steps: usize) -> u64 {
    let mut game = Game::new(seed);
    let mut walk_rng = GameRng::new(seed ^ 0x5EED);

    for step in 0..steps {
        let dir = match walk_rng.range(0, 3) {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        };
        let state = game.dispatch(Action::Move { dir });

        assert!(state.player.life >= 0, "life went negative at step {step} for seed {seed}");
        assert!(
            !(state.game_over && state.game_win),
            "both terminal flags set at step {step} for seed {seed}"
        );
        assert!(
            state.current_level < state.levels.len(),
            "level index escaped its range at step {step} for seed {seed}"
        );

        let level = state.level().expect("current level exists");
        let tile = level.map.tile_at(state.player.pos);
        assert!(
            matches!(tile, Some(TileKind::Room | TileKind::Corridor)),
            "player standing on {tile:?} at step {step} for seed {seed}"
        );

        if state.is_terminal() {
            break;
        }
    }

    game.snapshot_hash()
}

#[test]
fn test_smoke_long_walks_hold_invariants_across_seeds() {
    for seed in 0..8 {
        let hash = random_walk(seed, 600);
        assert_ne!(hash, 0);
    }
}

#[test]
fn test_smoke_initial_spawn_lands_in_the_start_room() {
    for seed in 0..16 {
        let state = new_game(&mut GameRng::new(seed));
        let first = &state.levels[0];

        assert!(
            first.map.start_rect().contains(state.player.pos),
            "seed {seed} spawned outside the start room"
        );
        assert_eq!(first.map.tile_at(state.player.pos), Some(TileKind::Room));
    }
}

#[test]
fn test_smoke_level_depth_and_room_counts_stay_in_range() {
    for seed in 20..28 {
        let state = new_game(&mut GameRng::new(seed));
        assert!(
            (5..=10).contains(&state.levels.len()),
            "seed {seed} produced {} levels",
            state.levels.len()
        );

        for (index, level) in state.levels.iter().enumerate() {
            assert_eq!(level.enter_point.is_some(), index > 0);
            let is_last = index + 1 == state.levels.len();
            assert_eq!(level.exit_point.is_some(), !is_last);
            assert_eq!(level.boss.is_some(), is_last);
        }
    }
}
