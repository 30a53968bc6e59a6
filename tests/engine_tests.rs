//! Engine scenarios - spawning, movement, gravity, line clears, restart

use gridfall::core::{Game, GridEngine, GameState, Phase, ScriptedRng, SimpleRng};
use gridfall::types::{BlockType, GameEvent, MoveDirection, GRID_HEIGHT, GRID_WIDTH};

type ScriptedGame = Game<ScriptedRng, Vec<GameEvent>>;

/// Random draws are consumed as: first piece, preview piece, rotation, then
/// (next preview, rotation) for every later spawn.
fn scripted(values: &[u32]) -> ScriptedGame {
    let mut game = Game::with_parts(ScriptedRng::new(values.to_vec()), Vec::new());
    game.initialize();
    game
}

/// Flat Line in rows 1, columns 4..=7; Block queued next.
fn flat_line() -> ScriptedGame {
    scripted(&[2, 0, 1])
}

/// Upright Line in column 6, rows 0..=3; Block queued next.
fn upright_line() -> ScriptedGame {
    scripted(&[2, 0, 0])
}

fn floating(game: &ScriptedGame) -> Vec<(i8, i8)> {
    game.state().grid.floating_cells().collect()
}

fn board(game: &ScriptedGame) -> Vec<BlockType> {
    game.state().grid.cells().to_vec()
}

fn tick_until_locked(game: &mut ScriptedGame) -> u32 {
    for n in 1..=GRID_HEIGHT as u32 + 2 {
        if game.tick().locked {
            return n;
        }
    }
    panic!("piece never locked");
}

#[test]
fn test_initialize_places_four_cells_near_top_centre() {
    for seed in [1, 7, 42, 1234, 99_999] {
        let mut game = Game::new(seed);
        game.initialize();

        let cells: Vec<_> = game.state().grid.floating_cells().collect();
        assert_eq!(cells.len(), 4, "seed {}", seed);
        for (x, y) in cells {
            assert!((4..=7).contains(&x), "seed {} x {}", seed, x);
            assert!((0..4).contains(&y), "seed {} y {}", seed, y);
        }
        assert_eq!(game.score(), 1);
        assert_eq!(game.lines(), 0);
        assert!(!game.game_over());
        assert_eq!(game.phase(), Phase::Falling);
    }
}

#[test]
fn test_nine_ticks_move_piece_nine_rows() {
    let mut game = flat_line();
    for _ in 0..9 {
        let outcome = game.tick();
        assert!(outcome.moved);
        assert!(!outcome.locked);
    }

    assert_eq!(floating(&game), vec![(4, 10), (5, 10), (6, 10), (7, 10)]);
    assert_eq!(game.state().active.map(|a| a.y), Some(9));
    assert_eq!(game.score(), 1);
}

#[test]
fn test_piece_falls_to_floor_and_locks() {
    let mut game = flat_line();
    let ticks = tick_until_locked(&mut game);

    // Row 1 to row 19 is 18 moves, the next tick locks.
    assert_eq!(ticks, 19);
    for x in 4..8 {
        assert_eq!(game.cell_at(x, 19), BlockType::Line);
    }
    // The queued Block spawned; the Line is no longer floating.
    assert!(!game.state().grid.is_floating(4, 19));
    assert_eq!(game.state().active.map(|a| a.kind), Some(BlockType::Block));
    assert_eq!(game.score(), 2);
}

#[test]
fn test_blocked_moves_leave_board_unchanged() {
    let mut game = flat_line();
    for _ in 0..4 {
        assert!(game.move_piece(MoveDirection::Left));
    }

    let before = board(&game);
    assert!(!game.move_piece(MoveDirection::Left));
    assert_eq!(board(&game), before);
    assert_eq!(floating(&game), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);

    for _ in 0..8 {
        assert!(game.move_piece(MoveDirection::Right));
    }
    let before = board(&game);
    assert!(!game.move_piece(MoveDirection::Right));
    assert_eq!(board(&game), before);
}

#[test]
fn test_successful_move_shifts_only_floating_cells() {
    let mut game = flat_line();
    game.state_mut().grid.set(0, 19, BlockType::Triangle);

    assert!(game.move_piece(MoveDirection::Right));
    assert_eq!(floating(&game), vec![(5, 1), (6, 1), (7, 1), (8, 1)]);
    assert_eq!(game.cell_at(4, 1), BlockType::Empty);
    assert_eq!(game.cell_at(8, 1), BlockType::Line);
    assert_eq!(game.cell_at(0, 19), BlockType::Triangle);
    assert_eq!(game.state().grid.occupied_count(), 5);
    assert_eq!(game.events().last(), Some(&GameEvent::Moved));
}

#[test]
fn test_down_blocked_flag_and_forced_lock() {
    let mut game = flat_line();
    game.state_mut().grid.set(7, 2, BlockType::Block);

    assert!(!game.move_piece(MoveDirection::Down));
    assert!(game.down_blocked());

    // Sideways moves never touch the flag.
    assert!(game.move_piece(MoveDirection::Left));
    assert!(game.down_blocked());

    // The pending flag locks the piece even though it could fall now.
    let outcome = game.tick();
    assert!(outcome.moved);
    assert!(outcome.locked);
    assert!(!game.down_blocked());
    for x in 3..7 {
        assert_eq!(game.cell_at(x, 2), BlockType::Line);
    }
}

#[test]
fn test_rotation_pivots_on_anchor() {
    let mut game = flat_line();
    assert!(game.rotate());

    assert_eq!(floating(&game), vec![(5, 0), (5, 1), (5, 2), (5, 3)]);
    let active = game.state().active.unwrap();
    assert_eq!((active.rotation, active.x, active.y), (2, 4, 0));
    assert_eq!(game.events().last(), Some(&GameEvent::Rotated));

    // Two more quarter turns lead back to flat, one more to upright.
    assert!(game.rotate());
    assert!(game.rotate());
    assert_eq!(floating(&game), vec![(5, 0), (5, 1), (5, 2), (5, 3)]);
    assert!(game.rotate());
    assert_eq!(floating(&game), vec![(4, 1), (5, 1), (6, 1), (7, 1)]);
}

#[test]
fn test_rotation_rejected_when_target_occupied() {
    let mut game = flat_line();
    game.state_mut().grid.set(5, 3, BlockType::Block);

    let before = board(&game);
    assert!(!game.rotate());
    assert_eq!(board(&game), before);
    assert_eq!(game.state().active.map(|a| a.rotation), Some(1));
}

#[test]
fn test_rotation_rejected_out_of_bounds() {
    let mut game = upright_line();
    // Upright line sits in matrix column 1; walk it to the floor.
    tick_to_row(&mut game, 16);
    assert_eq!(floating(&game), vec![(6, 16), (6, 17), (6, 18), (6, 19)]);

    // Rotation 1 would need matrix row 1, still in bounds: allowed.
    assert!(game.rotate());
    assert_eq!(floating(&game), vec![(5, 17), (6, 17), (7, 17), (8, 17)]);

    // Push the flat line to the right wall, anchor x = 8.
    while game.move_piece(MoveDirection::Right) {}
    assert_eq!(game.state().active.map(|a| a.x), Some(8));

    // Upright again, in column 9, then against the wall in column 11.
    assert!(game.rotate());
    assert!(game.move_piece(MoveDirection::Right));
    assert!(game.move_piece(MoveDirection::Right));
    assert_eq!(floating(&game), vec![(11, 16), (11, 17), (11, 18), (11, 19)]);

    // Lying flat would need columns 10..=13.
    let before = board(&game);
    assert!(!game.rotate());
    assert_eq!(board(&game), before);
    assert_eq!(game.state().active.map(|a| a.rotation), Some(2));
}

fn tick_to_row(game: &mut ScriptedGame, anchor_y: i8) {
    while game.state().active.map(|a| a.y) != Some(anchor_y) {
        assert!(game.tick().moved);
    }
}

#[test]
fn test_single_line_clear() {
    let mut game = flat_line();
    game.state_mut().grid.fill_row(2, BlockType::RightT, &[4, 5, 6, 7]);
    game.state_mut().grid.set(4, 3, BlockType::LeftT);

    // First tick completes the row with the floating piece.
    assert!(game.tick().moved);
    assert!(game.state().grid.is_row_full(2));
    assert_eq!(game.lines(), 0);

    game.events_mut().clear();
    let outcome = game.tick();
    assert!(outcome.locked);
    assert_eq!(outcome.lines_cleared, 1);
    assert!(outcome.spawned);
    assert_eq!(
        game.events().as_slice(),
        &[GameEvent::Locked, GameEvent::LineCleared, GameEvent::Spawned]
    );

    assert_eq!(game.lines(), 1);
    // 1 (first spawn) + 10 (row) + 1 (second spawn)
    assert_eq!(game.score(), 12);
    assert_eq!(game.cell_at(4, 3), BlockType::LeftT);
    // Row 2 now holds what was above it: nothing.
    assert!((0..GRID_WIDTH as i8).all(|x| game.cell_at(x, 2).is_empty()));
}

#[test]
fn test_two_line_clear_adds_bonus() {
    let mut game = upright_line();
    for y in 18..20 {
        game.state_mut().grid.fill_row(y, BlockType::Block, &[6]);
    }
    game.state_mut().grid.set(0, 17, BlockType::LeftT);

    // Sixteen rows of fall, then the lock.
    assert_eq!(tick_until_locked(&mut game), 17);
    assert_eq!(game.lines(), 2);
    assert_eq!(game.score(), 1 + 25 + 1);

    // Rows 16 and 17 drop two rows each.
    assert_eq!(game.cell_at(6, 18), BlockType::Line);
    assert_eq!(game.cell_at(6, 19), BlockType::Line);
    assert_eq!(game.cell_at(0, 19), BlockType::LeftT);
    assert!(game.cell_at(0, 17).is_empty());
    assert_eq!(game.state().grid.occupied_count(), 3 + game.state().floating_count());
    assert_eq!(
        game.events().iter().filter(|&&e| e == GameEvent::LineCleared).count(),
        2
    );
}

#[test]
fn test_three_line_clear_shifts_remaining_rows() {
    let mut game = upright_line();
    for y in 17..20 {
        game.state_mut().grid.fill_row(y, BlockType::Block, &[6]);
    }

    let outcome = loop {
        let outcome = game.tick();
        if outcome.locked {
            break outcome;
        }
    };
    assert_eq!(outcome.lines_cleared, 3);
    assert_eq!(game.lines(), 3);
    assert_eq!(game.score(), 1 + 45 + 1);

    // The top cell of the line was in row 16 and drops to the floor.
    assert_eq!(game.cell_at(6, 19), BlockType::Line);
    assert_eq!(game.state().grid.occupied_count(), 1 + game.state().floating_count());
}

#[test]
fn test_four_line_clear_scores_eighty() {
    let mut game = upright_line();
    for y in 16..20 {
        game.state_mut().grid.fill_row(y, BlockType::Triangle, &[6]);
    }

    tick_until_locked(&mut game);
    assert_eq!(game.lines(), 4);
    assert_eq!(game.score(), 1 + 80 + 1);
    for y in 16..20 {
        assert!((0..GRID_WIDTH as i8).all(|x| game.cell_at(x, y).is_empty()));
    }
    assert_eq!(
        game.events().iter().filter(|&&e| e == GameEvent::LineCleared).count(),
        4
    );
}

#[test]
fn test_level_follows_lines() {
    let mut game = Game::new(3);
    game.initialize();
    game.state_mut().lines = 9;
    assert_eq!(game.level(), 0);
    game.state_mut().lines = 10;
    assert_eq!(game.level(), 1);
    game.state_mut().lines = 137;
    assert_eq!(game.level(), 13);
}

#[test]
fn test_spawn_on_empty_board_never_ends_game() {
    let mut engine = GridEngine::new(SimpleRng::new(77));
    let mut events: Vec<GameEvent> = Vec::new();
    for _ in 0..200 {
        let mut state = GameState::new();
        assert!(engine.spawn(&mut state, &mut events));
        assert!(!state.game_over);
        assert_eq!(state.floating_count(), 4);
    }
}

#[test]
fn test_spawn_into_occupied_rows_ends_game() {
    let mut engine = GridEngine::new(SimpleRng::new(5));
    let mut state = GameState::new();
    for y in 0..4 {
        state.grid.fill_row(y, BlockType::LeftShape, &[0]);
    }
    let mut events: Vec<GameEvent> = Vec::new();

    assert!(!engine.spawn(&mut state, &mut events));
    assert!(state.game_over);
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.floating_count(), 0);
    assert_eq!(state.active, None);
    assert_eq!(state.score, 1);
    assert_eq!(events, vec![GameEvent::Spawned, GameEvent::GameOver]);
}

#[test]
fn test_spawn_conflict_still_places_free_cells() {
    // Block, rotation 0: cells (5,0) (6,0) (5,1) (6,1)
    let mut engine = GridEngine::new(ScriptedRng::new(vec![0, 0, 0]));
    let mut state = GameState::new();
    state.grid.set(5, 1, BlockType::Line);

    assert!(!engine.spawn(&mut state, &mut Vec::<GameEvent>::new()));
    assert!(state.game_over);
    assert_eq!(state.cell_at(5, 0), BlockType::Block);
    assert_eq!(state.cell_at(6, 0), BlockType::Block);
    assert_eq!(state.cell_at(6, 1), BlockType::Block);
    assert_eq!(state.cell_at(5, 1), BlockType::Line);
    assert_eq!(state.floating_count(), 0);
}

#[test]
fn test_game_over_freezes_everything() {
    let mut game = flat_line();
    game.state_mut().game_over = true;

    let before = game.state().clone();
    assert!(!game.move_piece(MoveDirection::Down));
    assert!(!game.rotate());
    assert_eq!(game.tick().lines_cleared, 0);
    assert_eq!(*game.state(), before);
}

#[test]
fn test_restart_resets_but_keeps_preview() {
    let mut game = Game::with_parts(SimpleRng::new(31), Vec::<GameEvent>::new());
    game.initialize();
    for _ in 0..30 {
        game.tick();
    }
    game.state_mut().lines = 12;
    game.state_mut().game_over = true;
    let preview = game.preview_piece_type();

    game.events_mut().clear();
    game.restart();

    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.level(), 0);
    assert!(!game.game_over());
    assert_eq!(game.preview_piece_type(), preview);
    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            assert_eq!(game.cell_at(x, y), BlockType::Empty);
        }
    }
    assert_eq!(game.events().as_slice(), &[GameEvent::Restarted]);

    // The next tick brings in the previewed piece.
    let outcome = game.tick();
    assert!(outcome.spawned);
    assert_eq!(game.state().active.map(|a| a.kind), Some(preview));
    assert_eq!(game.score(), 1);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut game = flat_line();
    game.tick();

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["score"], 1);
    assert_eq!(json["gameOver"], false);
    assert_eq!(json["preview"], "block");
    assert_eq!(json["active"]["kind"], "line");
    assert_eq!(json["board"][2][4], BlockType::Line.code());
    assert_eq!(json["floating"][2][4], true);
}
