//! Session scenarios - tick cadence, level-ups, high score, restart

use gridfall::core::{Game, NullSink, ScriptedRng};
use gridfall::types::{BlockType, GameAction};
use gridfall::Session;

/// Flat Line in row 1, columns 4..=7.
fn flat_line_session() -> Session<ScriptedRng, NullSink> {
    Session::with_game(
        Game::with_parts(ScriptedRng::new(vec![2, 0, 1]), NullSink),
        None,
    )
}

#[test]
fn test_blocked_move_down_forces_tick_next_frame() {
    let mut session = flat_line_session();
    session
        .game_mut()
        .state_mut()
        .grid
        .set(5, 2, BlockType::Block);

    assert!(!session.apply(GameAction::MoveDown));
    assert!(session.game().down_blocked());

    // No game time has passed, but the pending lock is handled anyway.
    let report = session.advance(0);
    let outcome = report.tick.expect("forced tick");
    assert!(outcome.locked);
    assert!(outcome.spawned);
    assert!(!session.game().down_blocked());
}

#[test]
fn test_level_up_speeds_up_ticks() {
    let mut session = Session::new(11);
    session.game_mut().state_mut().lines = 10;

    let report = session.advance(1000);
    assert!(report.tick.is_some());
    assert_eq!(report.level_up, Some(1));
    assert_eq!(session.level(), 1);
    assert_eq!(session.tick_interval_ms(), 500);
}

#[test]
fn test_level_rises_one_step_per_frame() {
    let mut session = Session::new(11);
    session.game_mut().state_mut().lines = 25;

    assert_eq!(session.advance(0).level_up, Some(1));
    assert_eq!(session.advance(0).level_up, Some(2));
    assert_eq!(session.advance(0).level_up, None);
    assert_eq!(session.level(), 2);
}

#[test]
fn test_highscore_survives_restart() {
    let mut session = Session::new(5);
    {
        let state = session.game_mut().state_mut();
        state.score = 500;
        state.game_over = true;
    }

    // Ticks are ignored once the game is over, but the score is recorded.
    let report = session.tick();
    assert_eq!(report.tick, Some(Default::default()));
    assert_eq!(session.highscore(), 500);

    assert!(session.apply(GameAction::Restart));
    assert!(!session.game_over());
    assert_eq!(session.level(), 0);
    assert_eq!(session.game().score(), 0);
    assert_eq!(session.highscore(), 500);

    // The next tick spawns the first piece of the new game.
    assert!(session.tick().tick.is_some_and(|t| t.spawned));
    assert_eq!(session.game().score(), 1);
    assert_eq!(session.highscore(), 500);
}

#[test]
fn test_restart_needs_game_over() {
    let mut session = Session::new(5);
    let before = session.snapshot();

    assert!(!session.restart());
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_moves_ignored_after_game_over() {
    let mut session = Session::new(5);
    session.game_mut().state_mut().game_over = true;
    let before = session.snapshot();

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveDown,
        GameAction::Rotate,
    ] {
        assert!(!session.apply(action));
    }
    assert_eq!(session.snapshot(), before);
}
