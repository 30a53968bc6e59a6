//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `gridfall-term`. With `--headless <ticks>` no terminal is touched: the
//! game is ticked that many times and the final snapshot is printed as JSON.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::tty::IsTty;

use gridfall::core::{EventSink, Game, StdRandom};
use gridfall::input::{handle_key_event, is_restart_key, should_quit, InputHandler};
use gridfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gridfall::{Config, FrameReport, Session};

/// Target frame time for input polling and redraws.
const FRAME_MS: u64 = 16;

type PlaySession = Session<StdRandom, Box<dyn EventSink>>;

fn main() -> Result<()> {
    let config = Config::from_args()?;
    let stderr_is_tty = std::io::stderr().is_tty();
    let log = config.logging_enabled(stderr_is_tty);
    if config.log_events && !log {
        eprintln!("[Session] --log-events needs stderr redirected (e.g. 2>events.log); logging is off");
    }

    let mut session = Session::with_game(
        Game::with_parts(config.rng(), config.event_sink(stderr_is_tty)),
        config.max_level,
    );

    if let Some(ticks) = config.headless {
        return run_headless(&mut session, ticks, log);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &config, log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    println!("Final score: {} (highscore {})", session.game().score(), session.highscore());
    Ok(())
}

fn run_headless(session: &mut PlaySession, ticks: u32, log: bool) -> Result<()> {
    for _ in 0..ticks {
        if session.game_over() {
            break;
        }
        let report = session.tick();
        log_frame(log, report);
    }

    let json = serde_json::to_string_pretty(&session.snapshot())
        .context("failed to serialize final snapshot")?;
    println!("{json}");
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut PlaySession,
    config: &Config,
    log: bool,
) -> Result<()> {
    let view = GameView::new(config.cell_width);
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.snapshot(), session.hud(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if session.game_over() && is_restart_key(key) {
                            session.restart();
                            input.reset();
                        } else if let Some(action) = handle_key_event(key).and_then(|a| input.press(a)) {
                            session.apply(action);
                        }
                    }
                    // Held keys are repeated by the input handler.
                    KeyEventKind::Repeat => {
                        if let Some(action) = handle_key_event(key) {
                            input.repeat(action);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = handle_key_event(key) {
                            input.release(action);
                        }
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let frame_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

            for action in input.update(frame_ms) {
                session.apply(action);
            }
            let report = session.advance(frame_ms);
            log_frame(log, report);
        }
    }
}

fn log_frame(log: bool, report: FrameReport) {
    if !log {
        return;
    }
    if let Some(level) = report.level_up {
        // Shown 1-based, like the side panel.
        eprintln!("[Session] level up -> {}", level + 1);
    }
}
