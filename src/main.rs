//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output.
//! Once the game is over the board stays on screen until `q` is pressed.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use blockfall::config::{AppConfig, Args};
use blockfall::core::{GameSnapshot, Session};
use blockfall::input::{should_quit, InputHandler};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalGuard, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args)?;
    logging::init(config.log_file.as_deref())?;
    info!(seed = config.seed, "starting session");

    let guard = TerminalGuard::enter()?;
    let mut term = TerminalRenderer::stdout();
    let result = run(&mut term, &config);

    // Restore before reporting a game error; the guard also covers panics.
    guard.restore()?;
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut session = Session::with_config(config.seed, config.session);

    let view = GameView::default();
    let mut input_handler =
        InputHandler::new().with_key_release_timeout_ms(config.key_release_timeout_ms);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!(score = session.score(), "quit");
                            return Ok(());
                        }
                        input_handler.handle_key_press(key);
                    }
                    KeyEventKind::Repeat => {
                        // Held state is tracked from presses and releases.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let frame = input_handler.frame();
            if !session.game_over() {
                let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
                session.tick(elapsed_ms, &frame);
            }
        }
    }
}
