//! Terminal runner (default binary).
//!
//! Owns the frame loop: it polls crossterm for key events, feeds measured
//! elapsed time into the session's gravity accumulator once per frame, and
//! flushes the rendered framebuffer through the diff renderer. All decision
//! logic lives in the core.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use termtris::core::GameSession;
use termtris::input::{handle_key_event, should_quit};
use termtris::term::{GameView, TerminalRenderer, Viewport};
use termtris::types::TICK_MS;

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "termtris",
    version,
    about = "Falling-block puzzle in the terminal.",
    long_about = "Falling-block puzzle in the terminal.\n\n\
        CONTROLS:\n  Left/Right  Move        Down   Soft drop\n  \
        Up / w      Rotate CW   q      Rotate CCW\n  \
        r           Restart     Esc    Quit"
)]
struct Args {
    /// RNG seed for the piece sequence (0 derives one from the clock).
    #[arg(long, default_value_t = 0)]
    seed: u32,

    /// Board cell width in terminal columns.
    #[arg(long, default_value_t = 2, value_name = "COLS")]
    cell_width: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, args: &Args) -> Result<()> {
    let seed = if args.seed != 0 {
        args.seed
    } else {
        clock_seed()
    };

    let mut session = GameSession::new(seed);
    let view = GameView::new(args.cell_width, 1);

    let frame_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Frame tick: hand the scheduler's elapsed time to the core.
        if last_frame.elapsed() >= frame_duration {
            let elapsed_ms = last_frame.elapsed().as_millis() as u32;
            last_frame = Instant::now();
            session.tick(elapsed_ms);
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
