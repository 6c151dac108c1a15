//! Terminal runner (default binary).
//!
//! Keyboard and mouse drags feed the input dispatcher; a frame driver advances
//! the session once per frame; the game view paints into a framebuffer that is
//! diff-flushed to the terminal.
//!
//! Terminals expose no gamepad, so this runner never calls
//! `InputDispatcher::poll_gamepad`; hosts with a pad sample it once per frame.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use tracing_subscriber::prelude::*;

use blockfall::core::{FrameDriver, GameSession, PieceFactory, PieceSource, RenderSnapshot};
use blockfall::input::{should_quit, InputDispatcher, Swipe};
use blockfall::stats::JsonFileStore;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;
use blockfall::Config;

/// Minimum drag distance (in terminal cells) that counts as a swipe
const SWIPE_THRESHOLD: i32 = 2;

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "exiting on error");
    }
    result
}

/// Log to a file when `BLOCKFALL_LOG_PATH` is set; stdout belongs to the game.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(config.log_level))
        .init();

    tracing::info!(
        level = %config.log_level,
        stats = %config.stats_path.display(),
        "logging initialized"
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let source: Box<dyn PieceSource> = match config.seed {
        Some(seed) => Box::new(PieceFactory::new(seed)),
        None => Box::new(PieceFactory::from_entropy()),
    };
    let store = JsonFileStore::new(&config.stats_path);
    let mut session = GameSession::with_parts(source, Box::new(store));

    let mut dispatcher = InputDispatcher::with_gamepad_cooldown_ms(config.gamepad_cooldown_ms);
    let mut driver = FrameDriver::new();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = RenderSnapshot::default();
    let mut drag_start: Option<(u16, u16)> = None;

    let epoch = Instant::now();
    let frame = Duration::from_millis(u64::from(FRAME_MS));
    let mut next_frame = epoch;

    loop {
        // Collect input until the next frame is due.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    dispatcher.push_key(key);
                }
                Event::Mouse(mouse) => {
                    if let Some(swipe) = track_drag(&mut drag_start, mouse) {
                        dispatcher.push_swipe(swipe);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
        if Instant::now() < next_frame {
            continue;
        }
        next_frame = Instant::now() + frame;

        let now_ms = u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        let intents = dispatcher.drain(session.phase());
        driver.frame(&mut session, intents, now_ms);

        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

/// Left-button press/release pairs become swipes.
fn track_drag(start: &mut Option<(u16, u16)>, mouse: MouseEvent) -> Option<Swipe> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            *start = Some((mouse.column, mouse.row));
            None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let (x0, y0) = start.take()?;
            let dx = i32::from(mouse.column) - i32::from(x0);
            let dy = i32::from(mouse.row) - i32::from(y0);
            Some(Swipe::from_drag(dx, dy, SWIPE_THRESHOLD))
        }
        _ => None,
    }
}
