//! Terminal runner (default binary).
//!
//! crossterm events in, diffed frames out. Keyboard and mouse map onto the
//! same command set; held movement keys repeat on the driver's clock, not
//! the terminal's.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

use blockfall::core::Game;
use blockfall::input::{
    decode_key, is_left_key, is_right_key, is_soft_drop_key, should_quit, MoveRepeat, RepeatDir,
};
use blockfall::store::ScoreStore;
use blockfall::term::{Frame, GameView, TerminalScreen, Viewport};
use blockfall::types::{GameCommand, TICK_MS};

fn main() -> Result<()> {
    let mut screen = TerminalScreen::new();
    screen.enter()?;

    let result = run(&mut screen);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn run(screen: &mut TerminalScreen) -> Result<()> {
    let store = ScoreStore::new();
    let mut game = Game::new(startup_seed()).with_high_score(store.load());

    let view = GameView::new();
    let mut held = MoveRepeat::new();
    let mut frame = Frame::new(0, 0);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        frame.resize(w, h);
        view.render(&game, &mut frame);
        screen.present(&mut frame)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let now = now_ms(started);
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            store.save(game.high_score());
                            return Ok(());
                        }
                        handle_key_press(&mut game, &mut held, key, now);
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat only keeps held state alive;
                        // movement cadence comes from MoveRepeat.
                        if is_left_key(key.code) {
                            held.press(RepeatDir::Left, now);
                        } else if is_right_key(key.code) {
                            held.press(RepeatDir::Right, now);
                        } else if is_soft_drop_key(key.code) {
                            held.press_soft_drop(now);
                        }
                    }
                    KeyEventKind::Release => {
                        if is_left_key(key.code) {
                            held.release(RepeatDir::Left);
                        } else if is_right_key(key.code) {
                            held.release(RepeatDir::Right);
                        } else if is_soft_drop_key(key.code) {
                            held.release_soft_drop();
                        }
                    }
                },
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        let vp = Viewport {
                            width: w,
                            height: h,
                        };
                        handle_click(&mut game, &mut held, &view, vp, mouse.column, mouse.row);
                    }
                }
                Event::Resize(..) => screen.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let now = now_ms(started);

            held.refresh(now);
            for dir in RepeatDir::BOTH {
                if held.wants_repeat(dir, now) && game.move_piece(dir.dx(), 0) {
                    held.record_repeat(dir, now);
                }
            }

            game.tick(TICK_MS, held.soft_drop_held());

            if let Some(lock) = game.take_lock_event() {
                if lock.new_high_score {
                    store.save(game.high_score());
                }
            }
        }
    }
}

fn handle_key_press(game: &mut Game, held: &mut MoveRepeat, key: KeyEvent, now: u64) {
    let Some(cmd) = decode_key(key) else {
        return;
    };
    match cmd {
        GameCommand::MoveLeft => {
            if held.press(RepeatDir::Left, now) {
                game.move_piece(-1, 0);
            }
        }
        GameCommand::MoveRight => {
            if held.press(RepeatDir::Right, now) {
                game.move_piece(1, 0);
            }
        }
        GameCommand::SoftDrop => held.press_soft_drop(now),
        GameCommand::Rotate => game.rotate_piece(),
        GameCommand::Start => {
            if !game.running() {
                replace_game(game, held);
            }
        }
        GameCommand::Restart => replace_game(game, held),
    }
}

fn handle_click(
    game: &mut Game,
    held: &mut MoveRepeat,
    view: &GameView,
    vp: Viewport,
    col: u16,
    row: u16,
) {
    let layout = view.layout(vp);
    if layout.start_button.contains(col, row) && !game.running() {
        replace_game(game, held);
    } else if layout.restart_button.contains(col, row) {
        replace_game(game, held);
    }
}

/// Swap in a fresh game, carrying the high score and the RNG stream forward.
fn replace_game(game: &mut Game, held: &mut MoveRepeat) {
    let mut next = Game::new(game.seed()).with_high_score(game.high_score());
    next.start();
    *game = next;
    held.reset();
}

/// Milliseconds since program start, the timebase for held-key repeats.
fn now_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

fn startup_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}
