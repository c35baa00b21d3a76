use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use term_pong::compute::{init_state, tick};
use term_pong::config::GameConfig;
use term_pong::display::{self, Banner, TerminalSurface};
use term_pong::error::GameError;
use term_pong::input::{HoldWindow, InputLatch};
use term_pong::surface::Surface;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Frames a freshly pressed key stays held on terminals that never report
/// releases.  40 frames @ 60 FPS ≈ 660 ms covers the OS repeat delay.
const FIRST_PRESS_WINDOW: u64 = 40;

/// Frames a repeating key stays held after its last repeat.  8 frames @ 60 FPS
/// ≈ 133 ms, longer than the OS repeat interval.
const REPEAT_WINDOW: u64 = 8;

/// How long the level-up banner stays up (≈2 s).
const BANNER_FRAMES: u32 = 120;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so log lines go to
/// the file named by `TERM_PONG_LOG` when set.  Without it only errors reach
/// stderr.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"));
    if let Some(path) = std::env::var_os("TERM_PONG_LOG") {
        match File::create(&path) {
            Ok(file) => {
                builder
                    .filter_level(log::LevelFilter::Debug)
                    .parse_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("cannot open log file {}: {e}", path.to_string_lossy()),
        }
    }
    builder.init();
}

fn load_config() -> Result<GameConfig, GameError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = GameConfig::load_from_file(&path)?;
            log::info!("loaded config from {path}");
            Ok(config)
        }
        None => {
            log::info!("no config file given, using defaults");
            Ok(GameConfig::default())
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the user quits.  Nothing in the game itself ends the session.
///
/// Keys map to the latch through the control scheme.  On terminals with
/// keyboard enhancement a release clears the latch immediately; elsewhere
/// the hold window releases keys that stop repeating.
fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut state = init_state(config);
    let mut latch = InputLatch::default();
    let mut hold = HoldWindow::new(FIRST_PRESS_WINDOW, REPEAT_WINDOW);
    let mut banner = Banner::new(BANNER_FRAMES);

    log::info!(
        "session start: {:?} opponent, {:?} controls, scoring={}, levels={}",
        config.opponent_policy,
        config.control_scheme,
        config.enable_scoring,
        config.enable_levels
    );

    loop {
        let frame_start = Instant::now();
        let frame = state.frame + 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    let quit = matches!(code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
                        || (code == KeyCode::Char('c')
                            && modifiers.contains(KeyModifiers::CONTROL));
                    if quit && kind == KeyEventKind::Press {
                        return Ok(());
                    }

                    let Some(action) = config.control_scheme.action_for(code) else {
                        continue;
                    };
                    match kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            latch.key_down(action);
                            hold.touch(action, frame);
                        }
                        KeyEventKind::Release => {
                            latch.key_up(action);
                            hold.forget(action);
                        }
                    }
                }
                Event::Resize(cols, rows) => {
                    if let Err(e) = surface.resize(cols, rows) {
                        log::warn!("ignoring resize: {e}");
                    }
                }
                _ => {}
            }
        }
        if !keyboard_enhanced {
            hold.expire(&mut latch, frame);
        }

        state = tick(&state, &latch, config, &mut rng);
        display::notify_events(&state.events, &mut banner);

        display::render(surface, &state, config)?;
        banner.draw(surface, &state)?;
        surface.draw_status_line(config.control_scheme.hint())?;
        surface.present()?;
        banner.tick();

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    init_logging();
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("term_pong: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let config = load_config()?;

    let mut out = BufWriter::new(stdout());
    // Fail before touching the terminal mode if there is nothing to draw on.
    TerminalSurface::new(std::io::sink(), config.width, config.height)?;

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        log::warn!(
            "terminal does not report key releases, holding keys for \
             {FIRST_PRESS_WINDOW}/{REPEAT_WINDOW} frames"
        );
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = TerminalSurface::new(&mut out, config.width, config.height)
        .map_err(GameError::from)
        .and_then(|mut surface| game_loop(&mut surface, &config, &rx, keyboard_enhanced));

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
