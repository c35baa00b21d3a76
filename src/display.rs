//! Rendering layer — all terminal I/O lives here.
//!
//! `render` paints a game state onto any [`Surface`] and performs no game
//! logic.  [`TerminalSurface`] is the crossterm-backed surface that maps
//! arena units onto terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{GameEvent, GameState, Paddle};
use crate::error::SurfaceError;
use crate::surface::{Color, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PADDLE: Color = Color::White;
const C_BALL: Color = Color::White;
const C_SCORE: Color = Color::White;
const C_LEVEL: Color = Color::Cyan;
const C_BANNER: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Smallest terminal the arena can be drawn on without paddles vanishing.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of game state.  Does not present it: callers may
/// layer overlays on top before calling [`Surface::present`].
pub fn render<S: Surface>(
    surface: &mut S,
    state: &GameState,
    config: &GameConfig,
) -> std::io::Result<()> {
    surface.clear()?;

    draw_paddle(surface, &state.player)?;
    draw_paddle(surface, &state.opponent)?;

    let ball = &state.ball;
    surface.fill_circle(ball.x, ball.y, ball.radius, C_BALL)?;

    draw_hud(surface, state, config)?;
    Ok(())
}

fn draw_paddle<S: Surface>(surface: &mut S, paddle: &Paddle) -> std::io::Result<()> {
    surface.fill_rect(paddle.x, paddle.y, paddle.width, paddle.height, C_PADDLE)
}

fn draw_hud<S: Surface>(
    surface: &mut S,
    state: &GameState,
    config: &GameConfig,
) -> std::io::Result<()> {
    let (w, h) = (state.width, state.height);
    if config.enable_scoring {
        surface.draw_text(&state.player.score.to_string(), w / 4.0, h / 5.0, C_SCORE)?;
        surface.draw_text(&state.opponent.score.to_string(), 3.0 * w / 4.0, h / 5.0, C_SCORE)?;
    }
    if config.enable_levels {
        surface.draw_text(&format!("Level: {}", state.level), w / 2.0 - 40.0, h / 5.0, C_LEVEL)?;
    }
    Ok(())
}

// ── Notifications ─────────────────────────────────────────────────────────────

/// Receives the user-facing side of game events.  Must not block.
pub trait Notifier {
    fn level_up(&mut self, level: u32);
}

/// Forward this frame's events to `notifier`.
pub fn notify_events<N: Notifier>(events: &[GameEvent], notifier: &mut N) {
    for event in events {
        if let GameEvent::LevelUp { level } = event {
            notifier.level_up(*level);
        }
    }
}

/// A message overlaid on the arena for a fixed number of frames.
#[derive(Clone, Debug)]
pub struct Banner {
    message: Option<String>,
    frames_left: u32,
    duration: u32,
}

impl Banner {
    pub fn new(duration: u32) -> Self {
        Self {
            message: None,
            frames_left: 0,
            duration,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Count down one frame, dropping the message when it runs out.
    pub fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.message = None;
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, state: &GameState) -> std::io::Result<()> {
        match &self.message {
            Some(message) => surface.draw_text(
                message,
                state.width / 2.0 - 120.0,
                state.height * 0.4,
                C_BANNER,
            ),
            None => Ok(()),
        }
    }
}

impl Notifier for Banner {
    fn level_up(&mut self, level: u32) {
        self.message = Some(format!("Level up! You are now on level {level}"));
        self.frames_left = self.duration;
    }
}

// ── Terminal surface ──────────────────────────────────────────────────────────

fn to_terminal(color: Color) -> style::Color {
    match color {
        Color::White => style::Color::White,
        Color::Yellow => style::Color::Yellow,
        Color::Cyan => style::Color::Cyan,
        Color::DarkGrey => style::Color::DarkGrey,
    }
}

/// Draws arena-space shapes as terminal cells.  The last row is kept free for
/// a status line.
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    arena_width: f32,
    arena_height: f32,
}

impl<W: Write> TerminalSurface<W> {
    /// Use the current terminal size.  Fails if there is no usable terminal.
    pub fn new(out: W, arena_width: f32, arena_height: f32) -> Result<Self, SurfaceError> {
        let (cols, rows) = terminal::size()?;
        Self::with_size(out, cols, rows, arena_width, arena_height)
    }

    pub fn with_size(
        out: W,
        cols: u16,
        rows: u16,
        arena_width: f32,
        arena_height: f32,
    ) -> Result<Self, SurfaceError> {
        check_size(cols, rows)?;
        Ok(Self {
            out,
            cols,
            rows,
            arena_width,
            arena_height,
        })
    }

    /// Adopt a new terminal size.  Sizes below the minimum are rejected and the
    /// old size is kept.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), SurfaceError> {
        check_size(cols, rows)?;
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn play_rows(&self) -> u16 {
        self.rows - 1
    }

    /// Horizontal arena position in fractional columns.
    fn col_f(&self, x: f32) -> f32 {
        x / self.arena_width * self.cols as f32
    }

    fn row_f(&self, y: f32) -> f32 {
        y / self.arena_height * self.play_rows() as f32
    }

    fn col(&self, x: f32) -> u16 {
        (self.col_f(x).floor().max(0.0) as u16).min(self.cols - 1)
    }

    fn row(&self, y: f32) -> u16 {
        (self.row_f(y).floor().max(0.0) as u16).min(self.play_rows() - 1)
    }

    /// Write `text` on the bottom row, below the arena.
    pub fn draw_status_line(&mut self, text: &str) -> std::io::Result<()> {
        let fitted: String = text.chars().take(self.cols as usize - 1).collect();
        self.out.queue(cursor::MoveTo(1, self.rows - 1))?;
        self.out.queue(style::SetForegroundColor(to_terminal(C_HINT)))?;
        self.out.queue(Print(fitted))?;
        Ok(())
    }
}

fn check_size(cols: u16, rows: u16) -> Result<(), SurfaceError> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(SurfaceError::TooSmall {
            cols,
            rows,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        });
    }
    Ok(())
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) -> std::io::Result<()> {
        // Every rectangle covers at least one cell.
        let c0 = self.col(x);
        let c1 = (self.col_f(x + w).ceil() as u16).clamp(c0 + 1, self.cols);
        let r0 = self.row(y);
        let r1 = (self.row_f(y + h).ceil() as u16).clamp(r0 + 1, self.play_rows());

        let line = "█".repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(to_terminal(color)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Color) -> std::io::Result<()> {
        let rx = self.col_f(r);
        let ry = self.row_f(r);
        self.out.queue(style::SetForegroundColor(to_terminal(color)))?;

        // Smaller than a cell: a single dot.
        if rx < 1.0 && ry < 1.0 {
            self.out.queue(cursor::MoveTo(self.col(x), self.row(y)))?;
            self.out.queue(Print("●"))?;
            return Ok(());
        }

        // Never narrower than the cell the centre sits in.
        let (rx, ry) = (rx.max(0.5), ry.max(0.5));
        let (cx, cy) = (self.col_f(x), self.row_f(y));
        for row in self.row(y - r)..=self.row(y + r) {
            for col in self.col(x - r)..=self.col(x + r) {
                let nx = (col as f32 + 0.5 - cx) / rx;
                let ny = (row as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.out.queue(cursor::MoveTo(col, row))?;
                    self.out.queue(Print("█"))?;
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) -> std::io::Result<()> {
        let col = self.col(x);
        let fitted: String = text.chars().take((self.cols - col) as usize).collect();
        self.out.queue(cursor::MoveTo(col, self.row(y)))?;
        self.out.queue(style::SetForegroundColor(to_terminal(color)))?;
        self.out.queue(Print(fitted))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows - 1))?;
        self.out.flush()
    }
}
