//! All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Left paddle, driven by the keyboard.
    Player,
    /// Right paddle, driven by the opponent controller.
    Opponent,
}

/// Something that happened during the most recent frame.
///
/// Emitted by the step functions and drained by the frame driver, which
/// decides how (or whether) to surface them.  Nothing here blocks the loop.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Scored(Side),
    LevelUp { level: u32 },
    PaddleHit(Side),
    WallBounce,
}

// ── Paddles & ball ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Units moved per step.
    pub speed: f32,
    pub score: u32,
}

impl Paddle {
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Current speed tier.  `dx` and `dy` carry this magnitude with a sign.
    pub speed: f32,
    pub dx: f32,
    pub dy: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One game session.  Cloneable so the pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    /// Difficulty level, starting at 1.
    pub level: u32,
    /// Frames since the opponent last re-evaluated its move.
    pub reaction_counter: u32,
    /// Events produced by the last call to `tick`.
    pub events: Vec<GameEvent>,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}
