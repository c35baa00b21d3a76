//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, the input latch, the config or an RNG
//! handle) and returns a brand-new `GameState`.  Side effects are limited to
//! the injected RNG and log output.

use rand::Rng;

use crate::config::{GameConfig, OpponentPolicy};
use crate::entities::{Ball, GameEvent, GameState, Paddle, Side};
use crate::input::InputLatch;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session: paddles centred on their edges, ball in the
/// middle heading up and to the right.
pub fn init_state(config: &GameConfig) -> GameState {
    let paddle_y = (config.height - config.paddle_height) / 2.0;
    GameState {
        player: Paddle {
            x: 0.0,
            y: paddle_y,
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.player_speed,
            score: 0,
        },
        opponent: Paddle {
            x: config.width - config.paddle_width,
            y: paddle_y,
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.opponent_speed,
            score: 0,
        },
        ball: Ball {
            x: config.width / 2.0,
            y: config.height / 2.0,
            radius: config.ball_radius,
            speed: config.ball_speed,
            dx: config.ball_speed,
            dy: -config.ball_speed,
        },
        level: 1,
        reaction_counter: 0,
        events: Vec::new(),
        frame: 0,
        width: config.width,
        height: config.height,
    }
}

// ── Paddles ──────────────────────────────────────────────────────────────────

fn clamp_to_arena(paddle: Paddle, arena_height: f32) -> Paddle {
    let max_y = (arena_height - paddle.height).max(0.0);
    Paddle {
        y: paddle.y.clamp(0.0, max_y),
        ..paddle
    }
}

/// One keyboard-driven step.  Up wins when both keys are held.
fn steer(paddle: &Paddle, input: &InputLatch, arena_height: f32) -> Paddle {
    let y = if input.up_held && paddle.y > 0.0 {
        paddle.y - paddle.speed
    } else if input.down_held && paddle.y < arena_height - paddle.height {
        paddle.y + paddle.speed
    } else {
        paddle.y
    };
    clamp_to_arena(Paddle { y, ..paddle.clone() }, arena_height)
}

pub fn move_player(state: &GameState, input: &InputLatch) -> GameState {
    GameState {
        player: steer(&state.player, input, state.height),
        ..state.clone()
    }
}

/// Offset applied by a reaction-cycle slip, given a roll in `[0, 1)`.
///
/// The lower band nudges the paddle down, the next band up; everything
/// above both bands leaves it alone.
pub fn mistake_offset(roll: f64, config: &GameConfig) -> f32 {
    if roll < config.mistake_chance {
        config.mistake_nudge
    } else if roll < config.mistake_chance * 2.0 {
        -config.mistake_nudge
    } else {
        0.0
    }
}

/// Advance the opponent paddle by one frame according to the session policy.
pub fn move_opponent(
    state: &GameState,
    input: &InputLatch,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    match config.opponent_policy {
        OpponentPolicy::Mirror => GameState {
            opponent: steer(&state.opponent, input, state.height),
            ..state.clone()
        },
        OpponentPolicy::DelayedTracking => track_ball(state, config, rng),
    }
}

fn track_ball(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let mut opponent = state.opponent.clone();
    let mut reaction_counter = state.reaction_counter + 1;

    if reaction_counter > config.reaction_delay {
        let center = opponent.center_y();
        if state.ball.y < center {
            opponent.y -= opponent.speed;
        } else if state.ball.y > center {
            opponent.y += opponent.speed;
        }

        let slip = mistake_offset(rng.gen::<f64>(), config);
        if slip != 0.0 {
            log::trace!("opponent slips by {slip} at frame {}", state.frame);
        }
        opponent.y += slip;
        reaction_counter = 0;
    }

    // Clamp every frame, after any slip.
    GameState {
        opponent: clamp_to_arena(opponent, state.height),
        reaction_counter,
        ..state.clone()
    }
}

// ── Ball ─────────────────────────────────────────────────────────────────────

/// Re-derive the velocity at the ball's current speed, keeping each axis'
/// direction.  A zero component counts as negative.
fn with_speed_signs(ball: &Ball) -> Ball {
    Ball {
        dx: if ball.dx > 0.0 { ball.speed } else { -ball.speed },
        dy: if ball.dy > 0.0 { ball.speed } else { -ball.speed },
        ..ball.clone()
    }
}

/// Put the ball back in the middle of the arena, travelling in the same
/// direction per axis as before the reset.
pub fn reset_ball(ball: &Ball, width: f32, height: f32) -> Ball {
    Ball {
        x: width / 2.0,
        y: height / 2.0,
        ..with_speed_signs(ball)
    }
}

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Raise the level and speed up the opponent and the ball by one unit each.
pub fn level_up(state: &GameState) -> GameState {
    let level = state.level + 1;
    log::info!("level up: now on level {level}");

    let mut events = state.events.clone();
    events.push(GameEvent::LevelUp { level });

    let ball = Ball {
        speed: state.ball.speed + 1.0,
        ..state.ball.clone()
    };
    GameState {
        level,
        opponent: Paddle {
            speed: state.opponent.speed + 1.0,
            ..state.opponent.clone()
        },
        ball: with_speed_signs(&ball),
        events,
        ..state.clone()
    }
}

/// Level up when the player's score has just landed on a threshold.
pub fn check_level_up(state: &GameState, config: &GameConfig) -> GameState {
    if config.enable_levels && config.level_thresholds.contains(&state.player.score) {
        level_up(state)
    } else {
        state.clone()
    }
}

fn score_point(state: &GameState, side: Side, config: &GameConfig) -> GameState {
    let mut next = state.clone();
    if config.enable_scoring {
        match side {
            Side::Player => next.player.score += 1,
            Side::Opponent => next.opponent.score += 1,
        }
        log::debug!(
            "{side:?} scores: {} - {}",
            next.player.score,
            next.opponent.score
        );
        next.events.push(GameEvent::Scored(side));
        if side == Side::Player {
            next = check_level_up(&next, config);
        }
    }
    GameState {
        ball: reset_ball(&next.ball, next.width, next.height),
        ..next
    }
}

// ── Physics ──────────────────────────────────────────────────────────────────

/// Move the ball and resolve walls, scoring and paddles, in that order.
pub fn move_ball(state: &GameState, config: &GameConfig) -> GameState {
    let mut events = state.events.clone();

    // ── 1. Advance ───────────────────────────────────────────────────────────
    let mut ball = Ball {
        x: state.ball.x + state.ball.dx,
        y: state.ball.y + state.ball.dy,
        ..state.ball.clone()
    };

    // ── 2. Top and bottom walls (no positional correction) ───────────────────
    if ball.y + ball.radius > state.height || ball.y - ball.radius < 0.0 {
        ball.dy = -ball.dy;
        events.push(GameEvent::WallBounce);
    }

    let mut next = GameState {
        ball,
        events,
        ..state.clone()
    };

    // ── 3. Scoring; the reset means at most one side fires ───────────────────
    if next.ball.x + next.ball.radius > next.width {
        next = score_point(&next, Side::Player, config);
    } else if next.ball.x - next.ball.radius < 0.0 {
        next = score_point(&next, Side::Opponent, config);
    }

    // ── 4. Paddles ───────────────────────────────────────────────────────────
    let ball = &next.ball;
    let p = &next.player;
    let hit_player =
        ball.x - ball.radius < p.x + p.width && ball.y > p.y && ball.y < p.y + p.height;
    let o = &next.opponent;
    let hit_opponent = ball.x + ball.radius > o.x && ball.y > o.y && ball.y < o.y + o.height;

    if hit_player {
        next.ball.dx = -next.ball.dx;
        next.events.push(GameEvent::PaddleHit(Side::Player));
    }
    if hit_opponent {
        next.ball.dx = -next.ball.dx;
        next.events.push(GameEvent::PaddleHit(Side::Opponent));
    }

    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// `events` on the returned state holds only what happened during this frame.
pub fn tick(
    state: &GameState,
    input: &InputLatch,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    let start = GameState {
        events: Vec::new(),
        frame: state.frame + 1,
        ..state.clone()
    };
    let moved = move_player(&start, input);
    let moved = move_opponent(&moved, input, config, rng);
    move_ball(&moved, config)
}
