//! Session configuration.
//!
//! One `GameConfig` covers both the plain and the extended game: scoring,
//! levels, the opponent policy and the control scheme are flags here rather
//! than separate code paths.  Every field has a default, so a TOML file only
//! needs the keys it wants to change.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// How the right-hand paddle is driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentPolicy {
    /// Follows the player's keys at its own speed.  Stands still without input.
    Mirror,
    /// Tracks the ball every few frames and occasionally slips.
    DelayedTracking,
}

/// Which physical keys drive the player's paddle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// `W` up, `S` down.
    Wasd,
    /// Arrow up / arrow down.
    Arrows,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub enable_scoring: bool,
    pub enable_levels: bool,
    pub opponent_policy: OpponentPolicy,
    pub control_scheme: ControlScheme,

    // Arena
    pub width: f32,
    pub height: f32,

    // Paddles
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub player_speed: f32,
    pub opponent_speed: f32,

    // Ball
    pub ball_radius: f32,
    pub ball_speed: f32,

    // Opponent AI
    /// The opponent moves once the reaction counter exceeds this.
    pub reaction_delay: u32,
    /// Width of each of the two mistake bands (nudge down, then nudge up).
    pub mistake_chance: f64,
    pub mistake_nudge: f32,

    /// Player scores that trigger a level-up.
    pub level_thresholds: Vec<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enable_scoring: true,
            enable_levels: true,
            opponent_policy: OpponentPolicy::DelayedTracking,
            control_scheme: ControlScheme::Wasd,
            width: 800.0,
            height: 400.0,
            paddle_width: 10.0,
            paddle_height: 100.0,
            player_speed: 5.0,
            opponent_speed: 4.0,
            ball_radius: 10.0,
            ball_speed: 4.0,
            reaction_delay: 5,
            mistake_chance: 0.05,
            mistake_nudge: 20.0,
            level_thresholds: vec![5, 10, 15],
        }
    }
}

impl GameConfig {
    /// Load and validate a configuration file.  Only `.toml` is understood.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("player_speed", self.player_speed),
            ("opponent_speed", self.opponent_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.paddle_height >= self.height {
            return Err(ConfigError::Invalid(format!(
                "paddle_height {} does not fit in arena height {}",
                self.paddle_height, self.height
            )));
        }
        if self.ball_radius * 2.0 >= self.height || self.paddle_width * 2.0 >= self.width {
            return Err(ConfigError::Invalid("arena too small for ball and paddles".to_string()));
        }
        if !(0.0..=0.5).contains(&self.mistake_chance) {
            return Err(ConfigError::Invalid(format!(
                "mistake_chance must be within [0, 0.5], got {}",
                self.mistake_chance
            )));
        }
        Ok(())
    }
}
